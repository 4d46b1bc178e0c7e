//! Read-only data model for a parsed Haar cascade description.
//!
//! Every numeric field is kept as the original source text so the generated
//! header reproduces the document's precision byte-for-byte. Nothing here is
//! mutated after parsing; the whole model is built once, walked once by the
//! emitter, and dropped.

/// Number of fields in one flattened output record:
/// stage index + stage threshold + node threshold + left/right values
/// + 3 rectangles of 5 fields each.
pub const RECORD_WIDTH: usize = 20;

/// Number of rectangles every emitted record carries after padding.
pub const RECTS_PER_RECORD: usize = 3;

/// One weighted sub-rectangle of a Haar feature: `(x, y, width, height, weight)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rect {
    pub x: String,
    pub y: String,
    pub width: String,
    pub height: String,
    pub weight: String,
}

impl Rect {
    pub fn new(x: &str, y: &str, width: &str, height: &str, weight: &str) -> Self {
        Self {
            x: x.to_string(),
            y: y.to_string(),
            width: width.to_string(),
            height: height.to_string(),
            weight: weight.to_string(),
        }
    }

    /// The all-zero rectangle used to pad two-rect features to three.
    pub fn zero() -> Self {
        Self::new("0", "0", "0", "0", "0")
    }

    /// Fields in emission order.
    pub fn fields(&self) -> [&str; 5] {
        [&self.x, &self.y, &self.width, &self.height, &self.weight]
    }
}

/// A Haar feature: two or three weighted rectangles as found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub rects: Vec<Rect>,
}

impl Feature {
    pub fn new(rects: Vec<Rect>) -> Self {
        Self { rects }
    }

    /// The rectangles padded to exactly [`RECTS_PER_RECORD`] entries with
    /// [`Rect::zero`], so every record has the same arity.
    pub fn padded_rects(&self) -> Vec<Rect> {
        let mut rects = self.rects.clone();
        while rects.len() < RECTS_PER_RECORD {
            rects.push(Rect::zero());
        }
        rects
    }
}

/// A decision node of a weak-learner tree: comparison threshold plus the two
/// boosting output values and the feature evaluated at detection time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafNode {
    pub threshold: String,
    pub left_val: String,
    pub right_val: String,
    pub feature: Feature,
}

/// A weak learner. Trees in this corpus are depth-1, so `nodes` holds a
/// single root node in practice, but document order is preserved if there
/// are more.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    pub nodes: Vec<LeafNode>,
}

/// One boosting round: a rejection threshold and its weak-learner trees.
/// The index is assigned during traversal (0-based, element children only),
/// never read from the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub index: usize,
    pub threshold: String,
    pub trees: Vec<Tree>,
}

/// A fully parsed cascade: the detection window size and the ordered stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cascade {
    /// Detection window width, as source text.
    pub width: String,
    /// Detection window height, as source text.
    pub height: String,
    pub stages: Vec<Stage>,
}

impl Cascade {
    /// Total number of leaf nodes, which is also the number of rows the
    /// emitted table will have.
    pub fn num_nodes(&self) -> usize {
        self.stages
            .iter()
            .flat_map(|s| &s.trees)
            .map(|t| t.nodes.len())
            .sum()
    }

    pub fn num_stages(&self) -> usize {
        self.stages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rect_fields() {
        let r = Rect::zero();
        assert_eq!(r.fields(), ["0", "0", "0", "0", "0"]);
    }

    #[test]
    fn two_rect_feature_pads_to_three() {
        let feature = Feature::new(vec![
            Rect::new("8", "7", "2", "6", "-1."),
            Rect::new("8", "10", "2", "3", "2."),
        ]);

        let padded = feature.padded_rects();
        assert_eq!(padded.len(), RECTS_PER_RECORD);
        assert_eq!(padded[2], Rect::zero());
        // The original rects are untouched.
        assert_eq!(padded[0].weight, "-1.");
    }

    #[test]
    fn three_rect_feature_unpadded() {
        let third = Rect::new("11", "7", "3", "3", "2.");
        let feature = Feature::new(vec![
            Rect::new("8", "4", "6", "6", "-1."),
            Rect::new("8", "4", "3", "3", "2."),
            third.clone(),
        ]);

        let padded = feature.padded_rects();
        assert_eq!(padded.len(), 3);
        assert_eq!(padded[2], third);
    }

    #[test]
    fn node_count_sums_across_stages() {
        let node = LeafNode {
            threshold: "0.1".into(),
            left_val: "-1.".into(),
            right_val: "1.".into(),
            feature: Feature::new(vec![Rect::zero(), Rect::zero()]),
        };
        let cascade = Cascade {
            width: "20".into(),
            height: "20".into(),
            stages: vec![
                Stage {
                    index: 0,
                    threshold: "-1.".into(),
                    trees: vec![Tree {
                        nodes: vec![node.clone()],
                    }],
                },
                Stage {
                    index: 1,
                    threshold: "-1.5".into(),
                    trees: vec![
                        Tree {
                            nodes: vec![node.clone(), node.clone()],
                        },
                        Tree { nodes: vec![node] },
                    ],
                },
            ],
        };

        assert_eq!(cascade.num_stages(), 2);
        assert_eq!(cascade.num_nodes(), 4);
    }
}
