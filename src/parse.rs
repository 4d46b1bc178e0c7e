//! Loader for OpenCV's Haar cascade XML description format.
//!
//! The document nests stages → trees → decision nodes → feature rectangles:
//!
//! ```text
//! <opencv_storage>
//!   <haarcascade_frontalface_default type_id="opencv-haar-classifier">
//!     <size>20 20</size>
//!     <stages>
//!       <_>                       <!-- one stage -->
//!         <trees>
//!           <_>                   <!-- one weak-learner tree -->
//!             <_>                 <!-- its root node -->
//!               <feature>
//!                 <rects>
//!                   <_>x y w h weight</_>  <!-- 2 or 3 times -->
//!                 </rects>
//!                 <tilted>0</tilted>
//!               </feature>
//!               <threshold>…</threshold>
//!               <left_val>…</left_val>
//!               <right_val>…</right_val>
//!             </_>
//!           </_>
//!         </trees>
//!         <stage_threshold>…</stage_threshold>
//!         <parent>…</parent>
//!         <next>…</next>
//!       </_>
//!     </stages>
//!   </haarcascade_frontalface_default>
//! </opencv_storage>
//! ```
//!
//! All numeric text is captured verbatim. The `<tilted>`, `<parent>` and
//! `<next>` fields have no column in the flattened table and are skipped.

use std::fs;
use std::path::Path;

use roxmltree::{Document, Node};

use crate::cascade::{Cascade, Feature, LeafNode, Rect, Stage, Tree};
use crate::error::{Error, Result};

/// The `type_id` attribute OpenCV stamps on stump-based Haar classifiers.
const HAAR_TYPE_ID: &str = "opencv-haar-classifier";

/// Load and parse a cascade description from a file.
///
/// `root_tag` selects the classifier root element by tag name (OpenCV names
/// it after the cascade, e.g. `haarcascade_frontalface_default`). When
/// `None`, the first element with `type_id="opencv-haar-classifier"` is used.
pub fn load_cascade<P: AsRef<Path>>(path: P, root_tag: Option<&str>) -> Result<Cascade> {
    let xml = fs::read_to_string(path)?;
    parse_cascade(&xml, root_tag)
}

/// Parse a cascade description from an in-memory XML string.
pub fn parse_cascade(xml: &str, root_tag: Option<&str>) -> Result<Cascade> {
    let doc = Document::parse(xml)?;
    let root = find_classifier_root(&doc, root_tag)?;

    let size = child_element(root, "size", "classifier root")?;
    let (width, height) = parse_size(size)?;

    let stages_el = child_element(root, "stages", "classifier root")?;
    let mut stages = Vec::new();

    // Only element children count as stages; comments and whitespace between
    // them must not advance the index.
    for (index, stage_el) in stages_el.children().filter(Node::is_element).enumerate() {
        stages.push(parse_stage(stage_el, index)?);
    }

    Ok(Cascade {
        width,
        height,
        stages,
    })
}

fn find_classifier_root<'a, 'input>(
    doc: &'a Document<'input>,
    root_tag: Option<&str>,
) -> Result<Node<'a, 'input>> {
    match root_tag {
        Some(tag) => doc
            .descendants()
            .find(|n| n.is_element() && n.tag_name().name() == tag)
            .ok_or_else(|| Error::missing(tag, "document")),
        None => doc
            .descendants()
            .find(|n| n.is_element() && n.attribute("type_id") == Some(HAAR_TYPE_ID))
            .ok_or_else(|| {
                Error::Structural(format!(
                    "no element with type_id=\"{}\" in document",
                    HAAR_TYPE_ID
                ))
            }),
    }
}

fn parse_size(size: Node) -> Result<(String, String)> {
    let text = element_text(size);
    let mut tokens = text.split_whitespace();

    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(w), Some(h), None) => Ok((w.to_string(), h.to_string())),
        _ => Err(Error::Structural(format!(
            "<size> must hold exactly two integers, got \"{}\"",
            text
        ))),
    }
}

fn parse_stage(stage_el: Node, index: usize) -> Result<Stage> {
    let context = format!("stage {}", index);

    let threshold = child_element(stage_el, "stage_threshold", &context)?;
    let trees_el = child_element(stage_el, "trees", &context)?;

    let mut trees = Vec::new();
    for tree_el in trees_el.children().filter(Node::is_element) {
        trees.push(parse_tree(tree_el, &context)?);
    }

    Ok(Stage {
        index,
        threshold: element_text(threshold).to_string(),
        trees,
    })
}

fn parse_tree(tree_el: Node, stage_context: &str) -> Result<Tree> {
    let mut nodes = Vec::new();
    for node_el in tree_el.children().filter(Node::is_element) {
        nodes.push(parse_node(node_el, stage_context)?);
    }
    Ok(Tree { nodes })
}

fn parse_node(node_el: Node, stage_context: &str) -> Result<LeafNode> {
    let context = format!("tree node of {}", stage_context);

    let threshold = child_element(node_el, "threshold", &context)?;
    let left_val = child_element(node_el, "left_val", &context)?;
    let right_val = child_element(node_el, "right_val", &context)?;
    let feature_el = child_element(node_el, "feature", &context)?;

    Ok(LeafNode {
        threshold: element_text(threshold).to_string(),
        left_val: element_text(left_val).to_string(),
        right_val: element_text(right_val).to_string(),
        feature: parse_feature(feature_el, &context)?,
    })
}

fn parse_feature(feature_el: Node, context: &str) -> Result<Feature> {
    let rects_el = child_element(feature_el, "rects", context)?;

    // Each rect element holds "x y w h weight"; collect every token across
    // the feature, then validate the total. 10 tokens is a two-rect feature,
    // 15 a three-rect one; nothing else is well-formed.
    let mut tokens: Vec<&str> = Vec::new();
    for rect_el in rects_el.children().filter(Node::is_element) {
        tokens.extend(element_text(rect_el).split_whitespace());
    }

    if tokens.len() != 10 && tokens.len() != 15 {
        return Err(Error::FeatureArity {
            found: tokens.len(),
        });
    }

    let rects = tokens
        .chunks_exact(5)
        .map(|c| Rect::new(c[0], c[1], c[2], c[3], c[4]))
        .collect();

    Ok(Feature::new(rects))
}

/// Find a direct element child by tag name, or report which level it was
/// missing from.
fn child_element<'a, 'input>(
    parent: Node<'a, 'input>,
    tag: &str,
    context: &str,
) -> Result<Node<'a, 'input>> {
    parent
        .children()
        .find(|c| c.is_element() && c.tag_name().name() == tag)
        .ok_or_else(|| Error::missing(tag, context))
}

/// The trimmed text content of an element ("" if empty).
fn element_text<'a, 'input>(node: Node<'a, 'input>) -> &'a str {
    node.text().unwrap_or("").trim()
}
