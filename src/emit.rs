//! Render a parsed cascade into a C header holding the flattened table.
//!
//! The generated header looks like:
//!
//! ```c
//! #ifndef CASCADE
//! #define CASCADE
//!
//! const int HAAR_WIDTH = 20;
//! const int HAAR_HEIGHT = 20;
//!
//! double haar_data[][20] = {
//! {0, -1.1856809854507446, 1.1384399840608239e-003, ...},
//! ...
//! };
//! #endif
//! ```
//!
//! One row per decision node, in document order: stage index, stage
//! threshold, node threshold, left/right values, then three rectangles of
//! five fields (two-rect features are padded with zeros). All numeric text
//! comes straight from the document.

use std::fs;
use std::path::Path;

use crate::cascade::{Cascade, LeafNode, Stage, RECORD_WIDTH};
use crate::error::Result;

const INCLUDE_GUARD: &str = "CASCADE";
const TABLE_NAME: &str = "haar_data";

/// Render the complete header text for a cascade.
pub fn render_header(cascade: &Cascade) -> String {
    let mut out = String::new();

    out.push_str(&format!("#ifndef {}\n", INCLUDE_GUARD));
    out.push_str(&format!("#define {}\n\n", INCLUDE_GUARD));

    out.push_str(&format!("const int HAAR_WIDTH = {};\n", cascade.width));
    out.push_str(&format!("const int HAAR_HEIGHT = {};\n\n", cascade.height));

    out.push_str(&format!("double {}[][{}] = {{\n", TABLE_NAME, RECORD_WIDTH));

    for stage in &cascade.stages {
        for tree in &stage.trees {
            for node in &tree.nodes {
                out.push_str(&render_row(stage, node));
            }
        }
    }

    out.push_str("};\n");
    out.push_str("#endif\n");

    out
}

/// One initializer row: 20 comma-separated fields, trailing comma, newline.
fn render_row(stage: &Stage, node: &LeafNode) -> String {
    let mut fields: Vec<String> = Vec::with_capacity(RECORD_WIDTH);

    fields.push(stage.index.to_string());
    fields.push(stage.threshold.clone());
    fields.push(node.threshold.clone());
    fields.push(node.left_val.clone());
    fields.push(node.right_val.clone());

    for rect in node.feature.padded_rects() {
        for field in rect.fields() {
            fields.push(field.to_string());
        }
    }

    debug_assert_eq!(fields.len(), RECORD_WIDTH);

    format!("{{{}}},\n", fields.join(", "))
}

/// Render the header and write it to `path` in a single operation.
///
/// The whole text is built in memory first, so a cascade that fails to
/// render never touches the filesystem and a failed run leaves no
/// half-written header behind.
pub fn write_header<P: AsRef<Path>>(cascade: &Cascade, path: P) -> Result<()> {
    let text = render_header(cascade);
    fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cascade::{Feature, Rect, Tree};

    fn sample_cascade() -> Cascade {
        let node = LeafNode {
            threshold: "1.1384399840608239e-003".into(),
            left_val: "-0.8377197980880737".into(),
            right_val: "-0.6608840823173523".into(),
            feature: Feature::new(vec![
                Rect::new("8", "7", "2", "6", "-1."),
                Rect::new("8", "10", "2", "3", "2."),
            ]),
        };

        Cascade {
            width: "20".into(),
            height: "20".into(),
            stages: vec![Stage {
                index: 0,
                threshold: "-1.1856809854507446".into(),
                trees: vec![Tree { nodes: vec![node] }],
            }],
        }
    }

    #[test]
    fn header_structure() {
        let text = render_header(&sample_cascade());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "#ifndef CASCADE");
        assert_eq!(lines[1], "#define CASCADE");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "const int HAAR_WIDTH = 20;");
        assert_eq!(lines[4], "const int HAAR_HEIGHT = 20;");
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], "double haar_data[][20] = {");
        assert_eq!(lines[lines.len() - 2], "};");
        assert_eq!(lines[lines.len() - 1], "#endif");
    }

    #[test]
    fn row_has_twenty_fields_and_zero_padding() {
        let text = render_header(&sample_cascade());
        let row = text.lines().find(|l| l.starts_with('{')).unwrap();

        assert!(row.ends_with("},"));
        let inner = &row[1..row.len() - 2];
        let fields: Vec<&str> = inner.split(", ").collect();

        assert_eq!(fields.len(), RECORD_WIDTH);
        // The two source rects are followed by the zero pad.
        assert_eq!(&fields[15..], &["0", "0", "0", "0", "0"]);
    }

    #[test]
    fn row_matches_reference_output() {
        let text = render_header(&sample_cascade());

        assert!(text.contains(
            "{0, -1.1856809854507446, 1.1384399840608239e-003, -0.8377197980880737, \
             -0.6608840823173523, 8, 7, 2, 6, -1., 8, 10, 2, 3, 2., 0, 0, 0, 0, 0},\n"
        ));
    }

    #[test]
    fn write_header_creates_file() {
        let path = std::env::temp_dir().join("cascade_flatten_emit_test.h");
        write_header(&sample_cascade(), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, render_header(&sample_cascade()));

        std::fs::remove_file(path).ok();
    }
}
