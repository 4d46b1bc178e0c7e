//! # cascade-flatten
//!
//! Flattens an OpenCV Haar cascade classifier description (XML) into a
//! statically initialized numeric table embedded in a generated C header.
//!
//! The document's stages → trees → decision nodes → feature rectangles
//! hierarchy becomes one fixed-width row per decision node:
//!
//! ```text
//! {stage index, stage threshold, node threshold, left value, right value,
//!  rect0 (x y w h weight), rect1 (…), rect2 (…)},
//! ```
//!
//! Features with only two rectangles are padded with an all-zero third, so
//! every row has exactly 20 fields. Numeric text is carried through from the
//! source document byte-for-byte, never reparsed.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cascade_flatten::{load_cascade, write_header};
//!
//! let cascade = load_cascade("haarcascade_frontalface_default.xml", None)?;
//! write_header(&cascade, "haar.h")?;
//! # Ok::<(), cascade_flatten::Error>(())
//! ```
//!
//! Output is rendered fully in memory and written in one operation; a run
//! that fails mid-parse leaves no output file behind.

mod cascade;
mod emit;
mod error;
mod parse;

pub use cascade::{Cascade, Feature, LeafNode, Rect, Stage, Tree, RECORD_WIDTH};
pub use emit::{render_header, write_header};
pub use error::{Error, Result};
pub use parse::{load_cascade, parse_cascade};
