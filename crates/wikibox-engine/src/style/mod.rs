//! # Box Style Attributes
//!
//! Parsing of the attribute text in an opening box tag.
//!
//! ```text
//! <box 60% #fce #notes margin:1em round|Title>
//!      │   │    │      │         └ class
//!      │   │    │      └ spacing
//!      │   │    └ id
//!      │   └ colour
//!      └ width
//! ```
//!
//! - **`tokenizer`**: [`StyleToken`] classification and [`parse_box_style`]
//! - **`colour`**: colour tokens to the four role colours ([`BoxColours`])

pub mod colour;
pub mod tokenizer;

pub use colour::{BoxColours, MAX_COLOURS, Triplet, resolve_colours};
pub use tokenizer::{MAX_TOKENS, StyleDescriptor, StyleToken, parse_box_style};
