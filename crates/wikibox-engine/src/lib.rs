//! # wikibox-engine
//!
//! Renders `<box>` blocks in wiki text to XHTML.
//!
//! ```text
//! <box 50% round #notes|Title>
//!   ...content...
//! </box|Caption>
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! Document → Lexer → Lexemes → Handler → Instructions → RenderSession → XHTML
//!                                 │
//!                                 └ parse_box_style (opening tags)
//! ```
//!
//! Boxes nest to any depth. Each open box is a [`BoxFrame`] on the session's
//! stack, so colours, content wrappers and title state never leak between
//! parent and child boxes.
//!
//! ## Quick Start
//!
//! ```
//! use wikibox_engine::{XhtmlHost, render_document};
//!
//! let mut host = XhtmlHost::new();
//! let html = render_document("<box 50% round>Hello</box>", &mut host).unwrap();
//! assert!(html.starts_with("<div class=\"box round\" style=\"width: 50%;\">"));
//! ```

pub mod cursor;
pub mod handler;
pub mod lexer;
pub mod render;
pub mod style;

pub use handler::{Handler, Instruction, instructions};
pub use lexer::{LexState, Lexeme, lex};
pub use render::{
    BoxFrame, Host, RenderError, RenderSession, SectionEdit, SectionEditTarget, XhtmlHost,
    render_document, section_id,
};
pub use style::{BoxColours, StyleDescriptor, StyleToken, parse_box_style, resolve_colours};
