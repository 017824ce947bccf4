//! # Rendering
//!
//! Turns box instructions into XHTML.
//!
//! - **`host`**: the [`Host`] capabilities borrowed from the surrounding wiki
//!   renderer, and the shipped [`XhtmlHost`]
//! - **`session`**: [`RenderSession`], the stack of open [`BoxFrame`]s
//! - **`markup`**: the markup fragments for each part of a box

pub mod host;
pub mod markup;
pub mod session;

pub use host::{Host, SectionEdit, SectionEditTarget, XhtmlHost, section_id};
pub use session::{BoxFrame, RenderSession};

use crate::handler::Handler;
use crate::lexer::lex;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("Closing box tag at byte {pos} has no open box")]
    UnbalancedClose { pos: usize },
    #[error("Box instruction at byte {pos} needs an open box")]
    NoOpenBox { pos: usize },
}

/// Renders a whole wiki document, boxes and surrounding text, to XHTML.
pub fn render_document<H: Host + ?Sized>(text: &str, host: &mut H) -> Result<String, RenderError> {
    let mut handler = Handler::new();
    let mut session = RenderSession::new(host);
    for lexeme in lex(text) {
        let instruction = handler.handle(&lexeme);
        session.render(&instruction)?;
    }
    session.finish(text.len())
}
