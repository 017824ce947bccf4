use crate::handler::Instruction;
use crate::style::{BoxColours, StyleDescriptor};

use super::RenderError;
use super::host::{Host, SectionEditTarget};
use super::markup;

/// Render state of one open box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoxFrame {
    pub colours: Option<BoxColours>,
    /// A content wrapper div is open and must be closed before the box.
    pub has_content_wrapper: bool,
    /// Text is currently going into the title heading.
    pub title_mode: bool,
}

/// Renders the instructions of one document.
///
/// Holds the stack of open boxes. A session covers exactly one document;
/// create a new one for the next.
pub struct RenderSession<'h, H: Host + ?Sized> {
    host: &'h mut H,
    stack: Vec<BoxFrame>,
    doc: String,
}

impl<'h, H: Host + ?Sized> RenderSession<'h, H> {
    pub fn new(host: &'h mut H) -> Self {
        Self {
            host,
            stack: Vec::new(),
            doc: String::new(),
        }
    }

    /// Number of boxes currently open.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The innermost open box.
    pub fn current(&self) -> Option<&BoxFrame> {
        self.stack.last()
    }

    /// Markup produced so far.
    pub fn output(&self) -> &str {
        &self.doc
    }

    pub fn render(&mut self, instruction: &Instruction<'_>) -> Result<(), RenderError> {
        match instruction {
            Instruction::TitleOpen { style, pos } => {
                self.open_box(style, *pos, true);
                let colours = style.colours.as_ref();
                self.doc.push_str(&markup::title_open(colours));
            }
            Instruction::BoxOpen { style, pos } => {
                self.open_box(style, *pos, false);
                if let Some(colours) = &style.colours {
                    self.doc.push_str(&markup::content_open(Some(colours)));
                    if let Some(frame) = self.stack.last_mut() {
                        frame.has_content_wrapper = true;
                    }
                }
            }
            Instruction::TitleClose { pos } => {
                let frame = self
                    .stack
                    .last_mut()
                    .ok_or(RenderError::NoOpenBox { pos: *pos })?;
                frame.title_mode = false;
                frame.has_content_wrapper = true;
                self.doc.push_str(&markup::title_close(frame.colours.as_ref()));
            }
            Instruction::Title { text, pos } => {
                if self.stack.is_empty() {
                    return Err(RenderError::NoOpenBox { pos: *pos });
                }
                self.text(text);
            }
            Instruction::Data { text, .. } => self.text(text),
            Instruction::Cdata { text, .. } => {
                let escaped = self.host.escape(text);
                self.doc.push_str(&escaped);
            }
            Instruction::BoxClose { caption, pos } => self.close_box(*caption, *pos)?,
        }
        Ok(())
    }

    /// Closes any box still open at `end` and returns the markup.
    pub fn finish(mut self, end: usize) -> Result<String, RenderError> {
        if !self.stack.is_empty() {
            log::warn!("{} box(es) still open at end of document", self.stack.len());
        }
        while !self.stack.is_empty() {
            self.close_box(None, end)?;
        }
        Ok(self.doc)
    }

    fn open_box(&mut self, style: &StyleDescriptor, pos: usize, title_mode: bool) {
        let section = self
            .host
            .start_section_edit(pos, &SectionEditTarget::for_box(pos));
        self.doc
            .push_str(&markup::box_open(style, section.as_deref()));
        self.stack.push(BoxFrame {
            colours: style.colours.clone(),
            has_content_wrapper: false,
            title_mode,
        });
        log::debug!("opened box at {pos}, depth {}", self.stack.len());
    }

    /// Escaped text, anchor-wrapped while the innermost box reads its title.
    fn text(&mut self, text: &str) {
        let escaped = self.host.escape(text);
        if self.stack.last().is_some_and(|f| f.title_mode) {
            let id = self.host.header_to_link(&escaped, true);
            self.doc.push_str(&markup::title_anchor(&id, &escaped));
        } else {
            self.doc.push_str(&escaped);
        }
    }

    fn close_box(&mut self, caption: Option<&str>, pos: usize) -> Result<(), RenderError> {
        let Some(frame) = self.stack.pop() else {
            log::warn!("closing box at {pos} with no open box");
            return Err(RenderError::UnbalancedClose { pos });
        };
        let colours = frame.colours.as_ref();

        if frame.title_mode {
            self.doc.push_str(markup::title_end());
        }
        if frame.has_content_wrapper {
            self.doc.push_str(markup::content_close());
        }
        if let Some(caption) = caption {
            let escaped = self.host.escape(caption);
            self.doc.push_str(&markup::caption(&escaped, colours));
        }

        self.host.no_cache();
        self.host.finish_section_edit(pos);

        self.doc.push('\n');
        self.doc.push_str(&markup::box_close(colours));
        log::debug!("closed box at {pos}, depth {}", self.stack.len());
        Ok(())
    }
}
