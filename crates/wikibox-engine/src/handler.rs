use crate::lexer::{LexState, Lexeme};
use crate::style::{StyleDescriptor, parse_box_style};

/// Length of `<box` at the start of an opening tag.
const OPEN_PREFIX: usize = "<box".len();
/// Length of `</box` at the start of a closing tag.
const CLOSE_PREFIX: usize = "</box".len();

/// One render step, produced from a [`Lexeme`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction<'a> {
    /// Opening tag ending in `|`: the title follows.
    TitleOpen { style: StyleDescriptor, pos: usize },
    /// Opening tag without a title.
    BoxOpen { style: StyleDescriptor, pos: usize },
    /// The `>` that ends a title; the body follows.
    TitleClose { pos: usize },
    /// Title text.
    Title { text: &'a str, pos: usize },
    /// Literal text inside a box that the lexer matched on its own (a `>`).
    Data { text: &'a str, pos: usize },
    /// Ordinary document text, inside or outside a box.
    Cdata { text: &'a str, pos: usize },
    /// Closing tag. `pos` points just past the tag.
    BoxClose { caption: Option<&'a str>, pos: usize },
}

/// Turns lexemes into instructions for one document.
///
/// Keeps one title flag per open box, innermost last, so a `>` only ends
/// the title of the box it was written in.
#[derive(Debug, Default)]
pub struct Handler {
    titles: Vec<bool>,
}

impl Handler {
    pub fn new() -> Self {
        Self::default()
    }

    fn in_title(&self) -> bool {
        self.titles.last().copied().unwrap_or(false)
    }

    pub fn handle<'a>(&mut self, lexeme: &Lexeme<'a>) -> Instruction<'a> {
        let Lexeme { state, text, pos } = *lexeme;
        match state {
            LexState::Enter => {
                let attributes = text.get(OPEN_PREFIX..text.len() - 1).unwrap_or("");
                let style = parse_box_style(attributes);
                let titled = text.ends_with('|');
                self.titles.push(titled);
                if titled {
                    Instruction::TitleOpen { style, pos }
                } else {
                    Instruction::BoxOpen { style, pos }
                }
            }
            LexState::Matched => match self.titles.last_mut() {
                Some(title) if *title => {
                    *title = false;
                    Instruction::TitleClose { pos }
                }
                _ => Instruction::Data { text, pos },
            },
            LexState::Unmatched if self.in_title() => Instruction::Title { text, pos },
            LexState::Unmatched | LexState::Plain => Instruction::Cdata { text, pos },
            LexState::Exit => {
                self.titles.pop();
                let attributes = text.get(CLOSE_PREFIX..text.len() - 1).unwrap_or("").trim();
                let caption = attributes.strip_prefix('|').filter(|c| !c.is_empty());
                Instruction::BoxClose {
                    caption,
                    pos: pos + text.len(),
                }
            }
        }
    }
}

/// Runs a whole lexeme sequence through a fresh [`Handler`].
pub fn instructions<'a>(lexemes: &[Lexeme<'a>]) -> Vec<Instruction<'a>> {
    let mut handler = Handler::new();
    lexemes.iter().map(|l| handler.handle(l)).collect()
}
