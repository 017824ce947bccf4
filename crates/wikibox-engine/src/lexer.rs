//! # Lexer - Finding Box Tags in a Document
//!
//! Splits a wiki document into [`Lexeme`]s the way the host wiki lexer would
//! for the box syntax: entries, the `>` that ends a title, exits, and the text
//! in between.
//!
//! ```text
//! "a <box|T> b </box>" → [Plain("a "), Enter("<box|"), Unmatched("T"),
//!                         Matched(">"), Unmatched(" b "), Exit("</box>")]
//! ```
//!
//! An opening tag is only recognised when the rest of the document contains a
//! closing tag for it. Boxes nest, and opening tags that end up sharing a
//! closing tag with a nested box are demoted to text, so every `Enter` has a
//! matching `Exit`.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::cursor::Cursor;

fn entry_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^<box(?:>|\s[^\r\n|]*?>|\||\s[^\r\n|]*?\|)").expect("Invalid entry regex")
    })
}

fn closes_later_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)</box.*?>").expect("Invalid close lookahead regex"))
}

fn title_closes_later_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)^[^\r\n]*?>.*?</box.*?>").expect("Invalid title lookahead regex")
    })
}

fn exit_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^</box[^>]*>").expect("Invalid exit regex"))
}

/// Which lexer pattern produced a lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexState {
    /// Document text outside any box.
    Plain,
    /// An opening tag, `<box ...>` or `<box ...|`.
    Enter,
    /// A literal `>` inside a box.
    Matched,
    /// Text inside a box.
    Unmatched,
    /// A closing tag, `</box ...>`.
    Exit,
}

/// A slice of the document with the pattern that matched it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme<'a> {
    pub state: LexState,
    pub text: &'a str,
    /// Byte offset of `text` in the document.
    pub pos: usize,
}

/// Tokenizes a whole document.
///
/// Nested entries can share one closing tag, leaving an entry open at the end
/// of the document. Such an entry is rejected and the document is scanned
/// again with it treated as text, until every entry is closed.
pub fn lex(text: &str) -> Vec<Lexeme<'_>> {
    let mut rejected = HashSet::new();
    loop {
        let (lexemes, unclosed) = lex_once(text, &rejected);
        match unclosed {
            None => return lexemes,
            Some(pos) => {
                log::debug!("box opened at {pos} is never closed, treating it as text");
                rejected.insert(pos);
            }
        }
    }
}

/// One scan. Returns the lexemes and the position of the innermost entry
/// still open at the end, if any.
fn lex_once<'a>(text: &'a str, rejected: &HashSet<usize>) -> (Vec<Lexeme<'a>>, Option<usize>) {
    let mut cur = Cursor::new(text);
    let mut out = Vec::new();
    let mut open: Vec<usize> = Vec::new();
    let mut text_start = 0;

    fn flush<'a>(out: &mut Vec<Lexeme<'a>>, cur: &Cursor<'a>, start: usize, depth: usize) {
        if cur.i > start {
            let state = if depth == 0 {
                LexState::Plain
            } else {
                LexState::Unmatched
            };
            out.push(Lexeme {
                state,
                text: cur.slice(start, cur.i),
                pos: start,
            });
        }
    }

    while !cur.eof() {
        match cur.peek() {
            Some(b'<') => {
                let rest = cur.rest();
                if !rejected.contains(&cur.pos())
                    && let Some(len) = match_entry(rest)
                {
                    flush(&mut out, &cur, text_start, open.len());
                    out.push(Lexeme {
                        state: LexState::Enter,
                        text: &rest[..len],
                        pos: cur.pos(),
                    });
                    open.push(cur.pos());
                    cur.bump_n(len);
                    text_start = cur.i;
                    continue;
                }
                if !open.is_empty()
                    && let Some(m) = exit_regex().find(rest)
                {
                    flush(&mut out, &cur, text_start, open.len());
                    out.push(Lexeme {
                        state: LexState::Exit,
                        text: m.as_str(),
                        pos: cur.pos(),
                    });
                    open.pop();
                    cur.bump_n(m.end());
                    text_start = cur.i;
                    continue;
                }
            }
            Some(b'>') if !open.is_empty() => {
                flush(&mut out, &cur, text_start, open.len());
                out.push(Lexeme {
                    state: LexState::Matched,
                    text: cur.slice(cur.i, cur.i + 1),
                    pos: cur.pos(),
                });
                cur.bump_n(1);
                text_start = cur.i;
                continue;
            }
            _ => {}
        }
        cur.bump_char();
    }

    flush(&mut out, &cur, text_start, open.len());
    (out, open.last().copied())
}

/// Length of the opening tag at the start of `rest`, if it is one and the
/// document closes it later.
fn match_entry(rest: &str) -> Option<usize> {
    let tag = entry_regex().find(rest)?.as_str();
    let after = &rest[tag.len()..];
    let closes = if tag.ends_with('|') {
        title_closes_later_regex().is_match(after)
    } else {
        closes_later_regex().is_match(after)
    };
    closes.then_some(tag.len())
}
