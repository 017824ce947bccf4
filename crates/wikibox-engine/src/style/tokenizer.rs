use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::colour::{BoxColours, MAX_COLOURS, resolve_colours};

/// Upper bound on the number of whitespace separated tokens. The last token
/// keeps any remaining text unsplit.
pub const MAX_TOKENS: usize = 9;

/// CSS length units accepted for widths and spacing.
const UNITS: &str = "%|px|em|ex|pt|cm|mm|pi|in";

fn width_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"^\d*\.?\d+({UNITS})$")).expect("Invalid width regex"))
}

fn colour_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})|rgb\(([0-9]{1,3}%?,){2}[0-9]{1,3}%?\))$")
            .expect("Invalid colour regex")
    })
}

fn id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#[A-Za-z0-9_-]+$").expect("Invalid id regex"))
}

fn spacing_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(
            r"^(margin|padding)(-(left|right|top|bottom))?:\d+({UNITS})$"
        ))
        .expect("Invalid spacing regex")
    })
}

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("Invalid whitespace regex"))
}

/// A single attribute token, classified by shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleToken<'a> {
    /// A length such as `50%` or `12.5em`.
    Width(&'a str),
    /// `#abc`, `#aabbcc` or `rgb(a,b,c)`.
    Colour(&'a str),
    /// `#name` that is not a 3 or 6 digit hex colour. Holds the name without `#`.
    Id(&'a str),
    /// `margin:1em`, `padding-left:4px`, ...
    Spacing(&'a str),
    /// A class name restricted to `[A-Za-z0-9_-]`.
    Class(&'a str),
    /// Anything else. Never rendered.
    Rejected(&'a str),
}

impl<'a> StyleToken<'a> {
    /// Classifies one token. Patterns are tried in a fixed order and the
    /// first match wins: width, colour, id, spacing, then class.
    pub fn classify(token: &'a str) -> Self {
        if width_regex().is_match(token) {
            return Self::Width(token);
        }
        if colour_regex().is_match(token) {
            return Self::Colour(token);
        }
        if id_regex().is_match(token) {
            return Self::Id(&token[1..]);
        }
        if spacing_regex().is_match(token) {
            return Self::Spacing(token);
        }
        if is_safe_name(token) {
            Self::Class(token)
        } else {
            Self::Rejected(token)
        }
    }
}

fn is_safe_name(token: &str) -> bool {
    !token.is_empty()
        && token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Parsed attributes of one opening box tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StyleDescriptor {
    /// Last width token seen.
    pub width: Option<String>,
    /// Margin and padding declarations in source order.
    pub spacing: Vec<String>,
    /// Raw colour tokens in source order, at most four.
    pub colour_tokens: Vec<String>,
    /// Last id seen, without the leading `#`.
    pub id: Option<String>,
    /// Space separated class names.
    pub classes: Option<String>,
    /// Role colours derived from `colour_tokens`.
    pub colours: Option<BoxColours>,
}

impl StyleDescriptor {
    /// True when no attribute was recognised.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Rebuilds a canonical attribute string that parses back to an
    /// equivalent descriptor.
    pub fn attribute_text(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        parts.extend(self.width.clone());
        parts.extend(self.colour_tokens.iter().cloned());
        parts.extend(self.id.as_ref().map(|id| format!("#{id}")));
        parts.extend(self.spacing.iter().cloned());
        parts.extend(self.classes.clone());
        parts.join(" ")
    }

    fn push_class(&mut self, class: &str) {
        match &mut self.classes {
            Some(classes) => {
                classes.push(' ');
                classes.push_str(class);
            }
            None => self.classes = Some(class.to_string()),
        }
    }
}

/// Parses the attribute text of an opening box tag.
///
/// Unsafe tokens are dropped silently. An empty input gives an empty
/// descriptor.
pub fn parse_box_style(text: &str) -> StyleDescriptor {
    let text = text.trim();
    let mut style = StyleDescriptor::default();
    if text.is_empty() {
        return style;
    }

    for token in whitespace_regex().splitn(text, MAX_TOKENS) {
        match StyleToken::classify(token) {
            StyleToken::Width(width) => style.width = Some(width.to_string()),
            StyleToken::Colour(colour) => {
                if style.colour_tokens.len() < MAX_COLOURS {
                    style.colour_tokens.push(colour.to_string());
                } else {
                    log::debug!("ignoring colour beyond the fourth: {colour}");
                }
            }
            StyleToken::Id(id) => style.id = Some(id.to_string()),
            StyleToken::Spacing(spacing) => style.spacing.push(spacing.to_string()),
            StyleToken::Class(class) => style.push_class(class),
            StyleToken::Rejected(token) => log::debug!("dropping unsafe box token: {token:?}"),
        }
    }

    style.colours = resolve_colours(&style.colour_tokens);
    style
}
