use std::fmt;

use serde::Serialize;

/// Only the first four colour tokens carry a role; the rest are ignored.
pub const MAX_COLOURS: usize = 4;

/// One colour as three components, kept as text.
///
/// Hex colours are converted to decimal components. `rgb(...)` components are
/// taken verbatim (they may be percentages) and are not range checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triplet([String; 3]);

impl Triplet {
    /// Converts a colour token (`#abc`, `#aabbcc` or `rgb(a,b,c)`) to a triplet.
    ///
    /// Returns `None` for anything that is not one of those three shapes.
    pub fn from_token(token: &str) -> Option<Self> {
        if let Some(hex) = token.strip_prefix('#') {
            return Self::from_hex(hex);
        }
        let inner = token.strip_prefix("rgb(")?.strip_suffix(')')?;
        let mut parts = inner.split(',');
        let (r, g, b) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() {
            return None;
        }
        Some(Self([r.to_string(), g.to_string(), b.to_string()]))
    }

    fn from_hex(hex: &str) -> Option<Self> {
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let component = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v.to_string());
        match hex.len() {
            3 => {
                let mut out: [String; 3] = Default::default();
                for (slot, digit) in out.iter_mut().zip(hex.chars()) {
                    *slot = component(&format!("{digit}{digit}"))?;
                }
                Some(Self(out))
            }
            6 => Some(Self([
                component(&hex[0..2])?,
                component(&hex[2..4])?,
                component(&hex[4..6])?,
            ])),
            _ => None,
        }
    }
}

impl fmt::Display for Triplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = &self.0;
        write!(f, "rgb({r},{g},{b})")
    }
}

/// The four role colours of a box, each formatted as `rgb(r,g,b)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoxColours {
    pub content_background: String,
    pub title_background: String,
    pub outer_background: String,
    pub borders: String,
}

/// Derives the role colours from up to four colour tokens.
///
/// The first token is the content background. The title background, outer
/// background and border colour come from the second, third and fourth tokens;
/// each one that is missing falls back to the first token, never to a
/// neighbouring role.
///
/// Returns `None` when no usable colour token is given.
pub fn resolve_colours<S: AsRef<str>>(tokens: &[S]) -> Option<BoxColours> {
    let triplets: Vec<Triplet> = tokens
        .iter()
        .take(MAX_COLOURS)
        .filter_map(|t| Triplet::from_token(t.as_ref()))
        .collect();

    let primary = triplets.first()?;
    let role = |i: usize| triplets.get(i).unwrap_or(primary).to_string();

    Some(BoxColours {
        content_background: role(0),
        title_background: role(1),
        outer_background: role(2),
        borders: role(3),
    })
}
