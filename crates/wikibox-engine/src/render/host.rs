use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

/// Target passed to [`Host::start_section_edit`] for each box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionEditTarget {
    pub kind: &'static str,
    pub name: String,
}

impl SectionEditTarget {
    /// The target for a box opened at `pos`.
    pub fn for_box(pos: usize) -> Self {
        Self {
            kind: "section",
            name: format!("box-{pos}"),
        }
    }
}

/// Services the surrounding wiki renderer offers to box rendering.
///
/// Only anchor generation has to be provided. Escaping defaults to HTML
/// quoting and the section-edit hooks default to doing nothing.
pub trait Host {
    /// Escapes text for embedding in markup.
    fn escape(&self, text: &str) -> String {
        html_escape::encode_quoted_attribute(text).into_owned()
    }

    /// Turns heading text into an anchor id. With `unique`, ids already
    /// handed out in this document get a numeric suffix.
    fn header_to_link(&mut self, title: &str, unique: bool) -> String;

    /// Starts an editable section for the box at `pos`. The returned class
    /// name is added to the box's outer div.
    fn start_section_edit(&mut self, _pos: usize, _target: &SectionEditTarget) -> Option<String> {
        None
    }

    /// Ends the innermost editable section at `pos`.
    fn finish_section_edit(&mut self, _pos: usize) {}

    /// Marks the rendered page as not cacheable.
    fn no_cache(&mut self) {}
}

fn separator_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\p{L}\p{N}-]+").expect("Invalid separator regex"))
}

/// Derives a wiki section id from heading text.
///
/// Lower-cases, collapses every run of other characters to `_`, and strips
/// leading digits and punctuation. Falls back to `section`.
pub fn section_id(title: &str) -> String {
    let lowered = title.to_lowercase();
    let id = separator_regex().replace_all(&lowered, "_");
    let id = id
        .trim_start_matches(|c: char| c.is_ascii_digit() || matches!(c, '_' | '-' | '.'))
        .trim_end_matches('_');
    if id.is_empty() {
        "section".to_string()
    } else {
        id.to_string()
    }
}

/// A finished editable section, as recorded by [`XhtmlHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionEdit {
    /// Number used in the `sectionedit{id}` class.
    pub id: usize,
    pub start: usize,
    pub end: usize,
    pub name: String,
}

/// The XHTML host shipped with the engine.
#[derive(Debug)]
pub struct XhtmlHost {
    section_edit: bool,
    anchors: HashSet<String>,
    last_section: usize,
    open_sections: Vec<(usize, usize, String)>,
    sections: Vec<SectionEdit>,
    cacheable: bool,
}

impl Default for XhtmlHost {
    fn default() -> Self {
        Self::new()
    }
}

impl XhtmlHost {
    pub fn new() -> Self {
        Self {
            section_edit: false,
            anchors: HashSet::new(),
            last_section: 0,
            open_sections: Vec::new(),
            sections: Vec::new(),
            cacheable: true,
        }
    }

    /// Enables or disables section-edit markers.
    pub fn with_section_edit(mut self, enabled: bool) -> Self {
        self.section_edit = enabled;
        self
    }

    /// Sections closed so far, in closing order.
    pub fn sections(&self) -> &[SectionEdit] {
        &self.sections
    }

    pub fn is_cacheable(&self) -> bool {
        self.cacheable
    }
}

impl Host for XhtmlHost {
    fn header_to_link(&mut self, title: &str, unique: bool) -> String {
        let base = section_id(title);
        if !unique {
            return base;
        }
        let mut candidate = base.clone();
        let mut suffix = 0;
        while self.anchors.contains(&candidate) {
            suffix += 1;
            candidate = format!("{base}{suffix}");
        }
        self.anchors.insert(candidate.clone());
        candidate
    }

    fn start_section_edit(&mut self, pos: usize, target: &SectionEditTarget) -> Option<String> {
        if !self.section_edit {
            return None;
        }
        self.last_section += 1;
        self.open_sections
            .push((self.last_section, pos, target.name.clone()));
        Some(format!("sectionedit{}", self.last_section))
    }

    fn finish_section_edit(&mut self, pos: usize) {
        if let Some((id, start, name)) = self.open_sections.pop() {
            self.sections.push(SectionEdit {
                id,
                start,
                end: pos,
                name,
            });
        }
    }

    fn no_cache(&mut self) {
        self.cacheable = false;
    }
}
