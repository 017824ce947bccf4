use crate::style::{BoxColours, StyleDescriptor};

/// Closing markup shared by every box.
const OUTER_CLOSE: &str = "</div> <!-- Extras -->\n";

/// Style attribute for the decorative corner elements and the inner box.
fn corner_style(colours: &BoxColours) -> String {
    format!(
        " style=\"background-color: {}; border-color: {};\"",
        colours.outer_background, colours.borders
    )
}

/// Style attribute for the content wrapper, empty without colours.
pub fn content_style(colours: Option<&BoxColours>) -> String {
    colours.map_or_else(String::new, |c| {
        format!(
            " style=\"background-color: {}; border-color: {}\"",
            c.content_background, c.borders
        )
    })
}

/// Style attribute for the title heading and caption, empty without colours.
pub fn title_style(colours: Option<&BoxColours>) -> String {
    colours.map_or_else(String::new, |c| {
        format!(" style=\"background-color: {};\"", c.title_background)
    })
}

fn corners(class: &str, order: [u8; 4], style: &str) -> String {
    let mut html = format!("<b class=\"{class}\">");
    for n in order {
        html.push_str(&format!("<b class=\"xb{n}\"{style}>&nbsp;</b>"));
    }
    html.push_str("</b>\n");
    html
}

/// Outer div of a box, plus the top corners and inner box when it has colours.
pub fn box_open(style: &StyleDescriptor, section_class: Option<&str>) -> String {
    let mut class = String::from("box");
    for extra in [style.classes.as_deref(), section_class].into_iter().flatten() {
        class.push(' ');
        class.push_str(extra);
    }

    let mut declarations: Vec<String> = Vec::new();
    if let Some(width) = &style.width {
        declarations.push(format!("width: {width};"));
    }
    declarations.extend(style.spacing.iter().map(|s| format!("{s};")));
    if let Some(colours) = &style.colours {
        declarations.push(format!("background-color: {};", colours.outer_background));
        declarations.push(format!("border-color: {};", colours.borders));
    }

    let mut html = String::from("<div");
    if let Some(id) = &style.id {
        html.push_str(&format!(" id=\"{id}\""));
    }
    html.push_str(&format!(" class=\"{class}\""));
    if !declarations.is_empty() {
        html.push_str(&format!(" style=\"{}\"", declarations.join(" ")));
    }
    html.push_str(">\n");

    if let Some(colours) = &style.colours {
        let style = corner_style(colours);
        html.push_str(&corners("xtop", [1, 2, 3, 4], &style));
        html.push_str(&format!("<div class=\"xbox\"{style}>\n"));
    }
    html
}

/// Closes the inner box and bottom corners when there are colours, then the
/// outer div.
pub fn box_close(colours: Option<&BoxColours>) -> String {
    let mut html = String::new();
    if let Some(colours) = colours {
        html.push_str("</div>\n");
        html.push_str(&corners("xbottom", [4, 3, 2, 1], &corner_style(colours)));
    }
    html.push_str(OUTER_CLOSE);
    html
}

/// Opens the title heading.
pub fn title_open(colours: Option<&BoxColours>) -> String {
    format!("<h2 class=\"box_title\"{}>", title_style(colours))
}

/// Opens the content wrapper.
pub fn content_open(colours: Option<&BoxColours>) -> String {
    format!("<div class=\"box_content\"{}>", content_style(colours))
}

/// Ends a title heading that never reached its `>`.
pub fn title_end() -> &'static str {
    "</h2>\n"
}

/// Ends the title heading and opens the content wrapper.
pub fn title_close(colours: Option<&BoxColours>) -> String {
    format!("</h2>\n{}", content_open(colours))
}

/// Closes the content wrapper.
pub fn content_close() -> &'static str {
    "</div>\n"
}

/// Anchor-wrapped title text. `text` must already be escaped.
pub fn title_anchor(id: &str, text: &str) -> String {
    format!("<a id=\"{id}\" name=\"{id}\">{text}</a>")
}

/// Caption paragraph. `text` must already be escaped.
pub fn caption(text: &str, colours: Option<&BoxColours>) -> String {
    format!("<p class=\"box_caption\"{}>{text}</p>\n", title_style(colours))
}
