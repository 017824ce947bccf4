use pretty_assertions::assert_eq;
use rstest::rstest;

use wikibox_engine::{Host, SectionEdit, XhtmlHost, parse_box_style, render_document};

fn render(text: &str) -> String {
    let mut host = XhtmlHost::new();
    render_document(text, &mut host).unwrap()
}

#[test]
fn titled_box_end_to_end() {
    let html = render("<box 50% red|Warning>Be careful</box>");
    insta::assert_snapshot!(html.trim_end(), @r#"
    <div class="box red" style="width: 50%;">
    <h2 class="box_title"><a id="warning" name="warning">Warning</a></h2>
    <div class="box_content">Be careful</div>

    </div> <!-- Extras -->
    "#);
    assert!(!html.contains("box_caption"));
}

#[test]
fn title_flow_leaves_no_open_heading() {
    let html = render("<box|My Title>\nBody text\n</box>");
    assert_eq!(
        html,
        "<div class=\"box\">\n\
         <h2 class=\"box_title\"><a id=\"my_title\" name=\"my_title\">My Title</a></h2>\n\
         <div class=\"box_content\">\nBody text\n</div>\n\
         \n</div> <!-- Extras -->\n"
    );
    assert_eq!(html.matches("<h2").count(), html.matches("</h2>").count());
}

#[test]
fn coloured_titled_box_with_caption() {
    let html = render("<box #000 #fff|T>x</box |cap>");
    let s = " style=\"background-color: rgb(0,0,0); border-color: rgb(0,0,0);\"";
    let expected = format!(
        "<div class=\"box\" style=\"background-color: rgb(0,0,0); border-color: rgb(0,0,0);\">\n\
         <b class=\"xtop\"><b class=\"xb1\"{s}>&nbsp;</b><b class=\"xb2\"{s}>&nbsp;</b><b class=\"xb3\"{s}>&nbsp;</b><b class=\"xb4\"{s}>&nbsp;</b></b>\n\
         <div class=\"xbox\"{s}>\n\
         <h2 class=\"box_title\" style=\"background-color: rgb(255,255,255);\"><a id=\"t\" name=\"t\">T</a></h2>\n\
         <div class=\"box_content\" style=\"background-color: rgb(0,0,0); border-color: rgb(0,0,0)\">x</div>\n\
         <p class=\"box_caption\" style=\"background-color: rgb(255,255,255);\">cap</p>\n\
         \n</div>\n\
         <b class=\"xbottom\"><b class=\"xb4\"{s}>&nbsp;</b><b class=\"xb3\"{s}>&nbsp;</b><b class=\"xb2\"{s}>&nbsp;</b><b class=\"xb1\"{s}>&nbsp;</b></b>\n\
         </div> <!-- Extras -->\n"
    );
    assert_eq!(html, expected);
}

#[test]
fn nested_boxes_close_in_reverse_order() {
    let text = "<box a>1<box b>2<box c>3</box>4</box>5</box>";
    let mut host = XhtmlHost::new().with_section_edit(true);
    let html = render_document(text, &mut host).unwrap();

    assert_eq!(
        html,
        "<div class=\"box a sectionedit1\">\n1\
         <div class=\"box b sectionedit2\">\n2\
         <div class=\"box c sectionedit3\">\n3\
         \n</div> <!-- Extras -->\n4\
         \n</div> <!-- Extras -->\n5\
         \n</div> <!-- Extras -->\n"
    );
    assert_eq!(html.matches("<div ").count(), 3);
    assert_eq!(html.matches("</div>").count(), 3);

    let section = |id, start, end, name: &str| SectionEdit {
        id,
        start,
        end,
        name: name.to_string(),
    };
    assert_eq!(
        host.sections(),
        &[
            section(3, 16, 30, "box-16"),
            section(2, 8, 37, "box-8"),
            section(1, 0, 44, "box-0"),
        ]
    );
    assert!(!host.is_cacheable());
}

#[test]
fn nested_colours_do_not_leak_into_parent() {
    let html = render("<box #f00>outer<box round>inner</box>tail</box>");
    // Only the outer box carries corners and a content wrapper.
    assert_eq!(html.matches("class=\"xtop\"").count(), 1);
    assert_eq!(html.matches("class=\"xbottom\"").count(), 1);
    assert_eq!(html.matches("class=\"box_content\"").count(), 1);
    let inner_close = html.find("inner").unwrap();
    let tail = html.find("tail").unwrap();
    assert_eq!(&html[inner_close + 5..tail], "\n</div> <!-- Extras -->\n");
    assert!(html.ends_with("tail</div>\n\n</div>\n<b class=\"xbottom\"><b class=\"xb4\" style=\"background-color: rgb(255,0,0); border-color: rgb(255,0,0);\">&nbsp;</b><b class=\"xb3\" style=\"background-color: rgb(255,0,0); border-color: rgb(255,0,0);\">&nbsp;</b><b class=\"xb2\" style=\"background-color: rgb(255,0,0); border-color: rgb(255,0,0);\">&nbsp;</b><b class=\"xb1\" style=\"background-color: rgb(255,0,0); border-color: rgb(255,0,0);\">&nbsp;</b></b>\n</div> <!-- Extras -->\n"));
}

#[rstest]
#[case("<box #abc>x</box>", true)]
#[case("<box rgb(1,2,3)|T>x</box>", true)]
#[case("<box #112233 #445566>x</box>", true)]
#[case("<box round>x</box>", false)]
#[case("<box #fff1>x</box>", false)]
#[case("<box>x</box>", false)]
#[case("<box|T>x</box>", false)]
fn corners_only_with_colours(#[case] text: &str, #[case] has_corners: bool) {
    let html = render(text);
    assert_eq!(html.contains("class=\"xtop\""), has_corners);
    assert_eq!(html.contains("class=\"xbottom\""), has_corners);
    assert_eq!(html.contains("class=\"xbox\""), has_corners);
}

#[test]
fn hex_shaped_hash_is_colour_other_hash_is_id() {
    let html = render("<box #fff1>x</box>");
    assert!(html.starts_with("<div id=\"fff1\" class=\"box\">"));
    let html = render("<box #fff>x</box>");
    assert!(html.starts_with("<div class=\"box\" style=\"background-color: rgb(255,255,255);"));
}

#[test]
fn unsafe_class_tokens_never_reach_output() {
    let html = render("<box ok \"onmouseover=alert(1) x<y also-ok>x</box>");
    assert!(html.starts_with("<div class=\"box ok also-ok\">"));
    assert!(!html.contains("onmouseover"));
}

#[test]
fn text_is_escaped_inside_and_outside_boxes() {
    let html = render("x < y <box>a & b > c</box>");
    assert_eq!(
        html,
        "x &lt; y <div class=\"box\">\na &amp; b &gt; c\n</div> <!-- Extras -->\n"
    );
}

#[test]
fn repeated_titles_get_unique_anchors() {
    let html = render("<box|Notes>a</box><box|Notes>b</box>");
    assert!(html.contains("<a id=\"notes\" name=\"notes\">Notes</a>"));
    assert!(html.contains("<a id=\"notes1\" name=\"notes1\">Notes</a>"));
}

#[test]
fn document_without_boxes_is_escaped_text() {
    assert_eq!(render("plain \"text\""), "plain &quot;text&quot;");
}

#[test]
fn each_render_starts_with_an_empty_stack() {
    let mut host = XhtmlHost::new();
    let first = render_document("<box|A>x</box>", &mut host).unwrap();
    let second = render_document("<box round>y</box>", &mut host).unwrap();
    assert!(first.contains("box_title"));
    assert_eq!(second, "<div class=\"box round\">\ny\n</div> <!-- Extras -->\n");
}

fn assert_balanced(html: &str) {
    for (open, close) in [("<div", "</div>"), ("<h2", "</h2>"), ("<p ", "</p>")] {
        assert_eq!(
            html.matches(open).count(),
            html.matches(close).count(),
            "unbalanced {open} in {html}"
        );
    }
}

#[test]
fn unclosed_outer_box_renders_as_text() {
    let html = render("<box a>outer <box b>inner</box> tail");
    assert_eq!(
        html,
        "&lt;box a&gt;outer <div class=\"box b\">\ninner\n</div> <!-- Extras -->\n tail"
    );
}

#[test]
fn nested_box_inside_title_keeps_tags_nested() {
    let html = render("<box|T <box>a > b</box> end>body</box>");
    assert_eq!(
        html,
        "<div class=\"box\">\n\
         <h2 class=\"box_title\"><a id=\"t\" name=\"t\">T </a>\
         <div class=\"box\">\na &gt; b\n</div> <!-- Extras -->\n\
         <a id=\"end\" name=\"end\"> end</a></h2>\n\
         <div class=\"box_content\">body</div>\n\
         \n</div> <!-- Extras -->\n"
    );
}

#[test]
fn title_without_terminator_is_closed_with_the_box() {
    let html = render("<box|T <box>x</box> y</box>");
    assert_eq!(
        html,
        "<div class=\"box\">\n\
         <h2 class=\"box_title\"><a id=\"t\" name=\"t\">T </a>\
         <div class=\"box\">\nx\n</div> <!-- Extras -->\n\
         <a id=\"y\" name=\"y\"> y</a></h2>\n\
         \n</div> <!-- Extras -->\n"
    );
}

#[rstest]
#[case("<box a>outer <box b>inner</box> tail")]
#[case("<box>a<box>b<box>c</box>")]
#[case("<box|T <box>a > b</box> end>body</box>")]
#[case("<box|T <box>x</box> y</box>")]
#[case("</box> stray <box>x</box></box>")]
#[case("<box|Title\n>x</box>")]
#[case("<box #abc|A <box #def|B>inner</box> rest>body</box |cap>")]
#[case("<box|A>x</box|one> <box #123>y > z</box |two>")]
fn malformed_and_nested_input_renders_balanced(#[case] text: &str) {
    let mut host = XhtmlHost::new().with_section_edit(true);
    let html = render_document(text, &mut host).unwrap();
    assert_balanced(&html);
}

/// Host that only provides anchors; every optional capability is skipped.
struct AnchorsOnly;

impl Host for AnchorsOnly {
    fn header_to_link(&mut self, title: &str, _unique: bool) -> String {
        format!("h-{}", title.len())
    }
}

#[test]
fn optional_host_capabilities_default_to_nothing() {
    let html = render_document("<box|Hi>x</box>", &mut AnchorsOnly).unwrap();
    assert!(html.starts_with("<div class=\"box\">\n"));
    assert!(html.contains("<a id=\"h-2\" name=\"h-2\">Hi</a>"));
}

#[test]
fn descriptor_snapshot() {
    let style = parse_box_style("40% round big");
    insta::assert_yaml_snapshot!(style, @r"
    width: 40%
    spacing: []
    colour_tokens: []
    id: ~
    classes: round big
    colours: ~
    ");
}
