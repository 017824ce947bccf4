// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_box_document(boxes: usize, depth: usize) -> String {
    let mut content = String::new();
    for n in 0..boxes {
        content.push_str(&format!("Paragraph {n} before the box.\n\n"));
        for level in 0..depth {
            content.push_str(&format!(
                "<box 80% #f0e0d0 #c0a080 margin:1em round level-{level}|Box {n} level {level}>\n"
            ));
            content.push_str("Some content with <angle> brackets & ampersands.\n");
        }
        for _ in 0..depth {
            content.push_str("</box|caption>\n");
        }
    }
    content
}
