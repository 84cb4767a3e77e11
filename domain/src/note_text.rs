//! Plain text extraction from rich-text editor HTML.

use scraper::{Html, Node};

/// Elements whose content starts on a new line.
const BLOCK_ELEMENTS: &[&str] = &[
    "p", "div", "li", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre", "tr", "td", "th",
];

/// Convert an HTML note body into plain text, one line per block element.
///
/// Inline markup is dropped, entities are decoded and blank lines are removed.
pub fn plain_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_block = None;

    for node in fragment.root_element().descendants() {
        match node.value() {
            Node::Element(element) if element.name() == "br" => {
                flush_line(&mut lines, &mut current);
            }
            Node::Text(text) => {
                let block = node
                    .ancestors()
                    .find(|ancestor| {
                        ancestor
                            .value()
                            .as_element()
                            .is_some_and(|element| BLOCK_ELEMENTS.contains(&element.name()))
                    })
                    .map(|ancestor| ancestor.id());
                if block != current_block {
                    flush_line(&mut lines, &mut current);
                    current_block = block;
                }
                current.push_str(text);
            }
            _ => {}
        }
    }
    flush_line(&mut lines, &mut current);

    lines.join("\n")
}

fn flush_line(lines: &mut Vec<String>, current: &mut String) {
    let line = current.split_whitespace().collect::<Vec<_>>().join(" ");
    if !line.is_empty() {
        lines.push(line);
    }
    current.clear();
}
