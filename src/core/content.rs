//! Location content markup.
//!
//! Content is shown to participants as trusted markup, so it is cleaned when it
//! is authored. Only the formatting the content editor can produce survives,
//! colour styles included. Anything else is unwrapped to its text or dropped
//! with its children.

use scraper::{ElementRef, Html, Node};

const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "h1", "h2", "h3", "ol", "ul", "li", "strong", "b", "em", "i", "u", "s", "a",
    "span", "blockquote", "pre", "code",
];

/// Removed together with everything inside them.
const DROPPED_TAGS: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "noscript", "template", "head", "title",
];

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "h1", "h2", "h3", "h4", "h5", "h6", "ol", "ul", "blockquote", "pre",
];

const SAFE_URL_SCHEMES: &[&str] = &["http:", "https:", "mailto:"];

/// Inline style properties the editor's colour pickers write.
const ALLOWED_STYLE_PROPERTIES: &[&str] = &["color", "background-color"];

/// Clean authored markup down to the allowed tags and attributes.
pub fn sanitize(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut out = String::with_capacity(html.len());
    sanitize_children(fragment.root_element(), &mut out);
    out
}

fn sanitize_children(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => escape_into(text, out),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    sanitize_element(child, out);
                }
            }
            _ => {}
        }
    }
}

fn sanitize_element(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    if DROPPED_TAGS.contains(&name) {
        return;
    }
    if !ALLOWED_TAGS.contains(&name) {
        sanitize_children(element, out);
        return;
    }

    out.push('<');
    out.push_str(name);
    if name == "a" {
        if let Some(href) = element.value().attr("href").filter(|href| is_safe_url(href)) {
            out.push_str(" href=\"");
            escape_into(href, out);
            out.push('"');
        }
    }
    if let Some(class) = element.value().attr("class") {
        let classes: Vec<&str> = class
            .split_whitespace()
            .filter(|class| class.starts_with("ql-"))
            .collect();
        if !classes.is_empty() {
            out.push_str(" class=\"");
            escape_into(&classes.join(" "), out);
            out.push('"');
        }
    }
    if let Some(style) = element.value().attr("style").and_then(safe_style) {
        out.push_str(" style=\"");
        escape_into(&style, out);
        out.push('"');
    }
    out.push('>');

    if name == "br" {
        return;
    }
    sanitize_children(element, out);
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn is_safe_url(url: &str) -> bool {
    let url = url.trim().to_ascii_lowercase();
    match url.find(':') {
        Some(colon) if !url[..colon].contains('/') => {
            SAFE_URL_SCHEMES.iter().any(|scheme| url.starts_with(scheme))
        }
        // relative link
        _ => true,
    }
}

/// Keep colour declarations with plain values such as `#ff0` or
/// `rgb(230, 0, 0)`. Returns `None` when nothing survives.
fn safe_style(style: &str) -> Option<String> {
    let declarations: Vec<String> = style
        .split(';')
        .filter_map(|declaration| {
            let (property, value) = declaration.split_once(':')?;
            let property = property.trim().to_ascii_lowercase();
            let value = value.trim();
            let plain = !value.is_empty()
                && value.chars().all(|c| {
                    c.is_ascii_alphanumeric() || matches!(c, '#' | '(' | ')' | ',' | '.' | '%' | ' ')
                });
            let lower = value.to_ascii_lowercase();
            (ALLOWED_STYLE_PROPERTIES.contains(&property.as_str())
                && plain
                && !lower.contains("url")
                && !lower.contains("expression"))
            .then(|| format!("{property}: {value}"))
        })
        .collect();
    (!declarations.is_empty()).then(|| declarations.join("; "))
}

fn escape_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}

/// Render markup as readable text for surfaces that cannot display HTML.
pub fn to_plain_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut out = String::new();
    plain_children(fragment.root_element(), &mut out);

    let mut result = String::with_capacity(out.len());
    let mut blank_run = 0;
    for line in out.lines().map(str::trim_end) {
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 || result.is_empty() {
                continue;
            }
        } else {
            blank_run = 0;
        }
        result.push_str(line);
        result.push('\n');
    }
    result.trim_end().to_string()
}

fn plain_children(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    plain_element(child, out);
                }
            }
            _ => {}
        }
    }
}

fn plain_element(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    if DROPPED_TAGS.contains(&name) {
        return;
    }
    match name {
        "br" => out.push('\n'),
        "li" => {
            ensure_line_start(out);
            out.push_str("• ");
            plain_children(element, out);
            out.push('\n');
        }
        _ if BLOCK_TAGS.contains(&name) => {
            ensure_line_start(out);
            plain_children(element, out);
            out.push_str("\n\n");
        }
        _ => plain_children(element, out),
    }
}

fn ensure_line_start(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_editor_formatting() {
        let html = r#"<h1>Welcome</h1><p>Find the <strong>red</strong> door.</p><ol><li>One</li></ol>"#;
        assert_eq!(sanitize(html), html);
    }

    #[test]
    fn drops_scripts_and_handlers() {
        let html = r#"<p onclick="steal()">Hi<script>alert(1)</script></p><img src=x onerror="x()">"#;
        assert_eq!(sanitize(html), "<p>Hi</p>");
    }

    #[test]
    fn strips_unsafe_links() {
        let html = r#"<a href="javascript:alert(1)">bad</a><a href="https://uq.edu.au">good</a>"#;
        assert_eq!(
            sanitize(html),
            r#"<a>bad</a><a href="https://uq.edu.au">good</a>"#
        );
    }

    #[test]
    fn unwraps_unknown_tags_and_escapes_text() {
        assert_eq!(sanitize("<div>1 &lt; 2 &amp; <em>3</em></div>"), "1 &lt; 2 &amp; <em>3</em>");
    }

    #[test]
    fn keeps_only_editor_classes() {
        assert_eq!(
            sanitize(r#"<p class="ql-align-center evil">x</p>"#),
            r#"<p class="ql-align-center">x</p>"#
        );
    }

    #[test]
    fn keeps_only_colour_styles() {
        let html = r#"<span style="color: rgb(230, 0, 0); background-color:#ff0; position: fixed">x</span>"#;
        assert_eq!(
            sanitize(html),
            r#"<span style="color: rgb(230, 0, 0); background-color: #ff0">x</span>"#
        );
    }

    #[test]
    fn drops_styles_with_unsafe_values() {
        let html = r#"<p style="background-color: url(https://t.example/p.png); color: expression(alert(1))">x</p><p style="COLOR: Red;">y</p>"#;
        assert_eq!(sanitize(html), r#"<p>x</p><p style="color: Red">y</p>"#);
    }

    #[test]
    fn plain_text_breaks_blocks_and_lists() {
        let html = "<h2>Stop 3</h2><p>Look up.</p><ul><li>Tree</li><li>Bench</li></ul>";
        assert_eq!(to_plain_text(html), "Stop 3\n\nLook up.\n\n• Tree\n• Bench");
    }
}
