//! Minimal structured HTML builder.
//!
//! Group ids, artifact ids and versions are arbitrary text, so every dynamic
//! value goes through `html-escape`. Raw markup is only accepted as
//! `&'static str`, which keeps user data out of unescaped positions.

/// Separator between coordinate components in visible text.
pub const COMPONENT_SEPARATOR: &str = "&nbsp;:&nbsp;";

#[derive(Debug, Default)]
pub struct Markup {
    buf: String,
}

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append fixed markup.
    pub fn raw(&mut self, literal: &'static str) -> &mut Self {
        self.buf.push_str(literal);
        self
    }

    /// Append a fragment built by another `Markup`.
    pub fn append(&mut self, fragment: Markup) -> &mut Self {
        self.buf.push_str(&fragment.buf);
        self
    }

    /// Append escaped text content.
    pub fn text(&mut self, text: &str) -> &mut Self {
        html_escape::encode_text_to_string(text, &mut self.buf);
        self
    }

    /// Open a tag with escaped attribute values.
    pub fn open(&mut self, tag: &'static str, attrs: &[(&'static str, &str)]) -> &mut Self {
        self.buf.push('<');
        self.buf.push_str(tag);
        for (name, value) in attrs {
            self.buf.push(' ');
            self.buf.push_str(name);
            self.buf.push_str("=\"");
            html_escape::encode_double_quoted_attribute_to_string(value, &mut self.buf);
            self.buf.push('"');
        }
        self.buf.push('>');
        self
    }

    pub fn close(&mut self, tag: &'static str) -> &mut Self {
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push('>');
        self
    }

    /// `<tag attrs>text</tag>`.
    pub fn element(
        &mut self,
        tag: &'static str,
        attrs: &[(&'static str, &str)],
        text: &str,
    ) -> &mut Self {
        self.open(tag, attrs).text(text).close(tag)
    }

    pub fn link(&mut self, href: &str, title: Option<&str>, text: &str) -> &mut Self {
        match title {
            Some(title) => self.element("a", &[("href", href), ("title", title)], text),
            None => self.element("a", &[("href", href)], text),
        }
    }

    /// `group : artifact : version` with non-breaking spacing.
    pub fn coordinate(&mut self, parts: &[&str]) -> &mut Self {
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                self.raw(COMPONENT_SEPARATOR);
            }
            self.text(part);
        }
        self
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Shared page frame: head with stylesheet, optional back link, body wrapper.
pub fn page(
    title: &str,
    stylesheet: &str,
    back_link: Option<&str>,
    body: impl FnOnce(&mut Markup),
) -> String {
    let mut m = Markup::new();
    m.raw("<!DOCTYPE html><html><head><meta charset=\"utf-8\">")
        .element("title", &[], title)
        .open(
            "link",
            &[("rel", "stylesheet"), ("type", "text/css"), ("href", stylesheet)],
        )
        .raw("</head><body>");
    if let Some(href) = back_link {
        m.open("div", &[("class", "header")])
            .link(href, None, "Back to repository summary")
            .close("div");
    }
    m.open("div", &[("class", "artifact")]);
    body(&mut m);
    m.raw("</div></body></html>");
    m.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_and_attributes_are_escaped() {
        let mut m = Markup::new();
        m.link("a\"b.html", Some("<t>"), "x & <y>");
        assert_eq!(
            m.into_string(),
            "<a href=\"a&quot;b.html\" title=\"&lt;t&gt;\">x &amp; &lt;y&gt;</a>"
        );
    }

    #[test]
    fn coordinate_joins_with_spacing() {
        let mut m = Markup::new();
        m.coordinate(&["g", "a<b", "1"]);
        assert_eq!(m.into_string(), "g&nbsp;:&nbsp;a&lt;b&nbsp;:&nbsp;1");
    }

    #[test]
    fn page_frame() {
        let html = page("T & C", "style.css", Some("../index.html"), |m| {
            m.element("h1", &[], "heading");
        });
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>T &amp; C</title>"));
        assert!(html.contains("href=\"style.css\""));
        assert!(html.contains("<a href=\"../index.html\">Back to repository summary</a>"));
        assert!(html.ends_with("<h1>heading</h1></div></body></html>"));
    }
}
