//! Minimal HTML builder. Tag and attribute names are `&'static str`; every
//! runtime string goes through `escape`, so user text cannot open a tag.

use std::borrow::Cow;

pub type Attrs<'a> = &'a [(&'static str, &'a str)];

#[derive(Debug, Default)]
pub struct Markup {
    buf: String,
}

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, tag: &'static str, attrs: Attrs<'_>) -> &mut Self {
        self.buf.push('<');
        self.buf.push_str(tag);
        for (name, value) in attrs {
            self.buf.push(' ');
            self.buf.push_str(name);
            self.buf.push_str("=\"");
            self.buf.push_str(&escape(value));
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

    pub fn text(&mut self, text: &str) -> &mut Self {
        self.buf.push_str(&escape(text));
        self
    }

    /// `<tag attrs>text</tag>`
    pub fn element(&mut self, tag: &'static str, attrs: Attrs<'_>, text: &str) -> &mut Self {
        self.open(tag, attrs).text(text).close(tag)
    }

    /// Element without a closing tag (`img`, `meta`).
    pub fn void(&mut self, tag: &'static str, attrs: Attrs<'_>) -> &mut Self {
        self.open(tag, attrs)
    }

    pub fn raw_doctype(&mut self) -> &mut Self {
        self.buf.push_str("<!DOCTYPE html>");
        self
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Escapes the five HTML-significant characters.
pub fn escape(input: &str) -> Cow<'_, str> {
    if !input.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len() + 8);
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_passthrough_borrows() {
        assert!(matches!(escape("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_element_escapes_text_and_attributes() {
        let mut m = Markup::new();
        m.element("a", &[("href", "x\" onclick=\"evil()")], "<script>");
        assert_eq!(
            m.into_string(),
            "<a href=\"x&quot; onclick=&quot;evil()&quot;\">&lt;script&gt;</a>"
        );
    }

    #[test]
    fn test_nested_elements() {
        let mut m = Markup::new();
        m.open("div", &[("class", "box")])
            .element("span", &[], "hi")
            .void("img", &[("src", "a.png")])
            .close("div");
        assert_eq!(
            m.into_string(),
            "<div class=\"box\"><span>hi</span><img src=\"a.png\"></div>"
        );
    }
}
