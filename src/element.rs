//! Minimal XML document builder.
//!
//! Component documents and the package manifest are small, fully generated
//! trees, so this models them as an element with an ordered attribute list
//! and children, serialized by hand with standard escaping. Attribute order
//! is insertion order; output is deterministic.

/// One XML element: tag, ordered attributes, children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn att(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_att(name, value);
        self
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_att(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(existing) = self.attrs.iter_mut().find(|(n, _)| *n == name) {
            existing.1 = value;
        } else {
            self.attrs.push((name, value));
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove_att(&mut self, name: &str) {
        self.attrs.retain(|(n, _)| n != name);
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Element] {
        &mut self.children
    }

    /// Serialize as a standalone document with XML declaration, 2-space
    /// indent, and self-closing empty elements.
    pub fn to_xml(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        write_element(&mut out, self, 0);
        out
    }
}

fn write_element(out: &mut String, el: &Element, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push('<');
    out.push_str(&el.tag);
    for (name, value) in &el.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_xml(value));
        out.push('"');
    }
    if el.children.is_empty() {
        out.push_str("/>\n");
        return;
    }
    out.push_str(">\n");
    for child in &el.children {
        write_element(out, child, depth + 1);
    }
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str("</");
    out.push_str(&el.tag);
    out.push_str(">\n");
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_replace_keeps_position() {
        let mut el = Element::new("a").att("x", "1").att("y", "2");
        el.set_att("x", "3");
        assert_eq!(el.attr("x"), Some("3"));
        let xml = el.to_xml();
        assert!(xml.contains(r#"<a x="3" y="2"/>"#), "{xml}");
    }

    #[test]
    fn test_remove_att() {
        let mut el = Element::new("loader").att("url", "ui://x").att("xy", "0,0");
        el.remove_att("url");
        assert_eq!(el.attr("url"), None);
        assert_eq!(el.attr("xy"), Some("0,0"));
    }

    #[test]
    fn test_escaping() {
        let el = Element::new("text").att("text", "a<b & \"c\"");
        assert!(
            el.to_xml()
                .contains(r#"text="a&lt;b &amp; &quot;c&quot;""#)
        );
    }

    #[test]
    fn test_nested_pretty_output() {
        let mut root = Element::new("component").att("size", "10,20");
        let mut dl = Element::new("displayList");
        dl.push(Element::new("image").att("id", "n1_abc"));
        root.push(dl);
        let xml = root.to_xml();
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
             <component size=\"10,20\">\n\
             \x20\x20<displayList>\n\
             \x20\x20\x20\x20<image id=\"n1_abc\"/>\n\
             \x20\x20</displayList>\n\
             </component>\n"
        );
    }
}
