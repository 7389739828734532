use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Preferred output order for well-known attributes.
///
/// Attributes not listed here are emitted afterwards in alphabetical order.
const ATTRIBUTE_ORDER: &[&str] = &[
    "action",
    "method",
    "type",
    "id",
    "name",
    "value",
    "href",
    "src",
    "width",
    "height",
    "cols",
    "rows",
    "size",
    "maxlength",
    "rel",
    "media",
    "accept-charset",
    "accept",
    "tabindex",
    "accesskey",
    "alt",
    "title",
    "class",
    "style",
    "selected",
    "checked",
    "readonly",
    "disabled",
];

/// A set of HTML attributes for a single element.
///
/// Keys are unique; setting a key twice keeps the last value. Serializes to
/// and from a plain string-to-string map.
///
/// # Examples
///
/// ```
/// use acl_menu::{Attributes, AttributeSerializer, HtmlWriter};
///
/// let attrs = Attributes::new().id("main-nav").class("nav");
/// assert_eq!(HtmlWriter.serialize(&attrs), r#" id="main-nav" class="nav""#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, String>);

impl Attributes {
    /// Creates an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets the `id` attribute.
    pub fn id(self, value: impl Into<String>) -> Self {
        self.set("id", value)
    }

    /// Sets the `class` attribute.
    pub fn class(self, value: impl Into<String>) -> Self {
        self.set("class", value)
    }

    /// In-place variant of [`Attributes::set`].
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Appends `class` to the space-separated `class` attribute.
    pub fn push_class(&mut self, class: &str) {
        match self.0.get_mut("class") {
            Some(existing) if !existing.is_empty() => {
                existing.push(' ');
                existing.push_str(class);
            }
            _ => self.insert("class", class),
        }
    }

    /// Returns the value of `key`, if set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Removes `key`, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Returns `true` if no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the attributes in output order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        let rank = |key: &str| {
            ATTRIBUTE_ORDER
                .iter()
                .position(|k| *k == key)
                .unwrap_or(ATTRIBUTE_ORDER.len())
        };
        let mut pairs: Vec<(&str, &str)> = self
            .0
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        // Stable sort keeps the map's alphabetical order among equal ranks.
        pairs.sort_by_key(|(k, _)| rank(k));
        pairs.into_iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Renders an attribute set as it appears inside an opening tag.
pub trait AttributeSerializer {
    /// Returns ` key="value"` pairs (each with a leading space), values escaped.
    fn serialize(&self, attrs: &Attributes) -> String;
}

/// Renders an `<a>` element.
pub trait AnchorBuilder {
    /// Returns an anchor to `href` with `text` as its content.
    ///
    /// Implementations must escape `text` and all attribute values.
    fn build(&self, href: &str, text: &str, attrs: Option<&Attributes>) -> String;
}

/// The default markup writer: plain HTML with entity escaping.
///
/// # Examples
///
/// ```
/// use acl_menu::{AnchorBuilder, Attributes, HtmlWriter};
///
/// let link = HtmlWriter.build("blog/index", "News & Views", None);
/// assert_eq!(link, r#"<a href="blog/index">News &amp; Views</a>"#);
///
/// let titled = HtmlWriter.build("home/index", "Home", Some(&Attributes::new().set("title", "Start")));
/// assert_eq!(titled, r#"<a href="home/index" title="Start">Home</a>"#);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlWriter;

impl AttributeSerializer for HtmlWriter {
    fn serialize(&self, attrs: &Attributes) -> String {
        let mut out = String::new();
        for (key, value) in attrs.iter() {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            escape_into(&mut out, value);
            out.push('"');
        }
        out
    }
}

impl AnchorBuilder for HtmlWriter {
    fn build(&self, href: &str, text: &str, attrs: Option<&Attributes>) -> String {
        let mut all = attrs.cloned().unwrap_or_default();
        all.insert("href", href);

        let mut out = String::from("<a");
        out.push_str(&self.serialize(&all));
        out.push('>');
        escape_into(&mut out, text);
        out.push_str("</a>");
        out
    }
}

/// HTML-escape a string into the output buffer.
fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
}

/// HTML-escape a string for safe output.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    escape_into(&mut out, s);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_handles_all_special_chars() {
        assert_eq!(
            escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#039;&amp;&#039;&lt;/a&gt;"
        );
    }

    #[test]
    fn escape_passthrough_normal() {
        assert_eq!(escape("Hello 世界"), "Hello 世界");
    }

    #[test]
    fn serialize_empty_is_empty() {
        assert_eq!(HtmlWriter.serialize(&Attributes::new()), "");
    }

    #[test]
    fn serialize_orders_known_attributes_first() {
        let attrs = Attributes::new()
            .class("nav")
            .set("data-role", "menu")
            .id("main")
            .set("aria-label", "Main");

        assert_eq!(
            HtmlWriter.serialize(&attrs),
            r#" id="main" class="nav" aria-label="Main" data-role="menu""#
        );
    }

    #[test]
    fn serialize_escapes_values() {
        let attrs = Attributes::new().set("title", "\"quoted\" <b>");

        assert_eq!(
            HtmlWriter.serialize(&attrs),
            r#" title="&quot;quoted&quot; &lt;b&gt;""#
        );
    }

    #[test]
    fn push_class_appends_with_space() {
        let mut attrs = Attributes::new().class("nav");
        attrs.push_class("level-1");
        assert_eq!(attrs.get("class"), Some("nav level-1"));

        let mut bare = Attributes::new();
        bare.push_class("level-2");
        assert_eq!(bare.get("class"), Some("level-2"));
    }

    #[test]
    fn push_class_replaces_empty_class() {
        let mut attrs = Attributes::new().class("");
        attrs.push_class("level-1");

        assert_eq!(attrs.get("class"), Some("level-1"));
    }

    #[test]
    fn remove_drops_attribute_from_output() {
        let mut attrs = Attributes::new().id("nav").class("menu");

        assert_eq!(attrs.remove("id"), Some("nav".to_string()));
        assert_eq!(attrs.remove("id"), None);
        assert_eq!(HtmlWriter.serialize(&attrs), r#" class="menu""#);
    }

    #[test]
    fn set_overwrites() {
        let attrs = Attributes::new().id("a").id("b");

        assert_eq!(attrs.get("id"), Some("b"));
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn anchor_escapes_text_and_href() {
        let link = HtmlWriter.build("a\"b/c", "<script>", None);

        assert_eq!(link, r#"<a href="a&quot;b/c">&lt;script&gt;</a>"#);
    }

    #[test]
    fn anchor_href_comes_before_title() {
        let attrs = Attributes::new().set("title", "Tip");
        let link = HtmlWriter.build("x/y", "X", Some(&attrs));

        assert_eq!(link, r#"<a href="x/y" title="Tip">X</a>"#);
    }

    #[test]
    fn attributes_from_iterator() {
        let attrs: Attributes = [("id", "nav"), ("class", "menu")].into_iter().collect();

        assert_eq!(attrs.get("id"), Some("nav"));
        assert_eq!(attrs.get("class"), Some("menu"));
    }

    #[test]
    fn attributes_deserialize_from_map() {
        let attrs: Attributes = serde_json::from_str(r#"{"id":"nav","class":"menu"}"#).unwrap();

        assert_eq!(attrs, Attributes::new().id("nav").class("menu"));
    }
}
