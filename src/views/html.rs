//! Typed accessors for the HTML global attributes.
//!
//! They read and write the cached map like any other attribute, so nothing
//! reaches the element before [`flush`](AttributeMap::flush).

use std::str::FromStr;

use crate::enums::{Autocapitalize, ContentEditable};
use crate::error::Result;

use super::{normalize, AttributeMap};

impl AttributeMap {
    pub fn hidden(&self) -> bool {
        self.contains("hidden")
    }

    /// Present and bare when true, missing when false.
    pub fn set_hidden(&mut self, hidden: bool) {
        self.set_bool("hidden", hidden);
    }

    pub fn draggable(&self) -> bool {
        self.get_bool("draggable")
    }

    /// Written as `"true"` or `"false"`.
    pub fn set_draggable(&mut self, draggable: bool) {
        self.set("draggable", bool_value(draggable));
    }

    pub fn spellcheck(&self) -> bool {
        self.get_bool("spellcheck")
    }

    pub fn set_spellcheck(&mut self, spellcheck: bool) {
        self.set("spellcheck", bool_value(spellcheck));
    }

    /// `None` when missing or not an integer.
    pub fn tab_index(&self) -> Option<i32> {
        self.find("tabindex")?.value().trim().parse().ok()
    }

    pub fn set_tab_index(&mut self, index: i32) {
        self.set("tabindex", &index.to_string());
    }

    /// Empty when missing.
    pub fn title(&self) -> String {
        self.value_of("title")
    }

    pub fn set_title(&mut self, title: &str) {
        self.set("title", title);
    }

    pub fn lang(&self) -> String {
        self.value_of("lang")
    }

    pub fn set_lang(&mut self, lang: &str) {
        self.set("lang", lang);
    }

    /// `Ok(None)` when missing; an error for a value outside the table.
    pub fn autocapitalize(&self) -> Result<Option<Autocapitalize>> {
        self.parse_value("autocapitalize")
    }

    pub fn set_autocapitalize(&mut self, mode: Autocapitalize) {
        self.set("autocapitalize", mode.as_str());
    }

    pub fn content_editable(&self) -> Result<Option<ContentEditable>> {
        match self.find("contenteditable") {
            Some(attribute) if attribute.value().trim().is_empty() => Ok(Some(ContentEditable::True)),
            Some(_) => self.parse_value("contenteditable"),
            None => Ok(None),
        }
    }

    pub fn set_content_editable(&mut self, mode: ContentEditable) {
        self.set("contenteditable", mode.as_str());
    }

    fn value_of(&self, name: &str) -> String {
        self.find(name).map(|attribute| attribute.value()).unwrap_or_default()
    }

    fn parse_value<T>(&self, name: &str) -> Result<Option<T>>
    where
        T: FromStr<Err = crate::Error>,
    {
        self.find(name)
            .map(|attribute| normalize(&attribute.value()).parse())
            .transpose()
    }
}

fn bool_value(on: bool) -> &'static str {
    if on {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::host::memory::MemoryHost;
    use crate::host::Value;

    fn snapshot(host: &MemoryHost, attributes: &[(&str, &str)]) -> (Value, AttributeMap) {
        let element = host.element_with_attributes("div", attributes);
        let map = AttributeMap::from_host(&element.get("attributes"), &element);
        (element, map)
    }

    #[test]
    fn boolean_attributes_read_their_html_forms() {
        let host = MemoryHost::new();
        let (_element, mut map) = snapshot(&host, &[("hidden", ""), ("draggable", "true"), ("spellcheck", "false")]);
        assert!(map.hidden());
        assert!(map.draggable());
        assert!(!map.spellcheck());

        map.set_hidden(false);
        map.set_draggable(false);
        map.set_spellcheck(true);
        assert!(!map.contains("hidden"));
        assert_eq!(map.to_string(), r#"draggable="false" spellcheck="true""#);
    }

    #[test]
    fn text_and_number_attributes() {
        let host = MemoryHost::new();
        let (element, mut map) = snapshot(&host, &[("tabindex", " 3 "), ("lang", "en")]);
        assert_eq!(map.tab_index(), Some(3));
        assert_eq!(map.lang(), "en");
        assert_eq!(map.title(), "");

        map.set_tab_index(-1);
        map.set_title("Close");
        map.set("tabindex", "soon");
        assert_eq!(map.tab_index(), None);
        map.set_tab_index(0);

        map.flush();
        let attribute = |name: &str| element.call("getAttribute", &[Value::from(name)]).as_string();
        assert_eq!(attribute("tabindex"), "0");
        assert_eq!(attribute("title"), "Close");
    }

    #[test]
    fn enumerated_attributes_decode_through_their_tables() {
        let host = MemoryHost::new();
        let (_element, mut map) = snapshot(&host, &[("autocapitalize", "Words"), ("contenteditable", "")]);
        assert_eq!(map.autocapitalize().unwrap(), Some(Autocapitalize::Words));
        assert_eq!(map.content_editable().unwrap(), Some(ContentEditable::True));

        map.set_content_editable(ContentEditable::Inherit);
        assert_eq!(map.content_editable().unwrap(), Some(ContentEditable::Inherit));
        map.remove("autocapitalize");
        assert_eq!(map.autocapitalize().unwrap(), None);
        map.set_autocapitalize(Autocapitalize::Off);
        assert_eq!(map.find("autocapitalize").unwrap().value(), "off");

        map.set("contenteditable", "plaintext");
        let err = map.content_editable().unwrap_err();
        assert!(matches!(err, Error::UnknownEnumValue { kind: "ContentEditable", .. }));
    }
}
