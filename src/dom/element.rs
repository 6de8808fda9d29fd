use crate::bridge::Callback;
use crate::context::Context;
use crate::events::{InputEvent, InputEventType, KeyboardEvent, KeyboardEventType, MouseEvent, MouseEventType};
use crate::host::Value;
use crate::views::{AttributeMap, TokenList};

use super::{collect, host_wrapper, EventTargetOps, FromHost, HostWrapper, NodeOps};

host_wrapper!(Element);

host_wrapper!(
    /// An element of an HTML document.
    HtmlElement
);

pub trait ElementOps: NodeOps {
    fn tag_name(&self) -> String {
        self.prop("tagName").as_string()
    }

    fn id(&self) -> String {
        self.prop("id").as_string()
    }

    fn set_id(&self, id: &str)
    where
        Self: Sized,
    {
        self.set_prop("id", id);
    }

    fn class_name(&self) -> String {
        self.prop("className").as_string()
    }

    fn set_class_name(&self, class_name: &str)
    where
        Self: Sized,
    {
        self.set_prop("className", class_name);
    }

    /// Detached snapshot of `classList`; changes reach the element on [`TokenList::flush`].
    fn class_list(&self) -> TokenList {
        TokenList::from_host(self.prop("classList"))
    }

    /// Detached snapshot of `attributes`; changes reach the element on [`AttributeMap::flush`].
    fn attributes(&self) -> AttributeMap {
        AttributeMap::from_host(&self.prop("attributes"), &self.to_host())
    }

    fn get_attribute(&self, name: &str) -> Option<String> {
        self.call_method("getAttribute", &[Value::from(name)]).as_optional_string()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.call_method("setAttribute", &[Value::from(name), Value::from(value)]);
    }

    fn remove_attribute(&self, name: &str) {
        self.call_method("removeAttribute", &[Value::from(name)]);
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.call_method("hasAttribute", &[Value::from(name)]).as_bool()
    }

    fn inner_html(&self) -> String {
        self.prop("innerHTML").as_string()
    }

    fn set_inner_html(&self, html: &str)
    where
        Self: Sized,
    {
        self.set_prop("innerHTML", html);
    }

    fn query_selector(&self, selectors: &str) -> Option<Element> {
        Element::from_host(self.call_method("querySelector", &[Value::from(selectors)]))
    }

    fn query_selector_all(&self, selectors: &str) -> Vec<Element> {
        collect(&self.call_method("querySelectorAll", &[Value::from(selectors)]))
    }

    fn closest(&self, selectors: &str) -> Option<Element> {
        Element::from_host(self.call_method("closest", &[Value::from(selectors)]))
    }

    fn matches(&self, selectors: &str) -> bool {
        self.call_method("matches", &[Value::from(selectors)]).as_bool()
    }

    /// Snapshot of the element children.
    fn children(&self) -> Vec<Element> {
        collect(&self.prop("children"))
    }

    /// Detaches the element from its parent.
    fn remove(&self) {
        self.call_method("remove", &[]);
    }

    fn add_click(&self, ctx: &Context, listener: impl FnMut(MouseEvent, Option<Self::Source>) + 'static) -> Callback
    where
        Self: Sized,
    {
        self.add_event(ctx, MouseEventType::Click, listener)
    }

    fn on_click(&self, ctx: &Context, listener: impl FnMut(MouseEvent, Option<Self::Source>) + 'static) -> Callback
    where
        Self: Sized,
    {
        self.set_on(ctx, MouseEventType::Click, listener)
    }

    fn add_input(&self, ctx: &Context, listener: impl FnMut(InputEvent, Option<Self::Source>) + 'static) -> Callback
    where
        Self: Sized,
    {
        self.add_event(ctx, InputEventType::Input, listener)
    }

    fn add_keydown(
        &self,
        ctx: &Context,
        listener: impl FnMut(KeyboardEvent, Option<Self::Source>) + 'static,
    ) -> Callback
    where
        Self: Sized,
    {
        self.add_event(ctx, KeyboardEventType::KeyDown, listener)
    }
}

pub trait HtmlElementOps: ElementOps {
    fn title(&self) -> String {
        self.prop("title").as_string()
    }

    fn set_title(&self, title: &str)
    where
        Self: Sized,
    {
        self.set_prop("title", title);
    }

    fn hidden(&self) -> bool {
        self.prop("hidden").as_bool()
    }

    fn set_hidden(&self, hidden: bool)
    where
        Self: Sized,
    {
        self.set_prop("hidden", hidden);
    }

    fn tab_index(&self) -> i32 {
        self.prop("tabIndex").as_i32()
    }

    fn set_tab_index(&self, index: i32)
    where
        Self: Sized,
    {
        self.set_prop("tabIndex", index);
    }

    fn inner_text(&self) -> String {
        self.prop("innerText").as_string()
    }

    fn set_inner_text(&self, text: &str)
    where
        Self: Sized,
    {
        self.set_prop("innerText", text);
    }

    fn focus(&self) {
        self.call_method("focus", &[]);
    }

    fn blur(&self) {
        self.call_method("blur", &[]);
    }

    /// Fires a synthetic click on the element.
    fn click(&self) {
        self.call_method("click", &[]);
    }
}

impl EventTargetOps for Element {
    type Source = Element;
}

impl NodeOps for Element {}
impl ElementOps for Element {}

impl EventTargetOps for HtmlElement {
    type Source = HtmlElement;
}

impl NodeOps for HtmlElement {}
impl ElementOps for HtmlElement {}
impl HtmlElementOps for HtmlElement {}

impl<T: ElementOps> ElementOps for Option<T> {}
impl<T: HtmlElementOps> HtmlElementOps for Option<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryHost;

    #[test]
    fn attribute_accessors_are_pass_through() {
        let host = MemoryHost::new();
        let element = HtmlElement::from_host(host.element("input")).unwrap();
        element.set_attribute("Placeholder", "Name");
        assert_eq!(element.get_attribute("placeholder").as_deref(), Some("Name"));
        assert!(element.has_attribute("placeholder"));
        element.remove_attribute("placeholder");
        assert_eq!(element.get_attribute("placeholder"), None);

        element.set_id("field");
        assert_eq!(element.get_attribute("id").as_deref(), Some("field"));
        element.set_hidden(true);
        assert!(element.hidden());
        assert_eq!(element.tab_index(), -1);
    }

    #[test]
    fn absent_elements_answer_with_zero_values() {
        let missing: Option<HtmlElement> = None;
        assert_eq!(missing.tag_name(), "");
        assert_eq!(missing.get_attribute("role"), None);
        assert!(!missing.has_attribute("role"));
        assert!(missing.query_selector("p").is_none());
        assert!(missing.class_list().is_empty());
        assert!(missing.attributes().is_empty());
        missing.set_title("ignored");
        missing.click();
    }

    #[test]
    fn remove_detaches_from_the_parent() {
        let host = MemoryHost::new();
        let parent = Element::from_host(host.element("div")).unwrap();
        let child = Element::from_host(host.element("span")).unwrap();
        parent.append_child(&child);
        assert!(parent.has_child_nodes());
        child.remove();
        assert!(!parent.has_child_nodes());
    }
}
