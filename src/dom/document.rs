use crate::enums::{DocumentReadyState, VisibilityState};
use crate::host::Value;

use super::{host_wrapper, Element, EventTargetOps, FromHost, HostWrapper, HtmlElement, Node, NodeOps};

host_wrapper!(Document);

host_wrapper!(
    /// The `<!DOCTYPE>` node of a document.
    DocumentType
);

pub trait DocumentOps: NodeOps {
    fn title(&self) -> String {
        self.prop("title").as_string()
    }

    fn set_title(&self, title: &str)
    where
        Self: Sized,
    {
        self.set_prop("title", title);
    }

    /// Panics if the host reports a state outside the known table.
    fn ready_state(&self) -> Option<DocumentReadyState> {
        let state = self.prop("readyState");
        (!state.is_nullish()).then(|| DocumentReadyState::from_host(&state))
    }

    /// Panics if the host reports a state outside the known table.
    fn visibility_state(&self) -> Option<VisibilityState> {
        let state = self.prop("visibilityState");
        (!state.is_nullish()).then(|| VisibilityState::from_host(&state))
    }

    fn body(&self) -> Option<HtmlElement>
    where
        Self: Sized,
    {
        self.prop_as("body")
    }

    fn head(&self) -> Option<HtmlElement>
    where
        Self: Sized,
    {
        self.prop_as("head")
    }

    fn document_element(&self) -> Option<Element>
    where
        Self: Sized,
    {
        self.prop_as("documentElement")
    }

    fn doctype(&self) -> Option<DocumentType>
    where
        Self: Sized,
    {
        self.prop_as("doctype")
    }

    fn get_element_by_id(&self, id: &str) -> Option<Element> {
        Element::from_host(self.call_method("getElementById", &[Value::from(id)]))
    }

    fn create_element(&self, tag: &str) -> Option<HtmlElement> {
        HtmlElement::from_host(self.call_method("createElement", &[Value::from(tag)]))
    }

    fn create_text_node(&self, data: &str) -> Option<Node> {
        Node::from_host(self.call_method("createTextNode", &[Value::from(data)]))
    }

    fn query_selector(&self, selectors: &str) -> Option<Element> {
        Element::from_host(self.call_method("querySelector", &[Value::from(selectors)]))
    }
}

pub trait DocumentTypeOps: NodeOps {
    fn name(&self) -> String {
        self.prop("name").as_string()
    }
}

impl EventTargetOps for Document {
    type Source = Document;
}

impl NodeOps for Document {}
impl DocumentOps for Document {}

impl EventTargetOps for DocumentType {
    type Source = DocumentType;
}

impl NodeOps for DocumentType {}
impl DocumentTypeOps for DocumentType {}

impl<T: DocumentOps> DocumentOps for Option<T> {}
impl<T: DocumentTypeOps> DocumentTypeOps for Option<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementOps;
    use crate::host::memory::MemoryHost;
    use crate::host::Host;

    fn document(host: &MemoryHost) -> Document {
        Document::from_host(host.global().get("document")).unwrap()
    }

    #[test]
    fn created_elements_can_be_found_once_attached() {
        let host = MemoryHost::new();
        let document = document(&host);
        let panel = document.create_element("section").unwrap();
        panel.set_id("panel");
        assert!(document.get_element_by_id("panel").is_none());

        document.body().append_child(&panel);
        let found = document.get_element_by_id("panel").unwrap();
        assert!(found.same_handle(&panel));
        assert_eq!(found.tag_name(), "SECTION");
    }

    #[test]
    fn document_state_decodes_through_the_enum_tables() {
        let host = MemoryHost::new();
        let document = document(&host);
        assert_eq!(document.ready_state(), Some(DocumentReadyState::Complete));
        assert_eq!(document.visibility_state(), Some(VisibilityState::Visible));
        assert_eq!(document.doctype().name(), "html");

        document.set_title("Inbox");
        assert_eq!(document.title(), "Inbox");
    }

    #[test]
    #[should_panic(expected = "unable to convert 'paused' into DocumentReadyState")]
    fn unknown_ready_state_aborts() {
        let host = MemoryHost::new();
        let document = document(&host);
        document.set_prop("readyState", "paused");
        document.ready_state();
    }

    #[test]
    fn absent_document_has_no_state() {
        let missing: Option<Document> = None;
        assert_eq!(missing.ready_state(), None);
        assert!(missing.body().is_none());
        assert_eq!(missing.title(), "");
    }
}
