use crate::enums::NodeType;

use super::{collect, host_wrapper, EventTargetOps, FromHost, HostWrapper};

host_wrapper!(Node);

pub trait NodeOps: EventTargetOps {
    /// `None` for an absent node or a code the host should never report.
    fn node_type(&self) -> Option<NodeType> {
        let code = self.prop("nodeType");
        if code.is_nullish() {
            return None;
        }
        NodeType::from_code(code.as_u32())
    }

    fn node_name(&self) -> String {
        self.prop("nodeName").as_string()
    }

    fn parent_node(&self) -> Option<Node>
    where
        Self: Sized,
    {
        self.prop_as("parentNode")
    }

    fn first_child(&self) -> Option<Node>
    where
        Self: Sized,
    {
        self.prop_as("firstChild")
    }

    fn last_child(&self) -> Option<Node>
    where
        Self: Sized,
    {
        self.prop_as("lastChild")
    }

    fn previous_sibling(&self) -> Option<Node>
    where
        Self: Sized,
    {
        self.prop_as("previousSibling")
    }

    fn next_sibling(&self) -> Option<Node>
    where
        Self: Sized,
    {
        self.prop_as("nextSibling")
    }

    /// Snapshot of the current children.
    fn child_nodes(&self) -> Vec<Node> {
        collect(&self.prop("childNodes"))
    }

    fn has_child_nodes(&self) -> bool {
        self.call_method("hasChildNodes", &[]).as_bool()
    }

    fn text_content(&self) -> Option<String> {
        self.prop("textContent").as_optional_string()
    }

    fn set_text_content(&self, text: &str)
    where
        Self: Sized,
    {
        self.set_prop("textContent", text);
    }

    fn is_same_node(&self, other: &impl HostWrapper) -> bool
    where
        Self: Sized,
    {
        self.same_handle(other)
    }

    fn append_child(&self, child: &impl HostWrapper) -> Option<Node>
    where
        Self: Sized,
    {
        Node::from_host(self.call_method("appendChild", &[child.to_host()]))
    }

    fn remove_child(&self, child: &impl HostWrapper) -> Option<Node>
    where
        Self: Sized,
    {
        Node::from_host(self.call_method("removeChild", &[child.to_host()]))
    }

    /// Inserts `child` before `reference`; an absent reference appends.
    fn insert_before(&self, child: &impl HostWrapper, reference: &impl HostWrapper) -> Option<Node>
    where
        Self: Sized,
    {
        Node::from_host(self.call_method("insertBefore", &[child.to_host(), reference.to_host()]))
    }
}

impl EventTargetOps for Node {
    type Source = Node;
}

impl NodeOps for Node {}

impl<T: NodeOps> NodeOps for Option<T> {}
