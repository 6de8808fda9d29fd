//! Node filter and snapshot walker.

use bitflags::bitflags;

use crate::bridge::{bridge_method, Callback};
use crate::context::Context;
use crate::dom::{FromHost, Node, NodeOps};
use crate::enums::NodeType;
use crate::host::Value;

bitflags! {
    /// `whatToShow` mask. Attribute, CDATA, entity, entity-reference and
    /// notation bits are deprecated and make [`walk`] return nothing.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NodeFilter: u32 {
        const SHOW_ELEMENT = 0x001;
        const SHOW_ATTRIBUTE = 0x002;
        const SHOW_TEXT = 0x004;
        const SHOW_CDATA_SECTION = 0x008;
        const SHOW_ENTITY_REFERENCE = 0x010;
        const SHOW_ENTITY = 0x020;
        const SHOW_PROCESSING_INSTRUCTION = 0x040;
        const SHOW_COMMENT = 0x080;
        const SHOW_DOCUMENT = 0x100;
        const SHOW_DOCUMENT_TYPE = 0x200;
        const SHOW_DOCUMENT_FRAGMENT = 0x400;
        const SHOW_NOTATION = 0x800;

        /// Every live node type.
        const SHOW_ALL = Self::SHOW_ELEMENT.bits()
            | Self::SHOW_TEXT.bits()
            | Self::SHOW_PROCESSING_INSTRUCTION.bits()
            | Self::SHOW_COMMENT.bits()
            | Self::SHOW_DOCUMENT.bits()
            | Self::SHOW_DOCUMENT_TYPE.bits()
            | Self::SHOW_DOCUMENT_FRAGMENT.bits();

        const DEPRECATED = Self::SHOW_ATTRIBUTE.bits()
            | Self::SHOW_CDATA_SECTION.bits()
            | Self::SHOW_ENTITY_REFERENCE.bits()
            | Self::SHOW_ENTITY.bits()
            | Self::SHOW_NOTATION.bits();
    }
}

impl NodeFilter {
    pub fn of(node_type: NodeType) -> Self {
        Self::from_bits_truncate(node_type.filter_bit())
    }

    fn shows(self, node_type: Option<NodeType>) -> bool {
        self.contains(Self::SHOW_ALL) || node_type.is_some_and(|t| self.intersects(Self::of(t)))
    }
}

/// Materialized result of a [`walk`].
pub type Nodes = Vec<Node>;

/// Collects `root` and its following siblings that match `mask`, or that
/// `predicate` accepts.
///
/// Children are not visited. A mask holding any deprecated bit yields an
/// empty result, whatever else it holds.
pub fn walk(root: Option<Node>, mask: NodeFilter, predicate: Option<&dyn Fn(&Node) -> bool>) -> Nodes {
    let mut nodes = Nodes::new();
    if mask.intersects(NodeFilter::DEPRECATED) {
        tracing::debug!(target: "webclient::view", mask = mask.bits(), "deprecated node filter, nothing collected");
        return nodes;
    }
    let mut scan = root;
    while let Some(node) = scan {
        let included = mask.shows(node.node_type()) || predicate.is_some_and(|accept| accept(&node));
        scan = node.next_sibling();
        if included {
            nodes.push(node);
        }
    }
    nodes
}

pub const FILTER_ACCEPT: u32 = 1;
pub const FILTER_REJECT: u32 = 2;
pub const FILTER_SKIP: u32 = 3;

/// Bridges `predicate` as a host `NodeFilter` object for tree walkers and
/// node iterators: accepted nodes answer `FILTER_ACCEPT`, others `FILTER_SKIP`.
pub fn bridge_node_filter(ctx: &Context, predicate: impl Fn(&Node) -> bool + 'static) -> Callback {
    bridge_method(ctx, "acceptNode", move |args| {
        let accepted = args
            .first()
            .cloned()
            .and_then(Node::from_host)
            .is_some_and(|node| predicate(&node));
        Value::from(if accepted { FILTER_ACCEPT } else { FILTER_SKIP })
    })
}
