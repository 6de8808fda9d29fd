//! Typed DOM bindings for WASM.
//!
//! - [`host`]: opaque host values and the two hosts they can live on
//! - [`dom`]: typed wrappers and their capability traits
//! - [`events`]: event categories and the event names bound to them
//! - [`bridge`]: local closures as host functions, with explicit lifetime
//! - [`dispatch`]: typed event listeners on top of the bridge
//! - [`views`]: detached, explicitly flushed token lists and attribute maps
//! - [`walker`]: filtered sibling snapshots

pub mod bridge;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod dom;
pub mod enums;
pub mod error;
pub mod events;
pub mod host;
pub mod views;
pub mod walker;

pub use bridge::{bridge_fn, bridge_listener, bridge_method, Callback, HostFunction, ListenerObject};
pub use config::Config;
pub use context::Context;
pub use dom::{FromHost, HostWrapper};
pub use error::{Error, Result};
pub use host::{Host, Kind, Value};
pub use views::{Attribute, AttributeMap, TokenList};
pub use walker::{walk, NodeFilter, Nodes};

/// Wrapper types and every capability trait, for glob import.
pub mod prelude {
    pub use crate::dom::{
        Document, DocumentOps, DocumentType, DocumentTypeOps, Element, ElementOps, EventTarget, EventTargetOps,
        FromHost, History, HistoryOps, HostWrapper, HtmlElement, HtmlElementOps, Location, LocationOps, Navigator,
        NavigatorOps, Node, NodeOps, Storage, StorageOps, Window, WindowOps,
    };
    pub use crate::events::{
        Event, EventCategory, EventOps, EventType, ModifierKeys, MouseEventOps, UiEventOps,
    };
    pub use crate::{Callback, Context};
}
