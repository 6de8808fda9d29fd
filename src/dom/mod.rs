//! Typed wrappers over host DOM objects.
//!
//! A wrapper is a thin typed view over one [`Value`]; it owns no host
//! resources and never caches what it reads. The DOM interface hierarchy is
//! expressed as capability traits rather than nesting:
//! - [`HostWrapper`]: the handle and the guarded property protocol
//! - [`EventTargetOps`] ⊂ [`NodeOps`] ⊂ [`ElementOps`] ⊂ [`HtmlElementOps`]
//! - one `*Ops` trait per remaining interface (document, window, storage, ...)
//!
//! Every capability trait is also implemented for `Option<T>`, so accessor
//! chains such as `document.body().first_child().node_name()` never fault on
//! an absent link; the absent case is logged and yields the zero value.

use crate::host::Value;

mod document;
mod element;
mod node;
mod target;
mod window;

pub use document::{Document, DocumentOps, DocumentType, DocumentTypeOps};
pub use element::{Element, ElementOps, HtmlElement, HtmlElementOps};
pub use node::{Node, NodeOps};
pub use target::{EventTarget, EventTargetOps};
pub use window::{
    History, HistoryOps, Location, LocationOps, Navigator, NavigatorOps, Storage, StorageOps, Window,
    WindowOps,
};

/// Decoding of a host value into a typed local shape.
pub trait FromHost: Sized {
    /// `None` for null and undefined handles.
    fn from_host(value: Value) -> Option<Self>;
}

impl FromHost for Value {
    fn from_host(value: Value) -> Option<Self> {
        match value {
            Value::Null | Value::Undefined => None,
            Value::Boolean(_) | Value::Number(_) | Value::String(_) | Value::Object(_) | Value::Function(_) => {
                Some(value)
            }
        }
    }
}

/// Access to the host handle behind a wrapper.
///
/// All property traffic of the capability traits goes through [`prop`],
/// [`set_prop`] and [`call_method`], which is where absent wrappers are caught.
///
/// [`prop`]: HostWrapper::prop
/// [`set_prop`]: HostWrapper::set_prop
/// [`call_method`]: HostWrapper::call_method
pub trait HostWrapper {
    /// The wrapped handle; `None` for an absent wrapper.
    fn handle(&self) -> Option<&Value>;

    /// The handle as passed back to the host; null for an absent wrapper.
    fn to_host(&self) -> Value {
        self.handle().cloned().unwrap_or(Value::Null)
    }

    fn is_defined(&self) -> bool {
        self.handle().is_some()
    }

    fn prop(&self, name: &str) -> Value {
        match self.handle() {
            Some(handle) => handle.get(name),
            None => {
                absent_wrapper("get", name);
                Value::Undefined
            }
        }
    }

    fn set_prop(&self, name: &str, value: impl Into<Value>)
    where
        Self: Sized,
    {
        match self.handle() {
            Some(handle) => handle.set(name, value),
            None => absent_wrapper("set", name),
        }
    }

    fn call_method(&self, name: &str, args: &[Value]) -> Value {
        match self.handle() {
            Some(handle) => handle.call(name, args),
            None => {
                absent_wrapper("call", name);
                Value::Undefined
            }
        }
    }

    fn prop_as<T: FromHost>(&self, name: &str) -> Option<T>
    where
        Self: Sized,
    {
        T::from_host(self.prop(name))
    }

    /// Views the same handle as another wrapper type. No host-side check is made.
    fn cast<T: FromHost>(&self) -> Option<T>
    where
        Self: Sized,
    {
        self.handle().and_then(|handle| T::from_host(handle.clone()))
    }

    /// Host reference equality of the wrapped handles.
    fn same_handle(&self, other: &impl HostWrapper) -> bool
    where
        Self: Sized,
    {
        match (self.handle(), other.handle()) {
            (Some(a), Some(b)) => a.same_object(b),
            _ => false,
        }
    }
}

impl<T: HostWrapper> HostWrapper for Option<T> {
    fn handle(&self) -> Option<&Value> {
        self.as_ref().and_then(HostWrapper::handle)
    }
}

fn absent_wrapper(op: &str, name: &str) {
    tracing::warn!(target: "webclient::host", op, name, "accessor called on an absent wrapper");
}

/// Snapshot of an array-like host value as typed wrappers. Absent items are skipped.
pub(crate) fn collect<T: FromHost>(list: &Value) -> Vec<T> {
    (0..list.length()).filter_map(|i| T::from_host(list.index(i))).collect()
}

/// Declares a wrapper struct over one [`Value`] with its decoding and conversions.
macro_rules! host_wrapper {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        pub struct $name($crate::host::Value);

        impl $crate::dom::FromHost for $name {
            fn from_host(value: $crate::host::Value) -> Option<Self> {
                use $crate::host::Value;
                match value {
                    Value::Null | Value::Undefined => None,
                    Value::Boolean(_)
                    | Value::Number(_)
                    | Value::String(_)
                    | Value::Object(_)
                    | Value::Function(_) => Some(Self(value)),
                }
            }
        }

        impl $crate::dom::HostWrapper for $name {
            fn handle(&self) -> Option<&$crate::host::Value> {
                Some(&self.0)
            }
        }

        impl From<$name> for $crate::host::Value {
            fn from(wrapper: $name) -> Self {
                wrapper.0
            }
        }

        impl From<&$name> for $crate::host::Value {
            fn from(wrapper: &$name) -> Self {
                wrapper.0.clone()
            }
        }
    };
}

pub(crate) use host_wrapper;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryHost;

    #[test]
    fn absent_handles_decode_to_none() {
        assert!(Element::from_host(Value::Null).is_none());
        assert!(Node::from_host(Value::Undefined).is_none());
        assert!(Window::from_host(Value::Null).is_none());
    }

    #[test]
    fn present_handles_are_wrapped_without_copying() {
        let host = MemoryHost::new();
        let value = host.element("div");
        let element = Element::from_host(value.clone()).unwrap();
        assert_eq!(element.handle(), Some(&value));
        assert!(MemoryHost::reads(&value).is_empty());

        let primitive = Node::from_host(Value::from(3)).unwrap();
        assert_eq!(primitive.to_host(), Value::from(3));
    }

    #[test]
    fn accessor_chains_through_absent_links_yield_zero_values() {
        let host = MemoryHost::new();
        let node = Node::from_host(host.node(1, "P")).unwrap();
        let parent = node.parent_node();
        assert!(parent.is_none());
        assert_eq!(parent.node_name(), "");
        assert!(parent.first_child().next_sibling().is_none());
        assert!(!parent.has_child_nodes());
        assert_eq!(parent.child_nodes(), Vec::new());
        assert!(parent.to_host().is_nullish());
    }

    #[test]
    fn casts_share_the_handle() {
        let host = MemoryHost::new();
        let element = Element::from_host(host.element("button")).unwrap();
        let html: HtmlElement = element.cast().unwrap();
        assert!(html.same_handle(&element));
        assert_eq!(html.tag_name(), "BUTTON");
    }
}
