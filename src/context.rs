//! Process-wide binding context.
//!
//! Carries the host and the configuration to every call that needs to reach
//! the page. Globals such as the window and the document are resolved from the
//! host on each call and never cached.

use std::rc::Rc;

use crate::config::Config;
use crate::dom::{Document, History, Location, Navigator, Storage, Window};
use crate::host::{Host, Value};
use crate::FromHost;

#[derive(Clone)]
pub struct Context {
    host: Rc<dyn Host>,
    config: Rc<Config>,
}

impl Context {
    pub fn new(host: impl Host + 'static) -> Self {
        Self::with_config(host, Config::default())
    }

    pub fn with_config(host: impl Host + 'static, config: Config) -> Self {
        Self {
            host: Rc::new(host),
            config: Rc::new(config),
        }
    }

    /// Context over the page this module was loaded into.
    #[cfg(target_arch = "wasm32")]
    pub fn browser() -> Self {
        Self::new(crate::host::js::JsHost)
    }

    pub fn host(&self) -> &dyn Host {
        self.host.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn global(&self) -> Value {
        self.host.global()
    }

    pub fn window(&self) -> Option<Window> {
        Window::from_host(self.global())
    }

    pub fn document(&self) -> Option<Document> {
        let document = Document::from_host(self.global().get("document"));
        if document.is_none() {
            tracing::warn!(target: "webclient::host", "global object has no document");
        }
        document
    }

    pub fn local_storage(&self) -> Option<Storage> {
        Storage::from_host(self.global().get("localStorage"))
    }

    pub fn session_storage(&self) -> Option<Storage> {
        Storage::from_host(self.global().get("sessionStorage"))
    }

    pub fn history(&self) -> Option<History> {
        History::from_host(self.global().get("history"))
    }

    pub fn location(&self) -> Option<Location> {
        Location::from_host(self.global().get("location"))
    }

    pub fn navigator(&self) -> Option<Navigator> {
        Navigator::from_host(self.global().get("navigator"))
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context").field("config", &self.config).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{DocumentOps, LocationOps, NodeOps, StorageOps};
    use crate::enums::DocumentReadyState;
    use crate::host::memory::MemoryHost;

    #[test]
    fn globals_resolve_through_the_host() {
        let ctx = Context::new(MemoryHost::new());
        let document = ctx.document().unwrap();
        assert_eq!(document.ready_state(), Some(DocumentReadyState::Complete));
        assert!(document.body().is_some());
        assert_eq!(ctx.local_storage().unwrap().len(), 0);
        assert_eq!(ctx.location().unwrap().href(), "http://localhost/");
        assert!(document.document_element().has_child_nodes());
    }

    #[test]
    fn a_bare_host_has_no_document() {
        let ctx = Context::new(MemoryHost::bare());
        assert!(ctx.document().is_none());
        assert!(ctx.history().is_none());
    }
}
