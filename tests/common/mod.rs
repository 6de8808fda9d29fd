#![allow(dead_code)]

use std::sync::Once;

use tracing_subscriber::EnvFilter;
use webclient_sdk::dom::{Document, FromHost};
use webclient_sdk::host::memory::MemoryHost;
use webclient_sdk::{Config, Context, Host};

static TRACING: Once = Once::new();

/// Routes crate logs to the test output. `RUST_LOG` overrides the default level.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("webclient=debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// A fresh page, a context over it and its document.
pub fn page() -> (MemoryHost, Context, Document) {
    page_with(Config::default())
}

pub fn page_with(config: Config) -> (MemoryHost, Context, Document) {
    init_tracing();
    let host = MemoryHost::new();
    let ctx = Context::with_config(host.clone(), config);
    let document = Document::from_host(host.global().get("document")).expect("memory host has a document");
    (host, ctx, document)
}
