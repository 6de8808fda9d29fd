//! Window-level categories: navigation and page lifecycle.

use crate::dom::HostWrapper;

use super::{event_category, Event};

#[derive(Debug, Clone, PartialEq)]
pub struct HashChangeEvent {
    event: Event,
    pub old_url: String,
    pub new_url: String,
}

impl HashChangeEvent {
    fn decode(event: Event) -> Self {
        let old_url = event.prop("oldURL").as_string();
        let new_url = event.prop("newURL").as_string();
        Self { event, old_url, new_url }
    }

    /// Fragment of the new URL, without the `#`.
    pub fn new_fragment(&self) -> &str {
        fragment(&self.new_url)
    }

    pub fn old_fragment(&self) -> &str {
        fragment(&self.old_url)
    }
}

fn fragment(url: &str) -> &str {
    url.split_once('#').map_or("", |(_, fragment)| fragment)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageTransitionEvent {
    event: Event,
    /// The page is restored from (or stored into) the back-forward cache.
    pub persisted: bool,
}

impl PageTransitionEvent {
    fn decode(event: Event) -> Self {
        let persisted = event.prop("persisted").as_bool();
        Self { event, persisted }
    }
}

/// Decodes nothing: `returnValue` is read and written live.
#[derive(Debug, Clone, PartialEq)]
pub struct BeforeUnloadEvent {
    event: Event,
}

impl BeforeUnloadEvent {
    fn decode(event: Event) -> Self {
        Self { event }
    }

    pub fn return_value(&self) -> String {
        self.event.prop("returnValue").as_string()
    }

    /// A non-empty value asks the browser to confirm leaving the page.
    pub fn set_return_value(&self, value: &str) {
        self.event.set_prop("returnValue", value);
    }
}

event_category!(HashChangeEvent, "HashChangeEvent", &["oldURL", "newURL"]);
event_category!(PageTransitionEvent, "PageTransitionEvent", &["persisted"]);
event_category!(BeforeUnloadEvent, "BeforeUnloadEvent", &[]);
