use crate::bridge::Callback;
use crate::context::Context;
use crate::enums::ScrollRestoration;
use crate::events::{
    BeforeUnloadEvent, BeforeUnloadEventType, HashChangeEvent, HashChangeEventType, PageTransitionEvent,
    PageTransitionEventType,
};
use crate::host::Value;

use super::{host_wrapper, Document, EventTargetOps, HostWrapper};

host_wrapper!(Window);
host_wrapper!(
    /// `localStorage` or `sessionStorage`.
    Storage
);
host_wrapper!(History);
host_wrapper!(Location);
host_wrapper!(Navigator);

pub trait WindowOps: EventTargetOps {
    fn document(&self) -> Option<Document>
    where
        Self: Sized,
    {
        self.prop_as("document")
    }

    fn location(&self) -> Option<Location>
    where
        Self: Sized,
    {
        self.prop_as("location")
    }

    fn history(&self) -> Option<History>
    where
        Self: Sized,
    {
        self.prop_as("history")
    }

    fn navigator(&self) -> Option<Navigator>
    where
        Self: Sized,
    {
        self.prop_as("navigator")
    }

    fn local_storage(&self) -> Option<Storage>
    where
        Self: Sized,
    {
        self.prop_as("localStorage")
    }

    fn session_storage(&self) -> Option<Storage>
    where
        Self: Sized,
    {
        self.prop_as("sessionStorage")
    }

    fn inner_width(&self) -> i32 {
        self.prop("innerWidth").as_i32()
    }

    fn inner_height(&self) -> i32 {
        self.prop("innerHeight").as_i32()
    }

    fn scroll_x(&self) -> f64 {
        self.prop("scrollX").as_f64()
    }

    fn scroll_y(&self) -> f64 {
        self.prop("scrollY").as_f64()
    }

    fn add_hash_change(
        &self,
        ctx: &Context,
        listener: impl FnMut(HashChangeEvent, Option<Self::Source>) + 'static,
    ) -> Callback
    where
        Self: Sized,
    {
        self.add_event(ctx, HashChangeEventType::HashChange, listener)
    }

    fn add_before_unload(
        &self,
        ctx: &Context,
        listener: impl FnMut(BeforeUnloadEvent, Option<Self::Source>) + 'static,
    ) -> Callback
    where
        Self: Sized,
    {
        self.add_event(ctx, BeforeUnloadEventType::BeforeUnload, listener)
    }

    fn add_page_show(
        &self,
        ctx: &Context,
        listener: impl FnMut(PageTransitionEvent, Option<Self::Source>) + 'static,
    ) -> Callback
    where
        Self: Sized,
    {
        self.add_event(ctx, PageTransitionEventType::PageShow, listener)
    }
}

pub trait StorageOps: HostWrapper {
    fn len(&self) -> usize {
        self.prop("length").as_u32() as usize
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn key(&self, index: usize) -> Option<String> {
        self.call_method("key", &[Value::from(index as u32)]).as_optional_string()
    }

    fn get_item(&self, key: &str) -> Option<String> {
        self.call_method("getItem", &[Value::from(key)]).as_optional_string()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.call_method("setItem", &[Value::from(key), Value::from(value)]);
    }

    fn remove_item(&self, key: &str) {
        self.call_method("removeItem", &[Value::from(key)]);
    }

    fn clear(&self) {
        self.call_method("clear", &[]);
    }
}

pub trait HistoryOps: HostWrapper {
    fn len(&self) -> usize {
        self.prop("length").as_u32() as usize
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Panics if the host reports a mode outside the known table.
    fn scroll_restoration(&self) -> Option<ScrollRestoration> {
        let mode = self.prop("scrollRestoration");
        (!mode.is_nullish()).then(|| ScrollRestoration::from_host(&mode))
    }

    fn set_scroll_restoration(&self, mode: ScrollRestoration)
    where
        Self: Sized,
    {
        self.set_prop("scrollRestoration", mode);
    }

    fn state(&self) -> Value {
        self.prop("state")
    }

    fn back(&self) {
        self.call_method("back", &[]);
    }

    fn forward(&self) {
        self.call_method("forward", &[]);
    }

    fn go(&self, delta: i32) {
        self.call_method("go", &[Value::from(delta)]);
    }

    fn push_state(&self, state: impl Into<Value>, title: &str, url: Option<&str>)
    where
        Self: Sized,
    {
        self.call_method("pushState", &[state.into(), Value::from(title), Value::from(url)]);
    }

    fn replace_state(&self, state: impl Into<Value>, title: &str, url: Option<&str>)
    where
        Self: Sized,
    {
        self.call_method("replaceState", &[state.into(), Value::from(title), Value::from(url)]);
    }
}

pub trait LocationOps: HostWrapper {
    fn href(&self) -> String {
        self.prop("href").as_string()
    }

    fn set_href(&self, href: &str)
    where
        Self: Sized,
    {
        self.set_prop("href", href);
    }

    fn hash(&self) -> String {
        self.prop("hash").as_string()
    }

    fn set_hash(&self, hash: &str)
    where
        Self: Sized,
    {
        self.set_prop("hash", hash);
    }

    fn pathname(&self) -> String {
        self.prop("pathname").as_string()
    }

    fn reload(&self) {
        self.call_method("reload", &[]);
    }
}

pub trait NavigatorOps: HostWrapper {
    fn user_agent(&self) -> String {
        self.prop("userAgent").as_string()
    }

    fn language(&self) -> String {
        self.prop("language").as_string()
    }

    fn on_line(&self) -> bool {
        self.prop("onLine").as_bool()
    }
}

impl EventTargetOps for Window {
    type Source = Window;
}

impl WindowOps for Window {}
impl StorageOps for Storage {}
impl HistoryOps for History {}
impl LocationOps for Location {}
impl NavigatorOps for Navigator {}

impl<T: WindowOps> WindowOps for Option<T> {}
impl<T: StorageOps> StorageOps for Option<T> {}
impl<T: HistoryOps> HistoryOps for Option<T> {}
impl<T: LocationOps> LocationOps for Option<T> {}
impl<T: NavigatorOps> NavigatorOps for Option<T> {}
