use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::dom::{Element, FromHost};
use crate::host::{Value, WeakValue};

use super::normalize;

/// One attribute of an [`AttributeMap`]. Shared: every lookup of the same
/// name returns the same `Attribute`, and later `set` calls update it in place.
#[derive(Debug)]
pub struct Attribute {
    name: String,
    value: RefCell<String>,
    owner: WeakValue,
}

impl Attribute {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace prefix of a qualified name, e.g. `xlink` in `xlink:href`.
    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }

    /// The name without its prefix.
    pub fn local_name(&self) -> &str {
        self.name.split_once(':').map_or(self.name.as_str(), |(_, local)| local)
    }

    pub fn value(&self) -> String {
        self.value.borrow().clone()
    }

    /// A present attribute reads as true unless its value is `false` or `0`.
    pub fn as_bool(&self) -> bool {
        !matches!(self.value.borrow().as_str(), "false" | "0")
    }

    /// The element this attribute belongs to, if it is still alive.
    pub fn owner_element(&self) -> Option<Element> {
        self.owner.upgrade().and_then(Element::from_host)
    }
}

/// `name="value"`, or the bare name for an empty value.
impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.value.borrow();
        if value.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}=\"{}\"", self.name, value.replace('"', "&quot;"))
        }
    }
}

/// Detached snapshot of an element's attributes.
///
/// Names are matched case-insensitively; values are kept verbatim. Nothing
/// reaches the element until [`flush`](AttributeMap::flush).
#[derive(Debug, Clone)]
pub struct AttributeMap {
    owner: WeakValue,
    attributes: IndexMap<String, Rc<Attribute>>,
}

impl AttributeMap {
    /// Snapshots a host `NamedNodeMap` belonging to `owner`.
    pub fn from_host(map: &Value, owner: &Value) -> Self {
        let mut attributes = Self {
            owner: owner.downgrade(),
            attributes: IndexMap::new(),
        };
        for index in 0..map.length() {
            let item = map.index(index);
            if item.is_nullish() {
                continue;
            }
            attributes.set(&item.get("name").as_string(), &item.get("value").as_string());
        }
        attributes
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Attribute at `index`, in snapshot-then-insertion order.
    pub fn get(&self, index: usize) -> Option<Rc<Attribute>> {
        self.attributes.get_index(index).map(|(_, attribute)| attribute.clone())
    }

    pub fn find(&self, name: &str) -> Option<Rc<Attribute>> {
        self.attributes.get(&normalize(name)).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(&normalize(name))
    }

    /// False for a missing attribute, otherwise [`Attribute::as_bool`].
    pub fn get_bool(&self, name: &str) -> bool {
        self.find(name).is_some_and(|attribute| attribute.as_bool())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<Attribute>> {
        self.attributes.values()
    }

    /// Creates the attribute or updates the existing one in place.
    pub fn set(&mut self, name: &str, value: &str) -> Rc<Attribute> {
        let name = normalize(name);
        if let Some(attribute) = self.attributes.get(&name) {
            *attribute.value.borrow_mut() = value.to_string();
            return attribute.clone();
        }
        let attribute = Rc::new(Attribute {
            name: name.clone(),
            value: RefCell::new(value.to_string()),
            owner: self.owner.clone(),
        });
        self.attributes.insert(name, attribute.clone());
        attribute
    }

    /// Removes the attribute locally. Returns false if it was missing.
    pub fn remove(&mut self, name: &str) -> bool {
        self.attributes.shift_remove(&normalize(name)).is_some()
    }

    /// Adds `name` as a bare attribute if missing, removes it otherwise.
    /// Returns whether it is present now.
    pub fn toggle(&mut self, name: &str) -> bool {
        if self.remove(name) {
            false
        } else {
            self.set(name, "");
            true
        }
    }

    /// Swaps one bare attribute for another: if `one` is present it is
    /// removed and `another` is set, otherwise `another` is removed and `one`
    /// is set. Returns the attribute that is present now.
    pub fn toggle_between(&mut self, one: &str, another: &str) -> Rc<Attribute> {
        if self.remove(one) {
            self.set(another, "")
        } else {
            self.remove(another);
            self.set(one, "")
        }
    }

    /// Sets a boolean attribute: present and bare when true, missing when false.
    pub fn set_bool(&mut self, name: &str, on: bool) {
        if on {
            self.set(name, "");
        } else {
            self.remove(name);
        }
    }

    /// Makes the element's attributes match this map: attributes missing here
    /// are removed, every local one is written in order.
    pub fn flush(&self) {
        let Some(owner) = self.owner.upgrade() else {
            tracing::warn!(target: "webclient::view", "attribute map has no live owner to flush to");
            return;
        };
        let live = owner.get("attributes");
        let stale: Vec<String> = (0..live.length())
            .map(|index| live.index(index).get("name").as_string())
            .filter(|name| !self.attributes.contains_key(&normalize(name)))
            .collect();
        for name in &stale {
            owner.call("removeAttribute", &[Value::from(name.as_str())]);
        }
        for attribute in self.attributes.values() {
            owner.call(
                "setAttribute",
                &[Value::from(attribute.name.as_str()), Value::from(attribute.value())],
            );
        }
        tracing::debug!(
            target: "webclient::view",
            removed = stale.len(),
            written = self.attributes.len(),
            "flushed attribute map"
        );
    }
}

impl fmt::Display for AttributeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, attribute) in self.attributes.values().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{attribute}")?;
        }
        Ok(())
    }
}
