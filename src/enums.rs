//! Host enumerations.
//!
//! String enums mirror the literal tables the host uses; each variant also has
//! a small integer code (its position in the table). Decoding a string outside
//! the table is a contract violation: [`try_from_host`](DocumentReadyState::try_from_host)
//! reports it, `from_host` aborts.

use std::fmt;
use std::str::FromStr;

use crate::error::{fail_fast, Error, Result};
use crate::host::Value;

macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $lit:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $lit),+
                }
            }

            pub fn code(self) -> u32 {
                self as u32
            }

            pub fn from_code(code: u32) -> Option<Self> {
                Self::ALL.get(code as usize).copied()
            }

            pub fn try_from_host(value: &Value) -> Result<Self> {
                value.as_string().parse()
            }

            /// Panics if the host reports a value outside the table.
            pub fn from_host(value: &Value) -> Self {
                fail_fast(Self::try_from_host(value))
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($lit => Ok($name::$variant),)+
                    _ => Err(Error::UnknownEnumValue {
                        kind: stringify!($name),
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for Value {
            fn from(value: $name) -> Self {
                Value::from(value.as_str())
            }
        }
    };
}

string_enum! {
    /// `document.readyState`
    DocumentReadyState {
        Loading = "loading",
        Interactive = "interactive",
        Complete = "complete",
    }
}

string_enum! {
    /// `document.visibilityState`
    VisibilityState {
        Hidden = "hidden",
        Visible = "visible",
        Prerender = "prerender",
    }
}

string_enum! {
    /// `history.scrollRestoration`
    ScrollRestoration {
        Auto = "auto",
        Manual = "manual",
    }
}

string_enum! {
    /// The `autocapitalize` attribute.
    Autocapitalize {
        Off = "off",
        Sentences = "sentences",
        Words = "words",
        Characters = "characters",
    }
}

string_enum! {
    /// The `contenteditable` attribute. An empty value means `True`.
    ContentEditable {
        False = "false",
        True = "true",
        Inherit = "inherit",
    }
}

/// `node.nodeType`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Element = 1,
    Attribute = 2,
    Text = 3,
    CdataSection = 4,
    EntityReference = 5,
    Entity = 6,
    ProcessingInstruction = 7,
    Comment = 8,
    Document = 9,
    DocumentType = 10,
    DocumentFragment = 11,
    Notation = 12,
}

impl NodeType {
    pub fn from_code(code: u32) -> Option<Self> {
        let node_type = match code {
            1 => NodeType::Element,
            2 => NodeType::Attribute,
            3 => NodeType::Text,
            4 => NodeType::CdataSection,
            5 => NodeType::EntityReference,
            6 => NodeType::Entity,
            7 => NodeType::ProcessingInstruction,
            8 => NodeType::Comment,
            9 => NodeType::Document,
            10 => NodeType::DocumentType,
            11 => NodeType::DocumentFragment,
            12 => NodeType::Notation,
            _ => return None,
        };
        Some(node_type)
    }

    pub fn code(self) -> u32 {
        self as u32
    }

    /// The `whatToShow` bit selecting this node type.
    pub fn filter_bit(self) -> u32 {
        1 << (self.code() - 1)
    }
}

/// `WheelEvent.deltaMode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

impl DeltaMode {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(DeltaMode::Pixel),
            1 => Some(DeltaMode::Line),
            2 => Some(DeltaMode::Page),
            _ => None,
        }
    }
}

/// `KeyboardEvent.location`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyLocation {
    #[default]
    Standard,
    Left,
    Right,
    Numpad,
}

impl KeyLocation {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(KeyLocation::Standard),
            1 => Some(KeyLocation::Left),
            2 => Some(KeyLocation::Right),
            3 => Some(KeyLocation::Numpad),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_tables_round_trip_codes() {
        for state in DocumentReadyState::ALL {
            assert_eq!(DocumentReadyState::from_code(state.code()), Some(*state));
        }
        assert_eq!(VisibilityState::Prerender.code(), 2);
        assert_eq!(DocumentReadyState::from_code(3), None);
    }

    #[test]
    fn unknown_strings_are_reported() {
        let err = VisibilityState::try_from_host(&Value::from("unloaded")).unwrap_err();
        assert_eq!(err.to_string(), "unable to convert 'unloaded' into VisibilityState");
    }

    #[test]
    #[should_panic(expected = "unable to convert 'later'")]
    fn from_host_aborts_on_unknown_strings() {
        DocumentReadyState::from_host(&Value::from("later"));
    }

    #[test]
    fn node_type_bits_follow_what_to_show() {
        assert_eq!(NodeType::Element.filter_bit(), 0x1);
        assert_eq!(NodeType::Text.filter_bit(), 0x4);
        assert_eq!(NodeType::Notation.filter_bit(), 0x800);
        assert_eq!(NodeType::from_code(13), None);
    }
}
