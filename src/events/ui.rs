//! UI-derived categories: mouse, wheel, pointer, focus, keyboard and input.

use crate::dom::{EventTarget, FromHost, HostWrapper};
use crate::enums::{DeltaMode, KeyLocation};

use super::{event_category, Event};

const UI_FIELDS: &[&str] = &["detail"];

const MOUSE_FIELDS: &[&str] = &[
    "detail", "altKey", "ctrlKey", "metaKey", "shiftKey", "button", "buttons", "screenX", "screenY", "clientX",
    "clientY", "pageX", "pageY", "offsetX", "offsetY", "movementX", "movementY",
];

const WHEEL_FIELDS: &[&str] = &[
    "detail", "altKey", "ctrlKey", "metaKey", "shiftKey", "button", "buttons", "screenX", "screenY", "clientX",
    "clientY", "pageX", "pageY", "offsetX", "offsetY", "movementX", "movementY", "deltaX", "deltaY", "deltaZ",
    "deltaMode",
];

const POINTER_FIELDS: &[&str] = &[
    "detail",
    "altKey",
    "ctrlKey",
    "metaKey",
    "shiftKey",
    "button",
    "buttons",
    "screenX",
    "screenY",
    "clientX",
    "clientY",
    "pageX",
    "pageY",
    "offsetX",
    "offsetY",
    "movementX",
    "movementY",
    "pointerId",
    "width",
    "height",
    "pressure",
    "tangentialPressure",
    "tiltX",
    "tiltY",
    "twist",
    "pointerType",
    "isPrimary",
];

const FOCUS_FIELDS: &[&str] = &["detail", "relatedTarget"];

const KEYBOARD_FIELDS: &[&str] = &[
    "detail", "altKey", "ctrlKey", "metaKey", "shiftKey", "key", "code", "location", "repeat", "isComposing",
];

const INPUT_FIELDS: &[&str] = &["detail", "data", "inputType", "isComposing"];

/// State of the modifier keys when the event fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    fn decode(event: &Event) -> Self {
        Self {
            alt: event.prop("altKey").as_bool(),
            ctrl: event.prop("ctrlKey").as_bool(),
            meta: event.prop("metaKey").as_bool(),
            shift: event.prop("shiftKey").as_bool(),
        }
    }

    pub fn any(&self) -> bool {
        self.alt || self.ctrl || self.meta || self.shift
    }
}

/// Fields shared by every mouse-derived event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MouseFields {
    pub detail: i32,
    pub modifiers: Modifiers,
    pub button: i16,
    pub buttons: u16,
    pub screen_x: f64,
    pub screen_y: f64,
    pub client_x: f64,
    pub client_y: f64,
    pub page_x: f64,
    pub page_y: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub movement_x: f64,
    pub movement_y: f64,
}

impl MouseFields {
    fn decode(event: &Event) -> Self {
        let detail = event.prop("detail").as_i32();
        let modifiers = Modifiers::decode(event);
        Self {
            detail,
            modifiers,
            button: event.prop("button").as_i32() as i16,
            buttons: event.prop("buttons").as_u32() as u16,
            screen_x: event.prop("screenX").as_f64(),
            screen_y: event.prop("screenY").as_f64(),
            client_x: event.prop("clientX").as_f64(),
            client_y: event.prop("clientY").as_f64(),
            page_x: event.prop("pageX").as_f64(),
            page_y: event.prop("pageY").as_f64(),
            offset_x: event.prop("offsetX").as_f64(),
            offset_y: event.prop("offsetY").as_f64(),
            movement_x: event.prop("movementX").as_f64(),
            movement_y: event.prop("movementY").as_f64(),
        }
    }
}

pub trait UiEventOps {
    fn detail(&self) -> i32;
}

pub trait ModifierKeys {
    fn modifiers(&self) -> Modifiers;

    fn alt_key(&self) -> bool {
        self.modifiers().alt
    }

    fn ctrl_key(&self) -> bool {
        self.modifiers().ctrl
    }

    fn meta_key(&self) -> bool {
        self.modifiers().meta
    }

    fn shift_key(&self) -> bool {
        self.modifiers().shift
    }
}

pub trait MouseEventOps: UiEventOps + ModifierKeys + HostWrapper {
    fn mouse(&self) -> &MouseFields;

    fn button(&self) -> i16 {
        self.mouse().button
    }

    fn buttons(&self) -> u16 {
        self.mouse().buttons
    }

    fn client_x(&self) -> f64 {
        self.mouse().client_x
    }

    fn client_y(&self) -> f64 {
        self.mouse().client_y
    }

    fn page_x(&self) -> f64 {
        self.mouse().page_x
    }

    fn page_y(&self) -> f64 {
        self.mouse().page_y
    }

    fn screen_x(&self) -> f64 {
        self.mouse().screen_x
    }

    fn screen_y(&self) -> f64 {
        self.mouse().screen_y
    }

    /// Read on demand; not part of the decoded field set.
    fn related_target(&self) -> Option<EventTarget>
    where
        Self: Sized,
    {
        self.prop_as("relatedTarget")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UiEvent {
    event: Event,
    pub detail: i32,
}

impl UiEvent {
    fn decode(event: Event) -> Self {
        let detail = event.prop("detail").as_i32();
        Self { event, detail }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MouseEvent {
    event: Event,
    pub mouse: MouseFields,
}

impl MouseEvent {
    fn decode(event: Event) -> Self {
        let mouse = MouseFields::decode(&event);
        Self { event, mouse }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WheelEvent {
    event: Event,
    pub mouse: MouseFields,
    pub delta_x: f64,
    pub delta_y: f64,
    pub delta_z: f64,
    pub delta_mode: DeltaMode,
}

impl WheelEvent {
    fn decode(event: Event) -> Self {
        let mouse = MouseFields::decode(&event);
        let delta_x = event.prop("deltaX").as_f64();
        let delta_y = event.prop("deltaY").as_f64();
        let delta_z = event.prop("deltaZ").as_f64();
        let delta_mode = DeltaMode::from_code(event.prop("deltaMode").as_u32()).unwrap_or_default();
        Self {
            event,
            mouse,
            delta_x,
            delta_y,
            delta_z,
            delta_mode,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    event: Event,
    pub mouse: MouseFields,
    pub pointer_id: i32,
    pub width: f64,
    pub height: f64,
    pub pressure: f32,
    pub tangential_pressure: f32,
    pub tilt_x: i32,
    pub tilt_y: i32,
    pub twist: i32,
    pub pointer_type: String,
    pub is_primary: bool,
}

impl PointerEvent {
    fn decode(event: Event) -> Self {
        let mouse = MouseFields::decode(&event);
        let pointer_id = event.prop("pointerId").as_i32();
        let width = event.prop("width").as_f64();
        let height = event.prop("height").as_f64();
        let pressure = event.prop("pressure").as_f64() as f32;
        let tangential_pressure = event.prop("tangentialPressure").as_f64() as f32;
        let tilt_x = event.prop("tiltX").as_i32();
        let tilt_y = event.prop("tiltY").as_i32();
        let twist = event.prop("twist").as_i32();
        let pointer_type = event.prop("pointerType").as_string();
        let is_primary = event.prop("isPrimary").as_bool();
        Self {
            event,
            mouse,
            pointer_id,
            width,
            height,
            pressure,
            tangential_pressure,
            tilt_x,
            tilt_y,
            twist,
            pointer_type,
            is_primary,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FocusEvent {
    event: Event,
    pub detail: i32,
    /// The element losing or gaining focus in exchange, if any.
    pub related_target: Option<EventTarget>,
}

impl FocusEvent {
    fn decode(event: Event) -> Self {
        let detail = event.prop("detail").as_i32();
        let related_target = EventTarget::from_host(event.prop("relatedTarget"));
        Self {
            event,
            detail,
            related_target,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyboardEvent {
    event: Event,
    pub detail: i32,
    pub modifiers: Modifiers,
    pub key: String,
    pub code: String,
    pub location: KeyLocation,
    pub repeat: bool,
    pub is_composing: bool,
}

impl KeyboardEvent {
    fn decode(event: Event) -> Self {
        let detail = event.prop("detail").as_i32();
        let modifiers = Modifiers::decode(&event);
        let key = event.prop("key").as_string();
        let code = event.prop("code").as_string();
        let location = KeyLocation::from_code(event.prop("location").as_u32()).unwrap_or_default();
        let repeat = event.prop("repeat").as_bool();
        let is_composing = event.prop("isComposing").as_bool();
        Self {
            event,
            detail,
            modifiers,
            key,
            code,
            location,
            repeat,
            is_composing,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputEvent {
    event: Event,
    pub detail: i32,
    /// Inserted text; `None` when the change inserted nothing (deletions, formatting).
    pub data: Option<String>,
    pub input_type: String,
    pub is_composing: bool,
}

impl InputEvent {
    fn decode(event: Event) -> Self {
        let detail = event.prop("detail").as_i32();
        let data = event.prop("data").as_optional_string();
        let input_type = event.prop("inputType").as_string();
        let is_composing = event.prop("isComposing").as_bool();
        Self {
            event,
            detail,
            data,
            input_type,
            is_composing,
        }
    }
}

event_category!(UiEvent, "UIEvent", UI_FIELDS);
event_category!(MouseEvent, "MouseEvent", MOUSE_FIELDS);
event_category!(WheelEvent, "WheelEvent", WHEEL_FIELDS);
event_category!(PointerEvent, "PointerEvent", POINTER_FIELDS);
event_category!(FocusEvent, "FocusEvent", FOCUS_FIELDS);
event_category!(KeyboardEvent, "KeyboardEvent", KEYBOARD_FIELDS);
event_category!(InputEvent, "InputEvent", INPUT_FIELDS);

macro_rules! mouse_like {
    ($($name:ident),+) => {$(
        impl UiEventOps for $name {
            fn detail(&self) -> i32 {
                self.mouse.detail
            }
        }

        impl ModifierKeys for $name {
            fn modifiers(&self) -> Modifiers {
                self.mouse.modifiers
            }
        }

        impl MouseEventOps for $name {
            fn mouse(&self) -> &MouseFields {
                &self.mouse
            }
        }
    )+};
}

mouse_like!(MouseEvent, WheelEvent, PointerEvent);

impl UiEventOps for UiEvent {
    fn detail(&self) -> i32 {
        self.detail
    }
}

impl UiEventOps for FocusEvent {
    fn detail(&self) -> i32 {
        self.detail
    }
}

impl UiEventOps for InputEvent {
    fn detail(&self) -> i32 {
        self.detail
    }
}

impl UiEventOps for KeyboardEvent {
    fn detail(&self) -> i32 {
        self.detail
    }
}

impl ModifierKeys for KeyboardEvent {
    fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}
