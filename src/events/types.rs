//! Event name tables, one per category.

use std::fmt;

use super::{
    BeforeUnloadEvent, Event, EventType, FocusEvent, HashChangeEvent, InputEvent, KeyboardEvent, MouseEvent,
    PageTransitionEvent, PointerEvent, UiEvent, WheelEvent,
};

macro_rules! event_types {
    ($(#[$meta:meta])* $name:ident => $event:ty { $($variant:ident = $lit:literal),+ $(,)? }) => {
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
        }

        impl EventType for $name {
            type Event = $event;

            fn name(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

event_types! {
    /// Events carrying no fields beyond the base event.
    GenericEventType => Event {
        Cancel = "cancel",
        Change = "change",
        Close = "close",
        CueChange = "cuechange",
        Invalid = "invalid",
        Load = "load",
        Reset = "reset",
        Scroll = "scroll",
        Select = "select",
        SelectionChange = "selectionchange",
        SelectStart = "selectstart",
        Submit = "submit",
        Toggle = "toggle",
        PointerLockChange = "pointerlockchange",
        PointerLockError = "pointerlockerror",
        AfterPrint = "afterprint",
        AppInstalled = "appinstalled",
        BeforePrint = "beforeprint",
        LanguageChange = "languagechange",
        Offline = "offline",
        Online = "online",
        OrientationChange = "orientationchange",
        Abort = "abort",
        CanPlay = "canplay",
        CanPlayThrough = "canplaythrough",
        DurationChange = "durationchange",
        Emptied = "emptied",
        Ended = "ended",
        Error = "error",
        LoadedData = "loadeddata",
        LoadedMetadata = "loadedmetadata",
        LoadStart = "loadstart",
        Pause = "pause",
        Play = "play",
        Playing = "playing",
        RateChange = "ratechange",
        Seeked = "seeked",
        Seeking = "seeking",
        Stalled = "stalled",
        Suspend = "suspend",
        TimeUpdate = "timeupdate",
        VolumeChange = "volumechange",
        Waiting = "waiting",
    }
}

event_types! {
    MouseEventType => MouseEvent {
        Click = "click",
        AuxClick = "auxclick",
        DblClick = "dblclick",
        MouseDown = "mousedown",
        MouseEnter = "mouseenter",
        MouseLeave = "mouseleave",
        MouseMove = "mousemove",
        MouseOut = "mouseout",
        MouseUp = "mouseup",
        MouseOver = "mouseover",
        ContextMenu = "contextmenu",
    }
}

event_types! {
    FocusEventType => FocusEvent {
        Blur = "blur",
        Focus = "focus",
        FocusIn = "focusin",
        FocusOut = "focusout",
    }
}

event_types! {
    PointerEventType => PointerEvent {
        GotPointerCapture = "gotpointercapture",
        LostPointerCapture = "lostpointercapture",
        PointerCancel = "pointercancel",
        PointerDown = "pointerdown",
        PointerEnter = "pointerenter",
        PointerLeave = "pointerleave",
        PointerMove = "pointermove",
        PointerOut = "pointerout",
        PointerOver = "pointerover",
        PointerUp = "pointerup",
    }
}

event_types! {
    InputEventType => InputEvent {
        Input = "input",
        BeforeInput = "beforeinput",
    }
}

event_types! {
    KeyboardEventType => KeyboardEvent {
        KeyDown = "keydown",
        KeyUp = "keyup",
        KeyPress = "keypress",
    }
}

event_types! {
    UiEventType => UiEvent {
        Resize = "resize",
    }
}

event_types! {
    WheelEventType => WheelEvent {
        Wheel = "wheel",
    }
}

event_types! {
    HashChangeEventType => HashChangeEvent {
        HashChange = "hashchange",
    }
}

event_types! {
    PageTransitionEventType => PageTransitionEvent {
        PageHide = "pagehide",
        PageShow = "pageshow",
    }
}

event_types! {
    BeforeUnloadEventType => BeforeUnloadEvent {
        BeforeUnload = "beforeunload",
    }
}

event_types! {
    /// Fired on the document when an element enters or leaves fullscreen.
    FullscreenEventType => Event {
        FullscreenChange = "fullscreenchange",
        FullscreenError = "fullscreenerror",
    }
}
