//=========================================================================
// Engine Event Types
//
// Defines the engine-level representation of window and input events.
//
// The platform layer translates native callbacks into these values and
// hands them to the engine's event callback by reference. Events are
// transient: created inside a callback, passed on, then dropped.
//
// Responsibilities:
// - Represent window, keyboard and mouse occurrences in a portable form
// - Classify events by type and category for filtering
// - Provide a readable diagnostic rendering (`Display`)
//
// Event Flow:
// ```text
// Native backend (winit/glutin)
//         ↓
//    NativeEvent (platform::native)
//         ↓
//    dispatch() → Event (this module)
//         ↓
//    EventCallback (engine)
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;

//=== External Crates =====================================================

use bitflags::bitflags;

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// Abstracts the native button representation into a stable enum. Buttons
/// without a dedicated variant keep their native index in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Back side button.
    Back,

    /// Forward side button.
    Forward,

    /// Any other button, identified by its native index.
    Other(u16),
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// `KeyA` is always the same physical key regardless of keyboard layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Function Keys ----------------------------------------------------

    /// Function row: F1-F12
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Modifier Keys ----------------------------------------------------

    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Fallback for keys the platform reports but the engine does not name.
    Unidentified,
}

//=== EventType ===========================================================

/// Discriminant-only view of an [`Event`].
///
/// Useful for matching on the kind of event without its payload, e.g.
/// when routing events to handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    WindowResize,
    WindowClose,
    KeyPressed,
    KeyReleased,
    MouseButtonPressed,
    MouseButtonReleased,
    MouseScrolled,
    MouseMoved,
}

//=== EventCategory =======================================================

bitflags! {
    /// Coarse classification of events.
    ///
    /// An event may belong to several categories at once: a mouse button
    /// press is `INPUT`, `MOUSE` and `MOUSE_BUTTON`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EventCategory: u8 {
        const APPLICATION  = 1 << 0;
        const INPUT        = 1 << 1;
        const KEYBOARD     = 1 << 2;
        const MOUSE        = 1 << 3;
        const MOUSE_BUTTON = 1 << 4;
    }
}

//=== Event ===============================================================

/// Window or input occurrence produced by the platform layer.
///
/// Each variant carries the minimal data for that occurrence. Events are
/// created inside a native callback, passed by reference to the engine's
/// [`EventCallback`](crate::core::window::EventCallback), then discarded.
///
/// # Repeat Count
///
/// `KeyPressed::repeat_count` is `0` for the initial press and `1` for
/// every auto-repeat reported while the key is held.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Window client area changed size (pixels).
    WindowResize { width: u32, height: u32 },

    /// User or OS asked for the window to close.
    WindowClose,

    /// Key pressed or auto-repeated.
    KeyPressed { key: KeyCode, repeat_count: u32 },

    /// Key released.
    KeyReleased { key: KeyCode },

    /// Mouse button pressed.
    MouseButtonPressed { button: MouseButton },

    /// Mouse button released.
    MouseButtonReleased { button: MouseButton },

    /// Wheel or trackpad scroll.
    MouseScrolled { x_offset: f32, y_offset: f32 },

    /// Cursor moved to a new position (window space, top-left origin).
    MouseMoved { x: f32, y: f32 },
}

//--- Implementation ------------------------------------------------------

impl Event {
    /// Returns the payload-free type of this event.
    pub fn event_type(&self) -> EventType {
        match self {
            Self::WindowResize { .. } => EventType::WindowResize,
            Self::WindowClose => EventType::WindowClose,
            Self::KeyPressed { .. } => EventType::KeyPressed,
            Self::KeyReleased { .. } => EventType::KeyReleased,
            Self::MouseButtonPressed { .. } => EventType::MouseButtonPressed,
            Self::MouseButtonReleased { .. } => EventType::MouseButtonReleased,
            Self::MouseScrolled { .. } => EventType::MouseScrolled,
            Self::MouseMoved { .. } => EventType::MouseMoved,
        }
    }

    /// Returns the short event name used in logs.
    pub fn name(&self) -> &'static str {
        match self.event_type() {
            EventType::WindowResize => "WindowResize",
            EventType::WindowClose => "WindowClose",
            EventType::KeyPressed => "KeyPressed",
            EventType::KeyReleased => "KeyReleased",
            EventType::MouseButtonPressed => "MouseButtonPressed",
            EventType::MouseButtonReleased => "MouseButtonReleased",
            EventType::MouseScrolled => "MouseScrolled",
            EventType::MouseMoved => "MouseMoved",
        }
    }

    /// Returns every category this event belongs to.
    pub fn categories(&self) -> EventCategory {
        match self {
            Self::WindowResize { .. } | Self::WindowClose => EventCategory::APPLICATION,
            Self::KeyPressed { .. } | Self::KeyReleased { .. } => {
                EventCategory::KEYBOARD | EventCategory::INPUT
            }
            Self::MouseButtonPressed { .. } | Self::MouseButtonReleased { .. } => {
                EventCategory::MOUSE | EventCategory::INPUT | EventCategory::MOUSE_BUTTON
            }
            Self::MouseScrolled { .. } | Self::MouseMoved { .. } => {
                EventCategory::MOUSE | EventCategory::INPUT
            }
        }
    }

    /// Returns `true` if the event belongs to any of the given categories.
    pub fn is_in_category(&self, category: EventCategory) -> bool {
        self.categories().intersects(category)
    }
}

//--- Trait Implementations -----------------------------------------------

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WindowResize { width, height } => {
                write!(f, "WindowResizeEvent: {}, {}", width, height)
            }
            Self::WindowClose => write!(f, "WindowCloseEvent"),
            Self::KeyPressed { key, repeat_count } => {
                write!(f, "KeyPressedEvent: {:?} ({} repeats)", key, repeat_count)
            }
            Self::KeyReleased { key } => write!(f, "KeyReleasedEvent: {:?}", key),
            Self::MouseButtonPressed { button } => {
                write!(f, "MouseButtonPressedEvent: {:?}", button)
            }
            Self::MouseButtonReleased { button } => {
                write!(f, "MouseButtonReleasedEvent: {:?}", button)
            }
            Self::MouseScrolled { x_offset, y_offset } => {
                write!(f, "MouseScrolledEvent: {}, {}", x_offset, y_offset)
            }
            Self::MouseMoved { x, y } => write!(f, "MouseMovedEvent: {}, {}", x, y),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
