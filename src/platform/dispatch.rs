//=========================================================================
// Callback Dispatch
//=========================================================================
//
// Per-window state record and the translation of native callbacks into
// engine events.
//
// Architecture:
//   NativeEvent → dispatch(&WindowData) → Event → EventCallback
//
// The state record is reached through the native handle's back-reference,
// never through a global lookup, so several windows can be live at once.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::native::{InputAction, NativeEvent};
use crate::core::event::Event;
use crate::core::window::{EventCallback, WindowProps};

//=== WindowData ==========================================================

/// Mutable per-window state shared between the adapter and its callbacks.
pub struct WindowData {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub(crate) event_callback: Option<EventCallback>,
}

impl WindowData {
    pub(crate) fn new(props: &WindowProps) -> Self {
        Self {
            title: props.title.clone(),
            width: props.width,
            height: props.height,
            vsync: false,
            event_callback: None,
        }
    }

    /// Returns `true` once the engine installed an event callback.
    pub fn has_event_callback(&self) -> bool {
        self.event_callback.is_some()
    }

    fn emit(&mut self, event: Event) {
        match self.event_callback.as_mut() {
            Some(callback) => callback(&event),
            None => trace!(
                target: "platform::input",
                "No event callback for '{}', dropping {}",
                self.title,
                event
            ),
        }
    }
}

impl std::fmt::Debug for WindowData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowData")
            .field("title", &self.title)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("vsync", &self.vsync)
            .field("event_callback", &self.event_callback.is_some())
            .finish()
    }
}

//=== dispatch() ==========================================================

/// Translates one native event and hands it to the window's callback.
///
/// Resize events also overwrite the stored dimensions, before the callback
/// runs. Mouse-button repeats have no engine counterpart and are ignored.
pub(crate) fn dispatch(data: &mut WindowData, event: NativeEvent) {
    let translated = match event {
        NativeEvent::SizeChanged { width, height } => {
            data.width = width;
            data.height = height;
            Event::WindowResize { width, height }
        }

        NativeEvent::CloseRequested => Event::WindowClose,

        NativeEvent::Key { key, action } => match action {
            InputAction::Press => Event::KeyPressed { key, repeat_count: 0 },
            InputAction::Release => Event::KeyReleased { key },
            InputAction::Repeat => Event::KeyPressed { key, repeat_count: 1 },
        },

        NativeEvent::MouseButton { button, action } => match action {
            InputAction::Press => Event::MouseButtonPressed { button },
            InputAction::Release => Event::MouseButtonReleased { button },
            InputAction::Repeat => return,
        },

        NativeEvent::Scroll { x_offset, y_offset } => Event::MouseScrolled {
            x_offset: x_offset as f32,
            y_offset: y_offset as f32,
        },

        NativeEvent::CursorPos { x, y } => Event::MouseMoved {
            x: x as f32,
            y: y as f32,
        },
    };

    data.emit(translated);
}

//=========================================================================
// Unit Tests
//=========================================================================
