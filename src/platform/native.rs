//=========================================================================
// Native Windowing Interface
//=========================================================================
//
// Contract between the window adapter and the native windowing/graphics
// library (winit + glutin on Linux, a headless double in tests).
//
// The adapter never touches winit or glutin directly; everything it needs
// from the OS goes through [`NativeBackend`]. This keeps the callback
// translation testable without a display server.
//
// Architecture:
// ```text
//  LinuxWindow ──► Windowing<B> ──► B: NativeBackend ──► OS / GL driver
//       ▲                               │
//       └──── (WindowDataRef, NativeEvent) ◄─ poll_events()
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::fmt;
use std::rc::Weak;

//=== Internal Dependencies ===============================================

use super::dispatch::WindowData;
use super::PlatformError;
use crate::core::event::{KeyCode, MouseButton};
use crate::core::window::WindowProps;

//=== Handles and Back-References =========================================

/// Opaque identifier of one native window and its graphics context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NativeHandle(pub(crate) u64);

impl fmt::Display for NativeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Non-owning back-reference from a native window to its state record.
///
/// The adapter owns the record; the backend only stores this weak pointer
/// so it can be resolved when the window's native events are dispatched.
pub type WindowDataRef = Weak<RefCell<WindowData>>;

/// Callback receiving asynchronous native errors (code, description).
pub type ErrorCallback = Box<dyn FnMut(i32, &str)>;

//=== InputAction =========================================================

/// State transition reported with key and mouse-button callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    Press,
    Release,

    /// Auto-repeat while held (keys only in practice).
    Repeat,
}

//=== NativeEvent =========================================================

/// Raw callback payload reported by the native library.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeEvent {
    SizeChanged { width: u32, height: u32 },
    CloseRequested,
    Key { key: KeyCode, action: InputAction },
    MouseButton { button: MouseButton, action: InputAction },
    Scroll { x_offset: f64, y_offset: f64 },
    CursorPos { x: f64, y: f64 },
}

impl NativeEvent {
    /// Returns the callback kind that must be enabled for this event to be
    /// delivered.
    pub fn kind(&self) -> NativeEventKind {
        match self {
            Self::SizeChanged { .. } => NativeEventKind::Size,
            Self::CloseRequested => NativeEventKind::Close,
            Self::Key { .. } => NativeEventKind::Key,
            Self::MouseButton { .. } => NativeEventKind::MouseButton,
            Self::Scroll { .. } => NativeEventKind::Scroll,
            Self::CursorPos { .. } => NativeEventKind::CursorPos,
        }
    }
}

/// The six callback kinds a window can register for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeEventKind {
    Size,
    Close,
    Key,
    MouseButton,
    Scroll,
    CursorPos,
}

impl NativeEventKind {
    pub const ALL: [NativeEventKind; 6] = [
        Self::Size,
        Self::Close,
        Self::Key,
        Self::MouseButton,
        Self::Scroll,
        Self::CursorPos,
    ];
}

//=== NativeBackend =======================================================

/// Native windowing + graphics-context library.
///
/// All methods are called from the single thread that owns the graphics
/// contexts. Handles passed in were returned by `create_window` on the
/// same backend; passing anything else is a logic error and backends may
/// ignore the call.
pub trait NativeBackend {
    /// Initializes the library. Called at most once per backend.
    fn init(&mut self) -> Result<(), PlatformError>;

    /// Registers the sink for asynchronous native errors.
    fn set_error_callback(&mut self, callback: ErrorCallback);

    /// Creates a window and its graphics context sized per `props`.
    fn create_window(&mut self, props: &WindowProps) -> Result<NativeHandle, PlatformError>;

    /// Destroys a window and its graphics context.
    fn destroy_window(&mut self, handle: NativeHandle);

    /// Binds the window's graphics context to the calling thread.
    fn make_context_current(&mut self, handle: NativeHandle) -> Result<(), PlatformError>;

    /// Resolves graphics API function pointers through the window's context.
    fn load_gl_functions(&mut self, handle: NativeHandle) -> Result<(), PlatformError>;

    /// Stores (or clears) the window's back-reference to its state record.
    fn set_user_pointer(&mut self, handle: NativeHandle, data: Option<WindowDataRef>);

    /// Returns the window's back-reference, if one is set.
    fn user_pointer(&self, handle: NativeHandle) -> Option<WindowDataRef>;

    /// Enables or disables delivery of one callback kind for a window.
    fn set_event_polling(&mut self, handle: NativeHandle, kind: NativeEventKind, enabled: bool);

    /// Sets the swap interval of the window's context (0 = immediate).
    fn set_swap_interval(&mut self, handle: NativeHandle, interval: u32);

    /// Drains every pending native event of every window.
    ///
    /// Only events whose kind is enabled for their window reach `sink`.
    fn poll_events(&mut self, sink: &mut dyn FnMut(NativeHandle, NativeEvent));

    /// Presents the window's back buffer.
    fn swap_buffers(&mut self, handle: NativeHandle);
}

//=========================================================================
// Unit Tests
//=========================================================================
