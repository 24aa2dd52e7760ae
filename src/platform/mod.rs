//=========================================================================
// Platform Subsystem
//
// Owns OS windows and graphics contexts and turns native callbacks into
// engine events.
//
// Architecture:
// ```text
//  create_window(props)
//        │
//        ▼
//  LinuxWindow<WinitBackend> ──► Windowing (lazy, initialized once)
//        │                            │
//        │ on_update()                └─► WinitBackend: winit + glutin + gl
//        ▼
//  dispatch(): NativeEvent → Event → EventCallback
// ```
//
// Key Design Decisions:
// - **Native seam**: everything OS-facing sits behind `NativeBackend`, so
//   the adapter and its translation table run without a display server
// - **Single thread**: the GL context is bound to the creating thread;
//   polling, swapping and callbacks all happen there
// - **Fatal environment errors**: no display, no GL driver or no loader
//   means the engine cannot run; the factory logs and panics
//
// Responsibilities:
// - Create and destroy OS windows with GL contexts
// - Poll native events once per frame and present the frame
// - Translate native callbacks into engine `Event`s
// - Control v-sync
//
//=========================================================================

//=== Submodules ==========================================================

pub mod dispatch;
pub mod native;
pub mod windowing;

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(test)]
pub(crate) mod headless;

//=== Public API ==========================================================

pub use dispatch::WindowData;
pub use native::{
    ErrorCallback, InputAction, NativeBackend, NativeEvent, NativeEventKind, NativeHandle,
    WindowDataRef,
};
pub use windowing::{SharedWindowing, Windowing};

#[cfg(target_os = "linux")]
pub use linux::{LinuxWindow, WinitBackend};

//=== Internal Imports ====================================================

use crate::core::window::{Window, WindowProps};

//=== PlatformError =======================================================

/// Error reported by the native windowing library, kept for `source()`.
pub type NativeError = Box<dyn std::error::Error>;

/// Platform initialization errors.
///
/// All of these mean the environment cannot host a window (no display
/// server, no usable GL driver). [`create_window`] treats them as fatal.
#[derive(Debug)]
pub enum PlatformError {
    /// Windowing library initialization failed.
    Init(NativeError),

    /// Windowing library is already owned by another thread.
    WrongThread {
        owner: std::thread::ThreadId,
        caller: std::thread::ThreadId,
    },

    /// Window or graphics context creation failed.
    WindowCreation(NativeError),

    /// Graphics context could not be bound to the calling thread.
    ContextCurrent(NativeError),

    /// Graphics function pointers could not be loaded.
    GlLoad(NativeError),

    /// Handle does not name a live native window.
    UnknownHandle(NativeHandle),
}

impl PlatformError {
    /// Diagnostic used when the error aborts window creation.
    pub fn fatal_message(&self) -> &'static str {
        match self {
            Self::Init(_) | Self::WrongThread { .. } => "Failed to initialize windowing system!",
            Self::WindowCreation(_) | Self::UnknownHandle(_) => "Failed to create window!",
            Self::ContextCurrent(_) => "Failed to make GL context current!",
            Self::GlLoad(_) => "Failed to initialize GL loader!",
        }
    }
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Init(e) => write!(f, "Windowing initialization failed: {}", e),
            Self::WrongThread { owner, caller } => write!(
                f,
                "Windowing is owned by thread {:?}, cannot create windows on {:?}",
                owner, caller
            ),
            Self::WindowCreation(e) => write!(f, "Window creation failed: {}", e),
            Self::ContextCurrent(e) => write!(f, "GL context activation failed: {}", e),
            Self::GlLoad(e) => write!(f, "GL function loading failed: {}", e),
            Self::UnknownHandle(h) => write!(f, "Unknown native window {}", h),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Init(e) | Self::WindowCreation(e) | Self::ContextCurrent(e) | Self::GlLoad(e) => {
                Some(e.as_ref())
            }
            Self::WrongThread { .. } | Self::UnknownHandle(_) => None,
        }
    }
}

//=== Factory =============================================================

/// Creates a platform window on the calling thread.
///
/// The first call initializes the windowing system; later calls reuse it.
///
/// # Panics
///
/// Panics if the windowing system, the window, its GL context or the GL
/// function loader cannot be set up.
///
/// Only the thread that created the first window may create more: winit
/// allows one event loop per process and GL contexts are thread-bound.
/// A call from any other thread panics with the initialization diagnostic.
#[cfg(target_os = "linux")]
pub fn create_window(props: &WindowProps) -> Box<dyn Window> {
    match windowing::default_shared() {
        Ok(windowing) => Box::new(LinuxWindow::create(windowing, props)),
        Err(e) => {
            log::error!(target: "platform", "{}", e);
            panic!("{} ({})", e.fatal_message(), e);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
