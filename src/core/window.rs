//=========================================================================
// Window Abstraction
//=========================================================================
//
// Engine-facing window interface and its creation parameters.
//
// Platform backends implement [`Window`]; the engine only ever talks to
// `Box<dyn Window>` produced by `platform::create_window`.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::event::Event;

//=== EventCallback =======================================================

/// Engine function invoked synchronously for every translated event.
pub type EventCallback = Box<dyn FnMut(&Event)>;

//=== WindowProps =========================================================

/// Parameters used to create a window.
///
/// # Default Values
///
/// - **Title**: `"Wither Engine"`
/// - **Size**: 1280 x 720
///
/// # Examples
///
/// ```
/// use wither_engine::core::window::WindowProps;
///
/// let props = WindowProps::new("Sandbox", 800, 600);
/// assert_eq!(props.width, 800);
///
/// let props = WindowProps::default().with_title("Editor");
/// assert_eq!(props.height, 720);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowProps {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl WindowProps {
    /// Creates window props.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero.
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self::default().with_title(title).with_size(width, height)
    }

    /// Replaces the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Replaces the window size.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "Window dimensions must be positive, got {}x{}",
            width,
            height
        );
        self.width = width;
        self.height = height;
        self
    }
}

impl Default for WindowProps {
    fn default() -> Self {
        Self {
            title: "Wither Engine".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

//=== Window ==============================================================

/// Platform window owned by the engine.
///
/// # Lifecycle
///
/// 1. **Construction**: `platform::create_window(&props)`
/// 2. **Configuration**: `set_event_callback`, `set_vsync`
/// 3. **Frame loop**: `on_update()` once per frame
/// 4. **Shutdown**: drop the window
///
/// All methods must be called on the thread that created the window; the
/// graphics context is bound to it.
pub trait Window {
    /// Drains pending native events (dispatching them to the event
    /// callback) and presents the rendered frame.
    fn on_update(&mut self);

    /// Current client area width in pixels.
    fn width(&self) -> u32;

    /// Current client area height in pixels.
    fn height(&self) -> u32;

    /// Window title.
    fn title(&self) -> String;

    /// Installs the function receiving every translated event.
    fn set_event_callback(&mut self, callback: EventCallback);

    /// Enables (swap interval 1) or disables (swap interval 0) v-sync.
    fn set_vsync(&mut self, enabled: bool);

    /// Returns the last v-sync state set through [`Window::set_vsync`].
    fn is_vsync(&self) -> bool;
}

//=========================================================================
// Unit Tests
//=========================================================================
