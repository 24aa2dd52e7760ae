//=========================================================================
// Wither Engine
//
// Main entry point: configures the window and drives the frame loop.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run(handler)──>  [Frame Loop]
//         │                          │
//         ├─ with_title()            └─ creates window
//         ├─ with_size()                forwards events → channel
//         ├─ with_vsync()               on_update + collect + handler
//         └─ with_channel_capacity()    until WindowClose
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Sender, TrySendError};
use log::{info, warn};

//=== Internal Dependencies ===============================================

use crate::core::event::Event;
use crate::core::event_queue::{EventCollector, TickControl};
use crate::core::window::{Window, WindowProps};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Window**: `WindowProps::default()` ("Wither Engine", 1280 x 720)
/// - **V-sync**: enabled
/// - **Channel capacity**: 256 events
///
/// # Examples
///
/// ```no_run
/// use wither_engine::EngineBuilder;
/// use wither_engine::core::event::Event;
///
/// EngineBuilder::new()
///     .with_title("Sandbox")
///     .with_size(800, 600)
///     .build()
///     .run(|event: &Event| println!("{}", event));
/// ```
pub struct EngineBuilder {
    props: WindowProps,
    vsync: bool,
    channel_capacity: usize,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            props: WindowProps::default(),
            vsync: true,
            channel_capacity: 256,
        }
    }

    /// Sets the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.props = self.props.with_title(title);
        self
    }

    /// Sets the initial window size in pixels.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.props = self.props.with_size(width, height);
        self
    }

    /// Enables or disables v-sync for the main window.
    ///
    /// Default: `true`
    pub fn with_vsync(mut self, enabled: bool) -> Self {
        self.vsync = enabled;
        self
    }

    /// Sets the capacity of the window → engine event queue.
    ///
    /// Input events arriving while the queue is full are dropped with a
    /// warning. `WindowClose` is never dropped: one slot beyond the capacity
    /// is kept for it.
    ///
    /// Default: 256
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Builds the engine instance.
    pub fn build(self) -> Engine {
        info!(
            target: "engine",
            "Building engine (window: {} {}x{}, vsync: {}, channel: {})",
            self.props.title,
            self.props.width,
            self.props.height,
            self.vsync,
            self.channel_capacity
        );

        Engine {
            props: self.props,
            vsync: self.vsync,
            channel_capacity: self.channel_capacity,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Wither Engine runtime.
///
/// Owns the frame loop: every frame the window is updated (which polls
/// native events and presents), the events queued by the window callback
/// are collected and handed to the application handler. The loop ends on
/// the first `WindowClose` event.
pub struct Engine {
    props: WindowProps,
    vsync: bool,
    channel_capacity: usize,
}

impl Engine {
    /// Window props the engine will create its window with.
    pub fn props(&self) -> &WindowProps {
        &self.props
    }

    //--- Execution --------------------------------------------------------

    /// Creates the platform window and runs until it is closed.
    ///
    /// # Panics
    ///
    /// Panics if the window cannot be created (no display, no GL driver).
    #[cfg(target_os = "linux")]
    pub fn run<H>(self, handler: H)
    where
        H: FnMut(&Event),
    {
        let window = crate::platform::create_window(&self.props);
        self.run_with_window(window, handler);
    }

    /// Runs the frame loop on an existing window until it is closed.
    ///
    /// Returns the number of frames run.
    pub fn run_with_window<H>(self, mut window: Box<dyn Window>, mut handler: H) -> u64
    where
        H: FnMut(&Event),
    {
        info!(target: "engine", "Starting engine runtime");

        //--- 1. Configure the window --------------------------------------
        window.set_vsync(self.vsync);

        let capacity = self.channel_capacity;
        let (tx, rx) = bounded(capacity + 1);
        window.set_event_callback(Box::new(move |event: &Event| forward(&tx, capacity, event)));
        let mut collector = EventCollector::new(rx);

        //--- 2. Frame loop ------------------------------------------------
        let mut frames: u64 = 0;
        loop {
            window.on_update();
            frames += 1;

            let control = collector.collect_frame();
            for event in collector.events() {
                handler(event);
            }

            if control == TickControl::Exit {
                break;
            }
        }

        info!(target: "engine", "Engine shutdown after {} frames", frames);
        frames
    }
}

//--- Internal Helpers ----------------------------------------------------

/// Queues `event` unless `capacity` events are already waiting.
///
/// The channel holds one slot more than `capacity`; only `WindowClose` may
/// take it, so the exit signal always gets through.
fn forward(sender: &Sender<Event>, capacity: usize, event: &Event) {
    let closing = matches!(event, Event::WindowClose);
    if !closing && sender.len() >= capacity {
        warn!(target: "engine", "Event queue full, dropping {}", event);
        return;
    }

    match sender.try_send(event.clone()) {
        Ok(()) => {}
        Err(TrySendError::Full(event)) => {
            warn!(target: "engine", "Event queue full, dropping {}", event);
        }
        Err(TrySendError::Disconnected(_)) => {}
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
