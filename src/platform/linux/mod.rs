//=========================================================================
// Linux Window
//
// Window adapter owning one native window + GL context and translating
// its callbacks into engine events.
//
// Architecture:
// ```text
//  Engine ──► LinuxWindow ──► Windowing<B> ──► NativeBackend (winit+glutin)
//                 │                                  │
//                 │  Rc<RefCell<WindowData>>         │ user pointer (Weak)
//                 └──────────────◄───────────────────┘
//
//  on_update():
//    1. poll_events()  → (WindowDataRef, NativeEvent)*
//    2. dispatch()     → Event → EventCallback       (per event)
//    3. swap_buffers()                                (once)
// ```
//
// Key Design Decisions:
// - **Back-reference, not lookup**: the native handle stores a weak
//   pointer to the state record; callbacks reach their window only
//   through it, so several windows never see each other's events
// - **Borrow released before callbacks**: the subsystem borrow ends before
//   engine callbacks run, so a callback may create further windows
// - **Fatal environment errors**: a missing display or GL driver has no
//   recovery path; `create` logs and panics, `try_create` exposes the error
//
//=========================================================================

//=== Submodules ==========================================================

mod input_mapping;
mod winit_backend;

pub use winit_backend::WinitBackend;

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::rc::Rc;

//=== External Crates =====================================================

use log::{debug, error, info};

//=== Internal Imports ====================================================

use super::dispatch::{dispatch, WindowData};
use super::native::{NativeBackend, NativeEventKind, NativeHandle};
use super::windowing::SharedWindowing;
use super::PlatformError;
use crate::core::window::{EventCallback, Window, WindowProps};

//=== LinuxWindow =========================================================

/// Window adapter over a [`NativeBackend`].
///
/// # Lifecycle
///
/// 1. **Construction**: `LinuxWindow::create(windowing, &props)`
/// 2. **Frame loop**: `on_update()` once per frame
/// 3. **Shutdown**: drop; the native window is destroyed, the windowing
///    subsystem stays initialized
///
/// # Thread Safety
///
/// Not `Send`: the GL context is bound to the creating thread.
pub struct LinuxWindow<B: NativeBackend> {
    windowing: SharedWindowing<B>,
    handle: NativeHandle,
    data: Rc<RefCell<WindowData>>,
}

impl<B: NativeBackend> LinuxWindow<B> {
    //--- Construction -----------------------------------------------------

    /// Creates the window, aborting on environment failure.
    ///
    /// # Panics
    ///
    /// Panics if the windowing system cannot be initialized, the window or
    /// its GL context cannot be created, or GL functions cannot be loaded.
    pub fn create(windowing: SharedWindowing<B>, props: &WindowProps) -> Self {
        match Self::try_create(windowing, props) {
            Ok(window) => window,
            Err(e) => {
                error!(target: "platform", "{}", e);
                panic!("{} ({})", e.fatal_message(), e);
            }
        }
    }

    /// Creates the window, returning environment failures as errors.
    ///
    /// # Errors
    ///
    /// - [`PlatformError::Init`]: windowing system initialization failed
    /// - [`PlatformError::WindowCreation`]: window or GL context failed
    /// - [`PlatformError::ContextCurrent`]: context could not be bound
    /// - [`PlatformError::GlLoad`]: GL function pointers missing
    pub fn try_create(
        windowing: SharedWindowing<B>,
        props: &WindowProps,
    ) -> Result<Self, PlatformError> {
        info!(
            target: "platform",
            "Creating window {} ({}, {})",
            props.title,
            props.width,
            props.height
        );

        let data = Rc::new(RefCell::new(WindowData::new(props)));

        let handle = {
            let mut subsystem = windowing.borrow_mut();
            subsystem.ensure_initialized()?;

            let backend = subsystem.backend_mut();
            let handle = backend.create_window(props)?;

            if let Err(e) = Self::bind_context(backend, handle) {
                backend.destroy_window(handle);
                return Err(e);
            }

            // Back-reference first: no callback may fire without it
            backend.set_user_pointer(handle, Some(Rc::downgrade(&data)));
            for kind in NativeEventKind::ALL {
                backend.set_event_polling(handle, kind, true);
            }

            handle
        };

        debug!(target: "platform", "Window {} ready", handle);

        Ok(Self { windowing, handle, data })
    }

    fn bind_context(backend: &mut B, handle: NativeHandle) -> Result<(), PlatformError> {
        backend.make_context_current(handle)?;
        backend.load_gl_functions(handle)
    }

    //--- Accessors --------------------------------------------------------

    /// Native handle of this window.
    pub fn handle(&self) -> NativeHandle {
        self.handle
    }

    /// Windowing subsystem this window was created on.
    pub fn windowing(&self) -> &SharedWindowing<B> {
        &self.windowing
    }
}

//=== Window ==============================================================

impl<B: NativeBackend> Window for LinuxWindow<B> {
    fn on_update(&mut self) {
        let pending = self.windowing.borrow_mut().poll_events();

        for (data, event) in pending {
            if let Some(data) = data.upgrade() {
                dispatch(&mut data.borrow_mut(), event);
            }
        }

        self.windowing.borrow_mut().backend_mut().swap_buffers(self.handle);
    }

    fn width(&self) -> u32 {
        self.data.borrow().width
    }

    fn height(&self) -> u32 {
        self.data.borrow().height
    }

    fn title(&self) -> String {
        self.data.borrow().title.clone()
    }

    fn set_event_callback(&mut self, callback: EventCallback) {
        self.data.borrow_mut().event_callback = Some(callback);
    }

    fn set_vsync(&mut self, enabled: bool) {
        let interval = if enabled { 1 } else { 0 };
        self.windowing
            .borrow_mut()
            .backend_mut()
            .set_swap_interval(self.handle, interval);

        self.data.borrow_mut().vsync = enabled;
        debug!(target: "platform", "Window {} v-sync: {}", self.handle, enabled);
    }

    fn is_vsync(&self) -> bool {
        self.data.borrow().vsync
    }
}

//=== Drop ================================================================

impl<B: NativeBackend> Drop for LinuxWindow<B> {
    fn drop(&mut self) {
        let mut subsystem = self.windowing.borrow_mut();
        let backend = subsystem.backend_mut();

        backend.set_user_pointer(self.handle, None);
        backend.destroy_window(self.handle);

        info!(target: "platform", "Window {} destroyed", self.handle);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::{Event, KeyCode, MouseButton};
    use crate::platform::headless::{HeadlessBackend, TeardownCall};
    use crate::platform::native::{InputAction, NativeEvent};
    use crate::platform::windowing::Windowing;

    //--- Test Helpers -----------------------------------------------------

    type Recorded = Rc<RefCell<Vec<Event>>>;

    fn headless() -> SharedWindowing<HeadlessBackend> {
        Windowing::shared(HeadlessBackend::new())
    }

    fn recording(window: &mut LinuxWindow<HeadlessBackend>) -> Recorded {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        window.set_event_callback(Box::new(move |event: &Event| {
            sink.borrow_mut().push(event.clone());
        }));
        events
    }

    fn inject(window: &LinuxWindow<HeadlessBackend>, event: NativeEvent) {
        window.windowing().borrow_mut().backend_mut().inject(window.handle(), event);
    }

    fn swap_count(window: &LinuxWindow<HeadlessBackend>) -> usize {
        window
            .windowing()
            .borrow()
            .backend()
            .window(window.handle())
            .map(|w| w.swap_count)
            .unwrap_or(0)
    }

    //=====================================================================
    // Construction
    //=====================================================================

    #[test]
    fn create_reports_props_dimensions() {
        let window = LinuxWindow::create(headless(), &WindowProps::new("Sandbox", 800, 600));

        assert_eq!(window.width(), 800);
        assert_eq!(window.height(), 600);
        assert_eq!(window.title(), "Sandbox");
        assert!(!window.is_vsync());
    }

    #[test]
    fn create_prepares_native_window() {
        let window = LinuxWindow::create(headless(), &WindowProps::new("Ready", 320, 200));
        let subsystem = window.windowing().borrow();
        let native = subsystem.backend().window(window.handle()).expect("native window");

        assert_eq!(native.title, "Ready");
        assert_eq!(native.size, (320, 200));
        assert!(native.context_current, "Context must be bound to the thread");
        assert!(native.gl_loaded, "GL functions must be loaded");
        assert!(native.user_pointer.is_some(), "Back-reference must be set");
        assert_eq!(native.polling.len(), NativeEventKind::ALL.len());
    }

    #[test]
    fn windowing_initializes_once_for_many_windows() {
        let windowing = headless();
        let _a = LinuxWindow::create(windowing.clone(), &WindowProps::default());
        let _b = LinuxWindow::create(windowing.clone(), &WindowProps::default());

        assert!(windowing.borrow().is_initialized());
        assert_eq!(windowing.borrow().backend().init_calls(), 1);
    }

    #[test]
    fn try_create_surfaces_init_failure() {
        let windowing = Windowing::shared(HeadlessBackend::new().fail_init());
        let result = LinuxWindow::try_create(windowing.clone(), &WindowProps::default());

        assert!(matches!(result, Err(PlatformError::Init(_))));
        assert!(!windowing.borrow().is_initialized());
    }

    #[test]
    fn try_create_surfaces_window_failure() {
        let windowing = Windowing::shared(HeadlessBackend::new().fail_create());
        let result = LinuxWindow::try_create(windowing, &WindowProps::default());

        assert!(matches!(result, Err(PlatformError::WindowCreation(_))));
    }

    #[test]
    fn try_create_destroys_window_when_loader_fails() {
        let windowing = Windowing::shared(HeadlessBackend::new().fail_gl_load());
        let result = LinuxWindow::try_create(windowing.clone(), &WindowProps::default());

        assert!(matches!(result, Err(PlatformError::GlLoad(_))));
        assert_eq!(windowing.borrow().backend().destroyed().len(), 1);
    }

    #[test]
    #[should_panic(expected = "Failed to initialize windowing system!")]
    fn create_panics_on_init_failure() {
        let windowing = Windowing::shared(HeadlessBackend::new().fail_init());
        LinuxWindow::create(windowing, &WindowProps::default());
    }

    #[test]
    fn try_create_destroys_window_when_context_cannot_bind() {
        let windowing = Windowing::shared(HeadlessBackend::new().fail_make_current());
        let result = LinuxWindow::try_create(windowing.clone(), &WindowProps::default());

        assert!(matches!(result, Err(PlatformError::ContextCurrent(_))));
        let subsystem = windowing.borrow();
        assert_eq!(subsystem.backend().destroyed().len(), 1);
        assert!(subsystem.is_initialized());
    }

    #[test]
    #[should_panic(expected = "Failed to create window!")]
    fn create_panics_on_window_failure() {
        let windowing = Windowing::shared(HeadlessBackend::new().fail_create());
        LinuxWindow::create(windowing, &WindowProps::default());
    }

    #[test]
    #[should_panic(expected = "Failed to make GL context current!")]
    fn create_panics_on_context_failure() {
        let windowing = Windowing::shared(HeadlessBackend::new().fail_make_current());
        LinuxWindow::create(windowing, &WindowProps::default());
    }

    #[test]
    #[should_panic(expected = "Failed to initialize GL loader!")]
    fn create_panics_on_loader_failure() {
        let windowing = Windowing::shared(HeadlessBackend::new().fail_gl_load());
        LinuxWindow::create(windowing, &WindowProps::default());
    }

    //=====================================================================
    // Frame Update
    //=====================================================================

    #[test]
    fn update_without_events_only_swaps() {
        let mut window = LinuxWindow::create(headless(), &WindowProps::default());
        let events = recording(&mut window);

        window.on_update();

        assert!(events.borrow().is_empty());
        assert_eq!(swap_count(&window), 1);
    }

    #[test]
    fn update_swaps_once_per_frame() {
        let mut window = LinuxWindow::create(headless(), &WindowProps::default());
        inject(&window, NativeEvent::CursorPos { x: 1.0, y: 1.0 });
        inject(&window, NativeEvent::CursorPos { x: 2.0, y: 2.0 });

        window.on_update();
        window.on_update();

        assert_eq!(swap_count(&window), 2);
    }

    #[test]
    fn resize_updates_dimensions_and_emits_once() {
        let mut window = LinuxWindow::create(headless(), &WindowProps::new("R", 800, 600));
        let events = recording(&mut window);

        inject(&window, NativeEvent::SizeChanged { width: 1920, height: 1080 });
        window.on_update();

        assert_eq!((window.width(), window.height()), (1920, 1080));
        assert_eq!(*events.borrow(), vec![Event::WindowResize { width: 1920, height: 1080 }]);
    }

    #[test]
    fn key_repeat_differs_from_press() {
        let mut window = LinuxWindow::create(headless(), &WindowProps::default());
        let events = recording(&mut window);

        inject(&window, NativeEvent::Key { key: KeyCode::KeyA, action: InputAction::Press });
        inject(&window, NativeEvent::Key { key: KeyCode::KeyA, action: InputAction::Repeat });
        inject(&window, NativeEvent::Key { key: KeyCode::KeyA, action: InputAction::Release });
        window.on_update();

        assert_eq!(*events.borrow(), vec![
            Event::KeyPressed { key: KeyCode::KeyA, repeat_count: 0 },
            Event::KeyPressed { key: KeyCode::KeyA, repeat_count: 1 },
            Event::KeyReleased { key: KeyCode::KeyA },
        ]);
    }

    #[test]
    fn events_keep_native_order() {
        let mut window = LinuxWindow::create(headless(), &WindowProps::default());
        let events = recording(&mut window);

        inject(&window, NativeEvent::MouseButton {
            button: MouseButton::Left,
            action: InputAction::Press,
        });
        inject(&window, NativeEvent::Scroll { x_offset: 0.0, y_offset: 1.0 });
        inject(&window, NativeEvent::CloseRequested);
        window.on_update();

        let names: Vec<_> = events.borrow().iter().map(Event::name).collect();
        assert_eq!(names, ["MouseButtonPressed", "MouseScrolled", "WindowClose"]);
    }

    #[test]
    fn events_without_callback_are_ignored() {
        let mut window = LinuxWindow::create(headless(), &WindowProps::default());

        inject(&window, NativeEvent::Key { key: KeyCode::Space, action: InputAction::Press });
        inject(&window, NativeEvent::SizeChanged { width: 5, height: 6 });
        window.on_update();

        assert_eq!((window.width(), window.height()), (5, 6));
        assert_eq!(swap_count(&window), 1);
    }

    #[test]
    fn disabled_callback_kinds_are_not_delivered() {
        let mut window = LinuxWindow::create(headless(), &WindowProps::default());
        let events = recording(&mut window);
        window
            .windowing()
            .borrow_mut()
            .backend_mut()
            .set_event_polling(window.handle(), NativeEventKind::CursorPos, false);

        inject(&window, NativeEvent::CursorPos { x: 3.0, y: 4.0 });
        inject(&window, NativeEvent::CloseRequested);
        window.on_update();

        assert_eq!(*events.borrow(), vec![Event::WindowClose]);
    }

    //=====================================================================
    // V-Sync
    //=====================================================================

    #[test]
    fn vsync_round_trip() {
        let mut window = LinuxWindow::create(headless(), &WindowProps::default());

        window.set_vsync(true);
        assert!(window.is_vsync());
        assert_eq!(
            window.windowing().borrow().backend().window(window.handle()).unwrap().swap_interval,
            Some(1)
        );

        window.set_vsync(false);
        assert!(!window.is_vsync());
        assert_eq!(
            window.windowing().borrow().backend().window(window.handle()).unwrap().swap_interval,
            Some(0)
        );
    }

    #[test]
    fn is_vsync_makes_no_native_call() {
        let mut window = LinuxWindow::create(headless(), &WindowProps::default());
        window.set_vsync(true);
        let calls_before = window.windowing().borrow().backend().swap_interval_calls();

        for _ in 0..3 {
            assert!(window.is_vsync());
        }

        assert_eq!(window.windowing().borrow().backend().swap_interval_calls(), calls_before);
    }

    //=====================================================================
    // Multiple Windows
    //=====================================================================

    #[test]
    fn windows_receive_only_their_own_events() {
        let windowing = headless();
        let mut first = LinuxWindow::create(windowing.clone(), &WindowProps::new("A", 100, 100));
        let mut second = LinuxWindow::create(windowing.clone(), &WindowProps::new("B", 200, 200));
        let first_events = recording(&mut first);
        let second_events = recording(&mut second);

        inject(&first, NativeEvent::Key { key: KeyCode::KeyA, action: InputAction::Press });
        inject(&second, NativeEvent::SizeChanged { width: 300, height: 400 });
        inject(&first, NativeEvent::CursorPos { x: 7.0, y: 8.0 });

        // One poll drains both windows, like the native library does
        first.on_update();

        assert_eq!(*first_events.borrow(), vec![
            Event::KeyPressed { key: KeyCode::KeyA, repeat_count: 0 },
            Event::MouseMoved { x: 7.0, y: 8.0 },
        ]);
        assert_eq!(*second_events.borrow(), vec![Event::WindowResize { width: 300, height: 400 }]);
        assert_eq!((first.width(), first.height()), (100, 100));
        assert_eq!((second.width(), second.height()), (300, 400));
    }

    #[test]
    fn callback_may_create_another_window() {
        let windowing = headless();
        let mut window = LinuxWindow::create(windowing.clone(), &WindowProps::default());
        let spawned = Rc::new(RefCell::new(Vec::new()));

        let subsystem = windowing.clone();
        let sink = Rc::clone(&spawned);
        window.set_event_callback(Box::new(move |event: &Event| {
            if let Event::KeyPressed { .. } = event {
                let child = LinuxWindow::create(subsystem.clone(), &WindowProps::default());
                sink.borrow_mut().push(child);
            }
        }));

        inject(&window, NativeEvent::Key { key: KeyCode::KeyN, action: InputAction::Press });
        window.on_update();

        assert_eq!(spawned.borrow().len(), 1);
    }

    //=====================================================================
    // Destruction
    //=====================================================================

    #[test]
    fn drop_destroys_native_window_but_keeps_subsystem() {
        let windowing = headless();
        let window = LinuxWindow::create(windowing.clone(), &WindowProps::default());
        let handle = window.handle();

        drop(window);

        let subsystem = windowing.borrow();
        assert_eq!(subsystem.backend().destroyed(), &[handle]);
        assert!(subsystem.backend().window(handle).is_none());
        assert!(subsystem.is_initialized());
    }

    #[test]
    fn drop_clears_back_reference_before_destroying() {
        let windowing = headless();
        let window = LinuxWindow::create(windowing.clone(), &WindowProps::default());
        let handle = window.handle();

        drop(window);

        assert_eq!(windowing.borrow().backend().teardown(), &[
            TeardownCall::ClearUserPointer(handle),
            TeardownCall::DestroyWindow(handle),
        ]);
    }

    #[test]
    fn dropped_window_gets_no_events() {
        let windowing = headless();
        let mut survivor = LinuxWindow::create(windowing.clone(), &WindowProps::default());
        let doomed = LinuxWindow::create(windowing.clone(), &WindowProps::default());
        let survivor_events = recording(&mut survivor);

        inject(&doomed, NativeEvent::CloseRequested);
        drop(doomed);
        survivor.on_update();

        assert!(survivor_events.borrow().is_empty());
    }
}
