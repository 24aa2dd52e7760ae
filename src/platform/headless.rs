//=========================================================================
// Headless Backend
//=========================================================================
//
// In-memory `NativeBackend` used by the unit tests.
//
// Windows are plain records; native events are injected by the test and
// returned from `poll_events`, and every side-effecting call is counted so
// tests can assert on native traffic (swaps, swap intervals, ...).
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::{BTreeMap, HashSet, VecDeque};

//=== Internal Dependencies ===============================================

use super::native::{
    ErrorCallback, NativeBackend, NativeEvent, NativeEventKind, NativeHandle, WindowDataRef,
};
use super::PlatformError;
use crate::core::window::WindowProps;

//=== HeadlessWindow ======================================================

#[derive(Default)]
pub(crate) struct HeadlessWindow {
    pub(crate) title: String,
    pub(crate) size: (u32, u32),
    pub(crate) user_pointer: Option<WindowDataRef>,
    pub(crate) polling: HashSet<NativeEventKind>,
    pub(crate) context_current: bool,
    pub(crate) gl_loaded: bool,
    pub(crate) swap_interval: Option<u32>,
    pub(crate) swap_count: usize,
}

//=== TeardownCall ========================================================

/// Window-lifetime calls, in the order the backend received them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TeardownCall {
    ClearUserPointer(NativeHandle),
    DestroyWindow(NativeHandle),
}

//=== HeadlessBackend =====================================================

#[derive(Default)]
pub(crate) struct HeadlessBackend {
    windows: BTreeMap<NativeHandle, HeadlessWindow>,
    pending: VecDeque<(NativeHandle, NativeEvent)>,
    error_callback: Option<ErrorCallback>,
    next_id: u64,

    init_calls: usize,
    swap_interval_calls: usize,
    destroyed: Vec<NativeHandle>,
    teardown: Vec<TeardownCall>,

    fail_init: bool,
    fail_create: bool,
    fail_make_current: bool,
    fail_gl_load: bool,
}

impl HeadlessBackend {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    pub(crate) fn fail_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub(crate) fn fail_make_current(mut self) -> Self {
        self.fail_make_current = true;
        self
    }

    pub(crate) fn fail_gl_load(mut self) -> Self {
        self.fail_gl_load = true;
        self
    }

    //--- Simulation -------------------------------------------------------

    /// Queues a native event for the next `poll_events`.
    pub(crate) fn inject(&mut self, handle: NativeHandle, event: NativeEvent) {
        self.pending.push_back((handle, event));
    }

    /// Reports an asynchronous native error through the error callback.
    pub(crate) fn raise_error(&mut self, code: i32, description: &str) {
        if let Some(callback) = self.error_callback.as_mut() {
            callback(code, description);
        }
    }

    pub(crate) fn enable_all(&mut self, handle: NativeHandle) {
        for kind in NativeEventKind::ALL {
            self.set_event_polling(handle, kind, true);
        }
    }

    //--- Inspection -------------------------------------------------------

    pub(crate) fn window(&self, handle: NativeHandle) -> Option<&HeadlessWindow> {
        self.windows.get(&handle)
    }

    pub(crate) fn init_calls(&self) -> usize {
        self.init_calls
    }

    pub(crate) fn swap_interval_calls(&self) -> usize {
        self.swap_interval_calls
    }

    pub(crate) fn has_error_callback(&self) -> bool {
        self.error_callback.is_some()
    }

    pub(crate) fn destroyed(&self) -> &[NativeHandle] {
        &self.destroyed
    }

    pub(crate) fn teardown(&self) -> &[TeardownCall] {
        &self.teardown
    }
}

//=== NativeBackend =======================================================

impl NativeBackend for HeadlessBackend {
    fn init(&mut self) -> Result<(), PlatformError> {
        self.init_calls += 1;
        if self.fail_init {
            return Err(PlatformError::Init("no display available".into()));
        }
        Ok(())
    }

    fn set_error_callback(&mut self, callback: ErrorCallback) {
        self.error_callback = Some(callback);
    }

    fn create_window(&mut self, props: &WindowProps) -> Result<NativeHandle, PlatformError> {
        if self.fail_create {
            return Err(PlatformError::WindowCreation("no matching GL config".into()));
        }

        self.next_id += 1;
        let handle = NativeHandle(self.next_id);
        self.windows.insert(handle, HeadlessWindow {
            title: props.title.clone(),
            size: (props.width, props.height),
            ..HeadlessWindow::default()
        });
        Ok(handle)
    }

    fn destroy_window(&mut self, handle: NativeHandle) {
        self.teardown.push(TeardownCall::DestroyWindow(handle));
        if self.windows.remove(&handle).is_some() {
            self.destroyed.push(handle);
        }
        self.pending.retain(|(h, _)| *h != handle);
    }

    fn make_context_current(&mut self, handle: NativeHandle) -> Result<(), PlatformError> {
        if self.fail_make_current {
            return Err(PlatformError::ContextCurrent("BadAccess".into()));
        }
        for (h, window) in self.windows.iter_mut() {
            window.context_current = *h == handle;
        }
        if !self.windows.contains_key(&handle) {
            return Err(PlatformError::UnknownHandle(handle));
        }
        Ok(())
    }

    fn load_gl_functions(&mut self, handle: NativeHandle) -> Result<(), PlatformError> {
        if self.fail_gl_load {
            return Err(PlatformError::GlLoad("glViewport not found".into()));
        }
        let window = self.windows.get_mut(&handle).ok_or(PlatformError::UnknownHandle(handle))?;
        window.gl_loaded = true;
        Ok(())
    }

    fn set_user_pointer(&mut self, handle: NativeHandle, data: Option<WindowDataRef>) {
        if data.is_none() {
            self.teardown.push(TeardownCall::ClearUserPointer(handle));
        }
        if let Some(window) = self.windows.get_mut(&handle) {
            window.user_pointer = data;
        }
    }

    fn user_pointer(&self, handle: NativeHandle) -> Option<WindowDataRef> {
        self.windows.get(&handle).and_then(|w| w.user_pointer.clone())
    }

    fn set_event_polling(&mut self, handle: NativeHandle, kind: NativeEventKind, enabled: bool) {
        if let Some(window) = self.windows.get_mut(&handle) {
            if enabled {
                window.polling.insert(kind);
            } else {
                window.polling.remove(&kind);
            }
        }
    }

    fn set_swap_interval(&mut self, handle: NativeHandle, interval: u32) {
        self.swap_interval_calls += 1;
        if let Some(window) = self.windows.get_mut(&handle) {
            window.swap_interval = Some(interval);
        }
    }

    fn poll_events(&mut self, sink: &mut dyn FnMut(NativeHandle, NativeEvent)) {
        while let Some((handle, event)) = self.pending.pop_front() {
            let enabled = self
                .windows
                .get(&handle)
                .is_some_and(|w| w.polling.contains(&event.kind()));
            if enabled {
                sink(handle, event);
            }
        }
    }

    fn swap_buffers(&mut self, handle: NativeHandle) {
        if let Some(window) = self.windows.get_mut(&handle) {
            window.swap_count += 1;
        }
    }
}
