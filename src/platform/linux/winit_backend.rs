//=========================================================================
// Winit Backend
//=========================================================================
//
// `NativeBackend` built on winit (windows, input) and glutin (OpenGL
// contexts, swap control), with the `gl` crate as function loader.
//
// Architecture:
// ```text
//  init()          → EventLoop (any thread)
//  create_window() → glutin-winit DisplayBuilder → Window + Config
//                    → NotCurrentContext + Surface<WindowSurface>
//  make_current()  → PossiblyCurrentContext
//  poll_events()   → pump_app_events(0ms) → WindowEvent → NativeEvent
//  swap_buffers()  → Surface::swap_buffers
// ```
//
// Native failures after creation (swap, swap interval, surface resize) are
// reported through the error callback and never interrupt the frame.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::{HashMap, HashSet};
use std::ffi::CString;
use std::num::NonZeroU32;
use std::time::Duration;

//=== External Dependencies ===============================================

use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{ContextAttributesBuilder, NotCurrentContext, PossiblyCurrentContext};
use glutin::display::{Display, GetGlDisplay};
use glutin::prelude::*;
use glutin::surface::{Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use log::{debug, trace, warn};
use raw_window_handle::HasWindowHandle;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::platform::x11::EventLoopBuilderExtX11;
use winit::window::{Window as WinitWindow, WindowId};

//=== Internal Dependencies ===============================================

use super::input_mapping::native_event;
use crate::core::window::WindowProps;
use crate::platform::native::{
    ErrorCallback, NativeBackend, NativeEvent, NativeEventKind, NativeHandle, WindowDataRef,
};
use crate::platform::{NativeError, PlatformError};

//=== Error Codes =========================================================

/// Codes passed to the error callback for failures glutin reports without
/// a raw platform code.
const ERROR_NOT_CURRENT: i32 = 0x0001_0001;
const ERROR_SWAP_INTERVAL: i32 = 0x0001_0002;
const ERROR_SWAP_BUFFERS: i32 = 0x0001_0003;
const ERROR_SURFACE_RESIZE: i32 = 0x0001_0004;

//=== GlContext ===========================================================

enum GlContext {
    NotCurrent(NotCurrentContext),
    Current(PossiblyCurrentContext),

    /// Context consumed by a failed `make_current`.
    Lost,
}

//=== NativeWindow ========================================================

// Field order is drop order: context, then surface, then the OS window.
struct NativeWindow {
    context: GlContext,
    surface: Surface<WindowSurface>,
    display: Display,
    window: WinitWindow,
    user_pointer: Option<WindowDataRef>,
    polling: HashSet<NativeEventKind>,
}

//=== WinitBackend ========================================================

/// Native windowing over winit + glutin.
///
/// One instance owns the process' winit event loop; every window created
/// through it shares that loop, and `poll_events` drains all of them.
pub struct WinitBackend {
    event_loop: Option<EventLoop<()>>,
    windows: HashMap<NativeHandle, NativeWindow>,
    ids: HashMap<WindowId, NativeHandle>,
    error_callback: Option<ErrorCallback>,
    next_id: u64,
}

impl WinitBackend {
    pub fn new() -> Self {
        Self {
            event_loop: None,
            windows: HashMap::new(),
            ids: HashMap::new(),
            error_callback: None,
            next_id: 0,
        }
    }

    fn window_mut(&mut self, handle: NativeHandle) -> Result<&mut NativeWindow, PlatformError> {
        self.windows
            .get_mut(&handle)
            .ok_or(PlatformError::UnknownHandle(handle))
    }
}

impl Default for WinitBackend {
    fn default() -> Self {
        Self::new()
    }
}

//--- Error Reporting -----------------------------------------------------

fn report(callback: &mut Option<ErrorCallback>, fallback_code: i32, error: &glutin::error::Error) {
    let code = error
        .raw_code()
        .and_then(|code| i32::try_from(code).ok())
        .unwrap_or(fallback_code);
    report_message(callback, code, &error.to_string());
}

fn report_message(callback: &mut Option<ErrorCallback>, code: i32, description: &str) {
    match callback.as_mut() {
        Some(callback) => callback(code, description),
        None => warn!(target: "platform", "Unreported native error ({}): {}", code, description),
    }
}

fn creation(error: impl Into<NativeError>) -> PlatformError {
    PlatformError::WindowCreation(error.into())
}

//--- Config Selection ----------------------------------------------------

/// Picks the config with the most multisample buffers.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|best, config| {
            if config.num_samples() > best.num_samples() {
                config
            } else {
                best
            }
        })
        .expect("glutin reports an error instead of an empty config list")
}

//=== NativeBackend =======================================================

impl NativeBackend for WinitBackend {
    fn init(&mut self) -> Result<(), PlatformError> {
        let mut builder = EventLoop::builder();
        // The GL context lives on whichever thread creates the first window
        EventLoopBuilderExtX11::with_any_thread(&mut builder, true);

        let event_loop = builder
            .build()
            .map_err(|e| PlatformError::Init(Box::new(e)))?;

        debug!(target: "platform", "Winit event loop created");
        self.event_loop = Some(event_loop);
        Ok(())
    }

    fn set_error_callback(&mut self, callback: ErrorCallback) {
        self.error_callback = Some(callback);
    }

    fn create_window(&mut self, props: &WindowProps) -> Result<NativeHandle, PlatformError> {

        let event_loop = self
            .event_loop
            .as_ref()
            .ok_or_else(|| creation("windowing system not initialized"))?;

        let attributes = WinitWindow::default_attributes()
            .with_title(props.title.clone())
            .with_inner_size(PhysicalSize::new(props.width, props.height));

        let template = ConfigTemplateBuilder::new().with_alpha_size(8);
        let (window, config) = DisplayBuilder::new()
            .with_window_attributes(Some(attributes))
            .build(event_loop, template, pick_config)
            .map_err(creation)?;
        let window = window.ok_or_else(|| creation("display builder returned no window"))?;

        let raw_handle = window.window_handle().map_err(creation)?.as_raw();
        let display = config.display();

        let context_attributes = ContextAttributesBuilder::new().build(Some(raw_handle));
        let context = unsafe { display.create_context(&config, &context_attributes) }
            .map_err(creation)?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .map_err(creation)?;
        let surface = unsafe { display.create_window_surface(&config, &surface_attributes) }
            .map_err(creation)?;

        self.next_id += 1;
        let handle = NativeHandle(self.next_id);

        debug!(
            target: "platform",
            "Native window {} created: {}x{} @ {}x DPI, {} samples",
            handle,
            window.inner_size().width,
            window.inner_size().height,
            window.scale_factor(),
            config.num_samples()
        );

        self.ids.insert(window.id(), handle);
        self.windows.insert(handle, NativeWindow {
            context: GlContext::NotCurrent(context),
            surface,
            display,
            window,
            user_pointer: None,
            polling: HashSet::new(),
        });

        Ok(handle)
    }

    fn destroy_window(&mut self, handle: NativeHandle) {
        if let Some(native) = self.windows.remove(&handle) {
            self.ids.remove(&native.window.id());
            debug!(target: "platform", "Native window {} destroyed", handle);
        }
    }

    fn make_context_current(&mut self, handle: NativeHandle) -> Result<(), PlatformError> {
        let native = self.window_mut(handle)?;
        let current = |e: glutin::error::Error| PlatformError::ContextCurrent(Box::new(e));

        native.context = match std::mem::replace(&mut native.context, GlContext::Lost) {
            GlContext::NotCurrent(context) => {
                GlContext::Current(context.make_current(&native.surface).map_err(current)?)
            }
            GlContext::Current(context) => {
                context.make_current(&native.surface).map_err(current)?;
                GlContext::Current(context)
            }
            GlContext::Lost => {
                return Err(PlatformError::ContextCurrent("context lost".into()));
            }
        };

        Ok(())
    }

    fn load_gl_functions(&mut self, handle: NativeHandle) -> Result<(), PlatformError> {
        let native = self.window_mut(handle)?;
        let display = &native.display;

        gl::load_with(|symbol| match CString::new(symbol) {
            Ok(symbol) => display.get_proc_address(symbol.as_c_str()).cast(),
            Err(_) => std::ptr::null(),
        });

        if !gl::Viewport::is_loaded() {
            return Err(PlatformError::GlLoad("glViewport could not be resolved".into()));
        }

        trace!(target: "platform", "GL function pointers loaded for window {}", handle);
        Ok(())
    }

    fn set_user_pointer(&mut self, handle: NativeHandle, data: Option<WindowDataRef>) {
        if let Some(native) = self.windows.get_mut(&handle) {
            native.user_pointer = data;
        }
    }

    fn user_pointer(&self, handle: NativeHandle) -> Option<WindowDataRef> {
        self.windows.get(&handle).and_then(|native| native.user_pointer.clone())
    }

    fn set_event_polling(&mut self, handle: NativeHandle, kind: NativeEventKind, enabled: bool) {
        if let Some(native) = self.windows.get_mut(&handle) {
            if enabled {
                native.polling.insert(kind);
            } else {
                native.polling.remove(&kind);
            }
        }
    }

    fn set_swap_interval(&mut self, handle: NativeHandle, interval: u32) {
        let Some(native) = self.windows.get_mut(&handle) else {
            return;
        };

        let interval = match NonZeroU32::new(interval) {
            Some(frames) => SwapInterval::Wait(frames),
            None => SwapInterval::DontWait,
        };

        match &native.context {
            GlContext::Current(context) => {
                if let Err(e) = native.surface.set_swap_interval(context, interval) {
                    report(&mut self.error_callback, ERROR_SWAP_INTERVAL, &e);
                }
            }
            _ => report_message(
                &mut self.error_callback,
                ERROR_NOT_CURRENT,
                "Cannot set swap interval: context is not current",
            ),
        }
    }

    fn poll_events(&mut self, sink: &mut dyn FnMut(NativeHandle, NativeEvent)) {
        let Some(event_loop) = self.event_loop.as_mut() else {
            return;
        };

        let mut collector = PumpCollector {
            windows: &mut self.windows,
            ids: &self.ids,
            error_callback: &mut self.error_callback,
            sink,
        };

        if let PumpStatus::Exit(code) = event_loop.pump_app_events(Some(Duration::ZERO), &mut collector) {
            warn!(target: "platform", "Event loop exited with code {}", code);
        }
    }

    fn swap_buffers(&mut self, handle: NativeHandle) {
        let Some(native) = self.windows.get_mut(&handle) else {
            return;
        };

        let GlContext::Current(context) = &native.context else {
            report_message(
                &mut self.error_callback,
                ERROR_NOT_CURRENT,
                "Cannot swap buffers: context is not current",
            );
            return;
        };

        // Several windows share the thread; rebind before presenting
        if !context.is_current() {
            if let Err(e) = context.make_current(&native.surface) {
                report(&mut self.error_callback, ERROR_NOT_CURRENT, &e);
                return;
            }
        }

        if let Err(e) = native.surface.swap_buffers(context) {
            report(&mut self.error_callback, ERROR_SWAP_BUFFERS, &e);
        }
    }
}

//=== PumpCollector =======================================================

/// Winit application handler used for a single `pump_app_events` call.
///
/// Translates window events into native payloads and forwards those whose
/// callback kind is enabled for their window.
struct PumpCollector<'a, F: FnMut(NativeHandle, NativeEvent) + ?Sized> {
    windows: &'a mut HashMap<NativeHandle, NativeWindow>,
    ids: &'a HashMap<WindowId, NativeHandle>,
    error_callback: &'a mut Option<ErrorCallback>,
    sink: &'a mut F,
}

impl<F: FnMut(NativeHandle, NativeEvent) + ?Sized> PumpCollector<'_, F> {
    fn resize_surface(&mut self, handle: NativeHandle, size: PhysicalSize<u32>) {
        let Some(native) = self.windows.get(&handle) else {
            return;
        };
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
            // Minimized: nothing to resize
            return;
        };
        if let GlContext::Current(context) = &native.context {
            native.surface.resize(context, width, height);
        } else {
            report_message(
                self.error_callback,
                ERROR_SURFACE_RESIZE,
                "Cannot resize surface: context is not current",
            );
        }
    }
}

impl<F: FnMut(NativeHandle, NativeEvent) + ?Sized> ApplicationHandler for PumpCollector<'_, F> {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {
        // Windows are created eagerly by the adapter, nothing to do here
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(&handle) = self.ids.get(&window_id) else {
            return;
        };

        if let WindowEvent::Resized(size) = &event {
            self.resize_surface(handle, *size);
        }

        let Some(native_event) = native_event(&event) else {
            return;
        };

        let enabled = self
            .windows
            .get(&handle)
            .is_some_and(|native| native.polling.contains(&native_event.kind()));

        if enabled {
            (self.sink)(handle, native_event);
        } else {
            trace!(
                target: "platform::input",
                "Polling disabled for {:?} on window {}",
                native_event.kind(),
                handle
            );
        }
    }
}
