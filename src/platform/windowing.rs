//=========================================================================
// Windowing Subsystem
//=========================================================================
//
// Process-wide owner of the native windowing library.
//
// The library is initialized lazily by the first window and never torn
// down or re-initialized afterwards. Initialization state is an explicit
// flag on [`Windowing`] rather than hidden static state, so the lifecycle
// is visible and testable.
//
// Lifecycle:
// ```text
//  Windowing::new ──ensure_initialized()──► initialized ──► (process exit)
//                        │  (no-op on later calls)
//                        └─ registers native error logging
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::OnceLock;
use std::thread::{self, ThreadId};

//=== External Dependencies ===============================================

use log::{debug, error, info};

//=== Internal Dependencies ===============================================

use super::native::{NativeBackend, NativeEvent, WindowDataRef};
use super::PlatformError;

//=== SharedWindowing =====================================================

/// Windowing subsystem shared by every window created on one thread.
pub type SharedWindowing<B> = Rc<RefCell<Windowing<B>>>;

//=== Windowing ===========================================================

/// Lazily-initialized wrapper around a [`NativeBackend`].
pub struct Windowing<B: NativeBackend> {
    backend: B,
    initialized: bool,
}

impl<B: NativeBackend> Windowing<B> {
    //--- Construction -----------------------------------------------------

    /// Wraps a backend without initializing it.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            initialized: false,
        }
    }

    /// Wraps a backend for sharing between windows.
    pub fn shared(backend: B) -> SharedWindowing<B> {
        Rc::new(RefCell::new(Self::new(backend)))
    }

    //--- Initialization ---------------------------------------------------

    /// Initializes the native library on first use.
    ///
    /// Registers native error logging, then initializes the backend. Later
    /// calls return `Ok(())` without touching the backend. A failed attempt
    /// leaves the subsystem uninitialized.
    pub fn ensure_initialized(&mut self) -> Result<(), PlatformError> {
        if self.initialized {
            return Ok(());
        }

        self.backend.set_error_callback(Box::new(log_native_error));
        self.backend.init()?;
        self.initialized = true;

        info!(target: "platform", "Windowing subsystem initialized");
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    //--- Backend Access ---------------------------------------------------

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    //--- Event Polling ----------------------------------------------------

    /// Drains every pending native event and pairs it with the state record
    /// of the window it belongs to.
    ///
    /// The record is found through the handle's back-reference. Events for
    /// windows without one (already dropped, or not yet wired) are skipped.
    pub(crate) fn poll_events(&mut self) -> Vec<(WindowDataRef, NativeEvent)> {
        let mut pending = Vec::new();
        self.backend.poll_events(&mut |handle, event| pending.push((handle, event)));

        pending
            .into_iter()
            .filter_map(|(handle, event)| match self.backend.user_pointer(handle) {
                Some(data) => Some((data, event)),
                None => {
                    debug!(
                        target: "platform::input",
                        "Dropping {:?} for window {} without state",
                        event.kind(),
                        handle
                    );
                    None
                }
            })
            .collect()
    }
}

//=== Native Error Logging ================================================

fn log_native_error(code: i32, description: &str) {
    error!(target: "platform", "Native windowing error ({}): {}", code, description);
}

//=== Default Instance ====================================================

/// Thread that owns the process' native windowing library.
#[cfg(target_os = "linux")]
static OWNER: OnceLock<ThreadId> = OnceLock::new();

#[cfg(target_os = "linux")]
thread_local! {
    static DEFAULT_WINDOWING: RefCell<Option<SharedWindowing<super::linux::WinitBackend>>> =
        const { RefCell::new(None) };
}

/// Returns the process' windowing subsystem over the winit backend,
/// creating it on first use.
///
/// The first caller's thread becomes the owner; the returned subsystem is
/// not yet initialized, the first window does that.
///
/// # Errors
///
/// [`PlatformError::WrongThread`] when called from any other thread. winit
/// allows a single event loop per process and GL contexts stay on the
/// thread that created them.
#[cfg(target_os = "linux")]
pub fn default_shared() -> Result<SharedWindowing<super::linux::WinitBackend>, PlatformError> {
    claim_owner(&OWNER, thread::current().id())?;

    Ok(DEFAULT_WINDOWING.with(|slot| {
        slot.borrow_mut()
            .get_or_insert_with(|| Windowing::shared(super::linux::WinitBackend::new()))
            .clone()
    }))
}

/// Records `caller` as owner on first use; rejects any other thread later.
fn claim_owner(owner: &OnceLock<ThreadId>, caller: ThreadId) -> Result<(), PlatformError> {
    let owner = *owner.get_or_init(|| caller);
    if owner != caller {
        return Err(PlatformError::WrongThread { owner, caller });
    }
    Ok(())
}

//=========================================================================
// Unit Tests
//=========================================================================
