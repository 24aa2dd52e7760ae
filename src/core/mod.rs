//=========================================================================
// Core Engine Types
//
// Platform-independent vocabulary shared by the engine and every window
// implementation.
//
// Responsibilities:
// - Define the engine event model (`Event`, `EventType`, `EventCategory`)
// - Define the abstract window contract (`Window`, `WindowProps`)
// - Queue events between the window callback and the frame loop
//
// Notes:
// Nothing in here talks to the OS. Platform code in `crate::platform`
// produces `Event`s; application code consumes them.
//
//=========================================================================

pub mod event;
pub mod event_queue;
pub mod window;

//=== Public API ==========================================================

pub use event::{Event, EventCategory, EventType, KeyCode, MouseButton};
pub use event_queue::{EventCollector, TickControl};
pub use window::{EventCallback, Window, WindowProps};
