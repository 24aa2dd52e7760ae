//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use wither_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};

// Events
pub use crate::core::event::{Event, EventCategory, EventType, KeyCode, MouseButton};

// Windows
pub use crate::core::window::{EventCallback, Window, WindowProps};

#[cfg(target_os = "linux")]
pub use crate::platform::create_window;
