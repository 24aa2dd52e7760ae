//=========================================================================
// Wither Engine - Library Root
//
// This crate defines the public API surface of the Wither Engine.
//
// Responsibilities:
// - Expose the engine facade (`EngineBuilder`, `Engine`)
// - Expose the platform-independent window and event model (`core`)
// - Expose the platform layer for applications that drive windows
//   themselves (`platform::create_window`)
//
// Typical usage:
// ```no_run
// use wither_engine::EngineBuilder;
//
// fn main() {
//     EngineBuilder::new()
//         .with_title("Sandbox")
//         .build()
//         .run(|event| log::info!("{}", event));
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the event model and the `Window` contract.
//
// `platform` holds the native windowing layer: the backend seam, the
// shared windowing subsystem and the Linux window adapter.
//
pub mod core;
pub mod platform;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `engine` defines the builder and the frame loop.
//
mod engine;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
