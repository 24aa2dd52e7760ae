//=========================================================================
// Wither Engine Sandbox
//
// Opens one window and logs every engine event it produces. Close the
// window to exit.
//
// Run with `RUST_LOG=debug` to also see platform diagnostics.
//
//=========================================================================

use env_logger::{Builder, Env};
use log::{debug, info};

use wither_engine::prelude::*;

fn main() {
    Builder::from_env(Env::default().default_filter_or("info")).init();

    let engine = EngineBuilder::new()
        .with_title("Wither Sandbox")
        .with_size(1280, 720)
        .build();

    engine.run(|event| {
        if event.is_in_category(EventCategory::MOUSE) && !event.is_in_category(EventCategory::MOUSE_BUTTON) {
            // Cursor and wheel traffic is noisy
            debug!(target: "sandbox", "{}", event);
        } else {
            info!(target: "sandbox", "{}", event);
        }
    });
}
