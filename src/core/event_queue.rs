//=========================================================================
// Event Queue
//=========================================================================
//
// Engine-side collection of window events with bounded draining and
// shutdown detection.
//
// Architecture:
//   EventCallback → Sender<Event> → Receiver<Event> → collect_frame()
//                                                    → events + TickControl
//
// Bounded draining keeps one flood of input from stalling a frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use crate::core::event::Event;

//=== TickControl =========================================================

/// Main loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Collects the events queued during a frame.
pub struct EventCollector {
    receiver: Receiver<Event>,
    events: Vec<Event>,
}

impl EventCollector {
    /// Upper bound of events drained by one `collect_frame` call.
    pub const MAX_EVENTS_PER_FRAME: usize = 100;

    pub fn new(receiver: Receiver<Event>) -> Self {
        Self {
            receiver,
            events: Vec::with_capacity(16),
        }
    }

    /// Drains pending events (bounded) into the frame buffer.
    ///
    /// Returns [`TickControl::Exit`] when a `WindowClose` event is seen or
    /// every sender is gone. Events queued before the close event are kept
    /// so the caller can still handle them.
    pub fn collect_frame(&mut self) -> TickControl {
        self.events.clear();

        while self.events.len() < Self::MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    let closing = matches!(event, Event::WindowClose);
                    self.events.push(event);
                    if closing {
                        return TickControl::Exit;
                    }
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => return TickControl::Continue,
            }
        }

        warn!(
            target: "engine",
            "Event queue backlog: drained {} events this frame",
            self.events.len()
        );

        TickControl::Continue
    }

    /// Returns the events collected for this frame.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Takes ownership of the collected events, leaving an empty buffer.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
