pub mod emitter;
pub mod events;
pub mod instance_id;

pub use emitter::{HttpEmitter, LogEmitter, TelemetryEmitter};
pub use events::{transition_event, ConsentEvent, EventKind};
