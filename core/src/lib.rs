pub mod health;
pub mod ledger;
pub mod metrics;
pub mod offset;
pub mod protocol;
pub mod selection;
pub mod stack;
pub mod style;
pub mod telemetry;

pub use ledger::{ArtifactLedger, NoteId, PinId};
pub use offset::{base_offset, CandidatePosition, ChromeCandidate};
pub use protocol::{Ack, Command, CommandRequest, StatsSnapshot};
pub use selection::{PlacementMode, SelectionMachine, SelectionState, Transition};
pub use stack::{slot_top, stack_tops, PIN_ROW_HEIGHT};
pub use style::{pinned_declarations, StyleSnapshot};
