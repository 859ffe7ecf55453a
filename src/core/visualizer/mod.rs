//! Algorithm step visualizer: step data, highlighting policy, playback
//! clock and the replay state machine.

pub mod clock;
pub mod marks;
pub mod replay;
pub mod step;

pub use clock::{Clock, ManualClock, ScheduledTask, SystemClock};
pub use marks::{ElementMark, MarkSet};
pub use replay::{ReplayEvent, ReplayOutcome, ReplayState, VisualizationKind};
pub use step::{Step, Value};
