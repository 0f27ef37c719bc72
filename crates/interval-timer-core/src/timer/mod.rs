mod clock;
mod engine;
mod phase;

pub use clock::IntervalClock;
pub use engine::{IntervalStateMachine, RunState, TimerSnapshot};
pub use phase::{ActivePhase, Phase, PhaseConfig};
