//! Running a delivery agent through a world
//!
//! - `agent`: the agent's mutable state
//! - `stepper`: the decide / plan / move state machine
//! - `metrics`: score, step and delivery counters plus the result record
//! - `events`: what happened, in order
//! - `observer`: read-only per-move hooks and the text renderer
//! - `output`: result sinks (CSV, JSON lines, memory)

pub mod agent;
pub mod events;
pub mod metrics;
pub mod observer;
pub mod output;
pub mod stepper;

pub use agent::Agent;
pub use events::{EventKind, EventLog, SimEvent};
pub use metrics::{Outcome, RunMetrics, RunResult, RunSummary};
pub use observer::{render_frame, NullObserver, Snapshot, StepObserver, TracingObserver};
pub use output::{CsvFileSink, JsonLinesSink, MemorySink, ResultSink};
pub use stepper::{Phase, Simulation};
