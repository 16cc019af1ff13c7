//! Graceful degradation
//!
//! Tracks the health of the components the process hooks depend on (git,
//! configuration, the task tracker and its daemon) and maps them to one of
//! five operating levels. Features consult the level before running.

mod engine;
pub mod features;
pub mod level;
pub mod probes;
pub mod state;


pub use engine::{compute_level, DegradationEngine, StatusReport};
pub use features::{feature_available, max_level_for, FEATURES};
pub use level::DegradationLevel;
pub use probes::{default_probes, ConfigProbe, DaemonProbe, GitProbe, HealthProbe, TaskTrackerProbe};
pub use state::{ComponentId, HealthStatus, StateStore, SystemState};
