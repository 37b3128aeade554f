pub mod config;
pub mod encoder;
pub mod particle;
pub mod physics;
pub mod physics_list;
pub mod process;
pub mod process_table;
pub mod sink;
pub mod species;
pub mod stepping;
pub mod tracking_cut;
pub mod units;

pub use config::{Config, ConfigError, PhysicsConfig, SteppingConfig};
pub use encoder::{StepData, StepPoint, StepRecord, StepRecordEncoder};
pub use particle::{ParticleDefinition, ParticleId, ParticleRef, ParticleTable};
pub use physics::{EmPreset, PhysicsConstructor};
pub use physics_list::{PhysicsList, PhysicsSettings, Selection};
pub use process::{reachable_categories, CategoryCode, Interaction, ProcessClassifier};
pub use process_table::{ProcessEntry, ProcessKind, ProcessTable, RegistrationError};
pub use sink::{Column, CsvSink, MemorySink, SinkError, TableSink};
pub use species::{ParticleClassifier, Species};
pub use stepping::{StepStats, SteppingAction, TrackStatus};
pub use tracking_cut::{CaptureRule, TrackingCut};

// Test helpers module (public for integration tests)
// Always compiled - integration tests are separate crates and need access
pub mod tests;
