//! Program registry and tick driven execution engine.

pub mod error;
pub mod vm;
pub mod registry;
pub mod engine;

pub use engine::{Engine, EngineConfig};
pub use registry::ProgramRegistry;
pub use vm::{VMProgram, ProgramState};
