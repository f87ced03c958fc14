//! This crate simulates deterministic single-tape Turing machines defined by
//! the classical 7-tuple. It includes modules for loading machine
//! descriptions, validating their consistency, executing the step loop over
//! a growable tape, and recording configuration traces in `uqv` notation.

pub mod catalog;
pub mod loader;
pub mod machine;
pub mod recorder;
pub mod tape;
pub mod types;
pub mod validator;
pub mod writer;

/// Re-exports the `Catalog` of embedded machine descriptions.
pub use catalog::Catalog;
/// Re-exports the `SpecLoader` struct and the `parse` function from the loader module.
pub use loader::{parse, LoadedMachine, SpecLoader};
/// Re-exports the execution engine and its run product.
pub use machine::{Execution, Machine, Step};
/// Re-exports configuration formatting and the trace sampling policy.
pub use recorder::{format_configuration, Recorder, SamplingPolicy};
/// Re-exports the `Tape` struct.
pub use tape::Tape;
/// Re-exports the core data-model types.
pub use types::{
    Action, Direction, Outcome, SimulatorError, Specification, TransitionKey, ValidationError,
    BLANK_SYMBOL, DEFAULT_MAX_STEPS,
};
/// Re-exports the consistency checks from the validator module.
pub use validator::{check_input, validate};
/// Re-exports the report sink.
pub use writer::{render_report, write_report};
