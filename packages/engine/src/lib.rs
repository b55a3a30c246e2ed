//! Evaluation engine: resolves declared inputs to concrete pins, applies
//! the descriptor's policy, and materializes one environment record per
//! target platform.

pub mod error;
pub mod eval;
pub mod inputs;
pub mod platform;
pub mod registry;

pub use error::{EvalError, LookupError};
pub use eval::{
    evaluate, evaluate_all, evaluate_descriptor, expand_group, EnvironmentRecord, Evaluation,
    ToolSpec,
};
pub use inputs::{pin_coordinate, resolve_inputs, PinnedInput, Scheme};
pub use platform::Platform;
pub use registry::{PackageHandle, PackageMeta, PackageRegistry, SnapshotRegistry};
