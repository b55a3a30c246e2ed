mod groups;
mod inputs;
mod policy;
mod shell;
mod validation;

pub use groups::{GroupEntry, GroupInclude, GroupPackage};
pub use inputs::{InputDetails, InputRef};
pub use policy::PolicyFlags;
pub use shell::ShellDef;
pub use validation::{DescriptorValidator, ValidationIssue, ValidationLevel, ValidationResult};
