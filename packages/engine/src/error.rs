use crate::platform::Platform;
use thiserror::Error;

/// Fatal configuration errors surfaced synchronously to the invoking user.
/// None is recovered locally, none is retried, and none has a
/// partial-success outcome.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("input '{name}': cannot resolve coordinate '{coordinate}': {reason}")]
    UnresolvableInput {
        name: String,
        coordinate: String,
        reason: String,
    },

    #[error("unknown package '{name}' for platform {platform}")]
    UnknownPackage { name: String, platform: Platform },

    #[error("policy flag '{flag}' has an invalid value: {reason}")]
    InvalidPolicyValue {
        flag: &'static str,
        reason: String,
    },

    #[error("package '{name}' has an unfree license; set policy.allow_unfree to resolve it")]
    UnfreePackage { name: String },

    #[error("package '{name}' is marked insecure as '{identifier}'; add that identifier to policy.permitted_insecure_packages to resolve it")]
    InsecurePackage { name: String, identifier: String },

    #[error("package '{name}' requires explicit license acceptance; set policy.accept_licenses.{name} = true")]
    LicenseNotAccepted { name: String },

    #[error("tool group '{name}' is not defined")]
    UnknownGroup { name: String },
}

/// Typed miss from the registry seam.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("package '{name}' does not exist in the registry snapshot for {platform}")]
    NotFound { name: String, platform: Platform },
}

impl From<LookupError> for EvalError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NotFound { name, platform } => {
                EvalError::UnknownPackage { name, platform }
            }
        }
    }
}
