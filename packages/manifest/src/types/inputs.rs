use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A named pointer to an external dependency source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum InputRef {
    /// Bare coordinate string (e.g., `github:NixOS/nixpkgs/nixos-unstable`).
    Simple(String),

    /// Detailed configuration object.
    Detailed(InputDetails),
}

/// Detailed configuration for an input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct InputDetails {
    /// Source coordinate.
    /// Kept as String because coordinates are not RFC 3986 URLs.
    pub url: String,

    /// Name of another declared input whose pin this input reuses.
    #[serde(default)]
    pub follows: Option<String>,
}

impl InputRef {
    /// The raw source coordinate, regardless of declaration style.
    pub fn coordinate(&self) -> &str {
        match self {
            InputRef::Simple(coordinate) => coordinate,
            InputRef::Detailed(details) => &details.url,
        }
    }

    /// The input this one follows, if any.
    pub fn follows(&self) -> Option<&str> {
        match self {
            InputRef::Simple(_) => None,
            InputRef::Detailed(details) => details.follows.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_ref_simple() {
        let json = r#""github:numtide/flake-utils""#;
        let input: InputRef = serde_json::from_str(json).unwrap();
        assert_eq!(input.coordinate(), "github:numtide/flake-utils");
        assert_eq!(input.follows(), None);
    }

    #[test]
    fn test_input_ref_detailed() {
        let json = r#"{ "url": "github:NixOS/nixpkgs/nixos-unstable", "follows": "nixpkgs" }"#;
        let input: InputRef = serde_json::from_str(json).unwrap();
        assert_eq!(input.coordinate(), "github:NixOS/nixpkgs/nixos-unstable");
        assert_eq!(input.follows(), Some("nixpkgs"));
    }
}
