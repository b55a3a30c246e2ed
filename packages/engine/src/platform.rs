use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Target execution platform, as a system double of CPU architecture and OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "x86_64-linux")]
    X86_64Linux,
    #[serde(rename = "aarch64-linux")]
    Aarch64Linux,
    #[serde(rename = "x86_64-darwin")]
    X86_64Darwin,
    #[serde(rename = "aarch64-darwin")]
    Aarch64Darwin,
}

#[derive(Debug, Error)]
#[error("unknown platform '{0}'")]
pub struct UnknownPlatform(String);

impl Platform {
    /// The default supported platform set. Evaluation fans out over this
    /// list explicitly; callers may inject a narrower slice.
    pub const ALL: [Platform; 4] = [
        Platform::X86_64Linux,
        Platform::Aarch64Linux,
        Platform::X86_64Darwin,
        Platform::Aarch64Darwin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::X86_64Linux => "x86_64-linux",
            Platform::Aarch64Linux => "aarch64-linux",
            Platform::X86_64Darwin => "x86_64-darwin",
            Platform::Aarch64Darwin => "aarch64-darwin",
        }
    }

    /// Detect the platform this process is running on.
    pub fn current() -> Option<Platform> {
        match (std::env::consts::ARCH, std::env::consts::OS) {
            ("x86_64", "linux") => Some(Platform::X86_64Linux),
            ("aarch64", "linux") => Some(Platform::Aarch64Linux),
            ("x86_64", "macos") => Some(Platform::X86_64Darwin),
            ("aarch64", "macos") => Some(Platform::Aarch64Darwin),
            _ => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x86_64-linux" => Ok(Platform::X86_64Linux),
            "aarch64-linux" => Ok(Platform::Aarch64Linux),
            "x86_64-darwin" => Ok(Platform::X86_64Darwin),
            "aarch64-darwin" => Ok(Platform::Aarch64Darwin),
            other => Err(UnknownPlatform(other.to_string())),
        }
    }
}
