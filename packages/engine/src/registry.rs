use crate::error::LookupError;
use crate::platform::Platform;
use semver::Version;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// An installable unit resolved from the registry snapshot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct PackageHandle {
    pub name: String,
    pub version: Version,
    pub platform: Platform,
}

/// Snapshot metadata for one package definition.
#[derive(Debug, Clone)]
pub struct PackageMeta {
    pub version: Version,
    /// Platforms this package builds for. Empty means all supported.
    pub platforms: BTreeSet<Platform>,
    pub unfree: bool,
    /// Identifier under which this package is tracked as known-insecure
    /// (carries the upstream pinned-version suffix).
    pub insecure_id: Option<String>,
    /// Whether installation requires explicit license acceptance.
    pub license_gated: bool,
}

impl PackageMeta {
    pub fn new(version: &str) -> Self {
        Self {
            version: Version::parse(version).expect("Failed to parse hardcoded package version"),
            platforms: BTreeSet::new(),
            unfree: false,
            insecure_id: None,
            license_gated: false,
        }
    }

    pub fn unfree(mut self) -> Self {
        self.unfree = true;
        self
    }

    pub fn insecure(mut self, identifier: &str) -> Self {
        self.insecure_id = Some(identifier.to_string());
        self
    }

    pub fn license_gated(mut self) -> Self {
        self.license_gated = true;
        self
    }

    pub fn only_on(mut self, platforms: &[Platform]) -> Self {
        self.platforms = platforms.iter().copied().collect();
        self
    }

    pub fn supports(&self, platform: Platform) -> bool {
        self.platforms.is_empty() || self.platforms.contains(&platform)
    }
}

/// Lookup seam between the evaluator and a pinned registry snapshot.
///
/// Unknown-package failures are a typed miss, never an untyped lookup error.
pub trait PackageRegistry {
    /// Resolve a package identifier for a platform to an installable unit.
    fn resolve(&self, name: &str, platform: Platform) -> Result<PackageHandle, LookupError>;

    /// Snapshot metadata for a package, independent of platform.
    fn metadata(&self, name: &str) -> Option<&PackageMeta>;
}

/// In-memory registry built from a pinned snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotRegistry {
    packages: BTreeMap<String, PackageMeta>,
}

impl SnapshotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, meta: PackageMeta) {
        self.packages.insert(name.to_string(), meta);
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// The registry slice this tool ships with, matching the pinned
    /// `nixpkgs` unstable snapshot the reference descriptor declares.
    pub fn bundled() -> Self {
        let mut registry = Self::new();

        registry.insert("basedpyright", PackageMeta::new("1.21.0"));
        registry.insert("just", PackageMeta::new("1.36.0"));
        registry.insert("python312", PackageMeta::new("3.12.7"));
        registry.insert("ruff", PackageMeta::new("0.7.2"));
        registry.insert("trivy", PackageMeta::new("0.56.2"));
        registry.insert("uv", PackageMeta::new("0.4.29"));

        // Gated and platform-limited entries, kept so policy checks have
        // something real to refuse.
        registry.insert(
            "segger-jlink",
            PackageMeta::new("8.10.0")
                .unfree()
                .insecure("segger-jlink-qt4-810")
                .license_gated()
                .only_on(&[Platform::X86_64Linux]),
        );
        registry.insert("vscode", PackageMeta::new("1.95.0").unfree());
        registry.insert(
            "openssl_1_1",
            PackageMeta::new("1.1.1").insecure("openssl-1.1.1w"),
        );

        registry
    }
}

impl PackageRegistry for SnapshotRegistry {
    fn resolve(&self, name: &str, platform: Platform) -> Result<PackageHandle, LookupError> {
        let not_found = || LookupError::NotFound {
            name: name.to_string(),
            platform,
        };

        let meta = self.packages.get(name).ok_or_else(not_found)?;
        if !meta.supports(platform) {
            return Err(not_found());
        }

        Ok(PackageHandle {
            name: name.to_string(),
            version: meta.version.clone(),
            platform,
        })
    }

    fn metadata(&self, name: &str) -> Option<&PackageMeta> {
        self.packages.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_package() {
        let registry = SnapshotRegistry::bundled();
        let handle = registry.resolve("ruff", Platform::X86_64Linux).unwrap();
        assert_eq!(handle.name, "ruff");
        assert_eq!(handle.platform, Platform::X86_64Linux);
    }

    #[test]
    fn test_resolve_unknown_package_is_typed_miss() {
        let registry = SnapshotRegistry::bundled();
        let err = registry
            .resolve("basedpyleft", Platform::X86_64Linux)
            .unwrap_err();
        assert!(matches!(err, LookupError::NotFound { .. }));
    }

    #[test]
    fn test_platform_limited_package_misses_elsewhere() {
        let registry = SnapshotRegistry::bundled();
        assert!(registry
            .resolve("segger-jlink", Platform::X86_64Linux)
            .is_ok());
        assert!(registry
            .resolve("segger-jlink", Platform::Aarch64Darwin)
            .is_err());
    }
}
