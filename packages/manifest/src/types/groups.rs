use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One entry in a named tool group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum GroupEntry {
    /// Bare package spec string (version specifiers allowed, e.g. `ruff>=0.7`).
    Spec(String),

    /// A tool installed together with extra dependencies.
    Package(GroupPackage),

    /// Pull in another group's entries.
    Include(GroupInclude),
}

/// A tool plus the dependencies it is installed with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct GroupPackage {
    pub name: String,

    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// A reference to another group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct GroupInclude {
    pub include: String,
}

impl GroupEntry {
    /// The group name this entry includes, if it is an include.
    pub fn included_group(&self) -> Option<&str> {
        match self {
            GroupEntry::Include(inc) => Some(&inc.include),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_entry_shapes() {
        let json = r#"[
            "pyocd",
            { "name": "gdbgui", "dependencies": ["pyelftools<=0.25"] },
            { "include": "debug" }
        ]"#;
        let entries: Vec<GroupEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 3);
        assert!(matches!(entries[0], GroupEntry::Spec(_)));
        assert!(matches!(entries[1], GroupEntry::Package(_)));
        assert_eq!(entries[2].included_group(), Some("debug"));
    }
}
