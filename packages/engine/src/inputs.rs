use crate::error::EvalError;
use serde::Serialize;
use shell_manifest::InputRef;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Source hosting scheme of an input coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Github,
    Gitlab,
    Sourcehut,
}

impl Scheme {
    fn parse(s: &str) -> Option<Scheme> {
        match s {
            "github" => Some(Scheme::Github),
            "gitlab" => Some(Scheme::Gitlab),
            "sourcehut" => Some(Scheme::Sourcehut),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Github => "github",
            Scheme::Gitlab => "gitlab",
            Scheme::Sourcehut => "sourcehut",
        }
    }
}

/// A resolved, pinned external input. Immutable once produced; shared
/// read-only across all per-platform evaluations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinnedInput {
    pub name: String,
    pub scheme: Scheme,
    pub owner: String,
    pub repo: String,
    /// Branch, tag, or revision. Absent means the source default.
    pub reference: Option<String>,
}

impl fmt::Display for PinnedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.scheme.as_str(), self.owner, self.repo)?;
        if let Some(reference) = &self.reference {
            write!(f, "/{}", reference)?;
        }
        Ok(())
    }
}

fn unresolvable(name: &str, coordinate: &str, reason: impl Into<String>) -> EvalError {
    EvalError::UnresolvableInput {
        name: name.to_string(),
        coordinate: coordinate.to_string(),
        reason: reason.into(),
    }
}

/// Parses a single coordinate of the shape `scheme:owner/repo[/ref]`.
pub fn pin_coordinate(name: &str, coordinate: &str) -> Result<PinnedInput, EvalError> {
    let (scheme_str, rest) = coordinate
        .split_once(':')
        .ok_or_else(|| unresolvable(name, coordinate, "missing scheme separator ':'"))?;

    let scheme = Scheme::parse(scheme_str)
        .ok_or_else(|| unresolvable(name, coordinate, format!("unknown scheme '{}'", scheme_str)))?;

    let mut segments = rest.splitn(3, '/');
    let owner = segments.next().unwrap_or("");
    let repo = segments.next().unwrap_or("");
    let reference = segments.next().map(str::to_string);

    if owner.is_empty() || repo.is_empty() {
        return Err(unresolvable(name, coordinate, "expected 'owner/repo' after scheme"));
    }

    if let Some(reference) = &reference {
        if reference.is_empty() {
            return Err(unresolvable(name, coordinate, "empty ref segment"));
        }
    }

    Ok(PinnedInput {
        name: name.to_string(),
        scheme,
        owner: owner.to_string(),
        repo: repo.to_string(),
        reference,
    })
}

/// Resolves every declared input to a concrete pin.
///
/// An input that `follows` another reuses the target's coordinate under its
/// own name. Fails fast on the first unresolvable coordinate.
pub fn resolve_inputs(
    inputs: &BTreeMap<String, InputRef>,
) -> Result<BTreeMap<String, PinnedInput>, EvalError> {
    let mut pinned = BTreeMap::new();

    for (name, input) in inputs {
        let coordinate = match input.follows() {
            Some(target) => inputs
                .get(target)
                .map(InputRef::coordinate)
                .ok_or_else(|| {
                    unresolvable(
                        name,
                        input.coordinate(),
                        format!("follows undeclared input '{}'", target),
                    )
                })?,
            None => input.coordinate(),
        };

        let pin = pin_coordinate(name, coordinate)?;
        debug!(input = %name, pin = %pin, "pinned input");
        pinned.insert(name.clone(), pin);
    }

    Ok(pinned)
}
