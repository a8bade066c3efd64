use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// How a `param-name` is compared with the parameter being looked for.
///
/// `Contains` tolerates naming variants but also matches longer names that
/// merely embed the target (`contextConfigLocationBackup`). Comparison is
/// case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameMatch {
    /// `candidate` contains `target`.
    #[default]
    Contains,
    /// Trimmed `candidate` equals `target`.
    Exact,
}

impl NameMatch {
    /// Applies the policy.
    pub fn matches(self, candidate: &str, target: &str) -> bool {
        match self {
            NameMatch::Contains => candidate.contains(target),
            NameMatch::Exact => candidate.trim() == target,
        }
    }
}

/// Splits a parameter value on runs of commas, semicolons and whitespace.
///
/// Order is kept and empty tokens are dropped.
pub fn tokenize(value: &str) -> Vec<String> {
    static SEPARATOR_RE: OnceLock<Regex> = OnceLock::new();
    let separator =
        SEPARATOR_RE.get_or_init(|| Regex::new(r"(?-u:[,;\s])+").expect("Invalid regex"));

    separator
        .split(value)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
