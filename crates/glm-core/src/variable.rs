use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Variables that are never passed on to generated artifacts, regardless of
/// what the caller asks to ignore. They hold deployment credentials.
pub const DEFAULT_IGNORED_VARS: &[&str] = &[
    "MARATHON_HOST",
    "CI_BUILD_DOCKER_HUB_PASSWORD",
    "CI_BUILD_DOCKER_HUB_USERNAME",
    "GITLAB_PRIVATE_TOKEN",
];

/// A project-level CI/CD variable as stored by GitLab.
///
/// Only `key` and `value` are modelled; the remaining fields of the API
/// payload (`variable_type`, `protected`, ...) are ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildVariable {
    pub key: String,
    pub value: String,
}

impl BuildVariable {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Merge a user-supplied ignore list with [`DEFAULT_IGNORED_VARS`].
///
/// User entries come first; duplicates are harmless since the result is only
/// used for membership checks.
pub fn effective_blocklist(user: &[String]) -> Vec<String> {
    user.iter()
        .cloned()
        .chain(DEFAULT_IGNORED_VARS.iter().map(|v| (*v).to_owned()))
        .collect()
}

/// Drop every variable whose key is in `blocklist`, keeping the original
/// order of the survivors.
pub fn filter_ignored(vars: Vec<BuildVariable>, blocklist: &[String]) -> Vec<BuildVariable> {
    let blocked: HashSet<&str> = blocklist.iter().map(String::as_str).collect();
    let before = vars.len();

    let kept: Vec<BuildVariable> = vars
        .into_iter()
        .filter(|v| !blocked.contains(v.key.as_str()))
        .collect();

    tracing::debug!(before, after = kept.len(), "filtered ignored build variables");
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocklist_keeps_user_entries_first() {
        let list = effective_blocklist(&["CONN".to_owned()]);
        assert_eq!(list[0], "CONN");
        assert_eq!(list.len(), 1 + DEFAULT_IGNORED_VARS.len());
        assert!(list.iter().any(|v| v == "GITLAB_PRIVATE_TOKEN"));
    }
}
