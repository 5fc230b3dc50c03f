//! Outage-reason filtering by voltage-class prefix.
//!
//! Reason codes open with the voltage class (`11kV ...`, `66KV ...`,
//! `220KV ...`). Matching is anchored at the start of the text and ignores
//! ASCII case only; whitespace and locale are left alone.

use serde::{Deserialize, Serialize};

/// `true` if `text` starts with `prefix`, ignoring ASCII case.
pub fn has_prefix_ignore_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonFilter {
    /// Rows whose reason starts with any of these are dropped.
    #[serde(default = "default_exclude_prefixes")]
    pub exclude_prefixes: Vec<String>,
    /// When non-empty, only rows starting with one of these are kept.
    #[serde(default)]
    pub require_prefixes: Vec<String>,
    /// When non-empty, only rows whose reason equals one of these are kept.
    #[serde(default)]
    pub allowed_reasons: Vec<String>,
}

fn default_exclude_prefixes() -> Vec<String> {
    vec!["66KV".to_string(), "220KV".to_string()]
}

impl Default for ReasonFilter {
    fn default() -> Self {
        Self {
            exclude_prefixes: default_exclude_prefixes(),
            require_prefixes: Vec::new(),
            allowed_reasons: Vec::new(),
        }
    }
}

impl ReasonFilter {
    /// Default exclusions plus a required prefix.
    pub fn requiring(prefix: &str) -> Self {
        Self {
            require_prefixes: vec![prefix.to_string()],
            ..Self::default()
        }
    }

    /// Default exclusions plus an exact allow-list.
    pub fn allowing<I, S>(reasons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_reasons: reasons.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn is_excluded(&self, reason: &str) -> bool {
        self.exclude_prefixes
            .iter()
            .any(|p| has_prefix_ignore_case(reason, p))
    }

    pub fn keeps(&self, reason: &str) -> bool {
        if self.is_excluded(reason) {
            return false;
        }
        if !self.require_prefixes.is_empty()
            && !self
                .require_prefixes
                .iter()
                .any(|p| has_prefix_ignore_case(reason, p))
        {
            return false;
        }
        self.allowed_reasons.is_empty() || self.allowed_reasons.iter().any(|r| r == reason)
    }
}
