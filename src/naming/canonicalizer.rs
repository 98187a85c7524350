//! Canonical tool name derivation
//!
//! Vendor action catalogs use long, noisy identifiers
//! (`GITHUB_CREATE_ISSUE`, `List-Files`, ...). Advertised tool names must be
//! short, lowercase, underscore-separated, and capped at a fixed length.
//! [`NameCanonicalizer`] derives that name from a `(namespace, raw action)`
//! pair: it normalizes separators, drops a redundant namespace occurrence,
//! strips one leading noise verb, and truncates the result.
//!
//! The same policy is shared by every provider; per-caller copies of this
//! routine drifted apart in the past, so the prefix list and length cap live
//! in one injectable [`NamingPolicy`].

use crate::error::{BridgeError, Result};

/// Maximum length of a canonical tool name.
pub const DEFAULT_MAX_LENGTH: usize = 55;

/// Noise prefixes stripped from the front of an action name, in match order.
/// Only the first matching prefix is removed.
pub const DEFAULT_NOISE_PREFIXES: &[&str] = &[
    "provider_",
    "action_",
    "tool_",
    "api_",
    "exec_",
    "run_",
    "execute_",
    "perform_",
    "do_",
    "make_",
    "get_",
    "set_",
    "create_",
    "update_",
    "delete_",
    "list_",
    "fetch_",
    "send_",
];

/// Naming policy shared by all providers.
#[derive(Debug, Clone)]
pub struct NamingPolicy {
    /// Ordered noise-prefix list; each entry ends with `_`.
    pub noise_prefixes: Vec<String>,
    /// Maximum canonical name length, in characters.
    pub max_length: usize,
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self {
            noise_prefixes: DEFAULT_NOISE_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

/// Derives canonical tool names from `(namespace, raw action)` pairs.
///
/// Pure and deterministic: the output depends only on the inputs and the
/// policy, and repeated calls always yield the same name.
#[derive(Debug, Clone, Default)]
pub struct NameCanonicalizer {
    policy: NamingPolicy,
}

impl NameCanonicalizer {
    /// Create a canonicalizer with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a canonicalizer with an explicit policy.
    pub fn with_policy(policy: NamingPolicy) -> Self {
        Self { policy }
    }

    /// The active policy.
    pub fn policy(&self) -> &NamingPolicy {
        &self.policy
    }

    /// Derive the canonical tool name for a provider action.
    ///
    /// Empty (or whitespace-only) inputs are rejected; a degenerate
    /// namespace-only or action-only name would otherwise be advertised and
    /// could never be dispatched back to a provider action.
    pub fn canonicalize(&self, namespace: &str, raw_action: &str) -> Result<String> {
        if namespace.trim().is_empty() {
            return Err(BridgeError::naming("namespace cannot be empty"));
        }
        if raw_action.trim().is_empty() {
            return Err(BridgeError::naming("raw action name cannot be empty"));
        }

        let namespace = normalize(namespace);
        let mut action = normalize(raw_action);

        // Drop a redundant namespace occurrence inside the action: either a
        // leading "ns_" or a trailing "_ns", whichever is found first.
        // Removed exactly once, never iteratively.
        let leading = format!("{}_", namespace);
        let trailing = format!("_{}", namespace);
        if let Some(rest) = action.strip_prefix(&leading) {
            action = rest.to_string();
        } else if let Some(rest) = action.strip_suffix(&trailing) {
            action = rest.to_string();
        }

        // Strip the first matching noise prefix, then stop scanning.
        for prefix in &self.policy.noise_prefixes {
            if let Some(rest) = action.strip_prefix(prefix.as_str()) {
                action = rest.to_string();
                break;
            }
        }

        let mut name = format!("{}_{}", namespace, action);

        if name.chars().count() > self.policy.max_length {
            name = name.chars().take(self.policy.max_length).collect();
        }
        while name.ends_with('_') {
            name.pop();
        }

        Ok(name)
    }
}

/// Lowercase and collapse hyphen separators to underscores.
fn normalize(input: &str) -> String {
    input.to_lowercase().replace('-', "_")
}
