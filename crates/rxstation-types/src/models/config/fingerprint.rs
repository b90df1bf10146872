//! Fingerprint collection settings.

use serde::{Deserialize, Serialize};

/// Fonts probed when no candidate list is configured.
pub const DEFAULT_CANDIDATE_FONTS: &[&str] = &[
    "Arial",
    "Verdana",
    "Times New Roman",
    "Courier New",
    "Georgia",
    "Palatino",
    "Garamond",
    "Comic Sans MS",
    "Trebuchet MS",
    "Arial Black",
    "Impact",
];

/// Which signals feed the fingerprint hash.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum HashScope {
    /// Whole record; matches hashes already stored in the registry
    #[default]
    Full,
    /// Hardware concurrency, screen, timezone, platform, WebGL and fonts only
    Stable,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FingerprintConfig {
    #[serde(default)]
    pub hash_scope: HashScope,
    #[serde(default = "default_candidate_fonts")]
    pub candidate_fonts: Vec<String>,
}

fn default_candidate_fonts() -> Vec<String> {
    DEFAULT_CANDIDATE_FONTS.iter().map(|f| f.to_string()).collect()
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self { hash_scope: HashScope::default(), candidate_fonts: default_candidate_fonts() }
    }
}
