// Mine level name resolution
//
// The mines expose hundreds of procedurally numbered sub-levels (e.g.
// "UndergroundMine77"), but only two calibration buckets exist for them: the
// mine entrance and the deep skull cavern. Level names are folded onto those
// buckets before any catalog lookup or same-area comparison.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

// =============================================================================
// RULES
// =============================================================================

/// Rules for folding numbered mine levels onto canonical buckets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MineRules {
    /// Name prefix that marks a numbered mine level
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Levels strictly above this depth belong to the deep bucket
    #[serde(default = "default_deep_threshold")]
    pub deep_threshold: i32,
    /// Bucket for levels at or below the threshold
    #[serde(default = "default_standard_name")]
    pub standard_name: String,
    /// Bucket for levels above the threshold
    #[serde(default = "default_deep_name")]
    pub deep_name: String,
}

fn default_prefix() -> String {
    "UndergroundMine".to_string()
}

fn default_deep_threshold() -> i32 {
    120
}

fn default_standard_name() -> String {
    "Mine".to_string()
}

fn default_deep_name() -> String {
    "SkullCave".to_string()
}

impl Default for MineRules {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            deep_threshold: default_deep_threshold(),
            standard_name: default_standard_name(),
            deep_name: default_deep_name(),
        }
    }
}

impl MineRules {
    /// Canonical bucket for a numbered mine level name.
    ///
    /// Returns `None` when the name is not a mine level (prefix absent or the
    /// suffix is not a number).
    pub fn resolve(&self, location_name: &str) -> Option<&str> {
        let level: i32 = location_name.strip_prefix(self.prefix.as_str())?.parse().ok()?;
        if level > self.deep_threshold {
            Some(&self.deep_name)
        } else {
            Some(&self.standard_name)
        }
    }

    /// Fold a mine level name onto its bucket; anything else passes through
    pub fn canonicalize<'a>(&'a self, location_name: &'a str) -> &'a str {
        self.resolve(location_name).unwrap_or(location_name)
    }

    /// Whether this name is a numbered mine level
    pub fn matches(&self, location_name: &str) -> bool {
        self.resolve(location_name).is_some()
    }
}

/// Default rules, for callers that don't carry a config
static DEFAULT_RULES: Lazy<MineRules> = Lazy::new(MineRules::default);

/// Canonicalize a location name with the default mine rules
pub fn canonicalize(location_name: &str) -> &str {
    DEFAULT_RULES.canonicalize(location_name)
}
