//! Configuration for the skill matcher.

use std::path::PathBuf;

use equimatch_core::SkillLevel;
use serde::{Deserialize, Serialize};

use crate::SkillError;

/// Credits and level weights used when scoring.
///
/// Each required skill is worth one unit. The credits below are the share of that
/// unit a candidate earns in each situation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchWeights {
    /// Candidate holds the skill at or above the required level.
    pub full_credit: f64,
    /// Candidate holds the skill below the required level but above `near_threshold`.
    pub near_credit: f64,
    /// Candidate holds the skill at any level.
    pub base_credit: f64,
    /// Candidate lacks the skill but holds a related one.
    pub related_credit: f64,
    /// Level weight a candidate must exceed to earn `near_credit`.
    pub near_threshold: f64,
    /// Weight of [`SkillLevel::Beginner`].
    pub beginner: f64,
    /// Weight of [`SkillLevel::Intermediate`].
    pub intermediate: f64,
    /// Weight of [`SkillLevel::Expert`].
    pub expert: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            full_credit: 1.0,
            near_credit: 0.8,
            base_credit: 0.6,
            related_credit: 0.3,
            near_threshold: 0.5,
            beginner: 0.5,
            intermediate: 1.0,
            expert: 1.5,
        }
    }
}

impl MatchWeights {
    /// Weight assigned to a level.
    #[must_use]
    pub const fn level_weight(&self, level: SkillLevel) -> f64 {
        match level {
            SkillLevel::Beginner => self.beginner,
            SkillLevel::Intermediate => self.intermediate,
            SkillLevel::Expert => self.expert,
        }
    }

    /// Check that every weight is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`SkillError::InvalidWeights`] naming the first bad field.
    pub fn validate(&self) -> Result<(), SkillError> {
        let fields = [
            ("full_credit", self.full_credit),
            ("near_credit", self.near_credit),
            ("base_credit", self.base_credit),
            ("related_credit", self.related_credit),
            ("near_threshold", self.near_threshold),
            ("beginner", self.beginner),
            ("intermediate", self.intermediate),
            ("expert", self.expert),
        ];

        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(SkillError::InvalidWeights {
                    reason: format!("{name} must be a non-negative number, got {value}"),
                });
            }
        }
        Ok(())
    }
}

/// Matcher setup as read from a config file.
///
/// ```yaml
/// table_path: ./related-skills.yaml
/// extend_builtin: true
/// weights:
///   related_credit: 0.25
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatcherConfig {
    /// Scoring weights.
    pub weights: MatchWeights,
    /// Extra related-skills table to load. It must exist.
    ///
    /// Relative paths are taken from the config file's directory when loaded through
    /// [`TableLoader::load_config`](crate::TableLoader::load_config), and from the
    /// working directory otherwise.
    pub table_path: Option<PathBuf>,
    /// Overlay the extra table on the built-in one instead of replacing it.
    pub extend_builtin: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            weights: MatchWeights::default(),
            table_path: None,
            extend_builtin: true,
        }
    }
}

impl MatcherConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for custom configuration.
    #[must_use]
    pub fn builder() -> MatcherConfigBuilder {
        MatcherConfigBuilder::new()
    }

    /// Parse configuration from YAML. An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SkillError::ParseConfig`] for malformed YAML or unknown keys, and
    /// [`SkillError::InvalidWeights`] if the weights do not validate.
    pub fn from_yaml_str(content: &str) -> Result<Self, SkillError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content).map_err(SkillError::ParseConfig)?;
        config.weights.validate()?;
        Ok(config)
    }
}

/// Builder for matcher configuration.
#[derive(Debug, Default)]
pub struct MatcherConfigBuilder {
    config: MatcherConfig,
}

impl MatcherConfigBuilder {
    /// Creates a new configuration builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: MatcherConfig::default(),
        }
    }

    /// Sets all scoring weights.
    #[must_use]
    pub const fn weights(mut self, weights: MatchWeights) -> Self {
        self.config.weights = weights;
        self
    }

    /// Sets the partial credit for related skills.
    #[must_use]
    pub const fn related_credit(mut self, credit: f64) -> Self {
        self.config.weights.related_credit = credit;
        self
    }

    /// Sets the path of an extra related-skills table.
    #[must_use]
    pub fn table_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.table_path = Some(path.into());
        self
    }

    /// Chooses whether the extra table extends or replaces the built-in one.
    #[must_use]
    pub const fn extend_builtin(mut self, extend: bool) -> Self {
        self.config.extend_builtin = extend;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> MatcherConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights() {
        let weights = MatchWeights::default();
        assert_eq!(weights.level_weight(SkillLevel::Beginner), 0.5);
        assert_eq!(weights.level_weight(SkillLevel::Intermediate), 1.0);
        assert_eq!(weights.level_weight(SkillLevel::Expert), 1.5);
        assert_eq!(weights.related_credit, 0.3);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn validate_rejects_negative() {
        let weights = MatchWeights {
            base_credit: -0.1,
            ..MatchWeights::default()
        };
        assert!(matches!(
            weights.validate(),
            Err(SkillError::InvalidWeights { reason }) if reason.contains("base_credit")
        ));
    }

    #[test]
    fn builder_config() {
        let config = MatcherConfig::builder()
            .related_credit(0.2)
            .table_path("/etc/equimatch/related.yaml")
            .extend_builtin(false)
            .build();

        assert_eq!(config.weights.related_credit, 0.2);
        assert_eq!(
            config.table_path,
            Some(PathBuf::from("/etc/equimatch/related.yaml"))
        );
        assert!(!config.extend_builtin);
    }

    #[test]
    fn parse_partial_yaml() {
        let config =
            MatcherConfig::from_yaml_str("table_path: ./extra.yaml\nweights:\n  related_credit: 0.25\n")
                .unwrap();

        assert_eq!(config.table_path, Some(PathBuf::from("./extra.yaml")));
        assert_eq!(config.weights.related_credit, 0.25);
        assert_eq!(config.weights.full_credit, 1.0);
        assert!(config.extend_builtin);
    }

    #[test]
    fn parse_empty_yaml_is_default() {
        assert_eq!(MatcherConfig::from_yaml_str("").unwrap(), MatcherConfig::default());
    }

    #[test]
    fn parse_rejects_unknown_keys() {
        let result = MatcherConfig::from_yaml_str("threshold: 3\n");
        assert!(matches!(result, Err(SkillError::ParseConfig(_))));
    }

    #[test]
    fn parse_rejects_bad_weights() {
        let result = MatcherConfig::from_yaml_str("weights:\n  expert: -2\n");
        assert!(matches!(result, Err(SkillError::InvalidWeights { .. })));
    }
}
