//! Skill values and the boundary normalization from loosely shaped input.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Coarse proficiency ordinal attached to a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum SkillLevel {
    /// Just getting started.
    Beginner,
    /// Comfortable working unsupervised.
    #[default]
    Intermediate,
    /// Deep, production-level experience.
    Expert,
}

impl SkillLevel {
    /// All levels from lowest to highest.
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    /// Parse a level name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "expert" => Some(Self::Expert),
            _ => None,
        }
    }

    /// Parse a level name, falling back to [`SkillLevel::Intermediate`].
    #[must_use]
    pub fn parse_or_default(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            tracing::debug!(level = s, "unrecognized skill level, using Intermediate");
            Self::default()
        })
    }

    /// Canonical display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Expert => "Expert",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for SkillLevel {
    fn from(value: String) -> Self {
        Self::parse_or_default(&value)
    }
}

impl From<SkillLevel> for String {
    fn from(value: SkillLevel) -> Self {
        value.as_str().to_string()
    }
}

/// A named skill at a given level.
///
/// The same shape describes what a candidate holds and what a task requires.
/// Names keep their original spelling; comparisons go through [`Skill::key`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "SkillLike")]
pub struct Skill {
    /// Skill name as entered.
    #[serde(rename = "skill")]
    pub name: String,
    /// Proficiency level.
    pub level: SkillLevel,
}

impl Skill {
    /// Create a skill with an explicit level.
    #[must_use]
    pub fn new(name: impl Into<String>, level: SkillLevel) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }

    /// Create a skill at the default level.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, SkillLevel::default())
    }

    /// Lower-cased name used for every comparison.
    #[must_use]
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Whether the name is empty or only whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.level)
    }
}

/// Skill as it arrives from forms, CV parsing or stored rows.
///
/// Either a bare name (`"React"`) or a record (`{"skill": "React", "level": "Expert"}`).
/// `name` is accepted in place of `skill`. Convert into [`Skill`] before matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillLike {
    /// Bare skill name, treated as intermediate.
    Name(String),
    /// Name with an optional level.
    Detailed {
        /// Skill name.
        #[serde(alias = "name")]
        skill: String,
        /// Level name; missing or unknown values become intermediate.
        #[serde(default)]
        level: Option<String>,
    },
}

impl From<&str> for SkillLike {
    fn from(value: &str) -> Self {
        Self::Name(value.to_string())
    }
}

impl From<String> for SkillLike {
    fn from(value: String) -> Self {
        Self::Name(value)
    }
}

impl From<SkillLike> for Skill {
    fn from(value: SkillLike) -> Self {
        match value {
            SkillLike::Name(name) => Self::named(name),
            SkillLike::Detailed { skill, level } => Self {
                name: skill,
                level: level
                    .as_deref()
                    .map(SkillLevel::parse_or_default)
                    .unwrap_or_default(),
            },
        }
    }
}

impl From<Skill> for SkillLike {
    fn from(value: Skill) -> Self {
        Self::Detailed {
            skill: value.name,
            level: Some(value.level.as_str().to_string()),
        }
    }
}
