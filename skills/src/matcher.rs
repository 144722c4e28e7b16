//! Weighted skill matching and ranking.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use equimatch_core::{MatchScore, RequiresSkills, Skill, SkillLevel, SkillLike};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{MatchWeights, MatcherConfig, RelatedSkills, SkillError, TableLoader};

/// Scores candidate skill profiles against required skills.
///
/// Each required skill is worth one unit:
///
/// - held at or above the required level: full credit
/// - held below it, but above the near threshold: near credit
/// - held at any other level: base credit
/// - not held, but a related skill is: related credit
/// - otherwise nothing
///
/// The score is the earned share of all units as a rounded percentage. Names are
/// compared case-insensitively. Every operation is pure, so a matcher can be cloned
/// and shared freely across threads.
#[derive(Debug, Clone)]
pub struct SkillMatcher {
    related: Arc<RelatedSkills>,
    weights: MatchWeights,
}

/// An item annotated with its match score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ranked<R> {
    /// The ranked item.
    #[serde(flatten)]
    pub item: R,
    /// Score against the candidate.
    pub skill_match: MatchScore,
}

/// How a single requirement was satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Credit {
    /// Held at or above the required level.
    Full,
    /// Held below the required level, above the near threshold.
    Near,
    /// Held, but only at a low level.
    Base,
    /// Not held; a related skill was.
    Related {
        /// The candidate skill that earned the credit.
        via: String,
    },
    /// Nothing earned.
    Missing,
}

impl Credit {
    /// Share of one unit this credit is worth.
    #[must_use]
    pub const fn value(&self, weights: &MatchWeights) -> f64 {
        match self {
            Self::Full => weights.full_credit,
            Self::Near => weights.near_credit,
            Self::Base => weights.base_credit,
            Self::Related { .. } => weights.related_credit,
            Self::Missing => 0.0,
        }
    }
}

/// Per-requirement explanation of a score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchBreakdown {
    /// The overall score.
    pub score: MatchScore,
    /// One entry per requirement, in order.
    pub requirements: Vec<(Skill, Credit)>,
}

/// Candidate skills keyed by lower-cased name. Later entries win.
struct Profile(HashMap<String, SkillLevel>);

impl Profile {
    fn new<'a>(skills: impl IntoIterator<Item = &'a Skill>) -> Self {
        Self(skills.into_iter().map(|s| (s.key(), s.level)).collect())
    }

    fn level(&self, key: &str) -> Option<SkillLevel> {
        self.0.get(key).copied()
    }

    fn holds(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for SkillMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillMatcher {
    /// Create a matcher over the built-in related-skills table.
    #[must_use]
    pub fn new() -> Self {
        Self::with_table(RelatedSkills::builtin())
    }

    /// Create a matcher over the given table with default weights.
    #[must_use]
    pub fn with_table(related: impl Into<Arc<RelatedSkills>>) -> Self {
        Self {
            related: related.into(),
            weights: MatchWeights::default(),
        }
    }

    /// Replace the scoring weights.
    #[must_use]
    pub const fn with_weights(mut self, weights: MatchWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Build a matcher from configuration, loading the extra table if one is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the weights are invalid, or if the configured table is
    /// missing, unreadable or malformed.
    pub async fn from_config(config: &MatcherConfig) -> Result<Self, SkillError> {
        config.weights.validate()?;

        let related = match &config.table_path {
            Some(path) => {
                let extra = TableLoader::new().require_path(path).load().await?;
                if config.extend_builtin {
                    let mut table = RelatedSkills::builtin();
                    table.merge(&extra);
                    table
                } else {
                    extra
                }
            }
            None => RelatedSkills::builtin(),
        };

        Ok(Self::with_table(related).with_weights(config.weights))
    }

    /// The related-skills table in use.
    #[must_use]
    pub fn related(&self) -> &RelatedSkills {
        &self.related
    }

    /// The scoring weights in use.
    #[must_use]
    pub const fn weights(&self) -> &MatchWeights {
        &self.weights
    }

    /// Score a candidate against a list of required skills.
    ///
    /// Returns zero when either side is empty. Duplicate requirements count once per
    /// occurrence.
    #[must_use]
    pub fn compute_match<'a, 'b>(
        &self,
        candidate: impl IntoIterator<Item = &'a Skill>,
        required: impl IntoIterator<Item = &'b Skill>,
    ) -> MatchScore {
        let profile = Profile::new(candidate);
        self.score_profile(&profile, required)
    }

    /// Score loosely typed JSON input.
    ///
    /// Anything other than an array on either side scores zero. Array elements that
    /// are neither a name nor a `{skill, level}` record are skipped, so a skipped
    /// requirement also drops out of the denominator.
    #[must_use]
    pub fn compute_match_json(&self, candidate: &Value, required: &Value) -> MatchScore {
        let (Some(candidate), Some(required)) =
            (skills_from_value(candidate), skills_from_value(required))
        else {
            return MatchScore::ZERO;
        };
        self.compute_match(&candidate, &required)
    }

    /// Score a candidate and report how each requirement was met.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn explain<'a, 'b>(
        &self,
        candidate: impl IntoIterator<Item = &'a Skill>,
        required: impl IntoIterator<Item = &'b Skill>,
    ) -> MatchBreakdown {
        let profile = Profile::new(candidate);
        let requirements: Vec<(Skill, Credit)> = required
            .into_iter()
            .map(|req| (req.clone(), self.credit(&profile, req)))
            .collect();

        let score = if profile.is_empty() {
            MatchScore::ZERO
        } else {
            let earned: f64 = requirements
                .iter()
                .map(|(_, credit)| credit.value(&self.weights))
                .sum();
            MatchScore::from_ratio(earned, requirements.len() as f64)
        };

        MatchBreakdown {
            score,
            requirements,
        }
    }

    /// Score every item and sort by score, highest first.
    ///
    /// Each item's requirements are flattened in order and scored once. The sort is
    /// stable: items with equal scores keep their input order.
    #[must_use]
    pub fn rank_by_relevance<R, I>(&self, items: I, candidate: &[Skill]) -> Vec<Ranked<R>>
    where
        I: IntoIterator<Item = R>,
        R: RequiresSkills,
    {
        let profile = Profile::new(candidate);

        let mut ranked: Vec<Ranked<R>> = items
            .into_iter()
            .map(|item| {
                let skill_match = self.score_profile(&profile, item.required_skills());
                Ranked { item, skill_match }
            })
            .collect();

        ranked.sort_by(|a, b| b.skill_match.cmp(&a.skill_match));
        ranked
    }

    /// Like [`SkillMatcher::rank_by_relevance`], keeping only items scoring at least `min`.
    #[must_use]
    pub fn filter_by_min_score<R, I>(
        &self,
        items: I,
        candidate: &[Skill],
        min: MatchScore,
    ) -> Vec<Ranked<R>>
    where
        I: IntoIterator<Item = R>,
        R: RequiresSkills,
    {
        let mut ranked = self.rank_by_relevance(items, candidate);
        ranked.retain(|r| r.skill_match >= min);
        ranked
    }

    /// Names related to `name` in the table. Unknown names yield an empty slice.
    #[must_use]
    pub fn related_skills_of(&self, name: &str) -> &[String] {
        self.related.get(name)
    }

    /// Related skills the candidate does not hold yet, each at beginner level.
    ///
    /// Suggestions follow the candidate's skill order, then table order, without
    /// duplicates.
    #[must_use]
    pub fn suggest_related_skills(&self, candidate: &[Skill]) -> Vec<Skill> {
        let profile = Profile::new(candidate);
        let mut seen = HashSet::new();
        let mut suggestions = Vec::new();

        for name in candidate.iter().flat_map(|s| self.related.get(&s.name)) {
            if !profile.holds(name) && seen.insert(name.as_str()) {
                suggestions.push(Skill::new(name.clone(), SkillLevel::Beginner));
            }
        }
        suggestions
    }

    fn score_profile<'b>(
        &self,
        profile: &Profile,
        required: impl IntoIterator<Item = &'b Skill>,
    ) -> MatchScore {
        if profile.is_empty() {
            return MatchScore::ZERO;
        }

        let mut total = 0.0;
        let mut earned = 0.0;
        for req in required {
            total += 1.0;
            earned += self.credit(profile, req).value(&self.weights);
        }

        MatchScore::from_ratio(earned, total)
    }

    fn credit(&self, profile: &Profile, required: &Skill) -> Credit {
        let key = required.key();
        let weights = &self.weights;

        if let Some(level) = profile.level(&key) {
            let held = weights.level_weight(level);
            if held >= weights.level_weight(required.level) {
                Credit::Full
            } else if held > weights.near_threshold {
                Credit::Near
            } else {
                Credit::Base
            }
        } else {
            self.related
                .get(&key)
                .iter()
                .find(|name| profile.holds(name))
                .map_or(Credit::Missing, |via| Credit::Related { via: via.clone() })
        }
    }
}

/// Decode a JSON array of skill-like values.
///
/// Returns `None` when `value` is not an array. Elements that do not decode, or that
/// have a blank name, are dropped.
#[must_use]
pub fn skills_from_value(value: &Value) -> Option<Vec<Skill>> {
    let items = value.as_array()?;

    let skills = items
        .iter()
        .filter_map(|item| match SkillLike::deserialize(item) {
            Ok(like) => Some(Skill::from(like)),
            Err(error) => {
                tracing::debug!(%error, "skipping malformed skill entry");
                None
            }
        })
        .filter(|skill| !skill.is_blank())
        .collect();

    Some(skills)
}
