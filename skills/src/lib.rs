//! Equimatch skill matching
//!
//! Scores how well a job seeker's skills cover the skills a role asks for, ranks
//! open roles for a candidate, and suggests adjacent skills worth adding to a profile.
//!
//! # Scoring
//!
//! Every required skill is worth one unit. Holding the skill at or above the required
//! level earns the full unit, holding it below earns 0.8 or 0.6 depending on the gap,
//! and lacking it while holding a related skill earns 0.3. The score is the earned
//! share as a percentage in `0..=100`. Empty inputs score zero.
//!
//! # Related skills
//!
//! Partial credit comes from a [`RelatedSkills`] table handed to the matcher. The
//! built-in table covers common web, mobile, cloud and data stacks; extra tables are
//! YAML files:
//!
//! ```yaml
//! react:
//!   - javascript
//!   - typescript
//! rust: [c++, go]
//! ```
//!
//! # Usage
//!
//! ```rust
//! use equimatch_core::{Skill, SkillLevel};
//! use equimatch_skills::SkillMatcher;
//!
//! let matcher = SkillMatcher::new();
//! let candidate = [Skill::new("react", SkillLevel::Expert)];
//! let required = [Skill::new("React", SkillLevel::Intermediate)];
//!
//! assert_eq!(matcher.compute_match(&candidate, &required).value(), 100);
//! ```

mod config;
mod error;
mod loader;
mod matcher;
mod related;

pub use config::{MatchWeights, MatcherConfig, MatcherConfigBuilder};
pub use error::SkillError;
pub use loader::TableLoader;
pub use matcher::{Credit, MatchBreakdown, Ranked, SkillMatcher, skills_from_value};
pub use related::RelatedSkills;
