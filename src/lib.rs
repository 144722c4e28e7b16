//! # equimatch
//!
//! Façade crate re-exporting everything from [`equimatch_core`] plus, with the default
//! `skills` feature, the matcher from `equimatch-skills`. Pull this crate into an
//! application that needs to score job seekers against equity-bearing roles.
//!
//! ## Example
//!
//! ```rust
//! # #[cfg(feature = "skills")]
//! # {
//! use equimatch::{Role, Skill, SkillLevel, SkillMatcher, Task};
//!
//! let matcher = SkillMatcher::new();
//! let me = [Skill::new("TypeScript", SkillLevel::Expert)];
//!
//! let roles = [
//!     Role::new("web", "Web app").with_task(Task::new("t1", vec![Skill::named("TypeScript")])),
//!     Role::new("ml", "Model training").with_task(Task::new("t2", vec![Skill::named("PyTorch")])),
//! ];
//!
//! let ranked = matcher.rank_by_relevance(&roles, &me);
//! assert_eq!(ranked[0].item.id, "web");
//! assert_eq!(ranked[0].skill_match.value(), 100);
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`equimatch_core`]: skills, levels, roles, match scores and the equity ledger.
//! - `equimatch_skills`: related-skills tables, weights and the [`SkillMatcher`].

pub use equimatch_core::*;

#[cfg(feature = "skills")]
pub use equimatch_skills::*;
