//! # equimatch-core
//!
//! Shared vocabulary for the equimatch workspace. Businesses publish roles made of
//! equity-bearing tasks, each task lists the skills it needs, and job seekers carry a
//! skill profile. This crate only describes those values; scoring lives in
//! `equimatch-skills`.
//!
//! ```text
//! ┌──────────────┐    ┌─────────────────┐    ┌──────────────────┐
//! │  UI / JSON   │───▶│  SkillLike      │───▶│  Skill           │
//! │              │    │  "React"        │    │  name + level    │
//! │              │    │  {skill, level} │    │                  │
//! └──────────────┘    └─────────────────┘    └──────────────────┘
//! ```
//!
//! ## Skills
//!
//! Every skill value is normalized once at the boundary through [`SkillLike`], so the
//! rest of the workspace only ever sees [`Skill`]:
//!
//! ```rust
//! use equimatch_core::{Skill, SkillLevel, SkillLike};
//!
//! let bare: Skill = SkillLike::from("React").into();
//! assert_eq!(bare.level, SkillLevel::Intermediate);
//!
//! let detailed = Skill::new("TypeScript", SkillLevel::Expert);
//! assert_eq!(detailed.key(), "typescript");
//! ```
//!
//! ## Roles and equity
//!
//! A [`Role`] groups [`Task`]s; anything implementing [`RequiresSkills`] can be ranked.
//! Completed tasks draw from the role's equity cap through an [`EquityLedger`].

mod equity;
mod role;
mod score;
mod skill;

pub use equity::{Allocation, EquityBps, EquityError, EquityLedger};
pub use role::{RequiresSkills, Role, Task};
pub use score::MatchScore;
pub use skill::{Skill, SkillLevel, SkillLike};
