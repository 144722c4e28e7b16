//! Roles posted by businesses and the tasks they are split into.

use serde::{Deserialize, Serialize};

use crate::{EquityBps, EquityError, EquityLedger, Skill};

/// Anything that can be scored against a candidate profile.
///
/// Implementors yield every required skill in a stable order. Duplicates are kept;
/// each occurrence carries its own weight when scored.
pub trait RequiresSkills {
    /// Flattened list of required skills.
    fn required_skills(&self) -> impl Iterator<Item = &Skill>;
}

impl<T: RequiresSkills + ?Sized> RequiresSkills for &T {
    fn required_skills(&self) -> impl Iterator<Item = &Skill> {
        (**self).required_skills()
    }
}

impl RequiresSkills for [Skill] {
    fn required_skills(&self) -> impl Iterator<Item = &Skill> {
        self.iter()
    }
}

impl RequiresSkills for Vec<Skill> {
    fn required_skills(&self) -> impl Iterator<Item = &Skill> {
        self.iter()
    }
}

/// A unit of work inside a role.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable identifier.
    #[serde(default)]
    pub id: String,
    /// Short description.
    #[serde(default)]
    pub title: String,
    /// Skills this task needs.
    #[serde(default, alias = "skillsRequired", alias = "skills")]
    pub required_skills: Vec<Skill>,
    /// Equity granted on completion.
    #[serde(default)]
    pub equity: EquityBps,
    /// Whether the task has been signed off.
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create a task with the given requirements.
    #[must_use]
    pub fn new(id: impl Into<String>, required_skills: Vec<Skill>) -> Self {
        Self {
            id: id.into(),
            required_skills,
            ..Self::default()
        }
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the equity granted on completion.
    #[must_use]
    pub const fn with_equity(mut self, equity: EquityBps) -> Self {
        self.equity = equity;
        self
    }

    /// Mark the task completed.
    #[must_use]
    pub const fn completed(mut self) -> Self {
        self.completed = true;
        self
    }
}

impl RequiresSkills for Task {
    fn required_skills(&self) -> impl Iterator<Item = &Skill> {
        self.required_skills.iter()
    }
}

/// A role (project opening) made of one or more tasks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Stable identifier.
    #[serde(default)]
    pub id: String,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Tasks, in display order.
    #[serde(default, alias = "subTasks")]
    pub tasks: Vec<Task>,
}

impl Role {
    /// Create a role with no tasks.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tasks: Vec::new(),
        }
    }

    /// Append a task.
    #[must_use]
    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// Total equity offered across all tasks, saturating at 100 %.
    #[must_use]
    pub fn offered_equity(&self) -> EquityBps {
        self.tasks
            .iter()
            .fold(EquityBps::ZERO, |acc, task| acc.saturating_add(task.equity))
    }

    /// Build a ledger under `cap` from the tasks already completed.
    ///
    /// Tasks with a blank id are recorded under their position, `#0`, `#1` and so on.
    ///
    /// # Errors
    ///
    /// Returns [`EquityError::CapExceeded`] when completed tasks already exceed the cap,
    /// or [`EquityError::AlreadyAllocated`] when two completed tasks share an id.
    pub fn equity_ledger(&self, cap: EquityBps) -> Result<EquityLedger, EquityError> {
        let mut ledger = EquityLedger::new(cap);
        for (index, task) in self.tasks.iter().enumerate().filter(|(_, t)| t.completed) {
            let key = if task.id.trim().is_empty() {
                format!("#{index}")
            } else {
                task.id.clone()
            };
            ledger.allocate(key, task.equity)?;
        }
        Ok(ledger)
    }
}

impl RequiresSkills for Role {
    fn required_skills(&self) -> impl Iterator<Item = &Skill> {
        self.tasks.iter().flat_map(|task| task.required_skills.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SkillLevel;

    fn sample_role() -> Role {
        Role::new("r1", "Frontend build")
            .with_task(
                Task::new(
                    "t1",
                    vec![Skill::named("React"), Skill::new("CSS", SkillLevel::Beginner)],
                )
                .with_equity(EquityBps::new(150))
                .completed(),
            )
            .with_task(
                Task::new("t2", vec![Skill::new("Node.js", SkillLevel::Expert)])
                    .with_equity(EquityBps::new(250)),
            )
    }

    #[test]
    fn role_flattens_requirements_in_order() {
        let role = sample_role();
        let names: Vec<&str> = role.required_skills().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["React", "CSS", "Node.js"]);
    }

    #[test]
    fn offered_equity_sums_tasks() {
        assert_eq!(sample_role().offered_equity(), EquityBps::new(400));
    }

    #[test]
    fn ledger_counts_completed_tasks_only() {
        let ledger = sample_role().equity_ledger(EquityBps::new(1_000)).unwrap();
        assert_eq!(ledger.allocated(), EquityBps::new(150));
        assert_eq!(ledger.remaining(), EquityBps::new(850));
    }

    #[test]
    fn ledger_rejects_completed_work_over_cap() {
        let result = sample_role().equity_ledger(EquityBps::new(100));
        assert!(matches!(result, Err(EquityError::CapExceeded { .. })));
    }

    #[test]
    fn ledger_keys_unnamed_tasks_by_position() {
        let role: Role = serde_json::from_str(
            r#"{"tasks":[{"equity":100,"completed":true},{"equity":40},{"equity":100,"completed":true}]}"#,
        )
        .unwrap();

        let ledger = role.equity_ledger(EquityBps::new(1_000)).unwrap();
        assert_eq!(ledger.allocated(), EquityBps::new(200));
        let keys: Vec<&str> = ledger.allocations().iter().map(|a| a.task_id.as_str()).collect();
        assert_eq!(keys, vec!["#0", "#2"]);
    }

    #[test]
    fn ledger_rejects_repeated_task_ids() {
        let role = Role::new("r", "Twice")
            .with_task(Task::new("same", vec![]).with_equity(EquityBps::new(10)).completed())
            .with_task(Task::new("same", vec![]).with_equity(EquityBps::new(10)).completed());
        assert!(matches!(
            role.equity_ledger(EquityBps::FULL),
            Err(EquityError::AlreadyAllocated { task_id }) if task_id == "same"
        ));
    }

    #[test]
    fn deserializes_camel_case_rows() {
        let role: Role = serde_json::from_str(
            r#"{
                "id": "r9",
                "title": "Data pipeline",
                "subTasks": [
                    {"id": "a", "skillsRequired": ["Python", {"skill": "SQL", "level": "Expert"}], "equity": 50}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(role.tasks.len(), 1);
        assert_eq!(role.tasks[0].required_skills[1].level, SkillLevel::Expert);
        assert_eq!(role.tasks[0].equity, EquityBps::new(50));
        assert!(!role.tasks[0].completed);
    }
}
