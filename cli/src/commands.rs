//! Subcommand implementations. Each returns the JSON value to print.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use equimatch_core::{MatchScore, Role, Skill};
use equimatch_skills::{MatcherConfig, SkillMatcher, TableLoader, skills_from_value};
use serde_json::{Value, json};

/// Expand ~ to home directory in a path.
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}

/// Build the matcher from an optional config file and an optional extra table.
pub async fn build_matcher(config: Option<&Path>, table: Option<&Path>) -> Result<SkillMatcher> {
    let config = match config {
        Some(path) => TableLoader::load_config(path)
            .await
            .with_context(|| format!("failed to load matcher config from {}", path.display()))?,
        None => MatcherConfig::default(),
    };

    let matcher = SkillMatcher::from_config(&config)
        .await
        .context("failed to build matcher")?;

    let Some(path) = table else {
        return Ok(matcher);
    };

    let extra = TableLoader::new()
        .require_path(path)
        .load()
        .await
        .with_context(|| format!("failed to load related-skills table from {}", path.display()))?;

    let mut related = matcher.related().clone();
    related.merge(&extra);
    tracing::debug!(entries = related.len(), "overlaid extra related-skills table");

    Ok(SkillMatcher::with_table(related).with_weights(*matcher.weights()))
}

/// `score`: one candidate against one requirement list.
pub async fn score(
    matcher: &SkillMatcher,
    candidate: &Path,
    required: &Path,
    explain: bool,
) -> Result<Value> {
    let candidate = read_skills(candidate).await?;
    let required = read_skills(required).await?;

    if explain {
        let breakdown = matcher.explain(&candidate, &required);
        return Ok(serde_json::to_value(breakdown)?);
    }

    let score = matcher.compute_match(&candidate, &required);
    Ok(json!({ "skillMatch": score }))
}

/// `rank`: roles for a candidate, best first, optionally filtered.
pub async fn rank(
    matcher: &SkillMatcher,
    candidate: &Path,
    roles: &Path,
    min: u8,
) -> Result<Value> {
    let candidate = read_skills(candidate).await?;
    let roles: Vec<Role> = serde_json::from_str(&read(roles).await?)
        .with_context(|| format!("{} must contain a JSON array of roles", roles.display()))?;

    let ranked = matcher.filter_by_min_score(roles, &candidate, MatchScore::new(min));
    Ok(serde_json::to_value(ranked)?)
}

/// `suggest`: related skills the candidate could add.
pub async fn suggest(matcher: &SkillMatcher, candidate: &Path) -> Result<Value> {
    let candidate = read_skills(candidate).await?;
    Ok(serde_json::to_value(matcher.suggest_related_skills(&candidate))?)
}

/// `related`: a single table entry.
pub fn related(matcher: &SkillMatcher, name: &str) -> Value {
    json!({
        "skill": name.to_lowercase(),
        "related": matcher.related_skills_of(name),
    })
}

async fn read(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))
}

async fn read_skills(path: &Path) -> Result<Vec<Skill>> {
    let value: Value = serde_json::from_str(&read(path).await?)
        .with_context(|| format!("failed to parse {} as JSON", path.display()))?;

    let Some(skills) = skills_from_value(&value) else {
        bail!("{} must contain a JSON array of skills", path.display());
    };
    Ok(skills)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).expect("write fixture");
        path
    }

    #[tokio::test]
    async fn score_reads_both_shapes() {
        let dir = tempdir().expect("create temp dir");
        let candidate = write(&dir, "me.json", r#"["React", {"skill": "CSS", "level": "Expert"}]"#);
        let required = write(&dir, "task.json", r#"[{"skill": "react"}, {"name": "css", "level": "Beginner"}]"#);

        let matcher = SkillMatcher::new();
        let output = score(&matcher, &candidate, &required, false).await.unwrap();
        assert_eq!(output, json!({ "skillMatch": 100 }));
    }

    #[tokio::test]
    async fn score_explain_lists_requirements() {
        let dir = tempdir().expect("create temp dir");
        let candidate = write(&dir, "me.json", r#"["javascript"]"#);
        let required = write(&dir, "task.json", r#"["react"]"#);

        let output = score(&SkillMatcher::new(), &candidate, &required, true)
            .await
            .unwrap();
        assert_eq!(output["score"], 30);
        assert_eq!(output["requirements"][0][1]["kind"], "related");
        assert_eq!(output["requirements"][0][1]["via"], "javascript");
    }

    #[tokio::test]
    async fn score_rejects_non_array() {
        let dir = tempdir().expect("create temp dir");
        let candidate = write(&dir, "me.json", r#"{"skill": "React"}"#);
        let required = write(&dir, "task.json", r#"["React"]"#);

        let err = score(&SkillMatcher::new(), &candidate, &required, false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("JSON array of skills"));
    }

    #[tokio::test]
    async fn rank_filters_and_orders() {
        let dir = tempdir().expect("create temp dir");
        let candidate = write(&dir, "me.json", r#"[{"skill": "Python", "level": "Expert"}]"#);
        let roles = write(
            &dir,
            "roles.json",
            r#"[
                {"id": "ios", "title": "iOS app", "tasks": [{"id": "t1", "requiredSkills": ["Swift"]}]},
                {"id": "etl", "title": "ETL", "tasks": [{"id": "t2", "requiredSkills": ["Python", "Airflow"]}]},
                {"id": "api", "title": "API", "tasks": [{"id": "t3", "requiredSkills": ["python"]}]}
            ]"#,
        );

        let output = rank(&SkillMatcher::new(), &candidate, &roles, 40).await.unwrap();
        let ids: Vec<&str> = output
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["api", "etl"]);
        assert_eq!(output[1]["skillMatch"], 50);
    }

    #[tokio::test]
    async fn suggest_uses_extra_table() {
        let dir = tempdir().expect("create temp dir");
        let candidate = write(&dir, "me.json", r#"["Elixir"]"#);
        let table = write(&dir, "extra.yaml", "elixir: [erlang, phoenix]\n");

        let matcher = build_matcher(None, Some(&table)).await.unwrap();
        let output = suggest(&matcher, &candidate).await.unwrap();

        assert_eq!(
            output,
            json!([
                {"skill": "erlang", "level": "Beginner"},
                {"skill": "phoenix", "level": "Beginner"}
            ])
        );
        assert!(matcher.related().contains("react"));
    }

    #[tokio::test]
    async fn build_matcher_reads_config() {
        let dir = tempdir().expect("create temp dir");
        let config = write(&dir, "matcher.yaml", "weights:\n  related_credit: 0.5\n");

        let matcher = build_matcher(Some(&config), None).await.unwrap();
        assert_eq!(matcher.weights().related_credit, 0.5);
    }

    #[tokio::test]
    async fn build_matcher_rejects_missing_table() {
        let dir = tempdir().expect("create temp dir");
        let missing = dir.path().join("typo.yaml");

        let err = build_matcher(None, Some(&missing)).await.unwrap_err();
        assert!(err.to_string().contains("failed to load related-skills table"));
    }

    #[tokio::test]
    async fn build_matcher_rejects_missing_configured_table() {
        let dir = tempdir().expect("create temp dir");
        let config = write(&dir, "matcher.yaml", "table_path: typo.yaml\nextend_builtin: false\n");

        let err = build_matcher(Some(&config), None).await.unwrap_err();
        assert!(err.to_string().contains("failed to build matcher"));
    }

    #[test]
    fn related_lowercases_name() {
        let output = related(&SkillMatcher::new(), "React");
        assert_eq!(output["skill"], "react");
        assert!(
            output["related"]
                .as_array()
                .unwrap()
                .contains(&json!("javascript"))
        );
    }

    #[test]
    fn expand_tilde_leaves_plain_paths() {
        assert_eq!(expand_tilde(Path::new("./a.yaml")), PathBuf::from("./a.yaml"));
    }
}
