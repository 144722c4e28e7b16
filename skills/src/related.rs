//! Related-skills lookup table.
//!
//! The table maps a normalized skill name to names that are close enough to earn
//! partial credit when the exact skill is missing. Lookups are directional: an entry
//! for `react` says nothing about what `javascript` relates to.

use std::collections::HashMap;

use serde::Deserialize;

use crate::SkillError;

/// Curated default relations across common web, mobile, cloud and data stacks.
const BUILTIN: &[(&str, &[&str])] = &[
    // Web frontend
    ("javascript", &["typescript", "react", "node.js", "vue", "angular", "jquery", "express"]),
    ("typescript", &["javascript", "react", "angular", "node.js", "vue"]),
    ("react", &["javascript", "typescript", "react native", "next.js", "redux", "vue"]),
    ("vue", &["javascript", "typescript", "react", "nuxt.js", "angular"]),
    ("angular", &["typescript", "javascript", "react", "vue", "rxjs"]),
    ("next.js", &["react", "javascript", "typescript", "node.js"]),
    ("html", &["css", "javascript", "sass", "tailwind"]),
    ("css", &["html", "sass", "tailwind", "bootstrap"]),
    ("tailwind", &["css", "bootstrap", "sass"]),
    ("ui design", &["figma", "ux design", "sketch", "adobe xd"]),
    ("ux design", &["ui design", "figma", "user research", "prototyping"]),
    ("figma", &["sketch", "adobe xd", "ui design"]),
    // Backend
    ("node.js", &["javascript", "typescript", "express", "nestjs"]),
    ("express", &["node.js", "javascript", "nestjs"]),
    ("python", &["django", "flask", "fastapi", "pandas"]),
    ("django", &["python", "flask", "fastapi"]),
    ("flask", &["python", "django", "fastapi"]),
    ("java", &["kotlin", "spring", "scala"]),
    ("spring", &["java", "kotlin"]),
    ("c#", &[".net", "asp.net", "unity"]),
    (".net", &["c#", "asp.net", "f#"]),
    ("go", &["rust", "c++", "docker"]),
    ("rust", &["c++", "go", "c"]),
    ("c++", &["c", "rust", "c#"]),
    ("php", &["laravel", "wordpress", "symfony"]),
    ("laravel", &["php", "symfony"]),
    ("ruby", &["ruby on rails", "python"]),
    ("ruby on rails", &["ruby"]),
    ("graphql", &["rest api", "apollo", "node.js"]),
    ("rest api", &["graphql", "node.js", "express"]),
    // Mobile
    ("react native", &["react", "javascript", "typescript", "flutter"]),
    ("flutter", &["dart", "react native", "kotlin", "swift"]),
    ("swift", &["ios", "objective-c", "swiftui"]),
    ("ios", &["swift", "objective-c"]),
    ("kotlin", &["java", "android", "flutter"]),
    ("android", &["kotlin", "java"]),
    // Data
    ("sql", &["postgresql", "mysql", "sqlite", "sql server"]),
    ("postgresql", &["sql", "mysql", "supabase"]),
    ("mysql", &["sql", "postgresql", "mariadb"]),
    ("mongodb", &["nosql", "firebase", "dynamodb"]),
    ("firebase", &["supabase", "mongodb", "google cloud"]),
    ("supabase", &["postgresql", "firebase", "sql"]),
    ("data analysis", &["python", "pandas", "sql", "excel", "tableau"]),
    ("pandas", &["python", "numpy", "data analysis"]),
    ("machine learning", &["python", "tensorflow", "pytorch", "data science"]),
    ("data science", &["python", "machine learning", "statistics", "pandas"]),
    ("tensorflow", &["pytorch", "machine learning", "python"]),
    ("pytorch", &["tensorflow", "machine learning", "python"]),
    ("excel", &["google sheets", "data analysis"]),
    // Cloud and ops
    ("aws", &["azure", "google cloud", "docker", "terraform"]),
    ("azure", &["aws", "google cloud", ".net"]),
    ("google cloud", &["aws", "azure", "firebase"]),
    ("docker", &["kubernetes", "devops", "ci/cd"]),
    ("kubernetes", &["docker", "devops", "helm"]),
    ("devops", &["docker", "kubernetes", "ci/cd", "terraform"]),
    ("terraform", &["aws", "devops", "ansible"]),
    ("git", &["github", "gitlab", "ci/cd"]),
    // Business
    ("marketing", &["digital marketing", "seo", "content writing", "social media"]),
    ("digital marketing", &["marketing", "seo", "social media"]),
    ("seo", &["digital marketing", "content writing"]),
    ("content writing", &["copywriting", "seo", "marketing"]),
    ("project management", &["agile", "scrum", "product management"]),
    ("product management", &["project management", "agile", "ux design"]),
    ("agile", &["scrum", "project management"]),
];

/// Read-only lookup from a skill name to related skill names.
///
/// Build one with [`RelatedSkills::builtin`], [`RelatedSkills::from_yaml_str`] or the
/// [`RelatedSkills::with`] builder, then share it behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelatedSkills {
    entries: HashMap<String, Vec<String>>,
}

/// YAML shape: `skill: [related, ...]`.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct TableFile(HashMap<String, Vec<String>>);

impl RelatedSkills {
    /// An empty table; nothing earns partial credit.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The curated default table.
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN
            .iter()
            .fold(Self::empty(), |table, (name, related)| {
                table.with(*name, related.iter().copied())
            })
    }

    /// Parse a table from YAML.
    ///
    /// ```yaml
    /// react:
    ///   - javascript
    ///   - typescript
    /// rust: [c++, go]
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`SkillError::ParseTable`] if the YAML is not a mapping of names to lists.
    pub fn from_yaml_str(content: &str) -> Result<Self, SkillError> {
        if content.trim().is_empty() {
            return Ok(Self::empty());
        }
        let TableFile(raw) = serde_yaml::from_str(content).map_err(SkillError::ParseTable)?;

        let mut table = Self::empty();
        for (name, related) in raw {
            table.merge_entry(&name, related);
        }
        Ok(table)
    }

    /// Add relations for `name`, keeping any already present.
    #[must_use]
    pub fn with<I, S>(mut self, name: &str, related: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.merge_entry(name, related);
        self
    }

    /// Replace the relations for `name`.
    pub fn insert<I, S>(&mut self, name: &str, related: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.entries.remove(&normalize(name));
        self.merge_entry(name, related);
    }

    /// Overlay another table; relations for shared names are unioned.
    pub fn merge(&mut self, other: &Self) {
        for (name, related) in &other.entries {
            self.merge_entry(name, related);
        }
    }

    /// Related names for `name`, in table order. Unknown names yield an empty slice.
    #[must_use]
    pub fn get(&self, name: &str) -> &[String] {
        self.entries
            .get(&normalize(name))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether `name` has an entry.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&normalize(name))
    }

    /// Names with an entry, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn merge_entry<I, S>(&mut self, name: &str, related: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let key = normalize(name);
        if key.trim().is_empty() {
            return;
        }
        let slot = self.entries.entry(key).or_default();
        for other in related {
            let other = normalize(other.as_ref());
            if !other.trim().is_empty() && !slot.contains(&other) {
                slot.push(other);
            }
        }
    }
}

fn normalize(name: &str) -> String {
    name.to_lowercase()
}
