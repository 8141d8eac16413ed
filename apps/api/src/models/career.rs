//! Request-scoped career entities. Nothing here outlives a single action.

use serde::{Deserialize, Deserializer, Serialize};

/// Skills and interests as entered by the user, in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(deserialize_with = "comma_list")]
    pub skills: Vec<String>,
    #[serde(deserialize_with = "comma_list")]
    pub interests: Vec<String>,
}

/// A target job, optionally with the skills the user already has.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobQuery {
    #[serde(alias = "job_title", alias = "target_job")]
    pub title: String,
    #[serde(default, deserialize_with = "optional_comma_list")]
    pub current_skills: Option<Vec<String>>,
}

/// A titled link to an external learning material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningResource {
    pub title: String,
    pub link: String,
}

/// Joins a field list the way prompts and the UI display it.
pub fn display_list(items: &[String]) -> String {
    items.join(", ")
}

/// Splits comma-delimited user input, trimming entries and dropping blanks.
pub fn split_comma_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListInput {
    Text(String),
    Items(Vec<String>),
}

impl ListInput {
    fn into_items(self) -> Vec<String> {
        match self {
            ListInput::Text(raw) => split_comma_list(&raw),
            ListInput::Items(items) => items
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        }
    }
}

/// Accepts either `"Python, SQL"` or `["Python", "SQL"]`.
fn comma_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(ListInput::deserialize(deserializer)?.into_items())
}

fn optional_comma_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ListInput>::deserialize(deserializer)?.map(ListInput::into_items))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_accepts_comma_delimited_strings() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"skills": "Python, SQL ,, Communication", "interests": "Data Science"}"#)
                .unwrap();
        assert_eq!(profile.skills, vec!["Python", "SQL", "Communication"]);
        assert_eq!(profile.interests, vec!["Data Science"]);
    }

    #[test]
    fn test_profile_accepts_arrays() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"skills": ["Rust", " "], "interests": ["Systems"]}"#).unwrap();
        assert_eq!(profile.skills, vec!["Rust"]);
        assert_eq!(profile.interests, vec!["Systems"]);
    }

    #[test]
    fn test_job_query_aliases_and_optional_skills() {
        let query: JobQuery = serde_json::from_str(r#"{"job_title": "Data Analyst"}"#).unwrap();
        assert_eq!(query.title, "Data Analyst");
        assert!(query.current_skills.is_none());

        let query: JobQuery =
            serde_json::from_str(r#"{"target_job": "Data Scientist", "current_skills": "Python, Excel"}"#)
                .unwrap();
        assert_eq!(query.title, "Data Scientist");
        assert_eq!(
            query.current_skills,
            Some(vec!["Python".to_string(), "Excel".to_string()])
        );
    }

    #[test]
    fn test_display_list_preserves_order() {
        let items = vec!["SQL".to_string(), "Python".to_string()];
        assert_eq!(display_list(&items), "SQL, Python");
    }
}
