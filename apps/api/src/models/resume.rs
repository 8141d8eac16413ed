use serde::{Deserialize, Serialize};

/// Text pulled out of an uploaded résumé. `source_text` is never empty: when
/// extraction fails it holds one of the sentinels in `document::extract`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeDocument {
    pub source_text: String,
}

/// Structured résumé fields for the template renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeFields {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub projects: Vec<String>,
}

impl ResumeFields {
    /// Contact items joined with a separator; `None` when neither is set.
    pub fn contact_line(&self) -> Option<String> {
        let parts: Vec<&str> = [self.email.as_deref(), self.phone.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" | "))
        }
    }
}

/// Input to the document renderer: free text lines or a résumé template.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderableDocument {
    Lines(Vec<String>),
    Resume(ResumeFields),
}

impl RenderableDocument {
    /// Splits text on newlines, keeping blank lines as vertical spacing.
    pub fn from_text(text: &str) -> Self {
        RenderableDocument::Lines(text.lines().map(String::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_line_joins_present_fields() {
        let fields = ResumeFields {
            name: "Ada".into(),
            email: Some("ada@example.com".into()),
            phone: Some("555-0100".into()),
            ..Default::default()
        };
        assert_eq!(
            fields.contact_line().as_deref(),
            Some("ada@example.com | 555-0100")
        );
    }

    #[test]
    fn test_contact_line_absent_when_empty() {
        let fields = ResumeFields {
            name: "Ada".into(),
            email: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(fields.contact_line(), None);
    }

    #[test]
    fn test_from_text_keeps_blank_lines() {
        let doc = RenderableDocument::from_text("Summary\n\nSkills");
        assert_eq!(
            doc,
            RenderableDocument::Lines(vec!["Summary".into(), "".into(), "Skills".into()])
        );
    }
}
