//! Response Structurer: turns raw completion text into typed records.
//!
//! Resource lists are parsed by an ordered chain of strategies. Each strategy
//! returns a `ParseAttempt`; the first `Parsed` wins and is normalized so every
//! link is dereferenceable. The last strategy accepts any input, so this module
//! never fails.

use serde::Deserialize;
use tracing::debug;

use crate::llm_client::strip_json_fences;
use crate::models::career::LearningResource;

const SEARCH_URL_PREFIX: &str = "https://www.youtube.com/results?search_query=";
const FALLBACK_TITLE: &str = "Resource";

/// How a completion reply is read. The mode fixes the output type, so callers
/// get a `String` or a resource list without matching on a union.
pub trait ParseMode {
    type Output;

    fn parse(raw_text: &str) -> Self::Output;
}

/// Passes the text through unchanged.
pub struct Plain;

/// Best-effort `LearningResource` list; see `parse_resources`.
pub struct ResourceList;

impl ParseMode for Plain {
    type Output = String;

    fn parse(raw_text: &str) -> String {
        raw_text.to_string()
    }
}

impl ParseMode for ResourceList {
    type Output = Vec<LearningResource>;

    fn parse(raw_text: &str) -> Vec<LearningResource> {
        parse_resources(raw_text)
    }
}

/// Outcome of a single strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseAttempt {
    Parsed(Vec<LearningResource>),
    Rejected(&'static str),
}

type Strategy = fn(&str) -> ParseAttempt;

/// Tried in order.
const RESOURCE_STRATEGIES: &[(&str, Strategy)] = &[
    ("json_list", parse_json_list),
    ("delimited_lines", parse_delimited_lines),
    ("raw_text", parse_raw_text),
];

pub fn structure<M: ParseMode>(raw_text: &str) -> M::Output {
    M::parse(raw_text)
}

/// Best-effort resource-list parse. Non-empty input always yields a non-empty list.
pub fn parse_resources(raw_text: &str) -> Vec<LearningResource> {
    for (name, strategy) in RESOURCE_STRATEGIES {
        match strategy(raw_text) {
            ParseAttempt::Parsed(resources) => {
                debug!("Resource list parsed by '{name}' ({} entries)", resources.len());
                return resources.into_iter().map(normalize_link).collect();
            }
            ParseAttempt::Rejected(reason) => {
                debug!("Resource strategy '{name}' rejected input: {reason}");
            }
        }
    }
    Vec::new()
}

/// Search URL for a title: spaces become `+`, nothing else is encoded.
pub fn search_url(title: &str) -> String {
    format!("{SEARCH_URL_PREFIX}{}", title.trim().replace(' ', "+"))
}

fn normalize_link(resource: LearningResource) -> LearningResource {
    if resource.link.starts_with("http") {
        resource
    } else {
        let link = search_url(&resource.title);
        LearningResource {
            title: resource.title,
            link,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Strategies
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct JsonResource {
    title: String,
    #[serde(default, alias = "url")]
    link: String,
}

fn parse_json_list(raw_text: &str) -> ParseAttempt {
    let text = strip_json_fences(raw_text);
    if !text.starts_with('[') {
        return ParseAttempt::Rejected("not a JSON array");
    }
    match serde_json::from_str::<Vec<JsonResource>>(text) {
        Ok(items) if items.is_empty() => ParseAttempt::Rejected("empty JSON array"),
        Ok(items) => ParseAttempt::Parsed(
            items
                .into_iter()
                .map(|item| LearningResource {
                    title: item.title,
                    link: item.link,
                })
                .collect(),
        ),
        Err(_) => ParseAttempt::Rejected("malformed JSON resource list"),
    }
}

fn parse_delimited_lines(raw_text: &str) -> ParseAttempt {
    let resources: Vec<LearningResource> = raw_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_line)
        .collect();

    if resources.is_empty() {
        ParseAttempt::Rejected("no non-empty lines")
    } else {
        ParseAttempt::Parsed(resources)
    }
}

fn parse_raw_text(raw_text: &str) -> ParseAttempt {
    if raw_text.is_empty() {
        return ParseAttempt::Rejected("empty input");
    }
    let title = match raw_text.trim() {
        "" => FALLBACK_TITLE,
        trimmed => trimmed,
    };
    ParseAttempt::Parsed(vec![LearningResource {
        title: title.to_string(),
        link: String::new(),
    }])
}

/// `Title - link` → pair; `Title-link` → pair only when the link is a URL, so
/// hyphenated titles stay whole. Anything else → title only.
fn parse_line(line: &str) -> LearningResource {
    let content = strip_list_marker(line);

    for (delimiter, needs_url) in [(" - ", false), ("-", true)] {
        let parts: Vec<&str> = content.split(delimiter).map(str::trim).collect();
        if let [title, link] = parts.as_slice() {
            let accepted = !needs_url || link.starts_with("http");
            if !title.is_empty() && !link.is_empty() && accepted {
                return LearningResource {
                    title: title.to_string(),
                    link: link.to_string(),
                };
            }
        }
    }

    LearningResource {
        title: content.to_string(),
        link: String::new(),
    }
}

/// Drops a leading `-`, `*`, `•`, `1.` or `1)` marker.
fn strip_list_marker(line: &str) -> &str {
    let stripped = if let Some(rest) = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .or_else(|| line.strip_prefix("• "))
    {
        rest
    } else {
        let digits = line.chars().take_while(char::is_ascii_digit).count();
        let after = &line[digits..];
        match after.strip_prefix(". ").or_else(|| after.strip_prefix(") ")) {
            Some(rest) if digits > 0 => rest,
            _ => line,
        }
    };

    match stripped.trim() {
        "" => line,
        s => s,
    }
}
