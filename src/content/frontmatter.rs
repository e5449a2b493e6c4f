//! Front-matter parsing

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

use super::ContentError;

/// Render a YAML scalar as the string it was written as
fn scalar_to_string(value: Value) -> Option<Result<String, &'static str>> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(Ok(s)),
        Value::Number(n) => Some(Ok(n.to_string())),
        Value::Bool(b) => Some(Ok(b.to_string())),
        Value::Tagged(tagged) => scalar_to_string(tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => Some(Err("expected a scalar value")),
    }
}

/// Accepts any scalar (`date: 2024-01-15`, `title: 1999`) as a string
///
/// An empty string counts as absent, so `title: ""` falls back like a
/// missing title.
fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match scalar_to_string(Value::deserialize(deserializer)?) {
        None => Ok(None),
        Some(Ok(s)) if s.is_empty() => Ok(None),
        Some(Ok(s)) => Ok(Some(s)),
        Some(Err(msg)) => Err(D::Error::custom(msg)),
    }
}

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Sequence(items) => items
            .into_iter()
            .filter_map(scalar_to_string)
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
            .map_err(D::Error::custom),
        Value::Mapping(_) => Err(D::Error::custom("expected a string or a list of strings")),
        scalar => match scalar_to_string(scalar) {
            Some(Ok(s)) => Ok(Some(vec![s])),
            Some(Err(msg)) => Err(D::Error::custom(msg)),
            None => Ok(None),
        },
    }
}

/// Front-matter data from a post
///
/// Every field is optional here; which ones are required depends on whether
/// the post is being listed or loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "loose_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub slug: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Option<Vec<String>>,
    #[serde(deserialize_with = "loose_string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub mitre: Option<Vec<String>>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tools: Option<Vec<String>>,
    #[serde(deserialize_with = "string_or_vec")]
    pub reviewers: Option<Vec<String>>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// A file that does not open with a `---` line has no front-matter and is
    /// all body. An opening fence without a closing one is malformed.
    pub fn parse(content: &str) -> Result<(Self, &str), ContentError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let Some(after_open) = strip_opening_fence(content) else {
            return Ok((FrontMatter::default(), content));
        };

        let mut offset = 0;
        for line in after_open.split_inclusive('\n') {
            if is_fence(line) {
                let yaml = &after_open[..offset];
                let body = after_open[offset + line.len()..].trim_start_matches(['\n', '\r']);
                return Ok((Self::from_yaml(yaml)?, body));
            }
            offset += line.len();
        }

        Err(ContentError::UnterminatedFrontMatter)
    }

    fn from_yaml(yaml: &str) -> Result<Self, ContentError> {
        if yaml.trim().is_empty() {
            return Ok(FrontMatter::default());
        }

        match serde_yaml::from_str::<Value>(yaml)? {
            Value::Null => Ok(FrontMatter::default()),
            value @ Value::Mapping(_) => Ok(serde_yaml::from_value(value)?),
            _ => Err(ContentError::NotAMapping),
        }
    }
}

fn is_fence(line: &str) -> bool {
    line.trim_end() == "---"
}

fn strip_opening_fence(content: &str) -> Option<&str> {
    let line_end = content.find('\n').map(|i| i + 1).unwrap_or(content.len());
    if is_fence(&content[..line_end]) {
        Some(&content[line_end..])
    } else {
        None
    }
}
