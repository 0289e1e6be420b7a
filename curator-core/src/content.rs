//! Content kind enumeration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of generated content a caller can request.
///
/// Closed enumeration so prompt-building logic is exhaustive at compile
/// time. Parsing from a string is total: unknown values map to [`Other`]
/// rather than failing, since callers may send arbitrary content-type
/// strings and the engine must accept them.
///
/// [`Other`]: ContentKind::Other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentKind {
    /// Engaging visitor description; the only kind backed by the cache slot.
    Description,
    /// Historical narrative.
    Story,
    /// Technical facts.
    Facts,
    /// Free-form Q&A grounded in the cached description.
    Conversation,
    /// Unrecognized request kind; served with generic prompts.
    Other,
}

impl ContentKind {
    /// Canonical lowercase tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Description => "description",
            ContentKind::Story => "story",
            ContentKind::Facts => "facts",
            ContentKind::Conversation => "conversation",
            ContentKind::Other => "other",
        }
    }
}

impl FromStr for ContentKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "description" => ContentKind::Description,
            "story" => ContentKind::Story,
            "facts" => ContentKind::Facts,
            "conversation" => ContentKind::Conversation,
            _ => ContentKind::Other,
        })
    }
}

impl From<String> for ContentKind {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(ContentKind::Other)
    }
}

impl From<ContentKind> for String {
    fn from(kind: ContentKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_kinds() {
        assert_eq!("description".parse(), Ok(ContentKind::Description));
        assert_eq!("story".parse(), Ok(ContentKind::Story));
        assert_eq!("facts".parse(), Ok(ContentKind::Facts));
        assert_eq!("conversation".parse(), Ok(ContentKind::Conversation));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Description".parse(), Ok(ContentKind::Description));
        assert_eq!("FACTS".parse(), Ok(ContentKind::Facts));
    }

    #[test]
    fn test_unknown_kind_falls_through_to_other() {
        assert_eq!("trivia".parse(), Ok(ContentKind::Other));
        assert_eq!("".parse(), Ok(ContentKind::Other));
    }

    #[test]
    fn test_serde_roundtrip_via_string() {
        let json = serde_json::to_string(&ContentKind::Story).unwrap();
        assert_eq!(json, "\"story\"");
        let kind: ContentKind = serde_json::from_str("\"Conversation\"").unwrap();
        assert_eq!(kind, ContentKind::Conversation);
        let kind: ContentKind = serde_json::from_str("\"no-such-kind\"").unwrap();
        assert_eq!(kind, ContentKind::Other);
    }
}
