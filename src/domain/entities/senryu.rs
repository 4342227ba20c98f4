//! Classified senryu bot message.

use std::fmt;

use super::UserId;

/// Semantic variant of a senryu bot message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SenryuKind {
    /// Not a recognised senryu announcement.
    Unknown,
    /// A poem was detected in somebody's message.
    Detected,
    /// Rebuke of the most recent poet, optionally naming them by mention.
    Forbidden {
        /// Mentioned author, when the rebuke names someone explicitly.
        referenced_author: Option<UserId>,
    },
    /// Call for a composition, backed by recorded candidate authors.
    Prompted,
}

impl fmt::Display for SenryuKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Detected => write!(f, "detected"),
            Self::Forbidden {
                referenced_author: Some(id),
            } => write!(f, "forbidden(<@{id}>)"),
            Self::Forbidden {
                referenced_author: None,
            } => write!(f, "forbidden"),
            Self::Prompted => write!(f, "prompted"),
        }
    }
}

/// Result of classifying one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenryuEvent {
    kind: SenryuKind,
    text: String,
}

impl SenryuEvent {
    /// Creates event of `kind` carrying `text`.
    #[must_use]
    pub fn new(kind: SenryuKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Event for a message without a quoted poem.
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            kind: SenryuKind::Unknown,
            text: String::new(),
        }
    }

    /// Returns the classified kind.
    #[must_use]
    pub const fn kind(&self) -> SenryuKind {
        self.kind
    }

    /// Poem body with one line per verse.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the pipeline should render this event.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        self.kind != SenryuKind::Unknown && !self.text.is_empty()
    }
}
