use std::sync::OnceLock;

use regex::Regex;

use crate::domain::entities::{SenryuEvent, SenryuKind, UserId};

const DETECTED_PREFIX: &str = "川柳を検出しました！";
const PROMPTED_PREFIX: &str = "ここで一句";
const FORBIDDEN_MARKER: &str = "って詠んだのが最後やぞ";
const SECOND_PERSON_PREFIX: &str = "お前が";

fn quoted_span_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"「([^」]+)」").expect("Invalid regex"))
}

fn mention_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<@!?(\d+)>\s*が").expect("Invalid regex"))
}

/// Turns senryu bot messages into typed events.
pub struct SenryuClassifier;

impl SenryuClassifier {
    /// Classifies a bot message.
    ///
    /// Only the first `「…」` span is considered. Its half-width spaces become
    /// line breaks. The message prefix decides the kind; a message with a
    /// span but no recognised prefix is `Unknown` yet still carries the text.
    #[must_use]
    pub fn classify(content: &str) -> SenryuEvent {
        let Some(span) = quoted_span_regex()
            .captures(content)
            .and_then(|captures| captures.get(1))
        else {
            return SenryuEvent::unknown();
        };

        let text = span.as_str().replace(' ', "\n");

        if content.starts_with(DETECTED_PREFIX) {
            return SenryuEvent::new(SenryuKind::Detected, text);
        }

        if content.starts_with(PROMPTED_PREFIX) {
            return SenryuEvent::new(SenryuKind::Prompted, text);
        }

        if content.contains(FORBIDDEN_MARKER) {
            if let Some(referenced_author) = Self::mentioned_author(content) {
                return SenryuEvent::new(
                    SenryuKind::Forbidden {
                        referenced_author: Some(referenced_author),
                    },
                    text,
                );
            }
            if content.starts_with(SECOND_PERSON_PREFIX) {
                return SenryuEvent::new(
                    SenryuKind::Forbidden {
                        referenced_author: None,
                    },
                    text,
                );
            }
        }

        SenryuEvent::new(SenryuKind::Unknown, text)
    }

    fn mentioned_author(content: &str) -> Option<UserId> {
        mention_regex()
            .captures(content)
            .and_then(|captures| captures.get(1))
            .and_then(|digits| digits.as_str().parse().ok())
    }
}
