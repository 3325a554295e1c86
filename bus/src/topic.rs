//! Validated topic names.
//!
//! A topic name doubles as a storage container identifier, so it must not
//! be able to escape the storage root. Names are rejected rather than
//! sanitized: silently rewriting a caller's topic name would alias
//! distinct topics and make a send/read pair surprising.

use std::fmt;

use crate::error::{Error, Result};

/// Maximum accepted topic name length in bytes.
const MAX_TOPIC_NAME_LEN: usize = 100;

/// A topic name that is safe to use as a container file name.
///
/// Accepted characters: ASCII alphanumeric, `-`, `_`, `.`. Names must be
/// non-empty, at most 100 bytes, and must not begin with `.` (which also
/// rules out `.` and `..` traversal components).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TopicName(String);

impl TopicName {
    /// Parses and validates a topic name.
    pub fn parse(name: &str) -> Result<Self> {
        let reject = |reason: &str| Error::InvalidTopicName {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        if name.is_empty() {
            return Err(reject("must not be empty"));
        }
        if name.len() > MAX_TOPIC_NAME_LEN {
            return Err(reject("exceeds 100 bytes"));
        }
        if name.starts_with('.') {
            return Err(reject("must not begin with '.'"));
        }
        if let Some(bad) = name
            .chars()
            .find(|&c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
        {
            return Err(reject(&format!(
                "character {bad:?} not allowed (use ASCII letters, digits, '-', '_', '.')"
            )));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of this topic's container under the storage root.
    pub(crate) fn container_file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl fmt::Display for TopicName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_simple_names() {
        for name in ["general", "t1", "agent-updates", "a_b.c", "0"] {
            assert!(TopicName::parse(name).is_ok(), "rejected {name:?}");
        }
    }

    #[test]
    fn should_reject_traversal_and_separators() {
        for name in ["..", "../etc", "a/b", "a\\b", "..secrets", ".hidden"] {
            let result = TopicName::parse(name);
            assert!(
                matches!(result, Err(Error::InvalidTopicName { .. })),
                "accepted {name:?}"
            );
        }
    }

    #[test]
    fn should_reject_empty_and_oversized_names() {
        assert!(TopicName::parse("").is_err());
        assert!(TopicName::parse(&"x".repeat(101)).is_err());
        assert!(TopicName::parse(&"x".repeat(100)).is_ok());
    }

    #[test]
    fn should_reject_non_ascii_and_control_characters() {
        for name in ["topic name", "t\0pic", "tópic", "a:b"] {
            assert!(TopicName::parse(name).is_err(), "accepted {name:?}");
        }
    }

    #[test]
    fn should_allow_interior_dots() {
        // given - dots are fine anywhere but the front
        let name = TopicName::parse("team.alpha.status").unwrap();

        // then
        assert_eq!(name.container_file_name(), "team.alpha.status.json");
    }
}
