use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of documentation topics.
///
/// Membership in this enumeration is the sole validity check a requested
/// topic goes through; every variant maps to exactly one packaged markdown
/// file, so no caller-supplied string ever becomes a path component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topic {
    EssentialKnowledge,
    BasicUi,
    Authentication,
    Routing,
    Customizing,
    CreatingComponents,
}

impl Topic {
    /// Every topic, in recommended presentation order.
    pub const ALL: [Topic; 6] = [
        Topic::EssentialKnowledge,
        Topic::BasicUi,
        Topic::Authentication,
        Topic::Routing,
        Topic::Customizing,
        Topic::CreatingComponents,
    ];

    /// Wire identifier, matching the serde kebab-case rename.
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::EssentialKnowledge => "essential-knowledge",
            Topic::BasicUi => "basic-ui",
            Topic::Authentication => "authentication",
            Topic::Routing => "routing",
            Topic::Customizing => "customizing",
            Topic::CreatingComponents => "creating-components",
        }
    }

    /// The packaged markdown file backing this topic.
    pub fn filename(&self) -> &'static str {
        match self {
            Topic::EssentialKnowledge => "essential-knowledge.md",
            Topic::BasicUi => "basic-ui-setup.md",
            Topic::Authentication => "authentication-setup.md",
            Topic::Routing => "routing-implementation.md",
            Topic::Customizing => "customizing-the-application.md",
            Topic::CreatingComponents => "creating-components.md",
        }
    }

    /// Comma-separated list of every valid topic, for error messages and
    /// tool descriptions.
    pub fn supported() -> String {
        Self::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A requested topic outside the closed enumeration.
///
/// The message names the rejected value and lists every valid topic so an
/// automated caller can self-correct.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid topic: {}. Must be one of: {}", .topic, Topic::supported())]
pub struct InvalidTopic {
    pub topic: String,
}

impl FromStr for Topic {
    type Err = InvalidTopic;

    /// Exact, case-sensitive match; no normalization, no fuzzy matching.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| InvalidTopic {
                topic: s.to_string(),
            })
    }
}
