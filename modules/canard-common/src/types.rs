use serde::{Deserialize, Serialize};

/// A single trivia statement and its ground-truth label.
///
/// Statements are normalized on ingestion: trimmed, with any leading
/// ordinal marker ("1. ", "2. ", ...) stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    pub statement: String,
    pub is_true: bool,
}

impl Fact {
    /// An accurate fact.
    pub fn accurate(statement: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            is_true: true,
        }
    }

    /// A false fact, the canard the player is hunting.
    pub fn canard(statement: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            is_true: false,
        }
    }
}
