//! Processing status of a contact message

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle: `new` -> `in_progress` -> `completed`, or `cancelled`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    #[default]
    New,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown contact status: {0}")]
pub struct ContactStatusParseError(pub String);

impl ContactStatus {
    pub const ALL: [Self; 4] = [Self::New, Self::InProgress, Self::Completed, Self::Cancelled];

    /// Value stored in the database
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Label shown to operators
    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "Новое",
            Self::InProgress => "В работе",
            Self::Completed => "Завершено",
            Self::Cancelled => "Отменено",
        }
    }

    /// Whether no further processing is expected
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactStatus {
    type Err = ContactStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ContactStatusParseError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_str() {
        for status in ContactStatus::ALL {
            assert_eq!(status.as_str().parse::<ContactStatus>().unwrap(), status);
        }
        assert!("done".parse::<ContactStatus>().is_err());
    }

    #[test]
    fn test_closed_states() {
        assert!(!ContactStatus::New.is_closed());
        assert!(!ContactStatus::InProgress.is_closed());
        assert!(ContactStatus::Completed.is_closed());
        assert!(ContactStatus::Cancelled.is_closed());
    }
}
