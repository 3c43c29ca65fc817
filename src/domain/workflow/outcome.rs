//! Result of one information gatherer

use std::fmt;

/// What a gatherer produced. Only [`GathererOutcome::Cancelled`] stops the
/// run; every other variant lets the fan-in proceed.
#[derive(Debug, Clone, PartialEq)]
pub enum GathererOutcome<T> {
    Collected(T),
    Skipped { reason: String },
    Failed { reason: String },
    Cancelled,
}

impl<T> GathererOutcome<T> {
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            reason: reason.into(),
        }
    }

    pub fn failed(reason: impl fmt::Display) -> Self {
        Self::Failed {
            reason: reason.to_string(),
        }
    }

    /// Label used for metrics and logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::Collected(_) => "collected",
            Self::Skipped { .. } => "skipped",
            Self::Failed { .. } => "failed",
            Self::Cancelled => "cancelled",
        }
    }

    /// The gatherer ran to completion, with or without data
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Collected(_) | Self::Skipped { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Collected(value) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(GathererOutcome::Collected(1).label(), "collected");
        assert_eq!(GathererOutcome::<u8>::skipped("USD").label(), "skipped");
        assert_eq!(GathererOutcome::<u8>::failed("timeout").label(), "failed");
        assert_eq!(GathererOutcome::<u8>::Cancelled.label(), "cancelled");
    }

    #[test]
    fn test_finished_outcomes() {
        assert!(GathererOutcome::Collected("x").is_finished());
        assert!(GathererOutcome::<()>::skipped("no coordinates").is_finished());
        assert!(!GathererOutcome::<()>::failed("boom").is_finished());
        assert!(!GathererOutcome::<()>::Cancelled.is_finished());
    }

    #[test]
    fn test_into_value() {
        assert_eq!(GathererOutcome::Collected(5).into_value(), Some(5));
        assert_eq!(GathererOutcome::<i32>::failed("boom").into_value(), None);
    }
}
