//! User limit classification

use serde::{Deserialize, Serialize};
use std::fmt;

use super::NotificationKind;

/// Outcome of comparing a tenant's seat count against its plan limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitClassification {
    /// Seats remain, or the tenant is already past the one-over mark
    Under,
    /// Seat count equals the limit
    AtLimit,
    /// Seat count is exactly one above the limit
    OneOverLimit,
    /// Not cloud-licensed or on the paid tier
    NotApplicable,
}

impl fmt::Display for LimitClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitClassification::Under => write!(f, "under"),
            LimitClassification::AtLimit => write!(f, "at_limit"),
            LimitClassification::OneOverLimit => write!(f, "one_over_limit"),
            LimitClassification::NotApplicable => write!(f, "not_applicable"),
        }
    }
}

impl LimitClassification {
    /// Warning to send for this classification, if any
    pub fn warning(&self) -> Option<NotificationKind> {
        match self {
            LimitClassification::AtLimit => Some(NotificationKind::AtLimitWarning),
            LimitClassification::OneOverLimit => Some(NotificationKind::OverLimitWarning),
            LimitClassification::Under | LimitClassification::NotApplicable => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_mapping() {
        assert_eq!(
            LimitClassification::AtLimit.warning(),
            Some(NotificationKind::AtLimitWarning)
        );
        assert_eq!(
            LimitClassification::OneOverLimit.warning(),
            Some(NotificationKind::OverLimitWarning)
        );
        assert_eq!(LimitClassification::Under.warning(), None);
        assert_eq!(LimitClassification::NotApplicable.warning(), None);
    }
}
