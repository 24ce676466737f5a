use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use super::role::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown appointment status `{0}`")]
pub struct UnknownStatus(pub String);

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
        }
    }

    /// Statuses reachable in one step.
    pub fn next_statuses(&self) -> &'static [AppointmentStatus] {
        match self {
            AppointmentStatus::Scheduled => {
                &[AppointmentStatus::Confirmed, AppointmentStatus::Cancelled]
            }
            AppointmentStatus::Confirmed => {
                &[AppointmentStatus::Completed, AppointmentStatus::Cancelled]
            }
            AppointmentStatus::Completed | AppointmentStatus::Cancelled => &[],
        }
    }

    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        self.next_statuses().contains(&next)
    }

    pub fn is_terminal(&self) -> bool {
        self.next_statuses().is_empty()
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppointmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// A button on an appointment card or detail screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusAction {
    Confirm,
    Complete,
    Cancel,
}

impl StatusAction {
    pub fn target(&self) -> AppointmentStatus {
        match self {
            StatusAction::Confirm => AppointmentStatus::Confirmed,
            StatusAction::Complete => AppointmentStatus::Completed,
            StatusAction::Cancel => AppointmentStatus::Cancelled,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusAction::Confirm => "Confirm",
            StatusAction::Complete => "Complete",
            StatusAction::Cancel => "Cancel appointment",
        }
    }
}

/// Actions offered for an appointment in `status`, as seen by `viewer`.
///
/// Admins get every legal transition. Clients may only cancel, and only
/// while the appointment is still scheduled.
pub fn available_actions(status: AppointmentStatus, viewer: Role) -> Vec<StatusAction> {
    let actions = [
        StatusAction::Confirm,
        StatusAction::Complete,
        StatusAction::Cancel,
    ];
    match viewer {
        Role::Admin => actions
            .into_iter()
            .filter(|action| status.can_transition_to(action.target()))
            .collect(),
        Role::Client => {
            if status == AppointmentStatus::Scheduled {
                vec![StatusAction::Cancel]
            } else {
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AppointmentStatus::*;

    #[test]
    fn transition_table() {
        assert!(Scheduled.can_transition_to(Confirmed));
        assert!(Scheduled.can_transition_to(Cancelled));
        assert!(!Scheduled.can_transition_to(Completed));
        assert!(Confirmed.can_transition_to(Completed));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(!Confirmed.can_transition_to(Scheduled));
        for terminal in [Completed, Cancelled] {
            assert!(terminal.is_terminal());
            for next in AppointmentStatus::ALL {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn admin_actions_follow_table() {
        assert_eq!(
            available_actions(Scheduled, Role::Admin),
            vec![StatusAction::Confirm, StatusAction::Cancel]
        );
        assert_eq!(
            available_actions(Confirmed, Role::Admin),
            vec![StatusAction::Complete, StatusAction::Cancel]
        );
        assert!(available_actions(Completed, Role::Admin).is_empty());
        assert!(available_actions(Cancelled, Role::Admin).is_empty());
    }

    #[test]
    fn clients_only_cancel_scheduled() {
        assert_eq!(
            available_actions(Scheduled, Role::Client),
            vec![StatusAction::Cancel]
        );
        assert!(available_actions(Confirmed, Role::Client).is_empty());
    }

    #[test]
    fn parses_wire_names() {
        assert_eq!("confirmed".parse::<AppointmentStatus>(), Ok(Confirmed));
        assert!("agendado".parse::<AppointmentStatus>().is_err());
        assert_eq!(Cancelled.to_string(), "cancelled");
    }
}
