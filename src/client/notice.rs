use crate::client::error::ClientError;

// Fallback text per screen when the failure has no message of its own.
pub const LOAD_FAILED: &str = "Could not load data. Please try again later.";
pub const BOOKING_FAILED: &str = "Could not complete your booking. Please try again later.";
pub const LOGIN_FAILED: &str = "Could not log in. Check your credentials.";
pub const REGISTER_FAILED: &str = "Could not create your account.";
pub const PROFILE_FAILED: &str = "Could not update your profile.";
pub const SAVE_FAILED: &str = "Could not save changes.";

pub const BOOKING_SUCCEEDED: &str = "Appointment booked successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// The single dismissible message area of a screen.
#[derive(Debug, Default)]
pub struct NoticeSlot {
    current: Option<Notice>,
}

impl NoticeSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, err: &ClientError, fallback: &str) {
        tracing::debug!(error = %err, "showing error notice");
        self.current = Some(Notice {
            kind: NoticeKind::Error,
            message: err.user_message(fallback),
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.current = Some(Notice {
            kind: NoticeKind::Success,
            message: message.into(),
        });
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    /// Shows the error, if any, and passes the value through.
    pub fn report<T>(&mut self, result: Result<T, ClientError>, fallback: &str) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.error(&err, fallback);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_and_dismisses() {
        let mut slot = NoticeSlot::new();
        let value = slot.report::<u8>(Err(ClientError::EmptyResponse), LOAD_FAILED);
        assert!(value.is_none());
        assert_eq!(
            slot.current(),
            Some(&Notice {
                kind: NoticeKind::Error,
                message: LOAD_FAILED.into()
            })
        );

        slot.dismiss();
        assert!(slot.current().is_none());

        slot.success(BOOKING_SUCCEEDED);
        assert_eq!(slot.current().map(|n| n.kind), Some(NoticeKind::Success));
        assert_eq!(slot.report(Ok(3), LOAD_FAILED), Some(3));
    }
}
