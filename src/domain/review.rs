use thiserror::Error;

use super::status::AppointmentStatus;

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReviewError {
    #[error("only completed appointments can be reviewed")]
    NotCompleted,

    #[error("appointment already has a review")]
    AlreadyReviewed,

    #[error("rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(i16),
}

pub fn can_review(status: AppointmentStatus, has_review: bool) -> bool {
    status == AppointmentStatus::Completed && !has_review
}

pub fn check_review(
    status: AppointmentStatus,
    has_review: bool,
    rating: i16,
) -> Result<(), ReviewError> {
    if status != AppointmentStatus::Completed {
        return Err(ReviewError::NotCompleted);
    }
    if has_review {
        return Err(ReviewError::AlreadyReviewed);
    }
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ReviewError::RatingOutOfRange(rating));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_completed_and_unreviewed() {
        assert!(can_review(AppointmentStatus::Completed, false));
        assert!(!can_review(AppointmentStatus::Completed, true));
        assert!(!can_review(AppointmentStatus::Confirmed, false));
        assert!(!can_review(AppointmentStatus::Cancelled, false));
    }

    #[test]
    fn check_reports_reason() {
        assert_eq!(
            check_review(AppointmentStatus::Scheduled, false, 5),
            Err(ReviewError::NotCompleted)
        );
        assert_eq!(
            check_review(AppointmentStatus::Completed, true, 5),
            Err(ReviewError::AlreadyReviewed)
        );
        assert_eq!(
            check_review(AppointmentStatus::Completed, false, 0),
            Err(ReviewError::RatingOutOfRange(0))
        );
        assert_eq!(
            check_review(AppointmentStatus::Completed, false, 6),
            Err(ReviewError::RatingOutOfRange(6))
        );
        assert!(check_review(AppointmentStatus::Completed, false, 4).is_ok());
    }
}
