use uuid::Uuid;

use crate::{
    client::{
        api::ApiClient,
        error::{ClientError, ClientResult},
    },
    domain::{AppointmentStatus, Role, StatusAction, available_actions},
    dto::appointments::AppointmentQuery,
    models::Appointment,
};

pub const STATUS_UPDATE_FAILED: &str = "Could not update the appointment status.";

/// A loaded list of appointments as one viewer sees it. Status actions patch
/// the local copy first and roll back if the server refuses.
#[derive(Debug, Clone)]
pub struct AppointmentBoard {
    viewer: Role,
    items: Vec<Appointment>,
}

impl AppointmentBoard {
    pub fn new(viewer: Role, items: Vec<Appointment>) -> Self {
        Self { viewer, items }
    }

    pub async fn load(api: &ApiClient, viewer: Role, query: &AppointmentQuery) -> ClientResult<Self> {
        let page = api.list_appointments(query).await?;
        Ok(Self::new(viewer, page.items))
    }

    pub fn items(&self) -> &[Appointment] {
        &self.items
    }

    pub fn get(&self, id: Uuid) -> Option<&Appointment> {
        self.items.iter().find(|a| a.id == id)
    }

    pub fn with_status(&self, status: AppointmentStatus) -> Vec<&Appointment> {
        self.items.iter().filter(|a| a.status == status).collect()
    }

    /// Buttons to show on an appointment card.
    pub fn actions_for(&self, id: Uuid) -> Vec<StatusAction> {
        self.get(id)
            .map(|a| available_actions(a.status, self.viewer))
            .unwrap_or_default()
    }

    /// Sets the local status and returns the previous one.
    pub fn apply_status(&mut self, id: Uuid, status: AppointmentStatus) -> Option<AppointmentStatus> {
        let appointment = self.items.iter_mut().find(|a| a.id == id)?;
        Some(std::mem::replace(&mut appointment.status, status))
    }

    pub async fn perform(
        &mut self,
        api: &ApiClient,
        id: Uuid,
        action: StatusAction,
    ) -> ClientResult<()> {
        if !self.actions_for(id).contains(&action) {
            return Err(ClientError::Validation(format!(
                "{} is not available for this appointment.",
                action.label()
            )));
        }
        let target = action.target();
        let previous = self.apply_status(id, target);

        match api.update_appointment_status(id, target).await {
            Ok(updated) => {
                if let Some(slot) = self.items.iter_mut().find(|a| a.id == id) {
                    *slot = updated;
                }
                Ok(())
            }
            Err(err) => {
                if let Some(previous) = previous {
                    self.apply_status(id, previous);
                }
                tracing::warn!(%id, error = %err, "status change rolled back");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;

    fn appointment(status: AppointmentStatus) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            barber_id: Uuid::new_v4(),
            service_ids: vec![Uuid::new_v4()],
            date: NaiveDate::from_ymd_opt(2025, 5, 6).unwrap(),
            time: "10:00".into(),
            total_price: 3500,
            total_duration: 30,
            status,
            notes: None,
            review: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn admin_and_client_see_different_buttons() {
        let scheduled = appointment(AppointmentStatus::Scheduled);
        let confirmed = appointment(AppointmentStatus::Confirmed);
        let items = vec![scheduled.clone(), confirmed.clone()];

        let admin = AppointmentBoard::new(Role::Admin, items.clone());
        assert_eq!(
            admin.actions_for(scheduled.id),
            vec![StatusAction::Confirm, StatusAction::Cancel]
        );
        assert_eq!(
            admin.actions_for(confirmed.id),
            vec![StatusAction::Complete, StatusAction::Cancel]
        );

        let client = AppointmentBoard::new(Role::Client, items);
        assert_eq!(client.actions_for(scheduled.id), vec![StatusAction::Cancel]);
        assert!(client.actions_for(confirmed.id).is_empty());
        assert!(client.actions_for(Uuid::new_v4()).is_empty());
    }

    #[test]
    fn apply_status_returns_previous() {
        let item = appointment(AppointmentStatus::Scheduled);
        let mut board = AppointmentBoard::new(Role::Admin, vec![item.clone()]);
        assert_eq!(
            board.apply_status(item.id, AppointmentStatus::Confirmed),
            Some(AppointmentStatus::Scheduled)
        );
        assert_eq!(board.with_status(AppointmentStatus::Confirmed).len(), 1);
        assert_eq!(board.apply_status(Uuid::new_v4(), AppointmentStatus::Cancelled), None);
    }

    #[tokio::test]
    async fn illegal_action_never_reaches_the_server() {
        let item = appointment(AppointmentStatus::Completed);
        let mut board = AppointmentBoard::new(Role::Admin, vec![item.clone()]);
        // nothing listens on this port; a request would fail with Network
        let api = ApiClient::new("http://127.0.0.1:9/api");
        let err = board
            .perform(&api, item.id, StatusAction::Cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(board.get(item.id).unwrap().status, AppointmentStatus::Completed);
    }
}
