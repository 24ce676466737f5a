use reqwest::Method;
use uuid::Uuid;

use crate::{
    client::{api::ApiClient, error::ClientResult},
    domain::AppointmentStatus,
    dto::appointments::{
        AppointmentDetail, AppointmentQuery, CreateAppointmentRequest, ReviewRequest,
        UpdateStatusRequest,
    },
    models::Appointment,
    response::Meta,
};

/// One page of appointments with the paging info the server sent back.
#[derive(Debug, Clone)]
pub struct AppointmentPage {
    pub items: Vec<Appointment>,
    pub meta: Option<Meta>,
}

impl ApiClient {
    pub async fn list_appointments(&self, query: &AppointmentQuery) -> ClientResult<AppointmentPage> {
        let envelope = self
            .send::<Vec<Appointment>>(self.builder(Method::GET, "/appointments").query(query))
            .await?;
        Ok(AppointmentPage {
            items: envelope.data.unwrap_or_default(),
            meta: envelope.meta,
        })
    }

    pub async fn create_appointment(
        &self,
        payload: &CreateAppointmentRequest,
    ) -> ClientResult<Appointment> {
        self.post("/appointments", payload).await
    }

    pub async fn get_appointment(&self, id: Uuid) -> ClientResult<AppointmentDetail> {
        self.get(&format!("/appointments/{id}")).await
    }

    pub async fn update_appointment_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> ClientResult<Appointment> {
        self.patch(
            &format!("/appointments/{id}/status"),
            &UpdateStatusRequest { status },
        )
        .await
    }

    pub async fn review_appointment(
        &self,
        id: Uuid,
        rating: i16,
        comment: Option<String>,
    ) -> ClientResult<Appointment> {
        self.patch(
            &format!("/appointments/{id}/review"),
            &ReviewRequest { rating, comment },
        )
        .await
    }
}
