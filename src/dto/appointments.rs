use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    domain::{AppointmentStatus, StatusAction},
    models::{Appointment, Barber, Service, User},
    routes::params::{Pagination, SortOrder},
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAppointmentRequest {
    pub barber_id: Uuid,
    pub service_ids: Vec<Uuid>,
    pub date: NaiveDate,
    pub time: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewRequest {
    pub rating: i16,
    pub comment: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct AppointmentList {
    #[schema(value_type = Vec<Appointment>)]
    pub items: Vec<Appointment>,
}

/// An appointment with its related records and what the caller may do next.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppointmentDetail {
    pub appointment: Appointment,
    pub barber: Option<Barber>,
    pub client: Option<User>,
    pub services: Vec<Service>,
    pub actions: Vec<StatusAction>,
    pub can_review: bool,
}

#[derive(Debug, Default, Serialize, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct AppointmentQuery {
    pub client_id: Option<Uuid>,
    pub barber_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub status: Option<AppointmentStatus>,
    /// Ordering by date and time; ascending by default.
    pub sort_order: Option<SortOrder>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl AppointmentQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}
