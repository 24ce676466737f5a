use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{domain::WorkingHours, models::Barber};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateBarberRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub photo_url: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    pub working_hours: Option<WorkingHours>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateBarberRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub photo_url: Option<String>,
    pub specialties: Option<Vec<String>>,
    pub working_hours: Option<WorkingHours>,
    pub active: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct BarberList {
    #[schema(value_type = Vec<Barber>)]
    pub items: Vec<Barber>,
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BarberListQuery {
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct SlotQuery {
    pub barber_id: Uuid,
    pub date: NaiveDate,
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ScheduleQuery {
    /// Any day of the wanted week; defaults to today.
    pub week_of: Option<NaiveDate>,
}
