use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::Appointment;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    #[default]
    Revenue,
    Services,
    Barbers,
}

#[derive(Debug, Default, Serialize, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    pub kind: Option<ReportKind>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyRevenue {
    pub month: String,
    pub revenue: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ServicePopularity {
    pub name: String,
    pub count: i64,
    pub revenue: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BarberPerformance {
    pub name: String,
    pub appointments: i64,
    pub revenue: i64,
    pub rating: f32,
}

/// Only the section matching `kind` is filled; the others are empty.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Report {
    pub kind: ReportKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub revenue_by_month: Vec<MonthlyRevenue>,
    pub services_by_popularity: Vec<ServicePopularity>,
    pub barber_performance: Vec<BarberPerformance>,
    pub total_revenue: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardStats {
    pub total_appointments: i64,
    pub appointments_today: i64,
    pub weekly_revenue: i64,
    pub active_barbers: i64,
    pub today: Vec<Appointment>,
}
