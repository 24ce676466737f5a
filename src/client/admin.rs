use chrono::NaiveDate;

use crate::{
    client::{api::ApiClient, error::ClientResult},
    dto::{
        reports::{DashboardStats, Report, ReportKind},
        settings::UpdateSettingsRequest,
    },
    models::Settings,
};

impl ApiClient {
    pub async fn get_settings(&self) -> ClientResult<Settings> {
        self.get("/admin/settings").await
    }

    pub async fn update_settings(&self, payload: &UpdateSettingsRequest) -> ClientResult<Settings> {
        self.put("/admin/settings", payload).await
    }

    pub async fn report(
        &self,
        kind: ReportKind,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> ClientResult<Report> {
        let mut query = vec![("kind", kind_param(kind).to_string())];
        if let Some(start) = start_date {
            query.push(("start_date", start.to_string()));
        }
        if let Some(end) = end_date {
            query.push(("end_date", end.to_string()));
        }
        self.get_query("/admin/reports", &query).await
    }

    pub async fn dashboard(&self) -> ClientResult<DashboardStats> {
        self.get("/admin/dashboard").await
    }
}

fn kind_param(kind: ReportKind) -> &'static str {
    match kind {
        ReportKind::Revenue => "revenue",
        ReportKind::Services => "services",
        ReportKind::Barbers => "barbers",
    }
}
