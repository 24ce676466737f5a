use chrono::{Datelike, Duration, Local, Months, NaiveDate};
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    sea_query::Expr,
};

use crate::{
    domain::AppointmentStatus,
    dto::reports::{
        BarberPerformance, DashboardStats, MonthlyRevenue, Report, ReportKind, ReportQuery,
        ServicePopularity,
    },
    entity::{
        appointments::{Column as ApptCol, Entity as Appointments},
        barbers::{Column as BarberCol, Entity as Barbers},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    response::{ApiResponse, Meta},
    services::appointment_service::appointment_from_entity,
    state::AppState,
};

const REVENUE_WINDOW_DAYS: i64 = 7;

/// Reports are served from a fixed sample until real aggregation lands.
pub fn report(user: &AuthUser, query: ReportQuery) -> AppResult<ApiResponse<Report>> {
    ensure_admin(user)?;
    let today = Local::now().date_naive();
    let (default_start, default_end) = default_range(today);
    let start_date = query.start_date.unwrap_or(default_start);
    let end_date = query.end_date.unwrap_or(default_end);
    if start_date > end_date {
        return Err(AppError::BadRequest(
            "start_date must not be after end_date".into(),
        ));
    }

    let report = sample_report(query.kind.unwrap_or_default(), start_date, end_date);
    Ok(ApiResponse::success("Report", report, Some(Meta::empty())))
}

pub async fn dashboard(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<DashboardStats>> {
    ensure_admin(user)?;
    let today = Local::now().date_naive();
    let window_start = today - Duration::days(REVENUE_WINDOW_DAYS - 1);
    let cancelled = AppointmentStatus::Cancelled.as_str();

    let total_appointments = Appointments::find().count(&state.orm).await? as i64;

    let todays = Appointments::find()
        .filter(ApptCol::Date.eq(today))
        .order_by_asc(ApptCol::Time)
        .all(&state.orm)
        .await?;

    // SUM over BIGINT is NUMERIC in Postgres
    let weekly_revenue: Option<i64> = Appointments::find()
        .select_only()
        .column_as(Expr::cust("COALESCE(SUM(total_price), 0)::BIGINT"), "revenue")
        .filter(ApptCol::Date.between(window_start, today))
        .filter(ApptCol::Status.ne(cancelled))
        .into_tuple()
        .one(&state.orm)
        .await?;

    let active_barbers = Barbers::find()
        .filter(BarberCol::Active.eq(true))
        .count(&state.orm)
        .await? as i64;

    let appointments_today = todays.len() as i64;
    // service ids are not needed on the dashboard cards
    let today = todays
        .into_iter()
        .map(|a| appointment_from_entity(a, Vec::new()))
        .collect::<AppResult<Vec<_>>>()?;

    Ok(ApiResponse::success(
        "Dashboard",
        DashboardStats {
            total_appointments,
            appointments_today,
            weekly_revenue: weekly_revenue.unwrap_or(0),
            active_barbers,
            today,
        },
        None,
    ))
}

/// First day of the previous month through the last day of the current one.
pub fn default_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let this_month = today.with_day(1).unwrap_or(today);
    let start = this_month
        .checked_sub_months(Months::new(1))
        .unwrap_or(this_month);
    let end = this_month
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(today);
    (start, end)
}

pub fn sample_report(kind: ReportKind, start_date: NaiveDate, end_date: NaiveDate) -> Report {
    let revenue_by_month = [
        ("Jan", 450_000),
        ("Feb", 510_000),
        ("Mar", 620_000),
        ("Apr", 580_000),
        ("May", 750_000),
        ("Jun", 920_000),
    ]
    .into_iter()
    .map(|(month, revenue)| MonthlyRevenue {
        month: month.to_string(),
        revenue,
    })
    .collect::<Vec<_>>();

    let services = [
        ("Classic Cut", 78, 273_000),
        ("Full Beard", 65, 162_500),
        ("Fade Cut", 54, 216_000),
        ("Cut + Beard Combo", 42, 231_000),
        ("Hair Treatment", 23, 184_000),
    ]
    .into_iter()
    .map(|(name, count, revenue)| ServicePopularity {
        name: name.to_string(),
        count,
        revenue,
    })
    .collect::<Vec<_>>();

    let barbers = [
        ("Carlos Oliveira", 47, 329_000, 4.8),
        ("Ricardo Alves", 52, 364_000, 4.6),
        ("André Martins", 38, 266_000, 4.9),
        ("Paulo Santos", 43, 301_000, 4.7),
    ]
    .into_iter()
    .map(|(name, appointments, revenue, rating)| BarberPerformance {
        name: name.to_string(),
        appointments,
        revenue,
        rating,
    })
    .collect::<Vec<_>>();

    let (revenue_by_month, services_by_popularity, barber_performance, total_revenue) = match kind
    {
        ReportKind::Revenue => {
            let total = revenue_by_month.iter().map(|m| m.revenue).sum();
            (revenue_by_month, Vec::new(), Vec::new(), total)
        }
        ReportKind::Services => {
            let total = services.iter().map(|s| s.revenue).sum();
            (Vec::new(), services, Vec::new(), total)
        }
        ReportKind::Barbers => {
            let total = barbers.iter().map(|b| b.revenue).sum();
            (Vec::new(), Vec::new(), barbers, total)
        }
    };

    Report {
        kind,
        start_date,
        end_date,
        revenue_by_month,
        services_by_popularity,
        barber_performance,
        total_revenue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_range_spans_previous_and_current_month() {
        assert_eq!(
            default_range(date(2025, 3, 14)),
            (date(2025, 2, 1), date(2025, 3, 31))
        );
        assert_eq!(
            default_range(date(2025, 1, 1)),
            (date(2024, 12, 1), date(2025, 1, 31))
        );
        assert_eq!(
            default_range(date(2024, 2, 29)),
            (date(2024, 1, 1), date(2024, 2, 29))
        );
    }

    #[test]
    fn only_requested_section_is_filled() {
        let start = date(2025, 1, 1);
        let end = date(2025, 6, 30);

        let revenue = sample_report(ReportKind::Revenue, start, end);
        assert_eq!(revenue.revenue_by_month.len(), 6);
        assert!(revenue.services_by_popularity.is_empty());
        assert_eq!(revenue.total_revenue, 3_830_000);

        let services = sample_report(ReportKind::Services, start, end);
        assert_eq!(services.services_by_popularity.len(), 5);
        assert_eq!(services.services_by_popularity[0].count, 78);
        assert!(services.barber_performance.is_empty());

        let barbers = sample_report(ReportKind::Barbers, start, end);
        assert_eq!(barbers.barber_performance.len(), 4);
        assert_eq!(barbers.total_revenue, 1_260_000);
    }
}
