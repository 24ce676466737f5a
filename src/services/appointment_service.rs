use std::collections::HashMap;

use chrono::{Local, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait, ActiveValue::NotSet, sea_query::Expr,
};
use uuid::Uuid;

use crate::{
    audit,
    domain::{
        AppointmentStatus, Role, available_actions, can_review, check_review, checked_totals,
        availability::normalize_slot, is_slot_available, schedule::BookedSlot,
    },
    dto::appointments::{
        AppointmentDetail, AppointmentList, AppointmentQuery, CreateAppointmentRequest,
        ReviewRequest, UpdateStatusRequest,
    },
    entity::{
        appointment_services::{
            ActiveModel as LinkActive, Column as LinkCol, Entity as AppointmentServices,
        },
        appointments::{
            ActiveModel as ApptActive, Column as ApptCol, Entity as Appointments,
            Model as ApptModel,
        },
        barbers::Entity as Barbers,
        services::{Column as ServiceCol, Entity as Services},
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Appointment, Review},
    response::{ApiResponse, Meta},
    routes::params::SortOrder,
    services::{auth_service, barber_service, catalog_service},
    state::AppState,
};

pub async fn create_appointment(
    state: &AppState,
    user: &AuthUser,
    payload: CreateAppointmentRequest,
) -> AppResult<ApiResponse<Appointment>> {
    let CreateAppointmentRequest {
        barber_id,
        service_ids,
        date,
        time,
        notes,
    } = payload;

    let mut service_ids = service_ids;
    service_ids.sort();
    service_ids.dedup();
    if service_ids.is_empty() {
        return Err(AppError::BadRequest("select at least one service".into()));
    }

    let time = normalize_slot(&time).map_err(|e| AppError::BadRequest(e.to_string()))?;
    if date < Local::now().date_naive() {
        return Err(AppError::BadRequest("date must not be in the past".into()));
    }

    let barber = barber_service::find_barber(state, barber_id).await?;
    if !barber.active {
        return Err(AppError::BadRequest("barber is not available".into()));
    }
    let barber = barber_service::barber_from_entity(barber);

    let services = catalog_service::find_many(state, &service_ids).await?;
    if let Some(inactive) = services.iter().find(|s| !s.active) {
        return Err(AppError::BadRequest(format!(
            "service {} is not offered",
            inactive.name
        )));
    }
    let summary = checked_totals(&services)
        .ok_or_else(|| AppError::BadRequest("selected services are too long or too expensive".into()))?;

    let booked = booked_times(state, barber_id, date).await?;
    if !is_slot_available(&barber.working_hours, date, &time, &booked) {
        return Err(AppError::Conflict(format!("{date} {time} is not available")));
    }

    let txn = state.orm.begin().await?;

    let appointment = ApptActive {
        id: Set(Uuid::new_v4()),
        client_id: Set(user.user_id),
        barber_id: Set(barber_id),
        date: Set(date),
        time: Set(time),
        total_price: Set(summary.price),
        total_duration: Set(summary.duration_minutes),
        status: Set(AppointmentStatus::Scheduled.as_str().to_string()),
        notes: Set(notes.filter(|n| !n.trim().is_empty())),
        review_rating: Set(None),
        review_comment: Set(None),
        reviewed_at: Set(None),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await
    .map_err(|err| match AppError::from(err) {
        AppError::Conflict(_) => AppError::Conflict("time slot was just taken".into()),
        other => other,
    })?;

    for service_id in &service_ids {
        LinkActive {
            appointment_id: Set(appointment.id),
            service_id: Set(*service_id),
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    audit::record(
        &state.pool,
        user.user_id,
        "appointment_create",
        "appointments",
        serde_json::json!({
            "appointment_id": appointment.id,
            "barber_id": barber_id,
            "total_price": appointment.total_price,
        }),
    )
    .await;
    tracing::info!(appointment_id = %appointment.id, %barber_id, "appointment booked");

    Ok(ApiResponse::success(
        "Appointment created",
        appointment_from_entity(appointment, service_ids)?,
        Some(Meta::empty()),
    ))
}

pub async fn list_appointments(
    state: &AppState,
    user: &AuthUser,
    query: AppointmentQuery,
) -> AppResult<ApiResponse<AppointmentList>> {
    let (page, limit, offset) = query.pagination().normalize();

    // clients only ever see their own bookings
    let client_id = if user.is_admin() {
        query.client_id
    } else {
        Some(user.user_id)
    };

    let mut condition = Condition::all();
    if let Some(client_id) = client_id {
        condition = condition.add(ApptCol::ClientId.eq(client_id));
    }
    if let Some(barber_id) = query.barber_id {
        condition = condition.add(ApptCol::BarberId.eq(barber_id));
    }
    if let Some(date) = query.date {
        condition = condition.add(ApptCol::Date.eq(date));
    }
    if let Some(status) = query.status {
        condition = condition.add(ApptCol::Status.eq(status.as_str()));
    }

    let mut finder = Appointments::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Asc) {
        SortOrder::Asc => finder.order_by_asc(ApptCol::Date).order_by_asc(ApptCol::Time),
        SortOrder::Desc => finder.order_by_desc(ApptCol::Date).order_by_desc(ApptCol::Time),
    };

    let total = finder.clone().count(&state.orm).await? as i64;
    let rows = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let ids: Vec<Uuid> = rows.iter().map(|a| a.id).collect();
    let mut links = service_ids_for(state, &ids).await?;
    let items = rows
        .into_iter()
        .map(|a| {
            let services = links.remove(&a.id).unwrap_or_default();
            appointment_from_entity(a, services)
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(ApiResponse::success(
        "Appointments",
        AppointmentList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_appointment(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<AppointmentDetail>> {
    let model = find_visible(state, user, id).await?;

    let services: Vec<_> = Services::find()
        .inner_join(AppointmentServices)
        .filter(LinkCol::AppointmentId.eq(model.id))
        .order_by_asc(ServiceCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(catalog_service::service_from_entity)
        .collect();

    let barber = Barbers::find_by_id(model.barber_id)
        .one(&state.orm)
        .await?
        .map(barber_service::barber_from_entity);
    let client = Users::find_by_id(model.client_id)
        .one(&state.orm)
        .await?
        .map(auth_service::user_from_entity);

    let appointment =
        appointment_from_entity(model, services.iter().map(|s| s.id).collect())?;
    let actions = available_actions(appointment.status, user.role);
    let can_review = appointment.client_id == user.user_id
        && can_review(appointment.status, appointment.review.is_some());

    Ok(ApiResponse::success(
        "Appointment",
        AppointmentDetail {
            appointment,
            barber,
            client,
            services,
            actions,
            can_review,
        },
        None,
    ))
}

pub async fn update_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateStatusRequest,
) -> AppResult<ApiResponse<Appointment>> {
    let model = find_visible(state, user, id).await?;
    let current = parse_status(&model.status)?;
    let next = payload.status;

    let allowed = available_actions(current, user.role)
        .iter()
        .any(|action| action.target() == next);
    if !allowed {
        if user.role == Role::Client {
            return Err(AppError::Forbidden);
        }
        return Err(AppError::BadRequest(format!(
            "cannot move appointment from {current} to {next}"
        )));
    }

    // Only applies if nobody moved the appointment since it was read.
    let result = Appointments::update_many()
        .col_expr(ApptCol::Status, Expr::value(next.as_str()))
        .col_expr(ApptCol::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
        .filter(ApptCol::Id.eq(id))
        .filter(ApptCol::Status.eq(current.as_str()))
        .exec(&state.orm)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::Conflict(
            "appointment was changed by someone else".into(),
        ));
    }
    let updated = reload(state, id).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "appointment_status",
        "appointments",
        serde_json::json!({
            "appointment_id": updated.id,
            "from": current.as_str(),
            "to": next.as_str(),
        }),
    )
    .await;

    let services = service_ids_for(state, &[updated.id])
        .await?
        .remove(&updated.id)
        .unwrap_or_default();
    Ok(ApiResponse::success(
        "Status updated",
        appointment_from_entity(updated, services)?,
        Some(Meta::empty()),
    ))
}

pub async fn add_review(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: ReviewRequest,
) -> AppResult<ApiResponse<Appointment>> {
    let model = find_visible(state, user, id).await?;
    if model.client_id != user.user_id {
        return Err(AppError::Forbidden);
    }
    let status = parse_status(&model.status)?;
    check_review(status, model.review_rating.is_some(), payload.rating)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let now = Utc::now().fixed_offset();
    let result = Appointments::update_many()
        .col_expr(ApptCol::ReviewRating, Expr::value(Some(payload.rating)))
        .col_expr(
            ApptCol::ReviewComment,
            Expr::value(payload.comment.filter(|c| !c.trim().is_empty())),
        )
        .col_expr(ApptCol::ReviewedAt, Expr::value(Some(now)))
        .col_expr(ApptCol::UpdatedAt, Expr::value(now))
        .filter(ApptCol::Id.eq(id))
        .filter(ApptCol::Status.eq(AppointmentStatus::Completed.as_str()))
        .filter(ApptCol::ReviewRating.is_null())
        .exec(&state.orm)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::Conflict("appointment was already reviewed".into()));
    }
    let updated = reload(state, id).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "appointment_review",
        "appointments",
        serde_json::json!({ "appointment_id": updated.id, "rating": payload.rating }),
    )
    .await;

    let services = service_ids_for(state, &[updated.id])
        .await?
        .remove(&updated.id)
        .unwrap_or_default();
    Ok(ApiResponse::success(
        "Review saved",
        appointment_from_entity(updated, services)?,
        Some(Meta::empty()),
    ))
}

/// Times already held on `date` for the barber. Cancelled bookings free their slot.
pub async fn booked_times(
    state: &AppState,
    barber_id: Uuid,
    date: NaiveDate,
) -> AppResult<Vec<String>> {
    let times = Appointments::find()
        .select_only()
        .column(ApptCol::Time)
        .filter(ApptCol::BarberId.eq(barber_id))
        .filter(ApptCol::Date.eq(date))
        .filter(ApptCol::Status.ne(AppointmentStatus::Cancelled.as_str()))
        .into_tuple::<String>()
        .all(&state.orm)
        .await?;
    Ok(times)
}

pub async fn booked_slots_between(
    state: &AppState,
    barber_id: Uuid,
    first: NaiveDate,
    last: NaiveDate,
) -> AppResult<Vec<BookedSlot>> {
    let rows = Appointments::find()
        .filter(ApptCol::BarberId.eq(barber_id))
        .filter(ApptCol::Date.between(first, last))
        .filter(ApptCol::Status.ne(AppointmentStatus::Cancelled.as_str()))
        .order_by_asc(ApptCol::Date)
        .order_by_asc(ApptCol::Time)
        .all(&state.orm)
        .await?;

    let ids: Vec<Uuid> = rows.iter().map(|a| a.id).collect();
    let mut names = service_names_for(state, &ids).await?;

    Ok(rows
        .into_iter()
        .map(|a| BookedSlot {
            date: a.date,
            time: a.time,
            appointment_id: a.id,
            client_id: a.client_id,
            services: names.remove(&a.id).unwrap_or_default(),
        })
        .collect())
}

/// Owners and admins can see an appointment; everyone else gets a 404.
async fn find_visible(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<ApptModel> {
    let model = Appointments::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    if !user.is_admin() && model.client_id != user.user_id {
        return Err(AppError::NotFound);
    }
    Ok(model)
}

async fn service_ids_for(
    state: &AppState,
    appointment_ids: &[Uuid],
) -> AppResult<HashMap<Uuid, Vec<Uuid>>> {
    if appointment_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let links = AppointmentServices::find()
        .filter(LinkCol::AppointmentId.is_in(appointment_ids.iter().copied()))
        .all(&state.orm)
        .await?;

    let mut grouped: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for link in links {
        grouped
            .entry(link.appointment_id)
            .or_default()
            .push(link.service_id);
    }
    Ok(grouped)
}

async fn service_names_for(
    state: &AppState,
    appointment_ids: &[Uuid],
) -> AppResult<HashMap<Uuid, Vec<String>>> {
    if appointment_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows: Vec<(Uuid, String)> = AppointmentServices::find()
        .select_only()
        .column(LinkCol::AppointmentId)
        .column(ServiceCol::Name)
        .inner_join(Services)
        .filter(LinkCol::AppointmentId.is_in(appointment_ids.iter().copied()))
        .order_by_asc(ServiceCol::Name)
        .into_tuple()
        .all(&state.orm)
        .await?;

    let mut grouped: HashMap<Uuid, Vec<String>> = HashMap::new();
    for (appointment_id, name) in rows {
        grouped.entry(appointment_id).or_default().push(name);
    }
    Ok(grouped)
}

async fn reload(state: &AppState, id: Uuid) -> AppResult<ApptModel> {
    Appointments::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

fn parse_status(raw: &str) -> AppResult<AppointmentStatus> {
    raw.parse()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("stored status: {e}")))
}

pub(crate) fn appointment_from_entity(
    model: ApptModel,
    service_ids: Vec<Uuid>,
) -> AppResult<Appointment> {
    let status = parse_status(&model.status).inspect_err(|_| {
        tracing::warn!(appointment_id = %model.id, status = %model.status, "unknown stored status");
    })?;
    let review = model.review_rating.map(|rating| Review {
        rating,
        comment: model.review_comment.clone(),
        reviewed_at: model.reviewed_at.map(|at| at.with_timezone(&Utc)),
    });
    Ok(Appointment {
        id: model.id,
        client_id: model.client_id,
        barber_id: model.barber_id,
        service_ids,
        date: model.date,
        time: model.time,
        status,
        total_price: model.total_price,
        total_duration: model.total_duration,
        notes: model.notes,
        review,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str) -> ApptModel {
        let now = Utc::now().fixed_offset();
        ApptModel {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            barber_id: Uuid::new_v4(),
            date: Local::now().date_naive(),
            time: "09:00".into(),
            total_price: 3500,
            total_duration: 30,
            status: status.into(),
            notes: None,
            review_rating: None,
            review_comment: None,
            reviewed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn stored_status_is_read_back() {
        let appointment = appointment_from_entity(row("confirmed"), Vec::new()).unwrap();
        assert_eq!(appointment.status, AppointmentStatus::Confirmed);
    }

    #[test]
    fn unknown_stored_status_is_an_error() {
        let err = appointment_from_entity(row("pending-ish"), Vec::new()).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
