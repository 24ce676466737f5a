use chrono::{Local, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, ActiveValue::NotSet,
};
use uuid::Uuid;

use crate::{
    audit,
    domain::{
        WorkingHours, available_slots,
        availability::format_slot,
        calendar::{week_days, week_start},
        schedule::{WeekSchedule, build_week},
    },
    dto::barbers::{BarberList, BarberListQuery, CreateBarberRequest, UpdateBarberRequest},
    entity::{
        appointments::{Column as ApptCol, Entity as Appointments},
        barbers::{ActiveModel as BarberActive, Column as BarberCol, Entity as Barbers, Model as BarberModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Barber,
    response::{ApiResponse, Meta},
    services::appointment_service,
    state::AppState,
};

pub async fn list_barbers(
    state: &AppState,
    query: BarberListQuery,
) -> AppResult<ApiResponse<BarberList>> {
    let mut condition = Condition::all();
    if let Some(active) = query.active {
        condition = condition.add(BarberCol::Active.eq(active));
    }

    let items: Vec<Barber> = Barbers::find()
        .filter(condition)
        .order_by_asc(BarberCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(barber_from_entity)
        .collect();

    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success("Barbers", BarberList { items }, Some(meta)))
}

pub async fn get_barber(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Barber>> {
    let barber = find_barber(state, id).await?;
    Ok(ApiResponse::success("Barber", barber_from_entity(barber), None))
}

pub async fn create_barber(
    state: &AppState,
    user: &AuthUser,
    payload: CreateBarberRequest,
) -> AppResult<ApiResponse<Barber>> {
    ensure_admin(user)?;
    let name = required_name(&payload.name)?;
    let hours = payload.working_hours.unwrap_or_default();
    let hours = validate_hours(hours)?;

    let barber = BarberActive {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        email: Set(payload.email),
        phone: Set(payload.phone),
        photo_url: Set(payload.photo_url),
        specialties: Set(serde_json::json!(clean_specialties(payload.specialties))),
        work_start: Set(hours.start),
        work_end: Set(hours.end),
        work_days: Set(serde_json::json!(hours.days)),
        active: Set(payload.active.unwrap_or(true)),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        user.user_id,
        "barber_create",
        "barbers",
        serde_json::json!({ "barber_id": barber.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Barber created",
        barber_from_entity(barber),
        Some(Meta::empty()),
    ))
}

pub async fn update_barber(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateBarberRequest,
) -> AppResult<ApiResponse<Barber>> {
    ensure_admin(user)?;
    let existing = find_barber(state, id).await?;

    let mut active: BarberActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(required_name(&name)?);
    }
    if let Some(email) = payload.email {
        active.email = Set(Some(email).filter(|e| !e.trim().is_empty()));
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(Some(phone).filter(|p| !p.trim().is_empty()));
    }
    if let Some(photo_url) = payload.photo_url {
        active.photo_url = Set(Some(photo_url).filter(|p| !p.trim().is_empty()));
    }
    if let Some(specialties) = payload.specialties {
        active.specialties = Set(serde_json::json!(clean_specialties(specialties)));
    }
    if let Some(hours) = payload.working_hours {
        let hours = validate_hours(hours)?;
        active.work_start = Set(hours.start);
        active.work_end = Set(hours.end);
        active.work_days = Set(serde_json::json!(hours.days));
    }
    if let Some(flag) = payload.active {
        active.active = Set(flag);
    }
    let barber = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "barber_update",
        "barbers",
        serde_json::json!({ "barber_id": barber.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        barber_from_entity(barber),
        Some(Meta::empty()),
    ))
}

pub async fn delete_barber(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;

    let booked = Appointments::find()
        .filter(ApptCol::BarberId.eq(id))
        .count(&state.orm)
        .await?;
    if booked > 0 {
        return Err(AppError::Conflict(
            "barber has appointments; deactivate instead".into(),
        ));
    }

    let result = Barbers::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        user.user_id,
        "barber_delete",
        "barbers",
        serde_json::json!({ "barber_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn available_time_slots(
    state: &AppState,
    barber_id: Uuid,
    date: NaiveDate,
) -> AppResult<ApiResponse<Vec<String>>> {
    let barber = barber_from_entity(find_barber(state, barber_id).await?);
    if !barber.active {
        return Ok(ApiResponse::success("Available slots", Vec::new(), None));
    }

    let booked = appointment_service::booked_times(state, barber_id, date).await?;
    let slots = available_slots(&barber.working_hours, date, &booked);
    tracing::debug!(%barber_id, %date, free = slots.len(), taken = booked.len(), "computed slots");

    let meta = Meta::total(slots.len() as i64);
    Ok(ApiResponse::success("Available slots", slots, Some(meta)))
}

pub async fn week_schedule(
    state: &AppState,
    user: &AuthUser,
    barber_id: Uuid,
    week_of: Option<NaiveDate>,
) -> AppResult<ApiResponse<WeekSchedule>> {
    ensure_admin(user)?;
    let barber = barber_from_entity(find_barber(state, barber_id).await?);
    let any_day = week_of.unwrap_or_else(|| Local::now().date_naive());
    let days = week_days(week_start(any_day));
    let booked =
        appointment_service::booked_slots_between(state, barber_id, days[0], days[6]).await?;

    let schedule = build_week(&barber.working_hours, any_day, &booked);
    Ok(ApiResponse::success("Schedule", schedule, Some(Meta::empty())))
}

pub(crate) async fn find_barber(state: &AppState, id: Uuid) -> AppResult<BarberModel> {
    Barbers::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

fn required_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name is required".into()));
    }
    Ok(name.to_string())
}

fn validate_hours(hours: WorkingHours) -> AppResult<WorkingHours> {
    hours
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let mut hours = hours.normalized();
    // store the canonical HH:MM form
    if let Ok((start, end)) = hours.window() {
        hours.start = format_slot(start);
        hours.end = format_slot(end);
    }
    Ok(hours)
}

fn clean_specialties(specialties: Vec<String>) -> Vec<String> {
    specialties
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

pub(crate) fn barber_from_entity(model: BarberModel) -> Barber {
    Barber {
        id: model.id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        photo_url: model.photo_url,
        specialties: serde_json::from_value(model.specialties).unwrap_or_default(),
        working_hours: WorkingHours {
            start: model.work_start,
            end: model.work_end,
            days: serde_json::from_value(model.work_days).unwrap_or_default(),
        },
        active: model.active,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
