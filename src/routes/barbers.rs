use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    domain::schedule::WeekSchedule,
    dto::barbers::{
        BarberList, BarberListQuery, CreateBarberRequest, ScheduleQuery, SlotQuery,
        UpdateBarberRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::Barber,
    response::ApiResponse,
    services::barber_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_barbers).post(create_barber))
        // static segment must win over `/{id}`
        .route("/available-slots", get(available_slots))
        .route(
            "/{id}",
            get(get_barber).put(update_barber).delete(delete_barber),
        )
        .route("/{id}/schedule", get(week_schedule))
}

#[utoipa::path(
    get,
    path = "/api/barbers",
    params(BarberListQuery),
    responses(
        (status = 200, description = "List barbers", body = ApiResponse<BarberList>)
    ),
    tag = "Barbers"
)]
pub async fn list_barbers(
    State(state): State<AppState>,
    Query(query): Query<BarberListQuery>,
) -> AppResult<Json<ApiResponse<BarberList>>> {
    let resp = barber_service::list_barbers(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/barbers/available-slots",
    params(SlotQuery),
    responses(
        (status = 200, description = "Free HH:MM slots for the barber on that date", body = ApiResponse<Vec<String>>),
        (status = 404, description = "Barber not found")
    ),
    tag = "Barbers"
)]
pub async fn available_slots(
    State(state): State<AppState>,
    Query(query): Query<SlotQuery>,
) -> AppResult<Json<ApiResponse<Vec<String>>>> {
    let resp = barber_service::available_time_slots(&state, query.barber_id, query.date).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/barbers/{id}",
    params(("id" = Uuid, Path, description = "Barber ID")),
    responses(
        (status = 200, description = "Barber", body = ApiResponse<Barber>),
        (status = 404, description = "Not Found")
    ),
    tag = "Barbers"
)]
pub async fn get_barber(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Barber>>> {
    let resp = barber_service::get_barber(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/barbers",
    request_body = CreateBarberRequest,
    responses(
        (status = 201, description = "Barber created", body = ApiResponse<Barber>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Barbers"
)]
pub async fn create_barber(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateBarberRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Barber>>)> {
    let resp = barber_service::create_barber(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/barbers/{id}",
    params(("id" = Uuid, Path, description = "Barber ID")),
    request_body = UpdateBarberRequest,
    responses(
        (status = 200, description = "Barber updated", body = ApiResponse<Barber>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Barbers"
)]
pub async fn update_barber(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBarberRequest>,
) -> AppResult<Json<ApiResponse<Barber>>> {
    let resp = barber_service::update_barber(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/barbers/{id}",
    params(("id" = Uuid, Path, description = "Barber ID")),
    responses(
        (status = 200, description = "Barber deleted"),
        (status = 409, description = "Barber still has appointments")
    ),
    security(("bearer_auth" = [])),
    tag = "Barbers"
)]
pub async fn delete_barber(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = barber_service::delete_barber(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/barbers/{id}/schedule",
    params(("id" = Uuid, Path, description = "Barber ID"), ScheduleQuery),
    responses(
        (status = 200, description = "Weekly grid starting on Sunday", body = ApiResponse<WeekSchedule>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Barbers"
)]
pub async fn week_schedule(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Query(query): Query<ScheduleQuery>,
) -> AppResult<Json<ApiResponse<WeekSchedule>>> {
    let resp = barber_service::week_schedule(&state, &user, id, query.week_of).await?;
    Ok(Json(resp))
}
