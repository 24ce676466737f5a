use axum::{
    Json, Router,
    extract::{Path, Query},
    http::{HeaderMap, StatusCode, header},
    routing::{get, patch, post},
};
use barbershop_booking::{
    client::{
        ApiClient, AppointmentBoard, BookingDraft, ClientError, SessionManager, SessionStore,
        submit,
    },
    domain::{AppointmentStatus, Role, StatusAction},
    dto::{
        appointments::{AppointmentQuery, UpdateStatusRequest},
        auth::{AuthResponse, LoginRequest},
        barbers::SlotQuery,
    },
    error::{AppError, AppResult},
    models::{Appointment, Service, User},
    response::{ApiResponse, Meta},
};
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

const TOKEN: &str = "stub-token";
const KNOWN_APPOINTMENT: Uuid = Uuid::from_u128(0x5eed);

fn ana() -> User {
    User {
        id: Uuid::from_u128(7),
        name: "Ana".into(),
        email: "ana@example.com".into(),
        phone: None,
        role: Role::Admin,
        created_at: Utc::now(),
    }
}

fn appointment(id: Uuid, status: AppointmentStatus) -> Appointment {
    Appointment {
        id,
        client_id: Uuid::from_u128(7),
        barber_id: Uuid::from_u128(9),
        service_ids: vec![Uuid::from_u128(11)],
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

fn require_token(headers: &HeaderMap) -> AppResult<()> {
    let expected = format!("Bearer {TOKEN}");
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(AppError::Unauthorized("Missing Authorization header".into())),
    }
}

async fn login(Json(body): Json<LoginRequest>) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    if body.email != "ana@example.com" || body.password != "secret1" {
        return Err(AppError::BadRequest("Invalid email or password".into()));
    }
    let data = AuthResponse {
        token: TOKEN.into(),
        user: ana(),
    };
    Ok(Json(ApiResponse::success("Logged in", data, None)))
}

async fn slots(Query(query): Query<SlotQuery>) -> Json<ApiResponse<Vec<String>>> {
    let slots = if query.date.format("%u").to_string() == "7" {
        Vec::new()
    } else {
        vec!["09:00".to_string(), "09:30".to_string()]
    };
    Json(ApiResponse::success("Available slots", slots, None))
}

async fn list(
    headers: HeaderMap,
    Query(query): Query<AppointmentQuery>,
) -> AppResult<Json<ApiResponse<Vec<Appointment>>>> {
    require_token(&headers)?;
    let mut items = vec![
        appointment(KNOWN_APPOINTMENT, AppointmentStatus::Scheduled),
        appointment(Uuid::from_u128(0xbeef), AppointmentStatus::Completed),
    ];
    if let Some(status) = query.status {
        items.retain(|a| a.status == status);
    }
    let total = items.len() as i64;
    Ok(Json(ApiResponse::success(
        "Appointments",
        items,
        Some(Meta::new(1, 20, total)),
    )))
}

async fn create(headers: HeaderMap) -> AppResult<Json<ApiResponse<Appointment>>> {
    require_token(&headers)?;
    Err(AppError::Conflict("time slot was just taken".into()))
}

async fn status(
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateStatusRequest>,
) -> AppResult<Json<ApiResponse<Appointment>>> {
    require_token(&headers)?;
    if id != KNOWN_APPOINTMENT {
        return Err(AppError::NotFound);
    }
    Ok(Json(ApiResponse::success(
        "Status updated",
        appointment(id, body.status),
        None,
    )))
}

async fn spawn_stub() -> String {
    let api = Router::new()
        .route("/auth/login", post(login))
        .route("/barbers/available-slots", get(slots))
        .route("/appointments", get(list).post(create))
        .route("/appointments/{id}/status", patch(status));
    let app = Router::new()
        .nest("/api", api)
        .fallback(|| async { StatusCode::NOT_FOUND });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

fn temp_store() -> SessionStore {
    SessionStore::new(
        std::env::temp_dir()
            .join(format!("barbershop-client-test-{}", Uuid::new_v4()))
            .join("session.json"),
    )
}

#[tokio::test]
async fn login_persists_session_and_token_is_sent() {
    let base = spawn_stub().await;
    let store = temp_store();
    let mut session = SessionManager::new(ApiClient::new(base.clone()), store.clone());
    assert!(!session.is_authenticated());

    let user = session.login("ana@example.com", "secret1").await.unwrap();
    assert_eq!(user.email, "ana@example.com");
    assert!(session.is_admin());
    assert!(store.is_admin());
    assert_eq!(store.token().as_deref(), Some(TOKEN));

    // a fresh manager picks the stored token back up
    let restored = SessionManager::new(ApiClient::new(base), store.clone());
    let page = restored
        .api()
        .list_appointments(&AppointmentQuery::default())
        .await
        .unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.meta.and_then(|m| m.total), Some(2));

    session.logout().unwrap();
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn filters_are_sent_as_query_params() {
    let base = spawn_stub().await;
    let api = ApiClient::new(base).with_token(Some(TOKEN.into()));
    let query = AppointmentQuery {
        status: Some(AppointmentStatus::Completed),
        ..Default::default()
    };
    let page = api.list_appointments(&query).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].status, AppointmentStatus::Completed);
}

#[tokio::test]
async fn api_errors_carry_status_and_message() {
    let base = spawn_stub().await;
    let api = ApiClient::new(base);

    let err = api.login("ana@example.com", "wrong").await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert!(err.user_message("fallback").contains("Invalid email or password"));

    let err = api
        .list_appointments(&AppointmentQuery::default())
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn slots_are_decoded() {
    let base = spawn_stub().await;
    let api = ApiClient::new(base);
    let monday = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();
    let sunday = NaiveDate::from_ymd_opt(2025, 5, 4).unwrap();

    let slots = api.available_slots(Uuid::from_u128(9), monday).await.unwrap();
    assert_eq!(slots, vec!["09:00", "09:30"]);
    assert!(api.available_slots(Uuid::from_u128(9), sunday).await.unwrap().is_empty());
}

#[tokio::test]
async fn booking_conflict_keeps_the_draft() {
    let base = spawn_stub().await;
    let mut session = SessionManager::new(ApiClient::new(base), temp_store());

    let service = Service {
        id: Uuid::from_u128(11),
        name: "Classic Cut".into(),
        description: None,
        category: Some("Hair".into()),
        price: 3500,
        duration_minutes: 30,
        active: true,
        created_at: Utc::now(),
    };
    let mut draft = BookingDraft::default();
    draft.select_barber(Uuid::from_u128(9));
    draft.select_date(NaiveDate::from_ymd_opt(2025, 5, 6).unwrap());
    draft.select_time("10:00");
    draft.toggle_service(&service);

    // not logged in yet
    let err = submit(&session, &mut draft).await.unwrap_err();
    assert!(matches!(err, ClientError::LoginRequired));

    session.login("ana@example.com", "secret1").await.unwrap();
    let err = submit(&session, &mut draft).await.unwrap_err();
    assert_eq!(err.status(), Some(409));
    assert!(err.user_message("fallback").contains("time slot was just taken"));
    assert_eq!(draft.time(), Some("10:00"));

    session.logout().unwrap();
}

#[tokio::test]
async fn status_action_patches_board_and_rolls_back_on_failure() {
    let base = spawn_stub().await;
    let api = ApiClient::new(base).with_token(Some(TOKEN.into()));

    let orphan = Uuid::from_u128(0xdead);
    let mut board = AppointmentBoard::new(
        Role::Admin,
        vec![
            appointment(KNOWN_APPOINTMENT, AppointmentStatus::Scheduled),
            appointment(orphan, AppointmentStatus::Scheduled),
        ],
    );

    board
        .perform(&api, KNOWN_APPOINTMENT, StatusAction::Confirm)
        .await
        .unwrap();
    assert_eq!(
        board.get(KNOWN_APPOINTMENT).unwrap().status,
        AppointmentStatus::Confirmed
    );
    assert_eq!(
        board.actions_for(KNOWN_APPOINTMENT),
        vec![StatusAction::Complete, StatusAction::Cancel]
    );

    let err = board
        .perform(&api, orphan, StatusAction::Cancel)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(board.get(orphan).unwrap().status, AppointmentStatus::Scheduled);
}
