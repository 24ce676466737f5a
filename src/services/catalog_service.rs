use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, ActiveValue::NotSet,
};
use uuid::Uuid;

use crate::{
    audit,
    domain::catalog::group_by_category,
    dto::services::{
        CreateServiceRequest, ServiceGroups, ServiceList, ServiceListQuery, UpdateServiceRequest,
    },
    entity::{
        appointment_services::{Column as LinkCol, Entity as AppointmentServices},
        services::{ActiveModel, Column, Entity as Services, Model as ServiceModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Service,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_services(
    state: &AppState,
    query: ServiceListQuery,
) -> AppResult<ApiResponse<ServiceList>> {
    let items = fetch_services(state, query.active).await?;
    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success("Services", ServiceList { items }, Some(meta)))
}

pub async fn services_by_category(
    state: &AppState,
    query: ServiceListQuery,
) -> AppResult<ApiResponse<ServiceGroups>> {
    let items = fetch_services(state, query.active).await?;
    let groups = group_by_category(items);
    let meta = Meta::total(groups.len() as i64);
    Ok(ApiResponse::success(
        "Services by category",
        ServiceGroups { groups },
        Some(meta),
    ))
}

pub async fn get_service(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Service>> {
    let result = Services::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(service_from_entity);
    let result = match result {
        Some(s) => s,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Service", result, None))
}

pub async fn create_service(
    state: &AppState,
    user: &AuthUser,
    payload: CreateServiceRequest,
) -> AppResult<ApiResponse<Service>> {
    ensure_admin(user)?;
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("name is required".into()));
    }
    validate_price(payload.price)?;
    validate_duration(payload.duration_minutes)?;

    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        description: Set(payload.description),
        category: Set(payload.category.filter(|c| !c.trim().is_empty())),
        price: Set(payload.price),
        duration_minutes: Set(payload.duration_minutes),
        active: Set(payload.active.unwrap_or(true)),
        created_at: NotSet,
    };
    let service = active.insert(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "service_create",
        "services",
        serde_json::json!({ "service_id": service.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Service created",
        service_from_entity(service),
        Some(Meta::empty()),
    ))
}

pub async fn update_service(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateServiceRequest,
) -> AppResult<ApiResponse<Service>> {
    ensure_admin(user)?;
    let existing = Services::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(s) => s,
        None => return Err(AppError::NotFound),
    };

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::BadRequest("name is required".into()));
        }
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(category) = payload.category {
        active.category = Set(Some(category).filter(|c| !c.trim().is_empty()));
    }
    if let Some(price) = payload.price {
        validate_price(price)?;
        active.price = Set(price);
    }
    if let Some(duration) = payload.duration_minutes {
        validate_duration(duration)?;
        active.duration_minutes = Set(duration);
    }
    if let Some(flag) = payload.active {
        active.active = Set(flag);
    }

    let service = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "service_update",
        "services",
        serde_json::json!({ "service_id": service.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        service_from_entity(service),
        Some(Meta::empty()),
    ))
}

pub async fn delete_service(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;

    let used = AppointmentServices::find()
        .filter(LinkCol::ServiceId.eq(id))
        .count(&state.orm)
        .await?;
    if used > 0 {
        return Err(AppError::Conflict(
            "service is part of existing appointments; deactivate instead".into(),
        ));
    }

    let result = Services::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        user.user_id,
        "service_delete",
        "services",
        serde_json::json!({ "service_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Loads the given services, failing when any id is unknown.
pub(crate) async fn find_many(state: &AppState, ids: &[Uuid]) -> AppResult<Vec<ServiceModel>> {
    let found = Services::find()
        .filter(Column::Id.is_in(ids.iter().copied()))
        .all(&state.orm)
        .await?;
    if let Some(missing) = ids.iter().find(|id| !found.iter().any(|s| s.id == **id)) {
        return Err(AppError::BadRequest(format!("unknown service {missing}")));
    }
    Ok(found)
}

async fn fetch_services(state: &AppState, active: Option<bool>) -> AppResult<Vec<Service>> {
    let mut condition = Condition::all();
    if let Some(active) = active {
        condition = condition.add(Column::Active.eq(active));
    }
    let items = Services::find()
        .filter(condition)
        .order_by_asc(Column::Category)
        .order_by_asc(Column::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(service_from_entity)
        .collect();
    Ok(items)
}

/// R$ 100.000,00 in cents.
const MAX_PRICE: i64 = 10_000_000;
/// A service cannot take longer than a day.
const MAX_DURATION_MINUTES: i32 = 24 * 60;

fn validate_price(price: i64) -> AppResult<()> {
    if price < 0 {
        return Err(AppError::BadRequest("price must not be negative".into()));
    }
    if price > MAX_PRICE {
        return Err(AppError::BadRequest(format!(
            "price must be at most {MAX_PRICE} cents"
        )));
    }
    Ok(())
}

fn validate_duration(minutes: i32) -> AppResult<()> {
    if minutes <= 0 {
        return Err(AppError::BadRequest("duration must be greater than 0".into()));
    }
    if minutes > MAX_DURATION_MINUTES {
        return Err(AppError::BadRequest(format!(
            "duration must be at most {MAX_DURATION_MINUTES} minutes"
        )));
    }
    Ok(())
}

pub(crate) fn service_from_entity(model: ServiceModel) -> Service {
    Service {
        id: model.id,
        name: model.name,
        description: model.description,
        category: model.category,
        price: model.price,
        duration_minutes: model.duration_minutes,
        active: model.active,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_must_be_within_bounds() {
        assert!(validate_price(0).is_ok());
        assert!(validate_price(MAX_PRICE).is_ok());
        assert!(matches!(validate_price(-1), Err(AppError::BadRequest(_))));
        assert!(matches!(validate_price(i64::MAX), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn duration_must_fit_in_a_day() {
        assert!(validate_duration(30).is_ok());
        assert!(validate_duration(24 * 60).is_ok());
        assert!(matches!(validate_duration(0), Err(AppError::BadRequest(_))));
        assert!(matches!(validate_duration(i32::MAX), Err(AppError::BadRequest(_))));
    }
}
