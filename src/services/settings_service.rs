use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use crate::{
    audit,
    dto::settings::UpdateSettingsRequest,
    entity::settings::{ActiveModel as SettingsActive, Entity as SettingsTable, Model as SettingsModel},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Settings,
    response::{ApiResponse, Meta},
    state::AppState,
};

const SETTINGS_ROW: i32 = 1;

/// Returns the stored settings, or the defaults when none were saved yet.
pub async fn get_settings(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Settings>> {
    ensure_admin(user)?;
    let settings = SettingsTable::find_by_id(SETTINGS_ROW)
        .one(&state.orm)
        .await?
        .map(settings_from_entity)
        .unwrap_or_default();
    Ok(ApiResponse::success("Settings", settings, None))
}

pub async fn update_settings(
    state: &AppState,
    user: &AuthUser,
    payload: UpdateSettingsRequest,
) -> AppResult<ApiResponse<Settings>> {
    ensure_admin(user)?;
    payload
        .business_hours
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    if payload.notifications.reminder_lead_hours < 0 {
        return Err(AppError::BadRequest(
            "reminder lead time must not be negative".into(),
        ));
    }

    let row = SettingsActive {
        id: Set(SETTINGS_ROW),
        general: Set(serde_json::to_value(&payload.general).map_err(anyhow::Error::from)?),
        business_hours: Set(serde_json::to_value(payload.business_hours.normalized())
            .map_err(anyhow::Error::from)?),
        notifications: Set(
            serde_json::to_value(&payload.notifications).map_err(anyhow::Error::from)?
        ),
        updated_at: Set(Utc::now().into()),
    };

    let exists = SettingsTable::find_by_id(SETTINGS_ROW)
        .one(&state.orm)
        .await?
        .is_some();
    let saved = if exists {
        row.update(&state.orm).await?
    } else {
        row.insert(&state.orm).await?
    };

    audit::record(
        &state.pool,
        user.user_id,
        "settings_update",
        "settings",
        serde_json::json!({ "shop_name": payload.general.shop_name }),
    )
    .await;

    Ok(ApiResponse::success(
        "Settings saved",
        settings_from_entity(saved),
        Some(Meta::empty()),
    ))
}

/// Columns that fail to decode fall back to their defaults.
pub(crate) fn settings_from_entity(model: SettingsModel) -> Settings {
    let defaults = Settings::default();
    Settings {
        general: serde_json::from_value(model.general).unwrap_or(defaults.general),
        business_hours: serde_json::from_value(model.business_hours)
            .unwrap_or(defaults.business_hours),
        notifications: serde_json::from_value(model.notifications)
            .unwrap_or(defaults.notifications),
        updated_at: Some(model.updated_at.with_timezone(&Utc)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WorkingHours;

    #[test]
    fn broken_json_columns_use_defaults() {
        let model = SettingsModel {
            id: SETTINGS_ROW,
            general: serde_json::json!({ "shop_name": "Navalha" }),
            business_hours: serde_json::json!({
                "start": "10:00", "end": "20:00", "days": [2, 3, 4]
            }),
            notifications: serde_json::json!("nope"),
            updated_at: Utc::now().into(),
        };
        let settings = settings_from_entity(model);
        // missing general fields make the whole section fall back
        assert_eq!(settings.general, Default::default());
        assert_eq!(settings.business_hours.start, "10:00");
        assert_eq!(settings.business_hours.days, vec![2, 3, 4]);
        assert_eq!(settings.notifications, Default::default());
        assert!(settings.updated_at.is_some());
        assert_ne!(settings.business_hours, WorkingHours::business_default());
    }
}
