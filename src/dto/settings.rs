use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::WorkingHours,
    models::{GeneralSettings, NotificationSettings},
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateSettingsRequest {
    pub general: GeneralSettings,
    pub business_hours: WorkingHours,
    pub notifications: NotificationSettings,
}
