use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{AppointmentStatus, Priced, Role, WorkingHours, format::format_phone};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Barber {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub photo_url: Option<String>,
    pub specialties: Vec<String>,
    pub working_hours: WorkingHours,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Barber {
    pub fn phone_label(&self) -> Option<String> {
        self.phone.as_deref().map(format_phone)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    /// Price in cents.
    pub price: i64,
    pub duration_minutes: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Priced for Service {
    fn price(&self) -> i64 {
        self.price
    }

    fn duration_minutes(&self) -> i32 {
        self.duration_minutes
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Review {
    pub rating: i16,
    pub comment: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Appointment {
    pub id: Uuid,
    pub client_id: Uuid,
    pub barber_id: Uuid,
    pub service_ids: Vec<Uuid>,
    pub date: NaiveDate,
    pub time: String,
    pub total_price: i64,
    pub total_duration: i32,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub review: Option<Review>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeneralSettings {
    pub shop_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub logo: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NotificationSettings {
    pub email_confirmation: bool,
    pub email_reminder: bool,
    pub sms_reminder: bool,
    pub reminder_lead_hours: i32,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_confirmation: true,
            email_reminder: true,
            sms_reminder: false,
            reminder_lead_hours: 24,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Settings {
    pub general: GeneralSettings,
    pub business_hours: WorkingHours,
    pub notifications: NotificationSettings,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            general: GeneralSettings::default(),
            business_hours: WorkingHours::business_default(),
            notifications: NotificationSettings::default(),
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barber_phone_is_shown_in_local_format() {
        let mut carlos = Barber {
            id: Uuid::new_v4(),
            name: "Carlos".into(),
            email: None,
            phone: None,
            photo_url: None,
            specialties: Vec::new(),
            working_hours: WorkingHours::default(),
            active: true,
            created_at: Utc::now(),
        };
        assert_eq!(carlos.phone_label(), None);
        carlos.phone = Some("11987654321".into());
        assert_eq!(carlos.phone_label().as_deref(), Some("(11) 98765-4321"));
    }
}
