use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    client::{api::ApiClient, error::ClientResult},
    domain::schedule::WeekSchedule,
    dto::barbers::{CreateBarberRequest, UpdateBarberRequest},
    models::Barber,
};

impl ApiClient {
    pub async fn list_barbers(&self, active: Option<bool>) -> ClientResult<Vec<Barber>> {
        match active {
            Some(active) => self.get_query("/barbers", &[("active", active)]).await,
            None => self.get("/barbers").await,
        }
    }

    pub async fn get_barber(&self, id: Uuid) -> ClientResult<Barber> {
        self.get(&format!("/barbers/{id}")).await
    }

    pub async fn available_slots(&self, barber_id: Uuid, date: NaiveDate) -> ClientResult<Vec<String>> {
        let query = [
            ("barber_id", barber_id.to_string()),
            ("date", date.to_string()),
        ];
        self.get_query("/barbers/available-slots", &query).await
    }

    pub async fn barber_schedule(
        &self,
        barber_id: Uuid,
        week_of: Option<NaiveDate>,
    ) -> ClientResult<WeekSchedule> {
        let path = format!("/barbers/{barber_id}/schedule");
        match week_of {
            Some(day) => self.get_query(&path, &[("week_of", day.to_string())]).await,
            None => self.get(&path).await,
        }
    }

    pub async fn create_barber(&self, payload: &CreateBarberRequest) -> ClientResult<Barber> {
        self.post("/barbers", payload).await
    }

    pub async fn update_barber(
        &self,
        id: Uuid,
        payload: &UpdateBarberRequest,
    ) -> ClientResult<Barber> {
        self.put(&format!("/barbers/{id}"), payload).await
    }

    pub async fn delete_barber(&self, id: Uuid) -> ClientResult<()> {
        self.delete(&format!("/barbers/{id}")).await
    }
}
