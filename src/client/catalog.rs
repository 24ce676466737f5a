use std::collections::BTreeMap;

use uuid::Uuid;

use crate::{
    client::{api::ApiClient, error::ClientResult},
    dto::services::{CreateServiceRequest, UpdateServiceRequest},
    models::Service,
};

impl ApiClient {
    pub async fn list_services(&self, active: Option<bool>) -> ClientResult<Vec<Service>> {
        match active {
            Some(active) => self.get_query("/services", &[("active", active)]).await,
            None => self.get("/services").await,
        }
    }

    /// Category name to services; uncategorised ones sit under "Other".
    pub async fn services_by_category(&self) -> ClientResult<BTreeMap<String, Vec<Service>>> {
        self.get_query("/services/by-category", &[("active", true)])
            .await
    }

    pub async fn get_service(&self, id: Uuid) -> ClientResult<Service> {
        self.get(&format!("/services/{id}")).await
    }

    pub async fn create_service(&self, payload: &CreateServiceRequest) -> ClientResult<Service> {
        self.post("/services", payload).await
    }

    pub async fn update_service(
        &self,
        id: Uuid,
        payload: &UpdateServiceRequest,
    ) -> ClientResult<Service> {
        self.put(&format!("/services/{id}"), payload).await
    }

    pub async fn delete_service(&self, id: Uuid) -> ClientResult<()> {
        self.delete(&format!("/services/{id}")).await
    }
}
