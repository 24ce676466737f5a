use crate::{
    client::{api::ApiClient, error::ClientResult},
    dto::auth::{AuthResponse, LoginRequest, RegisterRequest, UpdateProfileRequest},
    models::User,
};

impl ApiClient {
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post("/auth/login", &body).await
    }

    pub async fn register(&self, payload: &RegisterRequest) -> ClientResult<AuthResponse> {
        self.post("/auth/register", payload).await
    }

    pub async fn me(&self) -> ClientResult<User> {
        self.get("/auth/me").await
    }

    pub async fn update_profile(&self, payload: &UpdateProfileRequest) -> ClientResult<User> {
        self.patch("/auth/me", payload).await
    }
}
