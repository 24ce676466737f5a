use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::{
    client::{
        api::ApiClient,
        error::{ClientError, ClientResult},
    },
    config::ClientConfig,
    dto::auth::{AuthResponse, RegisterRequest, UpdateProfileRequest},
    models::User,
};

/// What survives between runs: the raw bearer token and the user it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.user.is_admin()
    }
}

impl From<AuthResponse> for Session {
    fn from(value: AuthResponse) -> Self {
        Self {
            token: value.token,
            user: value.user,
        }
    }
}

/// JSON file holding the current session. Reads hit the disk every time so
/// that every permission check sees the latest login or logout.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.session_file.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file means nobody is logged in. An unreadable one is
    /// discarded and treated the same way.
    pub fn load(&self) -> Option<Session> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!(error = %err, path = %self.path.display(), "cannot read session");
                return None;
            }
        };
        match serde_json::from_slice(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                tracing::warn!(error = %err, "dropping corrupt session file");
                let _ = self.clear();
                None
            }
        }
    }

    pub fn save(&self, session: &Session) -> ClientResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        // write-then-rename so a crash never leaves half a file behind
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(session)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn clear(&self) -> ClientResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ClientError::Storage(err)),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.load().map(|s| s.token)
    }

    pub fn user(&self) -> Option<User> {
        self.load().map(|s| s.user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.load().is_some_and(|s| !s.token.is_empty())
    }

    pub fn is_admin(&self) -> bool {
        self.load().is_some_and(|s| s.is_admin())
    }
}

/// Owns the API client and the session file, and tells subscribers who is
/// logged in whenever that changes.
pub struct SessionManager {
    api: ApiClient,
    store: SessionStore,
    current: watch::Sender<Option<User>>,
}

impl SessionManager {
    /// Restores any stored session and points the client at its token.
    pub fn new(api: ApiClient, store: SessionStore) -> Self {
        let stored = store.load();
        let api = api.with_token(stored.as_ref().map(|s| s.token.clone()));
        let (current, _) = watch::channel(stored.map(|s| s.user));
        Self {
            api,
            store,
            current,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(ApiClient::from_config(config), SessionStore::from_config(config))
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.current.subscribe()
    }

    pub fn user(&self) -> Option<User> {
        self.current.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.api.token().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.current.borrow().as_ref().is_some_and(User::is_admin)
    }

    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<User> {
        let response = self.api.login(email, password).await?;
        self.start(response.into())
    }

    pub async fn register(&mut self, payload: &RegisterRequest) -> ClientResult<User> {
        let response = self.api.register(payload).await?;
        self.start(response.into())
    }

    /// Re-reads the user from the API. A rejected token ends the session.
    pub async fn refresh(&mut self) -> ClientResult<Option<User>> {
        let Some(token) = self.api.token().map(str::to_string) else {
            return Ok(None);
        };
        match self.api.me().await {
            Ok(user) => {
                self.store.save(&Session {
                    token,
                    user: user.clone(),
                })?;
                self.current.send_replace(Some(user.clone()));
                Ok(Some(user))
            }
            Err(err) if err.is_unauthorized() => {
                tracing::info!("stored token rejected, logging out");
                self.logout()?;
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    pub async fn update_profile(&mut self, payload: &UpdateProfileRequest) -> ClientResult<User> {
        let token = self
            .api
            .token()
            .map(str::to_string)
            .ok_or(ClientError::LoginRequired)?;
        let user = self.api.update_profile(payload).await?;
        self.store.save(&Session {
            token,
            user: user.clone(),
        })?;
        self.current.send_replace(Some(user.clone()));
        Ok(user)
    }

    pub fn logout(&mut self) -> ClientResult<()> {
        self.api.set_token(None);
        self.current.send_replace(None);
        self.store.clear()
    }

    fn start(&mut self, session: Session) -> ClientResult<User> {
        self.store.save(&session)?;
        self.api.set_token(Some(session.token.clone()));
        self.current.send_replace(Some(session.user.clone()));
        tracing::debug!(user_id = %session.user.id, "session started");
        Ok(session.user)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::domain::Role;

    fn session(role: Role) -> Session {
        Session {
            token: "token-123".into(),
            user: User {
                id: Uuid::new_v4(),
                name: "Marina".into(),
                email: "marina@example.com".into(),
                phone: Some("11987654321".into()),
                role,
                created_at: Utc::now(),
            },
        }
    }

    fn temp_store(name: &str) -> SessionStore {
        let path = std::env::temp_dir()
            .join(format!("barbershop-session-test-{}", Uuid::new_v4()))
            .join(name);
        SessionStore::new(path)
    }

    #[test]
    fn save_load_clear() {
        let store = temp_store("session.json");
        assert!(store.load().is_none());
        assert!(!store.is_authenticated());

        let saved = session(Role::Admin);
        store.save(&saved).unwrap();
        assert_eq!(store.load(), Some(saved.clone()));
        assert!(store.is_authenticated());
        assert!(store.is_admin());
        assert_eq!(store.token().as_deref(), Some("token-123"));

        store.clear().unwrap();
        assert!(store.load().is_none());
        // clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn client_role_is_not_admin() {
        let store = temp_store("session.json");
        store.save(&session(Role::Client)).unwrap();
        assert!(store.is_authenticated());
        assert!(!store.is_admin());
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_file_reads_as_logged_out() {
        let store = temp_store("session.json");
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), b"{not json").unwrap();
        assert!(store.load().is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn manager_restores_stored_session() {
        let store = temp_store("session.json");
        let saved = session(Role::Admin);
        store.save(&saved).unwrap();

        let mut manager = SessionManager::new(ApiClient::new("http://127.0.0.1:9"), store.clone());
        assert!(manager.is_authenticated());
        assert!(manager.is_admin());
        assert_eq!(manager.api().token(), Some("token-123"));

        let watcher = manager.subscribe();
        manager.logout().unwrap();
        assert!(watcher.borrow().is_none());
        assert!(!manager.is_authenticated());
        assert!(store.load().is_none());
    }
}
