use crate::{client::session::SessionStore, models::User};

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Allow,
    Redirect(&'static str),
}

/// Who may open a screen. Unknown paths are public and end up on the
/// not-found screen.
pub fn required_access(path: &str) -> Access {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let path = path.trim_end_matches('/');
    if path == "/admin" || path.starts_with("/admin/") {
        Access::Admin
    } else if path == "/profile" || path.starts_with("/profile/") {
        Access::Authenticated
    } else {
        Access::Public
    }
}

pub fn check(path: &str, user: Option<&User>) -> Guard {
    match (required_access(path), user) {
        (Access::Public, _) => Guard::Allow,
        (_, None) => Guard::Redirect(LOGIN_PATH),
        (Access::Authenticated, Some(_)) => Guard::Allow,
        (Access::Admin, Some(user)) if user.is_admin() => Guard::Allow,
        (Access::Admin, Some(_)) => Guard::Redirect(HOME_PATH),
    }
}

/// Same decision, reading the session file at the moment of the check.
pub fn check_stored(path: &str, store: &SessionStore) -> Guard {
    let user = store.load().map(|s| s.user);
    check(path, user.as_ref())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::domain::Role;

    fn user(role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Bia".into(),
            email: "bia@example.com".into(),
            phone: None,
            role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn classifies_paths() {
        for path in ["/", "/barbers", "/barbers/42", "/services", "/appointment", "/login", "/register"] {
            assert_eq!(required_access(path), Access::Public, "{path}");
        }
        assert_eq!(required_access("/profile"), Access::Authenticated);
        assert_eq!(required_access("/profile/appointments"), Access::Authenticated);
        assert_eq!(required_access("/admin"), Access::Admin);
        assert_eq!(required_access("/admin/barbers/1/schedule?week_of=2025-01-05"), Access::Admin);
        assert_eq!(required_access("/administrator"), Access::Public);
    }

    #[test]
    fn redirects() {
        let client = user(Role::Client);
        let admin = user(Role::Admin);

        assert_eq!(check("/barbers", None), Guard::Allow);
        assert_eq!(check("/profile", None), Guard::Redirect(LOGIN_PATH));
        assert_eq!(check("/admin", None), Guard::Redirect(LOGIN_PATH));

        assert_eq!(check("/profile/appointments", Some(&client)), Guard::Allow);
        assert_eq!(check("/admin/settings", Some(&client)), Guard::Redirect(HOME_PATH));
        assert_eq!(check("/admin/settings", Some(&admin)), Guard::Allow);
    }
}
