use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError, BearerToken};
use crate::models::{AuthResponse, User};

use super::Storage;

/// Storage key holding the raw bearer token
pub const TOKEN_KEY: &str = "fp_token";

/// Storage key holding the JSON-serialized user profile
pub const USER_KEY: &str = "fp_user";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

/// Authenticated session kept in sync with durable storage.
///
/// The token is non-empty exactly when a user is present. Both are read
/// from storage by [`SessionStore::open`] and written back on every change.
pub struct SessionStore<S: Storage> {
    api: ApiClient,
    storage: S,
    token: String,
    user: Option<User>,
}

impl<S: Storage> SessionStore<S> {
    /// Restore the session persisted in `storage`.
    ///
    /// Unreadable or malformed entries never fail construction; they load
    /// as a logged-out session. Storage is left untouched.
    pub fn open(api: ApiClient, storage: S) -> Self {
        let token = Self::load_token(&storage);
        let user = Self::load_user(&storage);

        let (token, user) = match (token, user) {
            (Some(token), Some(user)) => {
                debug!(user = %user.display_name(), "Session restored");
                (token, Some(user))
            }
            (None, None) => (String::new(), None),
            (token, user) => {
                warn!(
                    has_token = token.is_some(),
                    has_user = user.is_some(),
                    "Incomplete stored session, starting logged out"
                );
                (String::new(), None)
            }
        };

        Self {
            api,
            storage,
            token,
            user,
        }
    }

    fn load_token(storage: &S) -> Option<String> {
        match storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "Failed to read stored token");
                None
            }
        }
    }

    fn load_user(storage: &S) -> Option<User> {
        let text = match storage.get(USER_KEY) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "Failed to read stored user");
                return None;
            }
        };
        // "null" is a valid stored value meaning no user
        match serde_json::from_str::<Option<User>>(&text) {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Stored user is malformed, ignoring it");
                None
            }
        }
    }

    /// Current bearer token; empty when logged out
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn state(&self) -> SessionState {
        if self.token.is_empty() {
            SessionState::Anonymous
        } else {
            SessionState::Authenticated
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    /// Credential for authenticated API calls, if logged in
    pub fn bearer(&self) -> Option<BearerToken> {
        BearerToken::new(self.token.clone())
    }

    /// The client used for auth calls, shared with callers
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Log in and adopt the returned session.
    /// On error the current session is left as it was.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let auth = self.api.login(email, password).await?;
        self.adopt(&auth);
        info!(user = %auth.user.display_name(), "Logged in");
        Ok(auth)
    }

    /// Register an account and adopt the returned session.
    /// On error the current session is left as it was.
    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError> {
        let auth = self.api.register(name, email, password).await?;
        self.adopt(&auth);
        info!(user = %auth.user.display_name(), "Registered");
        Ok(auth)
    }

    /// Drop the session from memory and storage. Safe to call when logged out.
    pub fn logout(&mut self) {
        if self.is_authenticated() {
            info!("Logged out");
        }
        self.token.clear();
        self.user = None;

        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!(key, error = %e, "Failed to remove stored session entry");
            }
        }
    }

    fn adopt(&mut self, auth: &AuthResponse) {
        self.token = auth.token.clone();
        self.user = Some(auth.user.clone());

        // Storage failures are logged; the in-memory session stands
        if let Err(e) = self.storage.set(TOKEN_KEY, &auth.token) {
            warn!(error = %e, "Failed to save token");
        }
        match serde_json::to_string(&auth.user) {
            Ok(json) => {
                if let Err(e) = self.storage.set(USER_KEY, &json) {
                    warn!(error = %e, "Failed to save user");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize user"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryStorage;
    use crate::models::Id;

    /// Client pointed at a local port nothing listens on
    fn offline_api() -> ApiClient {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        ApiClient::new(format!("http://{}", addr)).unwrap()
    }

    fn storage_with(token: Option<&str>, user: Option<&str>) -> MemoryStorage {
        let mut storage = MemoryStorage::new();
        if let Some(token) = token {
            storage.set(TOKEN_KEY, token).unwrap();
        }
        if let Some(user) = user {
            storage.set(USER_KEY, user).unwrap();
        }
        storage
    }

    #[test]
    fn test_open_empty_storage_is_anonymous() {
        let store = SessionStore::open(offline_api(), MemoryStorage::new());
        assert_eq!(store.state(), SessionState::Anonymous);
        assert_eq!(store.token(), "");
        assert!(store.user().is_none());
        assert!(store.bearer().is_none());
    }

    #[test]
    fn test_open_restores_session() {
        let storage = storage_with(Some("t1"), Some(r#"{"id":1,"name":"Demo"}"#));
        let store = SessionStore::open(offline_api(), storage);
        assert!(store.is_authenticated());
        assert_eq!(store.token(), "t1");
        let user = store.user().unwrap();
        assert_eq!(user.id(), Some(Id::Int(1)));
        assert_eq!(user.name(), Some("Demo"));
        assert_eq!(store.bearer().unwrap().as_str(), "t1");
    }

    #[test]
    fn test_open_with_corrupted_user_does_not_fail() {
        let storage = storage_with(Some("t1"), Some("{not json"));
        let store = SessionStore::open(offline_api(), storage);
        assert!(store.user().is_none());
        assert_eq!(store.state(), SessionState::Anonymous);
        // Storage is not rewritten on open
        assert_eq!(store.storage().get(TOKEN_KEY).unwrap().as_deref(), Some("t1"));
    }

    #[test]
    fn test_open_with_null_user() {
        let storage = storage_with(None, Some("null"));
        let store = SessionStore::open(offline_api(), storage);
        assert!(store.user().is_none());
        assert_eq!(store.token(), "");
    }

    #[test]
    fn test_open_with_user_but_no_token() {
        let storage = storage_with(None, Some(r#"{"id":1,"name":"Demo"}"#));
        let store = SessionStore::open(offline_api(), storage);
        assert_eq!(store.state(), SessionState::Anonymous);
        assert!(store.user().is_none());
    }

    #[test]
    fn test_logout_clears_memory_and_storage() {
        let storage = storage_with(Some("t1"), Some(r#"{"id":1,"name":"Demo"}"#));
        let mut store = SessionStore::open(offline_api(), storage);

        store.logout();
        assert_eq!(store.token(), "");
        assert!(store.user().is_none());
        assert!(store.storage().is_empty());

        store.logout();
        assert_eq!(store.state(), SessionState::Anonymous);
        assert!(store.storage().is_empty());
    }

    #[tokio::test]
    async fn test_failed_login_keeps_session() {
        let storage = storage_with(Some("t1"), Some(r#"{"id":1,"name":"Demo"}"#));
        let mut store = SessionStore::open(offline_api(), storage);

        let err = store.login("demo@flowplan.dev", "flowplan").await.unwrap_err();
        assert!(!err.message().is_empty());
        assert_eq!(store.token(), "t1");
        assert_eq!(store.user().unwrap().name(), Some("Demo"));
        assert_eq!(store.storage().get(TOKEN_KEY).unwrap().as_deref(), Some("t1"));
    }
}
