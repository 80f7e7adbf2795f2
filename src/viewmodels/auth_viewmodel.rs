// ============================================================================
// AUTH VIEWMODEL - login / logout / token refresh
// ============================================================================
// Business logic only. The outcome of every call is an AsyncUnit; expected
// failures never escape as errors. Session changes are committed through a
// single dispatch so subscribers never see half a credential set.
// ============================================================================

use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::models::{ApiLoginResult, Credentials, TokenInfo};
use crate::services::AuthService;
use crate::state::{AppStore, AsyncUnit, PendingUnit, SessionAction};
use crate::utils::constants::{GENERIC_LOGIN_ERROR, NO_REFRESH_TOKEN_ERROR, SESSION_ENDED_ERROR};

#[derive(Clone)]
pub struct AuthViewModel {
    store: AppStore,
    service: Rc<dyn AuthService>,
}

impl AuthViewModel {
    pub fn new(store: AppStore, service: Rc<dyn AuthService>) -> Self {
        Self { store, service }
    }

    /// Login; on success the whole credential set lands in one transition
    pub async fn login(&self, credentials: &Credentials) -> AsyncUnit<TokenInfo> {
        let pending = PendingUnit::new(self.store.next_request_id());
        log::info!("🔐 Logging in {}", credentials.email);

        match self.service.login(credentials).await {
            Ok(result) => self.commit_token(pending, result, SessionAction::LoginSucceeded),
            Err(e) => {
                log::error!("❌ Login request failed: {}", e);
                pending.reject(GENERIC_LOGIN_ERROR)
            }
        }
    }

    /// Ends the session. The backend call is best effort; local credentials
    /// are cleared whatever it answers.
    pub async fn logout(&self) -> AsyncUnit<()> {
        let pending = PendingUnit::new(self.store.next_request_id());
        let outcome = self.service.logout().await;

        self.store.dispatch(SessionAction::Reset.into());
        log::info!("👋 Session cleared");

        match outcome {
            Ok(()) => pending.fulfill(()),
            Err(e) => {
                log::warn!("⚠️ Backend logout failed: {}", e);
                pending.reject(e.to_string())
            }
        }
    }

    /// Mint a new access token from the stored refresh token.
    /// A failed refresh leaves the current session as it is. The result is
    /// only committed if the session that asked for it is still the live one:
    /// a logout (or a new login) while the call is in flight wins.
    pub async fn refresh(&self) -> AsyncUnit<TokenInfo> {
        let pending = PendingUnit::new(self.store.next_request_id());
        let refresh_token = self.store.select(|s| s.session.refresh_token.clone());

        if refresh_token.is_empty() {
            log::warn!("⚠️ Refresh requested without a refresh token");
            return pending.reject(NO_REFRESH_TOKEN_ERROR);
        }

        log::info!("🔄 Refreshing access token");
        let result = self.service.refresh(&refresh_token).await;

        let still_current = self
            .store
            .select(|s| s.session.authenticated && s.session.refresh_token == refresh_token);
        if !still_current {
            log::warn!("⚠️ Session ended while refreshing; dropping new token");
            return pending.reject(SESSION_ENDED_ERROR);
        }

        match result {
            Ok(result) => self.commit_token(pending, result, SessionAction::RefreshSucceeded),
            Err(e) => {
                log::error!("❌ Token refresh failed: {}", e);
                pending.reject(e.to_string())
            }
        }
    }

    /// Refresh only when the session is authenticated and its token expired
    pub async fn refresh_if_expired(&self, now: DateTime<Utc>) -> Option<AsyncUnit<TokenInfo>> {
        if !self.needs_refresh(now) {
            return None;
        }
        Some(self.refresh().await)
    }

    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        self.store
            .select(|s| s.session.authenticated && s.session.is_expired(now))
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.select(|s| s.session.authenticated)
    }

    /// OK status with a non-empty token is committed; anything else is a
    /// failure carrying the backend's message or the generic one.
    fn commit_token(
        &self,
        pending: PendingUnit,
        result: ApiLoginResult,
        action: fn(TokenInfo) -> SessionAction,
    ) -> AsyncUnit<TokenInfo> {
        if let Some(token) = result.accepted_token() {
            let token = token.clone();
            self.store.dispatch(action(token.clone()).into());
            log::info!("✅ Authenticated");
            return pending.fulfill(token);
        }

        let message = result
            .error_message()
            .unwrap_or(GENERIC_LOGIN_ERROR)
            .to_string();
        log::warn!("⚠️ Authentication rejected: {}", message);
        pending.reject(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ServiceError;
    use crate::state::{AppState, SessionState};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};

    /// Scripted backend: returns whatever the test put in
    struct ScriptedAuth {
        login: RefCell<Option<Result<ApiLoginResult, ServiceError>>>,
        refresh: RefCell<Option<Result<ApiLoginResult, ServiceError>>>,
        logout_fails: bool,
        refresh_calls: Cell<usize>,
        last_refresh_token: RefCell<Option<String>>,
        /// When set, refresh waits for this reply instead of `refresh`
        refresh_reply: RefCell<Option<oneshot::Receiver<Result<ApiLoginResult, ServiceError>>>>,
    }

    impl ScriptedAuth {
        fn new() -> Self {
            Self {
                login: RefCell::new(None),
                refresh: RefCell::new(None),
                logout_fails: false,
                refresh_calls: Cell::new(0),
                last_refresh_token: RefCell::new(None),
                refresh_reply: RefCell::new(None),
            }
        }

        fn with_login(self, reply: Result<ApiLoginResult, ServiceError>) -> Self {
            *self.login.borrow_mut() = Some(reply);
            self
        }

        fn with_refresh(self, reply: Result<ApiLoginResult, ServiceError>) -> Self {
            *self.refresh.borrow_mut() = Some(reply);
            self
        }

        fn with_delayed_refresh(
            self,
        ) -> (Self, oneshot::Sender<Result<ApiLoginResult, ServiceError>>) {
            let (tx, rx) = oneshot::channel();
            *self.refresh_reply.borrow_mut() = Some(rx);
            (self, tx)
        }
    }

    #[async_trait(?Send)]
    impl AuthService for ScriptedAuth {
        async fn login(&self, _credentials: &Credentials) -> Result<ApiLoginResult, ServiceError> {
            self.login
                .borrow_mut()
                .take()
                .unwrap_or_else(|| Err(ServiceError::Unavailable("no login scripted".into())))
        }

        async fn logout(&self) -> Result<(), ServiceError> {
            if self.logout_fails {
                Err(ServiceError::Network("offline".to_string()))
            } else {
                Ok(())
            }
        }

        async fn refresh(&self, refresh_token: &str) -> Result<ApiLoginResult, ServiceError> {
            self.refresh_calls.set(self.refresh_calls.get() + 1);
            *self.last_refresh_token.borrow_mut() = Some(refresh_token.to_string());
            let delayed = self.refresh_reply.borrow_mut().take();
            if let Some(rx) = delayed {
                return rx
                    .await
                    .unwrap_or_else(|_| Err(ServiceError::Unavailable("reply dropped".into())));
            }
            self.refresh
                .borrow_mut()
                .take()
                .unwrap_or_else(|| Err(ServiceError::Unavailable("no refresh scripted".into())))
        }
    }

    fn setup(service: ScriptedAuth) -> (AppStore, Rc<ScriptedAuth>, AuthViewModel) {
        let store = AppStore::new(AppState::new());
        let service = Rc::new(service);
        let vm = AuthViewModel::new(store.clone(), service.clone());
        (store, service, vm)
    }

    fn credentials() -> Credentials {
        Credentials::new("a@b.com", "x")
    }

    fn ok_login() -> ApiLoginResult {
        ApiLoginResult::ok(TokenInfo::new("abc", Some("r1".to_string()), "2099-01-01"))
    }

    #[test]
    fn test_login_success_sets_session() {
        let (store, _, vm) = setup(ScriptedAuth::new().with_login(Ok(ok_login())));

        let unit = block_on(vm.login(&credentials()));

        assert!(unit.is_fulfilled());
        assert_eq!(
            store.get_state().session,
            SessionState {
                authenticated: true,
                token: "abc".to_string(),
                refresh_token: "r1".to_string(),
                expiration_time: "2099-01-01".to_string(),
            }
        );
    }

    #[test]
    fn test_login_commits_in_one_transition() {
        let (store, _, vm) = setup(ScriptedAuth::new().with_login(Ok(ok_login())));
        let commits = Rc::new(Cell::new(0));
        let _sub = {
            let commits = commits.clone();
            store.subscribe(move |_: &Rc<AppState>| commits.set(commits.get() + 1))
        };

        block_on(vm.login(&credentials()));
        assert_eq!(commits.get(), 1);
    }

    #[test]
    fn test_login_error_keeps_session_and_reports_message() {
        let (store, _, vm) = setup(
            ScriptedAuth::new()
                .with_login(Ok(ApiLoginResult::error(400, Some("bad credentials".to_string())))),
        );

        let unit = block_on(vm.login(&credentials()));

        assert_eq!(unit.error(), Some("bad credentials"));
        assert_eq!(store.get_state().session, SessionState::default());
    }

    #[test]
    fn test_ok_without_token_is_a_failure() {
        let mut malformed = ok_login();
        malformed.token = None;
        let (store, _, vm) = setup(ScriptedAuth::new().with_login(Ok(malformed)));

        let unit = block_on(vm.login(&credentials()));

        assert_eq!(unit.error(), Some(GENERIC_LOGIN_ERROR));
        assert!(!store.get_state().session.authenticated);
    }

    #[test]
    fn test_transport_failure_uses_generic_message() {
        let (store, _, vm) = setup(
            ScriptedAuth::new().with_login(Err(ServiceError::Network("connection refused".into()))),
        );

        let unit = block_on(vm.login(&credentials()));

        assert_eq!(unit.error(), Some(GENERIC_LOGIN_ERROR));
        assert_eq!(store.get_state().session, SessionState::default());
    }

    #[test]
    fn test_logout_resets_even_when_backend_fails() {
        let mut service = ScriptedAuth::new().with_login(Ok(ok_login()));
        service.logout_fails = true;
        let (store, _, vm) = setup(service);
        block_on(vm.login(&credentials()));

        let unit = block_on(vm.logout());

        assert!(unit.is_rejected());
        assert_eq!(store.get_state().session, SessionState::default());
        assert!(!vm.is_authenticated());
    }

    #[test]
    fn test_refresh_uses_stored_refresh_token() {
        let (store, service, vm) = setup(
            ScriptedAuth::new()
                .with_login(Ok(ok_login()))
                .with_refresh(Ok(ApiLoginResult::ok(TokenInfo::new("def", None, "2100-01-01")))),
        );
        block_on(vm.login(&credentials()));

        let unit = block_on(vm.refresh());

        assert!(unit.is_fulfilled());
        assert_eq!(service.last_refresh_token.borrow().as_deref(), Some("r1"));
        let session = store.get_state().session.clone();
        assert_eq!(session.token, "def");
        assert_eq!(session.refresh_token, "r1");
    }

    #[test]
    fn test_refresh_without_token_skips_backend() {
        let (_, service, vm) = setup(ScriptedAuth::new());

        let unit = block_on(vm.refresh());

        assert_eq!(unit.error(), Some(NO_REFRESH_TOKEN_ERROR));
        assert_eq!(service.refresh_calls.get(), 0);
    }

    #[test]
    fn test_failed_refresh_leaves_session() {
        let (store, _, vm) = setup(
            ScriptedAuth::new()
                .with_login(Ok(ok_login()))
                .with_refresh(Ok(ApiLoginResult::error(401, None))),
        );
        block_on(vm.login(&credentials()));
        let before = store.get_state().session.clone();

        let unit = block_on(vm.refresh());

        assert_eq!(unit.error(), Some(GENERIC_LOGIN_ERROR));
        assert_eq!(store.get_state().session, before);
    }

    #[test]
    fn test_refresh_if_expired() {
        let (_, service, vm) = setup(
            ScriptedAuth::new()
                .with_login(Ok(ok_login()))
                .with_refresh(Ok(ApiLoginResult::ok(TokenInfo::new("def", None, "2200-01-01")))),
        );
        block_on(vm.login(&credentials()));

        let before_expiry = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        assert!(block_on(vm.refresh_if_expired(before_expiry)).is_none());
        assert_eq!(service.refresh_calls.get(), 0);

        let after_expiry = Utc.with_ymd_and_hms(2150, 1, 1, 0, 0, 0).unwrap();
        let unit = block_on(vm.refresh_if_expired(after_expiry));
        assert!(unit.map(|u| u.is_fulfilled()).unwrap_or(false));
        assert_eq!(service.refresh_calls.get(), 1);
        assert!(!vm.needs_refresh(after_expiry));
    }

    #[test]
    fn test_refresh_resolving_after_logout_does_not_revive_session() {
        let (service, reply) = ScriptedAuth::new().with_login(Ok(ok_login())).with_delayed_refresh();
        let (store, _, vm) = setup(service);
        block_on(vm.login(&credentials()));

        let unit = block_on(async {
            let mut refresh = Box::pin(vm.refresh());
            assert!(futures::poll!(refresh.as_mut()).is_pending());

            vm.logout().await;
            assert!(!store.get_state().session.authenticated);

            reply
                .send(Ok(ApiLoginResult::ok(TokenInfo::new("def", None, "2100-01-01"))))
                .unwrap();
            refresh.await
        });

        assert_eq!(unit.error(), Some(SESSION_ENDED_ERROR));
        assert_eq!(store.get_state().session, SessionState::default());
    }

    #[test]
    fn test_refresh_resolving_after_new_login_keeps_new_session() {
        let (service, reply) = ScriptedAuth::new().with_login(Ok(ok_login())).with_delayed_refresh();
        let (store, service, vm) = setup(service);
        block_on(vm.login(&credentials()));

        block_on(async {
            let mut refresh = Box::pin(vm.refresh());
            assert!(futures::poll!(refresh.as_mut()).is_pending());

            *service.login.borrow_mut() = Some(Ok(ApiLoginResult::ok(TokenInfo::new(
                "ghi",
                Some("r9".to_string()),
                "2099-06-01",
            ))));
            vm.login(&credentials()).await;

            reply
                .send(Ok(ApiLoginResult::ok(TokenInfo::new("def", None, "2100-01-01"))))
                .unwrap();
            assert!(refresh.await.is_rejected());
        });

        let session = store.get_state().session.clone();
        assert_eq!(session.token, "ghi");
        assert_eq!(session.refresh_token, "r9");
    }
}
