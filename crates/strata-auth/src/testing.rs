//! Scripted fakes for controller tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;

use crate::api::{AUTH_LOGOUT_PATH, AUTH_PATH, AuthApi};
use crate::error::{AuthError, AuthResult};
use crate::model::{AuthStatus, Credentials, LoginResponse, LogoutResponse};
use crate::navigation::{NavigationMode, Navigator, View};

/// Ordered record of observable side effects shared by all fakes.
pub(crate) type EventLog = Rc<RefCell<Vec<String>>>;

pub(crate) fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Auth API answering from per-endpoint queues.
pub(crate) struct ScriptedApi {
    log: EventLog,
    status: RefCell<VecDeque<AuthResult<AuthStatus>>>,
    login: RefCell<VecDeque<AuthResult<LoginResponse>>>,
    logout: RefCell<VecDeque<AuthResult<LogoutResponse>>>,
    yield_on_logout: bool,
}

impl ScriptedApi {
    pub(crate) fn new(log: &EventLog) -> Self {
        Self {
            log: Rc::clone(log),
            status: RefCell::default(),
            login: RefCell::default(),
            logout: RefCell::default(),
            yield_on_logout: false,
        }
    }

    pub(crate) fn with_status(self, reply: AuthResult<AuthStatus>) -> Self {
        self.status.borrow_mut().push_back(reply);
        self
    }

    pub(crate) fn with_login(self, reply: AuthResult<LoginResponse>) -> Self {
        self.login.borrow_mut().push_back(reply);
        self
    }

    pub(crate) fn with_logout(self, reply: AuthResult<LogoutResponse>) -> Self {
        self.logout.borrow_mut().push_back(reply);
        self
    }

    pub(crate) const fn yielding_logout(mut self) -> Self {
        self.yield_on_logout = true;
        self
    }

    fn next<T>(
        &self,
        queue: &RefCell<VecDeque<AuthResult<T>>>,
        endpoint: &'static str,
    ) -> AuthResult<T> {
        queue
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(AuthError::unreachable(endpoint, "no scripted reply")))
    }
}

#[async_trait(?Send)]
impl AuthApi for ScriptedApi {
    async fn status(&self) -> AuthResult<AuthStatus> {
        self.log.borrow_mut().push("api:status".to_string());
        self.next(&self.status, AUTH_PATH)
    }

    async fn login(&self, credentials: &Credentials) -> AuthResult<LoginResponse> {
        self.log
            .borrow_mut()
            .push(format!("api:login:{}", credentials.username));
        self.next(&self.login, AUTH_PATH)
    }

    async fn logout(&self) -> AuthResult<LogoutResponse> {
        self.log.borrow_mut().push("api:logout".to_string());
        if self.yield_on_logout {
            tokio::task::yield_now().await;
        }
        self.next(&self.logout, AUTH_LOGOUT_PATH)
    }
}

/// Navigator recording every call into the shared log.
pub(crate) struct RecordingNavigator {
    log: EventLog,
}

impl RecordingNavigator {
    pub(crate) fn new(log: &EventLog) -> Self {
        Self {
            log: Rc::clone(log),
        }
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, view: View, mode: NavigationMode) {
        let mode = match mode {
            NavigationMode::Push => "push",
            NavigationMode::Replace => "replace",
        };
        self.log
            .borrow_mut()
            .push(format!("navigate:{}:{mode}", view.path()));
    }

    fn redirect(&self, url: &str) {
        self.log.borrow_mut().push(format!("redirect:{url}"));
    }
}

/// Count log entries starting with `prefix`.
pub(crate) fn count(log: &EventLog, prefix: &str) -> usize {
    log.borrow()
        .iter()
        .filter(|entry| entry.starts_with(prefix))
        .count()
}
