//! Two-state view controller driving the session and todo store.
//!
//! # Design
//! `ViewController` owns every piece of mutable client state: the session,
//! the todo list, both input forms, and the pending notifications. Actions
//! are fire-and-forget from the front end's point of view: each one runs its
//! requests to completion and turns any failure into a `Notification`.
//! Nothing is rolled back on failure; only a successful create clears the
//! todo form.
//!
//! After login or signup the list is fetched by an explicit call, not by
//! observing the token.

use std::collections::VecDeque;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::session::Session;
use crate::store::TodoStore;
use crate::types::{CreateTodo, Credentials, Todo};

/// Which screen is showing. Derived from the session, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Email/password fields with Login and Signup actions.
    Unauthenticated,
    /// Todo form plus the todo list.
    Authenticated,
}

/// Email/password inputs of the unauthenticated view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    fn credentials(&self) -> Credentials {
        Credentials::new(self.email.clone(), self.password.clone())
    }
}

/// Title/content inputs of the authenticated view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoForm {
    pub title: String,
    pub content: String,
}

impl TodoForm {
    pub fn clear(&mut self) {
        self.title.clear();
        self.content.clear();
    }
}

/// A transient error message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
}

impl From<&ApiError> for Notification {
    fn from(err: &ApiError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

pub struct ViewController<T: Transport> {
    client: ApiClient,
    transport: T,
    session: Session,
    store: TodoStore,
    pub login_form: LoginForm,
    pub todo_form: TodoForm,
    notifications: VecDeque<Notification>,
}

impl<T: Transport> ViewController<T> {
    pub fn new(client: ApiClient, transport: T) -> Self {
        Self {
            client,
            transport,
            session: Session::new(),
            store: TodoStore::new(),
            login_form: LoginForm::default(),
            todo_form: TodoForm::default(),
            notifications: VecDeque::new(),
        }
    }

    pub fn view(&self) -> View {
        if self.session.is_authenticated() {
            View::Authenticated
        } else {
            View::Unauthenticated
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn todos(&self) -> &[Todo] {
        self.store.todos()
    }

    /// Drain pending notifications, oldest first.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    /// Log in with the login form's credentials, then load the list.
    pub fn login(&mut self) {
        if !self.expect_view(View::Unauthenticated, "login") {
            return;
        }
        let credentials = self.login_form.credentials();
        let result = self.session.login(&self.client, &self.transport, &credentials);
        self.after_auth(result);
    }

    /// Register with the login form's credentials, log in, then load the list.
    pub fn signup(&mut self) {
        if !self.expect_view(View::Unauthenticated, "signup") {
            return;
        }
        let credentials = self.login_form.credentials();
        let result = self.session.signup(&self.client, &self.transport, &credentials);
        self.after_auth(result);
    }

    /// Re-pull the todo list.
    pub fn refresh(&mut self) {
        let Some(token) = self.session.token() else {
            tracing::debug!("refresh ignored without a session");
            return;
        };
        let result = self
            .store
            .fetch_all(&self.client, &self.transport, token)
            .map(|_| ());
        if let Err(err) = result {
            self.notify(&err);
        }
    }

    /// Submit the todo form. On success the list is re-pulled and the form
    /// cleared; on failure the form keeps its contents.
    pub fn create_todo(&mut self) {
        let Some(token) = self.session.token() else {
            tracing::debug!("create_todo ignored without a session");
            return;
        };
        let input = CreateTodo::new(self.todo_form.title.clone(), self.todo_form.content.clone());
        if let Err(err) = self.store.create(&self.client, &self.transport, token, &input) {
            self.notify(&err);
            return;
        }
        self.refresh();
        self.todo_form.clear();
    }

    fn after_auth(&mut self, result: Result<String, ApiError>) {
        match result {
            Ok(_) => self.refresh(),
            Err(err) => self.notify(&err),
        }
    }

    fn expect_view(&self, expected: View, action: &str) -> bool {
        let current = self.view();
        if current != expected {
            tracing::debug!(action, ?current, "action not offered by current view");
            return false;
        }
        true
    }

    fn notify(&mut self, err: &ApiError) {
        tracing::warn!(error = %err, "action failed");
        self.notifications.push_back(Notification::from(err));
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Scripted in-memory API. Records every request it sees.
    #[derive(Default)]
    struct FakeApi {
        requests: RefCell<Vec<HttpRequest>>,
        todos: RefCell<Vec<Todo>>,
        login_status: u16,
        signup_status: u16,
        list_status: u16,
        create_status: u16,
    }

    impl FakeApi {
        fn healthy() -> Self {
            Self {
                login_status: 200,
                signup_status: 201,
                list_status: 200,
                create_status: 201,
                ..Self::default()
            }
        }

        fn handle(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
            let endpoint = req.path.trim_start_matches("http://api.test").to_string();
            let response = match (req.method, endpoint.as_str()) {
                (HttpMethod::Post, "/login") => {
                    HttpResponse::new(self.login_status, r#"{"access_token":"tok123"}"#)
                }
                (HttpMethod::Post, "/signup") => HttpResponse::new(self.signup_status, ""),
                (HttpMethod::Get, "/todos") => {
                    let body = serde_json::to_string(&*self.todos.borrow()).unwrap();
                    HttpResponse::new(self.list_status, body)
                }
                (HttpMethod::Post, "/todos") => {
                    if self.create_status < 300 {
                        let todo: Todo = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
                        self.todos.borrow_mut().push(todo);
                    }
                    HttpResponse::new(self.create_status, "")
                }
                other => panic!("unexpected request {other:?}"),
            };
            self.requests.borrow_mut().push(req);
            Ok(response)
        }

        fn paths(&self) -> Vec<String> {
            self.requests
                .borrow()
                .iter()
                .map(|r| format!("{} {}", r.method.as_str(), r.path.trim_start_matches("http://api.test")))
                .collect()
        }
    }

    fn controller(api: &FakeApi) -> ViewController<impl Fn(HttpRequest) -> Result<HttpResponse, ApiError> + '_> {
        let mut vc = ViewController::new(ApiClient::new("http://api.test"), move |req: HttpRequest| api.handle(req));
        vc.login_form.email = "a@b.c".to_string();
        vc.login_form.password = "pw".to_string();
        vc
    }

    #[test]
    fn starts_unauthenticated() {
        let api = FakeApi::healthy();
        let vc = controller(&api);
        assert_eq!(vc.view(), View::Unauthenticated);
        assert!(vc.todos().is_empty());
    }

    #[test]
    fn login_then_fetches_with_bearer_token() {
        let api = FakeApi::healthy();
        api.todos.borrow_mut().push(Todo {
            title: "existing".to_string(),
            content: "item".to_string(),
        });
        let mut vc = controller(&api);
        vc.login();

        assert_eq!(vc.view(), View::Authenticated);
        assert_eq!(vc.session().token(), Some("tok123"));
        assert_eq!(api.paths(), vec!["POST /login", "GET /todos"]);
        let requests = api.requests.borrow();
        assert_eq!(requests[1].header("Authorization"), Some("Bearer tok123"));
        assert_eq!(vc.todos().len(), 1);
        assert!(vc.take_notifications().is_empty());
    }

    #[test]
    fn failed_login_notifies_and_stays_unauthenticated() {
        let api = FakeApi {
            login_status: 401,
            ..FakeApi::healthy()
        };
        let mut vc = controller(&api);
        vc.login();

        assert_eq!(vc.view(), View::Unauthenticated);
        assert_eq!(vc.session().token(), None);
        assert_eq!(
            vc.take_notifications(),
            vec![Notification {
                message: "Login failed".to_string()
            }]
        );
        assert_eq!(api.paths(), vec!["POST /login"]);
        // form is not rolled back
        assert_eq!(vc.login_form.email, "a@b.c");
    }

    #[test]
    fn signup_logs_in_and_fetches() {
        let api = FakeApi::healthy();
        let mut vc = controller(&api);
        vc.signup();

        assert_eq!(vc.view(), View::Authenticated);
        assert_eq!(api.paths(), vec!["POST /signup", "POST /login", "GET /todos"]);
    }

    #[test]
    fn failed_signup_notifies() {
        let api = FakeApi {
            signup_status: 500,
            ..FakeApi::healthy()
        };
        let mut vc = controller(&api);
        vc.signup();

        assert_eq!(vc.view(), View::Unauthenticated);
        let notes = vc.take_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].message, "Signup failed");
    }

    #[test]
    fn fetch_failure_after_login_still_authenticates() {
        let api = FakeApi {
            list_status: 500,
            ..FakeApi::healthy()
        };
        let mut vc = controller(&api);
        vc.login();

        assert_eq!(vc.view(), View::Authenticated);
        let notes = vc.take_notifications();
        assert_eq!(notes[0].message, "Failed to fetch todos");
    }

    #[test]
    fn create_refetches_and_clears_form() {
        let api = FakeApi::healthy();
        let mut vc = controller(&api);
        vc.login();
        vc.todo_form.title = "Buy milk".to_string();
        vc.todo_form.content = "2%  ".to_string();
        vc.create_todo();

        assert_eq!(vc.todo_form, TodoForm::default());
        assert_eq!(
            vc.todos(),
            &[Todo {
                title: "Buy milk".to_string(),
                content: "2%  ".to_string()
            }]
        );
        assert_eq!(
            api.paths(),
            vec!["POST /login", "GET /todos", "POST /todos", "GET /todos"]
        );
    }

    #[test]
    fn failed_create_keeps_form_and_skips_fetch() {
        let api = FakeApi {
            create_status: 400,
            ..FakeApi::healthy()
        };
        let mut vc = controller(&api);
        vc.login();
        vc.todo_form.title = "Buy milk".to_string();
        vc.create_todo();

        assert_eq!(vc.todo_form.title, "Buy milk");
        assert_eq!(vc.take_notifications()[0].message, "Create todo failed");
        assert_eq!(api.paths(), vec!["POST /login", "GET /todos", "POST /todos"]);
    }

    #[test]
    fn create_before_login_never_reaches_the_network() {
        let api = FakeApi::healthy();
        let mut vc = controller(&api);
        vc.todo_form.title = "early".to_string();
        vc.create_todo();
        vc.refresh();

        assert!(api.paths().is_empty());
        assert!(vc.take_notifications().is_empty());
        assert_eq!(vc.todo_form.title, "early");
    }

    #[test]
    fn auth_actions_are_ignored_once_authenticated() {
        let api = FakeApi::healthy();
        let mut vc = controller(&api);
        vc.login();
        vc.login();
        vc.signup();
        assert_eq!(api.paths(), vec!["POST /login", "GET /todos"]);
    }

    #[test]
    fn notifications_are_drained_in_order() {
        let api = FakeApi {
            login_status: 401,
            signup_status: 409,
            ..FakeApi::healthy()
        };
        let mut vc = controller(&api);
        vc.login();
        vc.signup();
        let messages: Vec<_> = vc.take_notifications().into_iter().map(|n| n.message).collect();
        assert_eq!(messages, vec!["Login failed", "Signup failed"]);
        assert!(vc.take_notifications().is_empty());
    }

    #[test]
    fn transport_errors_surface_their_message() {
        let transport = |_: HttpRequest| -> Result<HttpResponse, ApiError> {
            Err(ApiError::Transport("connection refused".to_string()))
        };
        let mut vc = ViewController::new(ApiClient::new("http://api.test"), transport);
        vc.login();
        let notes = vc.take_notifications();
        assert_eq!(notes[0].message, "transport error: connection refused");
    }
}
