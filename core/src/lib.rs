//! Sans-IO client core for the authenticated todo service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). A host-supplied `Transport`
//! performs each round-trip, so session handling and list synchronization
//! stay deterministic and testable.
//!
//! # Design
//! - `ApiClient` is stateless; it holds only `base_url`.
//! - `Session` and `TodoStore` own the token and the todo list. Both are
//!   plain values owned by a `ViewController`, never globals.
//! - `ViewController` is the two-state front end model: it sequences
//!   login → fetch and create → fetch explicitly and turns every failure
//!   into a `Notification`.

pub mod client;
pub mod error;
pub mod http;
pub mod session;
pub mod store;
pub mod types;
pub mod view;

pub use client::ApiClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use session::Session;
pub use store::TodoStore;
pub use types::{CreateTodo, Credentials, LoginResponse, Todo};
pub use view::{LoginForm, Notification, TodoForm, View, ViewController};
