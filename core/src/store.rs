//! In-memory todo collection, always replaced wholesale from the server.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::types::{CreateTodo, Todo};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoStore {
    todos: Vec<Todo>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Todos in server order.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Pull the full list and replace the local copy with it.
    ///
    /// The caller must hold a non-empty token. On failure the previous list
    /// is kept untouched.
    pub fn fetch_all<T: Transport>(
        &mut self,
        client: &ApiClient,
        transport: &T,
        token: &str,
    ) -> Result<&[Todo], ApiError> {
        let response = transport.execute(client.build_list_todos(token))?;
        self.todos = client.parse_list_todos(response)?;
        tracing::debug!(count = self.todos.len(), "todo list refreshed");
        Ok(&self.todos)
    }

    /// Create a todo on the server. The local list is not touched; call
    /// `fetch_all` to see the new item.
    pub fn create<T: Transport>(
        &self,
        client: &ApiClient,
        transport: &T,
        token: &str,
        input: &CreateTodo,
    ) -> Result<(), ApiError> {
        let request = client.build_create_todo(token, input)?;
        client.parse_create_todo(transport.execute(request)?)?;
        tracing::debug!(title = %input.title, "todo created");
        Ok(())
    }
}
