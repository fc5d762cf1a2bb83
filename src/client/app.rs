//! Client controller: issues requests and feeds results to the reducer.

use std::str::FromStr;

use crate::client::api::TaskClient;
use crate::client::render::View;
use crate::client::state::{reduce, Action, BoardState};
use crate::tasks::TaskPatch;

/// A task as named by the user: an id, or a 1-based list position
/// (`3` or `#3`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskRef {
    Position(usize),
    Id(String),
}

impl FromStr for TaskRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("missing task reference".to_string());
        }
        let digits = s.strip_prefix('#').unwrap_or(s);
        match digits.parse::<usize>() {
            Ok(0) => Err("positions start at 1".to_string()),
            Ok(n) => Ok(TaskRef::Position(n)),
            Err(_) if s.starts_with('#') => Err(format!("invalid position '{s}'")),
            Err(_) => Ok(TaskRef::Id(s.to_string())),
        }
    }
}

/// The client application: local state plus the API it mirrors.
pub struct TodoApp {
    client: TaskClient,
    state: BoardState,
}

impl TodoApp {
    pub fn new(client: TaskClient) -> Self {
        Self {
            client,
            state: BoardState::default(),
        }
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn view(&self) -> View {
        View::from_state(&self.state)
    }

    fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }

    /// Resolve a user reference to a task id using the current list.
    pub fn resolve(&self, task: &TaskRef) -> Option<String> {
        match task {
            TaskRef::Position(n) => n
                .checked_sub(1)
                .and_then(|i| self.state.tasks.get(i))
                .map(|t| t.id.clone()),
            TaskRef::Id(id) => Some(id.clone()),
        }
    }

    /// Fetch the full list, replacing local state.
    pub async fn load(&mut self) {
        self.dispatch(Action::LoadStarted);
        let result = self.client.list().await.map_err(|e| {
            tracing::warn!(error = %e, "Error fetching tasks");
            e.to_string()
        });
        self.dispatch(Action::Loaded(result));
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.dispatch(Action::InputChanged(text.into()));
    }

    /// Create a task from the input buffer. Returns `false` without sending
    /// anything when the buffer is blank.
    pub async fn add(&mut self) -> bool {
        if !self.state.can_add() {
            return false;
        }
        let result = self
            .client
            .create(&self.state.new_task_text)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Error adding task");
                e.to_string()
            });
        self.dispatch(Action::Added(result));
        true
    }

    /// Flip the completed flag of a locally known task.
    pub async fn toggle(&mut self, id: &str) {
        let result = match self.state.find(id) {
            Some(task) => {
                let patch = TaskPatch::completed(!task.completed);
                self.client.update(id, &patch).await.map(|_| ()).map_err(|e| {
                    tracing::warn!(task_id = %id, error = %e, "Error updating task");
                    e.to_string()
                })
            }
            None => Err(format!("task {id} is not in the list")),
        };
        self.dispatch(Action::Toggled {
            id: id.to_string(),
            result,
        });
    }

    /// Delete a task on the server, then drop it locally.
    pub async fn delete(&mut self, id: &str) {
        let result = self.client.delete(id).await.map(|_| ()).map_err(|e| {
            tracing::warn!(task_id = %id, error = %e, "Error deleting task");
            e.to_string()
        });
        self.dispatch(Action::Deleted {
            id: id.to_string(),
            result,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_task_refs() {
        assert_eq!("3".parse::<TaskRef>(), Ok(TaskRef::Position(3)));
        assert_eq!("#12".parse::<TaskRef>(), Ok(TaskRef::Position(12)));
        assert_eq!(
            "5f0c9a".parse::<TaskRef>(),
            Ok(TaskRef::Id("5f0c9a".to_string()))
        );
        assert!("0".parse::<TaskRef>().is_err());
        assert!("#abc".parse::<TaskRef>().is_err());
        assert!("  ".parse::<TaskRef>().is_err());
    }

    #[tokio::test]
    async fn test_blank_input_sends_nothing() {
        // Port 9 (discard) is never contacted because the guard short-circuits.
        let client = TaskClient::new("http://127.0.0.1:9/api/tasks").unwrap();
        let mut app = TodoApp::new(client);
        app.set_input("   ");

        assert!(!app.add().await);
        assert!(app.state().error.is_none());
        assert_eq!(app.state().new_task_text, "   ");
    }

    #[tokio::test]
    async fn test_toggle_of_unknown_task_reports_error() {
        let client = TaskClient::new("http://127.0.0.1:9/api/tasks").unwrap();
        let mut app = TodoApp::new(client);

        app.toggle("missing").await;
        assert!(app
            .state()
            .error
            .as_deref()
            .unwrap()
            .contains("task missing is not in the list"));
    }
}
