//! Client state and its transition function.

use crate::tasks::Task;

pub const LOAD_FAILED: &str = "Could not load tasks.";
pub const ADD_FAILED: &str = "Could not add task.";
pub const UPDATE_FAILED: &str = "Could not update task.";
pub const DELETE_FAILED: &str = "Could not delete task.";

/// Everything the client knows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    /// Local mirror of the server list, in server order plus local appends.
    pub tasks: Vec<Task>,
    /// Pending input for the next add.
    pub new_task_text: String,
    /// True until the initial list fetch settles.
    pub loading: bool,
    /// Banner message from the last failed call.
    pub error: Option<String>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            new_task_text: String::new(),
            loading: true,
            error: None,
        }
    }
}

impl BoardState {
    pub fn find(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Whether an add would be sent.
    pub fn can_add(&self) -> bool {
        !self.new_task_text.trim().is_empty()
    }
}

/// One event the client reacts to. Failures carry the cause as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    LoadStarted,
    Loaded(Result<Vec<Task>, String>),
    InputChanged(String),
    Added(Result<Task, String>),
    Toggled { id: String, result: Result<(), String> },
    Deleted { id: String, result: Result<(), String> },
}

fn failure(prefix: &str, cause: &str) -> Option<String> {
    Some(format!("{prefix} {cause}"))
}

/// Apply `action` to `state`.
///
/// Successful calls clear the banner; failed calls set it and leave
/// everything else as it was.
pub fn reduce(mut state: BoardState, action: Action) -> BoardState {
    match action {
        Action::LoadStarted => {
            state.loading = true;
        }
        Action::Loaded(Ok(tasks)) => {
            state.tasks = tasks;
            state.loading = false;
            state.error = None;
        }
        Action::Loaded(Err(cause)) => {
            state.loading = false;
            state.error = failure(LOAD_FAILED, &cause);
        }
        Action::InputChanged(text) => {
            state.new_task_text = text;
        }
        Action::Added(Ok(task)) => {
            state.tasks.push(task);
            state.new_task_text.clear();
            state.error = None;
        }
        Action::Added(Err(cause)) => {
            state.error = failure(ADD_FAILED, &cause);
        }
        Action::Toggled { id, result: Ok(()) } => {
            if let Some(task) = state.tasks.iter_mut().find(|t| t.id == id) {
                task.completed = !task.completed;
            }
            state.error = None;
        }
        Action::Toggled { result: Err(cause), .. } => {
            state.error = failure(UPDATE_FAILED, &cause);
        }
        Action::Deleted { id, result: Ok(()) } => {
            state.tasks.retain(|t| t.id != id);
            state.error = None;
        }
        Action::Deleted { result: Err(cause), .. } => {
            state.error = failure(DELETE_FAILED, &cause);
        }
    }
    state
}
