//! Text rendering of the client state.

use std::fmt::Write;

use crate::client::state::BoardState;

pub const TITLE: &str = "Task List";
pub const LOADING_MESSAGE: &str = "Loading tasks...";
pub const EMPTY_MESSAGE: &str = "No tasks yet.";

const STRIKE_ON: &str = "\x1b[9m";
const STYLE_RESET: &str = "\x1b[0m";

/// One rendered task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLine {
    /// 1-based position, usable as a shorthand for the id.
    pub position: usize,
    pub id: String,
    pub text: String,
    /// Completed tasks are struck through.
    pub struck: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewBody {
    Loading,
    Empty,
    List { lines: Vec<TaskLine>, summary: String },
}

/// What the screen shows for a given state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub error: Option<String>,
    pub body: ViewBody,
}

/// "<completed> of <total> tasks completed".
pub fn summary(completed: usize, total: usize) -> String {
    format!("{completed} of {total} tasks completed")
}

impl View {
    pub fn from_state(state: &BoardState) -> Self {
        let body = if state.loading {
            ViewBody::Loading
        } else if state.tasks.is_empty() {
            ViewBody::Empty
        } else {
            let lines = state
                .tasks
                .iter()
                .enumerate()
                .map(|(i, task)| TaskLine {
                    position: i + 1,
                    id: task.id.clone(),
                    text: task.text.clone(),
                    struck: task.completed,
                })
                .collect();
            ViewBody::List {
                lines,
                summary: summary(state.completed_count(), state.tasks.len()),
            }
        };

        Self {
            error: state.error.clone(),
            body,
        }
    }

    /// Render as terminal text. `styled` uses ANSI strikethrough; otherwise
    /// completed tasks are wrapped in `~`.
    pub fn render(&self, styled: bool) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{TITLE}");

        if let Some(error) = &self.error {
            let _ = writeln!(out, "! {error}");
        }

        match &self.body {
            ViewBody::Loading => {
                let _ = writeln!(out, "{LOADING_MESSAGE}");
            }
            ViewBody::Empty => {
                let _ = writeln!(out, "{EMPTY_MESSAGE}");
            }
            ViewBody::List { lines, summary } => {
                for line in lines {
                    let mark = if line.struck { "x" } else { " " };
                    let text = match (line.struck, styled) {
                        (true, true) => format!("{STRIKE_ON}{}{STYLE_RESET}", line.text),
                        (true, false) => format!("~{}~", line.text),
                        (false, _) => line.text.clone(),
                    };
                    let _ = writeln!(out, "{:>3}. [{mark}] {text}", line.position);
                }
                let _ = writeln!(out, "{summary}");
            }
        }
        out
    }
}
