//! Variables exported by the Eventline runner to every task.

use crate::Id;

pub const EVENTLINE: &str = "EVENTLINE";
pub const PROJECT_ID: &str = "EVENTLINE_PROJECT_ID";
pub const PROJECT_NAME: &str = "EVENTLINE_PROJECT_NAME";
pub const PIPELINE_ID: &str = "EVENTLINE_PIPELINE_ID";
pub const TASK_ID: &str = "EVENTLINE_TASK_ID";

/// Snapshot of the runner variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct TaskEnvironment {
    pub in_eventline: bool,
    pub project_id: Option<Id>,
    pub project_name: Option<String>,
    pub pipeline_id: Option<Id>,
    pub task_id: Option<Id>,
}

impl TaskEnvironment {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            in_eventline: lookup(EVENTLINE).as_deref() == Some("true"),
            project_id: lookup(PROJECT_ID),
            project_name: lookup(PROJECT_NAME),
            pipeline_id: lookup(PIPELINE_ID),
            task_id: lookup(TASK_ID),
        }
    }
}

/// True when running as an Eventline task.
pub fn is_executed_in_eventline() -> bool {
    TaskEnvironment::from_env().in_eventline
}

pub fn current_project_id() -> Option<Id> {
    std::env::var(PROJECT_ID).ok()
}

pub fn current_project_name() -> Option<String> {
    std::env::var(PROJECT_NAME).ok()
}

pub fn current_pipeline_id() -> Option<Id> {
    std::env::var(PIPELINE_ID).ok()
}

pub fn current_task_id() -> Option<Id> {
    std::env::var(TASK_ID).ok()
}
