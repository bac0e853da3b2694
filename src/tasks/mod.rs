use async_trait::async_trait;

use crate::session::SessionContext;

pub mod subscribe_task;

type CancelSender = tokio::sync::mpsc::UnboundedSender<()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Running,
    Canceled,
    Completed,
    Failed,
}

/// Why a task round ended without completing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatusCode {
    TaskCanceled,
    TaskFailed,
    SignalingInternalServerError,
}

#[derive(Debug)]
pub struct TaskError {
    pub status: SessionStatusCode,
    pub message: String,
}

/// Requests cancellation of a running task. Harmless on a task that
/// already reached a terminal status.
#[derive(Debug, Clone)]
pub struct TaskCanceler {
    sender: CancelSender,
}

impl TaskCanceler {
    pub fn new(sender: CancelSender) -> Self {
        TaskCanceler { sender }
    }

    pub fn cancel(&self) {
        self.sender.send(()).ok();
    }

    pub fn same_channel(&self, other: &TaskCanceler) -> bool {
        self.sender.same_channel(&other.sender)
    }
}

/// One unit of session work driven to completion by the session controller.
/// Tasks mutate the shared context only between their await points, the
/// controller hands it to one task at a time.
#[async_trait]
pub trait SessionTask: Send {
    fn name(&self) -> &'static str;

    fn status(&self) -> TaskStatus;

    fn canceler(&self) -> TaskCanceler;

    async fn run(&mut self, context: &mut SessionContext) -> Result<(), TaskError>;
}
