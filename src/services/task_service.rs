use chrono::NaiveDate;
use tracing::debug;

use crate::error::AppError;
use crate::models::{Task, TaskPriority, TaskStatus};
use crate::repository::TaskRepository;

/// Validation and orchestration layer between the shell and the repository.
pub struct TaskService {
    repo: Box<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(repo: Box<dyn TaskRepository>) -> Self {
        Self { repo }
    }

    pub fn create_task(&mut self, task: Task) -> Task {
        let task = self.repo.save(task);
        debug!("created task {:?}", task.id);
        task
    }

    /// All tasks, sorted ascending by due date. The sort is stable, so tasks
    /// sharing a due date keep the underlying storage order.
    pub fn all_tasks(&self) -> Vec<Task> {
        let mut tasks = self.repo.find_all();
        tasks.sort_by_key(|task| task.due_date);
        tasks
    }

    /// Looks up a task, rejecting non-positive ids before touching the
    /// repository.
    pub fn task_by_id(&self, id: i32) -> Result<Task, AppError> {
        if id <= 0 {
            return Err(AppError::InvalidId(id));
        }
        let id = id as u32;
        self.repo.find_by_id(id).ok_or(AppError::NotFound(id))
    }

    /// Deletes a task after re-validating that it exists.
    pub fn delete_task(&mut self, id: i32) -> Result<(), AppError> {
        self.task_by_id(id)?;
        self.repo.delete_by_id(id as u32);
        debug!("deleted task {id}");
        Ok(())
    }

    /// Sets a new status on an existing task and persists it back.
    pub fn update_status(&mut self, id: i32, status: TaskStatus) -> Result<Task, AppError> {
        let mut task = self.task_by_id(id)?;
        task.set_status(status);
        debug!("updated status of task {id} to {status}");
        Ok(self.repo.save(task))
    }

    pub fn filter_by_status(&self, status: TaskStatus) -> Vec<Task> {
        self.repo.find_by_status(status)
    }

    pub fn filter_by_priority(&self, priority: TaskPriority) -> Vec<Task> {
        self.repo.find_by_priority(priority)
    }

    pub fn filter_due_before(&self, date: NaiveDate) -> Vec<Task> {
        self.repo.find_due_before(date)
    }

    pub fn filter_due_after(&self, date: NaiveDate) -> Vec<Task> {
        self.repo.find_due_after(date)
    }
}
