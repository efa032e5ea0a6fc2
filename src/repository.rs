use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::{Task, TaskPriority, TaskStatus};

/// Keyed store of tasks. Query methods scan linearly and return matches in
/// storage-iteration order, which is unspecified.
pub trait TaskRepository {
    /// Stores the task, assigning the next sequential id when it has none.
    /// A task that already carries an id is upserted at that id.
    fn save(&mut self, task: Task) -> Task;

    fn find_by_id(&self, id: u32) -> Option<Task>;

    fn find_all(&self) -> Vec<Task>;

    /// Removes the task with the given id, if present.
    fn delete_by_id(&mut self, id: u32);

    fn delete_all(&mut self);

    fn find_by_status(&self, status: TaskStatus) -> Vec<Task>;

    fn find_by_priority(&self, priority: TaskPriority) -> Vec<Task>;

    /// Tasks with a due date strictly after the given date.
    fn find_due_after(&self, date: NaiveDate) -> Vec<Task>;

    /// Tasks with a due date strictly before the given date.
    fn find_due_before(&self, date: NaiveDate) -> Vec<Task>;
}

pub struct InMemoryTaskRepository {
    tasks: HashMap<u32, Task>,
    next_id: u32,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
            next_id: 1,
        }
    }
}

impl Default for InMemoryTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskRepository for InMemoryTaskRepository {
    fn save(&mut self, mut task: Task) -> Task {
        let id = match task.id {
            Some(id) => {
                // Keep the counter ahead of explicitly stored ids so tasks
                // seeded from disk never collide with newly created ones.
                self.next_id = self.next_id.max(id + 1);
                id
            }
            None => {
                let id = self.next_id;
                self.next_id += 1;
                task.id = Some(id);
                id
            }
        };
        self.tasks.insert(id, task.clone());
        task
    }

    fn find_by_id(&self, id: u32) -> Option<Task> {
        self.tasks.get(&id).cloned()
    }

    fn find_all(&self) -> Vec<Task> {
        self.tasks.values().cloned().collect()
    }

    fn delete_by_id(&mut self, id: u32) {
        self.tasks.remove(&id);
    }

    fn delete_all(&mut self) {
        self.tasks.clear();
    }

    fn find_by_status(&self, status: TaskStatus) -> Vec<Task> {
        self.tasks
            .values()
            .filter(|task| task.status == status)
            .cloned()
            .collect()
    }

    fn find_by_priority(&self, priority: TaskPriority) -> Vec<Task> {
        self.tasks
            .values()
            .filter(|task| task.priority == priority)
            .cloned()
            .collect()
    }

    fn find_due_after(&self, date: NaiveDate) -> Vec<Task> {
        self.tasks
            .values()
            .filter(|task| task.due_date > date)
            .cloned()
            .collect()
    }

    fn find_due_before(&self, date: NaiveDate) -> Vec<Task> {
        self.tasks
            .values()
            .filter(|task| task.due_date < date)
            .cloned()
            .collect()
    }
}
