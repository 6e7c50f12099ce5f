//! Task lists (CalDAV calendars that carry `VTODO` items)

use serde::{Deserialize, Serialize};

use bitflags::bitflags;

use crate::error::Error;
use crate::hierarchy::Hierarchy;
use crate::task::Task;

bitflags! {
    #[derive(Serialize, Deserialize)]
    pub struct SupportedComponents: u8 {
        /// An event, such as a calendar meeting
        const EVENT = 1;
        /// A to-do item, such as a reminder
        const TODO = 2;
    }
}

/// A task list, hosting an ordered collection of [`Task`]s.
///
/// Tasks keep the order they were inserted in (for lists loaded from a
/// server, the order the server returned them in). Inserting a task whose UID
/// is already present replaces the existing task in place, so the order is
/// stable across updates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskList {
    /// The list unique ID, usually the last segment of its CalDAV URL
    uid: String,
    /// The display name of the list
    name: String,
    /// The display color, kept as the raw server string (e.g. `#FF0000`)
    color: Option<String>,
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new(uid: String, name: String) -> Self {
        Self {
            uid,
            name,
            color: None,
            tasks: Vec::new(),
        }
    }

    pub fn uid(&self) -> &str             { &self.uid            }
    pub fn name(&self) -> &str            { &self.name           }
    pub fn color(&self) -> Option<&str>   { self.color.as_deref() }

    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn set_color(&mut self, color: Option<String>) {
        self.color = color;
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut [Task] {
        &mut self.tasks
    }

    /// Returns the task with this UID, if any
    pub fn task(&self, uid: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.uid() == Some(uid))
    }

    pub fn task_mut(&mut self, uid: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.uid() == Some(uid))
    }

    /// Add a task to this list, or replace the one that already carries the
    /// same UID (keeping its position).
    ///
    /// The task's list UID is updated to this list. Tasks without a UID
    /// cannot be inserted; have the server assign one first (see
    /// [`TasksApi::add_task`](crate::api::TasksApi::add_task)) or create the
    /// task with [`Task::new`](crate::Task::new).
    pub fn insert(&mut self, mut task: Task) -> Result<(), Error> {
        let uid = match task.uid() {
            Some(uid) => uid.to_string(),
            None => return Err(Error::MissingUid("insert it into a task list")),
        };
        task.set_list_uid(&self.uid);
        match self.tasks.iter().position(|existing| existing.uid() == Some(uid.as_str())) {
            Some(index) => self.tasks[index] = task,
            None => self.tasks.push(task),
        }
        Ok(())
    }

    /// Remove the task with this UID and hand it back
    pub fn remove(&mut self, uid: &str) -> Option<Task> {
        let index = self
            .tasks
            .iter()
            .position(|task| task.uid() == Some(uid))?;
        Some(self.tasks.remove(index))
    }

    /// Build the parent/child view of this list.
    ///
    /// The view borrows the list; rebuild it after mutating tasks
    pub fn hierarchy(&self) -> Hierarchy<'_> {
        Hierarchy::new(self)
    }

    /// This list (tasks included) as a JSON value
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).expect("a task list always serializes to JSON")
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
