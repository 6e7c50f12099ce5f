//! The task API, tying a CalDAV transport to local task lists

use crate::config::ApiOptions;
use crate::error::Error;
use crate::list::{SupportedComponents, TaskList};
use crate::task::Task;
use crate::traits::{CalDavTransport, ListDescriptor};

/// A high-level view over the task lists of one CalDAV account.
///
/// The API owns a [`CalDavTransport`] and a local mirror of the server's task
/// lists. [`load_remote_data`](Self::load_remote_data) fills the mirror;
/// the mutating operations push to the server first and keep the mirror in
/// step. When the options say read-only, every mutating operation is refused
/// before the transport is even asked.
pub struct TasksApi<C: CalDavTransport> {
    transport: C,
    options: ApiOptions,
    task_lists: Vec<TaskList>,
}

impl<C: CalDavTransport> TasksApi<C> {
    pub fn new(transport: C, options: ApiOptions) -> Self {
        Self {
            transport,
            options,
            task_lists: Vec::new(),
        }
    }

    pub fn transport(&self) -> &C            { &self.transport     }
    pub fn transport_mut(&mut self) -> &mut C { &mut self.transport }
    pub fn options(&self) -> &ApiOptions     { &self.options       }
    pub fn read_only(&self) -> bool          { self.options.read_only }

    /// The loaded task lists, in server discovery order
    pub fn task_lists(&self) -> &[TaskList] {
        &self.task_lists
    }

    pub fn task_list(&self, uid: &str) -> Option<&TaskList> {
        self.task_lists.iter().find(|list| list.uid() == uid)
    }

    pub fn task_list_mut(&mut self, uid: &str) -> Option<&mut TaskList> {
        self.task_lists.iter_mut().find(|list| list.uid() == uid)
    }

    /// The tasks of one loaded list. `None` when no such list is loaded
    pub fn tasks_by_list_uid(&self, uid: &str) -> Option<&[Task]> {
        self.task_list(uid).map(|list| list.tasks())
    }

    /// Discover the server's collections and (re)load every targeted list
    /// that supports to-dos, replacing whatever was loaded before.
    ///
    /// Components that fail to parse are skipped with a warning; one broken
    /// component does not take a whole list down.
    pub async fn load_remote_data(&mut self) -> Result<(), Error> {
        let descriptors = self.transport.discover_task_lists().await?;
        log::info!("Discovered {} list(s) on the server", descriptors.len());

        let mut task_lists = Vec::new();
        for descriptor in descriptors {
            if !descriptor.supported().contains(SupportedComponents::TODO) {
                log::debug!("Skipping list '{}', it does not support to-dos", descriptor.name());
                continue;
            }
            if !self.is_targeted(&descriptor) {
                log::debug!("Skipping list '{}', it is not a targeted list", descriptor.name());
                continue;
            }

            let mut list = TaskList::new(descriptor.uid().to_string(), descriptor.name().to_string());
            list.set_color(descriptor.color().map(str::to_string));

            let components = self.transport.fetch_components(descriptor.uid()).await?;
            let mut skipped = 0;
            for ical in &components {
                let outcome = Task::from_ical(ical, descriptor.uid()).and_then(|task| list.insert(task));
                if let Err(err) = outcome {
                    skipped += 1;
                    log::warn!("Skipping a component of list '{}': {}", descriptor.name(), err);
                }
            }

            log::info!("Loaded {} task(s) from list '{}'", list.len(), list.name());
            if skipped > 0 {
                log::warn!("{} component(s) of list '{}' could not be loaded", skipped, descriptor.name());
            }
            task_lists.push(list);
        }

        self.task_lists = task_lists;
        Ok(())
    }

    /// Target entries match a list by UID or by display name
    fn is_targeted(&self, descriptor: &ListDescriptor) -> bool {
        match &self.options.target_lists {
            None => true,
            Some(targets) => targets
                .iter()
                .any(|target| target.as_str() == descriptor.uid() || target.as_str() == descriptor.name()),
        }
    }

    fn ensure_writable(&self, operation: &'static str) -> Result<(), Error> {
        if self.options.read_only {
            return Err(Error::ReadOnly(operation));
        }
        Ok(())
    }

    /// Push a new task to a list on the server, and mirror it locally when
    /// that list is loaded. The task does not need a UID yet; the UID the
    /// server files it under is filled in and returned.
    pub async fn add_task(&mut self, list_uid: &str, mut task: Task) -> Result<String, Error> {
        self.ensure_writable("add_task")?;

        task.set_list_uid(list_uid);
        let assigned_uid = self.transport.create_component(list_uid, &task.to_ical()).await?;
        task.assign_uid(assigned_uid.clone());
        task.set_synced(true);

        if let Some(list) = self.task_lists.iter_mut().find(|list| list.uid() == list_uid) {
            list.insert(task)?;
        }
        Ok(assigned_uid)
    }

    /// Push the current state of an already-loaded task to the server.
    ///
    /// Mutate the task through
    /// [`task_list_mut`](Self::task_list_mut)/[`TaskList::task_mut`] first,
    /// then hand its UID here; on success it is marked as synced again.
    pub async fn update_task(&mut self, list_uid: &str, uid: &str) -> Result<(), Error> {
        self.ensure_writable("update_task")?;

        let list = self
            .task_lists
            .iter()
            .find(|list| list.uid() == list_uid)
            .ok_or_else(|| Error::UnknownList(list_uid.to_string()))?;
        let ical = list
            .task(uid)
            .ok_or_else(|| Error::UnknownTask(uid.to_string()))?
            .to_ical();

        self.transport.replace_component(list_uid, uid, &ical).await?;

        if let Some(task) = self.task_list_mut(list_uid).and_then(|list| list.task_mut(uid)) {
            task.set_synced(true);
        }
        Ok(())
    }

    /// Delete a task on the server, and drop it from the local mirror
    pub async fn delete_task(&mut self, list_uid: &str, uid: &str) -> Result<(), Error> {
        self.ensure_writable("delete_task")?;

        self.transport.delete_component(list_uid, uid).await?;
        if let Some(list) = self.task_lists.iter_mut().find(|list| list.uid() == list_uid) {
            if list.remove(uid).is_none() {
                log::debug!("Task '{}' was not mirrored locally", uid);
            }
        }
        Ok(())
    }

    /// Every loaded list (tasks included) as one JSON value
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(&self.task_lists).expect("task lists always serialize to JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_transport::MemoryTransport;

    fn read_only_api() -> TasksApi<MemoryTransport> {
        let options = ApiOptions {
            read_only: true,
            target_lists: None,
        };
        TasksApi::new(MemoryTransport::new(), options)
    }

    #[tokio::test]
    async fn test_read_only_refuses_every_write() {
        let mut api = read_only_api();
        let task = Task::new("Nope".to_string(), "list-1".to_string());

        match api.add_task("list-1", task).await {
            Err(Error::ReadOnly(operation)) => assert_eq!(operation, "add_task"),
            other => panic!("expected a ReadOnly error, got {:?}", other),
        }
        match api.update_task("list-1", "some-uid").await {
            Err(Error::ReadOnly(_)) => {}
            other => panic!("expected a ReadOnly error, got {:?}", other),
        }
        match api.delete_task("list-1", "some-uid").await {
            Err(Error::ReadOnly(_)) => {}
            other => panic!("expected a ReadOnly error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_requires_a_loaded_task() {
        let mut transport = MemoryTransport::new();
        transport.add_list(crate::traits::ListDescriptor::new(
            "list-1".to_string(),
            "List".to_string(),
            SupportedComponents::TODO,
        ));
        let mut api = TasksApi::new(transport, ApiOptions::default());
        api.load_remote_data().await.unwrap();

        match api.update_task("no-such-list", "uid").await {
            Err(Error::UnknownList(_)) => {}
            other => panic!("expected an UnknownList error, got {:?}", other),
        }
        match api.update_task("list-1", "no-such-task").await {
            Err(Error::UnknownTask(_)) => {}
            other => panic!("expected an UnknownTask error, got {:?}", other),
        }
    }
}
