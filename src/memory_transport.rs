//! An in-memory CalDAV transport, standing in for a real server

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Error;
use crate::traits::{CalDavTransport, ListDescriptor};

/// A [`CalDavTransport`] backed by plain memory.
///
/// It behaves like a small, well-behaved CalDAV server: lists are discovered
/// in the order they were added, components are stored per list as iCal text,
/// and a created component whose text carries no UID gets one assigned (the
/// stored text is rewritten to carry it, like servers that normalize what
/// clients submit). Useful in tests and demos, and as a reference while
/// writing a real transport.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    lists: Vec<MemoryList>,
}

#[derive(Debug)]
struct MemoryList {
    descriptor: ListDescriptor,
    /// (component UID, iCal text), in creation order
    components: Vec<(String, String)>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a new (empty) list discoverable
    pub fn add_list(&mut self, descriptor: ListDescriptor) {
        self.lists.push(MemoryList { descriptor, components: Vec::new() });
    }

    /// Store a component on a list, the way a server would: the text is
    /// parsed, a UID is assigned when the text has none, and a component
    /// already carrying that UID is replaced. Returns the UID the component
    /// is filed under.
    pub fn store_component(&mut self, list_uid: &str, ical: &str) -> Result<String, Error> {
        // An unknown list fails before the payload is even looked at
        if !self.lists.iter().any(|list| list.descriptor.uid() == list_uid) {
            return Err(Error::UnknownList(list_uid.to_string()));
        }

        let mut task = crate::ical::parse(ical, list_uid)?;
        let (uid, text) = match task.uid() {
            Some(uid) => (uid.to_string(), ical.to_string()),
            None => {
                let uid = Uuid::new_v4().to_hyphenated().to_string();
                task.assign_uid(uid.clone());
                (uid, task.to_ical())
            }
        };

        let list = self.list_mut(list_uid)?;
        match list.components.iter_mut().find(|(stored, _)| stored.as_str() == uid) {
            Some((_, stored_text)) => *stored_text = text,
            None => list.components.push((uid.clone(), text)),
        }
        Ok(uid)
    }

    fn list_mut(&mut self, list_uid: &str) -> Result<&mut MemoryList, Error> {
        self.lists
            .iter_mut()
            .find(|list| list.descriptor.uid() == list_uid)
            .ok_or_else(|| Error::UnknownList(list_uid.to_string()))
    }
}

#[async_trait]
impl CalDavTransport for MemoryTransport {
    async fn discover_task_lists(&mut self) -> Result<Vec<ListDescriptor>, Error> {
        Ok(self.lists.iter().map(|list| list.descriptor.clone()).collect())
    }

    async fn fetch_components(&mut self, list_uid: &str) -> Result<Vec<String>, Error> {
        let list = self.list_mut(list_uid)?;
        Ok(list.components.iter().map(|(_, text)| text.clone()).collect())
    }

    async fn create_component(&mut self, list_uid: &str, ical: &str) -> Result<String, Error> {
        self.store_component(list_uid, ical)
    }

    async fn replace_component(&mut self, list_uid: &str, uid: &str, ical: &str) -> Result<(), Error> {
        let list = self.list_mut(list_uid)?;
        match list.components.iter_mut().find(|(stored, _)| stored.as_str() == uid) {
            Some((_, stored_text)) => {
                *stored_text = ical.to_string();
                Ok(())
            }
            None => Err(Error::UnknownTask(uid.to_string())),
        }
    }

    async fn delete_component(&mut self, list_uid: &str, uid: &str) -> Result<(), Error> {
        let list = self.list_mut(list_uid)?;
        match list.components.iter().position(|(stored, _)| stored.as_str() == uid) {
            Some(index) => {
                list.components.remove(index);
                Ok(())
            }
            None => Err(Error::UnknownTask(uid.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::SupportedComponents;
    use crate::task::Task;

    fn transport_with_list(uid: &str) -> MemoryTransport {
        let mut transport = MemoryTransport::new();
        transport.add_list(ListDescriptor::new(
            uid.to_string(),
            "A list".to_string(),
            SupportedComponents::TODO,
        ));
        transport
    }

    #[test]
    fn test_store_assigns_uids_to_uidless_components() {
        let mut transport = transport_with_list("list-1");
        let draft = Task::new_unassigned("No uid yet".to_string(), "list-1".to_string());

        let uid = transport.store_component("list-1", &draft.to_ical()).unwrap();
        assert!(!uid.is_empty());

        // The stored text was rewritten to carry the assigned UID
        let stored = &transport.lists[0].components[0].1;
        assert!(stored.contains(&format!("UID:{}\r\n", uid)));
    }

    #[test]
    fn test_store_keeps_submitted_text_verbatim_when_it_has_a_uid() {
        let mut transport = transport_with_list("list-1");
        let ical = "BEGIN:VTODO\r\nUID:already-there\r\nSUMMARY:Hi\r\nSTATUS:NEEDS-ACTION\r\nEND:VTODO\r\n";

        let uid = transport.store_component("list-1", ical).unwrap();
        assert_eq!(uid, "already-there");
        assert_eq!(transport.lists[0].components[0].1, ical);
    }

    #[test]
    fn test_store_on_unknown_list_fails() {
        let mut transport = transport_with_list("list-1");
        let task = Task::new("Lost".to_string(), "nope".to_string());
        match transport.store_component("no-such-list", &task.to_ical()) {
            Err(Error::UnknownList(_)) => {}
            other => panic!("expected an UnknownList error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_transport_round_trip() {
        let mut transport = transport_with_list("list-1");
        let task = Task::new("Ping".to_string(), "list-1".to_string());
        let uid = transport.create_component("list-1", &task.to_ical()).await.unwrap();

        let fetched = transport.fetch_components("list-1").await.unwrap();
        assert_eq!(fetched.len(), 1);
        let back = Task::from_ical(&fetched[0], "list-1").unwrap();
        assert!(back.has_same_observable_content_as(&task));

        let mut updated = task.clone();
        updated.set_summary("Pong".to_string());
        transport.replace_component("list-1", &uid, &updated.to_ical()).await.unwrap();
        let fetched = transport.fetch_components("list-1").await.unwrap();
        assert!(fetched[0].contains("SUMMARY:Pong\r\n"));

        transport.delete_component("list-1", &uid).await.unwrap();
        assert!(transport.fetch_components("list-1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace_and_delete_require_a_known_uid() {
        let mut transport = transport_with_list("list-1");

        let outcome = transport
            .replace_component("list-1", "ghost", "BEGIN:VTODO\r\nEND:VTODO\r\n")
            .await;
        match outcome {
            Err(Error::UnknownTask(_)) => {}
            other => panic!("expected an UnknownTask error, got {:?}", other),
        }

        match transport.delete_component("list-1", "ghost").await {
            Err(Error::UnknownTask(_)) => {}
            other => panic!("expected an UnknownTask error, got {:?}", other),
        }
    }
}
