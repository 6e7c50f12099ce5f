use async_trait::async_trait;

use crate::error::Error;
use crate::list::SupportedComponents;

/// What a CalDAV server reports about one of its collections during discovery
#[derive(Clone, Debug, PartialEq)]
pub struct ListDescriptor {
    uid: String,
    name: String,
    color: Option<String>,
    supported: SupportedComponents,
}

impl ListDescriptor {
    pub fn new(uid: String, name: String, supported: SupportedComponents) -> Self {
        Self { uid, name, color: None, supported }
    }

    pub fn uid(&self) -> &str           { &self.uid             }
    pub fn name(&self) -> &str          { &self.name            }
    pub fn color(&self) -> Option<&str> { self.color.as_deref() }
    pub fn supported(&self) -> SupportedComponents { self.supported }

    pub fn set_color(&mut self, color: Option<String>) {
        self.color = color;
    }
}

/// The transport this crate talks CalDAV through.
///
/// Implementations own the protocol work (HTTP, authentication, WebDAV
/// multi-status, ETags, report queries); this crate only consumes their
/// results. [`MemoryTransport`](crate::memory_transport::MemoryTransport)
/// is an in-process implementation for tests and demos.
#[async_trait]
pub trait CalDavTransport {
    /// Returns every collection the server exposes for this account.
    /// This can be a long process in case of a remote server, and it can fail
    async fn discover_task_lists(&mut self) -> Result<Vec<ListDescriptor>, Error>;

    /// Returns the iCal text of every component of this list, one per component,
    /// as the server sends them
    async fn fetch_components(&mut self, list_uid: &str) -> Result<Vec<String>, Error>;

    /// Creates a component on this list and returns the UID it is stored
    /// under (servers are free to pick one themselves when the text has none)
    async fn create_component(&mut self, list_uid: &str, ical: &str) -> Result<String, Error>;

    /// Replaces the component carrying this UID
    async fn replace_component(&mut self, list_uid: &str, uid: &str, ical: &str) -> Result<(), Error>;

    /// Deletes the component carrying this UID
    async fn delete_component(&mut self, list_uid: &str, uid: &str) -> Result<(), Error>;
}
