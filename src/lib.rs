//! This crate provides a client-side model for CalDAV task data.
//!
//! It parses iCal `VTODO` components into typed [`Task`]s in the [`ical`] module, without losing
//! the properties it does not model: whatever a server sends beyond the usual fields is preserved
//! in the task's [`ExtraProperties`] and written back verbatim on serialization. \
//! Tasks live in [`TaskList`]s, and the parent links between them can be materialized into a
//! [`Hierarchy`] for tree-style navigation and display.
//!
//! The actual CalDAV protocol work is left to an implementation of the
//! [`CalDavTransport`](traits::CalDavTransport) trait. A [`TasksApi`] ties a transport to the
//! local lists: it discovers and loads the account's task lists, and pushes task additions,
//! updates and deletions back to the server (unless it is configured read-only, see
//! [`config`]). An in-memory transport is provided in the [`memory_transport`] module for tests,
//! demos, and offline use.

pub mod traits;

mod props;
pub use props::ExtraProperties;
mod task;
pub use task::Task;
mod list;
pub use list::{SupportedComponents, TaskList};
mod hierarchy;
pub use hierarchy::Hierarchy;

pub mod ical;
pub use crate::ical::CalDateTime;

pub mod api;
pub use api::TasksApi;
pub mod memory_transport;
pub use memory_transport::MemoryTransport;

pub mod config;
pub mod error;
pub use error::Error;
