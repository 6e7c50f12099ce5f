//! To-do tasks, typed counterparts of iCal `VTODO` components

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;
use crate::ical::CalDateTime;
use crate::props::ExtraProperties;

/// A to-do task.
///
/// This models the VTODO properties this crate understands (`SUMMARY`,
/// `DESCRIPTION`, `STATUS`, `DUE`, `DTSTART`, `PRIORITY`, `PERCENT-COMPLETE`,
/// `CATEGORIES`, `UID`, `CREATED`, `LAST-MODIFIED` and the parent
/// `RELATED-TO`) as typed fields. Every other property a server sends is
/// preserved in [`extra_properties`](Self::extra_properties), so serializing
/// the task back does not lose data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Persistent, globally unique identifier for the calendar component.
    /// `None` for a task created locally, until the server assigns one
    uid: Option<String>,
    /// The UID of the task list this task belongs to
    list_uid: String,

    /// The one-line title of the task
    summary: String,
    /// The long-form description
    notes: String,
    /// Whether this task is completed (`STATUS:COMPLETED`)
    completed: bool,
    /// Percent complete, 0 to 100
    percent_complete: u8,
    /// Priority, 0 (undefined) or 1 (highest) to 9 (lowest)
    priority: u8,

    due: Option<CalDateTime>,
    start: Option<CalDateTime>,
    /// The time this task was created.
    /// This is not required by RFC5545; it can be None for tasks coming from a server
    created: Option<CalDateTime>,
    /// The last time this task was modified
    last_modified: Option<CalDateTime>,

    /// The tags (iCal `CATEGORIES`), sorted and deduplicated
    tags: BTreeSet<String>,
    /// The UID of the parent task (`RELATED-TO;RELTYPE=PARENT`), if any.
    /// Nothing guarantees the referenced task exists, or even that the link is acyclic
    parent_uid: Option<String>,
    /// Properties that have no typed field (X- properties, `DTSTAMP`, ...).
    /// They are needed to serialize this task into an equivalent iCal component
    extra_properties: ExtraProperties,

    /// Whether this task matches the server's copy. Mutating accessors clear it
    synced: bool,
}

impl Task {
    /// Create a task that exists locally only, under a fresh random UID
    pub fn new(summary: String, list_uid: String) -> Self {
        let new_uid = Uuid::new_v4().to_hyphenated().to_string();
        Self::with_uid(summary, list_uid, Some(new_uid))
    }

    /// Create a Task without a UID, leaving the assignment to the server
    /// (some servers mint their own identifiers on creation)
    pub fn new_unassigned(summary: String, list_uid: String) -> Self {
        Self::with_uid(summary, list_uid, None)
    }

    fn with_uid(summary: String, list_uid: String, uid: Option<String>) -> Self {
        let now = CalDateTime::now();
        Self::new_with_parameters(summary, String::new(), uid, list_uid,
                                  false, 0, 0,
                                  None, None, Some(now), Some(now),
                                  BTreeSet::new(), None, ExtraProperties::new(),
                                  false)
    }

    /// Create a Task instance from its parts, as they come out of an iCal
    /// component (or out of a server that already knows this task)
    pub fn new_with_parameters(summary: String, notes: String, uid: Option<String>, list_uid: String,
                               completed: bool, percent_complete: u8, priority: u8,
                               due: Option<CalDateTime>, start: Option<CalDateTime>,
                               created: Option<CalDateTime>, last_modified: Option<CalDateTime>,
                               tags: BTreeSet<String>, parent_uid: Option<String>,
                               extra_properties: ExtraProperties, synced: bool,
                            ) -> Self
    {
        Self {
            uid,
            list_uid,
            summary,
            notes,
            completed,
            percent_complete,
            priority,
            due,
            start,
            created,
            last_modified,
            tags,
            parent_uid,
            extra_properties,
            synced,
        }
    }

    pub fn uid(&self) -> Option<&str>        { self.uid.as_deref()        }
    pub fn list_uid(&self) -> &str           { &self.list_uid             }
    pub fn summary(&self) -> &str            { &self.summary              }
    pub fn notes(&self) -> &str              { &self.notes                }
    pub fn completed(&self) -> bool          { self.completed             }
    pub fn percent_complete(&self) -> u8     { self.percent_complete      }
    pub fn priority(&self) -> u8             { self.priority              }
    pub fn due(&self) -> Option<CalDateTime>           { self.due           }
    pub fn start(&self) -> Option<CalDateTime>         { self.start         }
    pub fn created(&self) -> Option<CalDateTime>       { self.created       }
    pub fn last_modified(&self) -> Option<CalDateTime> { self.last_modified }
    pub fn tags(&self) -> &BTreeSet<String>  { &self.tags                 }
    pub fn parent_uid(&self) -> Option<&str> { self.parent_uid.as_deref() }
    pub fn extra_properties(&self) -> &ExtraProperties { &self.extra_properties }
    pub fn synced(&self) -> bool             { self.synced                }

    /// Fill in the UID of a task that does not have one yet (typically after
    /// the server assigned one on creation). An existing UID is never overwritten.
    pub fn assign_uid(&mut self, uid: String) {
        match &self.uid {
            None => self.uid = Some(uid),
            Some(existing) => {
                if existing != &uid {
                    log::warn!("Refusing to overwrite UID '{}' with '{}'", existing, uid);
                }
            }
        }
    }

    pub(crate) fn set_list_uid(&mut self, list_uid: &str) {
        if self.list_uid != list_uid {
            self.list_uid = list_uid.to_string();
        }
    }

    fn update_sync_status(&mut self) {
        self.synced = false;
    }

    fn update_last_modified(&mut self) {
        self.last_modified = Some(CalDateTime::now());
    }

    /// Rename the task, refreshing its "last modified" stamp
    pub fn set_summary(&mut self, new_summary: String) {
        self.update_sync_status();
        self.update_last_modified();
        self.summary = new_summary;
    }

    pub fn set_notes(&mut self, new_notes: String) {
        self.update_sync_status();
        self.update_last_modified();
        self.notes = new_notes;
    }

    /// Mark the task completed (or not)
    pub fn set_completed(&mut self, completed: bool) {
        self.update_sync_status();
        self.update_last_modified();
        self.completed = completed;
    }

    /// Set the completion percentage. The value is stored as given; values
    /// over 100 are clamped when the task is serialized to iCal
    pub fn set_percent_complete(&mut self, percent: u8) {
        self.update_sync_status();
        self.update_last_modified();
        self.percent_complete = percent;
    }

    /// Set the priority. The value is stored as given; values over 9 are
    /// clamped when the task is serialized to iCal
    pub fn set_priority(&mut self, priority: u8) {
        self.update_sync_status();
        self.update_last_modified();
        self.priority = priority;
    }

    pub fn set_due(&mut self, due: Option<CalDateTime>) {
        self.update_sync_status();
        self.update_last_modified();
        self.due = due;
    }

    pub fn set_start(&mut self, start: Option<CalDateTime>) {
        self.update_sync_status();
        self.update_last_modified();
        self.start = start;
    }

    /// Re-parent the task. The referenced task is not required to exist;
    /// dangling parents are treated as roots when a hierarchy is built
    pub fn set_parent_uid(&mut self, parent_uid: Option<String>) {
        self.update_sync_status();
        self.update_last_modified();
        self.parent_uid = parent_uid;
    }

    /// Add a tag, returning whether it was not present yet
    pub fn add_tag(&mut self, tag: String) -> bool {
        let added = self.tags.insert(tag);
        if added {
            self.update_sync_status();
            self.update_last_modified();
        }
        added
    }

    /// Remove a tag, returning whether it was present
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let removed = self.tags.remove(tag);
        if removed {
            self.update_sync_status();
            self.update_last_modified();
        }
        removed
    }

    /// Set a non-standard property under its raw key (see [`ExtraProperties::set`])
    pub fn set_extra_property<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> Option<String> {
        self.update_sync_status();
        self.update_last_modified();
        self.extra_properties.set(key, value)
    }

    pub fn remove_extra_property(&mut self, key: &str) -> Option<String> {
        let removed = self.extra_properties.remove(key);
        if removed.is_some() {
            self.update_sync_status();
            self.update_last_modified();
        }
        removed
    }

    /// Mark this task as matching (or diverging from) the server's copy.
    /// The API layer maintains this flag across loads and pushes
    pub fn set_synced(&mut self, synced: bool) {
        self.synced = synced;
    }

    /// Serialize this task to an iCal VTODO component
    pub fn to_ical(&self) -> String {
        crate::ical::build_from(self)
    }

    /// Parse an iCal VTODO component into a task belonging to `list_uid`
    pub fn from_ical(content: &str, list_uid: &str) -> Result<Task, Error> {
        crate::ical::parse(content, list_uid)
    }

    /// This task as a JSON value, for dumps and tooling
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).expect("a task always serializes to JSON")
    }

    #[cfg(any(test, feature = "integration_tests"))]
    pub fn has_same_observable_content_as(&self, other: &Task) -> bool {
           self.uid == other.uid
        && self.summary == other.summary
        && self.notes == other.notes
        && self.completed == other.completed
        && self.percent_complete == other.percent_complete
        && self.priority == other.priority
        && self.due == other.due
        && self.start == other.start
        && self.created == other.created
        && self.last_modified == other.last_modified
        && self.tags == other.tags
        && self.parent_uid == other.parent_uid
        && self.extra_properties == other.extra_properties
        // the sync flag and the owning list are local state, not content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_has_uid_and_timestamps() {
        let task = Task::new("Buy milk".to_string(), "some-list".to_string());

        assert!(task.uid().is_some());
        assert_eq!(task.list_uid(), "some-list");
        assert_eq!(task.summary(), "Buy milk");
        assert!(task.created().is_some());
        assert_eq!(task.created(), task.last_modified());
        assert!(!task.completed());
        assert!(!task.synced());
    }

    #[test]
    fn test_new_tasks_get_distinct_uids() {
        let left = Task::new("a".to_string(), "l".to_string());
        let right = Task::new("b".to_string(), "l".to_string());
        assert_ne!(left.uid(), right.uid());
    }

    #[test]
    fn test_unassigned_task_has_no_uid() {
        let task = Task::new_unassigned("Draft".to_string(), "some-list".to_string());
        assert_eq!(task.uid(), None);
    }

    #[test]
    fn test_assign_uid_only_fills_missing() {
        let mut task = Task::new_unassigned("Draft".to_string(), "l".to_string());
        task.assign_uid("server-1".to_string());
        assert_eq!(task.uid(), Some("server-1"));

        task.assign_uid("server-2".to_string());
        assert_eq!(task.uid(), Some("server-1"));
    }

    #[test]
    fn test_mutation_refreshes_change_tracking() {
        let mut task = Task::new("Original".to_string(), "l".to_string());
        let old_stamp = CalDateTime::parse("20000101T000000Z").unwrap();
        task.last_modified = Some(old_stamp);
        task.synced = true;

        task.set_summary("Renamed".to_string());

        assert_eq!(task.summary(), "Renamed");
        assert!(!task.synced());
        assert_ne!(task.last_modified(), Some(old_stamp));
    }

    #[test]
    fn test_tag_mutation_is_tracked_only_on_change() {
        let mut task = Task::new("Tagged".to_string(), "l".to_string());
        assert!(task.add_tag("home".to_string()));
        task.synced = true;

        // Adding a duplicate changes nothing
        assert!(!task.add_tag("home".to_string()));
        assert!(task.synced());

        assert!(task.remove_tag("home"));
        assert!(!task.synced());
    }

    #[test]
    fn test_observable_content_ignores_local_state() {
        let mut left = Task::new("Same".to_string(), "list-a".to_string());
        let mut right = left.clone();
        right.set_list_uid("list-b");
        right.set_synced(!left.synced());

        assert!(left.has_same_observable_content_as(&right));

        left.set_notes("Changed".to_string());
        assert!(!left.has_same_observable_content_as(&right));
    }

    #[test]
    fn test_extra_property_mutation_clears_sync_flag() {
        let mut task = Task::new("X".to_string(), "l".to_string());
        task.synced = true;
        task.set_extra_property("X-APPLE-SORT-ORDER", "5");
        assert!(!task.synced());
        assert_eq!(task.extra_properties().get_normalized("apple_sort_order"), Some("5"));
    }
}
