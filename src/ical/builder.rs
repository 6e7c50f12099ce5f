//! A module to build iCal VTODO components

use ics::escape_text;

use crate::ical::CalDateTime;
use crate::task::Task;

/// Serialize a task into an iCal VTODO component.
///
/// The component is emitted bare (no `VCALENDAR` wrapper, the transport adds
/// one if its server wants it), with CRLF line endings. Properties whose
/// value is at its default are omitted, except `STATUS` which is always
/// written out so a reader never has to guess. Extra properties are appended
/// last, keys and parameters intact.
///
/// Text values (`SUMMARY`, `DESCRIPTION`, `CATEGORIES`, and the extra
/// property values, which are stored unescaped) are escaped per RFC 5545;
/// identifiers are emitted as-is. Out-of-range `PERCENT-COMPLETE` and
/// `PRIORITY` values are clamped to the nearest valid bound (the task itself
/// is left untouched).
pub fn build_from(task: &Task) -> String {
    let mut ical = String::new();
    push_property(&mut ical, "BEGIN", "VTODO");

    if let Some(uid) = task.uid() {
        push_property(&mut ical, "UID", uid);
    }
    if let Some(created) = task.created() {
        push_property(&mut ical, "CREATED", &created.to_string());
    }
    if let Some(last_modified) = task.last_modified() {
        push_property(&mut ical, "LAST-MODIFIED", &last_modified.to_string());
    }
    if !task.summary().is_empty() {
        push_text(&mut ical, "SUMMARY", task.summary());
    }
    if !task.notes().is_empty() {
        push_text(&mut ical, "DESCRIPTION", task.notes());
    }

    let status = if task.completed() { "COMPLETED" } else { "NEEDS-ACTION" };
    push_property(&mut ical, "STATUS", status);

    if task.percent_complete() > 0 {
        let percent = clamp_upper(task.percent_complete(), 100, "PERCENT-COMPLETE");
        push_property(&mut ical, "PERCENT-COMPLETE", &percent.to_string());
    }
    if task.priority() > 0 {
        let priority = clamp_upper(task.priority(), 9, "PRIORITY");
        push_property(&mut ical, "PRIORITY", &priority.to_string());
    }

    if let Some(start) = task.start() {
        push_date(&mut ical, "DTSTART", start);
    }
    if let Some(due) = task.due() {
        push_date(&mut ical, "DUE", due);
    }

    if !task.tags().is_empty() {
        let categories = task
            .tags()
            .iter()
            .map(|tag| escape_text(tag.as_str()))
            .collect::<Vec<_>>()
            .join(",");
        push_property(&mut ical, "CATEGORIES", &categories);
    }

    if let Some(parent_uid) = task.parent_uid() {
        // RELTYPE defaults to PARENT, no need to spell it out
        push_property(&mut ical, "RELATED-TO", parent_uid);
    }

    for (key, value) in task.extra_properties().iter() {
        push_text(&mut ical, key, value);
    }

    push_property(&mut ical, "END", "VTODO");
    ical
}

fn push_property(ical: &mut String, name: &str, value: &str) {
    ical.push_str(name);
    ical.push(':');
    ical.push_str(value);
    ical.push_str("\r\n");
}

fn push_text(ical: &mut String, name: &str, value: &str) {
    push_property(ical, name, &escape_text(value));
}

fn push_date(ical: &mut String, name: &str, value: CalDateTime) {
    if value.is_date_only() {
        let name = format!("{};VALUE=DATE", name);
        push_property(ical, &name, &value.to_string());
    } else {
        push_property(ical, name, &value.to_string());
    }
}

fn clamp_upper(value: u8, highest: u8, name: &str) -> u8 {
    if value > highest {
        log::warn!("Clamping out-of-range {} {} to {}", name, value, highest);
        highest
    } else {
        value
    }
}
