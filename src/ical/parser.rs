//! A module to parse iCal VTODO components

use std::collections::{BTreeSet, HashSet};

use ical::property::Property;
use once_cell::sync::Lazy;

use crate::error::Error;
use crate::ical::datetime::CalDateTime;
use crate::props::ExtraProperties;
use crate::task::Task;

/// The property names that map onto typed [`Task`] fields. Every property
/// outside this set round-trips through the task's extra properties,
/// parameters included (this covers `DTSTAMP`, `COMPLETED`, `RRULE`, and all
/// the `X-` properties clients invent).
pub static HANDLED_PROPERTIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "SUMMARY", "DESCRIPTION", "STATUS", "DUE", "DTSTART", "PRIORITY",
        "PERCENT-COMPLETE", "CATEGORIES", "UID", "CREATED", "LAST-MODIFIED",
        "RELATED-TO",
    ]
    .iter()
    .copied()
    .collect()
});

/// Parse an iCal component into a [`Task`] attached to the given list.
///
/// The input is usually a full `VCALENDAR` wrapper as CalDAV servers send
/// them; the first `VTODO` component is used and anything after it is
/// ignored. Bare property lines without any `BEGIN` framing are accepted too.
/// Unknown properties are preserved, individually malformed lines are skipped
/// with a warning. Errors are returned only when no property line can be
/// parsed at all, when the input frames components but none of them is a
/// `VTODO`, or when the `VTODO` is left unterminated.
pub fn parse(content: &str, list_uid: &str) -> Result<Task, Error> {
    let reader = ical::PropertyParser::from_reader(content.as_bytes());

    let mut properties = Vec::new();
    for parsed in reader {
        match parsed {
            Ok(property) => properties.push(property),
            Err(err) => log::warn!("Skipping an unparsable iCal line: {}", err),
        }
    }
    if properties.is_empty() {
        return Err(Error::Format("no iCal property line could be parsed".to_string()));
    }

    let body = vtodo_body(&properties)?;

    let mut summary = String::new();
    let mut notes = String::new();
    let mut uid = None;
    let mut completed = false;
    let mut percent_complete = 0;
    let mut priority = 0;
    let mut due = None;
    let mut start = None;
    let mut created = None;
    let mut last_modified = None;
    let mut tags = BTreeSet::new();
    let mut parent_uid = None;
    let mut extra_properties = ExtraProperties::new();

    for property in body {
        let name = property.name.trim().to_ascii_uppercase();
        let value = property.value.as_deref().unwrap_or("");

        if !HANDLED_PROPERTIES.contains(name.as_str()) {
            // The key keeps its parameters, the value loses its wire escaping
            extra_properties.set(raw_key(property), unescape_text(value));
            continue;
        }

        match name.as_str() {
            "UID" => {
                if !value.is_empty() {
                    uid = Some(value.to_string());
                }
            }
            "SUMMARY" => summary = unescape_text(value),
            "DESCRIPTION" => notes = unescape_text(value),
            "STATUS" => completed = value.trim().eq_ignore_ascii_case("COMPLETED"),
            "PERCENT-COMPLETE" => percent_complete = parse_percent(value),
            "PRIORITY" => priority = parse_priority(value),
            "DUE" => due = parse_date_value("DUE", value),
            "DTSTART" => start = parse_date_value("DTSTART", value),
            "CREATED" => created = parse_date_value("CREATED", value),
            "LAST-MODIFIED" => last_modified = parse_date_value("LAST-MODIFIED", value),
            "CATEGORIES" => {
                for tag in split_categories(value) {
                    tags.insert(tag);
                }
            }
            "RELATED-TO" => {
                if has_parent_reltype(property) {
                    parent_uid = Some(value.to_string());
                } else {
                    // CHILD and SIBLING relations have no typed field
                    extra_properties.set(raw_key(property), unescape_text(value));
                }
            }
            _ => {}
        }
    }

    // A task the server sent us (it has a UID) starts out in sync
    let synced = uid.is_some();

    Ok(Task::new_with_parameters(summary, notes, uid, list_uid.to_string(),
                                 completed, percent_complete, priority,
                                 due, start, created, last_modified,
                                 tags, parent_uid, extra_properties, synced))
}

fn is_begin(property: &Property) -> bool {
    property.name.trim().eq_ignore_ascii_case("BEGIN")
}

fn is_end(property: &Property) -> bool {
    property.name.trim().eq_ignore_ascii_case("END")
}

fn marks_component(property: &Property, component: &str) -> bool {
    property
        .value
        .as_deref()
        .map(|value| value.trim().eq_ignore_ascii_case(component))
        == Some(true)
}

/// Extract the properties of the first VTODO component, skipping whole nested
/// components (`VALARM`, ...). When the input has no `BEGIN` line at all, the
/// whole input is the body.
fn vtodo_body(properties: &[Property]) -> Result<Vec<&Property>, Error> {
    let begin = match properties
        .iter()
        .position(|property| is_begin(property) && marks_component(property, "VTODO"))
    {
        Some(index) => index,
        None => {
            if properties.iter().any(is_begin) {
                return Err(Error::Format("the input contains no VTODO component".to_string()));
            }
            return Ok(properties.iter().collect());
        }
    };

    let mut body = Vec::new();
    let mut depth = 0usize;
    for property in &properties[begin + 1..] {
        if is_begin(property) {
            log::debug!("Skipping a nested {:?} component inside the VTODO", property.value);
            depth += 1;
            continue;
        }
        if is_end(property) {
            if depth > 0 {
                depth -= 1;
                continue;
            }
            if marks_component(property, "VTODO") {
                return Ok(body);
            }
            // e.g. an END:VCALENDAR while the VTODO is still open
            break;
        }
        if depth == 0 {
            body.push(property);
        }
    }

    Err(Error::Format("unterminated VTODO component".to_string()))
}

/// The key under which an unhandled property is preserved: its name plus its
/// parameters, re-assembled the way the wire carries them
fn raw_key(property: &Property) -> String {
    let mut key = property.name.trim().to_string();
    if let Some(params) = &property.params {
        for (param, values) in params {
            key.push(';');
            key.push_str(param);
            if !values.is_empty() {
                key.push('=');
                let mut first = true;
                for value in values {
                    if !first {
                        key.push(',');
                    }
                    first = false;
                    if value.contains(':') || value.contains(';') || value.contains(',') {
                        key.push('"');
                        key.push_str(value);
                        key.push('"');
                    } else {
                        key.push_str(value);
                    }
                }
            }
        }
    }
    key
}

/// RELATED-TO without a RELTYPE parameter relates to the parent (RFC 5545 §3.2.15)
fn has_parent_reltype(property: &Property) -> bool {
    match &property.params {
        None => true,
        Some(params) => params
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("RELTYPE"))
            .map_or(true, |(_, values)| {
                values
                    .first()
                    .map_or(true, |value| value.trim().eq_ignore_ascii_case("PARENT"))
            }),
    }
}

fn parse_percent(value: &str) -> u8 {
    // Some clients write PERCENT-COMPLETE as a float; the fraction is dropped
    match value.trim().parse::<f64>() {
        Ok(percent) if (0.0..=100.0).contains(&percent) => percent as u8,
        Ok(percent) => {
            log::warn!("Out-of-range PERCENT-COMPLETE {}, defaulting to 0", percent);
            0
        }
        Err(_) => {
            log::warn!("Invalid PERCENT-COMPLETE {:?}, defaulting to 0", value);
            0
        }
    }
}

fn parse_priority(value: &str) -> u8 {
    match value.trim().parse::<i64>() {
        Ok(priority) if (0..=9).contains(&priority) => priority as u8,
        Ok(priority) => {
            log::warn!("Out-of-range PRIORITY {}, defaulting to 0", priority);
            0
        }
        Err(_) => {
            log::warn!("Invalid PRIORITY {:?}, defaulting to 0", value);
            0
        }
    }
}

fn parse_date_value(name: &str, value: &str) -> Option<CalDateTime> {
    let parsed = CalDateTime::parse(value);
    if parsed.is_none() {
        log::warn!("Ignoring {} value {:?} that is neither a date nor a date-time", name, value);
    }
    parsed
}

/// Split a CATEGORIES value on the commas that are not escaped
fn split_categories(value: &str) -> Vec<String> {
    let mut raw_parts = Vec::new();
    let mut current = String::new();
    let mut escaped = false;
    for c in value.chars() {
        if escaped {
            current.push('\\');
            current.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == ',' {
            raw_parts.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    if escaped {
        current.push('\\');
    }
    raw_parts.push(current);

    raw_parts
        .into_iter()
        .map(|part| unescape_text(part.trim()))
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Undo RFC 5545 TEXT escaping (the inverse of the escaping applied when
/// serializing). Unknown escape sequences are left alone.
fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(',') => out.push(','),
            Some(';') => out.push(';'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
