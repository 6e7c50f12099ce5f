//! Checks that tasks survive the trip through their iCal representation
#![cfg(feature = "integration_tests")]

use caldav_tasks::ical::CalDateTime;
use caldav_tasks::Task;

/// A component the way a Nextcloud server would hand it over
const SERVER_COMPONENT: &str = "BEGIN:VCALENDAR\r\n\
    VERSION:2.0\r\n\
    PRODID:-//Nextcloud Tasks v0.13.6\r\n\
    BEGIN:VTODO\r\n\
    UID:a38d2cb6-b847-46a9-98c5-2f25f2bb1a75\r\n\
    CREATED:20210310T144523Z\r\n\
    LAST-MODIFIED:20210415T093012Z\r\n\
    DTSTAMP:20210415T093012Z\r\n\
    SUMMARY:Water the plants\\, every one of them\r\n\
    DESCRIPTION:Front yard\\nBack yard\r\n\
    STATUS:IN-PROCESS\r\n\
    PERCENT-COMPLETE:40\r\n\
    PRIORITY:2\r\n\
    DTSTART:20210401T080000Z\r\n\
    DUE;VALUE=DATE:20210410\r\n\
    CATEGORIES:garden,home\r\n\
    RELATED-TO:6c9f5f0f-8a50-4b62-a7c2-1e1e9b50e22a\r\n\
    RELATED-TO;RELTYPE=CHILD:d64cdb71-db0b-4da3-b46b-ac2e02a01cf5\r\n\
    X-APPLE-SORT-ORDER:17\r\n\
    X-OC-HIDESUBTASKS:1\r\n\
    X-MOZ-GENERATION;X-SEEN=yes:2\r\n\
    BEGIN:VALARM\r\n\
    ACTION:DISPLAY\r\n\
    TRIGGER:-PT15M\r\n\
    END:VALARM\r\n\
    END:VTODO\r\n\
    END:VCALENDAR\r\n";

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_server_component_survives_a_round_trip() {
    init_logging();

    let decoded = Task::from_ical(SERVER_COMPONENT, "some-list").unwrap();
    let re_encoded = decoded.to_ical();
    let decoded_again = Task::from_ical(&re_encoded, "some-list").unwrap();

    assert!(decoded.has_same_observable_content_as(&decoded_again));

    // Spot-check the fields that tend to be mangled
    assert_eq!(decoded_again.summary(), "Water the plants, every one of them");
    assert_eq!(decoded_again.notes(), "Front yard\nBack yard");
    assert!(!decoded_again.completed());
    assert_eq!(decoded_again.percent_complete(), 40);
    assert_eq!(decoded_again.due(), Some(CalDateTime::parse("20210410").unwrap()));
    assert!(decoded_again.due().unwrap().is_date_only());
    assert_eq!(decoded_again.parent_uid(), Some("6c9f5f0f-8a50-4b62-a7c2-1e1e9b50e22a"));
}

#[test]
fn test_preserved_properties_come_back_verbatim() {
    init_logging();

    let decoded = Task::from_ical(SERVER_COMPONENT, "some-list").unwrap();
    let re_encoded = decoded.to_ical();

    assert!(re_encoded.contains("DTSTAMP:20210415T093012Z\r\n"));
    assert!(re_encoded.contains("X-APPLE-SORT-ORDER:17\r\n"));
    assert!(re_encoded.contains("X-OC-HIDESUBTASKS:1\r\n"));
    assert!(re_encoded.contains("X-MOZ-GENERATION;X-SEEN=yes:2\r\n"));
    assert!(re_encoded.contains("RELATED-TO;RELTYPE=CHILD:d64cdb71-db0b-4da3-b46b-ac2e02a01cf5\r\n"));
    // The skipped VALARM does not resurface
    assert!(!re_encoded.contains("VALARM"));
    assert!(!re_encoded.contains("TRIGGER"));
}

#[test]
fn test_freshly_built_task_survives_a_round_trip() {
    init_logging();

    let mut task = Task::new("Write the report".to_string(), "work".to_string());
    task.set_notes("Section 1;\nSection 2, with appendix\\footnotes".to_string());
    task.set_completed(true);
    task.set_percent_complete(100);
    task.set_priority(1);
    task.set_due(CalDateTime::parse("20260901T170000Z"));
    task.set_start(CalDateTime::parse("20260820"));
    task.add_tag("reports".to_string());
    task.add_tag("deep work, focus".to_string());
    task.set_parent_uid(Some("some-parent-uid".to_string()));
    task.set_extra_property("X-APPLE-SORT-ORDER", "42");

    let decoded = Task::from_ical(&task.to_ical(), "work").unwrap();
    assert!(decoded.has_same_observable_content_as(&task));
    assert!(decoded.synced());
}

#[test]
fn test_extra_property_text_survives_a_round_trip() {
    init_logging();

    let mut task = Task::new("Check the greenhouse".to_string(), "garden".to_string());
    task.set_extra_property("X-NOTE", "vents first,\nthen the heaters; water last");

    let encoded = task.to_ical();
    // A raw newline here would split the property into an unparsable line
    assert!(encoded.contains("X-NOTE:vents first\\,\\nthen the heaters\\; water last\r\n"));

    let decoded = Task::from_ical(&encoded, "garden").unwrap();
    assert_eq!(
        decoded.extra_properties().get("X-NOTE"),
        Some("vents first,\nthen the heaters; water last")
    );
    assert!(decoded.has_same_observable_content_as(&task));
}

#[test]
fn test_escaped_server_extras_read_back_readable() {
    init_logging();

    let component = "BEGIN:VTODO\r\n\
        UID:0f61a3a4-4d49-4a5c-b4b8-7dfd8883a18f\r\n\
        SUMMARY:Hello\\, world\r\n\
        X-NOTE:Hello\\, world\\nBye\r\n\
        END:VTODO\r\n";

    let decoded = Task::from_ical(component, "some-list").unwrap();
    assert_eq!(decoded.summary(), "Hello, world");
    assert_eq!(decoded.extra_properties().get("X-NOTE"), Some("Hello, world\nBye"));

    // Re-encoding restores the wire form
    assert!(decoded.to_ical().contains("X-NOTE:Hello\\, world\\nBye\r\n"));
}

#[test]
fn test_uidless_task_round_trips_without_inventing_a_uid() {
    init_logging();

    let draft = Task::new_unassigned("Not filed yet".to_string(), "inbox".to_string());
    let decoded = Task::from_ical(&draft.to_ical(), "inbox").unwrap();

    assert_eq!(decoded.uid(), None);
    assert!(!decoded.synced());
    assert!(decoded.has_same_observable_content_as(&draft));
}
