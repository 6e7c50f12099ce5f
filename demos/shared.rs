use caldav_tasks::memory_transport::MemoryTransport;
use caldav_tasks::traits::ListDescriptor;
use caldav_tasks::SupportedComponents;

/// Initializes an in-memory "server" holding a few task lists, with the kind
/// of components a Nextcloud instance would return
pub fn demo_transport() -> MemoryTransport {
    let mut transport = MemoryTransport::new();

    let mut personal = ListDescriptor::new(
        "personal".to_string(),
        "Personal".to_string(),
        SupportedComponents::TODO,
    );
    personal.set_color(Some("#0082C9".to_string()));
    transport.add_list(personal);

    transport.add_list(ListDescriptor::new(
        "meetings".to_string(),
        "Meetings".to_string(),
        // Holds calendar events only; the tasks API will skip it
        SupportedComponents::EVENT,
    ));

    for component in PERSONAL_COMPONENTS {
        transport
            .store_component("personal", component)
            .expect("the demo components are valid iCal");
    }

    transport
}

const PERSONAL_COMPONENTS: &[&str] = &[
    // A parent task, sorted first by its client-specific X- property
    "BEGIN:VCALENDAR\r\n\
     VERSION:2.0\r\n\
     PRODID:-//Nextcloud Tasks v0.13.6\r\n\
     BEGIN:VTODO\r\n\
     UID:11f6debb-e731-4f45-9ad9-0ec305d45121\r\n\
     CREATED:20210302T091500Z\r\n\
     LAST-MODIFIED:20210330T183000Z\r\n\
     DTSTAMP:20210330T183000Z\r\n\
     SUMMARY:Plan the garden\r\n\
     STATUS:NEEDS-ACTION\r\n\
     X-APPLE-SORT-ORDER:1\r\n\
     END:VTODO\r\n\
     END:VCALENDAR\r\n",
    "BEGIN:VCALENDAR\r\n\
     VERSION:2.0\r\n\
     PRODID:-//Nextcloud Tasks v0.13.6\r\n\
     BEGIN:VTODO\r\n\
     UID:3f9adf2d-f9eb-4dbd-9b36-b2d5c3997c39\r\n\
     CREATED:20210302T091600Z\r\n\
     LAST-MODIFIED:20210405T101530Z\r\n\
     DTSTAMP:20210405T101530Z\r\n\
     SUMMARY:Buy seeds\r\n\
     DESCRIPTION:Tomatoes\\, basil and squash\r\n\
     STATUS:NEEDS-ACTION\r\n\
     PRIORITY:3\r\n\
     DUE;VALUE=DATE:20210410\r\n\
     CATEGORIES:garden,errands\r\n\
     RELATED-TO:11f6debb-e731-4f45-9ad9-0ec305d45121\r\n\
     X-APPLE-SORT-ORDER:2\r\n\
     END:VTODO\r\n\
     END:VCALENDAR\r\n",
    "BEGIN:VCALENDAR\r\n\
     VERSION:2.0\r\n\
     PRODID:-//Nextcloud Tasks v0.13.6\r\n\
     BEGIN:VTODO\r\n\
     UID:c5b7ebe4-8c3e-4b24-b026-8e39e048c166\r\n\
     CREATED:20210302T091700Z\r\n\
     LAST-MODIFIED:20210315T120000Z\r\n\
     DTSTAMP:20210315T120000Z\r\n\
     SUMMARY:Prepare the beds\r\n\
     STATUS:NEEDS-ACTION\r\n\
     CATEGORIES:garden\r\n\
     RELATED-TO;RELTYPE=PARENT:11f6debb-e731-4f45-9ad9-0ec305d45121\r\n\
     X-APPLE-SORT-ORDER:3\r\n\
     END:VTODO\r\n\
     END:VCALENDAR\r\n",
    "BEGIN:VCALENDAR\r\n\
     VERSION:2.0\r\n\
     PRODID:-//Nextcloud Tasks v0.13.6\r\n\
     BEGIN:VTODO\r\n\
     UID:e7057bbb-04e7-4bbb-9149-b77e776ddff6\r\n\
     CREATED:20210201T080000Z\r\n\
     LAST-MODIFIED:20210220T170102Z\r\n\
     DTSTAMP:20210220T170102Z\r\n\
     SUMMARY:Call the plumber\r\n\
     STATUS:COMPLETED\r\n\
     PERCENT-COMPLETE:100\r\n\
     COMPLETED:20210220T170102Z\r\n\
     END:VTODO\r\n\
     END:VCALENDAR\r\n",
];
