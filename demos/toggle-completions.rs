//! This is an example of how caldav-tasks can be used.
//! This binary simply toggles all completion statuses of the tasks it finds,
//! and pushes every change back through the transport.

use caldav_tasks::config::ApiOptions;
use caldav_tasks::error::Error;
use caldav_tasks::memory_transport::MemoryTransport;
use caldav_tasks::TasksApi;

mod shared;
use shared::demo_transport;

#[tokio::main]
async fn main() {
    env_logger::init();

    let mut api = TasksApi::new(demo_transport(), ApiOptions::default());
    api.load_remote_data().await.unwrap();

    toggle_all_tasks(&mut api).await.unwrap();
}

async fn toggle_all_tasks(api: &mut TasksApi<MemoryTransport>) -> Result<(), Error> {
    let mut targets = Vec::new();
    for list in api.task_lists() {
        for task in list {
            if let Some(uid) = task.uid() {
                targets.push((list.uid().to_string(), uid.to_string()));
            }
        }
    }

    let mut n_toggled = 0;
    for (list_uid, uid) in targets {
        if let Some(task) = api.task_list_mut(&list_uid).and_then(|list| list.task_mut(&uid)) {
            let completed = task.completed();
            task.set_completed(!completed);
            println!(
                "'{}' is now {}",
                task.summary(),
                if task.completed() { "completed" } else { "not completed" },
            );
        }
        api.update_task(&list_uid, &uid).await?;
        n_toggled += 1;
    }

    println!("{} task(s) toggled and pushed.", n_toggled);
    Ok(())
}
