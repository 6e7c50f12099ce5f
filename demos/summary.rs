//! This is an example of how caldav-tasks can be used.
//! This binary loads every task list of an account and prints a summary,
//! then dumps the whole account as JSON (the `--json` flag prints only the JSON).

use caldav_tasks::config::ApiOptions;
use caldav_tasks::TasksApi;

mod shared;
use shared::demo_transport;

#[tokio::main]
async fn main() {
    env_logger::init();

    let json_only = std::env::args().any(|arg| arg == "--json");

    let mut api = TasksApi::new(demo_transport(), ApiOptions::default());
    api.load_remote_data().await.unwrap();

    if json_only {
        println!("{}", serde_json::to_string_pretty(&api.to_value()).unwrap());
        return;
    }

    println!("Loaded {} task list(s).", api.task_lists().len());
    println!();
    for list in api.task_lists() {
        let completed = list.tasks().iter().filter(|task| task.completed()).count();
        println!(
            "{} ({} tasks, {} completed, color {})",
            list.name(),
            list.len(),
            completed,
            list.color().unwrap_or("unset"),
        );
        for task in list {
            let checkbox = if task.completed() { "[x]" } else { "[ ]" };
            let due = match task.due() {
                Some(due) => format!(", due {}", due),
                None => String::new(),
            };
            println!("  {} {}{}", checkbox, task.summary(), due);
        }
    }

    println!();
    println!("Run with --json to dump these lists as JSON.");
}
