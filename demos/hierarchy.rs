//! This is an example of how caldav-tasks can be used.
//! This binary displays every task list as an indented tree, following the
//! parent links between tasks, with the client-specific sort order alongside.

use caldav_tasks::config::ApiOptions;
use caldav_tasks::TasksApi;

mod shared;
use shared::demo_transport;

#[tokio::main]
async fn main() {
    env_logger::init();

    let mut api = TasksApi::new(demo_transport(), ApiOptions::default());
    api.load_remote_data().await.unwrap();

    for list in api.task_lists() {
        println!("=== {} ===", list.name());

        let hierarchy = list.hierarchy();
        for (task, depth) in hierarchy.walk() {
            let checkbox = if task.completed() { "[x]" } else { "[ ]" };
            let sort_order = task
                .extra_properties()
                .get_normalized("apple_sort_order")
                .unwrap_or("-");
            println!(
                "{}{} {} (sort order: {})",
                "    ".repeat(depth),
                checkbox,
                task.summary(),
                sort_order,
            );
        }

        // The same links, queried point-wise
        for task in list {
            if let Some(uid) = task.uid() {
                let n_children = hierarchy.children_of(uid).len();
                if n_children > 0 {
                    println!("'{}' has {} direct subtask(s)", task.summary(), n_children);
                }
            }
        }
        println!();
    }
}
