use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use task_manager::cli::Shell;
use task_manager::repository::{InMemoryTaskRepository, TaskRepository};
use task_manager::services::TaskService;
use task_manager::storage::{FileTaskStorage, TaskStorage};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "task_manager=info".to_string()),
        ))
        // Logs go to stderr so they do not interleave with the menu.
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let path = std::env::var("TASKS_FILE").unwrap_or_else(|_| "fileStorage.txt".to_string());
    let storage = FileTaskStorage::new(&path);

    // Seed the in-memory repository with whatever the last run persisted.
    let mut repo = InMemoryTaskRepository::new();
    match storage.load_all() {
        Ok(tasks) => {
            info!("loaded {} tasks from {}", tasks.len(), path);
            for task in tasks {
                repo.save(task);
            }
        }
        Err(err) => println!("{err}"),
    }

    let service = TaskService::new(Box::new(repo));
    let mut shell = Shell::new(service, Box::new(storage));
    shell.run()?;

    Ok(())
}
