use std::io::{self, Write};

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::AppError;
use crate::models::Task;
use crate::services::TaskService;
use crate::storage::TaskStorage;

/// Interactive menu shell. Holds the single in-process service instance and
/// the backing file storage, and runs the loop until the user exits.
pub struct Shell {
    service: TaskService,
    storage: Box<dyn TaskStorage>,
}

impl Shell {
    pub fn new(service: TaskService, storage: Box<dyn TaskStorage>) -> Self {
        Self { service, storage }
    }

    /// Runs the menu loop. Errors from individual commands are printed and
    /// the loop continues; only Exit (7) or a closed stdin ends it.
    pub fn run(&mut self) -> Result<(), AppError> {
        loop {
            println!("Enter 1 to Create New Task");
            println!("Enter 2 to List All Tasks (Sorted by Due Date)");
            println!("Enter 3 to Update Task Status");
            println!("Enter 4 to Filter Tasks");
            println!("Enter 5 to Delete Task");
            println!("Enter 6 to Save Tasks to File");
            let choice = prompt("Enter 7 to Exit: ")?;

            let command = match choice.parse::<i32>() {
                Ok(n) => n,
                Err(_) => {
                    println!("Not a parsable integer");
                    continue;
                }
            };

            let result = match command {
                1 => self.create(),
                2 => self.list(),
                3 => self.update_status(),
                4 => self.filter(),
                5 => self.delete(),
                6 => self.save(),
                7 => {
                    if let Err(err) = self.save() {
                        println!("{err}");
                    }
                    println!("Goodbye!");
                    return Ok(());
                }
                _ => {
                    println!("Number entered is out of range! Try again.");
                    continue;
                }
            };

            if let Err(err) = result {
                warn!("command {command} failed: {err}");
                println!("{err}");
            }
        }
    }

    fn create(&mut self) -> Result<(), AppError> {
        let title = prompt("Enter Task Title: ")?;
        let description = prompt("Enter Task Description: ")?;
        let status = prompt("Enter Task Status (TODO, IN_PROGRESS, DONE): ")?
            .to_uppercase()
            .parse()?;
        let priority = prompt("Enter Task Priority (LOW, MEDIUM, HIGH): ")?
            .to_uppercase()
            .parse()?;
        let due_date = parse_date(&prompt("Enter Due Date (yyyy-mm-dd): ")?)?;

        let task = self
            .service
            .create_task(Task::new(title, description, status, priority, due_date));
        println!("Task created with id: {}", task.id.unwrap_or_default());
        Ok(())
    }

    fn list(&mut self) -> Result<(), AppError> {
        let tasks = self.service.all_tasks();
        if tasks.is_empty() {
            println!("Task List is Empty");
            return Ok(());
        }
        for task in &tasks {
            println!("{task}");
        }
        Ok(())
    }

    fn update_status(&mut self) -> Result<(), AppError> {
        let id = parse_id(&prompt("Enter id of Task to Update: ")?)?;
        let status = prompt("Enter Updated Status (TODO, IN_PROGRESS, DONE): ")?
            .to_uppercase()
            .parse()?;

        let task = self.service.update_status(id, status)?;
        println!(
            "Status updated for task with id {}",
            task.id.unwrap_or_default()
        );
        Ok(())
    }

    fn filter(&mut self) -> Result<(), AppError> {
        if self.service.all_tasks().is_empty() {
            println!("Task list is empty");
            return Ok(());
        }

        println!("Enter a to Filter by Status");
        println!("Enter b to Filter by Priority");
        println!("Enter c to Filter by Due Before");
        let choice = prompt("Enter d to Filter by Due After: ")?.to_lowercase();

        let matches = match choice.as_str() {
            "a" => {
                let status = prompt("Enter Status to Filter By: ")?
                    .to_uppercase()
                    .parse()?;
                self.service.filter_by_status(status)
            }
            "b" => {
                let priority = prompt("Enter Priority to Filter By: ")?
                    .to_uppercase()
                    .parse()?;
                self.service.filter_by_priority(priority)
            }
            "c" => {
                let date = parse_date(&prompt("Enter Due Date Before to Filter By: ")?)?;
                self.service.filter_due_before(date)
            }
            "d" => {
                let date = parse_date(&prompt("Enter Due Date After to Filter By: ")?)?;
                self.service.filter_due_after(date)
            }
            _ => {
                println!("Invalid input. Try again.");
                return Ok(());
            }
        };

        if matches.is_empty() {
            println!("No Tasks matched that filter");
            return Ok(());
        }
        for task in &matches {
            println!("{task}");
        }
        Ok(())
    }

    fn delete(&mut self) -> Result<(), AppError> {
        let id = parse_id(&prompt("Enter id of Task to Delete: ")?)?;
        self.service.delete_task(id)?;
        println!("Task Deleted!");
        Ok(())
    }

    fn save(&mut self) -> Result<(), AppError> {
        let tasks = self.service.all_tasks();
        self.storage.save_all(&tasks)?;
        info!("saved {} tasks", tasks.len());
        println!("Tasks saved successfully!");
        Ok(())
    }
}

/// Prints a prompt without a trailing newline and reads one trimmed line.
/// A closed stdin reads as an error so the menu loop cannot spin forever.
fn prompt(label: &str) -> Result<String, AppError> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Err(AppError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "stdin closed",
        )));
    }
    Ok(line.trim().to_string())
}

fn parse_id(s: &str) -> Result<i32, AppError> {
    s.parse()
        .map_err(|_| AppError::Parse(format!("Not a parsable integer: {s}")))
}

fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    s.parse()
        .map_err(|_| AppError::Parse(format!("Bad date: {s}")))
}
