//! Add-task command - Assign a new task to an existing user

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use super::console::{field_problem, Console};
use super::session::Session;
use crate::tracker::tasks::parse_date;
use crate::tracker::UserDirectory;

pub fn execute<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
) -> Result<()> {
    let users = UserDirectory::load(&session.users).context("Failed to load users")?;

    let owner = loop {
        let owner = console
            .ask("Name of person assigned to task: ")?
            .trim()
            .to_string();
        if users.contains(&owner) {
            break owner;
        }
        console.error("User does not exist. Please enter a valid username!")?;
    };

    let title = ask_field(console, "Title of Task: ")?;
    let description = ask_field(console, "Description of Task: ")?;

    // Past dates are accepted
    let due_date = loop {
        let raw = console.ask("Due date of task (YYYY-MM-DD): ")?;
        match parse_date(raw.trim()) {
            Some(date) => break date,
            None => {
                console.error("Invalid datetime format. Please use the format specified")?;
            }
        }
    };

    let today = (session.today)();
    session
        .tasks
        .add(&owner, &title, &description, due_date, today)
        .context("Failed to save new task")?;
    console.success("Task successfully added.")?;
    Ok(())
}

fn ask_field<R: BufRead, W: Write>(console: &mut Console<R, W>, prompt: &str) -> Result<String> {
    loop {
        let value = console.ask(prompt)?;
        match field_problem(&value) {
            Some(problem) => console.error(&problem)?,
            None => return Ok(value),
        }
    }
}
