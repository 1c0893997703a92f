//! View commands - List all tasks, or the current user's tasks with edits

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use super::console::Console;
use super::session::Session;
use crate::tracker::tasks::{owned_indices, render_all, render_mine};

const BACK: &str = "-1";

pub fn execute_all<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
) -> Result<()> {
    if session.tasks.is_empty() {
        console.say("There are no tasks yet.")?;
        return Ok(());
    }
    console.say(render_all(session.tasks.tasks()))
}

/// List the user's tasks, then optionally complete or reschedule one of them
///
/// Task numbers are the ones shown in this view, not positions in the
/// full task list.
pub fn execute_mine<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
) -> Result<()> {
    let (listing, count) = render_mine(session.tasks.tasks(), &session.user);
    if count == 0 {
        console.say("You have no tasks assigned.")?;
        return Ok(());
    }
    console.say(listing)?;

    let reply = console.ask(&format!(
        "Enter the task number to choose a task or '{BACK}' to return to the main menu: "
    ))?;
    let reply = reply.trim();
    if reply == BACK {
        return Ok(());
    }

    let number = match reply.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => n,
        _ => {
            console.error("There is no task with that number.")?;
            return Ok(());
        }
    };
    let index = owned_indices(session.tasks.tasks(), &session.user)[number - 1];

    let action = console
        .ask("Enter 'm' to mark the task as completed or 'e' to move its due date to today: ")?;
    match action.trim().to_lowercase().as_str() {
        "m" => {
            session
                .tasks
                .mark_completed(index)
                .context("Failed to update tasks")?;
            console.success("Task marked as completed successfully!")?;
        }
        "e" => {
            let today = (session.today)();
            session
                .tasks
                .reschedule(index, today)
                .context("Failed to update tasks")?;
            console.success("Task updated successfully!")?;
        }
        _ => console.error("You have made a wrong choice.")?,
    }
    Ok(())
}
