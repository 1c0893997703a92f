//! Interactive session: login, then the menu loop until exit

use anyhow::{Context, Result};
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use std::io::{BufRead, Write};

use super::console::Console;
use super::{add_task, login, register, stats, view};
use crate::config::Paths;
use crate::error::InputClosed;
use crate::tracker::users::SEED_ADMIN;
use crate::tracker::{RecordStore, TaskTable};

const MENU: &str = "Select one of the following options below:
  re - register            Register a user
  ad - add-task            Add a task
  va - view-all-tasks      View all tasks
  vm - view-my-tasks       View my tasks
  ds - display-statistics  Display statistics
  ex - exit                Exit";

/// State shared by the command handlers of one logged-in session
pub struct Session {
    /// Username that logged in
    pub user: String,
    pub users: RecordStore,
    pub tasks: TaskTable,
    /// Source of "today" for assigned and rescheduled dates
    pub today: fn() -> NaiveDate,
}

/// What the menu loop does after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Register,
    AddTask,
    ViewAllTasks,
    ViewMyTasks,
    DisplayStatistics,
    Exit,
}

impl MenuChoice {
    /// Accepts the full command name or its two-letter code, in any case
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "re" | "register" => Some(Self::Register),
            "ad" | "add-task" => Some(Self::AddTask),
            "va" | "view-all-tasks" => Some(Self::ViewAllTasks),
            "vm" | "view-my-tasks" => Some(Self::ViewMyTasks),
            "ds" | "display-statistics" => Some(Self::DisplayStatistics),
            "ex" | "exit" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Create missing data files and load the task table
pub fn open(paths: &Paths) -> Result<(RecordStore, TaskTable)> {
    let tasks_store = RecordStore::new(&paths.tasks_file);
    tasks_store
        .ensure_created("")
        .context("Failed to create task store")?;

    let users = RecordStore::new(&paths.users_file);
    users
        .ensure_created(SEED_ADMIN)
        .context("Failed to create user store")?;

    let tasks = TaskTable::load(tasks_store).context("Failed to load tasks")?;
    Ok((users, tasks))
}

/// Log in and serve menu commands until the user exits or input ends
pub fn run<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    users: RecordStore,
    tasks: TaskTable,
    today: fn() -> NaiveDate,
) -> Result<()> {
    match serve(console, users, tasks, today) {
        Err(err) if err.is::<InputClosed>() => {
            tracing::debug!("input closed, ending session");
            Ok(())
        }
        other => other,
    }
}

fn serve<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    users: RecordStore,
    tasks: TaskTable,
    today: fn() -> NaiveDate,
) -> Result<()> {
    let user = login::execute(console, &users)?;
    let mut session = Session {
        user,
        users,
        tasks,
        today,
    };

    loop {
        console.say("")?;
        console.say(MENU)?;
        let reply = console.ask("::>>> ")?;

        let flow = match MenuChoice::parse(&reply) {
            Some(choice) => dispatch(&mut session, console, choice)?,
            None => {
                console.say("You have made a wrong choice. Please try again!".red())?;
                Flow::Continue
            }
        };

        if flow == Flow::Exit {
            return Ok(());
        }
    }
}

fn dispatch<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
    choice: MenuChoice,
) -> Result<Flow> {
    match choice {
        MenuChoice::Register => register::execute(session, console)?,
        MenuChoice::AddTask => add_task::execute(session, console)?,
        MenuChoice::ViewAllTasks => view::execute_all(session, console)?,
        MenuChoice::ViewMyTasks => view::execute_mine(session, console)?,
        MenuChoice::DisplayStatistics => stats::execute(session, console)?,
        MenuChoice::Exit => {
            console.banner("Goodbye!!!")?;
            return Ok(Flow::Exit);
        }
    }
    Ok(Flow::Continue)
}
