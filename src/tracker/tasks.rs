//! Task table: parsing, serialization, rendering and total-rewrite updates

use chrono::NaiveDate;

use super::store::{RecordStore, FIELD_SEPARATOR};
use crate::error::{Result, StoreError};

/// On-disk and display format for task dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const FIELD_COUNT: usize = 6;
const SEPARATOR_WIDTH: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub owner: String,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub assigned_date: NaiveDate,
    pub completed: bool,
}

impl Task {
    /// Serialize as `owner;title;description;due;assigned;Yes|No`
    pub fn to_record(&self) -> String {
        let due = self.due_date.format(DATE_FORMAT).to_string();
        let assigned = self.assigned_date.format(DATE_FORMAT).to_string();
        let separator = FIELD_SEPARATOR.to_string();

        [
            self.owner.as_str(),
            self.title.as_str(),
            self.description.as_str(),
            due.as_str(),
            assigned.as_str(),
            yes_no(self.completed),
        ]
        .join(separator.as_str())
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn parse_record(store: &RecordStore, line_no: usize, line: &str) -> Result<Task> {
    let fields = store.split_fields(line_no, line, FIELD_COUNT)?;

    let date = |raw: &str, name: &str| {
        parse_date(raw).ok_or_else(|| {
            store.malformed(line_no, format!("{name} '{raw}' is not a YYYY-MM-DD date"))
        })
    };

    Ok(Task {
        owner: fields[0].to_string(),
        title: fields[1].to_string(),
        description: fields[2].to_string(),
        due_date: date(fields[3], "due date")?,
        assigned_date: date(fields[4], "assigned date")?,
        completed: fields[5] == "Yes",
    })
}

/// All tasks of a session together with the store they came from
#[derive(Debug)]
pub struct TaskTable {
    store: RecordStore,
    tasks: Vec<Task>,
}

impl TaskTable {
    /// Parse every non-blank record of the task store
    pub fn load(store: RecordStore) -> Result<Self> {
        let tasks = store
            .records()?
            .into_iter()
            .map(|(line_no, line)| parse_record(&store, line_no, &line))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(count = tasks.len(), "loaded tasks");
        Ok(Self { store, tasks })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Create a task assigned today, append it to the store and keep it
    ///
    /// The owner is validated against the user directory by the caller.
    pub fn add(
        &mut self,
        owner: &str,
        title: &str,
        description: &str,
        due_date: NaiveDate,
        today: NaiveDate,
    ) -> Result<&Task> {
        let task = Task {
            owner: owner.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            due_date,
            assigned_date: today,
            completed: false,
        };

        self.store.append_line(&task.to_record())?;
        tracing::info!(owner, title, "added task");

        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Mark the task at `index` completed and rewrite the whole table
    pub fn mark_completed(&mut self, index: usize) -> Result<()> {
        self.task_mut(index)?.completed = true;
        self.rewrite()?;
        tracing::info!(index, "marked task completed");
        Ok(())
    }

    /// Move the due date of the task at `index` to `today` and rewrite
    pub fn reschedule(&mut self, index: usize, today: NaiveDate) -> Result<()> {
        self.task_mut(index)?.due_date = today;
        self.rewrite()?;
        tracing::info!(index, %today, "rescheduled task");
        Ok(())
    }

    fn task_mut(&mut self, index: usize) -> Result<&mut Task> {
        let len = self.tasks.len();
        self.tasks
            .get_mut(index)
            .ok_or(StoreError::NoSuchTask { index, len })
    }

    fn rewrite(&self) -> Result<()> {
        let lines: Vec<String> = self.tasks.iter().map(Task::to_record).collect();
        self.store.overwrite_all(lines.as_slice())
    }
}

fn render_task(out: &mut String, task: &Task) {
    let separator = "-".repeat(SEPARATOR_WIDTH);
    out.push_str(&separator);
    out.push('\n');
    out.push_str(&format!("Task Title: \t{}\n", task.title));
    out.push_str(&format!("Assigned to: \t{}\n", task.owner));
    out.push_str(&format!(
        "Date Assigned: \t{}\n",
        task.assigned_date.format(DATE_FORMAT)
    ));
    out.push_str(&format!("Due Date: \t{}\n", task.due_date.format(DATE_FORMAT)));
    out.push_str(&format!("Task Complete?: \t{}\n", yes_no(task.completed)));
    out.push_str(&format!("Task Description: \n   {}\n", task.description));
    out.push_str(&separator);
    out.push('\n');
}

/// Render every task in the given order
pub fn render_all(tasks: &[Task]) -> String {
    let mut out = String::new();
    for task in tasks {
        out.push('\n');
        render_task(&mut out, task);
    }
    out
}

/// Render only `user`'s tasks, numbered from 1 within that view
///
/// Returns the rendered text and the number of matching tasks.
pub fn render_mine(tasks: &[Task], user: &str) -> (String, usize) {
    let mut out = String::new();
    let mut count = 0;
    for task in tasks.iter().filter(|t| t.owner == user) {
        count += 1;
        out.push_str(&format!("\nTask Number(#): {count}\n"));
        render_task(&mut out, task);
    }
    (out, count)
}

/// Positions in the full list of `user`'s tasks, in view order
///
/// Entry `n - 1` is the full-list index of the task shown as number `n`
/// by [`render_mine`].
pub fn owned_indices(tasks: &[Task], user: &str) -> Vec<usize> {
    tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| t.owner == user)
        .map(|(i, _)| i)
        .collect()
}
