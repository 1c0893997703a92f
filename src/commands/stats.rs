//! Stats command - Show user and task counts to the admin

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use std::io::{BufRead, Write};

use super::console::Console;
use super::session::Session;
use crate::tracker::users::ADMIN_USERNAME;
use crate::tracker::UserDirectory;

/// Counts shown by the statistics command
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Users currently in the user store
    pub users: usize,

    /// Tasks in the session's task table
    pub tasks: usize,
}

/// Gather statistics; users are re-read from disk
pub fn stats(session: &Session) -> Result<Stats> {
    let users = UserDirectory::load(&session.users).context("Failed to load users")?;
    Ok(Stats {
        users: users.len(),
        tasks: session.tasks.len(),
    })
}

/// Format stats for display
pub fn format_stats(stats: &Stats) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("Statistic"), Cell::new("Count")]);

    table.add_row(vec![
        Cell::new("Number of users"),
        Cell::new(stats.users),
    ]);
    table.add_row(vec![
        Cell::new("Number of tasks"),
        Cell::new(stats.tasks),
    ]);

    table.to_string()
}

/// Print statistics; does nothing for anyone but the admin
pub fn execute<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
) -> Result<()> {
    if session.user != ADMIN_USERNAME {
        tracing::debug!(user = %session.user, "statistics requested by non-admin");
        return Ok(());
    }

    let stats = stats(session)?;
    console.say(format_stats(&stats))
}
