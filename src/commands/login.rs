//! Login command - Retry until a username/password pair matches

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use super::console::Console;
use crate::tracker::{AuthOutcome, RecordStore, UserDirectory};

/// Prompt for credentials until they match, returning the username
///
/// The directory is reloaded on every attempt so users registered by an
/// earlier session are always visible. There is no attempt limit.
pub fn execute<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &RecordStore,
) -> Result<String> {
    loop {
        console.say("")?;
        console.say("***LOGIN***")?;
        let username = console.ask("Username: ")?.trim().to_string();
        let password = console.ask("Password: ")?.trim().to_string();

        let users = UserDirectory::load(store).context("Failed to load users")?;
        match users.authenticate(&username, &password) {
            AuthOutcome::Success => {
                console.success("Login successful!")?;
                tracing::info!(%username, "logged in");
                return Ok(username);
            }
            AuthOutcome::UserNotFound => {
                tracing::debug!(%username, "login for unknown user");
                console.error("User does not exist!")?;
            }
            AuthOutcome::WrongPassword => {
                tracing::debug!(%username, "login with wrong password");
                console.error("Wrong password!")?;
            }
        }
    }
}
