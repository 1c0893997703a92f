//! Register command - Add a new user to the user store

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use super::console::{field_problem, Console};
use super::session::Session;
use crate::tracker::UserDirectory;

/// Prompt for a new username and a confirmed password, then append the user
///
/// A taken username re-prompts for the username; a mismatched confirmation
/// re-prompts for the confirmation only.
pub fn execute<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
) -> Result<()> {
    let mut users = UserDirectory::load(&session.users).context("Failed to load users")?;

    let username = loop {
        // Login trims its input, so stored credentials are trimmed too
        let username = console.ask("New Username: ")?.trim().to_string();
        if username.is_empty() {
            console.error("The username cannot be empty!")?;
        } else if let Some(problem) = field_problem(&username) {
            console.error(&problem)?;
        } else if users.contains(&username) {
            console
                .error("The username is already in use and please enter another username!")?;
        } else {
            break username;
        }
    };

    let password = loop {
        let password = console.ask("New Password: ")?.trim().to_string();
        match field_problem(&password) {
            Some(problem) => console.error(&problem)?,
            None => break password,
        }
    };

    loop {
        let confirm = console.ask("Confirm Password: ")?.trim().to_string();
        if confirm == password {
            break;
        }
        console.error("Passwords do not match! Please re-enter password.")?;
    }

    users
        .register(&session.users, &username, &password)
        .context("Failed to save new user")?;
    console.success("New user is registered successfully!")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::console::tests::{scripted, transcript};
    use crate::commands::login;
    use crate::commands::session::tests::session_in;
    use crate::tracker::AuthOutcome;
    use tempfile::TempDir;

    #[test]
    fn test_register_new_user() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir, "admin");
        let mut console = scripted(&["bob", "pw1", "pw1"]);

        execute(&mut session, &mut console).unwrap();

        let users = UserDirectory::load(&session.users).unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users.authenticate("bob", "pw1"), AuthOutcome::Success);
        assert!(transcript(console).contains("New user is registered successfully!"));
    }

    #[test]
    fn test_taken_username_reprompts() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir, "admin");
        execute(&mut session, &mut scripted(&["bob", "pw1", "pw1"])).unwrap();

        let mut console = scripted(&["bob", "carol", "pw2", "pw2"]);
        execute(&mut session, &mut console).unwrap();

        let out = transcript(console);
        assert!(out.contains("The username is already in use"));
        assert_eq!(out.matches("New Username: ").count(), 2);

        let users = UserDirectory::load(&session.users).unwrap();
        assert_eq!(users.len(), 3);
        assert_eq!(users.authenticate("bob", "pw1"), AuthOutcome::Success);
    }

    #[test]
    fn test_mismatched_confirmation_reprompts_confirmation_only() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir, "admin");
        let mut console = scripted(&["bob", "pw1", "pw2", "pw1"]);

        execute(&mut session, &mut console).unwrap();

        let out = transcript(console);
        assert!(out.contains("Passwords do not match!"));
        assert_eq!(out.matches("New Password: ").count(), 1);
        assert_eq!(out.matches("Confirm Password: ").count(), 2);

        let users = UserDirectory::load(&session.users).unwrap();
        assert_eq!(users.authenticate("bob", "pw1"), AuthOutcome::Success);
    }

    #[test]
    fn test_padded_credentials_can_log_in() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir, "admin");
        let mut console = scripted(&[" bob ", "pw1 ", "pw1 "]);

        execute(&mut session, &mut console).unwrap();

        let users = UserDirectory::load(&session.users).unwrap();
        assert_eq!(users.authenticate("bob", "pw1"), AuthOutcome::Success);

        let mut console = scripted(&["bob", "pw1 "]);
        let user = login::execute(&mut console, &session.users).unwrap();
        assert_eq!(user, "bob");
        assert!(!transcript(console).contains("Wrong password!"));
    }

    #[test]
    fn test_separator_in_username_rejected() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir, "admin");
        let mut console = scripted(&["bo;b", "", "bob", "pw", "pw"]);

        execute(&mut session, &mut console).unwrap();

        let out = transcript(console);
        assert!(out.contains("';' is not allowed here."));
        assert!(out.contains("The username cannot be empty!"));
        assert!(UserDirectory::load(&session.users).unwrap().contains("bob"));
    }
}
