//! User directory: username to password mapping loaded from the user store

use std::collections::HashMap;

use super::store::{RecordStore, FIELD_SEPARATOR};
use crate::error::Result;

/// Seed record written when the user store does not exist yet
pub const SEED_ADMIN: &str = "admin;password";

/// The only user allowed to see statistics
pub const ADMIN_USERNAME: &str = "admin";

/// Outcome of a login attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    Success,
    UserNotFound,
    WrongPassword,
}

#[derive(Debug, Default, Clone)]
pub struct UserDirectory {
    users: HashMap<String, String>,
}

impl UserDirectory {
    /// Parse every non-blank `username;password` record
    ///
    /// A username seen twice keeps the password from the later line.
    pub fn load(store: &RecordStore) -> Result<Self> {
        let mut users = HashMap::new();
        for (line_no, line) in store.records()? {
            let fields = store.split_fields(line_no, &line, 2)?;
            users.insert(fields[0].to_string(), fields[1].to_string());
        }
        Ok(Self { users })
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    pub fn authenticate(&self, username: &str, password: &str) -> AuthOutcome {
        match self.users.get(username) {
            None => AuthOutcome::UserNotFound,
            Some(stored) if stored != password => AuthOutcome::WrongPassword,
            Some(_) => AuthOutcome::Success,
        }
    }

    /// Append a new user record and add it to this directory
    ///
    /// Callers validate that the username is free and the password was
    /// confirmed before calling this.
    pub fn register(&mut self, store: &RecordStore, username: &str, password: &str) -> Result<()> {
        store.append_line(&format!("{username}{FIELD_SEPARATOR}{password}"))?;
        self.users.insert(username.to_string(), password.to_string());
        tracing::info!(username, "registered user");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use std::fs;
    use tempfile::TempDir;

    fn seeded_store(dir: &TempDir) -> RecordStore {
        let store = RecordStore::new(dir.path().join("user.txt"));
        store.ensure_created(SEED_ADMIN).unwrap();
        store
    }

    #[test]
    fn test_load_seeded_directory() {
        let dir = TempDir::new().unwrap();
        let users = UserDirectory::load(&seeded_store(&dir)).unwrap();

        assert_eq!(users.len(), 1);
        assert_eq!(users.authenticate("admin", "password"), AuthOutcome::Success);
    }

    #[test]
    fn test_authenticate_outcomes() {
        let dir = TempDir::new().unwrap();
        let users = UserDirectory::load(&seeded_store(&dir)).unwrap();

        assert_eq!(users.authenticate("nobody", "password"), AuthOutcome::UserNotFound);
        assert_eq!(users.authenticate("admin", "wrong"), AuthOutcome::WrongPassword);
        // Usernames are case-sensitive
        assert_eq!(users.authenticate("Admin", "password"), AuthOutcome::UserNotFound);
    }

    #[test]
    fn test_registered_user_survives_reload() {
        let dir = TempDir::new().unwrap();
        let store = seeded_store(&dir);
        let mut users = UserDirectory::load(&store).unwrap();

        users.register(&store, "bob", "pw1").unwrap();
        assert!(users.contains("bob"));

        let reloaded = UserDirectory::load(&store).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.authenticate("bob", "pw1"), AuthOutcome::Success);
    }

    #[test]
    fn test_duplicate_username_last_wins() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path().join("user.txt"));
        fs::write(store.path(), "bob;first\nadmin;password\nbob;second\n").unwrap();

        let users = UserDirectory::load(&store).unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users.authenticate("bob", "second"), AuthOutcome::Success);
        assert_eq!(users.authenticate("bob", "first"), AuthOutcome::WrongPassword);
    }

    #[test]
    fn test_malformed_user_line_aborts_load() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path().join("user.txt"));
        fs::write(store.path(), "admin;password\nbroken-line").unwrap();

        let err = UserDirectory::load(&store).unwrap_err();
        assert!(matches!(err, StoreError::MalformedRecord { line: 2, .. }));
    }
}
