//! Data file locations

use std::path::{Path, PathBuf};

/// File holding `username;password` records
pub const USERS_FILE: &str = "user.txt";

/// File holding task records
pub const TASKS_FILE: &str = "tasks.txt";

/// Resolved locations of the two record stores
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub users_file: PathBuf,
    pub tasks_file: PathBuf,
}

impl Paths {
    /// Both files inside `data_dir`
    pub fn in_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            users_file: data_dir.join(USERS_FILE),
            tasks_file: data_dir.join(TASKS_FILE),
        }
    }

    /// Resolve from command-line flags; explicit file paths win over the directory
    pub fn resolve(
        data_dir: Option<PathBuf>,
        users_file: Option<PathBuf>,
        tasks_file: Option<PathBuf>,
    ) -> Self {
        let defaults = Self::in_dir(data_dir.unwrap_or_else(|| PathBuf::from(".")));
        Self {
            users_file: users_file.unwrap_or(defaults.users_file),
            tasks_file: tasks_file.unwrap_or(defaults.tasks_file),
        }
    }
}
