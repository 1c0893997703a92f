//! task-tracker library
//!
//! Flat-file record stores for users and tasks, and the user directory and
//! task table built on top of them.

pub mod config;
pub mod error;
pub mod tracker;
