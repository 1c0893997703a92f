//! Interactive commands

pub mod add_task;
pub mod console;
pub mod login;
pub mod register;
pub mod session;
pub mod stats;
pub mod view;
