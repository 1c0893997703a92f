//! Record stores and the user and task tables built on them

pub mod store;
pub mod tasks;
pub mod users;

pub use store::RecordStore;
pub use tasks::TaskTable;
pub use users::{AuthOutcome, UserDirectory};
