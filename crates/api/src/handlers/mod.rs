pub mod events;
pub mod subscribers;
pub mod tasks;
