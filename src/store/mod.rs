pub mod checkins;
pub mod tasks;

pub use checkins::{today, CheckInStore};
pub use tasks::TaskStore;
