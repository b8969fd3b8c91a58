pub mod enums;
pub mod task;

pub use enums::{Page, TaskStatus, UiMode};
pub use task::{format_clock, format_hm, format_hms, Task};
