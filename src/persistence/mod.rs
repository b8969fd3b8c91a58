pub mod files;
pub mod repository;

pub use files::{
    atomic_write, checkins_file, ensure_stint_dir, get_stint_dir, init_local_stint, read_file,
    receipt_file, tasks_file,
};
pub use repository::{
    JsonRepository, MemoryRepository, Repository, RepositoryError, SCHEMA_VERSION,
};
