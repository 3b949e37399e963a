//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept a pool (or, where a caller needs atomicity, any SQLite
//! executor such as an open transaction) as the first argument.

pub mod activity_repo;
pub mod comment_repo;
pub mod dashboard_repo;
pub mod label_repo;
pub mod position;
pub mod project_repo;
pub mod task_repo;

pub use activity_repo::ActivityRepo;
pub use comment_repo::CommentRepo;
pub use dashboard_repo::DashboardRepo;
pub use label_repo::LabelRepo;
pub use position::PositionAllocator;
pub use project_repo::ProjectRepo;
pub use task_repo::TaskRepo;
