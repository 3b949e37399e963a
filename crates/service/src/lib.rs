//! Task and project orchestration shared by the HTTP API and the agent tool
//! layer.
//!
//! Every operation follows the same sequence: validate input, check that
//! referenced rows exist, mutate (allocating a column rank where needed),
//! record activity, and return the enriched entity.

pub mod activity;
pub mod error;
pub mod locks;
mod service;

pub use error::{ServiceError, ServiceResult};
pub use service::views::{ANALYTICS_WINDOW_DAYS, RECENT_COMPLETIONS_LIMIT};
pub use service::KanbanService;
