//! Domain types and pure logic for the kanban board.
//!
//! This crate has no database or HTTP dependencies so it can be shared by the
//! repository layer, the service layer and both external façades.

pub mod activity;
pub mod error;
pub mod export;
pub mod search;
pub mod task;
pub mod types;
pub mod validation;
