pub mod activity;
pub mod comment;
pub mod dashboard;
pub mod export;
pub mod health;
pub mod label;
pub mod project;
pub mod task;
