//! Platform-agnostic building blocks: parsing, lookup tables, persistence and the
//! HTTP client. Nothing in here renders.

pub mod client;
pub mod config;
pub mod format;
pub mod history;
pub mod label;
pub mod remedies;
pub mod storage;
pub mod timing;
