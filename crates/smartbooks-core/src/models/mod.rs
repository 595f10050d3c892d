//! Data models for extracted invoice records.

pub mod config;
pub mod record;
