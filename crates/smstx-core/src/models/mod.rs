//! Data models shared by the parser and its front ends.

pub mod config;
pub mod transaction;
