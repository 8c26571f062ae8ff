//! CLI command handlers

pub mod encode;
pub mod inspect;
