//! narwhal-solus - Solus community IRC bot
//!
//! Answers `.`-prefixed informational commands and lets admins keep the
//! development channel topic in step with the stable repository sync workflow.

pub mod client;
pub mod config;
pub mod error;
pub mod inbound;
pub mod session;
pub mod solus;
