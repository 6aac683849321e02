//! Common plumbing shared across modules.

pub mod config;
pub mod net;
