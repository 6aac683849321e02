//! HTTP layer.

pub mod crud;
