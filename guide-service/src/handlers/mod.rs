//! HTTP handlers for the guide service.

pub mod guide;
pub mod health;
