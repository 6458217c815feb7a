//! Followed TV shows: relative air-date labels for upcoming episodes and
//! optimistic unfollow against a remote follow service.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod follow;
pub mod formatting;
pub mod models;
pub mod schedule;
pub mod shutdown;
pub mod store;
