//! A small multi-user to-do service.
//!
//! Clients authenticate with a username/password pair, manage a personal
//! task list, and can share (copy) a task into another user's list. The
//! library crate holds the domain components, the storage seam, and the
//! HTTP routing; `main.rs` wires them up against Postgres.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
