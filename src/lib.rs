//! End-to-end test suite for the deployed task-tracker application.
//!
//! The library half of the binary: the application UI contract ([`app`]),
//! the scenario catalog ([`scenarios`]) and the command-line surface
//! ([`cli`]). Orchestration lives in `tracker-harness`; browser plumbing in
//! `tracker-driver`/`tracker-cdp`.

pub mod app;
pub mod cli;
pub mod scenarios;
