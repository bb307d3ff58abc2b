//! Terminal host for the `todo_sync` core.
//!
//! # Design
//! The core never performs I/O. This crate supplies the pieces it leaves to
//! the host: a blocking `ureq` transport, command-line configuration, and a
//! line-oriented terminal that renders the view controller's state.

pub mod config;
pub mod transport;
pub mod ui;

pub use config::Config;
pub use transport::UreqTransport;
pub use ui::Terminal;
