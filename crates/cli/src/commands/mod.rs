//! CLI commands

pub mod init;
pub mod snapshot;
pub mod watch;
