//! CLI command implementations.

pub mod check;
pub mod init;
pub mod lists;
pub mod scan;
