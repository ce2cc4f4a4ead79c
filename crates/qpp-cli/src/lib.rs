//! Command line front end for QRDA III to QPP conversion.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
