//! Core infrastructure shared by the host

pub mod logging;
pub mod options;
