//! Test modules for the handler bundle system
//!
//! Cross-component suites covering lazy loading and event dispatch, plus
//! the shared fixtures they are built from.

mod loading;
pub(crate) mod utils;
