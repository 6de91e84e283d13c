//! CLI library components for the Tableau dimension mapper.

pub mod logging;
