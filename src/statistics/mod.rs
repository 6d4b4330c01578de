//! Responsible for behaviour related to logging statistics with a specific pre-fix and closing
//! line.
mod statistic_logging;

pub use statistic_logging::*;
