//! Terminal front end: one module per subcommand plus shared styling.

pub mod advise;
pub mod chart;
pub mod platforms;
pub mod setup;
pub mod summary;
pub mod ui;
