// Library entry point
pub mod chart;
pub mod config;
pub mod constants;
pub mod dispatcher;
pub mod error;
pub mod format;
pub mod logging;
pub mod model;
pub mod report;
pub mod store;
