pub mod calendar;
pub mod config;
pub mod disciplines;
pub mod plan;
