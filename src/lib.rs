pub mod config;
pub mod error;
pub mod fetch;
pub mod infra;
pub mod parser;
pub mod scheduler;
pub mod sensor;
pub mod services;
pub mod timetable;
