pub mod cli;
pub mod compile_db;
pub mod config;
pub mod cppcheck;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod project_config;
