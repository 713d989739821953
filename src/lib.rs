pub mod columns;
pub mod config;
pub mod grading;
pub mod output;
pub mod parser;
pub mod stats;
pub mod table;
