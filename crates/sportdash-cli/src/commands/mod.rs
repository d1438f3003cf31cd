pub mod batch;
pub mod config;
pub mod date;
pub mod output;
pub mod parse;
