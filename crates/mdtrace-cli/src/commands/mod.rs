pub mod config_check;
pub mod demo;
