//! Library crate for port-sweep exposing the scan engine and its helpers.
pub mod config;
pub mod driver;
pub mod error;
pub mod ports;
pub mod report;
pub mod scanner;
pub mod targets;
pub mod types;
