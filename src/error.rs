use std::time::Duration;
use thiserror::Error;

/// Errors from parsing a textual port specification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PortSpecError {
    #[error("wrong range format: {0}")]
    MalformedRange(String),

    #[error("invalid port number: {0}")]
    InvalidNumber(String),

    #[error("invalid range order: {start} > {end}")]
    InvertedRange { start: u32, end: u32 },

    #[error("port out of range (max 65535): {0}")]
    OutOfRange(String),
}

/// Errors from expanding a target specification.
#[derive(Error, Debug)]
pub enum TargetError {
    #[error("{0}")]
    Cidr(#[from] ipnet::AddrParseError),

    #[error("CIDR block {cidr} has {count} addresses (limit {limit})")]
    TooLarge {
        cidr: String,
        count: u128,
        limit: u128,
    },

    #[error("no targets given")]
    Empty,
}

/// Why a connect attempt did not produce a stream. Never surfaced past the scanner.
#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("connect timed out after {0:?}")]
    TimedOut(Duration),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
