use serde::{Serialize, Serializer};
use std::sync::Arc;

/// State of a reported port. Closed and filtered ports are never reported.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortState {
    Open,
}

impl std::fmt::Display for PortState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortState::Open => f.write_str("Open"),
        }
    }
}

/// One open port found on a host, with whatever the service sent first.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PortResult {
    host: String,
    port: u16,
    state: PortState,
    #[serde(serialize_with = "serialize_banner")]
    banner: Vec<u8>,
}

impl PortResult {
    pub fn open(host: impl Into<String>, port: u16, banner: Vec<u8>) -> Self {
        Self {
            host: host.into(),
            port,
            state: PortState::Open,
            banner,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn state(&self) -> PortState {
        self.state
    }

    /// Raw banner bytes as captured, unsanitized.
    pub fn banner(&self) -> &[u8] {
        &self.banner
    }
}

// Raw bytes go out as a string; control bytes survive as JSON escapes.
fn serialize_banner<S: Serializer>(banner: &[u8], s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&String::from_utf8_lossy(banner))
}

/// A host paired with the full port list to probe on it.
#[derive(Debug, Clone)]
pub struct ScanJob {
    pub host: String,
    pub ports: Arc<[u16]>,
}

impl ScanJob {
    pub fn new(host: impl Into<String>, ports: Arc<[u16]>) -> Self {
        Self {
            host: host.into(),
            ports,
        }
    }
}
