use std::time::Duration;

pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 1_000;
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 2_000;
pub const DEFAULT_BANNER_BUF_SIZE: usize = 4_096;
pub const DEFAULT_WORKERS: usize = 100;

/// Timing and sizing knobs for a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Bound on a single TCP connect attempt.
    pub connect_timeout: Duration,

    /// Bound on the single banner read after a successful connect.
    pub read_timeout: Duration,

    /// Maximum number of banner bytes kept per port.
    pub banner_buf_size: usize,

    /// Worker budget. For one host this is the pool size; across hosts it is
    /// shared out by [`ScanConfig::per_host`].
    pub workers: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
            read_timeout: Duration::from_millis(DEFAULT_READ_TIMEOUT_MS),
            banner_buf_size: DEFAULT_BANNER_BUF_SIZE,
            workers: DEFAULT_WORKERS,
        }
    }
}

impl ScanConfig {
    /// Config for one host when `hosts_in_flight` hosts share the worker budget.
    pub fn per_host(&self, hosts_in_flight: usize) -> ScanConfig {
        ScanConfig {
            workers: (self.workers / hosts_in_flight.max(1)).max(1),
            ..self.clone()
        }
    }
}

/// How the driver walks the target list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// One host at a time, each with the full worker budget.
    Sequential,
    /// Up to `max_hosts` hosts at once, splitting the worker budget.
    Concurrent { max_hosts: usize },
}

impl DispatchMode {
    pub fn from_max_hosts(max_hosts: usize) -> Self {
        if max_hosts <= 1 {
            DispatchMode::Sequential
        } else {
            DispatchMode::Concurrent { max_hosts }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_scan_protocol() {
        let c = ScanConfig::default();
        assert_eq!(c.connect_timeout, Duration::from_secs(1));
        assert_eq!(c.read_timeout, Duration::from_secs(2));
        assert_eq!(c.banner_buf_size, 4096);
        assert_eq!(c.workers, 100);
    }

    #[test]
    fn per_host_splits_budget_and_never_hits_zero() {
        let c = ScanConfig::default();
        assert_eq!(c.per_host(1).workers, 100);
        assert_eq!(c.per_host(4).workers, 25);
        assert_eq!(c.per_host(300).workers, 1);
        assert_eq!(c.per_host(0).workers, 100);
    }

    #[test]
    fn one_host_means_sequential() {
        assert_eq!(DispatchMode::from_max_hosts(0), DispatchMode::Sequential);
        assert_eq!(DispatchMode::from_max_hosts(1), DispatchMode::Sequential);
        assert_eq!(
            DispatchMode::from_max_hosts(8),
            DispatchMode::Concurrent { max_hosts: 8 }
        );
    }
}
