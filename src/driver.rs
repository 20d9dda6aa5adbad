use crate::config::{DispatchMode, ScanConfig};
use crate::scanner;
use crate::types::{PortResult, ScanJob};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::info;

/// Scan every target for the same ports and merge the per-host results.
///
/// Each host's results stay contiguous and port-ascending. In concurrent mode
/// the host blocks come back in completion order, and the worker budget in
/// `config` is split across the hosts in flight so the total number of open
/// sockets stays near `config.workers`.
pub async fn scan_targets(
    targets: &[String],
    ports: &[u16],
    config: &ScanConfig,
    mode: DispatchMode,
) -> Result<Vec<PortResult>> {
    let ports: Arc<[u16]> = Arc::from(ports);
    info!(
        targets = targets.len(),
        ports = ports.len(),
        ?mode,
        "dispatching scan"
    );

    match mode {
        DispatchMode::Sequential => Ok(scan_sequential(targets, ports, config).await),
        DispatchMode::Concurrent { max_hosts } => {
            scan_concurrent(targets, ports, config, max_hosts).await
        }
    }
}

async fn scan_sequential(
    targets: &[String],
    ports: Arc<[u16]>,
    config: &ScanConfig,
) -> Vec<PortResult> {
    let mut all = Vec::new();
    for host in targets {
        let job = ScanJob::new(host.as_str(), ports.clone());
        all.extend(scanner::scan_job(&job, config).await);
    }
    all
}

async fn scan_concurrent(
    targets: &[String],
    ports: Arc<[u16]>,
    config: &ScanConfig,
    max_hosts: usize,
) -> Result<Vec<PortResult>> {
    let in_flight = max_hosts.clamp(1, targets.len().max(1));
    let per_host = config.per_host(in_flight);
    let sem = Arc::new(Semaphore::new(in_flight));
    let mut set = JoinSet::new();

    for host in targets {
        let permit = sem.clone().acquire_owned().await?;
        let job = ScanJob::new(host.as_str(), ports.clone());
        let per_host = per_host.clone();

        set.spawn(async move {
            let _permit = permit; // released when this host is done
            scanner::scan_job(&job, &per_host).await
        });
    }

    let mut all = Vec::new();
    while let Some(res) = set.join_next().await {
        all.extend(res?);
    }
    Ok(all)
}
