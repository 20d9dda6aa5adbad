use crate::config::ScanConfig;
use crate::error::ConnectError;
use crate::types::{PortResult, ScanJob};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tokio::time::{self, Instant};
use tracing::{debug, info, trace, warn};

type PortQueue = Arc<Mutex<mpsc::Receiver<u16>>>;
type SharedResults = Arc<Mutex<Vec<PortResult>>>;

/// Scan one host's ports with a fixed-size pool of connect workers.
///
/// - Workers pull ports from a shared queue; closing the queue is what stops them.
/// - Each port gets one connect attempt bounded by `connect_timeout`, then one
///   banner read bounded by `read_timeout`. Failures just mean "not open".
/// - Returns only open ports, sorted ascending by port number.
pub async fn scan_host(host: &str, ports: &[u16], config: &ScanConfig) -> Vec<PortResult> {
    if ports.is_empty() {
        return Vec::new();
    }

    let workers = config.workers.clamp(1, ports.len());
    let host: Arc<str> = Arc::from(host);
    let (tx, rx) = mpsc::channel::<u16>(workers);
    let queue: PortQueue = Arc::new(Mutex::new(rx));
    let results: SharedResults = Arc::new(Mutex::new(Vec::new()));
    let start = Instant::now();

    debug!(%host, ports = ports.len(), workers, "starting worker pool");

    let mut set = JoinSet::new();
    for _ in 0..workers {
        set.spawn(worker(
            host.clone(),
            queue.clone(),
            results.clone(),
            config.clone(),
        ));
    }

    for &port in ports {
        // Only fails once every worker is gone.
        if tx.send(port).await.is_err() {
            break;
        }
    }
    drop(tx);

    while let Some(res) = set.join_next().await {
        if let Err(e) = res {
            warn!(%host, "scan worker failed: {e}");
        }
    }

    let mut entries = std::mem::take(&mut *results.lock().await);
    entries.sort_by_key(PortResult::port);

    info!(
        %host,
        open = entries.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "host scan finished"
    );
    entries
}

/// Run a [`ScanJob`] through [`scan_host`].
pub async fn scan_job(job: &ScanJob, config: &ScanConfig) -> Vec<PortResult> {
    scan_host(&job.host, &job.ports, config).await
}

async fn worker(host: Arc<str>, queue: PortQueue, results: SharedResults, config: ScanConfig) {
    loop {
        let next = queue.lock().await.recv().await;
        let Some(port) = next else { break };

        if let Some(entry) = probe_port(&host, port, &config).await {
            results.lock().await.push(entry);
        }
    }
}

/// One TCP connect attempt bounded by `timeout`.
pub async fn connect(host: &str, port: u16, timeout: Duration) -> Result<TcpStream, ConnectError> {
    match time::timeout(timeout, TcpStream::connect((host, port))).await {
        Ok(res) => Ok(res?),
        Err(_) => Err(ConnectError::TimedOut(timeout)),
    }
}

/// Connect to `host:port`, grab a banner and close.
///
/// `None` means the port did not accept a connection in time.
pub async fn probe_port(host: &str, port: u16, config: &ScanConfig) -> Option<PortResult> {
    let mut stream = match connect(host, port, config.connect_timeout).await {
        Ok(stream) => stream,
        Err(e) => {
            trace!(host, port, "no connection: {e}");
            return None;
        }
    };

    let banner = read_banner(&mut stream, config).await;
    drop(stream);

    debug!(host, port, banner_len = banner.len(), "port open");
    Some(PortResult::open(host, port, banner))
}

/// Single bounded read. Timeouts, errors and EOF all give an empty banner.
async fn read_banner(stream: &mut TcpStream, config: &ScanConfig) -> Vec<u8> {
    let mut buf = vec![0u8; config.banner_buf_size];
    match time::timeout(config.read_timeout, stream.read(&mut buf)).await {
        Ok(Ok(n)) => {
            buf.truncate(n);
            buf
        }
        _ => Vec::new(),
    }
}
