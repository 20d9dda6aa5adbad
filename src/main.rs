use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};

use port_sweep::config::{DispatchMode, ScanConfig, DEFAULT_BANNER_BUF_SIZE};
use port_sweep::{driver, ports, report, targets};

use anyhow::Result;
use clap::Parser;
use tracing::Level;

/// port-sweep: concurrent TCP connect port scanner with banner capture.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "port-sweep",
    version,
    about = "Concurrent TCP connect port scanner with banner capture.",
    long_about = None
)]
struct Cli {
    /// Target IP, hostname or CIDR (e.g. 192.168.1.1 or 192.168.1.0/24). Comma-separate several.
    #[arg(long, default_value = "127.0.0.1")]
    target: String,

    /// Ports to scan (e.g. 80,443,8000-8080).
    #[arg(long, default_value = "80,443")]
    ports: String,

    /// First port of an inclusive range; overrides --ports.
    #[arg(long, requires = "end")]
    start: Option<u16>,

    /// Last port of an inclusive range; overrides --ports.
    #[arg(long, requires = "start")]
    end: Option<u16>,

    /// Worker budget: max concurrent connect attempts.
    #[arg(long, default_value_t = 100)]
    threads: usize,

    /// Hosts scanned in parallel; they share the --threads budget.
    #[arg(long, default_value_t = 1)]
    hosts: usize,

    /// Socket connect timeout in milliseconds.
    #[arg(long = "timeout-ms", default_value_t = 1000)]
    timeout_ms: u64,

    /// Banner read timeout in milliseconds.
    #[arg(long = "read-timeout-ms", default_value_t = 2000)]
    read_timeout_ms: u64,

    /// Write results as indented JSON to this path.
    #[arg(long)]
    json: Option<PathBuf>,

    /// More log output on stderr (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let port_list = match (cli.start, cli.end) {
        (Some(start), Some(end)) => ports::port_range(start, end),
        _ => ports::parse_ports_str(&cli.ports),
    };
    let port_list = match port_list {
        Ok(p) => p,
        Err(e) => {
            println!("Error parsing ports: {e}");
            process::exit(1);
        }
    };

    let target_list = match targets::parse_targets(&cli.target) {
        Ok(t) => t,
        Err(e) => {
            println!("Error parsing targets: {e}");
            process::exit(1);
        }
    };

    let config = ScanConfig {
        connect_timeout: Duration::from_millis(cli.timeout_ms),
        read_timeout: Duration::from_millis(cli.read_timeout_ms),
        banner_buf_size: DEFAULT_BANNER_BUF_SIZE,
        workers: cli.threads.max(1),
    };
    let mode = DispatchMode::from_max_hosts(cli.hosts);

    println!(
        "Scanning {} targets for {} ports...",
        target_list.len(),
        port_list.len()
    );
    let started_at = report::now_rfc3339();
    let start = Instant::now();

    let results = driver::scan_targets(&target_list, &port_list, &config, mode).await?;

    print!(
        "{}",
        report::render_report(
            &results,
            &started_at,
            start.elapsed(),
            target_list.len() > 1
        )
    );

    if let Some(path) = cli.json.as_deref().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = report::write_results_json(path, &results) {
            println!("Error writing JSON: {e:#}");
            return Ok(());
        }
        println!("\n[+] Results saved to {} successfully!", path.display());
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}
