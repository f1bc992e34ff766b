use anyhow::{Context, Result};
use clap::Parser;
use java_scanner::config::FileConfig;
use java_scanner::report::{self, DEFAULT_FINDINGS_FILE};
use java_scanner::{scan_with_context, DetectionMethod, ScanContext, ScanOptions};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Detect Java installations and running Java processes.
///
/// Without any --scan-* flag every detection method supported on this
/// platform runs.
#[derive(Parser, Debug)]
#[command(name = "java-scanner", version, about, long_about = None)]
struct Cli {
    /// Activate windows registry scanning
    #[arg(short = 'r', long)]
    scan_windows_registry: bool,

    /// Activate linux-alternatives scanning
    #[arg(short = 'a', long)]
    scan_linux_alternatives: bool,

    /// Activate running processes scanning
    #[arg(short = 'p', long)]
    scan_running_processes: bool,

    /// Activate scanning of current path
    #[arg(short = 'c', long)]
    scan_current_path: bool,

    /// Activate file system scanning
    #[arg(short = 'f', long)]
    scan_file_system: bool,

    /// Root paths where the file system scan starts
    #[arg(short = 'R', long, value_delimiter = ',')]
    scan_file_system_root_paths: Vec<PathBuf>,

    /// Regular expressions of paths excluded from the file system scan
    #[arg(short = 'E', long, value_delimiter = ',')]
    scan_file_system_exclude_paths: Vec<String>,

    /// Append findings to the JSON-lines findings file
    #[arg(short = 'j', long)]
    append_to_findings_json: bool,

    /// Config file (default is $HOME/.java-scanner.toml)
    #[arg(long, env = "JAVA_SCANNER_CONFIG")]
    config: Option<PathBuf>,

    /// Directory the CSV export is written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Timeout for a single probe of a java binary, in seconds
    #[arg(long)]
    probe_timeout_secs: Option<u64>,

    /// Never retry probes through sudo
    #[arg(long)]
    no_elevation: bool,

    /// Number of java binaries probed at the same time
    #[arg(long)]
    concurrency: Option<usize>,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn selected_methods(&self) -> Vec<DetectionMethod> {
        [
            (self.scan_file_system, DetectionMethod::FileSystem),
            (self.scan_linux_alternatives, DetectionMethod::LinuxAlternatives),
            (self.scan_running_processes, DetectionMethod::RunningProcesses),
            (self.scan_windows_registry, DetectionMethod::WindowsRegistry),
            (self.scan_current_path, DetectionMethod::CurrentPath),
        ]
        .into_iter()
        .filter_map(|(enabled, method)| enabled.then_some(method))
        .collect()
    }

    fn apply(&self, options: &mut ScanOptions) {
        let methods = self.selected_methods();
        if !methods.is_empty() {
            options.methods = methods;
        }
        if !self.scan_file_system_root_paths.is_empty() {
            options.root_paths = self.scan_file_system_root_paths.clone();
        }
        if !self.scan_file_system_exclude_paths.is_empty() {
            options.exclude_patterns = self.scan_file_system_exclude_paths.clone();
        }
        if let Some(secs) = self.probe_timeout_secs {
            options.probe_timeout = Duration::from_secs(secs);
        }
        if self.no_elevation {
            options.elevation_command.clear();
        }
        if let Some(concurrency) = self.concurrency {
            options.concurrency = concurrency;
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Scan with the merged settings and write the reports; returns the CSV path.
async fn run(cli: &Cli, file_config: &FileConfig, context: &ScanContext) -> Result<PathBuf> {
    let mut options = ScanOptions::default();
    file_config.apply(&mut options);
    cli.apply(&mut options);

    let methods: Vec<&str> = options
        .enabled_methods()
        .iter()
        .map(DetectionMethod::display_name)
        .collect();
    tracing::info!(methods = %methods.join(" "), "starting scan");

    let records = scan_with_context(&options, context).await;

    let output_dir = cli
        .output_dir
        .clone()
        .or_else(|| file_config.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let csv_path = report::create_csv_file(&output_dir, context.timestamp, &records)
        .context("writing CSV export")?;

    if cli.append_to_findings_json || file_config.append_findings.unwrap_or(false) {
        let findings_file = file_config
            .findings_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FINDINGS_FILE));
        report::append_findings(&findings_file, &records).context("appending findings")?;
    }

    Ok(csv_path)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let file_config =
        FileConfig::discover(cli.config.as_deref()).context("loading configuration")?;
    run(&cli, &file_config, &ScanContext::capture()).await?;
    Ok(())
}
