//! Scan orchestration: strategies -> analyzer -> records.

use crate::analysis::{BinaryAnalysis, BinaryAnalyzer, ProbeRunner};
use crate::{Candidate, DetectionMethod, InstallationRecord, ScanContext, ScanOptions};
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

/// Run every enabled detection method and analyze all candidates.
///
/// # Scan Process
///
/// 1. Capture the scan timestamp and host name once
/// 2. Run each enabled detection method in report order
/// 3. Analyze each candidate (properties probe, elevated retry, `-version`)
/// 4. Classify the license requirement of each record
///
/// A detection method that fails is logged and contributes no records; the
/// scan carries on with the next one. Candidates that cannot be analyzed
/// are still returned, with `valid == false`.
///
/// # Example
///
/// ```rust,no_run
/// use java_scanner::{scan, DetectionMethod, ScanOptions};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let options = ScanOptions {
///         methods: vec![DetectionMethod::CurrentPath],
///         ..Default::default()
///     };
///     for record in scan(&options).await {
///         println!("{} {} {}", record.exe.display(), record.major_version, record.valid);
///     }
/// }
/// ```
pub async fn scan(options: &ScanOptions) -> Vec<InstallationRecord> {
    scan_with_context(options, &ScanContext::capture()).await
}

/// [`scan`] with a caller-supplied context, so the caller knows the scan
/// timestamp even when no record is produced.
pub async fn scan_with_context(
    options: &ScanOptions,
    context: &ScanContext,
) -> Vec<InstallationRecord> {
    let analyzer = BinaryAnalyzer::from_options(options);

    let mut records = Vec::new();
    for method in options.enabled_methods() {
        records.extend(scan_method(method, options, &analyzer, context).await);
    }

    let valid = records.iter().filter(|record| record.valid).count();
    info!(total = records.len(), valid, "scan finished");
    records
}

/// Run one detection method and analyze its candidates.
pub async fn scan_method<P: ProbeRunner>(
    method: DetectionMethod,
    options: &ScanOptions,
    analyzer: &BinaryAnalyzer<P>,
    context: &ScanContext,
) -> Vec<InstallationRecord> {
    let candidates = match method.discover(options).await {
        Ok(candidates) => candidates,
        Err(e) => {
            warn!(method = %method, error = %e, "detection failed");
            return Vec::new();
        }
    };

    analyze_candidates(method, candidates, analyzer, context, options.concurrency).await
}

/// Analyze candidates, at most `concurrency` at a time.
///
/// Records come back in candidate order whatever the concurrency.
pub async fn analyze_candidates<P: ProbeRunner>(
    method: DetectionMethod,
    candidates: Vec<Candidate>,
    analyzer: &BinaryAnalyzer<P>,
    context: &ScanContext,
    concurrency: usize,
) -> Vec<InstallationRecord> {
    stream::iter(candidates)
        .map(|candidate| async move {
            let analysis = match &candidate.path {
                Some(path) => analyzer.analyze(path).await,
                None => BinaryAnalysis::failed("executable path of java process is unavailable"),
            };
            InstallationRecord::new(method, context, candidate, analysis)
        })
        .buffered(concurrency.max(1))
        .collect()
        .await
}
