//! # Report Processor
//!
//! Runs one report file through the whole pipeline:
//!
//! 1. Decode the XML document
//! 2. Drop it if the checkin is older than the `recent` cutoff
//! 3. Evaluate every aspect against the bounds
//! 4. Encode and send each finding, in order
//! 5. Optionally remove the file
//!
//! Failures never escape a single document. A transport failure is
//! logged and the remaining findings are still sent.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::cusp::loader::decode_report;
use crate::cusp::CuspReport;
use crate::error::Result;
use crate::evaluator::evaluate;
use crate::scan::find_reports;
use crate::transport::StatusSender;
use crate::xymon::encoder::encode_report;

/// What happened to one report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Findings were produced and (unless dry-run) sent
    Reported {
        findings: usize,
        sent: usize,
        failed: usize,
    },
    /// Report checked in before the `recent` cutoff
    TooOld { checkin: DateTime<Utc> },
}

/// Counters for a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub processed: usize,
    pub too_old: usize,
    pub errors: usize,
    pub sent: usize,
    pub failed: usize,
}

/// Report pipeline bound to one configuration and sender
pub struct Processor<S: StatusSender> {
    config: Config,
    sender: S,
}

impl<S: StatusSender> Processor<S> {
    pub fn new(config: Config, sender: S) -> Self {
        Self { config, sender }
    }

    /// Process every matching report below each directory
    pub async fn run(&self, dirs: &[PathBuf]) -> Result<Summary> {
        let pattern = glob::Pattern::new(&self.config.scan.match_pattern)?;
        let mut summary = Summary::default();

        for dir in dirs {
            info!("walking directory: {}", dir.display());
            for path in find_reports(dir, &pattern) {
                self.handle(&path, Utc::now(), &mut summary).await;
            }
        }

        Ok(summary)
    }

    /// Process one file, log the outcome and unlink it if configured
    pub async fn handle(&self, path: &Path, now: DateTime<Utc>, summary: &mut Summary) {
        debug!("process: {}", path.display());

        match self.process_at(path, now).await {
            Ok(Outcome::Reported { sent, failed, .. }) => {
                summary.processed += 1;
                summary.sent += sent;
                summary.failed += failed;
            }
            Ok(Outcome::TooOld { checkin }) => {
                info!("{}: file too old (checkin {})", path.display(), checkin);
                summary.too_old += 1;
            }
            Err(e) => {
                warn!("{}: {}", path.display(), e);
                summary.errors += 1;
            }
        }

        if self.config.scan.unlink {
            debug!("unlink: {}", path.display());
            if !self.config.scan.dry_run {
                if let Err(e) = fs::remove_file(path) {
                    warn!("{}: {}", path.display(), e);
                }
            }
        }
    }

    /// Decode and report one file as of `now`
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be decoded or its checkin time
    /// cannot be parsed.
    pub async fn process_at(&self, path: &Path, now: DateTime<Utc>) -> Result<Outcome> {
        let report = decode_report(path)?;
        self.report_at(&report, now).await
    }

    /// Evaluate a decoded report and send its findings
    pub async fn report_at(&self, report: &CuspReport, now: DateTime<Utc>) -> Result<Outcome> {
        let checkin = report.checkin()?;

        // A checkin in the future has no age and is never too old
        if let Ok(age) = (now - checkin).to_std() {
            if age > self.config.scan.recent() {
                return Ok(Outcome::TooOld { checkin });
            }
        }

        let findings = evaluate(report, &self.config.bounds, self.config.xymon.valid(), now)?;

        let mut sent = 0;
        let mut failed = 0;
        for finding in &findings {
            let message = encode_report(&self.config.xymon.host, finding);
            debug!("{}", message);

            if self.config.scan.dry_run {
                continue;
            }

            match self.sender.send(&self.config.xymon.server, &message).await {
                Ok(()) => sent += 1,
                Err(e) => {
                    warn!("{}.{}: {}", self.config.xymon.host, finding.aspect, e);
                    failed += 1;
                }
            }
        }

        Ok(Outcome::Reported {
            findings: findings.len(),
            sent,
            failed,
        })
    }
}
