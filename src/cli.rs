//! CLI definitions for CUSP Xymon.

use std::path::PathBuf;

use clap::Parser;

use cusp_xymon::config::Config;

/// CUSP Xymon CLI.
#[derive(Debug, Parser)]
#[command(name = "cusp-xymon")]
#[command(about = "Send CUSP state-of-health reports to a Xymon server")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Make noise
    #[arg(short, long)]
    pub verbose: bool,

    /// Don't actually send the messages
    #[arg(long)]
    pub dry_run: bool,

    /// Remove file after processing
    #[arg(long)]
    pub unlink: bool,

    /// File matching template
    #[arg(long = "match")]
    pub match_pattern: Option<String>,

    /// Maximum checkin age in seconds
    #[arg(long)]
    pub recent_secs: Option<u64>,

    /// Xymon server address
    #[arg(long, env = "XYMON_SERVER")]
    pub xymon: Option<String>,

    /// Checkin validity in seconds
    #[arg(long)]
    pub valid_secs: Option<u64>,

    /// Xymon host name
    #[arg(long)]
    pub host: Option<String>,

    /// Expected pre-event time
    #[arg(long)]
    pub pre: Option<f64>,

    /// Expected post-event time
    #[arg(long)]
    pub post: Option<f64>,

    /// Expected sampling rate
    #[arg(long)]
    pub rate: Option<f64>,

    /// Storage warning level in Mbytes
    #[arg(long)]
    pub storage_warning: Option<f64>,

    /// Storage error level in Mbytes
    #[arg(long)]
    pub storage_error: Option<f64>,

    /// Warning voltage level
    #[arg(long)]
    pub voltage_warning: Option<f64>,

    /// Voltage error level
    #[arg(long)]
    pub voltage_error: Option<f64>,

    /// Clock warning quality
    #[arg(long)]
    pub clock_warning: Option<f64>,

    /// Clock error quality
    #[arg(long)]
    pub clock_error: Option<f64>,

    /// Directories to walk
    pub dirs: Vec<PathBuf>,
}

impl Cli {
    /// Overlay command line values on a loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if self.dry_run {
            config.scan.dry_run = true;
        }
        if self.unlink {
            config.scan.unlink = true;
        }
        if let Some(pattern) = &self.match_pattern {
            config.scan.match_pattern = pattern.clone();
        }
        if let Some(secs) = self.recent_secs {
            config.scan.recent_secs = secs;
        }

        if let Some(server) = &self.xymon {
            config.xymon.server = server.clone();
        }
        if let Some(secs) = self.valid_secs {
            config.xymon.valid_secs = secs;
        }
        if let Some(host) = &self.host {
            config.xymon.host = host.clone();
        }

        let b = &mut config.bounds;
        for (flag, bound) in [
            (self.pre, &mut b.pre_event),
            (self.post, &mut b.post_event),
            (self.rate, &mut b.sampling_rate),
            (self.storage_warning, &mut b.storage_warning),
            (self.storage_error, &mut b.storage_error),
            (self.voltage_warning, &mut b.voltage_warning),
            (self.voltage_error, &mut b.voltage_error),
            (self.clock_warning, &mut b.clock_warning),
            (self.clock_error, &mut b.clock_error),
        ] {
            if let Some(value) = flag {
                *bound = value;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_keeps_config() {
        let cli = Cli::try_parse_from(["cusp-xymon", "/data/cusp"]).unwrap();
        let mut config = Config::default();
        cli.apply(&mut config);

        assert_eq!(cli.dirs, [PathBuf::from("/data/cusp")]);
        assert_eq!(config.bounds, Config::default().bounds);
        assert!(!config.scan.dry_run);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "cusp-xymon",
            "--dry-run",
            "--unlink",
            "--match",
            "*.xml",
            "--xymon",
            "xymon.example.net",
            "--host",
            "cusp-wel",
            "--valid-secs",
            "0",
            "--voltage-error",
            "10.5",
            "--rate",
            "100",
            "a",
            "b",
        ])
        .unwrap();

        let mut config = Config::default();
        cli.apply(&mut config);

        assert!(config.scan.dry_run);
        assert!(config.scan.unlink);
        assert_eq!(config.scan.match_pattern, "*.xml");
        assert_eq!(config.xymon.server, "xymon.example.net");
        assert_eq!(config.xymon.host, "cusp-wel");
        assert_eq!(config.xymon.valid_secs, 0);
        assert_eq!(config.bounds.voltage_error, 10.5);
        assert_eq!(config.bounds.sampling_rate, 100.0);
        assert_eq!(config.bounds.voltage_warning, 11.5);
        assert_eq!(cli.dirs.len(), 2);
    }

    #[test]
    fn test_invalid_number_rejected() {
        assert!(Cli::try_parse_from(["cusp-xymon", "--clock-error", "low"]).is_err());
    }
}
