//! CLI entry point for the signal warrant analyzer.
//!
//! Provides subcommands for evaluating a site against all nine warrants,
//! listing the Table 4C-1 volume pairs, and looking up a single curve
//! threshold.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use signal_warrants::{
    engine::evaluate_all,
    output::{print_json, print_summary, write_counts_csv, write_json, write_summary_csv},
    series::TrafficSeries,
    site::SiteInputs,
    summary::{CountSummary, summarize},
    tables::{CurveTier, LaneKey, PedestrianFigure, ThresholdTier, VolumeCondition, WarrantTables},
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "signal_warrants")]
#[command(about = "Evaluate MUTCD traffic signal warrants", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Figure {
    /// Warrant 2 vehicular curve
    FourHour,
    /// Warrant 3 vehicular curve
    PeakHour,
    /// Warrant 4 four-hour pedestrian curve
    PedFourHour,
    /// Warrant 4 peak-hour pedestrian curve
    PedPeakHour,
}

#[derive(Clone, Copy, ValueEnum)]
enum Tier {
    #[value(name = "100")]
    Full,
    #[value(name = "70")]
    Reduced,
}

impl From<Tier> for CurveTier {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::Full => CurveTier::Full,
            Tier::Reduced => CurveTier::Reduced,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate all nine warrants for one site
    Evaluate {
        /// JSON file with site conditions and per-warrant inputs
        #[arg(short, long, value_name = "SITE_JSON")]
        site: PathBuf,

        /// CSV of hourly counts: Hour, Street 1 (vph), Street 2 (vph)
        #[arg(short, long, value_name = "COUNTS_CSV")]
        counts: PathBuf,

        /// Write the summary table to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write all verdicts with their evidence to this JSON file
        #[arg(long)]
        json: Option<PathBuf>,

        /// Write the normalized hourly counts to this CSV file
        #[arg(long)]
        counts_output: Option<PathBuf>,

        /// Also log every verdict as JSON
        #[arg(short, long, default_value_t = false)]
        verbose: bool,
    },
    /// List Table 4C-1 volume pairs for every lane configuration and tier
    Tables,
    /// Look up the minor-street threshold on one curve
    Threshold {
        #[arg(long, value_enum)]
        figure: Figure,

        /// Lanes on the major and minor approaches, e.g. "2x1"
        #[arg(long, default_value = "1x1")]
        lanes: String,

        #[arg(long, value_enum, default_value = "100")]
        tier: Tier,

        /// Major-street volume (vph)
        #[arg(long)]
        major: f64,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/signal_warrants.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("signal_warrants.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    // Reference tables are validated once and shared read-only.
    let tables = WarrantTables::mutcd_2009()?;

    match cli.command {
        Commands::Evaluate {
            site,
            counts,
            output,
            json,
            counts_output,
            verbose,
        } => {
            let inputs = SiteInputs::load(&site)?;
            let series = TrafficSeries::load(&counts)?;

            let count_summary = CountSummary::from_series(&series);
            info!(
                project = %inputs.project.project_name,
                location = %inputs.project.location,
                hours = count_summary.hours,
                hours_with_data = count_summary.hours_with_data,
                street1_total = count_summary.street1_total,
                street2_total = count_summary.street2_total,
                major = %count_summary.major,
                "Traffic counts loaded"
            );

            let evaluation = evaluate_all(&tables, &series, &inputs);
            let summary = summarize(&evaluation);
            print_summary(&summary);

            if verbose {
                print_json(&evaluation)?;
            }
            if let Some(path) = output {
                write_summary_csv(&path, &summary)?;
                info!(path = %path.display(), "Summary CSV written");
            }
            if let Some(path) = json {
                write_json(&path, &evaluation)?;
                info!(path = %path.display(), "Verdict JSON written");
            }
            if let Some(path) = counts_output {
                write_counts_csv(&path, &series)?;
                info!(path = %path.display(), "Counts CSV written");
            }
        }
        Commands::Tables => {
            for condition in [VolumeCondition::A, VolumeCondition::B] {
                for lane_key in LaneKey::ALL {
                    for tier in ThresholdTier::ALL {
                        let pair = tables.volume_pair(condition, lane_key, tier);
                        info!(
                            condition = ?condition,
                            lanes = %lane_key,
                            tier = %tier,
                            major_vph = pair.major_vph,
                            minor_vph = pair.minor_vph,
                            "Table 4C-1"
                        );
                    }
                }
            }
        }
        Commands::Threshold {
            figure,
            lanes,
            tier,
            major,
        } => {
            let lane_key = parse_lanes(&lanes)?;
            let tier = CurveTier::from(tier);
            let curve = match figure {
                Figure::FourHour => tables.four_hour_curve(lane_key, tier),
                Figure::PeakHour => tables.peak_hour_curve(lane_key, tier),
                Figure::PedFourHour => tables.pedestrian_curve(PedestrianFigure::FourHour, tier),
                Figure::PedPeakHour => tables.pedestrian_curve(PedestrianFigure::PeakHour, tier),
            };

            match curve.threshold_for(major) {
                Some(threshold) => {
                    info!(lanes = %lane_key, tier = %tier, major, threshold, "Curve threshold")
                }
                None => info!(
                    lanes = %lane_key,
                    tier = %tier,
                    major,
                    min_major = curve.min_major(),
                    "Major volume below curve range"
                ),
            }
        }
    }

    Ok(())
}

/// Parses a lane configuration such as `2x1`.
fn parse_lanes(lanes: &str) -> Result<LaneKey> {
    let Some((major, minor)) = lanes.split_once(['x', 'X']) else {
        bail!("lane configuration must look like 2x1, got {lanes:?}");
    };
    Ok(LaneKey::from_lanes(
        major.trim().trim_end_matches('+').parse()?,
        minor.trim().trim_end_matches('+').parse()?,
    ))
}
