use clap::Subcommand;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use traitscope_core::{
    AggregateStats, Config, DateStyle, DisplayTimezone, HistorySource, JsonFileSource, TestRecord,
};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Summary statistics over a saved history file
    Stats {
        /// JSON history (`{"history": [...]}` or a bare array), newest first
        #[arg(long)]
        file: PathBuf,
        /// How many records to include in the recent list
        #[arg(long)]
        recent: Option<usize>,
    },
    /// List past results with localized dates
    List {
        #[arg(long)]
        file: PathBuf,
        /// Output records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one result with its probabilities and advice
    Show {
        #[arg(long)]
        file: PathBuf,
        /// Record id
        #[arg(long)]
        id: String,
        /// Output the record as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Count and share of one prediction label.
#[derive(Debug, Serialize)]
struct LabelShare<'a> {
    label: &'a str,
    count: usize,
    percent: f64,
}

#[derive(Serialize)]
struct StatsReport<'a> {
    #[serde(flatten)]
    stats: &'a AggregateStats,
    shares: Vec<LabelShare<'a>>,
    recent: &'a [TestRecord],
}

fn label_shares(stats: &AggregateStats) -> Vec<LabelShare<'_>> {
    stats
        .breakdown
        .iter()
        .map(|(label, count)| LabelShare {
            label: label.as_str(),
            count: *count,
            percent: (stats.share_of(label) * 1000.0).round() / 10.0,
        })
        .collect()
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut stdout = std::io::stdout().lock();

    match action {
        HistoryAction::Stats { file, recent } => {
            let records = JsonFileSource::new(file).history()?;
            let mut aggregator = config.aggregator();
            if let Some(n) = recent {
                aggregator.recent_count = n;
            }
            let stats = aggregator.aggregate(&records);
            let report = StatsReport {
                stats: &stats,
                shares: label_shares(&stats),
                recent: aggregator.recent(&records),
            };
            writeln!(stdout, "{}", serde_json::to_string_pretty(&report)?)?;
        }
        HistoryAction::List { file, json } => {
            let records = JsonFileSource::new(file).history()?;
            if json {
                writeln!(stdout, "{}", serde_json::to_string_pretty(&records)?)?;
                return Ok(());
            }
            let stats = config.aggregator().aggregate(&records);
            write_list(&mut stdout, &records, &stats, &config.timezone(), config.display.date_style)?;
        }
        HistoryAction::Show { file, id, json } => {
            let records = JsonFileSource::new(file).history()?;
            let record = records
                .iter()
                .find(|r| r.id == id)
                .ok_or_else(|| format!("no test with id {id}"))?;
            if json {
                writeln!(stdout, "{}", serde_json::to_string_pretty(record)?)?;
            } else {
                write_result(&mut stdout, record, &config.timezone(), config.display.date_style)?;
            }
        }
    }
    Ok(())
}

fn write_list<W: Write>(
    out: &mut W,
    records: &[TestRecord],
    stats: &AggregateStats,
    tz: &DisplayTimezone,
    style: DateStyle,
) -> std::io::Result<()> {
    if records.is_empty() {
        return writeln!(out, "No tests taken yet");
    }
    for record in records {
        writeln!(
            out,
            "{:<8} {:<24} {:<12} {:>3}% ({})",
            record.id,
            tz.format(record.created_at, style),
            record.prediction,
            record.confidence_percent(),
            record.confidence_tier()
        )?;
    }
    writeln!(out)?;
    for share in label_shares(stats) {
        writeln!(out, "{:<12} {:>3} ({:.1}%)", share.label, share.count, share.percent)?;
    }
    Ok(())
}

/// Full view of a single result. Advice sections that are missing or empty
/// are left out.
fn write_result<W: Write>(
    out: &mut W,
    record: &TestRecord,
    tz: &DisplayTimezone,
    style: DateStyle,
) -> std::io::Result<()> {
    writeln!(out, "Test {} ({})", record.id, tz.format(record.created_at, style))?;
    writeln!(
        out,
        "Prediction: {} ({}% confidence, {})",
        record.prediction,
        record.confidence_percent(),
        record.confidence_tier()
    )?;

    let ranked = record.ranked_probabilities();
    if !ranked.is_empty() {
        writeln!(out, "\nProbabilities:")?;
        for (label, p) in ranked {
            writeln!(out, "  {:<12} {:>5.1}%", label, p * 100.0)?;
        }
    }

    let Some(advice) = record.advice.as_ref().filter(|a| !a.is_empty()) else {
        return Ok(());
    };
    if let Some(description) = advice.description.as_deref().filter(|d| !d.is_empty()) {
        writeln!(out, "\n{description}")?;
    }
    for (heading, items) in [
        ("Strengths", &advice.strengths),
        ("Advice", &advice.advice),
        ("Career suggestions", &advice.career_suggestions),
    ] {
        if items.is_empty() {
            continue;
        }
        writeln!(out, "\n{heading}:")?;
        for item in items {
            writeln!(out, "  - {item}")?;
        }
    }
    Ok(())
}
