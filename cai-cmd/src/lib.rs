//! Command implementations for the Compar'AI CLI.
//!
//! Every subcommand opens a fresh [`session::Session`] (the input file or the
//! built-in sample), applies the model/category selection and prints one
//! view. Where the data came from is written to stderr first. Nothing is
//! cached between invocations.

use clap::{Args, Subcommand};
use std::io::Write;

pub mod render;
pub mod session;
pub mod views;

use cai_data::efficiency::{COMPUTED_FORMULA, DOCUMENTED_DESCRIPTION};
use cai_data::report::Report;
use render::{emit, OutputFormat};
use session::Session;
use views::BestBy;

/// Input and selection flags shared by every data command.
#[derive(Args, Debug, Clone, Default)]
pub struct DataArgs {
    /// Benchmark table (.csv, .tsv, optionally .gz); the sample data is used when omitted
    #[arg(short = 'i', long)]
    pub input: Option<String>,

    /// Only include this model (repeatable; default: all models)
    #[arg(short = 'm', long = "model")]
    pub models: Vec<String>,

    /// Only include this question class (repeatable; default: all classes)
    #[arg(short = 'c', long = "category")]
    pub categories: Vec<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Command {
    /// Headline totals and means for the selection
    Overview {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Print the whole loaded table
    Dataset {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Print the selected observations (per-question and scatter series)
    Observations {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Per model and size averages, totals and efficiency
    Aggregates {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Rank every model and size by efficiency
    Ranking {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Best model per size and question class, or per question class only
    Best {
        #[command(flatten)]
        data: DataArgs,

        /// Grouping used to pick the winners
        #[arg(long, value_enum, default_value_t = BestBy::SizeCategory)]
        by: BestBy,
    },

    /// Normalized 0-100 quality, speed, energy, CO2 and overall scores
    Scores {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Mean latency ranking, or the per-question latency distribution
    Latency {
        #[command(flatten)]
        data: DataArgs,

        /// Show min/quartiles/max per model and size instead of the ranking
        #[arg(long)]
        distribution: bool,
    },

    /// Mean quality per question class and question
    Heatmap {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Every view as a single JSON document
    Report {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Describe how the efficiency score is calculated
    Explain,
}

pub fn run(command: Command) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    execute(command, &mut stdout.lock(), &mut stderr.lock())
}

fn open<E: Write>(data: &DataArgs, notes: &mut E) -> anyhow::Result<Session> {
    let session = Session::open(data.input.as_deref())?;
    writeln!(notes, "{}", session.source_note())?;
    session.select(&data.models, &data.categories)?;
    Ok(session)
}

/// Run `command`, writing its view to `out` and the data source note to `notes`.
pub fn execute<W: Write, E: Write>(
    command: Command,
    out: &mut W,
    notes: &mut E,
) -> anyhow::Result<()> {
    match command {
        Command::Overview { data } => emit(out, data.format, &views::overview(&open(&data, notes)?)?),
        Command::Dataset { data } => emit(out, data.format, &views::dataset(&open(&data, notes)?)?),
        Command::Observations { data } => {
            emit(out, data.format, &views::observations(&open(&data, notes)?)?)
        }
        Command::Aggregates { data } => emit(out, data.format, &views::aggregates(&open(&data, notes)?)?),
        Command::Ranking { data } => emit(out, data.format, &views::ranking(&open(&data, notes)?)?),
        Command::Best { data, by } => emit(out, data.format, &views::best(&open(&data, notes)?, by)?),
        Command::Scores { data } => emit(out, data.format, &views::scores(&open(&data, notes)?)?),
        Command::Latency { data, distribution } => {
            let session = open(&data, notes)?;
            if distribution {
                emit(out, data.format, &views::latency_distribution(&session)?)
            } else {
                emit(out, data.format, &views::latency(&session)?)
            }
        }
        Command::Heatmap { data } => emit(out, data.format, &views::heatmap(&open(&data, notes)?)?),
        Command::Report { data } => {
            let session = open(&data, notes)?;
            let report = Report::build(&session.db, session.source.clone(), session.columns.clone())?;
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
            Ok(())
        }
        Command::Explain => {
            writeln!(out, "{}", DOCUMENTED_DESCRIPTION)?;
            writeln!(out)?;
            writeln!(out, "Ranking tables currently use: {}", COMPUTED_FORMULA)?;
            Ok(())
        }
    }
}
