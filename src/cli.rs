use crate::aggregate::CommitOrder;
use crate::model::DEFAULT_COMMIT_URL;
use crate::stats::HourSource;
use crate::window::Brush;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "locscope")]
#[command(about = "Commit history explorer for line-of-code datasets")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, global = true, env = "LOCSCOPE_DATA", default_value = "loc.csv", help = "Path to the line-of-code CSV")]
    pub data: PathBuf,

    #[arg(
        long,
        global = true,
        env = "LOCSCOPE_COMMIT_URL",
        default_value = DEFAULT_COMMIT_URL,
        help = "Base URL that commit ids are appended to"
    )]
    pub commit_url: String,

    #[arg(
        long,
        global = true,
        conflicts_with = "progress",
        help = "Only include commits up to this time (RFC3339, YYYY-MM-DD, or natural language)"
    )]
    pub until: Option<String>,

    #[arg(
        long,
        global = true,
        value_parser = clap::value_parser!(u8).range(0..=100),
        help = "Slider position between the first (0) and last (100) commit"
    )]
    pub progress: Option<u8>,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summary statistics for the visible commits
    Summary {
        #[arg(long, value_enum, default_value_t = HourSource::Lines, help = "Hours used for the time of day")]
        hours: HourSource,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// List commit summaries
    Commits {
        #[arg(long, value_enum, default_value_t = CommitOrder::FirstSeen)]
        order: CommitOrder,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Select commits with a rectangle over the 1000x600 scatter plot
    Select {
        #[arg(long, allow_hyphen_values = true, help = "Brush corners as x0,y0,x1,y1")]
        brush: Brush,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Lines per language over the visible commits
    Breakdown {
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Files ordered by number of lines
    Files {
        #[arg(long, help = "Maximum number of files to print")]
        limit: Option<usize>,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Project catalogue grouped by year
    Projects {
        #[arg(long, env = "LOCSCOPE_PROJECTS", default_value = "projects.json")]
        projects: PathBuf,

        #[arg(long, help = "Case-insensitive search over every project field")]
        query: Option<String>,

        #[arg(long, help = "Only list projects from this year")]
        year: Option<String>,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Interactive scatter plot with time slider and brush selection
    #[command(alias = "tui", alias = "ui")]
    Explore {
        #[arg(long, value_enum, default_value_t = HourSource::Lines)]
        hours: HourSource,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Summary { hours, json, ndjson } => {
                crate::report::summary::exec(self.common, hours, json, ndjson)
            }
            Commands::Commits { order, json, ndjson } => {
                crate::report::commits::exec(self.common, order, json, ndjson)
            }
            Commands::Select { brush, json } => crate::report::select::exec(self.common, brush, json),
            Commands::Breakdown { json } => crate::report::languages::exec(self.common, json),
            Commands::Files { limit, json, ndjson } => {
                crate::report::files::exec(self.common, limit, json, ndjson)
            }
            Commands::Projects { projects, query, year, json } => {
                crate::report::projects::exec(&projects, query.as_deref(), year.as_deref(), json)
            }
            Commands::Explore { hours } => crate::tui::run(&self.common, hours),
        }
    }
}
