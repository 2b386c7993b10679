use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use logwash::RecordStyle;
use logwash::areas::engine::LogWashingEngine;
use logwash::areas::session::Session;
use logwash::artifacts::core::OutputTarget;
use logwash::artifacts::graph::GraphGlyphTranslator;
use logwash::artifacts::log::options::{DEFAULT_ABBREV_LENGTH, RenderFlags, WashOptions};
use logwash::artifacts::margin::MarginSpec;
use std::io::{Read, Write};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "logwash",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Turn git history output into structured records",
    long_about = "Reads the text produced by git log, git cherry, git reflog, git stash list, \
    submodule logs or bisect traces and renders it as a structured document \
    with relative-age margins, graph glyphs and classified reflog subjects.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(flatten)]
    render: RenderArgs,

    #[arg(
        long,
        global = true,
        default_value = "warn",
        help = "Log filter used when RUST_LOG is unset"
    )]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RenderArgs {
    #[arg(long, global = true, default_value_t = DEFAULT_ABBREV_LENGTH, help = "Width of an abbreviated hash")]
    abbrev: usize,

    #[arg(long, global = true, help = "Stop a log after this many records")]
    limit: Option<usize>,

    #[arg(long, global = true, help = "Resolve inline color escapes in the input")]
    color: bool,

    #[arg(long, global = true, help = "Render ref labels after the message")]
    refs_after_message: bool,

    #[arg(long, global = true, help = "Draw the graph with box-drawing glyphs")]
    unicode_graph: bool,

    #[arg(long, global = true, help = "Render the graph before the hash")]
    no_align: bool,

    #[arg(long, global = true, help = "Recognize extended header blocks")]
    extended_header: bool,

    #[arg(long, global = true, help = "Do not highlight message keywords")]
    no_keywords: bool,

    #[arg(long, global = true, help = "Do not render the author/age margin")]
    no_margin: bool,

    #[arg(
        long,
        global = true,
        help = "Render flags as letters (c r a h k m), replacing the individual switches"
    )]
    flags: Option<String>,

    #[arg(long, global = true, help = "Remote names used to classify ref labels")]
    remote: Vec<String>,

    #[arg(long, global = true, help = "Total margin width")]
    margin_width: Option<usize>,

    #[arg(long, global = true, value_enum, help = "Duration unit rendering")]
    unit_width: Option<UnitWidth>,

    #[arg(long, global = true, help = "Measure ages from this Unix timestamp")]
    now: Option<i64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum UnitWidth {
    Abbreviated,
    Full,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "show",
        about = "Render history output as a document",
        long_about = "Washes the history output of the given style and prints the rendered \
        document, with margins aligned on the right. Pages when stdout is a terminal."
    )]
    Show {
        #[arg(index = 1, value_enum, help = "The style of history query that produced the input")]
        style: RecordStyle,
        #[arg(index = 2, help = "Input file; stdin when absent")]
        file: Option<PathBuf>,
    },
    #[command(
        name = "records",
        about = "Print washed records as tab-separated fields",
        long_about = "Prints hash, author, timestamp, refs, marker and message of every record, \
        one per line. A limited log ends with a '...' line carrying the limit."
    )]
    Records {
        #[arg(index = 1, value_enum, help = "The style of history query that produced the input")]
        style: RecordStyle,
        #[arg(index = 2, help = "Input file; stdin when absent")]
        file: Option<PathBuf>,
    },
    #[command(name = "age", about = "Format a number of seconds as a relative duration")]
    Age {
        #[arg(index = 1, allow_negative_numbers = true, help = "Elapsed seconds")]
        seconds: i64,
    },
    #[command(name = "classify", about = "Classify a reflog subject")]
    Classify {
        #[arg(index = 1, help = "The reflog subject, e.g. 'rebase -i (start)'")]
        subject: String,
    },
}

impl RenderArgs {
    fn flags(&self) -> Result<RenderFlags> {
        if let Some(letters) = &self.flags {
            return RenderFlags::try_parse(letters);
        }

        let mut flags = RenderFlags::default();
        flags.set(RenderFlags::RESOLVE_COLOR, self.color);
        flags.set(RenderFlags::REFS_AFTER_MESSAGE, self.refs_after_message);
        flags.set(RenderFlags::ALIGN_HASH, !self.no_align);
        flags.set(RenderFlags::EXTENDED_HEADER, self.extended_header);
        flags.set(RenderFlags::HIGHLIGHT_KEYWORDS, !self.no_keywords);
        flags.set(RenderFlags::SHOW_MARGIN, !self.no_margin);
        Ok(flags)
    }

    fn options(&self) -> Result<WashOptions> {
        let mut options = WashOptions {
            abbrev_length: self.abbrev,
            limit: self.limit,
            flags: self.flags()?,
            ..Default::default()
        };
        if self.unicode_graph {
            options.glyphs = GraphGlyphTranslator::new();
        }
        if !self.remote.is_empty() {
            options.remotes = self.remote.clone();
        }
        Ok(options)
    }

    /// Command line over environment over defaults
    fn margin(&self) -> Result<MarginSpec> {
        let mut margin = MarginSpec::load_from_env()?;
        if let Some(unit_width) = self.unit_width {
            margin = match unit_width {
                UnitWidth::Abbreviated => MarginSpec::abbreviated(margin.total_width()),
                UnitWidth::Full => MarginSpec::full(margin.total_width()),
            };
        }
        if let Some(width) = self.margin_width {
            margin = margin.with_total_width(width);
        }
        Ok(margin)
    }

    fn engine(&self) -> Result<LogWashingEngine> {
        let engine = LogWashingEngine::new(self.margin()?, self.options()?);
        Ok(match self.now {
            Some(now) => engine.with_now(now),
            None => engine,
        })
    }
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let output = OutputTarget::detect(matches!(cli.command, Commands::Show { .. }));
    let session = Session::new(cli.render.engine()?, output.writer(), output.paint());

    match &cli.command {
        Commands::Show { style, file } => session.show(read_input(file.as_ref())?, *style)?,
        Commands::Records { style, file } => session.records(read_input(file.as_ref())?, *style)?,
        Commands::Age { seconds } => session.age(*seconds)?,
        Commands::Classify { subject } => session.classify(subject)?,
    }

    session.writer().flush()?;
    drop(session);
    output.finish()
}
