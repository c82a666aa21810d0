use std::path::PathBuf;

use clap::{ArgGroup, Parser as ClapParser, ValueEnum};
use color_eyre::eyre::{bail, Result};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use symtree::input;
use symtree::report::{JsonFormatter, Report, ReportFormatter, TextFormatter};
use symtree::serena;
use symtree::symbols::DictOptions;

#[derive(ClapParser, Debug)]
#[command(
    name = "symtree",
    about = "Print language-server symbol trees as depth-limited dictionaries"
)]
#[command(group(ArgGroup::new("source").required(true).args(["input", "serena"])))]
struct Cli {
    /// JSON file holding one raw symbol record or an array of them.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Project root whose Serena symbol cache should be read.
    #[arg(long)]
    serena: Option<PathBuf>,

    /// Include each symbol's kind label.
    #[arg(short, long)]
    kind: bool,

    /// Include start and end locations.
    #[arg(short, long)]
    location: bool,

    /// Include cached source bodies where available.
    #[arg(short, long)]
    body: bool,

    /// Levels of children to include.
    #[arg(long, default_value_t = 0)]
    depth: usize,

    /// Only print symbols whose name path matches (e.g. "MyClass/run").
    #[arg(long)]
    find: Option<String>,

    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Indent JSON output.
    #[arg(long)]
    pretty: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

impl Cli {
    fn dict_options(&self) -> DictOptions {
        DictOptions::new(self.kind, self.location, self.depth).with_body(self.body)
    }
}

fn init_logging(debug: bool, verbose: bool) {
    let level = if debug {
        Level::DEBUG
    } else if verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logging(cli.debug, cli.verbose);

    let files = match (&cli.input, &cli.serena) {
        (Some(path), _) => input::group_by_file(input::load_json_file(path)?),
        (None, Some(project)) => {
            let project = project.canonicalize().unwrap_or_else(|_| project.clone());
            serena::load_project(&project)?
        }
        (None, None) => bail!("Either --input or --serena is required"),
    };

    let report = Report::build(&files, cli.dict_options(), cli.find.as_deref());
    info!(
        "Serialized {} symbols from {} files",
        report.total_symbols(),
        report.files.len()
    );

    let output = match cli.format {
        Format::Json => JsonFormatter { pretty: cli.pretty }.format(&report)?,
        Format::Text => TextFormatter::default().format(&report)?,
    };
    println!("{}", output.trim_end());

    Ok(())
}
