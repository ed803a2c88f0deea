//! samhita - TEI to JSON converter for the Rig Veda

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use samhita::{ConvertOptions, MetreFeature, check_file, convert_file};

#[derive(Parser)]
#[command(name = "samhita")]
#[command(version, about = "Convert TEI-encoded Rig Veda books to JSON", long_about = None)]
#[command(after_help = "EXAMPLES:
    samhita rv_book_10.tei mandala10.json                   Convert a book
    samhita --meter metre-feature rv_book_01.tei m1.json    Also read meters
    samhita --check mandala10.json                          Validate emitted JSON")]
struct Cli {
    /// Input TEI file (or JSON record with --check)
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output JSON file
    #[arg(value_name = "OUTPUT", required_unless_present = "check")]
    output: Option<String>,

    /// How hymn meters are resolved
    #[arg(long, value_enum, default_value_t = MeterSource::None, env = "SAMHITA_METER")]
    meter: MeterSource,

    /// Validate an emitted JSON record instead of converting
    #[arg(short, long)]
    check: bool,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MeterSource {
    /// Leave every meter as "Unknown"
    None,
    /// Read fs[@type='metre_info']/f[@name='metre'] below each hymn
    MetreFeature,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    let result = match (cli.check, &cli.output) {
        (true, _) => check(&cli.input, cli.quiet),
        (false, Some(output)) => convert(&cli.input, output, cli.meter, cli.quiet),
        (false, None) => Err("output path required".to_string()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(quiet: bool) {
    let default = if quiet { "samhita=warn" } else { "samhita=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stdout)
        .with_ansi(std::io::stdout().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

fn convert(input: &str, output: &str, meter: MeterSource, quiet: bool) -> Result<(), String> {
    let options = match meter {
        MeterSource::None => ConvertOptions::new(),
        MeterSource::MetreFeature => ConvertOptions::new().with_meter(MetreFeature),
    };

    if !quiet {
        println!("Parsing TEI file: {input}");
    }

    let conversion = convert_file(input, output, &options).map_err(|e| e.to_string())?;

    if !quiet {
        let stats = conversion.stats;
        println!("Found {} hymns", stats.hymns_seen);
        println!(
            "Skipped {} empty hymns and {} empty stanzas",
            stats.hymns_dropped, stats.stanzas_dropped
        );
        println!("Wrote JSON to {output}");
        println!(
            "Generated {} hymns with {} verses",
            conversion.corpus.sukta_count(),
            conversion.corpus.verse_count()
        );
    }

    Ok(())
}

fn check(path: &str, quiet: bool) -> Result<(), String> {
    if !quiet {
        println!("Validating {path}...");
    }

    let report = check_file(path).map_err(|e| e.to_string())?;

    if !quiet {
        println!("{report}");
    }
    for issue in &report.issues {
        println!("  {issue}");
    }

    if report.is_valid() {
        Ok(())
    } else {
        Err(format!("{} validation issue(s)", report.issues.len()))
    }
}
