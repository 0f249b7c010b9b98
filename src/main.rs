use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use sentalign::align::Aligner;
use sentalign::{config, input, validate, DynResult};

#[derive(Clone, Copy, ValueEnum, Debug)]
enum OutputFormat {
    /// Dump the whole document structure.
    Debug,
    /// One aligned pair per line: keys and texts, tab-separated.
    Tsv,
    /// Edges plus the deleted/inserted paragraph sets.
    Json,
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
struct Args {
    /// Source-language text file.
    source: PathBuf,
    /// Translation text file.
    dest: PathBuf,
    #[arg(short, long, default_value_t = OutputFormat::Tsv, value_enum)]
    format: OutputFormat,
    /// TOML file overriding the cost model parameters.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Stop after paragraph correction; produce no sentence edges.
    #[arg(long)]
    paragraphs_only: bool,
    /// Log specification, e.g. "info" or "sentalign=debug".
    #[arg(long, default_value = "warn")]
    log: String,
}

fn try_main() -> DynResult<()> {
    let args = Args::parse();
    let _logger = flexi_logger::Logger::try_with_env_or_str(&args.log)?.start()?;

    let config = match &args.config {
        Some(path) => config::load(path)?,
        None => config::Config::default(),
    };

    let mut doc = input::read_document(&args.source, &args.dest)?;
    let (deleted, inserted) = {
        let mut aligner = Aligner::with_params(&mut doc, config.cost);
        aligner.correct_paragraphs()?;
        if !args.paragraphs_only {
            aligner.align_sentences()?;
        }
        (
            aligner.deleted_paragraphs().clone(),
            aligner.inserted_paragraphs().clone(),
        )
    };

    validate::print_errors(&validate::validate(&doc));

    match args.format {
        OutputFormat::Debug => println!("{doc:#?}"),
        OutputFormat::Tsv => {
            for (x, y) in doc.edge_pairs() {
                println!(
                    "{}\t{}\t{}\t{}",
                    x.raw(),
                    y.raw(),
                    doc.text(x).unwrap_or(""),
                    doc.text(y).unwrap_or("")
                );
            }
        }
        OutputFormat::Json => {
            let edges: Vec<[usize; 2]> =
                doc.edge_pairs().iter().map(|&(x, y)| [x.raw(), y.raw()]).collect();
            let output = serde_json::json!({
                "edges": edges,
                "deleted_paragraphs": deleted,
                "inserted_paragraphs": inserted,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn main() {
    // If main() itself returns Result, Rust prints the error with Debug, not
    // Display.
    if let Err(e) = try_main() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
