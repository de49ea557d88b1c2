// Command-line entry point for Mutant Forge.

use anyhow::Context;
use clap::Parser;
use mutant_forge::application::{MutateUsecase, RunReport};
use mutant_forge::infrastructure::{
    load_settings, FileMutantWriter, JsonReportExporter, SourceLoader, SynBackend,
};
use mutant_forge::ports::ReportExporter;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Generates distinct syntactic mutants of a Rust program", long_about = None)]
struct Cli {
    /// Subject program to mutate
    source: PathBuf,

    /// Number of distinct mutants to generate
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    count: u64,

    /// Directory receiving <n>.<ext> mutant files
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// TOML file with mutation settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed override (defaults to COUNT)
    #[arg(long)]
    seed: Option<u64>,

    /// Write a JSON run report to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

fn init_tracing() {
    // MUTANT_FORGE_LOG_FORMAT=json switches to JSON lines.
    let log_format =
        std::env::var("MUTANT_FORGE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mutant_forge=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let subject = SourceLoader::load(&cli.source)?;

    let mut settings = match &cli.config {
        Some(path) => load_settings(path)?,
        None => Default::default(),
    };
    if let Some(seed) = cli.seed {
        settings = settings.with_seed(seed);
    }

    let num_mutants = usize::try_from(cli.count).context("COUNT does not fit in memory")?;
    let mut writer = FileMutantWriter::new(&cli.output_dir, subject.extension.as_str())
        .with_context(|| format!("Cannot create output directory {}", cli.output_dir.display()))?;

    let mut usecase = MutateUsecase {
        backend: &SynBackend,
        sink: &mut writer,
        settings,
    };
    let run = usecase
        .run(&subject.text, num_mutants)
        .with_context(|| format!("Mutating {}", subject.path.display()))?;

    if let Some(report_path) = &cli.report {
        let report = RunReport::from(&run).with_source(subject.path.display().to_string());
        JsonReportExporter
            .export(&report, report_path)
            .with_context(|| format!("Cannot write report {}", report_path.display()))?;
        info!(path = %report_path.display(), "run report written");
    }

    println!(
        "Generated {} mutants of {} in {} (size {}, height {}, duplicates found: {})",
        run.mutants.len(),
        subject.path.display(),
        writer.dir().display(),
        run.metrics.size,
        run.metrics.height,
        run.duplicates_found
    );
    for mutant in &run.mutants {
        for mutation in &mutant.mutations {
            println!("  {}: {}", writer.path_for(mutant.sequence_number).display(), mutation);
        }
    }
    Ok(())
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        tracing::error!("Error: {:#}", e);
        std::process::exit(1);
    }
}
