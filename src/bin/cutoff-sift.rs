use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use cutoff_sift::config::Config;
use cutoff_sift::ingest::{ingest_directory, validate_file, FileOutcome, IngestProcessor, IngestProgress};
use cutoff_sift::snapshot::SnapshotStore;
use cutoff_sift::utils::{discover_csv_files, format_duration, setup_logging};

#[derive(Parser)]
#[command(name = "cutoff-sift")]
#[command(about = "📚 Cutoff Sift: seat-allotment CSV ingestion and normalization")]
#[command(version)]
struct Args {
    #[arg(short, long, help = "CSV file, or directory of CSV files, to ingest")]
    input: PathBuf,

    #[arg(short, long, help = "Snapshot file holding the normalized dataset (overrides config)")]
    snapshot: Option<PathBuf>,

    #[arg(short, long, default_value = "config.json", help = "Configuration file")]
    config: PathBuf,

    #[arg(short, long, help = "Verbose output")]
    verbose: bool,

    #[arg(long, help = "Validate and preview the input without ingesting it")]
    validate_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let start_time = Instant::now();

    let config = Config::load_or_default(&args.config).await?;
    let verbosity = if args.verbose { "verbose" } else { config.logging.verbosity.as_str() };
    setup_logging(verbosity)?;

    if !args.input.exists() {
        anyhow::bail!("Input does not exist: {}", args.input.display());
    }

    if args.validate_only {
        return validate_inputs(&args.input, &config).await;
    }

    let store = SnapshotStore::new(
        args.snapshot
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.io.snapshot_path)),
    );

    println!("🔍 Input: {}", args.input.display());
    println!("🗄️ Snapshot: {}", store.path().display());

    let existing = store.load().await?;
    println!("📊 Existing records: {}", existing.colleges.len());

    let shutdown_flag = Arc::new(AtomicBool::new(false));
    let shutdown_flag_clone = shutdown_flag.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("\n🛑 Shutdown signal received. Stopping at the next chunk...");
            shutdown_flag_clone.store(true, Ordering::Relaxed);
        }
    });

    let (progress_tx, progress_rx) = mpsc::unbounded_channel();
    let progress_printer = tokio::spawn(print_progress(progress_rx));

    let mut processor = IngestProcessor::new(config)?
        .with_shutdown_signal(shutdown_flag)
        .with_progress_channel(progress_tx);

    let dataset = if args.input.is_dir() {
        let batch = ingest_directory(&mut processor, &args.input, existing).await?;

        println!("\n📂 Files:");
        for outcome in &batch.files {
            let path = outcome.path().display();
            match outcome {
                FileOutcome::Ingested { summary, .. } => println!("  ✅ {}: {}", path, summary),
                FileOutcome::Rejected { reason, .. } => println!("  ⚠️ {}: rejected: {}", path, reason),
                FileOutcome::Failed { reason, .. } => println!("  ❌ {}: {}", path, reason),
            }
        }

        if batch.cancelled {
            println!("🛑 Batch cancelled; keeping files completed before the signal.");
        }
        println!(
            "✨ {} of {} files ingested, {} new records",
            batch.files_ingested(),
            batch.files.len(),
            batch.new_records_added()
        );
        batch.dataset
    } else {
        let report = processor.process_file(&args.input, existing).await?;

        for line in report.validation.describe() {
            println!("  {}", line);
        }
        println!("\n🎉 {}", report.summary);
        report.dataset
    };

    drop(processor);
    let _ = progress_printer.await;

    store.save(&dataset).await?;

    println!("💾 Snapshot saved: {} records", dataset.colleges.len());
    println!("🏫 Institutes: {}", dataset.institutes.len());
    println!("📘 Programs: {}", dataset.programs.len());
    println!("🏷️ Categories: {}", dataset.categories.len());
    println!("🔄 Rounds: {}", dataset.rounds.len());
    println!("⏱️ Processing time: {}", format_duration(start_time.elapsed()));

    Ok(())
}

async fn print_progress(mut progress_rx: mpsc::UnboundedReceiver<IngestProgress>) {
    while let Some(progress) = progress_rx.recv().await {
        println!(
            "⏳ {}% ({} / {} lines)",
            progress.rounded_percentage(),
            progress.processed_lines,
            progress.total_lines
        );
    }
}

async fn validate_inputs(input: &Path, config: &Config) -> Result<()> {
    let files = if input.is_dir() {
        discover_csv_files(input)?
    } else {
        vec![input.to_path_buf()]
    };

    let mut rejected = 0;
    for path in &files {
        println!("\n📄 {}", path.display());

        let report = match validate_file(path, &config.ingest).await {
            Ok(report) => report,
            Err(e) => {
                println!("  ❌ {}", e);
                rejected += 1;
                continue;
            }
        };

        for line in report.describe() {
            println!("  {}", line);
        }
        for row in &report.preview {
            println!(
                "  • {} | {} | {} | {}-{}",
                row.college, row.course, row.category, row.opening_rank, row.closing_rank
            );
        }

        match report.rejection(config.ingest.reject_invalid_rows) {
            Some(reason) => {
                println!("  ❌ Would be rejected: {}", reason);
                rejected += 1;
            }
            None => println!("  ✅ Ready to ingest"),
        }
    }

    if rejected > 0 {
        anyhow::bail!("{} of {} files would be rejected", rejected, files.len());
    }

    Ok(())
}
