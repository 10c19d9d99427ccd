use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use flate2::read::GzDecoder;

use alnpipe_core::{
    run_producer, Alignment, AlnFormat, BoundedQueue, GroupBy, PipelineConfig,
};

#[derive(Parser)]
#[command(name = "alnpipe")]
#[command(about = "Normalize pairwise alignments and stream them to a consensus consumer")]
#[command(version)]
struct Cli {
    /// Input alignment file (m5 or pre, optionally gzipped); stdin when omitted
    input: Option<PathBuf>,

    /// Input format
    #[arg(long, value_enum, default_value = "m5")]
    format: FormatArg,

    /// Group alignments by query instead of by target
    #[arg(long)]
    group_by_query: bool,

    /// Disable rightward gap pushing during normalization
    #[arg(long)]
    no_push: bool,

    /// Aligned target bases to trim from each end
    #[arg(long, default_value = "10")]
    trim: usize,

    /// Capacity of the hand-off queue between parser and writer
    #[arg(long, default_value = "64")]
    capacity: usize,

    /// Emit records as JSON lines instead of pre-format lines
    #[arg(long)]
    json: bool,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(ValueEnum, Clone, Copy)]
enum FormatArg {
    M5,
    Pre,
}

impl From<FormatArg> for AlnFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::M5 => AlnFormat::M5,
            FormatArg::Pre => AlnFormat::Pre,
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        std::env::set_var("RUST_LOG", "error");
    } else {
        let level = match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        std::env::set_var("RUST_LOG", level);
    }

    env_logger::Builder::from_default_env()
        .format_timestamp_secs()
        .init();
}

fn open_input(path: Option<&PathBuf>) -> Result<Box<dyn BufRead + Send>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            if path.to_string_lossy().ends_with(".gz") {
                Ok(Box::new(BufReader::new(GzDecoder::new(file))))
            } else {
                Ok(Box::new(BufReader::new(file)))
            }
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write + Send>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

fn run_consumer(
    queue: &BoundedQueue<Alignment>,
    mut out: Box<dyn Write + Send>,
    json: bool,
) -> Result<usize> {
    let mut written = 0usize;
    while let Some(aln) = queue.pop() {
        if json {
            serde_json::to_writer(&mut out, &aln)?;
            out.write_all(b"\n")?;
        } else {
            writeln!(out, "{}", aln.to_pre_line())?;
        }
        written += 1;
    }
    out.flush()?;
    Ok(written)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    let config = PipelineConfig {
        format: cli.format.into(),
        group_by: if cli.group_by_query {
            GroupBy::Query
        } else {
            GroupBy::Target
        },
        push_gaps: !cli.no_push,
        trim: cli.trim,
    };

    let reader = open_input(cli.input.as_ref())?;
    let writer = open_output(cli.output.as_ref())?;
    let queue = Arc::new(BoundedQueue::new(cli.capacity));

    let consumer = {
        let queue = Arc::clone(&queue);
        let json = cli.json;
        thread::spawn(move || run_consumer(&queue, writer, json))
    };

    let produced = run_producer(reader, &config, &queue);
    // wake the consumer whether or not the producer succeeded
    queue.close();
    let written = consumer
        .join()
        .map_err(|_| anyhow::anyhow!("consumer thread panicked"))?
        .context("Failed to write records")?;

    let produced = produced.context("Failed to read alignments")?;
    log::info!("normalized {} records, wrote {}", produced, written);

    Ok(())
}
