//! matchbook - simulation driver
//!
//! Feeds a file of order records through one exchange and writes the action
//! report of every order, one CSV line per action, prefixed with the order's
//! submission clock.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use matchbook::engine::{Exchange, DEFAULT_BOOK_CAPACITY};
use matchbook::orderbook::{HeapBook, LinkedBook, OrderBook};

#[derive(Parser)]
#[command(name = "matchbook")]
#[command(about = "Replay order records through a price/time priority exchange", long_about = None)]
struct Cli {
    /// Ticker symbol of the instrument
    ticker: String,

    /// File of order records, one per line
    orders: PathBuf,

    /// Book storage strategy
    #[arg(long, value_enum, default_value_t = Storage::Linked)]
    storage: Storage,

    /// Pre-allocated orders per book
    #[arg(long, default_value_t = DEFAULT_BOOK_CAPACITY)]
    capacity: usize,

    /// Write action reports here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print both books after the last order
    #[arg(long)]
    show_book: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Storage {
    /// Sorted linked list
    Linked,
    /// Binary heap
    Heap,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let input = File::open(&cli.orders)
        .with_context(|| format!("opening orders file {}", cli.orders.display()))?;
    let mut output: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    match cli.storage {
        Storage::Linked => {
            let exchange = Exchange::<LinkedBook>::with_storage(cli.ticker.as_str(), cli.capacity);
            simulate(exchange, BufReader::new(input), &mut output, cli.show_book)
        }
        Storage::Heap => {
            let exchange = Exchange::<HeapBook>::with_storage(cli.ticker.as_str(), cli.capacity);
            simulate(exchange, BufReader::new(input), &mut output, cli.show_book)
        }
    }
}

fn simulate<B: OrderBook, R: BufRead, W: Write>(
    mut exchange: Exchange<B>,
    input: R,
    output: &mut W,
    show_book: bool,
) -> anyhow::Result<()> {
    let mut clock: u64 = 0;
    let mut rejected = 0usize;

    for (line_no, line) in input.lines().enumerate() {
        let line = line.with_context(|| format!("reading line {}", line_no + 1))?;
        if line.trim().is_empty() {
            continue;
        }

        match exchange.process_record(&line, clock) {
            Ok(report) => report
                .write_csv(output, clock)
                .context("writing action report")?,
            Err(err) => {
                warn!("line {}: skipping record `{}`: {}", line_no + 1, line.trim(), err);
                rejected += 1;
            }
        }
        clock += 1;
    }
    output.flush().context("flushing action reports")?;

    if show_book {
        print!("{}", exchange);
    }

    let root = exchange.compute_state_root()?;
    info!(
        "{}: processed {} record(s), rejected {}, {} resting, state root {}",
        exchange.ticker(),
        clock,
        rejected,
        exchange.order_count(),
        hex::encode(root)
    );
    Ok(())
}

// ============================================================================
// Unit Tests
// ============================================================================
