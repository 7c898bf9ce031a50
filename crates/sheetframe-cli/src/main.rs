//! sheetframe CLI - export workbook sheets as delimited text

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use sheetframe::prelude::*;
use sheetframe::NativeReaderConfig;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sheetframe")]
#[command(
    author,
    version,
    about = "Export Excel worksheets as delimited text through the native excel_to_df reader"
)]
struct Cli {
    /// Path to the native reader library (default: search next to the executable)
    #[arg(long, global = true, env = "SHEETFRAME_LIBRARY")]
    library: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the native reader's version string
    Version,

    /// Export one worksheet to delimited text on stdout or a file
    #[command(alias = "csv")]
    Export {
        #[command(flatten)]
        source: SheetSource,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Treat the first row as column names
        #[arg(long)]
        header: bool,

        /// Write float columns with a decimal comma
        #[arg(long)]
        decimal_comma: bool,
    },

    /// Split a worksheet that stacks several tables and export each one
    Split {
        #[command(flatten)]
        source: SheetSource,

        /// Regular expression marking the first row of each table
        #[arg(short, long)]
        pattern: String,

        /// Column searched for the pattern (0-based)
        #[arg(short, long, default_value = "0")]
        column: usize,

        /// Rows between the marker row and the header row
        #[arg(long, default_value = "0")]
        header_offset: usize,

        /// Directory for the exported tables
        #[arg(short = 'o', long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Time single- and multi-threaded sheet extraction
    Bench {
        #[command(flatten)]
        source: SheetSource,

        /// Number of loads per mode
        #[arg(short, long, default_value = "1")]
        runs: u32,
    },
}

#[derive(Args)]
struct SheetSource {
    /// Input workbook
    input: PathBuf,

    /// Worksheet name
    #[arg(short, long)]
    sheet: String,

    /// Output field delimiter (sheets are always read with ';')
    #[arg(short, long, default_value = ";")]
    delimiter: char,

    /// Rows inspected to infer column count and kinds
    #[arg(long, default_value = "1")]
    guess_rows: usize,

    /// Extract on a single thread (getSheet instead of getSheetMT)
    #[arg(long)]
    single_thread: bool,
}

impl SheetSource {
    fn fetch_mode(&self) -> FetchMode {
        if self.single_thread {
            FetchMode::SingleThread
        } else {
            FetchMode::MultiThread
        }
    }

    fn read_options(&self, header: bool) -> ReadOptions {
        ReadOptions {
            // The native reader always emits ';'
            delimiter: b';',
            header: if header {
                HeaderMode::FirstRow
            } else {
                HeaderMode::None
            },
            guess_rows: self.guess_rows,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut loader = WorkbookTableLoader::native(NativeReaderConfig {
        library_path: cli.library,
    })
    .context("Failed to load the native reader library")?;
    tracing::debug!("Using native reader at {}", loader.reader().path().display());

    match cli.command {
        Commands::Version => {
            println!("{}", loader.version());
            Ok(())
        }
        Commands::Export {
            source,
            output,
            header,
            decimal_comma,
        } => export(&mut loader, &source, output.as_deref(), header, decimal_comma),
        Commands::Split {
            source,
            pattern,
            column,
            header_offset,
            output_dir,
        } => split(
            &mut loader,
            &source,
            &pattern,
            column,
            header_offset,
            &output_dir,
        ),
        Commands::Bench { source, runs } => bench(&mut loader, &source, runs),
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Convert a delimiter argument to the single byte the writer needs
fn delimiter_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character, got '{delimiter}'");
    }
    Ok(delimiter as u8)
}

/// Open the workbook, load the sheet and close the workbook again
fn load<R: ExcelReader>(
    loader: &mut WorkbookTableLoader<R>,
    source: &SheetSource,
    header: bool,
) -> Result<Table> {
    loader
        .open(&source.input)
        .with_context(|| format!("Failed to open '{}'", source.input.display()))?;

    let result = loader.load_sheet_with(
        &source.sheet,
        source.fetch_mode(),
        &source.read_options(header),
    );
    loader.close();

    result.with_context(|| format!("Failed to load sheet '{}'", source.sheet))
}

fn export<R: ExcelReader>(
    loader: &mut WorkbookTableLoader<R>,
    source: &SheetSource,
    output: Option<&Path>,
    header: bool,
    decimal_comma: bool,
) -> Result<()> {
    if decimal_comma && source.delimiter == ',' {
        bail!("--decimal-comma cannot be combined with ',' as the delimiter");
    }

    let table = load(loader, source, header)?;

    let options = WriteOptions {
        delimiter: delimiter_byte(source.delimiter)?,
        write_header: header,
        decimal_separator: if decimal_comma { ',' } else { '.' },
        ..Default::default()
    };

    if let Some(output_path) = output {
        DelimitedWriter::write_file(&table, output_path, &options)
            .with_context(|| format!("Failed to write '{}'", output_path.display()))?;
        eprintln!(
            "Wrote {} rows to '{}'",
            table.row_count(),
            output_path.display()
        );
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        DelimitedWriter::write(&table, &mut handle, &options).context("Failed to write to stdout")?;
        handle.flush().context("Failed to write to stdout")?;
    }

    Ok(())
}

fn split<R: ExcelReader>(
    loader: &mut WorkbookTableLoader<R>,
    source: &SheetSource,
    pattern: &str,
    column: usize,
    header_offset: usize,
    output_dir: &Path,
) -> Result<()> {
    let table = load(loader, source, false)?;
    let parts = table
        .split(pattern, column, header_offset)
        .with_context(|| format!("Failed to split sheet '{}'", source.sheet))?;

    if parts.is_empty() {
        eprintln!("Warning: no row matched '{pattern}' in column {column}");
        return Ok(());
    }

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create '{}'", output_dir.display()))?;

    let options = WriteOptions {
        delimiter: delimiter_byte(source.delimiter)?,
        write_header: true,
        ..Default::default()
    };

    for (i, part) in parts.iter().enumerate() {
        let path = output_dir.join(format!("{}_{}.csv", source.sheet, i + 1));
        DelimitedWriter::write_file(part, &path, &options)
            .with_context(|| format!("Failed to write '{}'", path.display()))?;
        eprintln!("Wrote {} rows to '{}'", part.row_count(), path.display());
    }

    Ok(())
}

fn bench<R: ExcelReader>(
    loader: &mut WorkbookTableLoader<R>,
    source: &SheetSource,
    runs: u32,
) -> Result<()> {
    if runs == 0 {
        bail!("--runs must be at least 1");
    }

    let read = source.read_options(false);
    let mut timings = Vec::with_capacity(2);

    for mode in [FetchMode::SingleThread, FetchMode::MultiThread] {
        let mut total = Duration::ZERO;

        for _ in 0..runs {
            let start = Instant::now();
            loader
                .open(&source.input)
                .with_context(|| format!("Failed to open '{}'", source.input.display()))?;
            let result = loader.load_sheet_with(&source.sheet, mode, &read);
            loader.close();
            result.with_context(|| format!("Failed to load sheet '{}'", source.sheet))?;
            total += start.elapsed();
        }

        let average = total / runs;
        println!("{mode:?}: {:.2} seconds per load", average.as_secs_f64());
        timings.push(average);
    }

    if let [single, multi] = timings[..] {
        if !single.is_zero() {
            println!(
                "Multi/Single: {:.2}",
                multi.as_secs_f64() / single.as_secs_f64()
            );
        }
    }

    Ok(())
}
