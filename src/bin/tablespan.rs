//! tablespan CLI - convert markdown span tables to HTML or Typst

#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, IsTerminal, Read, Write};
#[cfg(feature = "cli")]
use tablespan::{
    check_table, convert_document, convert_document_with, format_diagnostics, parse_table,
    table_to_html, table_to_typst, ConversionWarning, SpanTableProcessor, Table, TableOptions,
};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "tablespan")]
#[command(version)]
#[command(about = "Convert markdown pipe tables with cell spans to HTML or Typst", long_about = None)]
struct Cli {
    /// Input file path (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Line prefix that turns the last table line into a caption (empty disables captions)
    #[arg(long, default_value = tablespan::core::DEFAULT_CAPTION_MARK)]
    caption_mark: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Document mode: convert every table block and keep the surrounding text
    #[arg(short, long)]
    document: bool,

    /// Check mode - report table issues without converting
    #[arg(long)]
    check: bool,

    /// Disable colored output (for check mode and warnings)
    #[arg(long)]
    no_color: bool,

    /// Strict mode: exit with error if any conversion warnings occur
    #[arg(long)]
    strict: bool,

    /// Quiet mode: suppress warning output to stderr
    #[arg(short, long)]
    quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// HTML table markup
    Html,
    /// Typst #table markup
    Typst,
    /// The parsed table structure as JSON
    Json,
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let options = TableOptions::new().with_caption_mark(cli.caption_mark.clone());
    if let Err(err) = options.validate() {
        eprintln!("Error: {}", err);
        std::process::exit(2);
    }

    // Read input
    let input = match cli.input_file {
        Some(ref path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let use_color = !cli.no_color && io::stderr().is_terminal();

    if cli.check {
        let result = check_table(&input, &options);
        println!("{}", format_diagnostics(&result, !cli.no_color));
        if result.has_errors() {
            std::process::exit(1);
        }
        return Ok(());
    }

    let (result, warnings) = if cli.document {
        convert_input_document(&input, &options, cli.format)
    } else {
        match convert_input_table(&input, &options, cli.format) {
            Ok(output) => (output, Vec::new()),
            Err(message) => {
                eprintln!("Error: {}", message);
                std::process::exit(1);
            }
        }
    };

    if !cli.quiet && !warnings.is_empty() {
        print_warnings_to_stderr(&warnings, use_color);
    }

    if cli.strict && !warnings.is_empty() {
        eprintln!("Error: {} conversion warning(s) in strict mode", warnings.len());
        std::process::exit(1);
    }

    // Output
    match cli.output {
        Some(path) => {
            let mut file = fs::File::create(&path)?;
            write!(file, "{}", result)?;
            if warnings.is_empty() {
                eprintln!("✓ Output written to: {}", path);
            } else {
                eprintln!("⚠ Output written to: {} ({} warning(s))", path, warnings.len());
            }
        }
        None => {
            print!("{}", result);
            io::stdout().flush()?;
        }
    }

    Ok(())
}

/// Install env_logger; `RUST_LOG` wins over `-v`
#[cfg(feature = "cli")]
fn init_logger(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

#[cfg(feature = "cli")]
fn convert_input_table(
    input: &str,
    options: &TableOptions,
    format: Format,
) -> Result<String, String> {
    let table = parse_table(input.trim_matches('\n'), options).map_err(|e| e.to_string())?;
    render(&table, format)
}

#[cfg(feature = "cli")]
fn convert_input_document(
    input: &str,
    options: &TableOptions,
    format: Format,
) -> (String, Vec<ConversionWarning>) {
    let output = match format {
        Format::Html => convert_document(input, options),
        Format::Typst => convert_document_with(
            input,
            &SpanTableProcessor::new(options.clone()),
            table_to_typst,
        ),
        Format::Json => {
            eprintln!("Error: JSON output is only available for single tables");
            std::process::exit(2);
        }
    };
    (output.content, output.warnings)
}

#[cfg(feature = "cli")]
fn render(table: &Table, format: Format) -> Result<String, String> {
    match format {
        Format::Html => Ok(table_to_html(table)),
        Format::Typst => Ok(table_to_typst(table)),
        #[cfg(feature = "serde")]
        Format::Json => serde_json::to_string_pretty(table)
            .map(|json| json + "\n")
            .map_err(|e| e.to_string()),
        #[cfg(not(feature = "serde"))]
        Format::Json => Err("JSON output requires the `serde` feature".to_string()),
    }
}

/// Print conversion warnings to stderr with optional color
#[cfg(feature = "cli")]
fn print_warnings_to_stderr(warnings: &[ConversionWarning], use_color: bool) {
    let (yellow, cyan, reset) = if use_color {
        ("\x1b[33m", "\x1b[36m", "\x1b[0m")
    } else {
        ("", "", "")
    };

    for warning in warnings {
        match warning.line {
            Some(line) => eprintln!(
                "{}warning{}: line {}: {}",
                yellow, reset, line, warning.message
            ),
            None => eprintln!("{}warning{}: {}", yellow, reset, warning.message),
        }
        if let Some(ref suggestion) = warning.suggestion {
            eprintln!("  {}= help{}: {}", cyan, reset, suggestion);
        }
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    std::process::exit(1);
}
