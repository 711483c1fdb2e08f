//! # charsetconv CLI
//!
//! Command-line front end for converting files and streams between
//! character encodings, with optional all-or-nothing output staging.

#[cfg(feature = "cli")]
use std::fs::File;
#[cfg(feature = "cli")]
use std::io::{self, BufReader, Read, Write};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use serde::Serialize;
#[cfg(feature = "cli")]
use tracing::debug;
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
use charsetconv::{CharsetRegistry, Codec, Error as ConvertError, IanaIndex, resolve_codec};

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI features disabled. Enable with --features cli");
    std::process::exit(1);
}

/// charsetconv: convert text between character encodings
#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "charsetconv")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Register a charset alias, e.g. --alias chinese=GB18030 (repeatable)
    #[arg(long = "alias", global = true, value_name = "ALIAS=CHARSET", value_parser = parse_alias)]
    aliases: Vec<(String, String)>,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Convert input from one charset to another
    Convert(ConvertArgs),

    /// Decode input from a charset into UTF-8
    Decode(DecodeArgs),

    /// Encode UTF-8 input into a charset
    Encode(EncodeArgs),

    /// List all supported charsets
    List(ListArgs),

    /// Display information about a charset
    Info(InfoArgs),

    /// Validate that input is properly encoded
    Validate(ValidateArgs),
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct ConvertArgs {
    /// Source charset
    #[arg(short = 'f', long = "from")]
    from: String,

    /// Target charset
    #[arg(short = 't', long = "to")]
    to: String,

    /// Input file (stdin if not specified)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Stage output in a temporary file; write nothing unless conversion succeeds
    #[arg(long)]
    stage: bool,
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct DecodeArgs {
    /// Source charset
    #[arg(short = 'f', long = "from")]
    from: String,

    /// Input file (stdin if not specified)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Stage output in a temporary file; write nothing unless decoding succeeds
    #[arg(long)]
    stage: bool,
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct EncodeArgs {
    /// Target charset
    #[arg(short = 't', long = "to")]
    to: String,

    /// Input file (stdin if not specified)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Stage output in a temporary file; write nothing unless encoding succeeds
    #[arg(long)]
    stage: bool,
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct ListArgs {
    /// Filter by category (unicode, ascii, iso, windows, cyrillic, mac, ebcdic, dos, chinese, japanese, korean)
    #[arg(short, long)]
    category: Option<String>,

    /// Show only ASCII-compatible charsets
    #[arg(long)]
    ascii_compatible: bool,

    /// Show only multibyte charsets
    #[arg(long)]
    multibyte: bool,
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct InfoArgs {
    /// Charset name or alias to describe
    charset: String,
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct ValidateArgs {
    /// Input file (stdin if not specified)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Expected charset
    #[arg(short, long)]
    encoding: String,

    /// Show the first error
    #[arg(long)]
    show_errors: bool,
}

#[cfg(feature = "cli")]
#[derive(Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[cfg(feature = "cli")]
fn parse_alias(s: &str) -> Result<(String, String)> {
    let (alias, charset) = s
        .split_once('=')
        .with_context(|| format!("expected ALIAS=CHARSET, got '{s}'"))?;
    let (alias, charset) = (alias.trim(), charset.trim());
    if alias.is_empty() || charset.is_empty() {
        anyhow::bail!("expected ALIAS=CHARSET, got '{s}'");
    }
    Ok((alias.to_owned(), charset.to_owned()))
}

#[cfg(feature = "cli")]
#[derive(Serialize)]
struct ConversionResult<'a> {
    success: bool,
    operation: &'a str,
    from: Option<&'a str>,
    to: Option<&'a str>,
    bytes_written: u64,
    staged: bool,
    processing_time_ms: u64,
}

#[cfg(feature = "cli")]
#[derive(Serialize)]
struct CharsetInfo<'a> {
    name: &'a str,
    category: &'a str,
    ascii_compatible: bool,
    multibyte: bool,
    builtin: bool,
    aliases: Vec<&'a str>,
}

#[cfg(feature = "cli")]
#[derive(Serialize)]
struct ValidationResult<'a> {
    valid: bool,
    charset: &'a str,
    error: Option<String>,
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut registry = CharsetRegistry::new();
    for (alias, charset) in &cli.aliases {
        debug!(alias = %alias, charset = %charset, "registering alias");
        registry.add_alias(charset.as_str(), alias);
    }

    match cli.command {
        Commands::Convert(ref args) => convert_command(args, &cli, &registry)?,
        Commands::Decode(ref args) => decode_command(args, &cli, &registry)?,
        Commands::Encode(ref args) => encode_command(args, &cli, &registry)?,
        Commands::List(ref args) => list_command(args, &cli)?,
        Commands::Info(ref args) => info_command(args, &cli, &registry)?,
        Commands::Validate(ref args) => validate_command(args, &cli, &registry)?,
    }

    Ok(())
}

/// Logs go to stderr; `RUST_LOG` overrides the level picked by `--verbose`.
#[cfg(feature = "cli")]
fn init_tracing(verbose: bool) {
    let default = if verbose { "charsetconv=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Output file that is only created by the first write, or by `finish`.
///
/// A staged conversion that fails never writes, so an existing file keeps
/// its contents and a missing one is not created.
#[cfg(feature = "cli")]
struct LazyFile {
    path: PathBuf,
    file: Option<File>,
}

#[cfg(feature = "cli")]
impl LazyFile {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            file: None,
        }
    }

    fn open(&mut self) -> io::Result<&mut File> {
        let file = match self.file.take() {
            Some(file) => file,
            None => File::create(&self.path)?,
        };
        Ok(self.file.insert(file))
    }

    /// Creates the file if nothing was written to it.
    fn finish(mut self) -> io::Result<()> {
        self.open()?.flush()
    }
}

#[cfg(feature = "cli")]
impl Write for LazyFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.open()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file {
            Some(ref mut file) => file.flush(),
            None => Ok(()),
        }
    }
}

#[cfg(feature = "cli")]
fn open_input(input: Option<&Path>, verbose: bool) -> Result<Box<dyn Read>> {
    match input {
        Some(path) => {
            if verbose {
                eprintln!("Reading from: {}", path.display());
            }
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => {
            if verbose {
                eprintln!("Reading from stdin");
            }
            Ok(Box::new(io::stdin().lock()))
        }
    }
}

/// Runs `run` against the output file or stdout.
#[cfg(feature = "cli")]
fn with_output<F>(output: Option<&Path>, verbose: bool, run: F) -> Result<u64>
where
    F: FnOnce(&mut dyn Write) -> charsetconv::Result<u64>,
{
    match output {
        Some(path) => {
            let mut sink = LazyFile::new(path);
            let written = run(&mut sink)?;
            sink.finish()
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            if verbose {
                eprintln!("Wrote to: {}", path.display());
            }
            Ok(written)
        }
        None => {
            let stdout = io::stdout();
            let mut sink = stdout.lock();
            Ok(run(&mut sink)?)
        }
    }
}

#[cfg(feature = "cli")]
struct Stream<'a> {
    operation: &'a str,
    from: Option<&'a str>,
    to: Option<&'a str>,
    input: Option<&'a Path>,
    output: Option<&'a Path>,
    stage: bool,
}

#[cfg(feature = "cli")]
fn run_stream<F>(stream: Stream<'_>, cli: &Cli, run: F) -> Result<()>
where
    F: FnOnce(Box<dyn Read>, &mut dyn Write) -> charsetconv::Result<u64>,
{
    let start_time = std::time::Instant::now();

    if cli.verbose {
        eprintln!(
            "{} from {} to {}{}",
            stream.operation,
            stream.from.unwrap_or("UTF-8"),
            stream.to.unwrap_or("UTF-8"),
            if stream.stage { " (staged)" } else { "" }
        );
    }

    let source = open_input(stream.input, cli.verbose)?;
    let written = with_output(stream.output, cli.verbose, |sink| run(source, sink))
        .with_context(|| format!("{} failed", stream.operation))?;

    let processing_time = start_time.elapsed();

    if cli.verbose {
        eprintln!("Wrote {} bytes in {:?}", written, processing_time);
    }

    match cli.format {
        OutputFormat::Json => {
            let result = ConversionResult {
                success: true,
                operation: stream.operation,
                from: stream.from,
                to: stream.to,
                bytes_written: written,
                staged: stream.stage,
                processing_time_ms: processing_time.as_millis() as u64,
            };
            let json = serde_json::to_string_pretty(&result)?;
            // Keep stdout clean when it carries the converted bytes
            if stream.output.is_some() {
                println!("{json}");
            } else {
                eprintln!("{json}");
            }
        }
        OutputFormat::Text => {
            if cli.verbose {
                eprintln!("✓ {} completed successfully", stream.operation);
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn convert_command(args: &ConvertArgs, cli: &Cli, registry: &CharsetRegistry) -> Result<()> {
    let stream = Stream {
        operation: "Conversion",
        from: Some(args.from.as_str()),
        to: Some(args.to.as_str()),
        input: args.input.as_deref(),
        output: args.output.as_deref(),
        stage: args.stage,
    };

    run_stream(stream, cli, |source, sink| {
        charsetconv::convert_with(registry, source, &args.from, sink, &args.to, args.stage)
    })
}

#[cfg(feature = "cli")]
fn decode_command(args: &DecodeArgs, cli: &Cli, registry: &CharsetRegistry) -> Result<()> {
    let stream = Stream {
        operation: "Decoding",
        from: Some(args.from.as_str()),
        to: None,
        input: args.input.as_deref(),
        output: args.output.as_deref(),
        stage: args.stage,
    };

    run_stream(stream, cli, |source, sink| {
        charsetconv::decode_with(registry, source, sink, &args.from, args.stage)
    })
}

#[cfg(feature = "cli")]
fn encode_command(args: &EncodeArgs, cli: &Cli, registry: &CharsetRegistry) -> Result<()> {
    let stream = Stream {
        operation: "Encoding",
        from: None,
        to: Some(args.to.as_str()),
        input: args.input.as_deref(),
        output: args.output.as_deref(),
        stage: args.stage,
    };

    run_stream(stream, cli, |source, sink| {
        charsetconv::encode_with(registry, source, sink, &args.to, args.stage)
    })
}

#[cfg(feature = "cli")]
fn category_of(codec: &Codec) -> &'static str {
    IanaIndex::charsets()
        .iter()
        .find(|(name, _)| *name == codec.name())
        .map_or("other", |&(_, category)| category)
}

#[cfg(feature = "cli")]
fn list_command(args: &ListArgs, cli: &Cli) -> Result<()> {
    let registry = CharsetRegistry::new();
    let mut charsets = Vec::new();

    for &(name, category) in IanaIndex::charsets() {
        if let Some(ref filter_cat) = args.category {
            if !category.eq_ignore_ascii_case(filter_cat) {
                continue;
            }
        }

        let codec = resolve_codec(&registry, name)?;
        if args.ascii_compatible && !codec.is_ascii_compatible() {
            continue;
        }
        if args.multibyte && codec.is_single_byte() {
            continue;
        }

        charsets.push((codec, category));
    }

    match cli.format {
        OutputFormat::Json => {
            let info: Vec<_> = charsets
                .iter()
                .map(|(codec, category)| describe(codec, category, Vec::new()))
                .collect();
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        OutputFormat::Text => {
            println!("Supported Charsets ({} total):", charsets.len());
            println!();

            for (codec, category) in charsets {
                println!("{:15} {:10}", codec.name(), format!("[{}]", category));
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn describe<'a>(codec: &'a Codec, category: &'a str, aliases: Vec<&'a str>) -> CharsetInfo<'a> {
    CharsetInfo {
        name: codec.name(),
        category,
        ascii_compatible: codec.is_ascii_compatible(),
        multibyte: !codec.is_single_byte(),
        builtin: !codec.is_library_backed(),
        aliases,
    }
}

#[cfg(feature = "cli")]
fn info_command(args: &InfoArgs, cli: &Cli, registry: &CharsetRegistry) -> Result<()> {
    let codec = resolve_codec(registry, &args.charset)?;

    let mut aliases: Vec<&str> = registry
        .aliases()
        .filter(|(_, charset)| resolve_codec(registry, charset.as_str()).ok() == Some(codec))
        .map(|(alias, _)| alias)
        .collect();
    aliases.sort_unstable();

    let info = describe(&codec, category_of(&codec), aliases);

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        OutputFormat::Text => {
            println!("Charset Information: {}", info.name);
            println!("Category: {}", info.category);
            println!(
                "ASCII Compatible: {}",
                if info.ascii_compatible { "Yes" } else { "No" }
            );
            println!("Multibyte: {}", if info.multibyte { "Yes" } else { "No" });
            println!(
                "Codec: {}",
                if info.builtin { "built-in" } else { "encoding_rs" }
            );
            if !info.aliases.is_empty() {
                println!("Aliases: {}", info.aliases.join(", "));
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn validate_command(args: &ValidateArgs, cli: &Cli, registry: &CharsetRegistry) -> Result<()> {
    let codec = resolve_codec(registry, &args.encoding)?;
    let source = open_input(args.input.as_deref(), cli.verbose)?;

    let failure = match charsetconv::decode(source, &mut io::sink(), &codec, false) {
        Ok(_) => None,
        Err(ConvertError::Transform(err)) => Some(err.to_string()),
        Err(err) => return Err(anyhow::Error::from(err).context("Failed to read input")),
    };

    match cli.format {
        OutputFormat::Json => {
            let result = ValidationResult {
                valid: failure.is_none(),
                charset: codec.name(),
                error: failure.clone(),
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Text => match failure {
            None => println!("✓ Input is valid {}", codec.name()),
            Some(ref err) => {
                println!("✗ Input is not valid {}", codec.name());
                if args.show_errors {
                    println!("  Error: {}", err);
                }
            }
        },
    }

    std::process::exit(if failure.is_none() { 0 } else { 1 });
}
