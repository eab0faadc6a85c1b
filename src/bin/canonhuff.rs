use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use canonhuff::{CodecConfig, Decoder, Encoder, EndMarker, HEADER_SIZE};

#[derive(Parser, Debug)]
#[command(name = "canonhuff")]
#[command(about = "Compress and decompress files with canonical Huffman coding")]
#[command(version)]
struct Args {
    /// Compress the input
    #[arg(short, long, conflicts_with = "decompress", required_unless_present = "decompress")]
    compress: bool,

    /// Decompress the input
    #[arg(short, long)]
    decompress: bool,

    /// Input file (use - for stdin)
    #[arg(short, long, alias = "infile")]
    input: PathBuf,

    /// Output file (use - for stdout)
    #[arg(short, long, alias = "outfile", default_value = "output.txt")]
    output: PathBuf,

    /// When to code the end-of-stream symbol while compressing
    #[arg(long, value_enum, default_value_t = EndMarkerArg::Auto)]
    end_marker: EndMarkerArg,

    /// Print the canonical code table to stderr
    #[arg(long)]
    show_codes: bool,

    /// Show verbose statistics
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EndMarkerArg {
    Auto,
    Always,
    Never,
}

impl From<EndMarkerArg> for EndMarker {
    fn from(arg: EndMarkerArg) -> Self {
        match arg {
            EndMarkerArg::Auto => EndMarker::Auto,
            EndMarkerArg::Always => EndMarker::Always,
            EndMarkerArg::Never => EndMarker::Never,
        }
    }
}

const EXIT_ERROR: u8 = 1;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = CodecConfig { end_marker: args.end_marker.into(), ..Default::default() };

    if args.compress {
        run_compress(&args, config)
    } else {
        run_decompress(&args, config)
    }
}

fn is_stdio(path: &Path) -> bool {
    path.to_str() == Some("-")
}

fn open_input(path: &Path) -> io::Result<Box<dyn Read>> {
    if is_stdio(path) {
        Ok(Box::new(io::stdin().lock()))
    } else {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }
}

fn open_output(path: &Path) -> io::Result<Box<dyn Write>> {
    if is_stdio(path) {
        Ok(Box::new(io::stdout().lock()))
    } else {
        Ok(Box::new(BufWriter::new(File::create(path)?)))
    }
}

fn run_compress(args: &Args, config: CodecConfig) -> Result<(), Box<dyn std::error::Error>> {
    if args.verbose {
        eprintln!("Compressing file {} with huffman encoding...", args.input.display());
    }

    // Read the whole input before touching the output
    let mut data = Vec::new();
    open_input(&args.input)?.read_to_end(&mut data)?;

    let start = std::time::Instant::now();
    let encoder = Encoder::new(config);
    let code = encoder.build_code(&data)?;

    if args.show_codes {
        eprintln!("Canonical codes ({} symbols):", code.iter().count());
        for (symbol, c) in code.iter() {
            eprintln!("  {:>3}  len {:>3}  {}", symbol, c.length, c);
        }
    }

    let mut output = open_output(&args.output)?;
    let stats = encoder.encode_with_code(&data, &code, &mut output)?;
    output.flush()?;
    let elapsed = start.elapsed();

    if args.verbose {
        eprintln!("Compression complete:");
        eprintln!("  Input bytes:      {}", stats.input_bytes);
        eprintln!("  Output bytes:     {}", stats.output_bytes);
        eprintln!("  Distinct symbols: {}", stats.distinct_symbols);
        eprintln!("  Max code length:  {}", stats.max_code_length);
        eprintln!("  Payload bits:     {}", stats.payload_bits);
        eprintln!("  Padding bits:     {}", stats.padding_bits);
        eprintln!("  End marker:       {}", if stats.end_marker_written { "yes" } else { "no" });
        if stats.input_bytes > 0 {
            eprintln!(
                "  Ratio:            {:.3}",
                stats.output_bytes as f64 / stats.input_bytes as f64
            );
        }
        eprintln!("  Time:             {:.2?}", elapsed);
        eprintln!("Complete. Compressed file here: {}", args.output.display());
    }

    Ok(())
}

fn run_decompress(args: &Args, config: CodecConfig) -> Result<(), Box<dyn std::error::Error>> {
    if args.verbose {
        eprintln!("Decompressing file {} with huffman encoding...", args.input.display());
    }

    let input = open_input(&args.input)?;

    // Decode fully before creating the output so a bad stream leaves nothing behind
    let start = std::time::Instant::now();
    let mut decoded = Vec::new();
    let stats = Decoder::new(config).decode(input, &mut decoded)?;
    let elapsed = start.elapsed();

    let mut output = open_output(&args.output)?;
    output.write_all(&decoded)?;
    output.flush()?;

    if args.verbose {
        eprintln!("Decompression complete:");
        eprintln!("  Input bytes:      {}", stats.input_bytes);
        eprintln!("  Header bytes:     {}", HEADER_SIZE);
        eprintln!("  Output bytes:     {}", stats.output_bytes);
        eprintln!("  Distinct symbols: {}", stats.distinct_symbols);
        eprintln!("  Max code length:  {}", stats.max_code_length);
        eprintln!("  End marker:       {}", if stats.end_marker_seen { "yes" } else { "no" });
        if stats.trailing_bits > 0 {
            eprintln!("  Trailing bits:    {}", stats.trailing_bits);
        }
        eprintln!("  Time:             {:.2?}", elapsed);
        eprintln!("Complete. Decompressed file here: {}", args.output.display());
    }

    Ok(())
}
