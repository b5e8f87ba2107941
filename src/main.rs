//! quire - normalize stored rich-text HTML

use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::Parser;

use quire::util::decode_html_bytes;
use quire::{Document, decode, encode};

#[derive(Parser)]
#[command(name = "quire")]
#[command(version, about = "Normalize stored rich-text HTML", long_about = None)]
#[command(after_help = "EXAMPLES:
    quire post.html                Print the normalized HTML
    quire post.html -o clean.html  Write the normalized HTML to a file
    quire --tree post.html         Print the document tree as JSON
    quire --check post.html        Fail if the stored HTML is not normalized")]
struct Cli {
    /// Input file, or `-` for stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    input: String,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<String>,

    /// Print the document tree as JSON instead of HTML
    #[arg(short, long)]
    tree: bool,

    /// Exit with failure if re-encoding changes the input
    #[arg(long, conflicts_with = "tree")]
    check: bool,

    /// Suppress log messages
    #[arg(short, long)]
    quiet: bool,

    /// Log decoding details
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match (cli.quiet, cli.verbose) {
        (true, _) => log::LevelFilter::Off,
        (false, true) => log::LevelFilter::Debug,
        (false, false) => log::LevelFilter::Warn,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> quire::Result<bool> {
    let bytes = read_input(&cli.input)?;
    let html = decode_html_bytes(&bytes);
    let doc = decode(&html);

    if cli.check {
        let normalized = encode(&doc);
        let stable = normalized == html.trim();
        if !stable {
            log::warn!("{} is not normalized", cli.input);
        }
        return Ok(stable);
    }

    let mut rendered = if cli.tree { tree_json(&doc)? } else { encode(&doc) };
    rendered.push('\n');

    match &cli.output {
        Some(path) => std::fs::write(path, rendered)?,
        None => io::stdout().write_all(rendered.as_bytes())?,
    }
    Ok(true)
}

fn read_input(input: &str) -> io::Result<Vec<u8>> {
    if input == "-" {
        let mut bytes = Vec::new();
        io::stdin().read_to_end(&mut bytes)?;
        Ok(bytes)
    } else {
        std::fs::read(input)
    }
}

fn tree_json(doc: &Document) -> quire::Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}
