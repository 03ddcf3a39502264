//! `dom-mapper` CLI: convert between JSON and data-attributed HTML from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Encode JSON to HTML (stdin → stdout)
//! echo '{"name":"Alice","age":30}' | dom-mapper encode
//!
//! # Encode from file to file
//! dom-mapper encode -i data.json -o data.html
//!
//! # Decode HTML back to pretty-printed JSON
//! dom-mapper decode -i data.html
//!
//! # Decode to compact JSON
//! dom-mapper decode --compact -i data.html
//!
//! # Show size statistics
//! dom-mapper stats -i data.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dom_mapper::{html, is_data_node, Dom, Mapper, NodeId, Value};
use std::io::{self, Read};

#[derive(Parser)]
#[command(
    name = "dom-mapper",
    version,
    about = "Convert JSON to data-attributed HTML and back"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode JSON to data-attributed HTML
    Encode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Decode data-attributed HTML back to JSON
    Decode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Emit compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
    /// Show encoding statistics (sizes and data node count)
    Stats {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { input, output } => {
            let json = read_input(input.as_deref())?;
            let markup = dom_mapper::encode(&json).context("Failed to encode JSON to HTML")?;
            write_output(output.as_deref(), &markup)?;
        }
        Commands::Decode {
            input,
            output,
            compact,
        } => {
            let markup = read_input(input.as_deref())?;
            let value =
                dom_mapper::decode_value(&markup).context("Failed to decode HTML to JSON")?;
            let json = if compact {
                serde_json::to_string(&value)?
            } else {
                serde_json::to_string_pretty(&value)?
            };
            write_output(output.as_deref(), &json)?;
        }
        Commands::Stats { input } => {
            let json = read_input(input.as_deref())?;
            let parsed: serde_json::Value =
                serde_json::from_str(&json).context("Failed to parse JSON input")?;

            let mut mapper = Mapper::new(Dom::new());
            let root = mapper
                .to(&Value::from(parsed))
                .context("Failed to encode JSON to HTML")?;
            let markup = html::to_html(mapper.document(), root);

            let json_bytes = json.len();
            let markup_bytes = markup.len();
            let ratio = if json_bytes > 0 {
                markup_bytes as f64 / json_bytes as f64
            } else {
                0.0
            };
            println!("JSON size:    {} bytes", json_bytes);
            println!("HTML size:    {} bytes", markup_bytes);
            println!("Data nodes:   {}", count_data_nodes(mapper.document(), root));
            println!("Expansion:    {:.2}x", ratio);
        }
    }

    Ok(())
}

/// Count the data elements in the subtree rooted at `root`, `root` included.
fn count_data_nodes(dom: &Dom, root: NodeId) -> usize {
    let mut count = 0;
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if is_data_node(dom, &node) {
            count += 1;
        }
        stack.extend_from_slice(dom.children(node));
    }
    count
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
