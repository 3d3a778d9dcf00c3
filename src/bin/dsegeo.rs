//! dsegeo - inspect and produce DSE geometry payloads
//!
//! Usage:
//!     dsegeo decode AQEAAAAAAAAAAAD4PwAAAAAAAALA
//!     dsegeo decode <BASE64> --type org.apache.cassandra.db.marshal.CircleType --format json
//!     dsegeo encode "LINESTRING (0 0, 1 1)" --byte-order big
//!     dsegeo types

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::EnvFilter;

use dse_geometry::config::{ByteOrderSetting, Config, OutputFormat};
use dse_geometry::types::ColumnType;
use dse_geometry::{CodecRegistry, Geometry};

#[derive(Parser)]
#[command(name = "dsegeo")]
#[command(version)]
#[command(about = "Decode and encode DSE geospatial WKB payloads", long_about = None)]
struct Cli {
    /// Config file (defaults to <config dir>/dsegeo/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a base64 WKB payload
    Decode {
        /// Base64-encoded payload
        payload: String,

        /// Custom type name to decode as (sniffed from the type tag if omitted)
        #[arg(short, long = "type")]
        type_name: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, env = "DSEGEO_FORMAT")]
        format: Option<OutputFormat>,
    },

    /// Encode WKT or JSON into a base64 WKB payload
    Encode {
        /// WKT text, or JSON when it starts with '{'
        input: String,

        /// Byte order of the payload
        #[arg(short, long, value_enum, env = "DSEGEO_BYTE_ORDER")]
        byte_order: Option<ByteOrderSetting>,
    },

    /// List registered custom types
    Types,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::load()?,
    };
    if !config.color {
        colored::control::set_override(false);
    }

    let registry = CodecRegistry::with_geometry_types();

    match cli.command {
        Commands::Decode { payload, type_name, format } => {
            decode(&registry, &payload, type_name.as_deref(), format.unwrap_or(config.format))
        }
        Commands::Encode { input, byte_order } => encode(&input, byte_order.unwrap_or(config.byte_order)),
        Commands::Types => {
            list_types(&registry);
            Ok(())
        }
    }
}

fn decode(registry: &CodecRegistry, payload: &str, type_name: Option<&str>, format: OutputFormat) -> Result<()> {
    let buf = STANDARD
        .decode(payload.trim())
        .context("Payload is not valid base64")?;

    let geometry = match type_name {
        Some(name) => match registry.decode(name, &buf) {
            Some(result) => result.with_context(|| format!("Failed to decode {}", name))?,
            None => bail!("Unknown custom type: {}. Run `dsegeo types` for the list", name),
        },
        None => Geometry::from_wkb(&buf).context("Failed to decode payload")?,
    };

    eprintln!(
        "{} {} ({} bytes, {})",
        "→".cyan(),
        geometry.kind().to_string().yellow(),
        buf.len(),
        byte_order_label(buf.first().copied())
    );
    match format {
        OutputFormat::Wkt => println!("{}", geometry),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&geometry.to_json())?),
    }
    Ok(())
}

fn encode(input: &str, byte_order: ByteOrderSetting) -> Result<()> {
    let input = input.trim();
    let geometry: Geometry = if input.starts_with('{') {
        serde_json::from_str(input).context("Invalid geometry JSON")?
    } else {
        input.parse().context("Invalid WKT")?
    };

    let order = byte_order.resolve();
    let bytes = geometry.to_wkb_with(order);
    eprintln!(
        "{} {} encoded ({} bytes, {:?})",
        "✓".green(),
        geometry.kind(),
        bytes.len(),
        order
    );
    println!("{}", STANDARD.encode(&bytes));
    Ok(())
}

fn list_types(registry: &CodecRegistry) {
    println!("{} {} custom type(s) registered", "→".cyan(), registry.len());
    for name in registry.type_names() {
        let column = ColumnType::custom(name).to_string();
        match registry.kind_of(name) {
            Some(kind) => println!("  {:<56} {} (tag {})", column.yellow(), kind, kind.tag()),
            None => println!("  {}", column.yellow()),
        }
    }
}

fn byte_order_label(flag: Option<u8>) -> &'static str {
    match flag {
        Some(0) => "big endian",
        Some(1) => "little endian",
        _ => "unknown order",
    }
}
