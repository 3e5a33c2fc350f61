//! J1939 Codec CLI Application
//!
//! Command-line front-end for the j1939-codec library. Payloads are given as
//! hex on the command line; nothing is read from or written to a CAN bus.
//! - Bit-field extraction from raw telegrams
//! - DTC message encoding/decoding against a catalog
//! - Telegram decoding using descriptors from config.toml

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use j1939_codec::{
    extract_bits, sign_extend, BitField, DtcCodec, DtcEntry, EncodedDtcMessage, LampStatus,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod config;
mod hex;
mod report;

use config::AppConfig;
use report::OutputFormat;

/// J1939 Codec - Bit fields, DTC messages and telegrams
#[derive(Parser, Debug)]
#[command(name = "j1939-cli")]
#[command(about = "Extract J1939 bit fields and encode/decode DTC messages", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract a bit field (0-based byte/bit) from a hex payload
    Extract {
        /// Payload bytes in hex (e.g. 645B07)
        #[arg(short, long, value_name = "HEX")]
        data: String,

        /// Byte holding the field's LSB (0-based)
        #[arg(long)]
        byte: usize,

        /// Bit of that byte holding the field's LSB (0-based, 0 = LSB)
        #[arg(long, default_value_t = 0)]
        bit: u8,

        /// Field length in bits (1-64)
        #[arg(short, long)]
        length: u8,

        /// Also show the two's complement interpretation
        #[arg(long)]
        signed: bool,
    },

    /// Encode active DTCs into 8-byte DTC messages
    Encode {
        /// Lamp status (4 bits; decimal, 0x.. or 0b..)
        #[arg(long, default_value = "0", value_parser = parse_lamps)]
        lamps: LampStatus,

        /// Active DTC (can be repeated)
        #[arg(long = "dtc", value_name = "SPN:FMI", value_parser = parse_dtc)]
        dtcs: Vec<DtcEntry>,
    },

    /// Decode 8-byte DTC messages
    Decode {
        /// Message bytes in hex (can be repeated, in sequence order)
        #[arg(short, long = "message", value_name = "HEX", required = true)]
        messages: Vec<String>,

        /// Number of messages to decode (default: all given)
        #[arg(long, value_name = "COUNT")]
        count: Option<usize>,
    },

    /// Look up a catalog index or an (SPN, FMI) pair
    Lookup {
        #[arg(long, requires = "fmi", conflicts_with = "index")]
        spn: Option<u32>,

        #[arg(long, requires = "spn")]
        fmi: Option<u8>,

        #[arg(long)]
        index: Option<usize>,
    },

    /// Decode a telegram using a descriptor from the config file
    Telegram {
        /// Descriptor name
        #[arg(short, long)]
        name: String,

        /// Payload bytes in hex
        #[arg(short, long, value_name = "HEX")]
        data: String,
    },

    /// Show catalog and configuration summary
    Info,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("J1939 Codec CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using codec library v{}", j1939_codec::VERSION);

    let (config, base_dir) = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            let config = config::load_config(path)?;
            let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
            (config, base_dir)
        }
        None => (AppConfig::default(), PathBuf::from(".")),
    };

    let catalog = Arc::new(config.load_catalog(&base_dir)?);
    log::debug!("Catalog '{}' with {} definitions", catalog.source(), catalog.len());

    let codec = DtcCodec::with_config(catalog, config.codec);
    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Txt
    };

    match args.command {
        Command::Extract {
            data,
            byte,
            bit,
            length,
            signed,
        } => {
            let data = hex::parse_hex(&data)?;
            let field = BitField::new(byte, bit, length);
            let raw = extract_bits(&data, field)
                .with_context(|| format!("Failed to extract {:?}", field))?;

            report::print_extract(
                &report::ExtractReport {
                    byte_index: byte,
                    bit_index: bit,
                    length_bits: length,
                    raw,
                    signed: signed.then(|| sign_extend(raw, length)),
                },
                format,
            )
        }

        Command::Encode { lamps, dtcs } => {
            let active = j1939_codec::ActiveDtcList::try_from(dtcs)
                .context("Too many active DTCs")?;
            let batch = codec.encode(lamps, &active)?;
            report::print_encode(&report::EncodeReport::new(lamps, &batch), format)
        }

        Command::Decode { messages, count } => {
            let messages = messages
                .iter()
                .map(|m| {
                    let bytes = hex::parse_hex(m)?;
                    EncodedDtcMessage::from_bytes(&bytes)
                        .with_context(|| format!("Invalid DTC message: {}", m))
                })
                .collect::<Result<Vec<_>>>()?;

            let count = count.unwrap_or(messages.len());
            let (lamps, active) = codec.decode(&messages, count)?;
            report::print_decode(
                &report::DecodeReport::new(lamps, &active, codec.catalog()),
                format,
            )
        }

        Command::Lookup { spn, fmi, index } => lookup_mode(&codec, spn, fmi, index),

        Command::Telegram { name, data } => {
            let descriptor = config
                .telegram(&name)
                .with_context(|| format!("Unknown telegram descriptor: {}", name))?;
            let data = hex::parse_hex(&data)?;
            let decoded = descriptor.decode(&data, chrono::Utc::now())?;
            report::print_telegram(&decoded, format)
        }

        Command::Info => {
            info_mode(&codec, &config);
            Ok(())
        }
    }
}

/// Lookup mode - resolve index -> (SPN, FMI) or (SPN, FMI) -> index
fn lookup_mode(
    codec: &DtcCodec,
    spn: Option<u32>,
    fmi: Option<u8>,
    index: Option<usize>,
) -> Result<()> {
    let catalog = codec.catalog();

    match (spn, fmi, index) {
        (Some(spn), Some(fmi), _) => {
            let index = catalog.lookup_index(spn, fmi)?;
            println!("SPN {} FMI {} -> index {}", spn, fmi, index);
        }
        (_, _, Some(index)) => {
            let entry = catalog.lookup_entry(index)?;
            println!("index {} -> {}", index, entry);
        }
        _ => anyhow::bail!("Specify --spn and --fmi, or --index"),
    }

    Ok(())
}

/// Info mode - summarise catalog, codec settings and descriptors
fn info_mode(codec: &DtcCodec, config: &AppConfig) {
    let catalog = codec.catalog();
    let settings = codec.config();

    println!("═══════════════════════════════════════════════");
    println!("  J1939 Codec - Configuration");
    println!("═══════════════════════════════════════════════\n");

    println!("📊 DTC Catalog:");
    println!("  Source:      {}", catalog.source());
    println!("  Definitions: {}", catalog.len());

    println!("\n⚙️  Codec:");
    println!("  Message count: {:?}", settings.message_count_mode);
    println!("  Unknown index: {:?}", settings.unknown_index_policy);
    println!("  Capacity:      {}", settings.capacity);

    println!("\n📄 Telegrams: {}", config.telegrams.len());
    for telegram in &config.telegrams {
        println!(
            "  {:<16} ID 0x{:08X}  {} bytes  {} signals",
            telegram.name(),
            telegram.can_id(),
            telegram.length(),
            telegram.signals().len()
        );
    }
}

/// Parse a 4-bit lamp status given as decimal, 0x.. or 0b..
fn parse_lamps(input: &str) -> std::result::Result<LampStatus, String> {
    let value = if let Some(bin) = input.strip_prefix("0b") {
        u8::from_str_radix(bin, 2)
    } else if let Some(hex) = input.strip_prefix("0x") {
        u8::from_str_radix(hex, 16)
    } else {
        input.parse()
    }
    .map_err(|e| format!("invalid lamp status {:?}: {}", input, e))?;

    LampStatus::new(value).map_err(|e| e.to_string())
}

/// Parse a DTC given as SPN:FMI
fn parse_dtc(input: &str) -> std::result::Result<DtcEntry, String> {
    let (spn, fmi) = input
        .split_once(':')
        .ok_or_else(|| format!("expected SPN:FMI, got {:?}", input))?;

    let spn = spn
        .trim()
        .parse()
        .map_err(|e| format!("invalid SPN {:?}: {}", spn, e))?;
    let fmi = fmi
        .trim()
        .parse()
        .map_err(|e| format!("invalid FMI {:?}: {}", fmi, e))?;

    Ok(DtcEntry::new(spn, fmi))
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
