//! Report generation
//!
//! Renders command results as human-readable text or JSON.

use anyhow::Result;
use j1939_codec::{ActiveDtcList, DecodedTelegram, DtcCatalog, EncodedDtcBatch, LampStatus};
use serde::Serialize;

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Txt,
    Json,
}

/// Result of a bit-field extraction
#[derive(Debug, Serialize)]
pub struct ExtractReport {
    pub byte_index: usize,
    pub bit_index: u8,
    pub length_bits: u8,
    pub raw: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signed: Option<i64>,
}

/// Result of encoding active DTCs
#[derive(Debug, Serialize)]
pub struct EncodeReport {
    pub lamps: u8,
    pub message_count: usize,
    pub messages: Vec<String>,
}

impl EncodeReport {
    pub fn new(lamps: LampStatus, batch: &EncodedDtcBatch) -> Self {
        Self {
            lamps: lamps.bits(),
            message_count: batch.message_count,
            messages: batch.messages.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// One decoded DTC with its catalog index
#[derive(Debug, Serialize)]
pub struct DtcRow {
    pub index: Option<u16>,
    pub spn: u32,
    pub fmi: u8,
}

/// Result of decoding DTC messages
#[derive(Debug, Serialize)]
pub struct DecodeReport {
    pub lamps: u8,
    pub dtcs: Vec<DtcRow>,
}

impl DecodeReport {
    pub fn new(lamps: LampStatus, active: &ActiveDtcList, catalog: &DtcCatalog) -> Self {
        Self {
            lamps: lamps.bits(),
            dtcs: active
                .iter()
                .map(|e| DtcRow {
                    index: catalog.lookup_index(e.spn, e.fmi).ok(),
                    spn: e.spn,
                    fmi: e.fmi,
                })
                .collect(),
        }
    }
}

/// Print an extraction result
pub fn print_extract(report: &ExtractReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Txt => {
            println!(
                "Field byte {} bit {} length {}",
                report.byte_index, report.bit_index, report.length_bits
            );
            println!("  raw:    {} (0x{:X})", report.raw, report.raw);
            if let Some(signed) = report.signed {
                println!("  signed: {}", signed);
            }
            Ok(())
        }
    }
}

/// Print an encoded DTC batch
pub fn print_encode(report: &EncodeReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Txt => {
            println!("Lamps: {:#06b}", report.lamps);
            println!("Messages: {}", report.message_count);
            for (seq, message) in report.messages.iter().enumerate() {
                println!("  [{}] {}", seq, message);
            }
            Ok(())
        }
    }
}

/// Print decoded DTCs
pub fn print_decode(report: &DecodeReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Txt => {
            println!("Lamps: {:#06b}", report.lamps);
            println!("Active DTCs: {}", report.dtcs.len());
            for row in &report.dtcs {
                match row.index {
                    Some(index) => {
                        println!("  #{:<4} SPN {:<6} FMI {}", index, row.spn, row.fmi)
                    }
                    None => println!("  #?    SPN {:<6} FMI {}", row.spn, row.fmi),
                }
            }
            Ok(())
        }
    }
}

/// Print a decoded telegram
pub fn print_telegram(telegram: &DecodedTelegram, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(telegram),
        OutputFormat::Txt => {
            println!("{} (ID 0x{:X})", telegram.name, telegram.can_id);
            for signal in &telegram.signals {
                println!(
                    "  {:<24} {:>12} {:<8} raw {}",
                    signal.name,
                    signal.value.to_string(),
                    signal.unit.as_deref().unwrap_or(""),
                    signal.raw_value
                );
            }
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
