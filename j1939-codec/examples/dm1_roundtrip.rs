// Encode a set of active DTCs, print the messages, and decode them again
//
// Run with: RUST_LOG=debug cargo run --example dm1_roundtrip

use j1939_codec::{ActiveDtcList, DtcCatalog, DtcCodec, DtcEntry, LampStatus};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let catalog = Arc::new(DtcCatalog::reference());
    let codec = DtcCodec::new(catalog.clone());

    let mut active = ActiveDtcList::new();
    for (spn, fmi) in [(100, 3), (110, 0), (190, 16), (3364, 18), (5246, 0), (999_999, 0)] {
        active.push(DtcEntry::new(spn, fmi))?;
    }

    let lamps = LampStatus::new(0b0101)?;
    let batch = codec.encode(lamps, &active)?;

    println!("Catalog: {} ({} definitions)", catalog.source(), catalog.len());
    println!("Encoded {} DTCs into {} messages:", active.len(), batch.message_count);
    for (seq, message) in batch.messages.iter().enumerate() {
        println!("  [{}] {}  slots {:?}", seq, message, message.slots()?);
    }

    let (decoded_lamps, decoded) = codec.decode(&batch.messages, batch.message_count)?;
    println!("\nDecoded lamps {}:", decoded_lamps);
    for entry in &decoded {
        println!("  {}", entry);
    }

    Ok(())
}
