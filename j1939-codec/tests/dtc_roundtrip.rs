// End-to-end DTC encode/decode through the public API
use j1939_codec::{
    ActiveDtcList, CodecConfig, DtcCatalog, DtcCodec, DtcEntry, EncodedDtcMessage, LampStatus,
    MessageCountMode, ABSENT_INDEX,
};
use std::sync::Arc;

fn active(pairs: &[(u32, u8)]) -> ActiveDtcList {
    let mut list = ActiveDtcList::new();
    for &(spn, fmi) in pairs {
        list.push(DtcEntry::new(spn, fmi)).unwrap();
    }
    list
}

#[test]
fn round_trip_preserves_order_and_lamps() {
    let codec = DtcCodec::new(Arc::new(DtcCatalog::reference()));
    let list = active(&[(190, 16), (100, 3), (84, 2)]);
    let lamps = LampStatus::new(0b0101).unwrap();

    let batch = codec.encode(lamps, &list).unwrap();
    let (decoded_lamps, decoded) = codec.decode(&batch.messages, batch.message_count).unwrap();

    assert_eq!(decoded_lamps, lamps);
    assert_eq!(decoded.as_slice(), list.as_slice());
}

#[test]
fn round_trip_every_size_in_both_modes() {
    let catalog = Arc::new(DtcCatalog::reference());
    let pairs: Vec<(u32, u8)> = catalog.iter().step_by(7).map(|e| (e.spn, e.fmi)).collect();

    for mode in [MessageCountMode::Legacy, MessageCountMode::Ceiling] {
        let codec = DtcCodec::with_config(
            catalog.clone(),
            CodecConfig::new().with_message_count_mode(mode),
        );
        for n in 0..=20 {
            let list = active(&pairs[..n]);
            let lamps = LampStatus::new((n % 16) as u8).unwrap();

            let batch = codec.encode(lamps, &list).unwrap();
            assert_eq!(batch.messages.len(), batch.message_count);

            let (decoded_lamps, decoded) =
                codec.decode(&batch.messages, batch.message_count).unwrap();
            assert_eq!(decoded_lamps, lamps, "mode {:?} n {}", mode, n);
            assert_eq!(decoded, list, "mode {:?} n {}", mode, n);
        }
    }
}

#[test]
fn message_count_edge_cases() {
    let codec = DtcCodec::new(Arc::new(DtcCatalog::reference()));
    assert_eq!(codec.message_count(0), 1);
    assert_eq!(codec.message_count(4), 1);
    assert_eq!(codec.message_count(5), 2);
    assert_eq!(codec.message_count(10), 3);
}

#[test]
fn decode_received_bytes() {
    let codec = DtcCodec::new(Arc::new(DtcCatalog::reference()));

    // Lamps 0b0101, sequence 0, total 1, slots [17, 31, absent, absent, absent]
    let value = (1u64 << 54)
        | (0b0101u64 << 50)
        | (17u64 << 40)
        | (31u64 << 30)
        | ((ABSENT_INDEX as u64) << 20)
        | ((ABSENT_INDEX as u64) << 10)
        | ABSENT_INDEX as u64;
    let bytes = value.to_le_bytes();

    let message = EncodedDtcMessage::from_bytes(&bytes).unwrap();
    let (lamps, decoded) = codec.decode(&[message], 1).unwrap();

    assert_eq!(lamps.bits(), 0b0101);
    assert_eq!(
        decoded.as_slice(),
        &[DtcEntry::new(100, 3), DtcEntry::new(110, 0)]
    );
}

#[test]
fn custom_catalog_substitution() {
    let catalog = Arc::new(DtcCatalog::from_pairs(&[(1, 1), (2, 2), (3, 3)]).unwrap());
    let codec = DtcCodec::new(catalog);
    let list = active(&[(3, 3), (1, 1)]);

    let batch = codec.encode(LampStatus::default(), &list).unwrap();
    assert_eq!(batch.messages[0].slots().unwrap()[..2], [2, 0]);

    let (_, decoded) = codec.decode(&batch.messages, batch.message_count).unwrap();
    assert_eq!(decoded, list);
}
