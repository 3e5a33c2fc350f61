// Telegram descriptors loaded from a file and applied to received payloads
use chrono::Utc;
use j1939_codec::{load_descriptors_file, CodecError, PhysicalValue};
use std::io::Write;

const DESCRIPTORS: &str = r#"
[[telegrams]]
name = "ET1"
can_id = 0x18FEEE00
length = 8
cycle_time_ms = 1000
timeout_ms = 3000

[[telegrams.signals]]
name = "CoolantTemp"
byte = 1
bit = 1
length = 8
offset = -40
unit = "degC"

[[telegrams.signals]]
name = "OilTemp"
byte = 3
bit = 1
length = 16
scaling = 0.03125
offset = -273
value_kind = "float_scaled"
unit = "degC"

[[telegrams]]
name = "EFL_P1"
can_id = 0x18FEEF00
length = 8

[[telegrams.signals]]
name = "OilPressure"
byte = 4
bit = 1
length = 8
scaling = 4.0
value_kind = "float_scaled"
unit = "kPa"
"#;

fn write_descriptors() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(DESCRIPTORS.as_bytes()).unwrap();
    file
}

#[test]
fn load_and_decode() {
    let file = write_descriptors();
    let descriptors = load_descriptors_file(file.path()).unwrap();
    assert_eq!(descriptors.len(), 2);

    let et1 = &descriptors[0];
    assert_eq!(et1.cycle_time_ms(), 1000);

    // Coolant raw 130 -> 90 degC; oil raw 0x2A80 = 10880 -> 340 - 273 = 67 degC
    let data = [130, 0xFF, 0x80, 0x2A, 0xFF, 0xFF, 0xFF, 0xFF];
    let decoded = et1.decode(&data, Utc::now()).unwrap();

    assert_eq!(
        decoded.signal("CoolantTemp").unwrap().value,
        PhysicalValue::Integer(90)
    );
    assert_eq!(
        decoded.signal("OilTemp").unwrap().value,
        PhysicalValue::Float(67.0)
    );
}

#[test]
fn extract_signal_by_name() {
    let file = write_descriptors();
    let descriptors = load_descriptors_file(file.path()).unwrap();
    let efl = descriptors.iter().find(|d| d.name() == "EFL_P1").unwrap();

    let data = [0xFF, 0xFF, 0xFF, 100, 0xFF, 0xFF, 0xFF, 0xFF];
    assert_eq!(efl.extract_signal("OilPressure", &data).unwrap(), 100);
    assert_eq!(
        efl.physical_value("OilPressure", &data).unwrap(),
        PhysicalValue::Float(400.0)
    );
    assert!(matches!(
        efl.extract_signal("OilPressure", &data[..3]),
        Err(CodecError::OutOfRange { .. })
    ));
}
