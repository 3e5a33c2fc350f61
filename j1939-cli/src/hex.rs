//! Hex payload parsing for command-line input

use anyhow::{bail, Result};

fn hex_digit_to_u8(byte: u8) -> Result<u8> {
    Ok(match byte {
        b'0'..=b'9' => byte - b'0',
        b'a'..=b'f' => byte - b'a' + 10,
        b'A'..=b'F' => byte - b'A' + 10,
        _ => bail!("Illegal hex digit: {:?}", byte as char),
    })
}

/// Parse a hex payload such as `645B07`, `64 5B 07` or `64:5B:07`
pub fn parse_hex(input: &str) -> Result<Vec<u8>> {
    let digits: Vec<u8> = input
        .bytes()
        .filter(|b| !matches!(b, b' ' | b':' | b'_'))
        .collect();
    let digits = digits
        .strip_prefix(b"0x")
        .or_else(|| digits.strip_prefix(b"0X"))
        .unwrap_or(&digits);

    // Make sure data is a multiple of 2 (otherwise we can't pair the nibbles)
    if digits.len() % 2 != 0 {
        bail!("Hex payload has an odd number of digits: {:?}", input);
    }

    digits
        .chunks(2)
        .map(|pair| Ok((hex_digit_to_u8(pair[0])? << 4) | hex_digit_to_u8(pair[1])?))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        assert_eq!(parse_hex("645B07").unwrap(), vec![0x64, 0x5B, 0x07]);
    }

    #[test]
    fn test_parse_separators_and_prefix() {
        assert_eq!(parse_hex("0x64 5b:07").unwrap(), vec![0x64, 0x5B, 0x07]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_hex("645").is_err());
        assert!(parse_hex("6G").is_err());
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_hex("").unwrap().is_empty());
    }
}
