use crate::{Error, Result};

const UTF8_BOM: &[u8] = &[0xef, 0xbb, 0xbf];
const UTF16_LE_BOM: &[u8] = &[0xff, 0xfe];
const UTF16_BE_BOM: &[u8] = &[0xfe, 0xff];

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Endian {
    Little,
    Big,
}

/// Decodes the raw bytes of a describe-table document.
///
/// PowerShell redirection writes UTF-16 with a BOM, editors on Windows like
/// to add a UTF-8 BOM, and everything else is plain UTF-8. BOM-less input
/// that is not valid UTF-8 is retried as UTF-16 LE.
pub fn decode(raw: &[u8]) -> Result<String> {
    if let Some(rest) = raw.strip_prefix(UTF16_LE_BOM) {
        return decode_utf16(rest, Endian::Little);
    }
    if let Some(rest) = raw.strip_prefix(UTF16_BE_BOM) {
        return decode_utf16(rest, Endian::Big);
    }

    let raw = raw.strip_prefix(UTF8_BOM).unwrap_or(raw);
    match std::str::from_utf8(raw) {
        Ok(text) => Ok(text.to_string()),
        Err(_) => decode_utf16(raw, Endian::Little),
    }
}

fn decode_utf16(raw: &[u8], endian: Endian) -> Result<String> {
    if raw.len() % 2 != 0 {
        return Err(Error::malformed(
            "input is neither UTF-8 nor UTF-16 (odd number of bytes)",
        ));
    }

    let units: Vec<u16> = raw
        .chunks_exact(2)
        .map(|pair| match endian {
            Endian::Little => u16::from_le_bytes([pair[0], pair[1]]),
            Endian::Big => u16::from_be_bytes([pair[0], pair[1]]),
        })
        .collect();

    String::from_utf16(&units)
        .map_err(|err| Error::malformed(format!("input is not valid UTF-16: {err}")))
}
