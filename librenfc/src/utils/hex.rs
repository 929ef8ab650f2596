// librenfc/src/utils/hex.rs

//! Hexadecimal helpers for logging tag memory and command bytes.

/// Convert a byte slice to a lowercase hex string without separators.
///
/// Example: `&[0xde, 0xad]` -> `"dead"`
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        use std::fmt::Write;
        // write! never fails writing to a String
        let _ = write!(&mut s, "{:02x}", b);
    }
    s
}

/// Convert a byte slice to a lowercase hex string with a single space between
/// each byte.
///
/// Example: `&[0xde, 0xad]` -> `"de ad"`
pub fn bytes_to_hex_spaced(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i != 0 {
            s.push(' ');
        }
        use std::fmt::Write;
        let _ = write!(&mut s, "{:02x}", b);
    }
    s
}

/// Parse a hex string into bytes.
///
/// Accepts strings with or without ASCII whitespace. Returns an error message
/// string on parse failure.
pub fn parse_hex(s: &str) -> Result<Vec<u8>, String> {
    // Remove ASCII whitespace
    let mut cleaned = String::with_capacity(s.len());
    for c in s.chars() {
        if !c.is_whitespace() {
            cleaned.push(c);
        }
    }

    if cleaned.len() % 2 != 0 {
        return Err("hex string has odd length".to_string());
    }

    let mut out = Vec::with_capacity(cleaned.len() / 2);
    let mut i = 0usize;
    while i < cleaned.len() {
        let hi = cleaned.as_bytes()[i] as char;
        let lo = cleaned.as_bytes()[i + 1] as char;
        let pair = format!("{}{}", hi, lo);
        let byte = u8::from_str_radix(&pair, 16)
            .map_err(|e| format!("invalid hex pair '{}': {}", pair, e))?;
        out.push(byte);
        i += 2;
    }

    Ok(out)
}

/// Multi-line hexdump of `bytes`, 8 bytes per line, each line prefixed with
/// the tag address of its first byte.
///
/// ```text
/// f860  3d 8c 18 0b 03 00 00 00  =.......
/// ```
pub fn hex_dump(bytes: &[u8], address: u16) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(bytes.len() / 8 * 34 + 34);
    for (i, line) in bytes.chunks(8).enumerate() {
        if i != 0 {
            out.push('\n');
        }
        let line_address = address as usize + i * 8;
        let _ = write!(&mut out, "{:04x}  {:<23}  ", line_address, bytes_to_hex_spaced(line));
        for &b in line {
            out.push(if b.is_ascii_graphic() { b as char } else { '.' });
        }
    }
    out
}
