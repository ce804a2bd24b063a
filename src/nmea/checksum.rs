//! NMEA checksum validation

/// XOR of all payload bytes
pub fn checksum(payload: &[u8]) -> u8 {
    payload.iter().fold(0, |cs, byte| cs ^ byte)
}

/// Verifies a sentence body, starting right after the `$` marker
/// and terminated by `*` and two hexadecimal digits.
///
/// ## Returns
/// - Some(payload) (the bytes preceding `*`) when the checksum matches
/// - None for a checksum mismatch or a malformed body
pub fn verify(body: &[u8]) -> Option<&[u8]> {
    let star = body.iter().position(|byte| *byte == b'*')?;
    let (payload, suffix) = (&body[..star], &body[star + 1..]);

    let [high, low] = suffix else {
        return None;
    };

    let expected = (nibble(*high)? << 4) | nibble(*low)?;

    if checksum(payload) == expected {
        Some(payload)
    } else {
        None
    }
}

fn nibble(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        _ => None,
    }
}
