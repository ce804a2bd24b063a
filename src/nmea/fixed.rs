//! Fixed-point decoding of NMEA numeric fields.
//!
//! Numeric fields have an integer part of unknown width. [decode] accumulates
//! the digits as if the decimal point sat after `assumed_width` digits, then
//! rescales once the actual decimal point position is known. The only floating
//! point division happens at that last step.
use crate::error::FieldError;

/// Fractional digits retained by [decode].
/// Digits beyond that precision are dropped.
const FRACTION_DIGITS: u32 = 7;

/// Decodes a (possibly signed) decimal field like `545.4`, `012.345` or `-1.2`.
///
/// `assumed_width` is the widest integer part the field usually carries.
/// Wider integer parts are still decoded exactly, as long as they fit
/// in the retained precision.
///
/// ## Returns
/// - Ok(None) for an empty field
/// - Ok(Some(value)) on success
/// - Err(e) for a malformed field
pub fn decode(field: &[u8], assumed_width: u32) -> Result<Option<f64>, FieldError> {
    let (negative, digits) = match field.split_first() {
        None => return Ok(None),
        Some((b'-', rest)) => (true, rest),
        Some(_) => (false, field),
    };

    let mut scale = 10_u64.pow(assumed_width + FRACTION_DIGITS);
    let mut provisional = 0_u64;
    let mut decimal_point = None;
    let mut consumed = 0;

    for (index, byte) in digits.iter().enumerate() {
        match byte {
            b'0'..=b'9' => {
                scale /= 10;
                provisional += u64::from(byte - b'0') * scale;
                consumed += 1;
            },
            b'.' => {
                if decimal_point.is_some() {
                    return Err(FieldError::RepeatedDecimalPoint);
                }
                decimal_point = Some(index);
            },
            other => return Err(FieldError::InvalidCharacter(*other)),
        }
    }

    if consumed == 0 {
        return Err(FieldError::Truncated);
    }

    let integer_digits = decimal_point.unwrap_or(digits.len()) as u32;

    if integer_digits > assumed_width + FRACTION_DIGITS {
        return Err(FieldError::TooWide);
    }

    // provisional / 10^F has `assumed_width` integer digits,
    // correct it by 10^(integer_digits - assumed_width)
    let exponent = (FRACTION_DIGITS + assumed_width) as i32 - integer_digits as i32;
    let value = provisional as f64 / 10.0_f64.powi(exponent);

    Ok(Some(if negative { -value } else { value }))
}

/// Decodes a small unsigned integer field (no decimal point),
/// made of at most `max_digits` digits.
pub fn decode_integer(field: &[u8], max_digits: usize) -> Result<Option<u32>, FieldError> {
    if field.is_empty() {
        return Ok(None);
    }

    if field.len() > max_digits {
        return Err(FieldError::TooWide);
    }

    let mut value = 0;
    for byte in field {
        value = value * 10 + u32::from(digit(*byte)?);
    }

    Ok(Some(value))
}

/// Decodes a `HHMMSS[.sss]` UTC time field into a HHMMSS.sss number.
/// Fractional digits past the millisecond are ignored.
pub fn decode_time(field: &[u8]) -> Result<Option<f64>, FieldError> {
    const WEIGHTS: [u32; 6] = [100_000, 10_000, 1_000, 100, 10, 1];
    const FRACTION_WEIGHTS: [u32; 3] = [100, 10, 1];

    if field.is_empty() {
        return Ok(None);
    }

    if field.len() < WEIGHTS.len() {
        return Err(FieldError::Truncated);
    }

    let (integer, fraction) = field.split_at(WEIGHTS.len());

    let mut hhmmss = 0;
    for (byte, weight) in integer.iter().zip(WEIGHTS) {
        hhmmss += u32::from(digit(*byte)?) * weight;
    }

    let (hours, minutes, seconds) = (hhmmss / 10_000, (hhmmss / 100) % 100, hhmmss % 100);
    if hours > 23 || minutes > 59 || seconds > 60 {
        return Err(FieldError::OutOfRange);
    }

    let mut millis = 0;
    match fraction.split_first() {
        None => {},
        Some((b'.', digits)) => {
            for (index, byte) in digits.iter().enumerate() {
                let value = digit(*byte)?;
                if let Some(weight) = FRACTION_WEIGHTS.get(index) {
                    millis += u32::from(value) * weight;
                }
            }
        },
        Some((other, _)) => return Err(FieldError::InvalidCharacter(*other)),
    }

    Ok(Some(f64::from(hhmmss) + f64::from(millis) / 1_000.0))
}

/// Decodes a `DDMM.MMMM` (`degree_digits` = 2) or `DDDMM.MMMM` (`degree_digits` = 3)
/// coordinate field into unsigned decimal degrees.
pub fn decode_coordinate(field: &[u8], degree_digits: usize) -> Result<Option<f64>, FieldError> {
    if field.is_empty() {
        return Ok(None);
    }

    if field.len() <= degree_digits {
        return Err(FieldError::Truncated);
    }

    let (degrees, minutes) = field.split_at(degree_digits);

    let degrees = decode_integer(degrees, degree_digits)?.ok_or(FieldError::Truncated)?;

    if minutes.first() == Some(&b'-') {
        return Err(FieldError::InvalidCharacter(b'-'));
    }

    let minutes = decode(minutes, 2)?.ok_or(FieldError::Truncated)?;

    if minutes >= 60.0 {
        return Err(FieldError::OutOfRange);
    }

    Ok(Some(f64::from(degrees) + minutes / 60.0))
}

fn digit(byte: u8) -> Result<u8, FieldError> {
    if byte.is_ascii_digit() {
        Ok(byte - b'0')
    } else {
        Err(FieldError::InvalidCharacter(byte))
    }
}
