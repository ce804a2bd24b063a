//! VTG (course and speed over ground) decoding
use crate::error::{DecodeError, FieldError};

use super::fixed::decode;

const TRUE_COURSE: usize = 1;
const SPEED_KMH: usize = 7;
const SPEED_KMH_UNIT: usize = 8;

const REQUIRED_FIELDS: usize = SPEED_KMH_UNIT + 1;

/// Decoded VTG content.
/// Empty fields are `None` and do not update the navigation record.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Velocity {
    /// True course over ground, integer degrees in 0..360
    pub heading: Option<u16>,

    /// Speed over ground in km/h
    pub ground_speed: Option<f64>,
}

/// Decodes a validated VTG payload (sentence body without `*` and checksum).
pub fn decode_payload(payload: &[u8]) -> Result<Velocity, DecodeError> {
    let mut fields = [&payload[..0]; REQUIRED_FIELDS];
    let mut found = 0;

    for (index, field) in payload.split(|byte| *byte == b',').enumerate() {
        if let Some(slot) = fields.get_mut(index) {
            *slot = field;
        }
        found = index + 1;
    }

    if found < REQUIRED_FIELDS {
        return Err(DecodeError::Truncated {
            expected: REQUIRED_FIELDS,
            found,
        });
    }

    let course = decode(fields[TRUE_COURSE], 3).map_err(DecodeError::field(TRUE_COURSE))?;

    let heading = match course {
        Some(course) if course < 0.0 => {
            return Err(DecodeError::Field {
                index: TRUE_COURSE,
                error: FieldError::OutOfRange,
            });
        },
        Some(course) => Some(course.trunc().rem_euclid(360.0) as u16),
        None => None,
    };

    match fields[SPEED_KMH_UNIT] {
        [] | [b'K'] => {},
        [unit, ..] => {
            return Err(DecodeError::Field {
                index: SPEED_KMH_UNIT,
                error: FieldError::InvalidUnit(*unit),
            });
        },
    }

    let ground_speed = decode(fields[SPEED_KMH], 3).map_err(DecodeError::field(SPEED_KMH))?;

    if ground_speed.is_some_and(|speed| speed < 0.0) {
        return Err(DecodeError::Field {
            index: SPEED_KMH,
            error: FieldError::OutOfRange,
        });
    }

    Ok(Velocity {
        heading,
        ground_speed,
    })
}

#[cfg(test)]
mod test {
    use super::{Velocity, decode_payload};
    use crate::error::{DecodeError, FieldError};

    #[test]
    fn test_reference_sentence() {
        let velocity = decode_payload(b"GNVTG,054.7,T,034.4,M,005.5,N,010.2,K").unwrap();

        assert_eq!(velocity.heading, Some(54));
        assert!((velocity.ground_speed.unwrap() - 10.2).abs() < 1.0E-9);
    }

    #[test]
    fn test_mode_indicator() {
        let velocity = decode_payload(b"GNVTG,7.1,T,,M,1.2,N,2.25,K,A").unwrap();

        assert_eq!(velocity.heading, Some(7));
        assert!((velocity.ground_speed.unwrap() - 2.25).abs() < 1.0E-9);
    }

    #[test]
    fn test_heading_truncation() {
        let velocity = decode_payload(b"GNVTG,359.95,T,,M,0.00,N,0.00,K,N").unwrap();
        assert_eq!(velocity.heading, Some(359));
        assert_eq!(velocity.ground_speed, Some(0.0));

        let velocity = decode_payload(b"GNVTG,360.0,T,,M,0.00,N,0.00,K,N").unwrap();
        assert_eq!(velocity.heading, Some(0));
    }

    #[test]
    fn test_oversized_heading_wraps() {
        let velocity = decode_payload(b"GNVTG,9999999999.0,T,,M,0.0,N,0.0,K").unwrap();
        assert_eq!(velocity.heading, Some(279));

        let velocity = decode_payload(b"GNVTG,725.3,T,,M,0.0,N,0.0,K").unwrap();
        assert_eq!(velocity.heading, Some(5));
    }

    #[test]
    fn test_empty_fields() {
        assert_eq!(
            decode_payload(b"GNVTG,,T,,M,,N,,K,N"),
            Ok(Velocity::default())
        );
    }

    #[test]
    fn test_malformed_fields() {
        assert_eq!(
            decode_payload(b"GNVTG,05a.7,T,034.4,M,005.5,N,010.2,K"),
            Err(DecodeError::Field {
                index: 1,
                error: FieldError::InvalidCharacter(b'a'),
            })
        );

        assert_eq!(
            decode_payload(b"GNVTG,-54.7,T,034.4,M,005.5,N,010.2,K"),
            Err(DecodeError::Field {
                index: 1,
                error: FieldError::OutOfRange,
            })
        );

        assert_eq!(
            decode_payload(b"GNVTG,054.7,T,034.4,M,005.5,N,010.2,N"),
            Err(DecodeError::Field {
                index: 8,
                error: FieldError::InvalidUnit(b'N'),
            })
        );

        assert_eq!(
            decode_payload(b"GNVTG,054.7,T,034.4,M,005.5,N,010..2,K"),
            Err(DecodeError::Field {
                index: 7,
                error: FieldError::RepeatedDecimalPoint,
            })
        );
    }

    #[test]
    fn test_truncated_sentence() {
        assert_eq!(
            decode_payload(b"GNVTG,054.7,T,034.4,M"),
            Err(DecodeError::Truncated {
                expected: 9,
                found: 5,
            })
        );
    }
}
