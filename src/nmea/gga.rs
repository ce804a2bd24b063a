//! GGA (position fix) decoding
use crate::error::{DecodeError, FieldError};

use super::fixed::{decode, decode_coordinate, decode_integer, decode_time};

const UTC_TIME: usize = 1;
const LATITUDE: usize = 2;
const LATITUDE_HEMISPHERE: usize = 3;
const LONGITUDE: usize = 4;
const LONGITUDE_HEMISPHERE: usize = 5;
const FIX_QUALITY: usize = 6;
const SATELLITES: usize = 7;
const ALTITUDE: usize = 9;

/// Fields up to (and including) the altitude are required.
/// HDOP, geoid separation and DGPS fields are skipped.
const REQUIRED_FIELDS: usize = ALTITUDE + 1;

/// Decoded GGA content.
/// Empty fields are `None` and do not update the navigation record.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Position {
    /// HHMMSS.sss
    pub utc_time: Option<f64>,

    /// Signed decimal degrees
    pub latitude: Option<f64>,

    /// Signed decimal degrees
    pub longitude: Option<f64>,

    /// Fix indicator, not interpreted
    pub fix_quality: Option<u8>,

    pub num_satellites: Option<u8>,

    /// Meters above mean sea level, truncated toward zero
    pub altitude: Option<i32>,
}

/// Decodes a validated GGA payload (sentence body without `*` and checksum).
pub fn decode_payload(payload: &[u8]) -> Result<Position, DecodeError> {
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

    let utc_time = decode_time(fields[UTC_TIME]).map_err(DecodeError::field(UTC_TIME))?;

    let latitude = coordinate(
        &fields,
        (LATITUDE, LATITUDE_HEMISPHERE),
        2,
        (b'N', b'S'),
        90.0,
    )?;

    let longitude = coordinate(
        &fields,
        (LONGITUDE, LONGITUDE_HEMISPHERE),
        3,
        (b'E', b'W'),
        180.0,
    )?;

    let fix_quality =
        decode_integer(fields[FIX_QUALITY], 1).map_err(DecodeError::field(FIX_QUALITY))?;

    let num_satellites =
        decode_integer(fields[SATELLITES], 2).map_err(DecodeError::field(SATELLITES))?;

    let altitude = match decode(fields[ALTITUDE], 3).map_err(DecodeError::field(ALTITUDE))? {
        Some(altitude) => {
            let meters = altitude.trunc();

            if meters < f64::from(i32::MIN) || meters > f64::from(i32::MAX) {
                return Err(DecodeError::Field {
                    index: ALTITUDE,
                    error: FieldError::OutOfRange,
                });
            }

            Some(meters as i32)
        },
        None => None,
    };

    Ok(Position {
        utc_time,
        latitude,
        longitude,
        // single digits: always fit
        fix_quality: fix_quality.map(|value| value as u8),
        num_satellites: num_satellites.map(|value| value as u8),
        altitude,
    })
}

/// Decodes a coordinate and its hemisphere indicator, located by `(index, hemisphere)`,
/// `hemispheres` being the (positive, negative) indicators.
fn coordinate(
    fields: &[&[u8]],
    (index, hemisphere): (usize, usize),
    degree_digits: usize,
    hemispheres: (u8, u8),
    limit: f64,
) -> Result<Option<f64>, DecodeError> {
    let value =
        decode_coordinate(fields[index], degree_digits).map_err(DecodeError::field(index))?;

    let sign = match fields[hemisphere] {
        [] => None,
        [indicator] if *indicator == hemispheres.0 => Some(1.0),
        [indicator] if *indicator == hemispheres.1 => Some(-1.0),
        [indicator, ..] => {
            return Err(DecodeError::Field {
                index: hemisphere,
                error: FieldError::InvalidHemisphere(*indicator),
            });
        },
    };

    match (value, sign) {
        (None, None) => Ok(None),
        (Some(value), Some(sign)) => {
            if value > limit {
                Err(DecodeError::Field {
                    index,
                    error: FieldError::OutOfRange,
                })
            } else {
                Ok(Some(sign * value))
            }
        },
        _ => Err(DecodeError::MissingHemisphere { index }),
    }
}

#[cfg(test)]
mod test {
    use super::{Position, decode_payload};
    use crate::error::{DecodeError, FieldError};

    #[test]
    fn test_reference_sentence() {
        let position =
            decode_payload(b"GNGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,")
                .unwrap();

        assert_eq!(position.utc_time, Some(123519.0));
        assert!((position.latitude.unwrap() - 48.1173).abs() < 1.0E-4);
        assert!((position.longitude.unwrap() - 11.5167).abs() < 1.0E-4);
        assert_eq!(position.fix_quality, Some(1));
        assert_eq!(position.num_satellites, Some(8));
        assert_eq!(position.altitude, Some(545));
    }

    #[test]
    fn test_southern_western_hemispheres() {
        let position = decode_payload(
            b"GNGGA,092750.000,5321.6802,S,00630.3372,W,1,8,1.03,61.7,M,55.2,M,,",
        )
        .unwrap();

        assert!((position.utc_time.unwrap() - 92750.0).abs() < 1.0E-9);
        assert!((position.latitude.unwrap() + 53.36134).abs() < 1.0E-5);
        assert!((position.longitude.unwrap() + 6.50562).abs() < 1.0E-5);
        assert_eq!(position.num_satellites, Some(8));
        assert_eq!(position.altitude, Some(61));
    }

    #[test]
    fn test_no_fix() {
        let position = decode_payload(b"GNGGA,123520.00,,,,,0,00,99.99,,,,,,").unwrap();

        assert_eq!(
            position,
            Position {
                utc_time: Some(123520.0),
                fix_quality: Some(0),
                num_satellites: Some(0),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_missing_altitude() {
        let position =
            decode_payload(b"GNGGA,123519,4807.038,N,01131.000,E,1,08,0.9,,M,46.9,M,,").unwrap();
        assert_eq!(position.altitude, None);
        assert!(position.latitude.is_some());
    }

    #[test]
    fn test_malformed_fields() {
        assert_eq!(
            decode_payload(b"GNGGA,123519,48x7.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,"),
            Err(DecodeError::Field {
                index: 2,
                error: FieldError::InvalidCharacter(b'x'),
            })
        );

        assert_eq!(
            decode_payload(b"GNGGA,123519,4807.038,Q,01131.000,E,1,08,0.9,545.4,M,46.9,M,,"),
            Err(DecodeError::Field {
                index: 3,
                error: FieldError::InvalidHemisphere(b'Q'),
            })
        );

        assert_eq!(
            decode_payload(b"GNGGA,123519,4807.038,N,01131.000,N,1,08,0.9,545.4,M,46.9,M,,"),
            Err(DecodeError::Field {
                index: 5,
                error: FieldError::InvalidHemisphere(b'N'),
            })
        );

        assert_eq!(
            decode_payload(b"GNGGA,123519,4807.038,,01131.000,E,1,08,0.9,545.4,M,46.9,M,,"),
            Err(DecodeError::MissingHemisphere { index: 2 })
        );

        assert_eq!(
            decode_payload(b"GNGGA,123519,4807.038,N,01131.000,E,1,108,0.9,545.4,M,46.9,M,,"),
            Err(DecodeError::Field {
                index: 7,
                error: FieldError::TooWide,
            })
        );

        assert_eq!(
            decode_payload(b"GNGGA,123519,4807.038,N,18131.000,E,1,08,0.9,545.4,M,46.9,M,,"),
            Err(DecodeError::Field {
                index: 4,
                error: FieldError::OutOfRange,
            })
        );
    }

    #[test]
    fn test_altitude_range() {
        let position =
            decode_payload(b"GNGGA,123519,4807.038,N,01131.000,E,1,08,0.9,-12.8,M,46.9,M,,")
                .unwrap();
        assert_eq!(position.altitude, Some(-12));

        let position =
            decode_payload(b"GNGGA,123519,4807.038,N,01131.000,E,1,08,0.9,2147483647.9,M,,M,,")
                .unwrap();
        assert_eq!(position.altitude, Some(i32::MAX));

        for altitude in ["9999999999.0", "-9999999999.0", "2147483648"] {
            let sentence = format!(
                "GNGGA,123519,4807.038,N,01131.000,E,1,08,0.9,{},M,46.9,M,,",
                altitude
            );

            assert_eq!(
                decode_payload(sentence.as_bytes()),
                Err(DecodeError::Field {
                    index: 9,
                    error: FieldError::OutOfRange,
                }),
                "altitude {} should be rejected",
                altitude
            );
        }
    }

    #[test]
    fn test_truncated_sentence() {
        assert_eq!(
            decode_payload(b"GNGGA,123519,4807.038,N,01131.000,E,1,08"),
            Err(DecodeError::Truncated {
                expected: 10,
                found: 8,
            })
        );
    }
}
