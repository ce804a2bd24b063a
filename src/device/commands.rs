//! Receiver configuration catalog.
//! These are static sentences, sent once at startup.
use std::str::FromStr;

use crate::error::Error;

/// NMEA on UART1, 9600 bauds
pub const PUBX_CONFIG_NMEA: &str = "$PUBX,41,1,07,03,9600,0*10\r\n";

pub const PUBX_ENABLE_GGA: &str = "$PUBX,40,GGA,0,1,0,0,0,0*5B\r\n";
pub const PUBX_ENABLE_VTG: &str = "$PUBX,40,VTG,0,1,0,0,0,0*5F\r\n";
pub const PUBX_DISABLE_RMC: &str = "$PUBX,40,RMC,0,0,0,0,0,0*47\r\n";
pub const PUBX_DISABLE_GSA: &str = "$PUBX,40,GSA,0,0,0,0,0,0*4E\r\n";
pub const PUBX_DISABLE_GLL: &str = "$PUBX,40,GLL,0,0,0,0,0,0*5C\r\n";
pub const PUBX_DISABLE_GNS: &str = "$PUBX,40,GNS,0,0,0,0,0,0*41\r\n";

pub const PMTK_SET_NMEA_UPDATE_1HZ: &str = "$PMTK220,1000*1F\r\n";
pub const PMTK_SET_NMEA_UPDATE_5HZ: &str = "$PMTK220,200*2C\r\n";
pub const PMTK_SET_NMEA_UPDATE_10HZ: &str = "$PMTK220,100*2F\r\n";

pub const PMTK_API_SET_FIX_CTL_1HZ: &str = "$PMTK300,1000,0,0,0,0*1C\r\n";
pub const PMTK_API_SET_FIX_CTL_5HZ: &str = "$PMTK300,200,0,0,0,0*2F\r\n";

pub const PMTK_ENABLE_WAAS: &str = "$PMTK301,2*2E\r\n";

/// NMEA output rate
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub enum UpdateRate {
    Hz1,
    Hz5,
    #[default]
    Hz10,
}

impl FromStr for UpdateRate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_end_matches("Hz").trim_end_matches("hz") {
            "1" => Ok(Self::Hz1),
            "5" => Ok(Self::Hz5),
            "10" => Ok(Self::Hz10),
            _ => Err(Error::InvalidUpdateRate(s.to_string())),
        }
    }
}

impl UpdateRate {
    fn nmea_update(&self) -> &'static str {
        match self {
            Self::Hz1 => PMTK_SET_NMEA_UPDATE_1HZ,
            Self::Hz5 => PMTK_SET_NMEA_UPDATE_5HZ,
            Self::Hz10 => PMTK_SET_NMEA_UPDATE_10HZ,
        }
    }

    fn fix_control(&self) -> &'static str {
        match self {
            Self::Hz1 => PMTK_API_SET_FIX_CTL_1HZ,
            // position fix is limited to 5 Hz
            Self::Hz5 | Self::Hz10 => PMTK_API_SET_FIX_CTL_5HZ,
        }
    }
}

/// Startup sequence: GGA + VTG output only, at desired rate, with WAAS.
pub fn startup_sequence(rate: UpdateRate) -> Vec<&'static str> {
    vec![
        PUBX_CONFIG_NMEA,
        PUBX_ENABLE_GGA,
        PUBX_ENABLE_VTG,
        PUBX_DISABLE_RMC,
        PUBX_DISABLE_GSA,
        PUBX_DISABLE_GLL,
        PUBX_DISABLE_GNS,
        rate.nmea_update(),
        rate.fix_control(),
        PMTK_ENABLE_WAAS,
    ]
}

#[cfg(test)]
mod test {
    use super::{UpdateRate, startup_sequence};
    use crate::nmea::checksum::verify;
    use std::str::FromStr;

    #[test]
    fn test_catalog_checksums() {
        for rate in [UpdateRate::Hz1, UpdateRate::Hz5, UpdateRate::Hz10] {
            for command in startup_sequence(rate) {
                let body = command
                    .strip_prefix('$')
                    .and_then(|command| command.strip_suffix("\r\n"))
                    .unwrap();

                assert!(verify(body.as_bytes()).is_some(), "invalid command: {}", body);
            }
        }
    }

    #[test]
    fn test_update_rate() {
        assert_eq!(UpdateRate::from_str("1").unwrap(), UpdateRate::Hz1);
        assert_eq!(UpdateRate::from_str("5Hz").unwrap(), UpdateRate::Hz5);
        assert_eq!(UpdateRate::from_str(" 10 ").unwrap(), UpdateRate::Hz10);
        assert!(UpdateRate::from_str("2").is_err());
    }

    #[test]
    fn test_fix_control_is_capped() {
        let sequence = startup_sequence(UpdateRate::Hz10);
        assert!(sequence.contains(&"$PMTK220,100*2F\r\n"));
        assert!(sequence.contains(&"$PMTK300,200,0,0,0,0*2F\r\n"));
    }
}
