use std::time::Duration;

use crate::{device::commands::UpdateRate, error::Error};

#[derive(Debug, Clone)]
pub struct Settings {
    /// Talker identifier of the accepted sentences
    pub talker: [u8; 2],

    /// Longest sentence accepted, in bytes, between `$` and `<CR>`
    pub frame_capacity: usize,

    /// Raw read block size
    pub read_size: usize,

    /// Bounds every serial read
    pub timeout: Duration,

    /// Serial port baud rate
    pub baud_rate: u32,

    /// Send the startup configuration sequence
    pub configure: bool,

    /// Update rate requested by the startup sequence
    pub update_rate: UpdateRate,

    /// Report records as JSON lines
    pub json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            talker: *b"GN",
            frame_capacity: 128,
            read_size: 512,
            timeout: Duration::from_millis(5_000),
            baud_rate: 9_600,
            configure: false,
            update_rate: UpdateRate::default(),
            json: false,
        }
    }
}

impl Settings {
    /// Parses a two letter talker identifier, like "GN" or "GP".
    pub fn parse_talker(talker: &str) -> Result<[u8; 2], Error> {
        match talker.trim().as_bytes() {
            [a, b] if a.is_ascii_alphabetic() && b.is_ascii_alphabetic() => {
                Ok([a.to_ascii_uppercase(), b.to_ascii_uppercase()])
            },
            _ => Err(Error::InvalidTalker(talker.to_string())),
        }
    }
}
