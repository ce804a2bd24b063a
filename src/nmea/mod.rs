pub mod checksum;
pub mod fixed;
pub mod frame;
pub mod gga;
pub mod vtg;

/// Sentences we decode. Anything else is ignored.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SentenceKind {
    /// GGA: time, position, altitude, satellites
    Position,

    /// VTG: course and speed over ground
    Velocity,
}

impl std::fmt::Display for SentenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Position => write!(f, "GGA"),
            Self::Velocity => write!(f, "VTG"),
        }
    }
}

impl SentenceKind {
    /// Processing order, once a raw read has been scanned
    pub const ALL: [Self; 2] = [Self::Position, Self::Velocity];

    /// Sentence type, following the talker identifier
    pub fn code(&self) -> &'static [u8; 3] {
        match self {
            Self::Position => b"GGA",
            Self::Velocity => b"VTG",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Self::Position => 0,
            Self::Velocity => 1,
        }
    }

    /// Classifies a sentence body (following `$`) by its 5 byte prefix:
    /// the talker identifier and the sentence type.
    pub fn classify(talker: &[u8; 2], body: &[u8]) -> Option<Self> {
        let (prefix_talker, code) = body.get(..5)?.split_at(2);

        if prefix_talker != talker {
            return None;
        }

        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}
