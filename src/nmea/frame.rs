//! Sentence framing over a raw byte stream
use log::{trace, warn};

use super::SentenceKind;

const START_MARKER: u8 = b'$';
const END_MARKER: u8 = b'\r';

/// Summary of one [FrameExtractor::scan]
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Scan {
    /// Frames staged for validation
    pub staged: usize,

    /// Complete frames of a type we do not decode
    pub ignored: usize,

    /// Frames discarded because they exceeded the capacity
    pub overflows: usize,
}

#[derive(Debug, Default)]
struct Slot {
    body: Vec<u8>,
    fresh: bool,
}

/// [FrameExtractor] scans raw bytes, detects `$` .. `<CR>` frames
/// and stages recognized sentences, one slot per [SentenceKind].
///
/// Capture state persists from one [FrameExtractor::scan] to the next,
/// so a frame split over two reads is reassembled.
#[derive(Debug)]
pub struct FrameExtractor {
    talker: [u8; 2],
    capacity: usize,
    capturing: bool,
    overflowed: bool,
    accumulator: Vec<u8>,
    slots: [Slot; 2],
}

impl FrameExtractor {
    /// Builds a new [FrameExtractor] accepting sentences of this talker,
    /// up to `capacity` bytes between `$` and `<CR>`.
    pub fn new(talker: [u8; 2], capacity: usize) -> Self {
        Self {
            talker,
            capacity,
            capturing: false,
            overflowed: false,
            accumulator: Vec::with_capacity(capacity),
            slots: [
                Slot {
                    body: Vec::with_capacity(capacity),
                    fresh: false,
                },
                Slot {
                    body: Vec::with_capacity(capacity),
                    fresh: false,
                },
            ],
        }
    }

    /// True while a frame is being accumulated
    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    /// Scans a raw block, left to right.
    pub fn scan(&mut self, block: &[u8]) -> Scan {
        let mut scan = Scan::default();

        for byte in block {
            match *byte {
                START_MARKER => {
                    // a pending partial frame is dropped
                    self.capturing = true;
                    self.overflowed = false;
                    self.accumulator.clear();
                },
                END_MARKER if self.capturing => {
                    self.end_of_frame(&mut scan);
                    self.capturing = false;
                },
                byte if self.capturing => {
                    if self.accumulator.len() < self.capacity {
                        self.accumulator.push(byte);
                    } else {
                        self.overflowed = true;
                    }
                },
                _ => {},
            }
        }

        scan
    }

    fn end_of_frame(&mut self, scan: &mut Scan) {
        if self.overflowed {
            warn!(
                "discarding frame exceeding {} bytes: {}..",
                self.capacity,
                String::from_utf8_lossy(&self.accumulator[..self.accumulator.len().min(16)])
            );
            scan.overflows += 1;
            return;
        }

        match SentenceKind::classify(&self.talker, &self.accumulator) {
            Some(kind) => {
                let slot = &mut self.slots[kind.index()];
                slot.body.clear();
                slot.body.extend_from_slice(&self.accumulator);
                slot.fresh = true;
                scan.staged += 1;
            },
            None => {
                trace!(
                    "ignored sentence: {}",
                    String::from_utf8_lossy(&self.accumulator)
                );
                scan.ignored += 1;
            },
        }
    }

    /// Consumes the staged sentence of this kind, if any.
    /// The returned body excludes the `$` and `<CR>` markers.
    pub fn take(&mut self, kind: SentenceKind) -> Option<&[u8]> {
        let slot = &mut self.slots[kind.index()];
        if slot.fresh {
            slot.fresh = false;
            Some(&slot.body)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::{FrameExtractor, Scan};
    use crate::nmea::SentenceKind;

    const GGA: &[u8] = b"GNGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*59";
    const VTG: &[u8] = b"GNVTG,054.7,T,034.4,M,005.5,N,010.2,K*56";

    fn frame(body: &[u8]) -> Vec<u8> {
        let mut frame = vec![b'$'];
        frame.extend_from_slice(body);
        frame.extend_from_slice(b"\r\n");
        frame
    }

    #[test]
    fn test_position_noise_velocity() {
        let mut block = frame(GGA);
        block.extend_from_slice(b"\n\0garbage,*12\r\n");
        block.extend_from_slice(&frame(VTG));

        let mut extractor = FrameExtractor::new(*b"GN", 128);
        let scan = extractor.scan(&block);

        assert_eq!(
            scan,
            Scan {
                staged: 2,
                ignored: 0,
                overflows: 0,
            }
        );

        assert!(!extractor.is_capturing());
        assert_eq!(extractor.take(SentenceKind::Position), Some(GGA));
        assert_eq!(extractor.take(SentenceKind::Velocity), Some(VTG));

        // consumed
        assert_eq!(extractor.take(SentenceKind::Position), None);
        assert_eq!(extractor.take(SentenceKind::Velocity), None);
    }

    #[test]
    fn test_unrecognized_sentences() {
        let mut block = frame(b"GNGSA,A,3,04,05,,09,12,,,24,,,,,2.5,1.3,2.1*27");
        block.extend_from_slice(&frame(
            b"GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47",
        ));

        let mut extractor = FrameExtractor::new(*b"GN", 128);
        let scan = extractor.scan(&block);

        assert_eq!(scan.ignored, 2);
        assert_eq!(scan.staged, 0);
        assert_eq!(extractor.take(SentenceKind::Position), None);
        assert_eq!(extractor.take(SentenceKind::Velocity), None);
    }

    #[test]
    fn test_restart_drops_partial_frame() {
        let mut block = b"$GNVTG,054.7,T,03".to_vec();
        block.extend_from_slice(&frame(GGA));

        let mut extractor = FrameExtractor::new(*b"GN", 128);
        let scan = extractor.scan(&block);

        assert_eq!(scan.staged, 1);
        assert_eq!(extractor.take(SentenceKind::Position), Some(GGA));
        assert_eq!(extractor.take(SentenceKind::Velocity), None);
    }

    #[test]
    fn test_reassembly_across_reads() {
        let block = frame(VTG);
        let (first, second) = block.split_at(17);

        let mut extractor = FrameExtractor::new(*b"GN", 128);

        assert_eq!(extractor.scan(first), Scan::default());
        assert!(extractor.is_capturing());

        assert_eq!(extractor.scan(second).staged, 1);
        assert_eq!(extractor.take(SentenceKind::Velocity), Some(VTG));
    }

    #[test]
    fn test_overflow_is_discarded() {
        let mut block = frame(GGA);
        block.extend_from_slice(&frame(VTG));

        // GGA does not fit, VTG does
        let mut extractor = FrameExtractor::new(*b"GN", 48);
        let scan = extractor.scan(&block);

        assert_eq!(scan.overflows, 1);
        assert_eq!(scan.staged, 1);
        assert_eq!(extractor.take(SentenceKind::Position), None);
        assert_eq!(extractor.take(SentenceKind::Velocity), Some(VTG));
    }

    #[test]
    fn test_latest_frame_is_kept() {
        let older = b"GNVTG,054.7,T,034.4,M,005.5,N,010.2,K*56";
        let newer = b"GNVTG,7.1,T,,M,1.2,N,2.25,K,A*23";

        let mut block = frame(older);
        block.extend_from_slice(&frame(newer));

        let mut extractor = FrameExtractor::new(*b"GN", 128);
        assert_eq!(extractor.scan(&block).staged, 2);
        assert_eq!(extractor.take(SentenceKind::Velocity), Some(&newer[..]));
    }
}
