use hifitime::prelude::{Duration, Epoch, TimeScale};
use log::{debug, error, warn};

use crate::{
    device::Device,
    nmea::{SentenceKind, checksum, frame::FrameExtractor, gga, vtg},
    settings::Settings,
    store::{NavigationRecord, NavigationStore},
};

/// Counters, since deployment
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Statistics {
    /// Raw bytes received
    pub bytes: usize,

    /// Frames staged for validation
    pub frames: usize,

    /// Frames of a type we do not decode
    pub ignored: usize,

    /// Frames discarded for exceeding the capacity
    pub overflows: usize,

    pub checksum_failures: usize,

    pub decode_failures: usize,

    /// Record updates
    pub updates: usize,
}

impl std::fmt::Display for Statistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} bytes, {} staged, {} ignored, {} overflowed, {} checksum failures, {} decoding failures, {} updates",
            self.bytes,
            self.frames,
            self.ignored,
            self.overflows,
            self.checksum_failures,
            self.decode_failures,
            self.updates,
        )
    }
}

/// [Runtime] is one decoding pipeline: raw bytes are framed,
/// validated, decoded and published to its [NavigationStore].
#[derive(Debug)]
pub struct Runtime {
    /// Current [Epoch]
    pub epoch: Epoch,

    /// Epoch of deployment
    deploy_time: Epoch,

    /// Uptime as [Duration]
    pub uptime: Duration,

    /// Counters
    pub stats: Statistics,

    extractor: FrameExtractor,

    store: NavigationStore,
}

impl Runtime {
    pub fn new(epoch: Epoch, settings: &Settings) -> Self {
        Self {
            epoch,
            deploy_time: epoch,
            uptime: Default::default(),
            stats: Default::default(),
            extractor: FrameExtractor::new(settings.talker, settings.frame_capacity),
            store: NavigationStore::default(),
        }
    }

    /// Update latest epoch
    pub fn new_epoch(&mut self, epoch: Epoch) {
        self.epoch = epoch.to_time_scale(TimeScale::UTC);
        self.uptime = epoch - self.deploy_time;
    }

    /// Returns current epoch in [TimeScale::UTC]
    pub fn utc_time(&self) -> Epoch {
        self.epoch.to_time_scale(TimeScale::UTC)
    }

    /// Performs one (timeout bounded) read and processes the received bytes.
    ///
    /// ## Returns
    /// - Ok(0) when nothing was received (timeout or end of stream)
    /// - Ok(n) with n=number of bytes that were processed
    /// - Err(e) on I/O error
    pub fn process_read(
        &mut self,
        device: &mut Device,
        buffer: &mut [u8],
    ) -> std::io::Result<usize> {
        let nbytes = device.read_interface(buffer)?;

        if nbytes > 0 {
            self.process_block(&buffer[..nbytes]);
        }

        Ok(nbytes)
    }

    /// Frames a raw block, then validates and decodes the staged sentences:
    /// position first, velocity second.
    /// Returns the number of record updates.
    pub fn process_block(&mut self, block: &[u8]) -> usize {
        let scan = self.extractor.scan(block);

        self.stats.bytes += block.len();
        self.stats.frames += scan.staged;
        self.stats.ignored += scan.ignored;
        self.stats.overflows += scan.overflows;

        let t = self.utc_time().round(Duration::from_seconds(1.0));
        let mut updates = 0;

        for kind in SentenceKind::ALL {
            let Some(body) = self.extractor.take(kind) else {
                continue;
            };

            let Some(payload) = checksum::verify(body) else {
                warn!(
                    "{} - {} checksum failure: {}",
                    t,
                    kind,
                    String::from_utf8_lossy(body)
                );
                self.stats.checksum_failures += 1;
                continue;
            };

            let decoded = match kind {
                SentenceKind::Position => gga::decode_payload(payload)
                    .map(|position| self.store.apply_position(&position)),
                SentenceKind::Velocity => vtg::decode_payload(payload)
                    .map(|velocity| self.store.apply_velocity(&velocity)),
            };

            match decoded {
                Ok(()) => {
                    debug!("{} - {} {}", t, kind, self.store.snapshot());
                    updates += 1;
                },
                Err(e) => {
                    error!("{} - {} decoding error: {}", t, kind, e);
                    self.stats.decode_failures += 1;
                },
            }
        }

        self.stats.updates += updates;
        updates
    }

    /// True when the stream stopped within a sentence
    pub fn pending_frame(&self) -> bool {
        self.extractor.is_capturing()
    }

    /// Returns a copy of the published record
    pub fn snapshot(&self) -> NavigationRecord {
        self.store.snapshot()
    }

    /// Returns true if the record was updated since the previous call
    pub fn consume_available(&mut self) -> bool {
        self.store.consume_available()
    }
}
