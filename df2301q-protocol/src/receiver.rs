//! Glue between the byte source and the command latch.

use crate::decoder::{DecoderConfig, DecoderStats, FrameDecoder};
use crate::latch::CommandLatch;

/// Owns a decoder and publishes every completed frame into a latch
///
/// This is the only writer of the latch. Call [`CommandReceiver::on_byte`]
/// once per received byte, in arrival order.
#[derive(Debug)]
pub struct CommandReceiver<'a> {
    decoder: FrameDecoder,
    latch: &'a CommandLatch,
}

impl<'a> CommandReceiver<'a> {
    /// Create a receiver with the default decoder configuration
    pub fn new(latch: &'a CommandLatch) -> Self {
        Self::with_config(latch, DecoderConfig::default())
    }

    /// Create a receiver with an explicit decoder configuration
    pub fn with_config(latch: &'a CommandLatch, config: DecoderConfig) -> Self {
        Self {
            decoder: FrameDecoder::with_config(config),
            latch,
        }
    }

    /// Handle one received byte
    ///
    /// Returns the published id when this byte completed a frame.
    pub fn on_byte(&mut self, byte: u8) -> Option<u8> {
        let id = self.decoder.feed(byte)?.designated_id();
        self.latch.publish(id);
        Some(id)
    }

    /// Handle a run of received bytes
    ///
    /// Returns the number of frames completed.
    pub fn on_bytes(&mut self, bytes: &[u8]) -> usize {
        bytes
            .iter()
            .filter(|&&byte| self.on_byte(byte).is_some())
            .count()
    }

    /// Decoder outcome counters
    pub fn stats(&self) -> DecoderStats {
        self.decoder.stats()
    }

    /// Access the underlying decoder
    pub fn decoder(&self) -> &FrameDecoder {
        &self.decoder
    }
}
