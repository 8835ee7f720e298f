//! Byte-at-a-time frame decoder.
//!
//! The decoder runs on the UART receive path. Every call to
//! [`FrameDecoder::feed`] is a single bounded state transition: no
//! allocation, no blocking, and no error is ever returned. Malformed frames
//! are dropped and the decoder goes back to hunting for the head bytes,
//! starting with the byte right after the one that broke the frame.

use heapless::Vec;

use crate::frame::{checksum, HEAD_HIGH, HEAD_LOW, MAX_PAYLOAD, TAIL};

/// Decoder states, one per frame field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecoderState {
    /// Scanning for the first head byte
    AwaitHeadLow,
    /// Got 0xF4, waiting for 0xF5
    AwaitHeadHigh,
    /// Waiting for the low byte of LENGTH
    LengthLow,
    /// Waiting for the high byte of LENGTH
    LengthHigh,
    /// Waiting for TYPE
    Type,
    /// Waiting for CMD
    Command,
    /// Waiting for SEQ
    Sequence,
    /// Reading payload bytes
    Data,
    /// Waiting for the low byte of CHECKSUM
    ChecksumLow,
    /// Waiting for the high byte of CHECKSUM
    ChecksumHigh,
    /// Waiting for 0xFB
    Tail,
}

/// What to do with the checksum field when a frame completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChecksumPolicy {
    /// Capture the checksum but accept the frame regardless
    #[default]
    Ignore,
    /// Drop frames whose checksum does not match TYPE + CMD + SEQ + DATA
    Verify,
}

/// Decoder configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecoderConfig {
    /// Checksum handling at the tail byte
    pub checksum: ChecksumPolicy,
}

/// Running counters of decoder outcomes
///
/// All counters wrap on overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecoderStats {
    /// Frames completed and handed out
    pub frames: u32,
    /// 0xF4 followed by something other than 0xF5 or 0xF4
    pub bad_head: u32,
    /// Header declared more than `MAX_PAYLOAD` data bytes
    pub oversized: u32,
    /// Frame ended with something other than 0xFB
    pub bad_tail: u32,
    /// Checksum mismatch (only counted under [`ChecksumPolicy::Verify`])
    pub bad_checksum: u32,
}

impl DecoderStats {
    /// Total number of frames dropped for any reason
    pub fn rejected(&self) -> u32 {
        self.bad_head
            .wrapping_add(self.oversized)
            .wrapping_add(self.bad_tail)
            .wrapping_add(self.bad_checksum)
    }
}

/// A frame that made it all the way to the tail byte
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CompletedFrame {
    /// Message type
    pub msg_type: u8,
    /// Message command
    pub cmd: u8,
    /// Sequence number
    pub seq: u8,
    /// Payload data, exactly as many bytes as the header declared
    pub payload: Vec<u8, MAX_PAYLOAD>,
    /// Checksum as received
    pub checksum: u16,
}

impl CompletedFrame {
    /// The command id carried by this frame
    ///
    /// This is the first payload byte, or 0 for an empty payload. The
    /// header CMD field is not consulted.
    pub fn designated_id(&self) -> u8 {
        self.payload.first().copied().unwrap_or(0)
    }

    /// Whether the received checksum matches the frame contents
    pub fn checksum_valid(&self) -> bool {
        self.checksum == checksum(self.msg_type, self.cmd, self.seq, &self.payload)
    }
}

/// State machine reassembling frames from single bytes
#[derive(Debug, Clone)]
pub struct FrameDecoder {
    state: DecoderState,
    config: DecoderConfig,
    declared_length: u16,
    msg_type: u8,
    cmd: u8,
    seq: u8,
    payload: Vec<u8, MAX_PAYLOAD>,
    checksum: u16,
    stats: DecoderStats,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDecoder {
    /// Create a decoder with the default configuration
    pub const fn new() -> Self {
        Self::with_config(DecoderConfig {
            checksum: ChecksumPolicy::Ignore,
        })
    }

    /// Create a decoder with an explicit configuration
    pub const fn with_config(config: DecoderConfig) -> Self {
        Self {
            state: DecoderState::AwaitHeadLow,
            config,
            declared_length: 0,
            msg_type: 0,
            cmd: 0,
            seq: 0,
            payload: Vec::new(),
            checksum: 0,
            stats: DecoderStats {
                frames: 0,
                bad_head: 0,
                oversized: 0,
                bad_tail: 0,
                bad_checksum: 0,
            },
        }
    }

    /// Current state
    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Active configuration
    pub fn config(&self) -> DecoderConfig {
        self.config
    }

    /// Outcome counters since creation
    pub fn stats(&self) -> DecoderStats {
        self.stats
    }

    /// Abandon any frame in progress
    ///
    /// Counters are kept.
    pub fn reset(&mut self) {
        self.state = DecoderState::AwaitHeadLow;
        self.clear_frame();
    }

    fn clear_frame(&mut self) {
        self.declared_length = 0;
        self.msg_type = 0;
        self.cmd = 0;
        self.seq = 0;
        self.payload.clear();
        self.checksum = 0;
    }

    /// Feed a single byte to the decoder
    ///
    /// Returns `Some(frame)` when this byte completes a frame, `None`
    /// otherwise. Framing errors reset the decoder and are only visible
    /// through [`FrameDecoder::stats`].
    pub fn feed(&mut self, byte: u8) -> Option<CompletedFrame> {
        match self.state {
            DecoderState::AwaitHeadLow => {
                if byte == HEAD_LOW {
                    self.clear_frame();
                    self.state = DecoderState::AwaitHeadHigh;
                }
                None
            }
            DecoderState::AwaitHeadHigh => {
                match byte {
                    HEAD_HIGH => self.state = DecoderState::LengthLow,
                    // A repeated 0xF4 may itself be the start of the real head
                    HEAD_LOW => {}
                    _ => {
                        self.stats.bad_head = self.stats.bad_head.wrapping_add(1);
                        self.state = DecoderState::AwaitHeadLow;
                    }
                }
                None
            }
            DecoderState::LengthLow => {
                self.declared_length = u16::from(byte);
                self.state = DecoderState::LengthHigh;
                None
            }
            DecoderState::LengthHigh => {
                self.declared_length |= u16::from(byte) << 8;
                if usize::from(self.declared_length) <= MAX_PAYLOAD {
                    self.state = DecoderState::Type;
                } else {
                    self.stats.oversized = self.stats.oversized.wrapping_add(1);
                    self.state = DecoderState::AwaitHeadLow;
                }
                None
            }
            DecoderState::Type => {
                self.msg_type = byte;
                self.state = DecoderState::Command;
                None
            }
            DecoderState::Command => {
                self.cmd = byte;
                self.state = DecoderState::Sequence;
                None
            }
            DecoderState::Sequence => {
                self.seq = byte;
                if self.declared_length > 0 {
                    self.payload.clear();
                    self.state = DecoderState::Data;
                } else {
                    self.state = DecoderState::ChecksumLow;
                }
                None
            }
            DecoderState::Data => {
                let length = usize::from(self.declared_length);
                if self.payload.len() < length {
                    // Cannot fail: length was bounded by MAX_PAYLOAD in LengthHigh
                    let _ = self.payload.push(byte);
                }
                if self.payload.len() == length {
                    self.state = DecoderState::ChecksumLow;
                }
                None
            }
            DecoderState::ChecksumLow => {
                self.checksum = u16::from(byte);
                self.state = DecoderState::ChecksumHigh;
                None
            }
            DecoderState::ChecksumHigh => {
                self.checksum |= u16::from(byte) << 8;
                self.state = DecoderState::Tail;
                None
            }
            DecoderState::Tail => {
                self.state = DecoderState::AwaitHeadLow;
                self.finish(byte)
            }
        }
    }

    fn finish(&mut self, tail: u8) -> Option<CompletedFrame> {
        if tail != TAIL {
            self.stats.bad_tail = self.stats.bad_tail.wrapping_add(1);
            return None;
        }

        let frame = CompletedFrame {
            msg_type: self.msg_type,
            cmd: self.cmd,
            seq: self.seq,
            payload: self.payload.clone(),
            checksum: self.checksum,
        };

        if self.config.checksum == ChecksumPolicy::Verify && !frame.checksum_valid() {
            self.stats.bad_checksum = self.stats.bad_checksum.wrapping_add(1);
            return None;
        }

        self.stats.frames = self.stats.frames.wrapping_add(1);
        Some(frame)
    }
}
