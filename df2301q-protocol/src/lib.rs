//! DF2301Q Voice Module UART Protocol
//!
//! This crate decodes the UART stream emitted by the DF2301Q offline voice
//! recognition module and hands the recognised command id over to the
//! application. The decoder is fed one byte at a time from the receive path
//! and never blocks or allocates.
//!
//! # Protocol Overview
//!
//! ```text
//! ┌──────┬──────┬────────┬──────┬─────┬─────┬──────────┬──────────┬──────┐
//! │ HEAD │ HEAD │ LENGTH │ TYPE │ CMD │ SEQ │ DATA     │ CHECKSUM │ TAIL │
//! │ 0xF4 │ 0xF5 │ 2B LE  │ 1B   │ 1B  │ 1B  │ 0–8B     │ 2B LE    │ 0xFB │
//! └──────┴──────┴────────┴──────┴─────┴─────┴──────────┴──────────┴──────┘
//! ```
//!
//! The first data byte of a completed frame is the command id. It is
//! published into a [`CommandLatch`], which a polling consumer empties with
//! [`CommandLatch::take`].

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod decoder;
pub mod frame;
pub mod latch;
pub mod receiver;

pub use command::VoiceCommand;
pub use decoder::{
    ChecksumPolicy, CompletedFrame, DecoderConfig, DecoderState, DecoderStats, FrameDecoder,
};
pub use frame::{Frame, FrameError, HEAD_HIGH, HEAD_LOW, MAX_FRAME_SIZE, MAX_PAYLOAD, TAIL};
pub use latch::CommandLatch;
pub use receiver::CommandReceiver;
