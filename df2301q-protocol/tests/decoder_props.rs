//! Property tests for the frame decoder and receiver

use df2301q_protocol::{CommandLatch, CommandReceiver, FrameDecoder, HEAD_LOW, MAX_PAYLOAD};
use proptest::prelude::*;

/// Build a frame by hand so the checksum bytes can be anything
fn raw_frame(msg_type: u8, cmd: u8, seq: u8, data: &[u8], checksum: u16) -> Vec<u8> {
    let mut bytes = vec![0xF4, 0xF5];
    bytes.extend_from_slice(&(data.len() as u16).to_le_bytes());
    bytes.extend_from_slice(&[msg_type, cmd, seq]);
    bytes.extend_from_slice(data);
    bytes.extend_from_slice(&checksum.to_le_bytes());
    bytes.push(0xFB);
    bytes
}

fn completed_ids(decoder: &mut FrameDecoder, bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .filter_map(|&byte| decoder.feed(byte))
        .map(|frame| frame.designated_id())
        .collect()
}

fn noise() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>().prop_filter("no head byte", |b| *b != HEAD_LOW), 0..64)
}

proptest! {
    #[test]
    fn streams_without_head_never_complete(bytes in noise()) {
        let mut decoder = FrameDecoder::new();
        prop_assert!(completed_ids(&mut decoder, &bytes).is_empty());
    }

    #[test]
    fn well_formed_frame_completes_once(
        msg_type in any::<u8>(),
        cmd in any::<u8>(),
        seq in any::<u8>(),
        data in prop::collection::vec(any::<u8>(), 0..=MAX_PAYLOAD),
        checksum in any::<u16>(),
    ) {
        let mut decoder = FrameDecoder::new();
        let ids = completed_ids(&mut decoder, &raw_frame(msg_type, cmd, seq, &data, checksum));
        let expected = data.first().copied().unwrap_or(0);
        prop_assert_eq!(ids, vec![expected]);
    }

    #[test]
    fn noise_before_frame_is_skipped(
        prefix in noise(),
        data in prop::collection::vec(any::<u8>(), 1..=MAX_PAYLOAD),
    ) {
        let mut bytes = prefix;
        bytes.extend(raw_frame(0x02, 0x05, 0x00, &data, 0));

        let latch = CommandLatch::new();
        let mut receiver = CommandReceiver::new(&latch);
        prop_assert_eq!(receiver.on_bytes(&bytes), 1);
        prop_assert_eq!(latch.take(), data[0]);
    }

    #[test]
    fn junk_between_head_bytes_does_not_poison_next_frame(
        junk in any::<u8>().prop_filter("not a head byte", |b| *b != 0xF4 && *b != 0xF5),
        id in 1u8..,
    ) {
        let mut bytes = vec![0xF4, junk];
        bytes.extend(raw_frame(0x02, 0x05, 0x00, &[id], 0));

        let mut decoder = FrameDecoder::new();
        prop_assert_eq!(completed_ids(&mut decoder, &bytes), vec![id]);
    }

    #[test]
    fn frames_in_sequence_complete_in_order(ids in prop::collection::vec(1u8.., 1..8)) {
        let bytes: Vec<u8> = ids
            .iter()
            .enumerate()
            .flat_map(|(seq, &id)| raw_frame(0x02, 0x05, seq as u8, &[id], 0))
            .collect();

        let mut decoder = FrameDecoder::new();
        prop_assert_eq!(completed_ids(&mut decoder, &bytes), ids);
    }

    #[test]
    fn oversized_length_never_completes(len in (MAX_PAYLOAD as u16 + 1).., tail in noise()) {
        let mut bytes = vec![0xF4, 0xF5];
        bytes.extend_from_slice(&len.to_le_bytes());
        bytes.extend(tail);

        let mut decoder = FrameDecoder::new();
        prop_assert!(completed_ids(&mut decoder, &bytes).is_empty());
        prop_assert_eq!(decoder.stats().oversized, 1);
    }
}
