//! State shared between tasks

use df2301q_protocol::CommandLatch;

/// Most recent command id from the voice module (0 = none pending)
///
/// Written only by `voice_rx_task`, drained only by `dispatch_task`.
pub static COMMAND_LATCH: CommandLatch = CommandLatch::new();
