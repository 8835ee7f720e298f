//! Command dispatch task
//!
//! Polls the command latch and reacts to each recognised voice command.

use defmt::*;
use embassy_time::{Duration, Ticker};

use df2301q_protocol::VoiceCommand;

use crate::channels::COMMAND_LATCH;

/// Latch polling period
const POLL_PERIOD_MS: u64 = 10;

/// Dispatch task - consumes command ids from the latch
#[embassy_executor::task]
pub async fn dispatch_task() {
    info!("Dispatch task started");

    let mut ticker = Ticker::every(Duration::from_millis(POLL_PERIOD_MS));

    loop {
        if let Some(cmd) = VoiceCommand::from_id(COMMAND_LATCH.take()) {
            handle_voice_command(cmd);
        }
        ticker.next().await;
    }
}

/// Handle a command taken from the latch
fn handle_voice_command(cmd: VoiceCommand) {
    info!("Received Command ID: {}", cmd.id());

    match cmd {
        VoiceCommand::VoiceCmd5 | VoiceCommand::VoiceCmd6 | VoiceCommand::VoiceCmd7 => {
            info!("{}", cmd.description());
        }
        VoiceCommand::Unknown(id) => {
            warn!("{} ({})", cmd.description(), id);
        }
    }
}
