//! Voice module UART receive task
//!
//! Drains the USART2 ring buffer into the frame decoder.

use defmt::*;
use embassy_stm32::usart::BufferedUartRx;
use embassy_time::{Duration, Timer};
use embedded_io_async::Read;

use df2301q_protocol::CommandReceiver;

use crate::channels::COMMAND_LATCH;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 32;

/// Voice RX task - decodes frames from the DF2301Q and publishes command ids
#[embassy_executor::task]
pub async fn voice_rx_task(mut rx: BufferedUartRx<'static>) {
    info!("Voice RX task started");

    let mut receiver = CommandReceiver::new(&COMMAND_LATCH);
    let mut buf = [0u8; RX_BUF_SIZE];
    let mut rejected = 0u32;

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    if let Some(id) = receiver.on_byte(byte) {
                        debug!("Frame complete, command id {}", id);
                    }
                }

                let stats = receiver.stats();
                if stats.rejected() != rejected {
                    rejected = stats.rejected();
                    warn!("Malformed frame dropped: {:?}", stats);
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
                Timer::after(Duration::from_millis(10)).await;
            }
        }
    }
}
