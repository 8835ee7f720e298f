//! DF2301Q Voice Link Firmware
//!
//! Firmware for an STM32F407 board wired to a DF2301Q offline voice
//! recognition module on USART2 (PA2=TX, PA3=RX, 115200 8N1).
//!
//! The USART2 interrupt fills a ring buffer, `voice_rx_task` feeds those
//! bytes through the frame decoder into the command latch, and
//! `dispatch_task` polls the latch and acts on each command.

#![no_std]
#![no_main]

mod channels;
mod tasks;

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::bind_interrupts;
use embassy_stm32::peripherals::USART2;
use embassy_stm32::usart::{self, BufferedUart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    USART2 => usart::BufferedInterruptHandler<USART2>;
});

/// Baud rate the DF2301Q module talks at
const UART_BAUDRATE: u32 = 115_200;

/// Size of each UART ring buffer
const UART_BUF_SIZE: usize = 64;

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; UART_BUF_SIZE]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; UART_BUF_SIZE]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("DF2301Q voice link starting...");

    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    let mut uart_config = usart::Config::default();
    uart_config.baudrate = UART_BAUDRATE;

    let tx_buf = TX_BUF.init([0u8; UART_BUF_SIZE]);
    let rx_buf = RX_BUF.init([0u8; UART_BUF_SIZE]);

    let uart = match BufferedUart::new(
        p.USART2,
        p.PA3, // RX
        p.PA2, // TX
        tx_buf,
        rx_buf,
        Irqs,
        uart_config,
    ) {
        Ok(uart) => uart,
        Err(e) => {
            error!("USART2 configuration rejected: {:?}", e);
            return;
        }
    };

    // Nothing is sent to the module, the TX half stays idle
    let (_tx, rx) = uart.split();
    info!("USART2 initialized at {} baud", UART_BAUDRATE);

    spawner.spawn(tasks::voice_rx_task(rx)).unwrap();
    spawner.spawn(tasks::dispatch_task()).unwrap();

    info!("All tasks spawned");
}
