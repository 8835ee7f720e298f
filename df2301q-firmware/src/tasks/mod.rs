//! Embassy tasks

mod dispatch;
mod voice_rx;

pub use dispatch::dispatch_task;
pub use voice_rx::voice_rx_task;
