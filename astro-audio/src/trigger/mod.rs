//! Periodic trigger on a host thread
//!
//! Stands in for the hardware timer interrupt: a dedicated thread calls
//! [`Engine::tick`](crate::Engine::tick) at [`OUTPUT_SAMPLE_RATE`](crate::OUTPUT_SAMPLE_RATE)
//! on average.
//!
//! # Architecture
//!
//! ```text
//! Game Thread                  Pump Thread                    Sink
//!     │                             │                           │
//! [play(id)]──(atomic store)──►[clock: ticks due]               │
//!     │                        [tick × due]──────(write)──────►[DAC / ring]
//!     │                        [recv_timeout(poll)]             │
//! [drop handle]───(disconnect)─►[exit]                          │
//! ```
//!
//! A host scheduler cannot wake a thread every 91 µs, so the thread wakes
//! about once per poll interval and runs every tick that came due since the
//! last wake back-to-back. A stall longer than `max_catch_up_ticks` is not
//! made up: the excess ticks are skipped and counted as late, like missed
//! interrupts. Playback position only moves on ticks that actually ran.

mod handle;
mod metrics;
mod thread;

pub use handle::PumpHandle;
pub use thread::{PumpThread, ticks_due};

#[cfg(test)]
mod tests;
