//! ESP32-S3 glue for the nimbus weather panel: board bring-up, wifi and
//! network stack, the reqwless HTTP transport, and the async tasks that tie
//! the core library to the hardware.

#![no_std]

extern crate alloc;

/// Promotes a value to a `'static` borrow via a `StaticCell`.
#[macro_export]
macro_rules! mk_static {
    ($t:ty,$val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write(($val));
        x
    }};
}

pub mod config;
pub mod http;
pub mod net;
pub mod screen;
pub mod tasks;
