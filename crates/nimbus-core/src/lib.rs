//! Hardware-independent core library for nimbus-rs
//!
//! This crate contains all platform-agnostic logic for the nimbus weather
//! panel: the bounded HTTP response buffer, the weather JSON parser, the
//! fetch session state machine, wall-clock synchronization, and the
//! home-screen UI model.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets (ESP32-S3) and desktop hosts (for tests).

#![no_std]

extern crate alloc;

pub mod clock;
pub mod home;
pub mod response;
pub mod ui;
pub mod weather;
