//! Shared UI state behind the global display lock.
//!
//! The home screen model is the only state shared between the weather flow
//! and the indoor sensor task. All mutation goes through [`try_update`]:
//! best-effort, skip-on-contention, never block.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use log::debug;
use nimbus_core::home::HomeScreen;

pub type UiLock = Mutex<CriticalSectionRawMutex, HomeScreen>;

/// Runs `f` on the screen model under the lock, or skips silently when the
/// lock is contended. Returns whether the update ran.
pub fn try_update<F: FnOnce(&mut HomeScreen)>(ui: &UiLock, f: F) -> bool {
    match ui.try_lock() {
        Ok(mut screen) => {
            f(&mut screen);
            true
        }
        Err(_) => {
            debug!("display lock busy, skipping update");
            false
        }
    }
}
