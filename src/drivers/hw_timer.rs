//! Hardware timer module using ESP-IDF's esp_timer API.
//!
//! Creates periodic timers that push events into the lock-free queue.
//! On simulation targets the host loop drives ticks itself.
//!
//! Timer callbacks execute in the ESP timer task context (not ISR), so
//! they can safely call push_event() and advance the atomic clock.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::clock::ElapsedClock;
use crate::events::{push_event, Event};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

/// Seconds between `DiagnosticsTick` events (0 disables).
static DIAG_INTERVAL_SECS: AtomicU32 = AtomicU32::new(0);
static DIAG_ELAPSED_SECS: AtomicU32 = AtomicU32::new(0);

#[cfg(target_os = "espidf")]
static mut CONTROL_TIMER: esp_timer_handle_t = core::ptr::null_mut();
#[cfg(target_os = "espidf")]
static mut SECOND_TIMER: esp_timer_handle_t = core::ptr::null_mut();

#[cfg(target_os = "espidf")]
unsafe extern "C" fn control_tick_cb(_arg: *mut core::ffi::c_void) {
    push_event(Event::ControlTick);
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn second_tick_cb(arg: *mut core::ffi::c_void) {
    // SAFETY: `arg` is the `&'static ElapsedClock` passed to start_timers().
    let clock = unsafe { &*(arg as *const ElapsedClock) };
    on_second(clock);
}

/// Restart the diagnostics countdown with a new interval (0 disables).
fn set_diagnostics_interval(secs: u32) {
    DIAG_INTERVAL_SECS.store(secs, Ordering::Relaxed);
    DIAG_ELAPSED_SECS.store(0, Ordering::Relaxed);
}

/// Body of the 1 Hz callback: advance the clock and, every
/// `diagnostics_interval_secs`, queue a `DiagnosticsTick`.
pub fn on_second(clock: &ElapsedClock) {
    clock.tick();

    let interval = DIAG_INTERVAL_SECS.load(Ordering::Relaxed);
    if interval == 0 {
        return;
    }
    let elapsed = DIAG_ELAPSED_SECS.fetch_add(1, Ordering::Relaxed) + 1;
    if elapsed >= interval {
        DIAG_ELAPSED_SECS.store(0, Ordering::Relaxed);
        push_event(Event::DiagnosticsTick);
    }
}

/// Start the hardware tick timers.
///
/// - control timer at `control_interval_ms`
/// - 1 Hz elapsed-time timer advancing `clock`
#[cfg(target_os = "espidf")]
pub fn start_timers(control_interval_ms: u32, diagnostics_interval_secs: u32, clock: &'static ElapsedClock) {
    set_diagnostics_interval(diagnostics_interval_secs);

    // SAFETY: CONTROL_TIMER and SECOND_TIMER are written here once at boot
    // from the single main-task context before any timer callbacks fire.
    // The callbacks only touch atomics and the lock-free queue.
    unsafe {
        let control_args = esp_timer_create_args_t {
            callback: Some(control_tick_cb),
            arg: core::ptr::null_mut(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: b"control\0".as_ptr() as *const _,
            skip_unhandled_events: true,
        };
        let ret = esp_timer_create(&control_args, &raw mut CONTROL_TIMER);
        if ret != ESP_OK as i32 {
            log::error!("hw_timer: control timer create failed (rc={})", ret);
            return;
        }
        let ret = esp_timer_start_periodic(CONTROL_TIMER, u64::from(control_interval_ms) * 1_000);
        if ret != ESP_OK as i32 {
            log::error!("hw_timer: control timer start failed (rc={})", ret);
            return;
        }

        let second_args = esp_timer_create_args_t {
            callback: Some(second_tick_cb),
            arg: clock as *const ElapsedClock as *mut core::ffi::c_void,
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: b"elapsed\0".as_ptr() as *const _,
            skip_unhandled_events: false,
        };
        let ret = esp_timer_create(&second_args, &raw mut SECOND_TIMER);
        if ret != ESP_OK as i32 {
            log::error!("hw_timer: elapsed timer create failed (rc={}), clock will not advance", ret);
            return;
        }
        let ret = esp_timer_start_periodic(SECOND_TIMER, 1_000_000);
        if ret != ESP_OK as i32 {
            log::error!("hw_timer: elapsed timer start failed (rc={})", ret);
            return;
        }

        info!("hw_timer: control@{}ms + elapsed@1Hz started", control_interval_ms);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn start_timers(_control_interval_ms: u32, diagnostics_interval_secs: u32, _clock: &'static ElapsedClock) {
    set_diagnostics_interval(diagnostics_interval_secs);
    log::info!("hw_timer(sim): timers not started (ticks driven by the host loop)");
}
