//! Hardware tick timer using ESP-IDF's esp_timer API.
//!
//! Creates one periodic timer at the clock tick interval whose callback
//! advances the millisecond clock.  The callback is dispatched from ISR
//! context; `clock::tick()` is interrupt-safe by construction (the clock's
//! critical section is the only shared-state guard in the system).
//!
//! On simulation targets no timer is started — tests and the sim loop
//! drive `clock::tick()` directly.

use crate::config::SystemConfig;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
static mut TICK_TIMER: esp_timer_handle_t = core::ptr::null_mut();

/// Tick interval latched at timer start, for the ISR callback.
#[cfg(target_os = "espidf")]
static mut TICK_INTERVAL_US: u16 = 0;

#[cfg(target_os = "espidf")]
unsafe extern "C" fn clock_tick_cb(_arg: *mut core::ffi::c_void) {
    // SAFETY: TICK_INTERVAL_US is written once in `start_tick_timer()`
    // before the timer is started; the callback only reads it.
    crate::clock::tick(unsafe { TICK_INTERVAL_US });
}

/// Start the periodic clock tick timer.
#[cfg(target_os = "espidf")]
pub fn start_tick_timer(config: &SystemConfig) {
    // SAFETY: TICK_TIMER and TICK_INTERVAL_US are written here once at boot
    // from the single main-task context before the timer is armed.
    unsafe {
        TICK_INTERVAL_US = config.tick_interval_us;

        let args = esp_timer_create_args_t {
            callback: Some(clock_tick_cb),
            arg: core::ptr::null_mut(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_ISR,
            name: b"clk_tick\0".as_ptr() as *const _,
            skip_unhandled_events: true,
        };
        let ret = esp_timer_create(&args, &raw mut TICK_TIMER);
        if ret != ESP_OK {
            log::error!(
                "hw_timer: tick timer create failed (rc={}) — clock will not advance",
                ret
            );
            return;
        }
        let ret = esp_timer_start_periodic(TICK_TIMER, u64::from(config.tick_interval_us));
        if ret != ESP_OK {
            log::error!("hw_timer: tick timer start failed (rc={})", ret);
            return;
        }

        info!("hw_timer: clock tick @ {} us started", config.tick_interval_us);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn start_tick_timer(config: &SystemConfig) {
    log::info!(
        "hw_timer(sim): no tick timer — sim loop advances the clock ({} us/tick)",
        config.tick_interval_us
    );
}

/// Stop the clock tick timer.
#[cfg(target_os = "espidf")]
pub fn stop_tick_timer() {
    // SAFETY: TICK_TIMER is a valid handle if start_tick_timer() succeeded;
    // null-check prevents touching a never-created timer.
    unsafe {
        let t = TICK_TIMER;
        if !t.is_null() {
            esp_timer_stop(t);
        }
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn stop_tick_timer() {}
