//! Board time adapter.
//!
//! One type provides both the monotonic microsecond clock used to time
//! the ranging echo and the blocking delays used for trigger pulses,
//! report dwells and the inter-cycle pause.
//!
//! - **`target_os = "espidf"`** — `esp_timer_get_time()` for the clock;
//!   `FreeRtos::delay_ms` (yields to the scheduler, keeps the idle-task
//!   watchdog fed) for millisecond waits and `Ets::delay_us` (busy wait)
//!   for microsecond pulses.
//! - **`not(target_os = "espidf")`** — `std::time::Instant` and
//!   `std::thread::sleep` for host-side simulation.

use embedded_hal::delay::DelayNs;

use crate::sensors::ranging::MonotonicClock;

#[derive(Debug, Clone, Copy)]
pub struct BoardClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for BoardClock {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Seconds since boot (monotonic).
    pub fn uptime_secs(&self) -> u64 {
        self.now_us() / 1_000_000
    }
}

#[cfg(target_os = "espidf")]
impl MonotonicClock for BoardClock {
    fn now_us(&self) -> u64 {
        // SAFETY: reads the high-resolution timer counter; no side effects.
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64
    }
}

#[cfg(not(target_os = "espidf"))]
impl MonotonicClock for BoardClock {
    fn now_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}

#[cfg(target_os = "espidf")]
impl DelayNs for BoardClock {
    fn delay_ns(&mut self, ns: u32) {
        esp_idf_svc::hal::delay::Ets::delay_us(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        esp_idf_svc::hal::delay::Ets::delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        esp_idf_svc::hal::delay::FreeRtos::delay_ms(ms);
    }
}

#[cfg(not(target_os = "espidf"))]
impl DelayNs for BoardClock {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
