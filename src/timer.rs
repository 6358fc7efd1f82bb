/// Nanoseconds between 60hz timer ticks.
const TICK_INTERVAL_NS: u64 = 1_000_000_000 / 60;

/// A wall-clock accumulator that converts a monotonic nanosecond timestamp
/// stream into 60hz ticks, independent of how often the host calls in.
///
/// This is instance state on the machine: each interpreter carries its own
/// clock, so several machines can coexist in one process.
pub(crate) struct TimerClock {
    /// Timestamp of the most recently accounted-for tick; None until the
    /// clock has been armed by a first call.
    last_tick_ns: Option<u64>,
}

impl TimerClock {
    /// Constructor that returns an unarmed [TimerClock].
    pub(crate) fn new() -> Self {
        TimerClock { last_tick_ns: None }
    }

    /// Returns the number of 60hz ticks that have elapsed since the previous
    /// call.  The first call arms the clock against `now_ns` and reports no
    /// ticks.  A host calling faster than 60hz sees mostly zeros; a host
    /// calling slower sees catch-up counts, with the remainder carried
    /// forward so no tick is ever lost.
    pub(crate) fn advance(&mut self, now_ns: u64) -> u32 {
        let last_tick_ns = match self.last_tick_ns {
            Some(last_tick_ns) => last_tick_ns,
            None => {
                self.last_tick_ns = Some(now_ns);
                return 0;
            }
        };
        let elapsed_ns = now_ns.saturating_sub(last_tick_ns);
        let ticks = elapsed_ns / TICK_INTERVAL_NS;
        self.last_tick_ns = Some(last_tick_ns + ticks * TICK_INTERVAL_NS);
        ticks as u32
    }
}
