use log::warn;

/// Fixed-step accumulator: turns variable frame deltas into whole ticks
#[derive(Clone, Copy, Debug)]
pub(crate) struct FixedStep {
    step: f32,
    max_ticks: u32,
    accumulator: f32,
}

impl FixedStep {
    pub(crate) fn new(step: f32, max_ticks: u32) -> Self {
        Self {
            step,
            max_ticks,
            accumulator: 0.0,
        }
    }

    /// Add a frame's `dt` (seconds) and return how many ticks are due.
    ///
    /// Never more than `max_ticks`; a longer stall (tab in the background, a
    /// debugger pause) drops the excess instead of fast-forwarding through it.
    pub(crate) fn advance(&mut self, dt: f32) -> u32 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        self.accumulator += dt;
        let due = (self.accumulator / self.step).floor();
        self.accumulator -= due * self.step;

        if due > self.max_ticks as f32 {
            warn!(
                "frame fell {} ticks behind; running {} and dropping the rest",
                due as u64, self.max_ticks
            );
            return self.max_ticks;
        }
        due as u32
    }

    pub(crate) fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{MAX_TICKS_PER_FRAME, TICK_SECONDS};

    #[test]
    fn accumulates_partial_frames() {
        let mut clock = FixedStep::new(TICK_SECONDS, MAX_TICKS_PER_FRAME);
        assert_eq!(clock.advance(TICK_SECONDS * 0.5), 0);
        assert_eq!(clock.advance(TICK_SECONDS), 1);
        assert_eq!(clock.advance(TICK_SECONDS * 2.0), 2);
    }

    #[test]
    fn backlog_is_capped_and_dropped() {
        let mut clock = FixedStep::new(TICK_SECONDS, MAX_TICKS_PER_FRAME);
        assert_eq!(clock.advance(TICK_SECONDS * 100.25), MAX_TICKS_PER_FRAME);
        assert_eq!(clock.advance(TICK_SECONDS * 0.25), 0);
    }

    #[test]
    fn ignores_bad_deltas() {
        let mut clock = FixedStep::new(TICK_SECONDS, MAX_TICKS_PER_FRAME);
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.advance(f32::NAN), 0);
        assert_eq!(clock.advance(f32::INFINITY), 0);
        clock.advance(TICK_SECONDS * 0.75);
        clock.reset();
        assert_eq!(clock.advance(TICK_SECONDS * 0.5), 0);
    }
}
