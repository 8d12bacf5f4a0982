/// Frame clock.
/// Converts variable frame deltas (seconds, as reported by the host) into
/// whole milliseconds of virtual time. The fractional remainder is carried over
/// so no time is lost between frames.
pub struct FrameClock {
    /// Maximum milliseconds handed out per frame.
    max_frame_ms: u64,
    /// Sub-millisecond remainder carried between frames.
    remainder: f64,
    /// Total virtual milliseconds handed out so far.
    elapsed_ms: u64,
}

impl FrameClock {
    pub fn new(max_frame_ms: u64) -> Self {
        Self {
            max_frame_ms: max_frame_ms.max(1),
            remainder: 0.0,
            elapsed_ms: 0,
        }
    }

    /// Add frame time. Returns the whole milliseconds to advance this frame.
    pub fn accumulate(&mut self, frame_dt: f32) -> u64 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        self.remainder += frame_dt as f64 * 1000.0;
        // Cap so a long stall (hidden tab, debugger) doesn't replay unbounded time
        self.remainder = self.remainder.min(self.max_frame_ms as f64);
        let ms = self.remainder.floor();
        self.remainder -= ms;
        let ms = ms as u64;
        self.elapsed_ms += ms;
        ms
    }

    /// Total virtual time handed out since construction.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn max_frame_ms(&self) -> u64 {
        self.max_frame_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_frame_at_sixty_hz() {
        let mut clock = FrameClock::new(1000);
        assert_eq!(clock.accumulate(1.0 / 60.0), 16);
    }

    #[test]
    fn carries_remainder() {
        let mut clock = FrameClock::new(1000);
        assert_eq!(clock.accumulate(0.0005), 0);
        assert_eq!(clock.accumulate(0.0006), 1);
        assert_eq!(clock.elapsed_ms(), 1);
    }

    #[test]
    fn caps_long_frames() {
        let mut clock = FrameClock::new(250);
        assert_eq!(clock.accumulate(5.0), 250);
    }

    #[test]
    fn ignores_bogus_deltas() {
        let mut clock = FrameClock::new(1000);
        assert_eq!(clock.accumulate(-1.0), 0);
        assert_eq!(clock.accumulate(f32::NAN), 0);
        assert_eq!(clock.elapsed_ms(), 0);
    }
}
