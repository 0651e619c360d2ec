/// How host frame callbacks map to animation steps.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TickMode {
    /// Exactly one step per frame callback. Angular speed follows the
    /// display refresh rate.
    #[default]
    PerFrame,
    /// Steps counted from wall-clock frame time at a fixed rate.
    FixedRate { hz: f32 },
}

/// Fixed timestep accumulator.
/// Turns variable frame deltas into a whole number of fixed steps.
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
}

impl FixedTimestep {
    /// Upper bound on steps per frame, so a stalled tab does not fast-forward.
    pub const MAX_STEPS: u32 = 10;

    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        self.accumulator = self.accumulator.min(self.dt * Self::MAX_STEPS as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }
}

/// Turns frame callbacks into animation step counts for the configured `TickMode`.
pub struct FrameClock {
    timestep: Option<FixedTimestep>,
}

impl FrameClock {
    pub fn new(mode: TickMode) -> Self {
        let timestep = match mode {
            TickMode::PerFrame => None,
            TickMode::FixedRate { hz } if hz.is_finite() && hz > 0.0 => {
                Some(FixedTimestep::new(1.0 / hz))
            }
            TickMode::FixedRate { hz } => {
                log::warn!("clock: invalid rate {hz} Hz, falling back to one step per frame");
                None
            }
        };
        Self { timestep }
    }

    /// Number of animation steps to run for a frame that took `frame_dt` seconds.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        match &mut self.timestep {
            Some(ts) => ts.accumulate(frame_dt),
            None => 1,
        }
    }
}
