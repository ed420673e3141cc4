use crate::unix_time;

/// A simulated clock that runs at a fixed fraction of real time.
///
/// The clock captures the wall-clock time once at construction. From then on
/// it reports `start + (wall - start) * speed`: elapsed wall time scaled by
/// the speed factor, so a factor below 1.0 makes the reported time fall
/// progressively behind real time. The clock itself is immutable; there is
/// nothing to synchronize between requests.
#[derive(Clone, Copy, Debug)]
pub struct DriftClock {
    start: f64,
    speed: f64,
}

impl DriftClock {
    /// The default speed factor: 0.04% slower than real time, slow enough to
    /// stay plausible to a client yet fast enough to accumulate visible
    /// drift within minutes.
    pub const DEFAULT_SPEED: f64 = 0.9996;

    /// Create a drift clock starting now, running at `speed` times real time.
    pub fn new(speed: f64) -> Self {
        DriftClock {
            start: unix_time::Instant::now().as_secs_f64(),
            speed,
        }
    }

    /// Create a drift clock with an explicit start time (POSIX seconds).
    pub fn with_start(start: f64, speed: f64) -> Self {
        DriftClock { start, speed }
    }

    /// The POSIX time at which the clock started.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// The configured speed factor.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// The drifted time corresponding to the given wall-clock time
    /// (POSIX seconds).
    pub fn at(&self, wall: f64) -> f64 {
        self.start + (wall - self.start) * self.speed
    }

    /// The current drifted time in POSIX seconds.
    pub fn now(&self) -> f64 {
        self.at(unix_time::Instant::now().as_secs_f64())
    }
}
