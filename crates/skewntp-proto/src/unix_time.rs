use crate::protocol::TimestampFormat;
use core::fmt;
use std::time;

/// The number of seconds from 1st January 1900 UTC to the start of the Unix epoch.
pub const EPOCH_DELTA: i64 = 2_208_988_800;

// The NTP fractional scale (2^32).
const NTP_FRAC_SCALE: f64 = 4_294_967_296.0;

// One 32-bit NTP era in seconds.
const SECONDS_PER_ERA: i64 = 1i64 << 32;

/// Describes an instant relative to the `UNIX_EPOCH` - 00:00:00 Coordinated Universal Time (UTC),
/// Thursday, 1 January 1970 in seconds with the fractional part in nanoseconds.
///
/// If the **Instant** describes some moment prior to `UNIX_EPOCH`, both the `secs` and
/// `subsec_nanos` components will be negative.
#[derive(Copy, Clone, Debug)]
pub struct Instant {
    secs: i64,
    subsec_nanos: i32,
}

impl Instant {
    /// Create a new **Instant** given its `secs` and `subsec_nanos` components.
    ///
    /// To indicate a time following `UNIX_EPOCH`, both `secs` and `subsec_nanos` must be positive.
    /// To indicate a time prior to `UNIX_EPOCH`, both `secs` and `subsec_nanos` must be negative.
    /// Violating these invariants will result in a **panic!**.
    pub fn new(secs: i64, subsec_nanos: i32) -> Instant {
        if secs > 0 && subsec_nanos < 0 {
            panic!("invalid instant: secs was positive but subsec_nanos was negative");
        }
        if secs < 0 && subsec_nanos > 0 {
            panic!("invalid instant: secs was negative but subsec_nanos was positive");
        }
        Instant { secs, subsec_nanos }
    }

    /// Uses `std::time::SystemTime::now` and `std::time::UNIX_EPOCH` to determine the current
    /// **Instant**.
    pub fn now() -> Self {
        match time::SystemTime::now().duration_since(time::UNIX_EPOCH) {
            Ok(duration) => {
                let secs = duration.as_secs() as i64;
                let subsec_nanos = duration.subsec_nanos() as i32;
                Instant::new(secs, subsec_nanos)
            }
            Err(sys_time_err) => {
                let duration_pre_unix_epoch = sys_time_err.duration();
                let secs = -(duration_pre_unix_epoch.as_secs() as i64);
                let subsec_nanos = -(duration_pre_unix_epoch.subsec_nanos() as i32);
                Instant::new(secs, subsec_nanos)
            }
        }
    }

    /// The "seconds" component of the **Instant**.
    pub fn secs(&self) -> i64 {
        self.secs
    }

    /// The fractional component of the **Instant** in nanoseconds.
    pub fn subsec_nanos(&self) -> i32 {
        self.subsec_nanos
    }

    /// The instant as floating-point POSIX seconds.
    pub fn as_secs_f64(&self) -> f64 {
        self.secs as f64 + self.subsec_nanos as f64 * 1e-9
    }
}

// POSIX-time conversions.

impl TimestampFormat {
    /// Convert floating-point POSIX seconds to a 32-bit NTP timestamp.
    ///
    /// The fraction is rounded to the nearest 1/2^32 of a second and
    /// **saturates** at `u32::MAX`; unlike the 16.16 short format there is no
    /// carry into the seconds field. The seconds are shifted by
    /// [`EPOCH_DELTA`] and reduced modulo 2^32, so values far from era 0 wrap
    /// silently.
    pub fn from_posix_secs(t: f64) -> Self {
        let whole = t.floor();
        let mut fraction = ((t - whole) * NTP_FRAC_SCALE).round() as u64;
        if fraction > u32::MAX as u64 {
            fraction = u32::MAX as u64;
        }
        let seconds = (whole as i64 + EPOCH_DELTA).rem_euclid(SECONDS_PER_ERA) as u32;
        TimestampFormat {
            seconds,
            fraction: fraction as u32,
        }
    }

    /// The timestamp as floating-point POSIX seconds.
    ///
    /// Negative results are possible for raw timestamps earlier than the
    /// Unix epoch; callers interpret those as they see fit.
    pub fn to_posix_secs(&self) -> f64 {
        (self.seconds as i64 - EPOCH_DELTA) as f64 + self.fraction as f64 / NTP_FRAC_SCALE
    }
}

impl fmt::Display for TimestampFormat {
    /// Renders the timestamp as `YYYY-MM-DDTHH:MM:SS.ffffffZ` in UTC.
    ///
    /// Microseconds are rounded to nearest, carrying one second when the
    /// rounded value reaches 1,000,000.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let ts = self.to_posix_secs();
        let whole = ts.floor();
        let mut secs = whole as i64;
        let mut micros = ((ts - whole) * 1_000_000.0).round() as i64;
        if micros >= 1_000_000 {
            secs += 1;
            micros = 0;
        }
        match chrono::DateTime::from_timestamp(secs, 0) {
            Some(dt) => write!(f, "{}.{:06}Z", dt.format("%Y-%m-%dT%H:%M:%S"), micros),
            None => write!(f, "{}.{:06}s", secs, micros),
        }
    }
}
