//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter.  One tick is one full
//! pass over the population.  Agent speeds are expressed in corridor units
//! per tick, so durations derived from distance and speed are real numbers
//! while elapsed times measured by the model are whole ticks.

use std::fmt;

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }

    /// The tick as elapsed model time, for comparison with sampled
    /// real-valued times such as activation times.
    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }

    /// `true` if this tick falls on a multiple of `period`.
    ///
    /// A zero period never matches.
    #[inline]
    pub fn is_multiple_of(self, period: u64) -> bool {
        period != 0 && self.0 % period == 0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
