//! Strongly-typed identifiers.

use std::fmt;

/// Identifies a detector probe within a detector registry.
///
/// `ProbeId(0)` is reserved for the geometry-derived main output probe.
/// User probes receive sequential IDs starting at 1; IDs are never reused
/// within a registry, so a removed probe's data can never resurface under
/// a new probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProbeId(pub u32);

impl ProbeId {
    /// The geometry-derived main output probe.
    pub const MAIN: ProbeId = ProbeId(0);

    /// Whether this is the main output probe.
    pub fn is_main(self) -> bool {
        self == Self::MAIN
    }
}

impl fmt::Display for ProbeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ProbeId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_probe_is_zero() {
        assert!(ProbeId(0).is_main());
        assert!(!ProbeId(3).is_main());
        assert_eq!(ProbeId::from(7), ProbeId(7));
        assert_eq!(ProbeId(12).to_string(), "12");
    }
}
