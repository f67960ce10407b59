//! The closed set of supported waveguide topologies.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A waveguide topology that [`GeometrySynthesizer`](crate::GeometrySynthesizer)
/// knows how to rasterize.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    /// Straight guide spanning the grid.
    #[default]
    Straight,
    /// Raised-cosine S-bend with a lateral offset.
    SBend,
    /// Symmetric Y-junction splitter.
    YBranch,
    /// 1×N multimode-interference splitter.
    Mmi,
    /// Bragg grating: straight guide with periodic teeth.
    Grating,
    /// Any other requested topology, drawn as a straight guide.
    Fallback,
}

impl GeometryKind {
    /// All kinds in display order.
    pub const ALL: [GeometryKind; 6] = [
        Self::Straight,
        Self::SBend,
        Self::YBranch,
        Self::Mmi,
        Self::Grating,
        Self::Fallback,
    ];

    /// Resolve a user-facing name. Never fails: unrecognised names
    /// (including topologies that have no FDTD rendition, such as
    /// "Mirror") resolve to [`GeometryKind::Fallback`].
    pub fn from_name(name: &str) -> Self {
        let key = name.trim().to_ascii_lowercase();
        match key.as_str() {
            "straight" | "straight guide" => Self::Straight,
            "s-bend" | "sbend" | "s bend" => Self::SBend,
            "y-branch" | "ybranch" | "y branch" => Self::YBranch,
            "mmi" | "mmi (splitter)" | "mmi splitter" => Self::Mmi,
            "grating" | "grating (bragg)" | "bragg" => Self::Grating,
            _ => {
                log::debug!("unrecognised geometry {name:?}, using straight fallback");
                Self::Fallback
            }
        }
    }

    /// Canonical display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Straight => "Straight Guide",
            Self::SBend => "S-Bend",
            Self::YBranch => "Y-Branch",
            Self::Mmi => "MMI (Splitter)",
            Self::Grating => "Grating (Bragg)",
            Self::Fallback => "Fallback",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeometryKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl From<&str> for GeometryKind {
    fn from(s: &str) -> Self {
        Self::from_name(s)
    }
}
