//! Role-indexed style parameters for map lines and circles.
//!
//! Every generated element carries a role (outside, inside, ...) and takes
//! its thickness, length, distance or radius from the parameter record for
//! that role. Lookup is a total function: each role resolves to exactly one
//! record, and names that match no role resolve to the default role.

/// Categorical purpose of a map line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineRole {
    /// Polygon boundary between two pivot points.
    Outside,
    /// Nested, inward-shrinking copy of the boundary.
    Inside,
    /// Pivot point to origin.
    Central,
    /// Connector between two neighbouring generations.
    Connecting,
    /// Finer spoke inside a ring. Styled with the default role's record.
    Sector,
}

impl LineRole {
    /// Role used when nothing more specific exists.
    pub const DEFAULT: LineRole = LineRole::Connecting;

    /// All roles in the order [`crate::MapInfo`] emits them.
    pub fn all() -> &'static [LineRole] {
        &[
            LineRole::Outside,
            LineRole::Inside,
            LineRole::Central,
            LineRole::Connecting,
            LineRole::Sector,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            LineRole::Outside => "outside",
            LineRole::Inside => "inside",
            LineRole::Central => "central",
            LineRole::Connecting => "connecting",
            LineRole::Sector => "sector",
        }
    }

    pub fn from_name(name: &str) -> Option<LineRole> {
        LineRole::all().iter().copied().find(|role| role.name() == name)
    }
}

/// Categorical purpose of a map circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CircleRole {
    /// Corner cap on a pivot point.
    Outside,
    /// The single circle at the origin.
    Inside,
    /// Concentric ring around the origin.
    Rings,
    /// Marker on an inside-line endpoint.
    Connecting,
}

impl CircleRole {
    pub const DEFAULT: CircleRole = CircleRole::Outside;

    /// All roles in the order [`crate::MapInfo`] emits them.
    pub fn all() -> &'static [CircleRole] {
        &[
            CircleRole::Outside,
            CircleRole::Rings,
            CircleRole::Inside,
            CircleRole::Connecting,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            CircleRole::Outside => "outside",
            CircleRole::Inside => "inside",
            CircleRole::Rings => "rings",
            CircleRole::Connecting => "connecting",
        }
    }

    pub fn from_name(name: &str) -> Option<CircleRole> {
        CircleRole::all().iter().copied().find(|role| role.name() == name)
    }
}

/// Style and size of one line role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineParameters {
    /// Stroke width in map units
    pub thickness: f64,
    /// Nominal length (outside: visible side length, inside: segment length)
    pub length: f64,
    /// Spacing (inside: step toward the origin, connecting: anchor inset)
    pub distance: f64,
}

impl LineParameters {
    pub const fn new(thickness: f64, length: f64, distance: f64) -> Self {
        Self { thickness, length, distance }
    }
}

/// Style and size of one circle role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleParameters {
    pub radius: f64,
    /// Outline width; 0 means a filled disc
    pub thickness: f64,
}

impl CircleParameters {
    pub const fn new(radius: f64, thickness: f64) -> Self {
        Self { radius, thickness }
    }
}

pub const DEFAULT_OUTSIDE_LINE: LineParameters = LineParameters::new(1.0, 10.0, 0.0);
pub const DEFAULT_INSIDE_LINE: LineParameters = LineParameters::new(1.0, 5.0, 0.5);
pub const DEFAULT_CENTRAL_LINE: LineParameters = LineParameters::new(0.5, 0.0, 0.0);
pub const DEFAULT_CONNECTING_LINE: LineParameters = LineParameters::new(1.0, 2.0, 1.0);

pub const DEFAULT_OUTSIDE_CIRCLE: CircleParameters = CircleParameters::new(2.0, 0.0);
pub const DEFAULT_INSIDE_CIRCLE: CircleParameters = CircleParameters::new(3.0, 0.0);
pub const DEFAULT_RINGS_CIRCLE: CircleParameters = CircleParameters::new(1.0, 0.25);
pub const DEFAULT_CONNECTING_CIRCLE: CircleParameters = CircleParameters::new(0.5, 0.0);

/// Line parameters for every role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineParameterSet {
    pub outside: LineParameters,
    pub inside: LineParameters,
    pub central: LineParameters,
    pub connecting: LineParameters,
}

impl LineParameterSet {
    pub const DEFAULT: LineParameterSet = LineParameterSet {
        outside: DEFAULT_OUTSIDE_LINE,
        inside: DEFAULT_INSIDE_LINE,
        central: DEFAULT_CENTRAL_LINE,
        connecting: DEFAULT_CONNECTING_LINE,
    };

    pub fn get(&self, role: LineRole) -> &LineParameters {
        match role {
            LineRole::Outside => &self.outside,
            LineRole::Inside => &self.inside,
            LineRole::Central => &self.central,
            LineRole::Connecting => &self.connecting,
            LineRole::Sector => self.get(LineRole::DEFAULT),
        }
    }

    /// Lookup by role name, falling back to [`LineRole::DEFAULT`].
    pub fn get_by_name(&self, name: &str) -> &LineParameters {
        self.get(LineRole::from_name(name).unwrap_or(LineRole::DEFAULT))
    }
}

impl Default for LineParameterSet {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Circle parameters for every role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleParameterSet {
    pub outside: CircleParameters,
    pub inside: CircleParameters,
    pub rings: CircleParameters,
    pub connecting: CircleParameters,
}

impl CircleParameterSet {
    pub const DEFAULT: CircleParameterSet = CircleParameterSet {
        outside: DEFAULT_OUTSIDE_CIRCLE,
        inside: DEFAULT_INSIDE_CIRCLE,
        rings: DEFAULT_RINGS_CIRCLE,
        connecting: DEFAULT_CONNECTING_CIRCLE,
    };

    pub fn get(&self, role: CircleRole) -> &CircleParameters {
        match role {
            CircleRole::Outside => &self.outside,
            CircleRole::Inside => &self.inside,
            CircleRole::Rings => &self.rings,
            CircleRole::Connecting => &self.connecting,
        }
    }

    /// Lookup by role name, falling back to [`CircleRole::DEFAULT`].
    pub fn get_by_name(&self, name: &str) -> &CircleParameters {
        self.get(CircleRole::from_name(name).unwrap_or(CircleRole::DEFAULT))
    }
}

impl Default for CircleParameterSet {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sector_uses_default_line_role() {
        let mut set = LineParameterSet::default();
        set.connecting.thickness = 0.3;
        assert_eq!(set.get(LineRole::Sector), &set.connecting);
        assert_eq!(set.get(LineRole::Sector).thickness, 0.3);
    }

    #[test]
    fn unknown_names_fall_back() {
        let lines = LineParameterSet::default();
        assert_eq!(lines.get_by_name("inside"), &DEFAULT_INSIDE_LINE);
        assert_eq!(lines.get_by_name("nonsense"), &DEFAULT_CONNECTING_LINE);

        let circles = CircleParameterSet::default();
        assert_eq!(circles.get_by_name("rings"), &DEFAULT_RINGS_CIRCLE);
        assert_eq!(circles.get_by_name("nonsense"), &DEFAULT_OUTSIDE_CIRCLE);
    }

    #[test]
    fn role_names_round_trip() {
        for role in LineRole::all() {
            assert_eq!(LineRole::from_name(role.name()), Some(*role));
        }
        for role in CircleRole::all() {
            assert_eq!(CircleRole::from_name(role.name()), Some(*role));
        }
        assert_eq!(LineRole::from_name("Outside"), None);
    }
}
