//! Primary flow axis selection.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when parsing a flow axis from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid flow axis name: '{0}' (expected x, y, or z)")]
pub struct ParseAxisError(pub String);

/// The primary flow axis of the domain.
///
/// Determines which pair of boundary patches is labelled inlet/outlet and
/// which velocity component an external velocity field supplies.
///
/// # Example
///
/// ```
/// use hexmesh_rs::types::FlowAxis;
///
/// let axis: FlowAxis = "z".parse().unwrap();
/// assert_eq!(axis, FlowAxis::Z);
/// assert_eq!(axis.index(), 2);
/// assert_eq!(axis.name(), "z");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum FlowAxis {
    /// Flow along the x-axis.
    #[default]
    X,
    /// Flow along the y-axis.
    Y,
    /// Flow along the z-axis.
    Z,
}

impl FlowAxis {
    /// Axis index: x = 0, y = 1, z = 2.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            FlowAxis::X => 0,
            FlowAxis::Y => 1,
            FlowAxis::Z => 2,
        }
    }

    /// Lower-case axis name ("x", "y", or "z").
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            FlowAxis::X => "x",
            FlowAxis::Y => "y",
            FlowAxis::Z => "z",
        }
    }

    /// The next axis in cyclic x → y → z → x order.
    #[inline]
    pub fn secondary(self) -> FlowAxis {
        match self {
            FlowAxis::X => FlowAxis::Y,
            FlowAxis::Y => FlowAxis::Z,
            FlowAxis::Z => FlowAxis::X,
        }
    }

    /// The remaining axis (two cyclic steps from this one).
    #[inline]
    pub fn tertiary(self) -> FlowAxis {
        self.secondary().secondary()
    }
}

impl fmt::Display for FlowAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for FlowAxis {
    type Err = ParseAxisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" | "X" => Ok(FlowAxis::X),
            "y" | "Y" => Ok(FlowAxis::Y),
            "z" | "Z" => Ok(FlowAxis::Z),
            other => Err(ParseAxisError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_index() {
        assert_eq!(FlowAxis::X.index(), 0);
        assert_eq!(FlowAxis::Y.index(), 1);
        assert_eq!(FlowAxis::Z.index(), 2);
    }

    #[test]
    fn test_secondary_tertiary_cycle() {
        assert_eq!(FlowAxis::X.secondary(), FlowAxis::Y);
        assert_eq!(FlowAxis::X.tertiary(), FlowAxis::Z);
        assert_eq!(FlowAxis::Z.secondary(), FlowAxis::X);
        assert_eq!(FlowAxis::Z.tertiary(), FlowAxis::Y);
    }

    #[test]
    fn test_parse() {
        assert_eq!("x".parse::<FlowAxis>().unwrap(), FlowAxis::X);
        assert_eq!("Y".parse::<FlowAxis>().unwrap(), FlowAxis::Y);
        assert!("w".parse::<FlowAxis>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(FlowAxis::Z.to_string(), "z");
    }
}
