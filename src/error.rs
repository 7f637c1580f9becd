use core::fmt;

/// Fatal conditions raised while constructing a [`crate::flow_field::FlowField`]
/// or preparing a placement run.
///
/// Everything else in this crate — a seed failing containment, a step
/// failing proximity, a transport truncating early — is normal control flow
/// reported as a boolean, never an `Err`. An empty result (no valid seeds,
/// or a field with no data at all) is success with zero streamlines, not an
/// error.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamlineError {
    /// Field metadata is internally inconsistent: non-positive point
    /// counts, non-positive spacing, or inverted bounds.
    InvalidField(String),
    /// A derived quantity that must be strictly positive (`getDensity()`,
    /// `dSepMax`) came out zero or negative.
    NumericDegenerate(String),
}

impl fmt::Display for StreamlineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamlineError::InvalidField(reason) => write!(f, "invalid flow field: {reason}"),
            StreamlineError::NumericDegenerate(reason) => {
                write!(f, "degenerate placement geometry: {reason}")
            }
        }
    }
}

impl std::error::Error for StreamlineError {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_includes_the_reason() {
        let err = StreamlineError::InvalidField("numPointsLongitudinal must be positive".into());
        assert!(err.to_string().contains("numPointsLongitudinal"));
    }
}
