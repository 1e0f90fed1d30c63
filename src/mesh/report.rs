//! Build diagnostics.
//!
//! The builder records what each pipeline stage produced as an ordered event
//! list instead of writing to a process-wide logger; callers that want the
//! diagnostics ask for them via
//! [`MeshBuilder::build_with_report`](super::MeshBuilder::build_with_report)
//! and decide themselves whether to print, log, or drop them.

use std::fmt;

/// One pipeline-stage outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildEvent {
    /// Cell enumeration finished.
    CellsEnumerated {
        /// Number of cells created from occupied voxels
        count: usize,
    },
    /// Connectivity filtering kept the largest component.
    ComponentFiltered {
        /// Cells kept
        kept: usize,
        /// Cells before filtering
        total: usize,
    },
    /// Point generation finished.
    PointsGenerated {
        /// Number of unique points
        count: usize,
    },
    /// Face generation finished.
    FacesGenerated {
        /// Number of internal faces
        internal: usize,
        /// Number of boundary faces
        boundary: usize,
    },
    /// A boundary patch was recorded.
    PatchClassified {
        /// Patch name
        name: String,
        /// First face index of the patch
        start_face: usize,
        /// Number of faces in the patch
        n_faces: usize,
    },
}

impl fmt::Display for BuildEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildEvent::CellsEnumerated { count } => write!(f, "enumerated {} cells", count),
            BuildEvent::ComponentFiltered { kept, total } => {
                write!(f, "connectivity filter kept {} of {} cells", kept, total)
            }
            BuildEvent::PointsGenerated { count } => write!(f, "generated {} unique points", count),
            BuildEvent::FacesGenerated { internal, boundary } => {
                write!(
                    f,
                    "generated {} internal and {} boundary faces",
                    internal, boundary
                )
            }
            BuildEvent::PatchClassified {
                name,
                start_face,
                n_faces,
            } => write!(
                f,
                "patch '{}': start face {}, {} faces",
                name, start_face, n_faces
            ),
        }
    }
}

/// Ordered record of what a mesh build did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    events: Vec<BuildEvent>,
}

impl BuildReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, event: BuildEvent) {
        self.events.push(event);
    }

    /// The recorded events, in pipeline order.
    pub fn events(&self) -> &[BuildEvent] {
        &self.events
    }
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mesh Build Report:")?;
        for event in &self.events {
            write!(f, "\n  {}", event)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_display() {
        let mut report = BuildReport::new();
        report.push(BuildEvent::CellsEnumerated { count: 8 });
        report.push(BuildEvent::FacesGenerated {
            internal: 12,
            boundary: 24,
        });
        let text = report.to_string();
        assert!(text.contains("enumerated 8 cells"));
        assert!(text.contains("12 internal and 24 boundary faces"));
    }
}
