//! Progress states of an analysis run

use std::fmt;

/// Progress of one analysis run, strictly increasing within a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Progress {
    #[default]
    Idle,
    Validating,
    Calculating,
    Researching,
    Recommending,
    Complete,
}

impl Progress {
    /// The four visible steps, in order
    pub const STEPS: [Progress; 4] = [
        Progress::Validating,
        Progress::Calculating,
        Progress::Researching,
        Progress::Recommending,
    ];

    /// Position in the run: validating = 0 .. complete = 4
    pub fn step_index(self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Validating => Some(0),
            Self::Calculating => Some(1),
            Self::Researching => Some(2),
            Self::Recommending => Some(3),
            Self::Complete => Some(4),
        }
    }

    /// Completion percentage for the progress gauge
    pub fn percent(self) -> u16 {
        self.step_index().map_or(0, |i| (i * 100 / Self::STEPS.len()) as u16)
    }

    /// Label shown next to the step
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Validating => "Validating Data",
            Self::Calculating => "Calculating SOM/SOV",
            Self::Researching => "Researching Market",
            Self::Recommending => "Generating Recommendations",
            Self::Complete => "Complete",
        }
    }

    /// Whether `step` is already behind this progress
    pub fn has_passed(self, step: Progress) -> bool {
        self > step
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Validating => write!(f, "validating"),
            Self::Calculating => write!(f, "calculating"),
            Self::Researching => write!(f, "researching"),
            Self::Recommending => write!(f, "recommending"),
            Self::Complete => write!(f, "complete"),
        }
    }
}
