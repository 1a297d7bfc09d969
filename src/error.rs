use thiserror::Error;

use crate::reconcile::Stage;

pub type Result<T> = std::result::Result<T, Error>;

/// Ways in which the text of an xyz trajectory can be malformed.
///
/// All line numbers are 1-based and refer to the line in the input as a whole.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedTrajectory {
    #[error("line {line}: expected a positive atom count, found '{found}'")]
    BadCount { line: usize, found: String },
    #[error("line {line}: frame declares {found} atoms, but the trajectory has {expected}")]
    CountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: frame is truncated, expected {expected} lines but found {found}")]
    Truncated {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: expected 4 fields (species x y z), found {found}")]
    AtomFields { line: usize, found: usize },
    #[error("line {line}: could not parse coordinate '{token}'")]
    BadCoordinate { line: usize, token: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed trajectory: {0}")]
    Malformed(#[from] MalformedTrajectory),
    #[error("frame {frame}, atom {atom}: species changed from '{expected}' to '{found}'")]
    SpeciesMismatch {
        frame: usize,
        atom: usize,
        expected: String,
        found: String,
    },
    #[error("no radius and color configured for species '{0}'")]
    UnknownSpecies(String),
    #[error("no scene object for {0}")]
    ObjectLookup(String),
    #[error("frame {frame} has {found} atoms, but the scene was built for {expected}")]
    AtomCountMismatch {
        frame: usize,
        expected: usize,
        found: usize,
    },
    #[error("bond {from} -> {to} refers to an atom beyond the {natoms} atoms in the frame")]
    InvalidBond {
        from: usize,
        to: usize,
        natoms: usize,
    },
    #[error("frame {given} cannot be applied after frame {previous}")]
    FrameOrder { previous: usize, given: usize },
    #[error("cannot {action} while the scene is {stage}")]
    InvalidStage { action: &'static str, stage: Stage },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
