//! Read xyz trajectories and replay them as keyframed scene animations.
//!
//! The [`XYZReader`] reads frame blocks from a trajectory, and the [`Reconciler`] turns the
//! resulting [`Frame`]s into calls on a [`SceneRenderer`]. Frame 0 creates one object per atom,
//! every later frame moves those objects and records a keyframe at its index.
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;

use glam::Vec3;

use crate::error::MalformedTrajectory;
use crate::reader::{block_len, parse_atom_into, parse_count, read_line};

pub use crate::config::{BondStyle, SceneConfig, SpeciesStyle, Tessellation};
pub use crate::error::{Error, Result};
pub use crate::reconcile::{AtomHandles, Reconciler, Stage};
pub use crate::recorder::{ObjectId, SceneRecorder};
pub use crate::scene::{Primitive, SceneRenderer};
pub use crate::selection::{FrameSelection, Range};

pub mod bonds;
pub mod config;
pub mod error;
pub mod naming;
pub mod reader;
pub mod reconcile;
pub mod recorder;
pub mod scene;
pub mod selection;

/// A single atom within a [`Frame`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Atom {
    pub species: String,
    pub position: Vec3,
}

/// One simulation snapshot.
///
/// The index of an atom in `atoms` is its identity across the frames of a trajectory.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Frame {
    pub comment: String,
    pub atoms: Vec<Atom>,
}

impl Frame {
    pub fn natoms(&self) -> usize {
        self.atoms.len()
    }

    pub fn coords(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.atoms.iter().map(|atom| atom.position)
    }

    pub fn species(&self) -> impl Iterator<Item = &str> + '_ {
        self.atoms.iter().map(|atom| atom.species.as_str())
    }
}

/// What to do with a partial frame block at the end of a trajectory.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TrailingBlock {
    /// Drop the partial block and log a warning.
    #[default]
    Warn,
    /// Fail with [`MalformedTrajectory::Truncated`].
    Error,
}

#[derive(Debug)]
pub struct XYZReader<R> {
    pub file: R,
    trailing: TrailingBlock,
    /// Atom count declared by the first block.
    natoms: Option<usize>,
    /// Lines consumed so far.
    line: usize,
    step: usize,
    scratch: Vec<String>,
}

impl XYZReader<BufReader<std::fs::File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let file = std::fs::File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> XYZReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            file: reader,
            trailing: TrailingBlock::default(),
            natoms: None,
            line: 0,
            step: 0,
            scratch: Vec::new(),
        }
    }

    pub fn with_trailing(mut self, trailing: TrailingBlock) -> Self {
        self.trailing = trailing;
        self
    }

    /// The atom count of this trajectory, once the first block has been read.
    pub fn natoms(&self) -> Option<usize> {
        self.natoms
    }

    /// The number of frames that have been read so far.
    pub fn step(&self) -> usize {
        self.step
    }

    /// A convenience function to read all frames in a trajectory.
    pub fn read_all_frames(&mut self) -> Result<Box<[Frame]>> {
        let mut frames = Vec::new();
        self.read_frames(&mut frames, &FrameSelection::All)?;
        Ok(frames.into_boxed_slice())
    }

    /// Append [`Frame`]s to the `frames` buffer according to a [`FrameSelection`].
    ///
    /// Every block up to the end of the selection is parsed, since the blocks of an xyz file can
    /// only be located by reading through them. If successful, returns the number of frames that
    /// were appended.
    pub fn read_frames(
        &mut self,
        frames: &mut impl Extend<Frame>,
        frame_selection: &FrameSelection,
    ) -> Result<usize> {
        let mut n = 0;
        loop {
            let idx = self.step;
            let included = match frame_selection.is_included(idx) {
                Some(included) => included,
                None => break,
            };
            let mut frame = Frame::default();
            if !self.read_frame(&mut frame)? {
                break;
            }
            if included {
                frames.extend(Some(frame));
                n += 1;
            }
        }
        Ok(n)
    }

    /// Reads the next frame block into `frame` and advances one step.
    ///
    /// Returns `false` when there are no more complete frames. The first block of a trajectory
    /// must be complete; a partial block after it is handled according to [`TrailingBlock`].
    pub fn read_frame(&mut self, frame: &mut Frame) -> Result<bool> {
        let start = self.line + 1;

        // The first block is also where the atom count of the trajectory is established.
        let mut nlines = 0;
        let natoms = match self.natoms {
            Some(natoms) => natoms,
            None => {
                self.scratch.resize_with(1, String::new);
                if !read_line(&mut self.file, &mut self.scratch[0])? {
                    return Err(MalformedTrajectory::BadCount {
                        line: start,
                        found: String::new(),
                    }
                    .into());
                }
                let natoms = parse_count(&self.scratch[0], start)?;
                self.natoms = Some(natoms);
                nlines = 1;
                natoms
            }
        };

        let expected = block_len(natoms);
        self.scratch.resize_with(expected, String::new);
        while nlines < expected {
            if !read_line(&mut self.file, &mut self.scratch[nlines])? {
                break;
            }
            nlines += 1;
        }
        self.line += nlines;

        if nlines == 0 {
            return Ok(false);
        }
        if nlines < expected {
            let truncated = MalformedTrajectory::Truncated {
                line: start,
                expected,
                found: nlines,
            };
            if self.step == 0 || self.trailing == TrailingBlock::Error {
                return Err(truncated.into());
            }
            log::warn!("dropping partial frame block after frame {}: {truncated}", self.step - 1);
            return Ok(false);
        }

        let count = parse_count(&self.scratch[0], start)?;
        if count != natoms {
            return Err(MalformedTrajectory::CountMismatch {
                line: start,
                expected: natoms,
                found: count,
            }
            .into());
        }

        frame.comment.clear();
        frame.comment.push_str(&self.scratch[1]);
        frame.atoms.resize_with(natoms, Atom::default);
        for (i, atom) in frame.atoms.iter_mut().enumerate() {
            let offset = 2 + i;
            parse_atom_into(&self.scratch[offset], start + offset, atom)?;
        }

        log::trace!("read frame {} at line {start}", self.step);
        self.step += 1;
        Ok(true)
    }
}

impl<R: BufRead + Seek> XYZReader<R> {
    /// Reset the reader to the start of the trajectory.
    pub fn home(&mut self) -> std::io::Result<()> {
        self.file.seek(SeekFrom::Start(0))?;
        self.natoms = None;
        self.line = 0;
        self.step = 0;
        self.scratch.clear();
        Ok(())
    }
}

/// An ordered, immutable sequence of [`Frame`]s that all share the same atom count.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    natoms: usize,
    frames: Box<[Frame]>,
}

impl Trajectory {
    /// Parse the text of an xyz trajectory, dropping a partial trailing block with a warning.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with(text, TrailingBlock::Warn)
    }

    pub fn parse_with(text: &str, trailing: TrailingBlock) -> Result<Self> {
        Self::from_reader(XYZReader::new(text.as_bytes()).with_trailing(trailing))
    }

    pub fn open<P: AsRef<Path>>(path: P, trailing: TrailingBlock) -> Result<Self> {
        Self::from_reader(XYZReader::open(path)?.with_trailing(trailing))
    }

    fn from_reader<R: BufRead>(mut reader: XYZReader<R>) -> Result<Self> {
        let frames = reader.read_all_frames()?;
        // A successful read has at least the first frame, which fixes the atom count.
        let natoms = reader.natoms().unwrap_or_default();
        log::info!("read {} frames of {natoms} atoms", frames.len());
        Ok(Self { natoms, frames })
    }

    pub fn natoms(&self) -> usize {
        self.natoms
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Frame> {
        self.frames.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }
}

impl<'t> IntoIterator for &'t Trajectory {
    type Item = &'t Frame;
    type IntoIter = std::slice::Iter<'t, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Parse the text of an xyz trajectory. See [`Trajectory::parse`].
pub fn parse(text: &str) -> Result<Trajectory> {
    Trajectory::parse(text)
}
