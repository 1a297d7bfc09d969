use std::fmt;

use crate::bonds::build_bond;
use crate::config::SceneConfig;
use crate::error::{Error, Result};
use crate::naming::{logical_name_at, Namer};
use crate::scene::{Primitive, SceneRenderer};
use crate::selection::FrameSelection;
use crate::{Frame, Trajectory};

/// Role name under which bond cylinders are created.
pub const BOND_ROLE: &str = "bond";

/// Where a [`Reconciler`] is in replaying a trajectory.
///
/// The stages only ever move forward: `Uninitialized -> SceneBuilt -> Animating -> Done`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    #[default]
    Uninitialized,
    SceneBuilt,
    Animating,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Uninitialized => "uninitialized",
            Stage::SceneBuilt => "built",
            Stage::Animating => "animating",
            Stage::Done => "done",
        };
        f.write_str(s)
    }
}

/// The scene object belonging to each atom, indexed by atom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomHandles<H> {
    handles: Box<[H]>,
}

impl<H: Copy> AtomHandles<H> {
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<H> {
        self.handles.get(idx).copied()
    }

    pub fn as_slice(&self) -> &[H] {
        &self.handles
    }

    pub fn iter(&self) -> impl Iterator<Item = H> + '_ {
        self.handles.iter().copied()
    }
}

impl<H> From<Vec<H>> for AtomHandles<H> {
    fn from(handles: Vec<H>) -> Self {
        Self {
            handles: handles.into_boxed_slice(),
        }
    }
}

/// Replays the frames of a trajectory into a [`SceneRenderer`].
///
/// The first frame creates the scene through [`Reconciler::build_initial`], which hands out the
/// [`AtomHandles`] that every later [`Reconciler::apply_frame`] call addresses its updates to.
/// Atoms are identified by their index, so every frame must list the same species in the same
/// order as the first.
#[derive(Debug)]
pub struct Reconciler<S: SceneRenderer> {
    renderer: S,
    config: SceneConfig,
    stage: Stage,
    /// Species of the first frame, by atom index.
    reference: Vec<String>,
    bonds: Vec<S::Handle>,
    last_frame: usize,
}

impl<S: SceneRenderer> Reconciler<S> {
    pub fn new(renderer: S, config: SceneConfig) -> Self {
        Self {
            renderer,
            config,
            stage: Stage::default(),
            reference: Vec::new(),
            bonds: Vec::new(),
            last_frame: 0,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn renderer(&self) -> &S {
        &self.renderer
    }

    pub fn into_renderer(self) -> S {
        self.renderer
    }

    /// Handles of the bond cylinders, in the order of [`SceneConfig::bonds`].
    pub fn bond_handles(&self) -> &[S::Handle] {
        &self.bonds
    }

    /// Create one sphere per atom of the first `frame`, in file order, and the bonds listed in
    /// the configuration.
    ///
    /// Every species is looked up before anything is created, so an unknown species leaves the
    /// renderer untouched. If the renderer itself fails partway, the objects created so far stay
    /// in it and the reconciler remains [`Stage::Uninitialized`]; retry with a fresh renderer.
    pub fn build_initial(&mut self, frame: &Frame) -> Result<AtomHandles<S::Handle>> {
        self.expect_stage("build the scene", &[Stage::Uninitialized])?;

        let natoms = frame.natoms();
        let styles = frame
            .species()
            .map(|species| self.config.style(species))
            .collect::<Result<Vec<_>>>()?;
        if let Some((from, to)) = self
            .config
            .bonds()
            .find(|&(from, to)| from >= natoms || to >= natoms)
        {
            return Err(Error::InvalidBond { from, to, natoms });
        }

        let tessellation = self.config.sphere;
        let mut namer = Namer::new();
        let mut handles = Vec::with_capacity(natoms);
        for (atom, style) in frame.atoms.iter().zip(styles) {
            let sphere = Primitive::Sphere {
                center: atom.position,
                radius: style.radius,
                color: style.color,
                segments: tessellation.segments,
                rings: tessellation.rings,
            };
            let name = namer.next(&atom.species);
            let handle = self.renderer.create_primitive(&sphere, &name)?;
            log::trace!("created {name} as {handle:?}");
            if self.config.key_initial_frame {
                self.renderer.record_keyframe(handle, 0)?;
            }
            handles.push(handle);
        }

        let mut bond_namer = Namer::new();
        let mut bonds = Vec::new();
        for (from, to) in self.config.bonds() {
            let cylinder = build_bond(
                frame.atoms[from].position,
                frame.atoms[to].position,
                &self.config.bond,
            );
            let name = bond_namer.next(BOND_ROLE);
            bonds.push(self.renderer.create_primitive(&cylinder, &name)?);
        }

        self.bonds = bonds;
        self.reference = frame.species().map(str::to_string).collect();
        self.stage = Stage::SceneBuilt;
        self.last_frame = 0;
        log::info!("built scene with {natoms} atoms and {} bonds", self.bonds.len());

        Ok(handles.into())
    }

    /// Move every atom's object to its position in `frame` and record a keyframe at
    /// `frame_index`.
    ///
    /// The whole frame is checked against the first frame before any object is moved. When the
    /// check fails, nothing is updated for this frame and the keyframes of earlier frames remain.
    /// Frames must be applied in strictly increasing order.
    pub fn apply_frame(
        &mut self,
        frame: &Frame,
        frame_index: usize,
        handles: &AtomHandles<S::Handle>,
    ) -> Result<()> {
        self.expect_stage("apply a frame", &[Stage::SceneBuilt, Stage::Animating])?;
        if frame_index <= self.last_frame {
            return Err(Error::FrameOrder {
                previous: self.last_frame,
                given: frame_index,
            });
        }

        let expected = self.reference.len();
        if frame.natoms() != expected {
            return Err(Error::AtomCountMismatch {
                frame: frame_index,
                expected,
                found: frame.natoms(),
            });
        }
        for (idx, (atom, reference)) in frame.atoms.iter().zip(&self.reference).enumerate() {
            match handles.get(idx) {
                Some(handle) if self.renderer.contains(handle) => {}
                _ => return Err(Error::ObjectLookup(self.describe_atom(idx))),
            }
            if &atom.species != reference {
                return Err(Error::SpeciesMismatch {
                    frame: frame_index,
                    atom: idx,
                    expected: reference.clone(),
                    found: atom.species.clone(),
                });
            }
        }

        for (handle, atom) in handles.iter().zip(&frame.atoms) {
            self.renderer.set_position(handle, atom.position)?;
            self.renderer.record_keyframe(handle, frame_index)?;
            log::trace!("keyed {handle:?} at {} for frame {frame_index}", atom.position);
        }

        self.stage = Stage::Animating;
        self.last_frame = frame_index;
        log::debug!("applied frame {frame_index}");
        Ok(())
    }

    /// Mark the animation as complete. No frames can be applied afterwards.
    pub fn finish(&mut self) -> Result<()> {
        self.expect_stage("finish", &[Stage::SceneBuilt, Stage::Animating])?;
        self.stage = Stage::Done;
        Ok(())
    }

    /// Build the scene from the first frame of `trajectory` and apply every later frame that is
    /// included in `frame_selection`.
    ///
    /// The first frame always builds the scene, regardless of the selection. Keyframes are
    /// recorded at the index of each frame within the trajectory.
    pub fn animate(
        &mut self,
        trajectory: &Trajectory,
        frame_selection: &FrameSelection,
    ) -> Result<AtomHandles<S::Handle>> {
        let mut frames = trajectory.iter().enumerate();
        let Some((_, first)) = frames.next() else {
            return Err(Error::InvalidStage {
                action: "animate an empty trajectory",
                stage: self.stage,
            });
        };
        let handles = self.build_initial(first)?;

        let mut napplied = 0;
        for (idx, frame) in frames {
            match frame_selection.is_included(idx) {
                Some(true) => {}
                Some(false) => continue,
                None => break,
            }
            self.apply_frame(frame, idx, &handles)?;
            napplied += 1;
        }

        self.finish()?;
        log::info!("animated {napplied} of {} frames", trajectory.len() - 1);
        Ok(handles)
    }

    fn expect_stage(&self, action: &'static str, allowed: &[Stage]) -> Result<()> {
        if allowed.contains(&self.stage) {
            Ok(())
        } else {
            Err(Error::InvalidStage {
                action,
                stage: self.stage,
            })
        }
    }

    fn describe_atom(&self, idx: usize) -> String {
        let species: Vec<&str> = self.reference.iter().map(String::as_str).collect();
        match logical_name_at(&species, idx) {
            Some(name) => format!("atom {idx} ('{name}')"),
            None => format!("atom {idx}"),
        }
    }
}
