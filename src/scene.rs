use glam::{Quat, Vec3};
use serde::Serialize;

use crate::config::Color;
use crate::error::Result;

/// A renderable shape, as requested from a [`SceneRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Primitive {
    Sphere {
        center: Vec3,
        radius: f32,
        color: Color,
        segments: u32,
        rings: u32,
    },
    /// A cylinder whose axis runs along its local +Z, rotated by `orientation`.
    Cylinder {
        center: Vec3,
        orientation: Quat,
        radius: f32,
        depth: f32,
        color: Color,
    },
}

impl Primitive {
    pub fn center(&self) -> Vec3 {
        match *self {
            Primitive::Sphere { center, .. } | Primitive::Cylinder { center, .. } => center,
        }
    }
}

/// The capabilities a scene must provide to have a trajectory replayed into it.
///
/// Handles are owned by the caller once returned. A renderer is only ever driven from a single
/// [`Reconciler`](crate::Reconciler) at a time.
pub trait SceneRenderer {
    type Handle: Copy + Eq + std::hash::Hash + std::fmt::Debug;

    /// Create a primitive and return the handle through which it can be updated.
    ///
    /// The `name` is the logical name of the object, see [`naming`](crate::naming).
    fn create_primitive(&mut self, primitive: &Primitive, name: &str) -> Result<Self::Handle>;

    /// Whether `handle` refers to an object in this scene.
    fn contains(&self, handle: Self::Handle) -> bool;

    fn set_position(&mut self, handle: Self::Handle, position: Vec3) -> Result<()>;

    /// Record the current position of `handle` as a keyframe at `time`.
    fn record_keyframe(&mut self, handle: Self::Handle, time: usize) -> Result<()>;
}

impl<S: SceneRenderer + ?Sized> SceneRenderer for &mut S {
    type Handle = S::Handle;

    fn create_primitive(&mut self, primitive: &Primitive, name: &str) -> Result<Self::Handle> {
        (**self).create_primitive(primitive, name)
    }

    fn contains(&self, handle: Self::Handle) -> bool {
        (**self).contains(handle)
    }

    fn set_position(&mut self, handle: Self::Handle, position: Vec3) -> Result<()> {
        (**self).set_position(handle, position)
    }

    fn record_keyframe(&mut self, handle: Self::Handle, time: usize) -> Result<()> {
        (**self).record_keyframe(handle, time)
    }
}
