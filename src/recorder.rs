//! An in-memory scene that records what a [`Reconciler`](crate::Reconciler) asks of it.
//!
//! The recorded objects and their keyframe curves can be written out as JSON, which makes the
//! [`SceneRecorder`] a portable stand-in for a full 3D application.
use std::collections::HashMap;
use std::io::Write;

use glam::Vec3;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::naming::logical_name;
use crate::scene::{Primitive, SceneRenderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(usize);

impl ObjectId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Keyframe {
    pub time: usize,
    pub position: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneObject {
    pub name: String,
    pub primitive: Primitive,
    pub position: Vec3,
    /// Keyframes ordered by time, at most one per time.
    pub keyframes: Vec<Keyframe>,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct SceneRecorder {
    objects: Vec<SceneObject>,
    #[serde(skip)]
    names: HashMap<String, ObjectId>,
}

impl SceneRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    /// Look up an object by its name.
    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.names.get(name).copied()
    }

    /// Total number of keyframes over all objects.
    pub fn nkeyframes(&self) -> usize {
        self.objects.iter().map(|obj| obj.keyframes.len()).sum()
    }

    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    fn object_mut(&mut self, id: ObjectId) -> Result<&mut SceneObject> {
        self.objects
            .get_mut(id.0)
            .ok_or_else(|| Error::ObjectLookup(format!("object {}", id.0)))
    }

    /// Names are unique within the scene. A taken name gets the first free counter suffix.
    fn unique_name(&self, name: &str) -> String {
        if !self.names.contains_key(name) {
            return name.to_string();
        }
        (1..)
            .map(|k| logical_name(name, k))
            .find(|candidate| !self.names.contains_key(candidate))
            .unwrap_or_else(|| name.to_string())
    }
}

impl SceneRenderer for SceneRecorder {
    type Handle = ObjectId;

    fn create_primitive(&mut self, primitive: &Primitive, name: &str) -> Result<ObjectId> {
        let id = ObjectId(self.objects.len());
        let name = self.unique_name(name);
        self.names.insert(name.clone(), id);
        self.objects.push(SceneObject {
            name,
            primitive: *primitive,
            position: primitive.center(),
            keyframes: Vec::new(),
        });
        Ok(id)
    }

    fn contains(&self, handle: ObjectId) -> bool {
        handle.0 < self.objects.len()
    }

    fn set_position(&mut self, handle: ObjectId, position: Vec3) -> Result<()> {
        self.object_mut(handle)?.position = position;
        Ok(())
    }

    fn record_keyframe(&mut self, handle: ObjectId, time: usize) -> Result<()> {
        let obj = self.object_mut(handle)?;
        let keyframe = Keyframe {
            time,
            position: obj.position,
        };
        match obj.keyframes.binary_search_by_key(&time, |kf| kf.time) {
            Ok(idx) => obj.keyframes[idx] = keyframe,
            Err(idx) => obj.keyframes.insert(idx, keyframe),
        }
        Ok(())
    }
}
