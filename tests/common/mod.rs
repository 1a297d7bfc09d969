#![allow(dead_code)]

use glam::Vec3;
use xyzanim::{Primitive, SceneRenderer};

pub mod trajectories {
    pub const TWO_WATER: &str = "tests/trajectories/two_water.xyz";
    pub const TRAILING: &str = "tests/trajectories/water_trailing.xyz";
    pub const BAD_HEADER: &str = "tests/trajectories/bad_header.xyz";
    pub const SPECIES_SWAP: &str = "tests/trajectories/species_swap.xyz";
}

/// Build the text of a trajectory with one block per frame, each followed by a blank separator.
pub fn trajectory_text(frames: &[Vec<(&str, [f32; 3])>]) -> String {
    let mut text = String::new();
    for (idx, atoms) in frames.iter().enumerate() {
        text.push_str(&format!("{}\nframe {idx}\n", atoms.len()));
        for (species, [x, y, z]) in atoms {
            text.push_str(&format!("{species} {x} {y} {z}\n"));
        }
        text.push('\n');
    }
    text
}

/// A single water molecule, shifted along x by `dx`.
pub fn water(dx: f32) -> Vec<(&'static str, [f32; 3])> {
    vec![
        ("O", [dx, 0.0, 0.0]),
        ("H", [dx + 0.9572, 0.0, 0.0]),
        ("H", [dx - 0.24, 0.9266, 0.0]),
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create { handle: u32, name: String, primitive: Primitive },
    SetPosition { handle: u32, position: Vec3 },
    Keyframe { handle: u32, time: usize },
}

/// A renderer that only remembers what it was asked to do.
///
/// Handles start at 100 so that they cannot be mistaken for atom indices.
#[derive(Debug, Default)]
pub struct CallLog {
    pub calls: Vec<Call>,
    next: u32,
    capacity: Option<u32>,
}

impl CallLog {
    /// A log that refuses to create more than `capacity` objects.
    pub fn with_capacity(capacity: u32) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    pub fn created(&self) -> Vec<(u32, &str)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Create { handle, name, .. } => Some((*handle, name.as_str())),
                _ => None,
            })
            .collect()
    }

    pub fn keyframes(&self) -> Vec<(u32, usize)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Keyframe { handle, time } => Some((*handle, *time)),
                _ => None,
            })
            .collect()
    }

    pub fn positions(&self) -> Vec<(u32, Vec3)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::SetPosition { handle, position } => Some((*handle, *position)),
                _ => None,
            })
            .collect()
    }
}

impl SceneRenderer for CallLog {
    type Handle = u32;

    fn create_primitive(&mut self, primitive: &Primitive, name: &str) -> xyzanim::Result<u32> {
        if self.capacity.is_some_and(|capacity| self.next >= capacity) {
            return Err(std::io::Error::other("scene is full").into());
        }
        let handle = 100 + self.next;
        self.next += 1;
        self.calls.push(Call::Create {
            handle,
            name: name.to_string(),
            primitive: *primitive,
        });
        Ok(handle)
    }

    fn contains(&self, handle: u32) -> bool {
        (100..100 + self.next).contains(&handle)
    }

    fn set_position(&mut self, handle: u32, position: Vec3) -> xyzanim::Result<()> {
        self.calls.push(Call::SetPosition { handle, position });
        Ok(())
    }

    fn record_keyframe(&mut self, handle: u32, time: usize) -> xyzanim::Result<()> {
        self.calls.push(Call::Keyframe { handle, time });
        Ok(())
    }
}
