//! Visual parameters for the objects in a scene.
//!
//! A [`SceneConfig`] can be loaded from a JSON file. Any field that is left out takes its default
//! value, so an empty object `{}` describes the default scene: hydrogen and oxygen spheres, grey
//! bonds, and no bonding table.
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An RGBA color with components in `0.0..=1.0`.
pub type Color = [f32; 4];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeciesStyle {
    pub radius: f32,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BondStyle {
    pub radius: f32,
    pub color: Color,
}

impl Default for BondStyle {
    fn default() -> Self {
        Self {
            radius: 0.5,
            color: [0.2, 0.2, 0.2, 1.0],
        }
    }
}

/// Sphere subdivision passed on to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tessellation {
    pub segments: u32,
    pub rings: u32,
}

impl Default for Tessellation {
    fn default() -> Self {
        Self {
            segments: 64,
            rings: 64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub species: HashMap<String, SpeciesStyle>,
    pub bond: BondStyle,
    pub sphere: Tessellation,
    /// Bonds to draw, from an atom index to the indices it is bonded to.
    ///
    /// Bonds are placed on the first frame and are not animated.
    pub bonding: BTreeMap<usize, Vec<usize>>,
    /// Whether building the scene also records a keyframe at time 0 for every atom.
    pub key_initial_frame: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let species = [
            (
                "H",
                SpeciesStyle {
                    radius: 1.1,
                    color: [1.0, 1.0, 1.0, 1.0],
                },
            ),
            (
                "O",
                SpeciesStyle {
                    radius: 1.52,
                    color: [1.0, 0.0, 0.0, 1.0],
                },
            ),
        ]
        .into_iter()
        .map(|(name, style)| (name.to_string(), style))
        .collect();

        Self {
            species,
            bond: BondStyle::default(),
            sphere: Tessellation::default(),
            bonding: BTreeMap::new(),
            key_initial_frame: true,
        }
    }
}

impl SceneConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn style(&self, species: &str) -> Result<SpeciesStyle> {
        self.species
            .get(species)
            .copied()
            .ok_or_else(|| Error::UnknownSpecies(species.to_string()))
    }

    /// Iterate over all bonds as `(from, to)` pairs, ordered by `from` and then by the order in
    /// the bonding table.
    pub fn bonds(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.bonding
            .iter()
            .flat_map(|(&from, tos)| tos.iter().map(move |&to| (from, to)))
    }
}
