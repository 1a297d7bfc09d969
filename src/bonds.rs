use glam::{Quat, Vec3};

use crate::config::BondStyle;
use crate::scene::Primitive;

/// The cylinder connecting two atom positions.
///
/// The cylinder is centered at the midpoint, as long as the distance between `a` and `b`, and its
/// +Z axis points from `a` towards `b`. Coincident positions give a zero-length cylinder with the
/// identity orientation.
pub fn build_bond(a: Vec3, b: Vec3, style: &BondStyle) -> Primitive {
    let vec = b - a;
    let depth = vec.length();
    let orientation = match vec.try_normalize() {
        Some(dir) => Quat::from_rotation_arc(Vec3::Z, dir),
        None => Quat::IDENTITY,
    };
    Primitive::Cylinder {
        center: (a + b) / 2.0,
        orientation,
        radius: style.radius,
        depth,
        color: style.color,
    }
}
