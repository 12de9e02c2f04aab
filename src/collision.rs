//! Sphere obstacles, the floor plane and floor friction.
//!
//! Spheres are not rigid contacts: a particle that enters a sphere is pushed
//! out by a one-off spring anchored at the sphere's center. The floor is the
//! half-space `y < FLOOR_EPSILON`.

use crate::float::Float;
use crate::particle::Particle;
use crate::spring::anchor_force;
use crate::vec::Vec3;

/// Height of the floor plane. Slightly above zero to keep cloth from z-fighting
/// with a floor drawn at `y = 0`.
pub const FLOOR_EPSILON: f32 = 0.001;

/// Static spherical obstacle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere<F: Float> {
    pub center: Vec3<F>,
    pub radius: F,
}

impl<F: Float> Sphere<F> {
    pub fn new(center: Vec3<F>, radius: F) -> Self {
        Sphere { center, radius }
    }

    /// Strictly inside the sphere.
    pub fn contains(&self, point: Vec3<F>) -> bool {
        point.distance(self.center) < self.radius
    }
}

/// Stiffness of the push-back spring for a cloth of stiffness `cloth_ks`.
///
/// Soft cloth (`0 < ks < 50`) gets a stiffer push-back so it still drapes
/// over spheres instead of sinking through them.
pub fn sphere_stiffness<F: Float>(base: F, cloth_ks: F) -> F {
    if cloth_ks > F::zero() && cloth_ks < F::from_f64(50.0) {
        base * F::from_f64(5.8) / cloth_ks.sqrt()
    } else {
        base
    }
}

/// Rest length of the push-back spring. Scaled past the sphere radius, and
/// with the grid resolution, so particles are expelled before they clip.
pub fn push_back_rest_length<F: Float>(radius: F, half_width: usize) -> F {
    (F::two() + F::from_usize(half_width) / F::from_f64(40.0)) * radius
}

/// Push-back force on `particle` from `sphere`, if the particle is inside it.
pub fn sphere_push_back<F: Float>(
    particle: &Particle<F>,
    sphere: &Sphere<F>,
    stiffness: F,
    half_width: usize,
) -> Option<Vec3<F>> {
    if !sphere.contains(particle.position) {
        return None;
    }
    let rest = push_back_rest_length(sphere.radius, half_width);
    Some(anchor_force(particle, sphere.center, rest, stiffness, rest))
}

/// Resting on (or below) the floor.
pub fn on_floor<F: Float>(particle: &Particle<F>) -> bool {
    particle.position.y <= F::from_f32(FLOOR_EPSILON)
}

/// Force opposing horizontal motion along the floor.
///
/// Proportional to the raw velocity rather than a normalized direction times
/// the normal force, so it behaves like viscous drag more than Coulomb friction.
pub fn floor_friction<F: Float>(particle: &Particle<F>, coefficient: F) -> Vec3<F> {
    Vec3::new(-particle.velocity.x, F::zero(), -particle.velocity.z).scale(coefficient)
}

/// Lift a particle that sank below the floor back onto it. Returns whether it moved.
pub fn clamp_to_floor<F: Float>(particle: &mut Particle<F>) -> bool {
    let floor = F::from_f32(FLOOR_EPSILON);
    if particle.position.y < floor {
        particle.position.y = floor;
        true
    } else {
        false
    }
}
