//! Point masses of the cloth grid.

use crate::float::Float;
use crate::vec::Vec3;

/// A unit-mass particle. The accumulated force doubles as its acceleration.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle<F: Float> {
    pub position: Vec3<F>,
    pub velocity: Vec3<F>,
    pub force: Vec3<F>,
    /// Position restored by [`Particle::reset`].
    pub rest_position: Vec3<F>,
    /// Previous position, read by the Verlet integrator.
    pub prev_position: Vec3<F>,
}

impl<F: Float> Particle<F> {
    pub fn new(position: Vec3<F>) -> Self {
        Particle {
            position,
            velocity: Vec3::zero(),
            force: Vec3::zero(),
            rest_position: position,
            prev_position: position,
        }
    }

    /// Return to the rest position with no motion and no pending force.
    pub fn reset(&mut self) {
        self.position = self.rest_position;
        self.prev_position = self.rest_position;
        self.velocity = Vec3::zero();
        self.force = Vec3::zero();
    }

    pub fn clear_force(&mut self) {
        self.force = Vec3::zero();
    }

    pub fn add_force(&mut self, force: Vec3<F>) {
        self.force = self.force + force;
    }

    /// Hold the particle in place: no force, no velocity, no Verlet drift.
    pub fn freeze(&mut self) {
        self.force = Vec3::zero();
        self.velocity = Vec3::zero();
        self.prev_position = self.position;
    }
}
