//! Time integration schemes for unit-mass particles.

use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// Integration scheme, fixed for the lifetime of a simulation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Integrator {
    /// Semi-implicit Euler: velocity first, then position with the new velocity.
    #[default]
    Symplectic,
    /// Position Verlet from the current and previous positions.
    Verlet,
    /// Symplectic update driven by forces estimated one or more steps ahead.
    /// Roughly twice the cost of the other schemes.
    Backward,
    /// Explicit Euler: position with the old velocity, then velocity.
    Forward,
}

impl Integrator {
    /// Advance one particle by `dt` under `force`, damping velocity by `damping`.
    pub fn advance<F: Float>(self, particle: &mut Particle<F>, force: Vec3<F>, dt: F, damping: F) {
        match self {
            Integrator::Symplectic | Integrator::Backward => symplectic(particle, force, dt, damping),
            Integrator::Verlet => verlet(particle, force, dt, damping),
            Integrator::Forward => forward(particle, force, dt, damping),
        }
    }
}

pub fn symplectic<F: Float>(p: &mut Particle<F>, force: Vec3<F>, dt: F, damping: F) {
    p.velocity = p.velocity.scale(damping) + force.scale(damping * dt);
    p.position = p.position + p.velocity.scale(dt);
}

/// `x' = 2x - x_prev + dt^2 f d`. Velocity is refreshed from the displacement
/// so velocity-dependent forces (spring damping, friction) stay meaningful.
pub fn verlet<F: Float>(p: &mut Particle<F>, force: Vec3<F>, dt: F, damping: F) {
    let current = p.position;
    p.position = current.scale(F::two()) - p.prev_position + force.scale(dt * dt * damping);
    p.prev_position = current;
    p.velocity = (p.position - current).scale(F::one() / dt);
}

pub fn forward<F: Float>(p: &mut Particle<F>, force: Vec3<F>, dt: F, damping: F) {
    p.position = p.position + p.velocity.scale(dt);
    p.velocity = p.velocity.scale(damping) + force.scale(dt * damping);
}

/// Forces sampled from a state simulated ahead of the current one.
#[derive(Clone, Debug, PartialEq)]
pub struct ForceSnapshot<F: Float> {
    forces: AllocVec<Vec3<F>>,
    lookahead_steps: usize,
}

impl<F: Float> ForceSnapshot<F> {
    pub fn new(forces: AllocVec<Vec3<F>>, lookahead_steps: usize) -> Self {
        ForceSnapshot { forces, lookahead_steps }
    }

    /// One force per particle, in particle order.
    pub fn forces(&self) -> &[Vec3<F>] {
        &self.forces
    }

    pub fn lookahead_steps(&self) -> usize {
        self.lookahead_steps
    }
}
