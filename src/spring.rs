//! Spring-damper forces between particles, with rupture.

use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec3;

/// Which topology rule produced a spring.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpringKind {
    /// Immediate row/column neighbour.
    Structural,
    /// Diagonal neighbour.
    Shear,
    /// Neighbour two cells away along a row or column.
    Bend,
}

/// Row/column of a particle in the cloth grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct GridCoord {
    pub row: usize,
    pub col: usize,
}

impl GridCoord {
    pub fn new(row: usize, col: usize) -> Self {
        GridCoord { row, col }
    }

    /// Row-major index in an `n`-wide grid.
    pub fn index(self, n: usize) -> usize {
        self.row * n + self.col
    }
}

/// Damped spring binding two particles by arena index.
#[derive(Clone, Debug, PartialEq)]
pub struct SpringForce<F: Float> {
    pub a: usize,
    pub b: usize,
    pub rest_length: F,
    pub stiffness: F,
    pub damping: F,
    /// Stretch ratio past which the spring ruptures. Infinite = unbreakable.
    pub tear_ratio: F,
    pub kind: SpringKind,
    /// Grid coordinates of `a` and `b`.
    pub coords: [GridCoord; 2],
}

/// Spring-damper law. Returns the force on the first endpoint; the second
/// endpoint receives its negation. Zero when the endpoints coincide.
pub fn force_between<F: Float>(
    pos_a: Vec3<F>,
    vel_a: Vec3<F>,
    pos_b: Vec3<F>,
    vel_b: Vec3<F>,
    rest_length: F,
    stiffness: F,
    damping: F,
) -> Vec3<F> {
    let delta = pos_a - pos_b;
    let length = delta.length();
    if length.is_near_zero(F::from_f64(1e-10)) {
        return Vec3::zero();
    }
    let dir = delta.scale(F::one() / length);
    let stretch_rate = (vel_a - vel_b).dot(dir);
    let magnitude = stiffness * (length - rest_length) + damping * stretch_rate;
    dir.scale(-magnitude)
}

/// Force on `particle` from a virtual spring tied to a stationary `anchor`.
///
/// The anchor is a throwaway endpoint: only the particle side is returned.
pub fn anchor_force<F: Float>(
    particle: &Particle<F>,
    anchor: Vec3<F>,
    rest_length: F,
    stiffness: F,
    damping: F,
) -> Vec3<F> {
    force_between(
        particle.position,
        particle.velocity,
        anchor,
        Vec3::zero(),
        rest_length,
        stiffness,
        damping,
    )
}

impl<F: Float> SpringForce<F> {
    pub fn new(
        kind: SpringKind,
        coords: [GridCoord; 2],
        n: usize,
        rest_length: F,
        stiffness: F,
        damping: F,
        tear_ratio: F,
    ) -> Self {
        SpringForce {
            a: coords[0].index(n),
            b: coords[1].index(n),
            rest_length,
            stiffness,
            damping,
            tear_ratio,
            kind,
            coords,
        }
    }

    /// Force this spring exerts on endpoint `a`.
    pub fn force(&self, particles: &[Particle<F>]) -> Vec3<F> {
        let pa = &particles[self.a];
        let pb = &particles[self.b];
        force_between(
            pa.position,
            pa.velocity,
            pb.position,
            pb.velocity,
            self.rest_length,
            self.stiffness,
            self.damping,
        )
    }

    /// Add the spring force to `a` and its negation to `b`.
    pub fn apply(&self, particles: &mut [Particle<F>]) {
        let f = self.force(particles);
        self.apply_precomputed(particles, f);
    }

    /// Same as [`SpringForce::apply`] with a force evaluated elsewhere.
    pub fn apply_precomputed(&self, particles: &mut [Particle<F>], force: Vec3<F>) {
        particles[self.a].add_force(force);
        particles[self.b].add_force(-force);
    }

    pub fn length(&self, particles: &[Particle<F>]) -> F {
        particles[self.a].position.distance(particles[self.b].position)
    }

    /// Current length over rest length.
    pub fn stretch_ratio(&self, particles: &[Particle<F>]) -> F {
        if self.rest_length.is_near_zero(F::from_f64(1e-10)) {
            return F::infinity();
        }
        self.length(particles) / self.rest_length
    }

    pub fn is_breakable(&self) -> bool {
        self.tear_ratio.is_finite()
    }

    /// True once the spring is stretched past `rest_length * tear_ratio`.
    pub fn will_tear(&self, particles: &[Particle<F>]) -> bool {
        if !self.is_breakable() {
            return false;
        }
        self.length(particles) > self.rest_length * self.tear_ratio
    }
}
