//! Execution backends for the force pass and integration.
//!
//! A backend decides how the per-particle and per-spring work is scheduled;
//! the engine owns the data and the order of the phases. Every backend must
//! produce the same state as [`CpuBackend`] for the same input.

use crate::field::ForceField;
use crate::float::Float;
use crate::integrator::Integrator;
use crate::particle::Particle;
use crate::spring::SpringForce;
use crate::collision::clamp_to_floor;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// The stepping capability the cloth engine is written against.
pub trait SimulationBackend<F: Float> {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Reset each accumulator and add the field forces.
    fn apply_field_forces(&self, particles: &mut [Particle<F>], field: &ForceField<'_, F>);

    /// Add every spring's force to both endpoints.
    ///
    /// With `detect_tears`, returns the ascending indices of springs that are
    /// stretched past their rupture threshold; otherwise returns an empty list.
    fn apply_spring_forces(
        &self,
        particles: &mut [Particle<F>],
        springs: &[SpringForce<F>],
        detect_tears: bool,
    ) -> AllocVec<usize>;

    /// Advance every particle by `dt`, then clamp it to the floor.
    ///
    /// `forces` overrides the accumulators, one entry per particle.
    fn integrate(
        &self,
        particles: &mut [Particle<F>],
        forces: Option<&[Vec3<F>]>,
        integrator: Integrator,
        dt: F,
        damping: F,
    );
}

/// Sequential reference backend.
#[derive(Copy, Clone, Debug, Default)]
pub struct CpuBackend;

impl<F: Float> SimulationBackend<F> for CpuBackend {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn apply_field_forces(&self, particles: &mut [Particle<F>], field: &ForceField<'_, F>) {
        for p in particles.iter_mut() {
            field.apply(p);
        }
    }

    fn apply_spring_forces(
        &self,
        particles: &mut [Particle<F>],
        springs: &[SpringForce<F>],
        detect_tears: bool,
    ) -> AllocVec<usize> {
        let mut torn = AllocVec::new();
        for (i, spring) in springs.iter().enumerate() {
            spring.apply(particles);
            if detect_tears && spring.will_tear(particles) {
                torn.push(i);
            }
        }
        torn
    }

    fn integrate(
        &self,
        particles: &mut [Particle<F>],
        forces: Option<&[Vec3<F>]>,
        integrator: Integrator,
        dt: F,
        damping: F,
    ) {
        for (i, p) in particles.iter_mut().enumerate() {
            let force = forces.map_or(p.force, |f| f[i]);
            integrator.advance(p, force, dt, damping);
            clamp_to_floor(p);
        }
    }
}

/// Rayon backend.
///
/// Field forces and integration run particle-parallel. Spring forces are
/// evaluated in parallel but summed in spring order, so results match
/// [`CpuBackend`] bit for bit.
#[cfg(feature = "parallel")]
#[derive(Copy, Clone, Debug, Default)]
pub struct ParallelBackend;

#[cfg(feature = "parallel")]
impl<F: Float> SimulationBackend<F> for ParallelBackend {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn apply_field_forces(&self, particles: &mut [Particle<F>], field: &ForceField<'_, F>) {
        use rayon::prelude::*;

        particles.par_iter_mut().for_each(|p| field.apply(p));
    }

    fn apply_spring_forces(
        &self,
        particles: &mut [Particle<F>],
        springs: &[SpringForce<F>],
        detect_tears: bool,
    ) -> AllocVec<usize> {
        use rayon::prelude::*;

        // Positions and velocities are read-only during the spring pass.
        let evaluated: AllocVec<(Vec3<F>, bool)> = {
            let particles: &[Particle<F>] = particles;
            springs
                .par_iter()
                .map(|s| (s.force(particles), detect_tears && s.will_tear(particles)))
                .collect()
        };

        let mut torn = AllocVec::new();
        for (i, (spring, (force, tears))) in springs.iter().zip(evaluated).enumerate() {
            spring.apply_precomputed(particles, force);
            if tears {
                torn.push(i);
            }
        }
        torn
    }

    fn integrate(
        &self,
        particles: &mut [Particle<F>],
        forces: Option<&[Vec3<F>]>,
        integrator: Integrator,
        dt: F,
        damping: F,
    ) {
        use rayon::prelude::*;

        match forces {
            Some(forces) => particles.par_iter_mut().zip(forces.par_iter()).for_each(|(p, &f)| {
                integrator.advance(p, f, dt, damping);
                clamp_to_floor(p);
            }),
            None => particles.par_iter_mut().for_each(|p| {
                let f = p.force;
                integrator.advance(p, f, dt, damping);
                clamp_to_floor(p);
            }),
        }
    }
}
