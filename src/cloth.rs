//! The cloth simulation engine.

use crate::backend::{CpuBackend, SimulationBackend};
use crate::collision::Sphere;
use crate::config::{ClothConfig, PinMode};
use crate::error::PhysicsError;
use crate::field::ForceField;
use crate::float::Float;
use crate::integrator::{ForceSnapshot, Integrator};
use crate::mesh::{self, Triangle};
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::particle::Particle;
use crate::spring::SpringForce;
use crate::topology::{build_particles, build_springs, corner_indices};
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// A square mass-spring cloth.
///
/// Owns the particle arena, the spring list and the obstacles. Springs refer
/// to particles by index; the arena is never resized after construction.
///
/// One [`step`](ClothSimulation::step) runs the force pass, integrates and
/// clamps against the floor. Readers may inspect particles between steps.
pub struct ClothSimulation<F: Float, B: SimulationBackend<F> = CpuBackend> {
    config: ClothConfig<F>,
    particles: AllocVec<Particle<F>>,
    springs: AllocVec<SpringForce<F>>,
    pinned: AllocVec<usize>,
    time: F,
    backend: B,
}

impl<F: Float> ClothSimulation<F> {
    /// Build the grid on the sequential backend.
    pub fn new(config: ClothConfig<F>) -> Result<Self, PhysicsError> {
        Self::with_backend(config, CpuBackend)
    }
}

impl<F: Float, B: SimulationBackend<F>> ClothSimulation<F, B> {
    /// Validate `config` and build particles and springs once.
    pub fn with_backend(config: ClothConfig<F>, backend: B) -> Result<Self, PhysicsError> {
        config.validate()?;

        let n = config.dimension();
        let particles = build_particles(&config);
        let springs = build_springs(&config);
        let pinned = pinned_indices(config.pin, n);

        log::info!(
            "built {}x{} cloth: {} particles, {} springs, {} spheres, {:?} integrator, {} backend",
            n,
            n,
            particles.len(),
            springs.len(),
            config.spheres.len(),
            config.integrator,
            backend.name(),
        );

        Ok(ClothSimulation {
            config,
            particles,
            springs,
            pinned,
            time: F::zero(),
            backend,
        })
    }

    /// Advance the simulation by one `dt`.
    pub fn step(&mut self) {
        self.step_with(&mut NoOpStepObserver);
    }

    pub fn step_with<O: StepObserver<F>>(&mut self, observer: &mut O) {
        self.force_pass(observer);
        self.integrate_with(observer);
        observer.on_step_complete();
    }

    /// First half of a step: recompute every particle's force accumulator,
    /// remove torn springs and apply pinning. Particles do not move.
    pub fn accumulate_forces(&mut self) {
        self.force_pass(&mut NoOpStepObserver);
    }

    /// Second half of a step: integrate from the accumulated forces, clamp to
    /// the floor and advance the clock.
    pub fn integrate(&mut self) {
        self.integrate_with(&mut NoOpStepObserver);
    }

    /// Forces the particles would feel after `lookahead_steps` symplectic steps
    /// from the current state. Expects the current forces to be accumulated.
    ///
    /// The look-ahead runs on a copy: no particle moves and no spring tears.
    pub fn estimate_forces(&self, lookahead_steps: usize) -> ForceSnapshot<F> {
        let mut scratch = self.particles.clone();
        let mut time = self.time;
        for _ in 0..lookahead_steps {
            self.backend.integrate(
                &mut scratch,
                None,
                Integrator::Symplectic,
                self.config.dt,
                self.config.damping,
            );
            time = time + self.config.dt;
            accumulate(&self.backend, &self.config, time, &mut scratch, &self.springs, &self.pinned, false);
        }
        ForceSnapshot::new(scratch.iter().map(|p| p.force).collect(), lookahead_steps)
    }

    /// Put every particle back at rest and rewind the clock.
    ///
    /// The topology is not rebuilt: springs removed by tearing stay removed.
    pub fn reset(&mut self) {
        for p in self.particles.iter_mut() {
            p.reset();
        }
        self.time = F::zero();
        log::info!("cloth reset, {} springs remain", self.springs.len());
    }

    fn force_pass<O: StepObserver<F>>(&mut self, observer: &mut O) {
        let torn = accumulate(
            &self.backend,
            &self.config,
            self.time,
            &mut self.particles,
            &self.springs,
            &self.pinned,
            self.config.tearing,
        );

        if !torn.is_empty() {
            log::debug!("{} springs tore at t = {:?}", torn.len(), self.time);
            for &i in &torn {
                observer.on_spring_torn(&self.springs[i]);
            }
            remove_springs(&mut self.springs, &torn);
        }

        observer.on_forces_accumulated(&self.particles);
    }

    fn integrate_with<O: StepObserver<F>>(&mut self, observer: &mut O) {
        let snapshot = match self.config.integrator {
            Integrator::Backward => Some(self.estimate_forces(self.config.lookahead_steps)),
            _ => None,
        };

        self.backend.integrate(
            &mut self.particles,
            snapshot.as_ref().map(ForceSnapshot::forces),
            self.config.integrator,
            self.config.dt,
            self.config.damping,
        );
        self.time = self.time + self.config.dt;
        observer.on_integrate();
        log::trace!("stepped to t = {:?}", self.time);

        if self.config.check_finite {
            if let Some(index) = self.particles.iter().position(|p| !p.position.is_finite()) {
                log::warn!("particle {} left the finite range at t = {:?}", index, self.time);
                observer.on_non_finite(index);
            }
        }
    }

    /// True while every particle's position and velocity are finite.
    pub fn is_finite(&self) -> bool {
        self.particles.iter().all(|p| p.position.is_finite() && p.velocity.is_finite())
    }

    pub fn config(&self) -> &ClothConfig<F> { &self.config }
    pub fn backend(&self) -> &B { &self.backend }
    /// Simulated time since construction or the last reset.
    pub fn time(&self) -> F { self.time }
    /// Particles along each side of the grid.
    pub fn dimension(&self) -> usize { self.config.dimension() }
    pub fn particles(&self) -> &[Particle<F>] { &self.particles }
    pub fn springs(&self) -> &[SpringForce<F>] { &self.springs }
    pub fn spheres(&self) -> &[Sphere<F>] { &self.config.spheres }
    /// Indices held by the pin mode.
    pub fn pinned(&self) -> &[usize] { &self.pinned }
    pub fn particle_count(&self) -> usize { self.particles.len() }
    pub fn spring_count(&self) -> usize { self.springs.len() }

    pub fn particle(&self, row: usize, col: usize) -> &Particle<F> {
        &self.particles[row * self.dimension() + col]
    }

    pub fn particle_mut(&mut self, row: usize, col: usize) -> &mut Particle<F> {
        let n = self.dimension();
        &mut self.particles[row * n + col]
    }

    pub fn positions(&self) -> AllocVec<Vec3<F>> {
        self.particles.iter().map(|p| p.position).collect()
    }

    /// Endpoint positions of every surviving spring, for line drawing.
    pub fn spring_segments(&self) -> impl Iterator<Item = (Vec3<F>, Vec3<F>)> + '_ {
        self.springs
            .iter()
            .map(|s| (self.particles[s.a].position, self.particles[s.b].position))
    }

    /// Shaded surface triangles, two per grid quad.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle<F>> + '_ {
        mesh::triangles(&self.particles, self.dimension())
    }
}

fn pinned_indices(mode: PinMode, n: usize) -> AllocVec<usize> {
    match mode {
        PinMode::None => AllocVec::new(),
        PinMode::Corners => corner_indices(n).to_vec(),
        PinMode::Side => (0..n).collect(),
    }
}

/// Force pass over `particles`: field forces, springs, then pinning.
/// Returns the springs that should tear.
fn accumulate<F: Float, B: SimulationBackend<F>>(
    backend: &B,
    config: &ClothConfig<F>,
    time: F,
    particles: &mut [Particle<F>],
    springs: &[SpringForce<F>],
    pinned: &[usize],
    detect_tears: bool,
) -> AllocVec<usize> {
    let field = ForceField::from_config(config, time);
    backend.apply_field_forces(particles, &field);
    let torn = backend.apply_spring_forces(particles, springs, detect_tears);

    for &i in pinned {
        if config.freeze_pinned {
            particles[i].freeze();
        } else {
            particles[i].clear_force();
        }
    }

    torn
}

/// Drop the springs at the ascending indices `torn` in one compaction.
fn remove_springs<F: Float>(springs: &mut AllocVec<SpringForce<F>>, torn: &[usize]) {
    let mut torn = torn.iter().peekable();
    let mut index = 0;
    springs.retain(|_| {
        let remove = torn.next_if_eq(&&index).is_some();
        index += 1;
        !remove
    });
}
