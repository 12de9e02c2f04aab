//! Step observer trait for monitoring cloth simulation progress.

use crate::float::Float;
use crate::particle::Particle;
use crate::spring::SpringForce;

/// Trait for observing simulation steps.
///
/// Implement this trait to monitor the engine (e.g., for debugging,
/// visualization, or test instrumentation). All methods have default
/// no-op implementations.
pub trait StepObserver<F: Float> {
    /// Called once the force pass (fields, springs, tearing, pinning) is done,
    /// before any particle moves.
    fn on_forces_accumulated(&mut self, _particles: &[Particle<F>]) {}

    /// Called for each spring removed by tearing, just before removal.
    fn on_spring_torn(&mut self, _spring: &SpringForce<F>) {}

    /// Called after all particles have been integrated and floor-clamped.
    fn on_integrate(&mut self) {}

    /// Called when finite checking is on and a particle left the finite range.
    fn on_non_finite(&mut self, _index: usize) {}

    /// Called when a simulation step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl<F: Float> StepObserver<F> for NoOpStepObserver {}
