use drape::{ClothConfig, ClothLayout, ClothSimulation, Integrator, PinMode, Sphere, Vec3};
use wasm_bindgen::prelude::*;

// ---- Scene presets ----

/// Spheres under a corner-pinned sheet.
pub const SCENE_SPHERES: u32 = 0;
/// A flag pinned along one edge, blowing in the wind.
pub const SCENE_BANNER: u32 = 1;
/// A folded sheet pinned at the corners, tearing under its own weight.
pub const SCENE_PINNED_FOLDED: u32 = 2;
/// A folded sheet dropped freely.
pub const SCENE_UNPINNED_FOLDED: u32 = 3;

fn preset(scene: u32) -> ClothConfig<f32> {
    let base = ClothConfig::new();
    match scene {
        SCENE_BANNER => base.with_pin(PinMode::Side).with_wind(true),
        SCENE_PINNED_FOLDED => base
            .with_layout(ClothLayout::Folded { lift: 5.0 })
            .with_tearing(true),
        SCENE_UNPINNED_FOLDED => base
            .with_layout(ClothLayout::Folded { lift: 5.0 })
            .with_pin(PinMode::None),
        _ => {
            let radius = 4.0;
            [(-4.0, -4.0), (4.0, -4.0), (-4.0, 4.0), (4.0, 4.0)]
                .into_iter()
                .fold(base, |config, (x, z)| {
                    config.with_sphere(Sphere::new(Vec3::new(x, 2.0, z), radius))
                })
        }
    }
}

fn integrator_from(code: u32) -> Integrator {
    match code {
        1 => Integrator::Verlet,
        2 => Integrator::Backward,
        3 => Integrator::Forward,
        _ => Integrator::Symplectic,
    }
}

// ---- Cloth Demo ----

#[wasm_bindgen]
pub struct ClothDemo {
    cloth: ClothSimulation<f32>,
}

#[wasm_bindgen]
impl ClothDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(scene: u32, integrator: u32) -> Result<ClothDemo, JsError> {
        let config = preset(scene).with_integrator(integrator_from(integrator));
        let cloth = ClothSimulation::new(config)?;
        Ok(ClothDemo { cloth })
    }

    /// Run `steps` fixed-size simulation steps.
    pub fn update(&mut self, steps: usize) {
        for _ in 0..steps {
            self.cloth.step();
        }
    }

    pub fn reset(&mut self) {
        self.cloth.reset();
    }

    /// Returns flat [x0, y0, z0, x1, y1, z1, ...] in row-major order
    pub fn positions(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.cloth.particle_count() * 3);
        for p in self.cloth.particles() {
            out.extend_from_slice(&[p.position.x, p.position.y, p.position.z]);
        }
        out
    }

    /// Returns flat [ax, ay, az, bx, by, bz, ...] per surviving spring
    pub fn springs(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.cloth.spring_count() * 6);
        for (a, b) in self.cloth.spring_segments() {
            out.extend_from_slice(&[a.x, a.y, a.z, b.x, b.y, b.z]);
        }
        out
    }

    /// Returns 10 floats per triangle: three vertices, then the shade factor
    pub fn triangles(&self) -> Vec<f32> {
        let mut out = Vec::new();
        for tri in self.cloth.triangles() {
            for v in tri.vertices {
                out.extend_from_slice(&[v.x, v.y, v.z]);
            }
            out.push(tri.shade);
        }
        out
    }

    /// Returns [x, y, z, radius] per sphere
    pub fn spheres(&self) -> Vec<f32> {
        let mut out = Vec::new();
        for s in self.cloth.spheres() {
            out.extend_from_slice(&[s.center.x, s.center.y, s.center.z, s.radius]);
        }
        out
    }

    pub fn dimension(&self) -> usize {
        self.cloth.dimension()
    }

    pub fn spring_count(&self) -> usize {
        self.cloth.spring_count()
    }

    pub fn time(&self) -> f32 {
        self.cloth.time()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for scene in 0..4 {
            assert!(preset(scene).validate().is_ok(), "scene {} rejected", scene);
        }
        assert_eq!(preset(SCENE_SPHERES).spheres.len(), 4);
    }
}
