//! Triangulated view of the cloth for renderers.

use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec3;

/// One shaded triangle of the cloth surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Triangle<F: Float> {
    pub indices: [usize; 3],
    pub vertices: [Vec3<F>; 3],
    /// Brightness in `[1/3, 1]` to multiply the base color by.
    pub shade: F,
}

impl<F: Float> Triangle<F> {
    /// Base color scaled by the triangle's shade.
    pub fn color(&self, base: [F; 3]) -> [F; 3] {
        [base[0] * self.shade, base[1] * self.shade, base[2] * self.shade]
    }
}

/// Fixed light direction `(0, -1, 1)`, normalized.
pub fn light_direction<F: Float>() -> Vec3<F> {
    Vec3::new(F::zero(), -F::one(), F::one()).normalize()
}

/// Ambient floor of one third plus a diffuse term from the face normal.
pub fn shade<F: Float>(a: Vec3<F>, b: Vec3<F>, c: Vec3<F>) -> F {
    let normal = (a - b).cross(c - b).normalize();
    let facing = normal.component_mul(light_direction()).component_sum().abs();
    let ambient = F::one() / F::from_f64(3.0);
    ambient + (F::one() - ambient) * facing
}

/// Two triangles per grid quad, wound so neighbouring faces share a normal
/// orientation: `[(r,c), (r+1,c), (r,c+1)]` and `[(r+1,c), (r+1,c+1), (r,c+1)]`.
pub fn triangles<F: Float>(
    particles: &[Particle<F>],
    n: usize,
) -> impl Iterator<Item = Triangle<F>> + '_ {
    let quads = n.saturating_sub(1);
    (0..quads * quads).flat_map(move |q| {
        let (row, col) = (q / quads, q % quads);
        let tl = row * n + col;
        let tr = tl + 1;
        let bl = tl + n;
        let br = bl + 1;
        [[tl, bl, tr], [bl, br, tr]].map(|indices| {
            let vertices = indices.map(|i| particles[i].position);
            Triangle {
                indices,
                vertices,
                shade: shade(vertices[0], vertices[1], vertices[2]),
            }
        })
    })
}
