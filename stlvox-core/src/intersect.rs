/// Triangle / axis-aligned box overlap via the separating axis theorem
///
/// Thirteen candidate axes are tested: the nine cross products of the box
/// axes with the triangle edges, the three box face normals and the triangle
/// normal. The first axis that separates the shapes ends the test. Touching
/// shapes are reported as overlapping.
use crate::bounds::Aabb;
use crate::geometry::Triangle;
use crate::vector::Vec3;

/// Returns true when the triangle `p1, p2, p3` intersects the box `[min, max]`
pub fn triangle_intersects_box(min: &Vec3, max: &Vec3, p1: &Vec3, p2: &Vec3, p3: &Vec3) -> bool {
    let center = (min + max) * 0.5;
    let extents = (max - min) * 0.5;

    // Move the triangle into box-centered space
    let v = [p1 - center, p2 - center, p3 - center];
    let edges = [v[1] - v[0], v[2] - v[1], v[0] - v[2]];

    // x cross edges, then y cross edges, then z cross edges
    for axis in 0..3 {
        for f in &edges {
            let candidate = match axis {
                0 => Vec3::new(0.0, -f.z, f.y),
                1 => Vec3::new(f.z, 0.0, -f.x),
                _ => Vec3::new(-f.y, f.x, 0.0),
            };
            if separated_on_axis(&candidate, &v, &extents) {
                return false;
            }
        }
    }

    for axis in 0..3 {
        let lo = v[0][axis].min(v[1][axis]).min(v[2][axis]);
        let hi = v[0][axis].max(v[1][axis]).max(v[2][axis]);
        if hi < -extents[axis] || lo > extents[axis] {
            return false;
        }
    }

    let normal = edges[0].cross(&edges[1]);
    let d = -normal.dot(&v[0]);
    let r = extents.dot(&normal.abs());
    if d.abs() > r {
        return false;
    }

    true
}

/// Project the triangle onto `axis` and compare against the box radius there
fn separated_on_axis(axis: &Vec3, v: &[Vec3; 3], extents: &Vec3) -> bool {
    let p0 = v[0].dot(axis);
    let p1 = v[1].dot(axis);
    let p2 = v[2].dot(axis);
    let r = extents.dot(&axis.abs());

    p0.min(p1).min(p2) > r || p0.max(p1).max(p2) < -r
}

impl Aabb {
    pub fn intersects_triangle(&self, triangle: &Triangle) -> bool {
        let [p1, p2, p3] = &triangle.vertices;
        triangle_intersects_box(&self.min, &self.max, p1, p2, p3)
    }
}
