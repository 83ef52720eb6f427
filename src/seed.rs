//////////////////////////////////////////////////////////////////////
// initial patches of Robinson triangles arranged around a center
//
// triangle i fills the 36 degree wedge between angles 36*i and
// 36*(i+1) (plus rotation). neighbouring triangles are mirror images
// across their shared edge, and mirror images keep the same labels on
// that edge so that deflation splits it at the same point from both
// sides.

use crate::errors::*;
use crate::geometry::{unit_at, Point2d, PHI};
use crate::tiles::{Triangle, TriangleKind};

// a full ring of 36 degree wedges
pub const MAX_SEED_COUNT: usize = 10;

pub const WEDGE_ANGLE: f64 = 36.0;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SeedShape {
    Sun,  // acute triangles with their apex at the center
    Star  // obtuse triangles whose bases meet at the center
}

impl Default for SeedShape {
    fn default() -> Self { SeedShape::Sun }
}

pub fn seed_triangles(shape: SeedShape,
                      center: Point2d,
                      scale: f64,
                      count: usize,
                      rotation: f64) -> Result<Vec<Triangle>> {

    if !(scale > 0.0) || !scale.is_finite() {
        bail!(ErrorKind::InvalidScale(scale));
    }

    if count < 1 || count > MAX_SEED_COUNT {
        bail!(ErrorKind::InvalidSeedCount(count as i64));
    }

    let ray = |degrees: f64, radius: f64| center + radius * unit_at(degrees + rotation);

    let triangles = (0..count).map(|i| {

        let a0 = WEDGE_ANGLE * i as f64;
        let a1 = a0 + WEDGE_ANGLE;

        let even = i % 2 == 0;

        match shape {

            SeedShape::Sun => {

                let (p1, p2) = if even {
                    (ray(a0, scale), ray(a1, scale))
                } else {
                    (ray(a1, scale), ray(a0, scale))
                };

                Triangle::new(TriangleKind::Acute, center, p1, p2)

            }

            SeedShape::Star => {

                // the base lies along whichever wedge edge is a multiple of 72
                let (tip_angle, apex_angle) = if even { (a0, a1) } else { (a1, a0) };

                Triangle::new(TriangleKind::Obtuse,
                              ray(apex_angle, scale),
                              ray(tip_angle, PHI * scale),
                              center)

            }

        }

    }).collect();

    Ok(triangles)

}

//////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {

    use super::*;

    fn assert_close(p: &Point2d, x: f64, y: f64) {
        assert!((p.x - x).abs() < 1e-12 && (p.y - y).abs() < 1e-12,
                "expected ({:}, {:}), got {:?}", x, y, p);
    }

    #[test]
    fn sun_starts_at_zero_degrees() {

        let tris = seed_triangles(SeedShape::Sun, Point2d::origin(), 1.0, 10, 0.0).unwrap();

        assert_eq!(tris.len(), 10);

        let first = &tris[0];
        assert_eq!(first.kind, TriangleKind::Acute);
        assert_close(&first.points[0], 0.0, 0.0);
        assert_close(&first.points[1], 1.0, 0.0);
        assert_close(&first.points[2], (36.0f64).to_radians().cos(), (36.0f64).to_radians().sin());

    }

    #[test]
    fn sun_neighbours_share_labelled_edges() {

        let tris = seed_triangles(SeedShape::Sun, Point2d::origin(), 2.0, 10, 0.0).unwrap();

        for i in 0..10 {

            let a = &tris[i];
            let b = &tris[(i + 1) % 10];

            // the shared edge keeps its label on both sides
            let shared = if i % 2 == 0 { 2 } else { 1 };
            assert!((a.points[shared] - b.points[shared]).norm() < 1e-12);

            // and the two triangles are mirror images
            assert!(a.signed_area() * b.signed_area() < 0.0);

        }

    }

    #[test]
    fn star_triangles_are_obtuse_robinson_triangles() {

        let tris = seed_triangles(SeedShape::Star, Point2d::new(3.0, -1.0), 1.5, 10, 18.0).unwrap();

        for t in &tris {
            assert!((t.apex_angle() - 108.0).abs() < 1e-9);
            assert!((t.leg_length() - 1.5).abs() < 1e-12);
            assert!((t.base_length() - PHI * 1.5).abs() < 1e-12);
            assert_close(&t.points[2], 3.0, -1.0);
        }

        // odd triangles share their base with the following even one
        for i in (1..10).step_by(2) {
            let a = &tris[i];
            let b = &tris[(i + 1) % 10];
            assert!((a.points[1] - b.points[1]).norm() < 1e-12);
        }

    }

    #[test]
    fn rejects_bad_scale_and_count() {

        match seed_triangles(SeedShape::Sun, Point2d::origin(), 0.0, 10, 0.0) {
            Err(Error(ErrorKind::InvalidScale(_), _)) => {}
            other => panic!("unexpected {:?}", other)
        }

        match seed_triangles(SeedShape::Sun, Point2d::origin(), f64::NAN, 10, 0.0) {
            Err(Error(ErrorKind::InvalidScale(_), _)) => {}
            other => panic!("unexpected {:?}", other)
        }

        for &count in &[0, 11] {
            match seed_triangles(SeedShape::Sun, Point2d::origin(), 1.0, count, 0.0) {
                Err(Error(ErrorKind::InvalidSeedCount(c), _)) => assert_eq!(c, count as i64),
                other => panic!("unexpected {:?}", other)
            }
        }

    }

}
