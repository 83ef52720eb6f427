//////////////////////////////////////////////////////////////////////
// Robinson triangle substitution
//
// every child is 1/phi the size of its parent. an acute triangle
// splits into two children and an obtuse triangle into three; the
// division points are measured from fixed vertices of the parent so
// that two parents sharing an edge split it at the same point.

use crate::errors::*;
use crate::geometry::INVPHI;
use crate::tiles::{Triangle, TriangleKind};

// subdivision depth limit; the sun seed reaches ~10^6 triangles here
pub const MAX_DEPTH: usize = 12;

// degenerate triangles have area below this fraction of leg^2
const AREA_FLOOR_FRACTION: f64 = 1e-6;

//////////////////////////////////////////////////////////////////////
// deflate a single triangle
//
//   acute (O, P1, P2), with Q on O-P1:
//     (P2, Q, P1) acute, (Q, P2, O) obtuse
//
//   obtuse (O, P1, P2), with Q on P1-O and R on the base P1-P2:
//     (R, P2, O) obtuse, (Q, R, P1) obtuse, (R, Q, O) acute

pub fn deflate(tri: &Triangle) -> Vec<Triangle> {

    let [o, p1, p2] = tri.points;

    match tri.kind {

        TriangleKind::Acute => {

            let q = o + INVPHI*(p1 - o);

            vec![
                Triangle::new(TriangleKind::Acute, p2, q, p1),
                Triangle::new(TriangleKind::Obtuse, q, p2, o)
            ]

        }

        TriangleKind::Obtuse => {

            let q = p1 + INVPHI*(o - p1);
            let r = p1 + INVPHI*(p2 - p1);

            vec![
                Triangle::new(TriangleKind::Obtuse, r, p2, o),
                Triangle::new(TriangleKind::Obtuse, q, r, p1),
                Triangle::new(TriangleKind::Acute, r, q, o)
            ]

        }

    }

}

//////////////////////////////////////////////////////////////////////
// one generation step over a whole patch; children stay grouped
// by parent, in parent order

#[cfg(feature = "parallel")]
pub fn deflate_once(patch: &[Triangle]) -> Vec<Triangle> {

    use rayon::prelude::*;

    patch.par_iter().flat_map_iter(deflate).collect()

}

#[cfg(not(feature = "parallel"))]
pub fn deflate_once(patch: &[Triangle]) -> Vec<Triangle> {

    patch.iter().flat_map(deflate).collect()

}

//////////////////////////////////////////////////////////////////////
// deflate the seed patch depth times, checking every generation
// for degenerate triangles

pub fn deflate_patch(seed: Vec<Triangle>, depth: usize) -> Result<Vec<Triangle>> {

    if depth > MAX_DEPTH {
        bail!(ErrorKind::InvalidDepth(depth as i64));
    }

    let mut patch = seed;

    let mut leg = match patch.first() {
        None => { return Ok(patch); }
        Some(t) => t.leg_length()
    };

    for generation in 1..=depth {

        patch = deflate_once(&patch);
        leg *= INVPHI;

        check_areas(&patch, generation, AREA_FLOOR_FRACTION * leg * leg)?;

        debug!("generation {:}: {:} triangles", generation, patch.len());

    }

    Ok(patch)

}

fn check_areas(patch: &[Triangle], generation: usize, floor: f64) -> Result<()> {

    for (tidx, tri) in patch.iter().enumerate() {

        let area = tri.area();

        if !(area >= floor) {
            bail!(ErrorKind::GeometryDegeneracy(generation, tidx, area));
        }

    }

    Ok(())

}

// number of (acute, obtuse) triangles after depth generations
pub fn kind_counts(mut acute: usize, mut obtuse: usize, depth: usize) -> (usize, usize) {

    for _ in 0..depth {
        let next_acute = acute + obtuse;
        obtuse = acute + 2*obtuse;
        acute = next_acute;
    }

    (acute, obtuse)

}

//////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {

    use super::*;
    use crate::geometry::{unit_at, Point2d, PHI};

    fn unit_acute() -> Triangle {
        Triangle::new(TriangleKind::Acute,
                      Point2d::origin(),
                      Point2d::origin() + unit_at(0.0),
                      Point2d::origin() + unit_at(36.0))
    }

    fn unit_obtuse() -> Triangle {
        Triangle::new(TriangleKind::Obtuse,
                      Point2d::origin() + unit_at(36.0),
                      Point2d::origin() + PHI * unit_at(0.0),
                      Point2d::origin())
    }

    fn check_children(parent: &Triangle, children: &[Triangle]) {

        let total: f64 = children.iter().map(|c| c.area()).sum();
        assert!((total - parent.area()).abs() < 1e-12);

        for c in children {
            assert!((c.leg_length() - parent.leg_length() * INVPHI).abs() < 1e-12);
            assert!((c.apex_angle() - c.kind.apex_angle()).abs() < 1e-9,
                    "{:?} apex angle {:}", c.kind, c.apex_angle());
            assert!((c.base_length() / c.leg_length() - c.kind.base_ratio()).abs() < 1e-9);
        }

    }

    #[test]
    fn acute_splits_into_acute_and_obtuse() {

        let parent = unit_acute();
        let children = deflate(&parent);

        assert_eq!(children.len(), 2);
        assert_eq!(children[0].kind, TriangleKind::Acute);
        assert_eq!(children[1].kind, TriangleKind::Obtuse);

        // Q sits on O-P1 at 1/phi from the apex
        let q = children[0].points[1];
        assert!((q - Point2d::new(INVPHI, 0.0)).norm() < 1e-15);

        check_children(&parent, &children);

    }

    #[test]
    fn obtuse_splits_into_two_obtuse_and_one_acute() {

        let parent = unit_obtuse();
        let children = deflate(&parent);

        let kinds: Vec<TriangleKind> = children.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![TriangleKind::Obtuse, TriangleKind::Obtuse, TriangleKind::Acute]);

        check_children(&parent, &children);

    }

    #[test]
    fn children_keep_parent_winding_pattern() {

        // deflating a mirror image gives the mirror image of the children
        let parent = unit_acute();
        let mirror = Triangle::new(parent.kind,
                                   Point2d::new(parent.points[0].x, -parent.points[0].y),
                                   Point2d::new(parent.points[1].x, -parent.points[1].y),
                                   Point2d::new(parent.points[2].x, -parent.points[2].y));

        for (a, b) in deflate(&parent).iter().zip(deflate(&mirror).iter()) {
            assert_eq!(a.kind, b.kind);
            assert!((a.signed_area() + b.signed_area()).abs() < 1e-12);
        }

    }

    #[test]
    fn patch_counts_follow_recurrence() {

        let seed = vec![unit_acute(), unit_obtuse()];

        for depth in 0..6 {

            let patch = deflate_patch(seed.clone(), depth).unwrap();

            let acute = patch.iter().filter(|t| t.kind == TriangleKind::Acute).count();
            let obtuse = patch.len() - acute;

            assert_eq!((acute, obtuse), kind_counts(1, 1, depth));

        }

    }

    #[test]
    fn recurrence_values() {
        assert_eq!(kind_counts(10, 0, 0), (10, 0));
        assert_eq!(kind_counts(10, 0, 1), (10, 10));
        assert_eq!(kind_counts(10, 0, 2), (20, 30));
        assert_eq!(kind_counts(10, 0, 3), (50, 80));
    }

    fn sun() -> Vec<Triangle> {
        crate::seed::seed_triangles(crate::seed::SeedShape::Sun,
                                    Point2d::origin(), 1.0, 10, 0.0).unwrap()
    }

    #[test]
    fn one_generation_groups_children_by_parent() {

        let patch = deflate_patch(sun(), 3).unwrap();
        let next = deflate_once(&patch);

        let mut offset = 0;

        for parent in &patch {
            let children = deflate(parent);
            assert_eq!(&next[offset..offset + children.len()], &children[..]);
            offset += children.len();
        }

        assert_eq!(offset, next.len());

    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_generations_match_sequential() {

        let mut patch = sun();

        for generation in 1..=6 {

            let parallel = deflate_once(&patch);
            let sequential: Vec<Triangle> = patch.iter().flat_map(deflate).collect();

            assert_eq!(parallel, sequential, "generation {:}", generation);

            patch = parallel;

        }

        assert_eq!(patch, deflate_patch(sun(), 6).unwrap());

    }

    #[test]
    fn rejects_excessive_depth() {

        match deflate_patch(vec![unit_acute()], MAX_DEPTH + 1) {
            Err(Error(ErrorKind::InvalidDepth(d), _)) => assert_eq!(d, (MAX_DEPTH + 1) as i64),
            other => panic!("unexpected {:?}", other.map(|p| p.len()))
        }

    }

    #[test]
    fn degenerate_seed_is_reported() {

        let flat = Triangle::new(TriangleKind::Acute,
                                 Point2d::origin(),
                                 Point2d::new(1.0, 0.0),
                                 Point2d::new(2.0, 0.0));

        match deflate_patch(vec![flat], 1) {
            Err(Error(ErrorKind::GeometryDegeneracy(1, _, _), _)) => {}
            other => panic!("unexpected {:?}", other.map(|p| p.len()))
        }

    }

    #[test]
    fn empty_seed_stays_empty() {
        assert!(deflate_patch(vec![], 3).unwrap().is_empty());
    }

}
