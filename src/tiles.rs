//////////////////////////////////////////////////////////////////////
// Robinson triangles and the rhombi they pair into

use crate::geometry::{interior_angles, poly_signed_area, tri_signed_area, Point2d, INVPHI, PHI};

/// Robinson triangle shape.
///
/// `Acute` has a 36° apex (legs `s`, base `s/φ`); two of them glued along
/// their base make a thin rhombus. `Obtuse` has a 108° apex (legs `s`, base
/// `φ·s`); two of them make a thick rhombus.
#[derive(Debug, PartialEq, PartialOrd, Eq, Ord, Clone, Copy, Hash)]
pub enum TriangleKind {
    Acute,
    Obtuse
}

impl TriangleKind {

    // apex angle in degrees
    pub fn apex_angle(self) -> f64 {
        match self {
            TriangleKind::Acute => 36.0,
            TriangleKind::Obtuse => 108.0
        }
    }

    // base length divided by leg length
    pub fn base_ratio(self) -> f64 {
        match self {
            TriangleKind::Acute => INVPHI,
            TriangleKind::Obtuse => PHI
        }
    }

    // rhombus formed by two triangles of this kind
    pub fn rhombus_class(self) -> RhombusClass {
        match self {
            TriangleKind::Acute => RhombusClass::Thin,
            TriangleKind::Obtuse => RhombusClass::Thick
        }
    }

}

//////////////////////////////////////////////////////////////////////

/// A Robinson triangle `(O, P1, P2)` with the apex `O` first.
///
/// The order of `P1` and `P2` is the triangle's orientation. Deflation
/// measures its division points from fixed vertices, so two triangles
/// sharing an edge must agree on the labels of that edge's endpoints.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Triangle {

    pub points: [Point2d; 3], // apex, then the two base vertices
    pub kind:   TriangleKind

}

impl Triangle {

    pub fn new(kind: TriangleKind, o: Point2d, p1: Point2d, p2: Point2d) -> Self {
        Triangle { points: [o, p1, p2], kind: kind }
    }

    pub fn apex(&self) -> &Point2d {
        &self.points[0]
    }

    pub fn base(&self) -> (&Point2d, &Point2d) {
        (&self.points[1], &self.points[2])
    }

    pub fn signed_area(&self) -> f64 {
        tri_signed_area(&self.points[0], &self.points[1], &self.points[2])
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    // length of O-P1 (equal to O-P2 up to rounding)
    pub fn leg_length(&self) -> f64 {
        (self.points[1] - self.points[0]).norm()
    }

    pub fn base_length(&self) -> f64 {
        (self.points[2] - self.points[1]).norm()
    }

    // measured apex angle in degrees
    pub fn apex_angle(&self) -> f64 {
        interior_angles(&self.points)[0]
    }

    // the apex reflected across the base, i.e. the fourth rhombus vertex
    pub fn mirrored_apex(&self) -> Point2d {
        self.points[1] + (self.points[2] - self.points[0])
    }

}

//////////////////////////////////////////////////////////////////////

#[derive(Debug, PartialEq, PartialOrd, Eq, Ord, Clone, Copy, Hash)]
pub enum RhombusClass {
    Thick,
    Thin
}

impl RhombusClass {

    pub fn name(self) -> &'static str {
        match self {
            RhombusClass::Thick => "thick",
            RhombusClass::Thin => "thin"
        }
    }

    // interior angles starting from a triangle apex
    pub fn angles(self) -> [f64; 4] {
        match self {
            RhombusClass::Thick => [108.0, 72.0, 108.0, 72.0],
            RhombusClass::Thin => [36.0, 144.0, 36.0, 144.0]
        }
    }

}

/// A P3 rhombus with its vertices in counter-clockwise order.
///
/// `points[0]` and `points[2]` are the apexes of the two triangles it was
/// assembled from; `points[1]` and `points[3]` are the ends of their shared
/// base.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Rhombus {

    pub points: [Point2d; 4],
    pub class:  RhombusClass

}

impl Rhombus {

    // build from two apexes and the shared base, fixing the winding
    pub fn from_halves(class: RhombusClass,
                       apex0: Point2d,
                       b0: Point2d,
                       apex1: Point2d,
                       b1: Point2d) -> Self {

        let points = if tri_signed_area(&apex0, &b0, &b1) > 0.0 {
            [apex0, b0, apex1, b1]
        } else {
            [apex0, b1, apex1, b0]
        };

        Rhombus { points: points, class: class }

    }

    // complete a lone triangle by mirroring it across its base
    pub fn from_triangle(tri: &Triangle) -> Self {

        let (b0, b1) = tri.base();

        Self::from_halves(tri.kind.rhombus_class(),
                          *tri.apex(), *b0,
                          tri.mirrored_apex(), *b1)

    }

    pub fn area(&self) -> f64 {
        poly_signed_area(&self.points).abs()
    }

    pub fn signed_area(&self) -> f64 {
        poly_signed_area(&self.points)
    }

    pub fn interior_angles(&self) -> Vec<f64> {
        interior_angles(&self.points)
    }

    pub fn center(&self) -> Point2d {
        nalgebra::center(&self.points[0], &self.points[2])
    }

    // side length of the rhombus
    pub fn edge_length(&self) -> f64 {
        (self.points[1] - self.points[0]).norm()
    }

}

//////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {

    use super::*;
    use crate::geometry::unit_at;

    fn acute() -> Triangle {
        Triangle::new(TriangleKind::Acute,
                      Point2d::origin(),
                      Point2d::origin() + unit_at(0.0),
                      Point2d::origin() + unit_at(36.0))
    }

    #[test]
    fn acute_triangle_measures() {

        let t = acute();

        assert!((t.apex_angle() - 36.0).abs() < 1e-9);
        assert!((t.leg_length() - 1.0).abs() < 1e-12);
        assert!((t.base_length() - INVPHI).abs() < 1e-12);
        assert!(t.signed_area() > 0.0);

    }

    #[test]
    fn lone_triangle_completes_to_ccw_rhombus() {

        let t = acute();
        let r = Rhombus::from_triangle(&t);

        assert_eq!(r.class, RhombusClass::Thin);
        assert_eq!(r.points[0], *t.apex());
        assert!(r.signed_area() > 0.0);
        assert!((r.area() - 2.0 * t.area()).abs() < 1e-12);

        for (got, want) in r.interior_angles().iter().zip(r.class.angles().iter()) {
            assert!((got - want).abs() < 1e-9, "{:} vs {:}", got, want);
        }

    }

    #[test]
    fn rhombus_center_and_name() {

        let t = acute();
        let r = Rhombus::from_triangle(&t);
        let (b0, b1) = t.base();

        // diagonals bisect each other
        let mid_base = nalgebra::center(b0, b1);
        assert!((r.center() - mid_base).norm() < 1e-12);

        assert_eq!(r.class.name(), "thin");
        assert_eq!(RhombusClass::Thick.name(), "thick");

    }

    #[test]
    fn winding_is_fixed_for_mirrored_input() {

        let t = acute();
        let (b0, b1) = t.base();

        let r0 = Rhombus::from_halves(RhombusClass::Thin, *t.apex(), *b0, t.mirrored_apex(), *b1);
        let r1 = Rhombus::from_halves(RhombusClass::Thin, *t.apex(), *b1, t.mirrored_apex(), *b0);

        assert_eq!(r0.points, r1.points);

    }

}
