//////////////////////////////////////////////////////////////////////
// pull in some types from nalgebra

pub type Vec2d = nalgebra::Vector2<f64>;
pub type Vec3d = nalgebra::Vector3<f64>;
pub type Point2d = nalgebra::geometry::Point2<f64>;
pub type Translation2d = nalgebra::Translation2<f64>;
pub type Transform2d = nalgebra::Transform2<f64>;
pub type Matrix3d = nalgebra::Matrix3<f64>;

//////////////////////////////////////////////////////////////////////
// define some constants for Penrose tiles

pub const PHI: f64 = 1.618033988749895;
pub const INVPHI: f64 = 0.618033988749895;
pub const PI: f64 = std::f64::consts::PI;
pub const DEG: f64 = PI / 180.0;

//////////////////////////////////////////////////////////////////////
// unit vector at the given angle in degrees

pub fn unit_at(degrees: f64) -> Vec2d {
    let theta = degrees * DEG;
    Vec2d::new(theta.cos(), theta.sin())
}

//////////////////////////////////////////////////////////////////////
// signed area of triangle (p0, p1, p2), positive if counter-clockwise

pub fn tri_signed_area(p0: &Point2d, p1: &Point2d, p2: &Point2d) -> f64 {

    let u = p1 - p0;
    let v = p2 - p0;

    0.5 * (u.x * v.y - u.y * v.x)

}

// shoelace formula, positive if counter-clockwise
pub fn poly_signed_area(poly: &[Point2d]) -> f64 {

    let n = poly.len();
    let mut sum = 0.0;

    for i in 0..n {
        let p = &poly[i];
        let q = &poly[(i + 1) % n];
        sum += p.x * q.y - q.x * p.y;
    }

    0.5 * sum

}

// interior angle in degrees at every vertex of a convex polygon
pub fn interior_angles(poly: &[Point2d]) -> Vec<f64> {

    let n = poly.len();

    (0..n).map(|i| {
        let p = &poly[i];
        let prev = &poly[(i + n - 1) % n];
        let next = &poly[(i + 1) % n];
        (prev - p).angle(&(next - p)) / DEG
    }).collect()

}

// distance from point p to the segment from a to b
pub fn point_segment_distance(p: &Point2d, a: &Point2d, b: &Point2d) -> f64 {

    let ab = b - a;
    let len2 = ab.norm_squared();

    if len2 == 0.0 {
        return (p - a).norm();
    }

    let u = ((p - a).dot(&ab) / len2).max(0.0).min(1.0);

    (p - (a + u * ab)).norm()

}

//////////////////////////////////////////////////////////////////////
// Rect2d type has lower-left p0 and upper-right p1

#[derive(Debug, Clone, PartialEq)]
pub struct Rect2d {

    pub p0: Point2d,
    pub p1: Point2d

}

impl Rect2d {

    // empty rectangle has p0 > p1
    pub fn empty() -> Self {

        let p0 = Point2d::new(f64::MAX, f64::MAX);
        let p1 = -p0;

        Rect2d { p0: p0, p1: p1 }

    }

    // new rect from points
    pub fn new(p0: Point2d, p1: Point2d) -> Self {
        Rect2d { p0: p0, p1: p1 }
    }

    pub fn is_empty(&self) -> bool {
        self.p0.x > self.p1.x || self.p0.y > self.p1.y
    }

    // expand this rect to include the given point
    pub fn expand(&mut self, p: &Point2d) {
        self.p0 = self.p0.inf(p);
        self.p1 = self.p1.sup(p);
    }

    // dimensions of this rect
    pub fn dims(&self) -> Vec2d {
        self.p1 - self.p0
    }

    // center of this rect
    pub fn center(&self) -> Point2d {
        self.p0 + 0.5*(self.p1 - self.p0)
    }

}

//////////////////////////////////////////////////////////////////////
//
// make a Transform2d that will translate and scale the given
// contents_rect (input) to the given page_rect (output).
//
// always includes vertical flip because graphics coordinate system
// is left-handed (y increases going down)
//

pub fn get_page_transform(contents_rect: &Rect2d,
                          page_rect: &Rect2d) -> (Transform2d, f64) {

    let cdims = contents_rect.dims();
    let pdims = page_rect.dims();

    let scl = (pdims.component_div(&cdims)).min();

    let vmid = contents_rect.center();
    let pmid = page_rect.center();

    let translate_page = Translation2d::new(pmid[0], pmid[1]);

    let scale = Transform2d::from_matrix_unchecked(
        Matrix3d::new(
            scl, 0.0, 0.0,
            0.0, -scl, 0.0,
            0.0, 0.0, 1.0
        )
    );

    let translate_points = Translation2d::new(-vmid[0], -vmid[1]);

    let transform = translate_page * scale * translate_points;

    (transform, scl)

}

//////////////////////////////////////////////////////////////////////
