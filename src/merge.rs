//////////////////////////////////////////////////////////////////////
// collapse coincident vertices into a shared, indexed mesh
//
// points are bucketed into a grid of epsilon-sized cells. a point can
// only be within epsilon of canonical points in its own cell or the
// eight neighbouring cells, so each lookup is constant work.

use std::collections::HashMap;

use crate::errors::*;
use crate::geometry::{Point2d, INVPHI};
use crate::tiles::{Triangle, TriangleKind};

// default merge tolerance as a fraction of the final edge length
pub const EPSILON_FRACTION: f64 = 1e-4;

pub fn default_epsilon(scale: f64, depth: usize) -> f64 {
    EPSILON_FRACTION * scale * INVPHI.powi(depth as i32)
}

// index edges by indices of two vertices, smaller first
pub type PidxPair = (usize, usize);

pub fn edge_key(a: usize, b: usize) -> PidxPair {
    if a <= b { (a, b) } else { (b, a) }
}

//////////////////////////////////////////////////////////////////////
// triangle referring to canonical vertices

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct IndexedTriangle {

    pub pidx: [usize; 3],     // apex, then the base vertices
    pub kind: TriangleKind

}

impl IndexedTriangle {

    // key of the edge opposite the apex
    pub fn base_key(&self) -> PidxPair {
        edge_key(self.pidx[1], self.pidx[2])
    }

    // keys of all three edges, [(0, 1), (1, 2), (2, 0)]
    pub fn edge_keys(&self) -> [PidxPair; 3] {
        [edge_key(self.pidx[0], self.pidx[1]),
         edge_key(self.pidx[1], self.pidx[2]),
         edge_key(self.pidx[2], self.pidx[0])]
    }

    // get points from external vec using my indices
    pub fn get_points<'a>(&self, points: &'a [Point2d]) -> (&'a Point2d, &'a Point2d, &'a Point2d) {
        (&points[self.pidx[0]],
         &points[self.pidx[1]],
         &points[self.pidx[2]])
    }

    pub fn to_triangle(&self, points: &[Point2d]) -> Triangle {
        let (o, p1, p2) = self.get_points(points);
        Triangle::new(self.kind, *o, *p1, *p2)
    }

}

//////////////////////////////////////////////////////////////////////
// canonical vertex table plus the triangles that index into it.
// built once by merge_vertices and read-only afterwards.

#[derive(Debug, Clone)]
pub struct MergedMesh {

    points:    Vec<Point2d>,
    triangles: Vec<IndexedTriangle>,
    epsilon:   f64

}

impl MergedMesh {

    pub fn points(&self) -> &[Point2d] {
        &self.points
    }

    pub fn triangles(&self) -> &[IndexedTriangle] {
        &self.triangles
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn triangle(&self, tidx: usize) -> Triangle {
        self.triangles[tidx].to_triangle(&self.points)
    }

    // map from every edge to the number of triangles using it
    pub fn edge_counts(&self) -> HashMap<PidxPair, usize> {

        let mut counts = HashMap::new();

        for tri in &self.triangles {
            for &key in &tri.edge_keys() {
                *counts.entry(key).or_insert(0) += 1;
            }
        }

        counts

    }

}

//////////////////////////////////////////////////////////////////////
// spatial hash of canonical points

struct VertexGrid {
    cell_size: f64,
    cells:     HashMap<(i64, i64), Vec<usize>>,
    points:    Vec<Point2d>
}

impl VertexGrid {

    fn new(cell_size: f64) -> Self {
        VertexGrid {
            cell_size: cell_size,
            cells: HashMap::new(),
            points: Vec::new()
        }
    }

    fn cell(&self, p: &Point2d) -> (i64, i64) {
        ((p.x / self.cell_size).floor() as i64,
         (p.y / self.cell_size).floor() as i64)
    }

    // earliest canonical point within epsilon of p, if any
    fn find(&self, p: &Point2d) -> Option<usize> {

        let (cx, cy) = self.cell(p);
        let mut best: Option<usize> = None;

        for dx in -1..=1 {
            for dy in -1..=1 {

                let candidates = match self.cells.get(&(cx + dx, cy + dy)) {
                    None => continue,
                    Some(c) => c
                };

                for &pidx in candidates {
                    if (self.points[pidx] - p).norm() < self.cell_size &&
                        best.map_or(true, |b| pidx < b) {
                        best = Some(pidx);
                    }
                }

            }
        }

        best

    }

    // canonical index for p, adding p as a new canonical point if needed
    fn insert(&mut self, p: &Point2d) -> usize {

        if let Some(pidx) = self.find(p) {
            return pidx;
        }

        let pidx = self.points.len();
        let cell = self.cell(p);

        self.points.push(*p);
        self.cells.entry(cell).or_insert(vec![]).push(pidx);

        pidx

    }

}

//////////////////////////////////////////////////////////////////////
// merge all triangle vertices within epsilon of each other.
// the first point seen in a cluster becomes its canonical point.

pub fn merge_vertices(triangles: &[Triangle], epsilon: f64) -> Result<MergedMesh> {

    if !(epsilon > 0.0) || !epsilon.is_finite() {
        bail!(ErrorKind::InvalidEpsilon(epsilon));
    }

    let mut grid = VertexGrid::new(epsilon);
    let mut merged = Vec::with_capacity(triangles.len());

    for (tidx, tri) in triangles.iter().enumerate() {

        let pidx = [grid.insert(&tri.points[0]),
                    grid.insert(&tri.points[1]),
                    grid.insert(&tri.points[2])];

        if pidx[0] == pidx[1] || pidx[1] == pidx[2] || pidx[2] == pidx[0] {
            bail!(ErrorKind::DeduplicationFailure(tidx));
        }

        merged.push(IndexedTriangle { pidx: pidx, kind: tri.kind });

    }

    debug!("merged {:} triangle corners into {:} vertices (epsilon {:e})",
           3 * triangles.len(), grid.points.len(), epsilon);

    Ok(MergedMesh {
        points: grid.points,
        triangles: merged,
        epsilon: epsilon
    })

}

//////////////////////////////////////////////////////////////////////
