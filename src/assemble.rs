//////////////////////////////////////////////////////////////////////
// glue pairs of same-kind triangles along their shared base into
// rhombi: two acute halves make a thin rhombus, two obtuse halves a
// thick one.
//
// triangles whose base lies on the outside of the patch have no
// partner. with BoundaryPolicy::Trim they are dropped, which erodes the
// patch outline slightly but leaves only whole rhombi. with
// BoundaryPolicy::Complete the missing half is mirrored in, so the
// output overhangs the original outline instead.

use std::collections::HashMap;

use crate::merge::{MergedMesh, PidxPair};
use crate::tiles::Rhombus;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BoundaryPolicy {
    Trim,
    Complete
}

impl Default for BoundaryPolicy {
    fn default() -> Self { BoundaryPolicy::Trim }
}

#[derive(Debug, Clone, Default)]
pub struct Assembly {

    pub rhombi:    Vec<Rhombus>, // in order of discovery
    pub trimmed:   usize,        // unpaired triangles dropped
    pub completed: usize         // unpaired triangles mirrored into rhombi

}

pub fn assemble(mesh: &MergedMesh, policy: BoundaryPolicy) -> Assembly {

    let points = mesh.points();
    let triangles = mesh.triangles();

    let mut by_base: HashMap<PidxPair, Vec<usize>> = HashMap::new();

    for (tidx, tri) in triangles.iter().enumerate() {
        by_base.entry(tri.base_key()).or_insert(vec![]).push(tidx);
    }

    let mut paired = vec![false; triangles.len()];
    let mut assembly = Assembly::default();

    for (tidx, tri) in triangles.iter().enumerate() {

        if paired[tidx] {
            continue;
        }

        paired[tidx] = true;

        let partner = by_base.get(&tri.base_key()).and_then(|candidates| {
            candidates.iter().cloned().find(|&other| {
                !paired[other] && triangles[other].kind == tri.kind
            })
        });

        match partner {

            Some(other) => {

                paired[other] = true;

                let (o, p1, p2) = tri.get_points(points);
                let o_other = &points[triangles[other].pidx[0]];

                assembly.rhombi.push(Rhombus::from_halves(tri.kind.rhombus_class(),
                                                          *o, *p1, *o_other, *p2));

            }

            None => match policy {

                BoundaryPolicy::Trim => {
                    assembly.trimmed += 1;
                }

                BoundaryPolicy::Complete => {
                    assembly.rhombi.push(Rhombus::from_triangle(&tri.to_triangle(points)));
                    assembly.completed += 1;
                }

            }

        }

    }

    debug!("assembled {:} rhombi ({:} triangles trimmed, {:} completed)",
           assembly.rhombi.len(), assembly.trimmed, assembly.completed);

    assembly

}

//////////////////////////////////////////////////////////////////////
