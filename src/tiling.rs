//////////////////////////////////////////////////////////////////////
// the finished tiling and the pipeline that builds it

use crate::assemble::assemble;
use crate::config::TilingConfig;
use crate::deflate::deflate_patch;
use crate::errors::*;
use crate::geometry::{Rect2d, INVPHI};
use crate::merge::{default_epsilon, merge_vertices};
use crate::seed::seed_triangles;
use crate::tiles::{Rhombus, RhombusClass, Triangle};

/// An immutable P3 patch.
///
/// Rhombi are listed in the order the assembler discovered them, which
/// is fixed by the seed layout, so two runs with the same configuration
/// give identical output. At depth 0 no assembly happens and the seed
/// triangles are kept instead.
#[derive(Debug, Clone)]
pub struct Tiling {

    depth:     usize,
    scale:     f64,
    epsilon:   f64,
    vertices:  usize,         // distinct vertices after merging
    rhombi:    Vec<Rhombus>,
    triangles: Vec<Triangle>, // only used at depth 0
    trimmed:   usize          // boundary triangles dropped by the assembler

}

impl Tiling {

    pub fn generate(config: &TilingConfig) -> Result<Tiling> {

        config.validate()?;

        let seed = seed_triangles(config.seed, config.center, config.scale,
                                  config.seed_count, config.rotation)?;

        info!("seeded {:} triangles, deflating to depth {:}", seed.len(), config.depth);

        let patch = deflate_patch(seed, config.depth)?;

        let epsilon = config.epsilon.unwrap_or_else(|| default_epsilon(config.scale, config.depth));

        let mesh = merge_vertices(&patch, epsilon)?;

        info!("{:} triangles share {:} vertices", mesh.triangles().len(), mesh.points().len());

        let mut tiling = Tiling {
            depth: config.depth,
            scale: config.scale,
            epsilon: mesh.epsilon(),
            vertices: mesh.points().len(),
            rhombi: Vec::new(),
            triangles: Vec::new(),
            trimmed: 0
        };

        if config.depth == 0 {

            tiling.triangles = (0..mesh.triangles().len()).map(|tidx| mesh.triangle(tidx)).collect();

        } else {

            let assembly = assemble(&mesh, config.boundary);

            if assembly.trimmed > 0 {
                debug!("trimmed {:} unpaired boundary triangles", assembly.trimmed);
            }

            tiling.rhombi = assembly.rhombi;
            tiling.trimmed = assembly.trimmed;

        }

        for &class in &[RhombusClass::Thick, RhombusClass::Thin] {
            info!("{:} {:} rhombi", tiling.count(class), class.name());
        }

        Ok(tiling)

    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices
    }

    pub fn rhombi(&self) -> &[Rhombus] {
        &self.rhombi
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn trimmed(&self) -> usize {
        self.trimmed
    }

    pub fn count(&self, class: RhombusClass) -> usize {
        self.rhombi.iter().filter(|r| r.class == class).count()
    }

    // edge length of every rhombus at this depth
    pub fn edge_length(&self) -> f64 {
        self.scale * INVPHI.powi(self.depth as i32)
    }

    pub fn area(&self) -> f64 {
        self.rhombi.iter().map(|r| r.area()).sum::<f64>() +
            self.triangles.iter().map(|t| t.area()).sum::<f64>()
    }

    pub fn bounds(&self) -> Rect2d {

        let mut rect = Rect2d::empty();

        for r in &self.rhombi {
            for p in &r.points {
                rect.expand(p);
            }
        }

        for t in &self.triangles {
            for p in &t.points {
                rect.expand(p);
            }
        }

        rect

    }

}

//////////////////////////////////////////////////////////////////////
