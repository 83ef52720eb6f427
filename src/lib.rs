//! P3 Penrose rhombus tilings built by deflating Robinson triangles.
//!
//! The pipeline runs strictly forward:
//!
//! seed ring -> deflation (iterated) -> vertex merging -> rhombus assembly -> [`Tiling`]
//!
//! Everything up to [`Tiling`] is pure computation; [`render`] is the only
//! module that touches the filesystem.

#[macro_use]
extern crate error_chain;

#[macro_use]
extern crate log;

pub mod errors;
pub mod geometry;
pub mod tiles;
pub mod seed;
pub mod deflate;
pub mod merge;
pub mod assemble;
pub mod tiling;
pub mod config;
pub mod render;

pub use crate::assemble::{assemble, Assembly, BoundaryPolicy};
pub use crate::config::{PatternSpec, TilingConfig};
pub use crate::deflate::{deflate, deflate_once, deflate_patch, MAX_DEPTH};
pub use crate::errors::{Error, ErrorKind, Result};
pub use crate::geometry::{Point2d, Vec2d, INVPHI, PHI};
pub use crate::merge::{merge_vertices, IndexedTriangle, MergedMesh};
pub use crate::render::{Fill, Style};
pub use crate::seed::{seed_triangles, SeedShape};
pub use crate::tiles::{Rhombus, RhombusClass, Triangle, TriangleKind};
pub use crate::tiling::Tiling;
