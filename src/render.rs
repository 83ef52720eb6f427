//////////////////////////////////////////////////////////////////////
// draw a finished tiling with cairo, to SVG or PDF

use std::path::Path;

use crate::errors::*;
use crate::geometry::{get_page_transform, Point2d, Rect2d, Vec2d, Vec3d};
use crate::tiles::{Rhombus, RhombusClass};
use crate::tiling::Tiling;

//////////////////////////////////////////////////////////////////////
// constants for layout

const INCH: f64 = 72.0;

pub const PAGE_EDGE: f64 = 8.0 * INCH;

const MARGIN: f64 = 0.25 * INCH;

// stroke width as a fraction of the final edge length
const STROKE_FRACTION: f64 = 0.03;

//////////////////////////////////////////////////////////////////////
// fill colours

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    pub rgb: Vec3d,     // components in [0, 1]
    pub opacity: f64
}

#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub thick: Fill,
    pub thin: Fill,
    pub stroke: Vec3d,
    pub stroke_fraction: f64,
    pub margin: f64     // padding around the tiling, as a fraction of scale
}

impl Default for Style {
    fn default() -> Self {
        let crimson = Vec3d::new(179.0, 27.0, 27.0) / 255.0;
        Style {
            thick: Fill { rgb: crimson, opacity: 0.90 },
            thin: Fill { rgb: crimson, opacity: 0.37 },
            stroke: Vec3d::new(1.0, 1.0, 1.0),
            stroke_fraction: STROKE_FRACTION,
            margin: 0.0
        }
    }
}

impl Style {

    pub fn fill(&self, class: RhombusClass) -> &Fill {
        match class {
            RhombusClass::Thick => &self.thick,
            RhombusClass::Thin => &self.thin
        }
    }

}

//////////////////////////////////////////////////////////////////////

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Pdf
}

impl OutputFormat {

    // pick format by file extension, SVG if there is none
    pub fn from_path(path: &Path) -> Result<OutputFormat> {

        let ext = path.extension().and_then(|e| e.to_str()).map(|e| e.to_lowercase());

        match ext.as_ref().map(|e| e.as_str()) {
            None | Some("svg") => Ok(OutputFormat::Svg),
            Some("pdf") => Ok(OutputFormat::Pdf),
            Some(other) => bail!("unsupported output format: .{:}", other)
        }

    }

}

//////////////////////////////////////////////////////////////////////

trait CairoVecOps {

    fn moveto(&self, p: &Point2d);
    fn lineto(&self, p: &Point2d);
    fn setcolor(&self, v: &Vec3d, alpha: f64);
    fn drawpoly(&self, poly: &[Point2d]);

}

impl CairoVecOps for cairo::Context {

    fn moveto(&self, p: &Point2d) {
        self.move_to(p.x, p.y);
    }

    fn lineto(&self, p: &Point2d) {
        self.line_to(p.x, p.y);
    }

    fn setcolor(&self, v: &Vec3d, alpha: f64) {
        self.set_source_rgba(v[0], v[1], v[2], alpha);
    }

    fn drawpoly(&self, poly: &[Point2d]) {
        for (i, p) in poly.iter().enumerate() {
            if i == 0 {
                self.moveto(p);
            } else {
                self.lineto(p);
            }
        }
        self.close_path();
    }

}

//////////////////////////////////////////////////////////////////////
// bounding rect of everything that will be drawn, padded by the
// style margin

fn contents_rect(tiling: &Tiling, margin: f64) -> Rect2d {

    let s = tiling.scale();

    let rect = tiling.bounds();

    let rect = if rect.is_empty() {
        Rect2d::new(Point2d::new(-s, -s), Point2d::new(s, s))
    } else {
        rect
    };

    let pad = Vec2d::new(margin * s, margin * s);

    Rect2d::new(rect.p0 - pad, rect.p1 + pad)

}

pub fn draw_tiling(ctx: &cairo::Context,
                   page_rect: &Rect2d,
                   tiling: &Tiling,
                   style: &Style) {

    let (transform, scl) = get_page_transform(&contents_rect(tiling, style.margin), page_rect);

    let xpoly = |points: &[Point2d]| -> Vec<Point2d> {
        points.iter().map(|p| transform * *p).collect()
    };

    ctx.set_line_width(style.stroke_fraction * tiling.edge_length() * scl);
    ctx.set_line_join(cairo::LineJoin::Round);

    let polys = tiling.rhombi().iter().map(|r: &Rhombus| (r.class, xpoly(&r.points)))
        .chain(tiling.triangles().iter().map(|t| (t.kind.rhombus_class(), xpoly(&t.points))));

    for (class, poly) in polys {

        let fill = style.fill(class);

        ctx.drawpoly(&poly);
        ctx.setcolor(&fill.rgb, fill.opacity);
        ctx.fill_preserve();
        ctx.setcolor(&style.stroke, 1.0);
        ctx.stroke();

    }

}

//////////////////////////////////////////////////////////////////////
// write a tiling to an SVG or PDF file on a square page

pub fn write_tiling(tiling: &Tiling, style: &Style, path: &Path) -> Result<()> {

    let page_rect = Rect2d::new(Point2d::new(MARGIN, MARGIN),
                                Point2d::new(PAGE_EDGE - MARGIN, PAGE_EDGE - MARGIN));

    match OutputFormat::from_path(path)? {

        OutputFormat::Svg => {

            let surface = cairo::SvgSurface::new(PAGE_EDGE, PAGE_EDGE, Some(path))?;
            let ctx = cairo::Context::new(&surface);

            draw_tiling(&ctx, &page_rect, tiling, style);

            surface.finish();

        }

        OutputFormat::Pdf => {

            let surface = cairo::PdfSurface::new(PAGE_EDGE, PAGE_EDGE, path)?;
            let ctx = cairo::Context::new(&surface);

            draw_tiling(&ctx, &page_rect, tiling, style);

            ctx.show_page();
            surface.finish();

        }

    }

    info!("wrote {:} polygons to {:}",
          tiling.rhombi().len() + tiling.triangles().len(), path.display());

    Ok(())

}

//////////////////////////////////////////////////////////////////////
