//////////////////////////////////////////////////////////////////////
// tiling configuration and the pattern files it is read from
//
// a pattern file has one keyword per line, whitespace separated
// tokens, and '#' starting a comment:
//
//   seed sun count 10
//   depth 5
//   scale 200
//   center 0 0
//   rotation 0
//   epsilon 1e-9
//   boundary trim
//   fill thick 179 27 27 0.90
//   fill thin 179 27 27 0.37
//   stroke 255 255 255
//   margin 0.05
//
// every keyword is optional and may appear at most once.

use std::io::BufRead;

use phf::phf_map;

use crate::assemble::BoundaryPolicy;
use crate::deflate::MAX_DEPTH;
use crate::errors::*;
use crate::geometry::{Point2d, Vec3d};
use crate::render::{Fill, Style};
use crate::seed::{SeedShape, MAX_SEED_COUNT};
use crate::tiles::RhombusClass;

//////////////////////////////////////////////////////////////////////
// everything the core needs to build a tiling

#[derive(Debug, Clone, PartialEq)]
pub struct TilingConfig {
    pub depth: usize,              // number of deflation steps
    pub scale: f64,                // seed edge length
    pub center: Point2d,           // center of the seed ring
    pub seed: SeedShape,           // which seed ring to start from
    pub seed_count: usize,         // number of 36 degree wedges in the ring
    pub rotation: f64,             // ring rotation in degrees
    pub epsilon: Option<f64>,      // merge tolerance, None for default
    pub boundary: BoundaryPolicy   // what to do with unpaired triangles
}

impl Default for TilingConfig {
    fn default() -> Self {
        TilingConfig {
            depth: 5,
            scale: 1.0,
            center: Point2d::origin(),
            seed: SeedShape::Sun,
            seed_count: MAX_SEED_COUNT,
            rotation: 0.0,
            epsilon: None,
            boundary: BoundaryPolicy::Trim
        }
    }
}

impl TilingConfig {

    // checks that have to pass before any computation starts
    pub fn validate(&self) -> Result<()> {

        if self.depth > MAX_DEPTH {
            bail!(ErrorKind::InvalidDepth(self.depth as i64));
        }

        if !(self.scale > 0.0) || !self.scale.is_finite() {
            bail!(ErrorKind::InvalidScale(self.scale));
        }

        if self.seed_count < 1 || self.seed_count > MAX_SEED_COUNT {
            bail!(ErrorKind::InvalidSeedCount(self.seed_count as i64));
        }

        if let Some(eps) = self.epsilon {
            if !(eps > 0.0) || !eps.is_finite() {
                bail!(ErrorKind::InvalidEpsilon(eps));
            }
        }

        Ok(())

    }

}

//////////////////////////////////////////////////////////////////////
// lookup tables matching strings to enumerations

static SEED_SHAPES: phf::Map<&'static str, SeedShape> = phf_map! {
    "sun" => SeedShape::Sun,
    "star" => SeedShape::Star,
};

static BOUNDARY_POLICIES: phf::Map<&'static str, BoundaryPolicy> = phf_map! {
    "trim" => BoundaryPolicy::Trim,
    "complete" => BoundaryPolicy::Complete,
};

static RHOMBUS_CLASSES: phf::Map<&'static str, RhombusClass> = phf_map! {
    "thick" => RhombusClass::Thick,
    "thin" => RhombusClass::Thin,
};

//////////////////////////////////////////////////////////////////////
// macro for pulling typed values out of a token list
//
//   parse_tokens!(rest, { shape from SEED_SHAPES, "count", count: i64 })
//
// evaluates to Result<(shape, count), String>

macro_rules! parse_tokens {

    // finalizer - no more input to match, just error if remaining
    // input or return collected outputs
    ($it:ident { } -> { $($tuple:ident,)* } ) => (
        match $it.next() {
            Some(value) => Err(format!("found extra token(s) starting with \"{:}\"", value)),
            None => Ok(($($tuple),*))
        }
    );

    // string literal
    ($it:ident { $str:literal, $($ts:tt)* } -> { $($tuple:ident,)* } ) => (
        match $it.next() {
            None => Err(format!("missing token \"{:}\"", $str)),
            Some(value) => if *value == $str {
                parse_tokens!( $it { $($ts)* } -> { $($tuple,)* } )
            } else {
                Err(format!("unmatched string literal: expected \"{:}\" but got \"{:}\"", $str, value))
            }
        }
    );

    // string map
    ($it:ident { $name:ident from $map:expr, $($ts:tt)* } -> { $($tuple:ident,)* } ) => (
        match $it.next() {
            None => Err(format!("missing token for {:}", stringify!($name))),
            Some(&value) => {
                if let Some(&$name) = $map.get(value) {
                    parse_tokens!( $it { $($ts)* } -> { $($tuple,)* $name, } )
                } else {
                    let mut keys: Vec<&str> = $map.keys().cloned().collect();
                    keys.sort();
                    Err(format!("unexpected value \"{:}\" for {:}, expected one of: {{\"{:}\"}}",
                                value, stringify!($name), keys.join("\", \"")))
                }
            }
        }
    );

    // name, type pair
    ($it:ident { $name:ident : $type:ident, $($ts:tt)* } -> { $($tuple:ident,)* } ) => (
        match $it.next() {
            None => Err(format!("missing token for {:}", stringify!($name))),
            Some(value) => if let Ok($name) = value.parse::<$type>() {
                parse_tokens!( $it { $($ts)* } -> { $($tuple,)* $name, } )
            } else {
                Err(format!("error parsing {:} as type {:}",
                            value, stringify!($type)))
            }
        }
    );

    // Entry point
    ($a:expr, { $($ts:tt)+ }) => (
        {
            let mut it = $a.iter();
            parse_tokens!( it { $($ts)* , } -> { } )
        }
    );

}

//////////////////////////////////////////////////////////////////////
// a field may only be set once per pattern file

macro_rules! copy_field {

    ($dst:ident, $src:ident, $field:ident) => (
        if $src.$field.is_some() {
            if $dst.$field.is_some() {
                bail!("{:} is already set", stringify!($field));
            }
            $dst.$field = $src.$field;
        }
    )

}

//////////////////////////////////////////////////////////////////////
// partially specified configuration, as read from a pattern file
// and/or the command line

#[derive(Debug, Default, Clone, PartialEq)]
pub struct PatternSpec {
    pub seed: Option<(SeedShape, usize)>,
    pub depth: Option<usize>,
    pub scale: Option<f64>,
    pub center: Option<Point2d>,
    pub rotation: Option<f64>,
    pub epsilon: Option<f64>,
    pub boundary: Option<BoundaryPolicy>,
    pub thick_fill: Option<Fill>,
    pub thin_fill: Option<Fill>,
    pub stroke: Option<Vec3d>,
    pub margin: Option<f64>
}

fn parse_rgb(r: u8, g: u8, b: u8) -> Vec3d {
    Vec3d::new(r as f64, g as f64, b as f64) / 255.0
}

impl PatternSpec {

    pub fn new() -> PatternSpec {
        Default::default()
    }

    fn update(&mut self, other: PatternSpec) -> Result<()> {

        copy_field!(self, other, seed);
        copy_field!(self, other, depth);
        copy_field!(self, other, scale);
        copy_field!(self, other, center);
        copy_field!(self, other, rotation);
        copy_field!(self, other, epsilon);
        copy_field!(self, other, boundary);
        copy_field!(self, other, thick_fill);
        copy_field!(self, other, thin_fill);
        copy_field!(self, other, stroke);
        copy_field!(self, other, margin);

        Ok(())

    }

    fn parse_keyword(keyword: &str, rest: &[&str]) -> Result<PatternSpec> {

        let mut update = PatternSpec::new();

        match keyword {

            "seed" => {

                let (shape, count) = if rest.len() == 1 {
                    let shape = parse_tokens!(rest, { shape from SEED_SHAPES })?;
                    (shape, MAX_SEED_COUNT as i64)
                } else {
                    parse_tokens!(rest, { shape from SEED_SHAPES, "count", count: i64 })?
                };

                if count < 1 || count > MAX_SEED_COUNT as i64 {
                    bail!(ErrorKind::InvalidSeedCount(count));
                }

                update.seed = Some((shape, count as usize));

            }

            "depth" => {

                let depth = parse_tokens!(rest, { depth: i64 })?;

                if depth < 0 || depth > MAX_DEPTH as i64 {
                    bail!(ErrorKind::InvalidDepth(depth));
                }

                update.depth = Some(depth as usize);

            }

            "scale" => {
                update.scale = Some(parse_tokens!(rest, { scale: f64 })?);
            }

            "center" => {
                let (x, y) = parse_tokens!(rest, { x: f64, y: f64 })?;
                update.center = Some(Point2d::new(x, y));
            }

            "rotation" => {
                update.rotation = Some(parse_tokens!(rest, { rotation: f64 })?);
            }

            "epsilon" => {
                update.epsilon = Some(parse_tokens!(rest, { epsilon: f64 })?);
            }

            "boundary" => {
                update.boundary = Some(parse_tokens!(rest, { boundary from BOUNDARY_POLICIES })?);
            }

            "fill" => {

                let (class, r, g, b, opacity) = parse_tokens!(rest, {
                    class from RHOMBUS_CLASSES,
                    r: u8, g: u8, b: u8,
                    opacity: f64
                })?;

                if !(opacity >= 0.0 && opacity <= 1.0) {
                    bail!("opacity must be between 0 and 1, got {:}", opacity);
                }

                let fill = Some(Fill { rgb: parse_rgb(r, g, b), opacity: opacity });

                match class {
                    RhombusClass::Thick => update.thick_fill = fill,
                    RhombusClass::Thin => update.thin_fill = fill
                }

            }

            "stroke" => {
                let (r, g, b) = parse_tokens!(rest, { r: u8, g: u8, b: u8 })?;
                update.stroke = Some(parse_rgb(r, g, b));
            }

            "margin" => {

                let margin = parse_tokens!(rest, { margin: f64 })?;

                if !(margin >= 0.0 && margin < 1.0) {
                    bail!("margin must be at least 0 and less than 1, got {:}", margin);
                }

                update.margin = Some(margin);

            }

            _ => {
                bail!("unknown keyword {:}", keyword);
            }

        };

        Ok(update)

    }

    pub fn update_from(&mut self, line: &str) -> Result<()> {

        let mut trimmed = line.trim();

        if let Some(pos) = trimmed.find('#') {
            trimmed = trimmed[0..pos].trim();
        }

        if trimmed.is_empty() {
            return Ok(());
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();

        let keyword = tokens[0];
        let rest = &tokens[1..];

        let update = Self::parse_keyword(keyword, rest).chain_err(
            || format!("while parsing keyword {:}", keyword))?;

        self.update(update)

    }

    pub fn parse(filename: &str, istr: &mut impl BufRead) -> Result<PatternSpec> {

        let mut spec = PatternSpec::new();
        let mut lineno = 0;

        loop {

            let mut line = String::new();

            lineno += 1;

            let len = istr.read_line(&mut line).chain_err(|| format!("{:}:{:}: read error", filename, lineno))?;

            if len == 0 {
                break;
            }

            spec.update_from(line.as_str()).chain_err(|| format!("{:}:{:}: parse error", filename, lineno))?;

        }

        Ok(spec)

    }

    // fill in defaults for everything left unset
    pub fn config(&self) -> TilingConfig {

        let defaults = TilingConfig::default();

        let (seed, seed_count) = self.seed.unwrap_or((defaults.seed, defaults.seed_count));

        TilingConfig {
            depth: self.depth.unwrap_or(defaults.depth),
            scale: self.scale.unwrap_or(defaults.scale),
            center: self.center.unwrap_or(defaults.center),
            seed: seed,
            seed_count: seed_count,
            rotation: self.rotation.unwrap_or(defaults.rotation),
            epsilon: self.epsilon.or(defaults.epsilon),
            boundary: self.boundary.unwrap_or(defaults.boundary)
        }

    }

    pub fn style(&self) -> Style {

        let defaults = Style::default();

        Style {
            thick: self.thick_fill.unwrap_or(defaults.thick),
            thin: self.thin_fill.unwrap_or(defaults.thin),
            stroke: self.stroke.unwrap_or(defaults.stroke),
            margin: self.margin.unwrap_or(defaults.margin),
            ..defaults
        }

    }

}

//////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {

    use super::*;

    fn parse_str(text: &str) -> Result<PatternSpec> {
        PatternSpec::parse("test.pattern", &mut text.as_bytes())
    }

    #[test]
    fn empty_file_gives_defaults() {

        let spec = parse_str("# nothing here\n\n").unwrap();

        assert_eq!(spec, PatternSpec::new());
        assert_eq!(spec.config(), TilingConfig::default());

    }

    #[test]
    fn parses_every_keyword() {

        let text = "seed star count 6\n\
                    depth 3   # three generations\n\
                    scale 200\n\
                    center 1.5 -2\n\
                    rotation 18\n\
                    epsilon 1e-6\n\
                    boundary complete\n\
                    fill thick 255 0 0 0.5\n\
                    fill thin 0 0 255 1\n\
                    stroke 0 0 0\n\
                    margin 0.1\n";

        let spec = parse_str(text).unwrap();
        let config = spec.config();

        assert_eq!(config.seed, SeedShape::Star);
        assert_eq!(config.seed_count, 6);
        assert_eq!(config.depth, 3);
        assert_eq!(config.scale, 200.0);
        assert_eq!(config.center, Point2d::new(1.5, -2.0));
        assert_eq!(config.rotation, 18.0);
        assert_eq!(config.epsilon, Some(1e-6));
        assert_eq!(config.boundary, BoundaryPolicy::Complete);

        let style = spec.style();
        assert_eq!(style.thick.rgb, Vec3d::new(1.0, 0.0, 0.0));
        assert_eq!(style.thick.opacity, 0.5);
        assert_eq!(style.thin.rgb, Vec3d::new(0.0, 0.0, 1.0));
        assert_eq!(style.stroke, Vec3d::new(0.0, 0.0, 0.0));
        assert_eq!(style.margin, 0.1);

    }

    #[test]
    fn seed_count_defaults_to_full_ring() {
        let spec = parse_str("seed sun\n").unwrap();
        assert_eq!(spec.seed, Some((SeedShape::Sun, MAX_SEED_COUNT)));
    }

    #[test]
    fn duplicate_keyword_is_rejected() {

        let err = parse_str("depth 2\ndepth 3\n").unwrap_err();
        let msg = format!("{:}", err);

        assert!(msg.contains("test.pattern:2"), "{:}", msg);

    }

    #[test]
    fn negative_depth_is_invalid_depth() {

        let err = parse_str("depth -1\n").unwrap_err();

        let found = err.iter().any(|e| e.to_string().contains("invalid depth -1"));
        assert!(found);

    }

    #[test]
    fn bad_tokens_are_reported() {

        for text in &["depth\n",
                      "depth 2 3\n",
                      "scale big\n",
                      "seed moon\n",
                      "seed sun count 0\n",
                      "boundary sometimes\n",
                      "fill thick 300 0 0 1\n",
                      "fill thin 0 0 0 1.5\n",
                      "margin 1\n",
                      "margin -0.1\n",
                      "wobble 1\n"] {
            assert!(parse_str(text).is_err(), "accepted {:?}", text);
        }

    }

    #[test]
    fn validate_catches_out_of_range_values() {

        let mut config = TilingConfig::default();
        assert!(config.validate().is_ok());

        config.depth = MAX_DEPTH + 1;
        assert!(config.validate().is_err());

        config = TilingConfig { epsilon: Some(0.0), ..TilingConfig::default() };
        assert!(config.validate().is_err());

        config = TilingConfig { scale: -1.0, ..TilingConfig::default() };
        assert!(config.validate().is_err());

        config = TilingConfig { seed_count: 0, ..TilingConfig::default() };
        assert!(config.validate().is_err());

    }

}
