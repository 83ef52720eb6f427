// command-line front end: read a pattern file and/or flags, build the
// tiling, and write it to SVG or PDF

#[macro_use]
extern crate error_chain;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use penrose_p3::errors::*;
use penrose_p3::render::write_tiling;
use penrose_p3::{PatternSpec, Tiling, MAX_DEPTH};

//////////////////////////////////////////////////////////////////////

#[derive(Debug, Default, PartialEq)]
struct Args {
    pattern: Option<String>,
    depth: Option<i64>,
    scale: Option<f64>,
    output: Option<String>
}

fn usage(program: &str) -> String {
    format!("usage: {:} [PATTERNFILE] [-d DEPTH] [-s SCALE] [-o OUTPUT]", program)
}

fn parse_args(program: &str, args: &[String]) -> Result<Args> {

    let mut parsed = Args::default();
    let mut it = args.iter();

    while let Some(arg) = it.next() {

        let mut value = |flag: &str| -> Result<String> {
            match it.next() {
                Some(v) => Ok(v.clone()),
                None => bail!("missing value for {:}\n{:}", flag, usage(program))
            }
        };

        match arg.as_str() {

            "-d" | "--depth" => {
                let v = value(arg)?;
                parsed.depth = Some(v.parse::<i64>().chain_err(|| format!("invalid depth: {:}", v))?);
            }

            "-s" | "--scale" => {
                let v = value(arg)?;
                parsed.scale = Some(v.parse::<f64>().chain_err(|| format!("invalid scale: {:}", v))?);
            }

            "-o" | "--output" => {
                parsed.output = Some(value(arg)?);
            }

            "-h" | "--help" => {
                bail!(usage(program));
            }

            other if other.starts_with('-') && other.len() > 1 => {
                bail!("unknown option {:}\n{:}", other, usage(program));
            }

            other => {
                if parsed.pattern.is_some() {
                    bail!("only one pattern file allowed\n{:}", usage(program));
                }
                parsed.pattern = Some(other.to_string());
            }

        }

    }

    Ok(parsed)

}

// output file defaults to the pattern file's name with an .svg extension
fn output_path(args: &Args) -> PathBuf {

    if let Some(output) = &args.output {
        return PathBuf::from(output);
    }

    let basename = args.pattern.as_ref()
        .and_then(|p| Path::new(p).file_stem())
        .and_then(|s| s.to_str())
        .unwrap_or("tiling");

    PathBuf::from(basename.to_owned() + ".svg")

}

//////////////////////////////////////////////////////////////////////

fn run() -> Result<()> {

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let argv: Vec<String> = std::env::args().collect();
    let program = argv.first().map(|s| s.as_str()).unwrap_or("penrose_p3");

    let args = parse_args(program, &argv[1.min(argv.len())..])?;

    let mut spec = match &args.pattern {

        None => PatternSpec::new(),

        Some(filename) => {
            let f = File::open(filename).chain_err(|| format!("opening {:}", filename))?;
            let mut reader = BufReader::new(f);
            PatternSpec::parse(filename, &mut reader)?
        }

    };

    // flags override the pattern file
    if let Some(depth) = args.depth {
        if depth < 0 || depth > MAX_DEPTH as i64 {
            bail!(ErrorKind::InvalidDepth(depth));
        }
        spec.depth = Some(depth as usize);
    }

    if let Some(scale) = args.scale {
        spec.scale = Some(scale);
    }

    let tiling = Tiling::generate(&spec.config())?;

    let path = output_path(&args);

    write_tiling(&tiling, &spec.style(), &path)?;

    println!("wrote {:}", path.display());

    Ok(())

}

quick_main!(run);

//////////////////////////////////////////////////////////////////////
