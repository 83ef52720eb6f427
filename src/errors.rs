//////////////////////////////////////////////////////////////////////
// use error chain so we can use Result<> everywhere
// for error handling

use crate::deflate::MAX_DEPTH;
use crate::seed::MAX_SEED_COUNT;

error_chain! {

    foreign_links {
        Fmt(::std::fmt::Error);
        Io(::std::io::Error);
        Cairo(::cairo::Error);
    }

    errors {

        InvalidDepth(depth: i64) {
            description("invalid subdivision depth")
            display("invalid depth {:}: must be between 0 and {:}", depth, MAX_DEPTH)
        }

        InvalidScale(scale: f64) {
            description("invalid seed scale")
            display("invalid scale {:}: must be a positive number", scale)
        }

        InvalidSeedCount(count: i64) {
            description("invalid seed count")
            display("invalid seed count {:}: must be between 1 and {:}", count, MAX_SEED_COUNT)
        }

        InvalidEpsilon(epsilon: f64) {
            description("invalid merge tolerance")
            display("invalid merge tolerance {:}: must be a positive number", epsilon)
        }

        GeometryDegeneracy(generation: usize, tidx: usize, area: f64) {
            description("degenerate triangle after subdivision")
            display("triangle {:} of generation {:} has area {:e}, below the numeric floor",
                    tidx, generation, area)
        }

        DeduplicationFailure(tidx: usize) {
            description("merge tolerance collapsed a triangle")
            display("triangle {:} collapsed while merging vertices; merge tolerance is too coarse", tidx)
        }

    }

}
