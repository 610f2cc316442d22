//! Canonical sample traces.
//!
//! Small traces are kept inline; the larger samples shared with the reader
//! tests live in `crates/rankscope-providers/tests/samples/`.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// One root `a` on rank 0 with a single child `b`
pub const SIMPLE_NESTED: &str = "\
0 00:00:00.000000 <a
0 00:00:01.000000 <b
0 00:00:02.000000 >b
0 00:00:03.000000 >a
";

/// Two ranks, interleaved in the file, with sibling intervals
pub const SIMPLE_TWO_RANKS: &str = "\
0 00:00:00.000000 <main
1 00:00:00.000500 <main
0 00:00:00.001000 <compute
1 00:00:00.001000 <io
1 00:00:00.004000 >io
0 00:00:00.006000 >compute
0 00:00:00.006000 <io
1 00:00:00.007000 <compute
0 00:00:00.009000 >io
1 00:00:00.009500 >compute
0 00:00:00.010000 >main
1 00:00:00.010000 >main
";

/// End on rank 1 with nothing open (line 3)
pub const SIMPLE_UNMATCHED_END: &str = "\
0 00:00:00.000000 <main
0 00:00:00.000010 >main
1 00:00:00.000020 >main
";

/// The end on line 5 closes the second `solve`, leaving `main` (line 1) open
pub const SIMPLE_UNCLOSED: &str = "\
0 00:00:00.000000 <main
0 00:00:00.000010 <solve
0 00:00:00.000020 >solve
0 00:00:00.000030 <solve
0 00:00:00.000040 >main
";

/// Same shape as [`SIMPLE_TWO_RANKS`], written as an unordered annotation table
pub const ANNOTATION_TWO_RANKS: &str = "\
mpi.rank time.offset time.inclusive.duration annotation
1        4000        3000                    main/io
0        6000        5000                    main/compute
0        10000       10000                   main
1        9500        2500                    main/compute
0        9000        3000                    main/io
1        10000       9500                    main
";

/// Key/value rows with MPI function regions
pub const ANNOTATION_PAIRS: &str = "\
event.end#annotation=setup,annotation=main/setup,mpi.rank=0,time.inclusive.duration=400,time.offset=500
event.end#mpi.function=MPI_Allreduce,mpi.function=MPI_Allreduce,annotation=main,mpi.rank=0,time.inclusive.duration=200,time.offset=800
event.end#annotation=main,annotation=main,mpi.rank=0,time.inclusive.duration=1000,time.offset=1000
";

/// Sample file manager for the on-disk samples.
pub struct SampleFiles {
    samples_dir: PathBuf,
}

impl Default for SampleFiles {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleFiles {
    /// Assumes samples are in `crates/rankscope-providers/tests/samples/`.
    pub fn new() -> Self {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let samples_dir = manifest_dir
            .parent()
            .map(|crates| crates.join("rankscope-providers/tests/samples"))
            .unwrap_or_else(|| manifest_dir.join("samples"));

        Self { samples_dir }
    }

    pub fn path(&self, sample_name: &str) -> PathBuf {
        self.samples_dir.join(sample_name)
    }

    /// Copy a sample file to a destination.
    pub fn copy_to(&self, sample_name: &str, dest: &Path) -> Result<()> {
        fs::copy(self.path(sample_name), dest)?;
        Ok(())
    }
}
