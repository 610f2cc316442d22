use rankscope_engine::build_trace;
use rankscope_providers::{AnnotationOptions, parse_annotation, parse_simple};
use rankscope_testing::assertions::{assert_same_forests, assert_well_formed};
use rankscope_testing::generate::{GenerateOptions, generate};

#[test]
fn test_generated_traces_build_identically_from_both_formats() -> anyhow::Result<()> {
    for seed in 0..25 {
        let generated = generate(seed, GenerateOptions::default());

        let simple = build_trace(parse_simple(&generated.simple)?)?;
        let annotation = build_trace(parse_annotation(
            &generated.annotation,
            &AnnotationOptions::default(),
        )?)?;

        assert_well_formed(&simple)?;
        assert_well_formed(&annotation)?;
        assert_same_forests(&simple, &annotation)?;

        assert_eq!(simple.ranks(), generated.ranks, "seed {}", seed);
        assert_eq!(simple.interval_count(), generated.intervals, "seed {}", seed);
        assert_eq!(simple.max_depth(), generated.max_depth, "seed {}", seed);
        assert_eq!(simple.min_time(), generated.min_time, "seed {}", seed);
        assert_eq!(simple.max_time(), generated.max_time, "seed {}", seed);
        assert_eq!(annotation.stats(), simple.stats(), "seed {}", seed);
    }
    Ok(())
}

#[test]
fn test_deep_narrow_traces() -> anyhow::Result<()> {
    let options = GenerateOptions {
        ranks: 1,
        max_roots: 1,
        max_depth: 12,
        max_children: 1,
    };
    for seed in 0..10 {
        let generated = generate(seed, options);
        let trace = build_trace(parse_simple(&generated.simple)?)?;
        assert_well_formed(&trace)?;
        assert_eq!(trace.max_depth(), generated.max_depth);
    }
    Ok(())
}
