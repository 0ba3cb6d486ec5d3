//! Search parameter invariants over arbitrary option sets

use bazaar::search::{prepare, SearchOptions};
use proptest::prelude::*;

const OPTIONAL_KEYS: &[&str] = &[
    "searchMode",
    "isHighRisk",
    "cluster",
    "fullTextFilter",
    "fullTextFilterMode",
    "rerank",
    "performanceWeight",
    "similarityCutoff",
    "sparseCutoff",
];

fn options_strategy() -> impl Strategy<Value = SearchOptions> {
    (
        (
            prop::option::of(prop::sample::select(vec!["hybrid", "vector", "keyword"])),
            prop::option::of(any::<bool>()),
            prop::option::of(any::<bool>()),
            prop::option::of(any::<bool>()),
            prop::option::of("[a-z]{1,8}"),
        ),
        (
            prop::option::of("[a-z]{1,8}( [a-z]{1,8})?"),
            prop::option::of(prop::sample::select(vec!["all", "any"])),
            prop::option::of(any::<bool>()),
            prop::option::of(0.0f64..1.0),
            prop::option::of(0.0f64..1.0),
            prop::option::of(0.0f64..10.0),
        ),
    )
        .prop_map(
            |(
                (mode, online, graduated, high_risk, cluster),
                (contains, match_mode, rerank, weight, similarity, sparse),
            )| SearchOptions {
                mode: mode.map(str::to_string),
                online,
                graduated,
                high_risk,
                cluster,
                // --match only makes sense alongside --contains
                match_mode: contains.as_ref().and(match_mode.map(str::to_string)),
                contains,
                rerank,
                performance_weight: weight,
                similarity_cutoff: similarity,
                sparse_cutoff: sparse,
            },
        )
}

fn expected_optional_keys(options: &SearchOptions) -> Vec<&'static str> {
    let set = [
        options.mode.is_some(),
        options.high_risk.is_some(),
        options.cluster.is_some(),
        options.contains.is_some(),
        options.match_mode.is_some(),
        options.rerank.is_some(),
        options.performance_weight.is_some(),
        options.similarity_cutoff.is_some(),
        options.sparse_cutoff.is_some(),
    ];
    OPTIONAL_KEYS
        .iter()
        .zip(set)
        .filter(|(_, present)| *present)
        .map(|(key, _)| *key)
        .collect()
}

/// Online and graduated filters are always sent; everything else only when set
#[test]
fn test_optional_params_only_when_set_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&("[a-z]{1,12}", options_strategy()), |(query, options)| {
            let request = prepare(&query, &options).unwrap();
            let params = &request.params;

            assert_eq!(params.pairs()[0], ("query".to_string(), query.clone()));
            assert_eq!(
                params.get("isOnline"),
                Some(if options.online.unwrap_or(true) { "true" } else { "false" })
            );
            assert_eq!(
                params.get("hasGraduated"),
                Some(if options.graduated.unwrap_or(true) { "true" } else { "false" })
            );

            let expected = expected_optional_keys(&options);
            for key in OPTIONAL_KEYS {
                assert_eq!(
                    params.contains_key(key),
                    expected.contains(key),
                    "unexpected presence of {}",
                    key
                );
            }
            assert_eq!(params.pairs().len(), 3 + expected.len());

            Ok(())
        })
        .unwrap();
}

/// Building the same request twice yields identical parameters
#[test]
fn test_param_building_is_deterministic_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&("[a-z ]{1,12}", options_strategy()), |(query, options)| {
            prop_assume!(!query.trim().is_empty());
            let first = prepare(&query, &options).unwrap();
            let second = prepare(&query, &options).unwrap();
            assert_eq!(first, second);
            assert_eq!(first.query, query.trim());
            Ok(())
        })
        .unwrap();
}
