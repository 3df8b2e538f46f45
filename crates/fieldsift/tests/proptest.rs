//! Property-based tests for fieldsift using proptest.

use proptest::prelude::*;
use fieldsift::{
    pipeline, sort_records, Dir, Field, Invocation, Model, Modes, Painter, ParsedOptions,
    TextPattern,
};
use serde_json::{json, Value as Json};

// ============================================================================
// Test helpers
// ============================================================================

fn model() -> Model {
    Model::builder()
        .field(Field::text("name"))
        .field(Field::number("score"))
        .field(Field::choice("color", ["Red", "Green", "Blue"]))
        .build()
        .unwrap()
}

fn record_strategy() -> impl Strategy<Value = Json> {
    (
        "[a-z]{1,8}",
        prop::option::of(-100i64..100),
        prop::option::of(prop::sample::select(vec!["Red", "Green", "Blue"])),
    )
        .prop_map(|(name, score, color)| {
            let mut record = json!({ "name": name });
            if let Some(score) = score {
                record["score"] = json!(score);
            }
            if let Some(color) = color {
                record["color"] = json!(color);
            }
            record
        })
}

fn matches(model: &Model, options: &ParsedOptions, records: &[Json]) -> usize {
    let invocation = Invocation::parse(model, options).unwrap();
    pipeline::run(
        model,
        &invocation,
        records.iter().cloned().map(Ok),
        Painter::plain(),
        std::io::sink(),
    )
    .unwrap()
    .total
}

fn names(records: &[Json]) -> Vec<String> {
    records
        .iter()
        .map(|r| r["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Negating a text pattern inverts its result on non-empty text.
    #[test]
    fn negation_inverts_text_match(
        needle in "[a-c]{0,3}",
        text in "[a-cA-C]{1,10}",
        case in any::<bool>(),
        exact in any::<bool>(),
    ) {
        let modes = Modes { case, exact, regex: false };
        let plain = TextPattern::parse(&needle, modes).unwrap();
        let negated = TextPattern::parse(&format!("!{}", needle), modes).unwrap();
        prop_assert_eq!(negated.matches(&text), !plain.matches(&text));
    }

    /// Adding a value to an AND-combined field never widens the result.
    #[test]
    fn and_values_narrow(
        records in prop::collection::vec(record_strategy(), 0..30),
        first in -100i64..100,
        second in -100i64..100,
    ) {
        let model = model();
        let one = ParsedOptions::new().with_values("score", [format!(">={}", first)]);
        let two = ParsedOptions::new()
            .with_values("score", [format!(">={}", first), format!("<={}", second)]);
        prop_assert!(matches(&model, &two, &records) <= matches(&model, &one, &records));
    }

    /// Adding a value to an OR-combined field never narrows the result.
    #[test]
    fn or_values_widen(
        records in prop::collection::vec(record_strategy(), 0..30),
        first in -100i64..100,
        second in -100i64..100,
    ) {
        let model = model();
        let one = ParsedOptions::new()
            .with_values("score", [format!(">={}", first)])
            .with_values("or", ["score"]);
        let two = ParsedOptions::new()
            .with_values("score", [format!(">={}", first), format!("<={}", second)])
            .with_values("or", ["score"]);
        prop_assert!(matches(&model, &two, &records) >= matches(&model, &one, &records));
    }

    /// OR across fields matches at least as many records as AND.
    #[test]
    fn inclusive_never_narrows(
        records in prop::collection::vec(record_strategy(), 0..30),
        score in -100i64..100,
        color in prop::sample::select(vec!["red", "green", "blue"]),
    ) {
        let model = model();
        let and = ParsedOptions::new()
            .with_values("score", [format!(">{}", score)])
            .with_values("color", [color]);
        let or = and.clone().with_flag("inclusive");
        prop_assert!(matches(&model, &or, &records) >= matches(&model, &and, &records));
    }

    /// Count breakdowns account for every matched record exactly once.
    #[test]
    fn counts_sum_to_total(records in prop::collection::vec(record_strategy(), 0..30)) {
        let model = model();
        let options = ParsedOptions::new().with_values("count", ["color"]);
        let invocation = Invocation::parse(&model, &options).unwrap();
        let summary = pipeline::run(
            &model,
            &invocation,
            records.iter().cloned().map(Ok),
            Painter::plain(),
            std::io::sink(),
        )
        .unwrap();

        let counts = summary.counts.values().next().unwrap();
        prop_assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), summary.total);

        let mut keys: Vec<_> = counts.iter().map(|(key, _)| key.clone()).collect();
        keys.sort();
        keys.dedup();
        prop_assert_eq!(keys.len(), counts.len());
    }

    /// Sorting keeps every record.
    #[test]
    fn sort_is_a_permutation(records in prop::collection::vec(record_strategy(), 0..30)) {
        let model = model();
        let score = model.find("score").unwrap();
        let sorted = sort_records(&model, &[score], Dir::Asc, records.clone()).unwrap();
        let mut before = names(&records);
        let mut after = names(&sorted);
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }

    /// With distinct keys, descending order is the reverse of ascending.
    #[test]
    fn desc_reverses_distinct_keys(
        scores in prop::collection::btree_set(-1000i64..1000, 0..20),
    ) {
        let model = model();
        let score = model.find("score").unwrap();
        let records: Vec<Json> = scores
            .iter()
            .rev()
            .map(|s| json!({"name": s.to_string(), "score": s}))
            .collect();
        let asc = sort_records(&model, &[score], Dir::Asc, records.clone()).unwrap();
        let mut desc = sort_records(&model, &[score], Dir::Desc, records).unwrap();
        desc.reverse();
        prop_assert_eq!(names(&asc), names(&desc));
    }
}
