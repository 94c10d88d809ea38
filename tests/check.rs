mod common;

use common::{locked, Recorder};
use rapido::{
    alphanumeric, digits, for_all, integer, string, Config, Generate, Size, Strategy,
};

fn config(seed: u64) -> Config {
    Config {
        seed,
        ..Config::default()
    }
}

#[test]
fn a_passing_property_runs_exactly_the_configured_examples() {
    let _guard = locked();
    let harness = Recorder::new("addition_identity");
    let generator = integer::<i64>(Size::EMPTY);
    for_all(
        &harness,
        Config {
            examples: 25,
            ..config(3)
        },
        &generator,
        |x| x + 0 == x,
    );
    let expected: Vec<String> = Iterator::map(1..=25, |index| format!("ex#{index}")).collect();
    assert_eq!(harness.subtest_names(), expected);
    assert!(harness.subtests().iter().all(|(_, passed)| *passed));
    assert!(harness.fatals().is_empty());
}

#[test]
fn a_failing_property_reports_once_within_the_shrink_budget() {
    let _guard = locked();
    let harness = Recorder::new("always_fails");
    let generator = integer::<i64>(Size::EMPTY);
    for_all(
        &harness,
        Config {
            max_shrink: 7,
            ..config(9)
        },
        &generator,
        |_| false,
    );
    let names = harness.subtest_names();
    assert_eq!(names[0], "ex#1");
    let shrinks = names
        .iter()
        .filter(|name| name.starts_with("ex#1/shrink#"))
        .count();
    assert!(shrinks >= 1 && shrinks <= 7, "{shrinks} shrink subtests");
    // Shrink subtests are numbered in strict sequence.
    for (offset, name) in names[1..].iter().enumerate() {
        assert_eq!(*name, format!("ex#1/shrink#{}", offset + 1));
    }
    let fatals = harness.fatals();
    assert_eq!(fatals.len(), 1);
    assert!(fatals[0].contains("property failed"));
    assert!(fatals[0].contains("seed=9"));
    assert!(fatals[0].contains("examples_run=1"));
    assert!(fatals[0].contains("replay: run only the subtest 'always_fails/ex#1' with seed=9"));
}

#[test]
fn runs_are_deterministic_for_a_fixed_seed() {
    let _guard = locked();
    let run = || {
        let harness = Recorder::new("deterministic");
        let generator = alphanumeric(Size::EMPTY);
        for_all(&harness, config(42), &generator, |s: String| s.len() < 5);
        (harness.subtests(), harness.fatals())
    };
    assert_eq!(run(), run());
}

#[test]
fn dfs_shrinking_also_terminates_and_reports() {
    let _guard = locked();
    let harness = Recorder::new("dfs");
    let generator = integer::<i64>(Size::EMPTY);
    for_all(
        &harness,
        Config {
            strategy: Strategy::Dfs,
            ..config(5)
        },
        &generator,
        |_| false,
    );
    assert_eq!(harness.fatals().len(), 1);
    rapido::strategy::set(Strategy::Bfs);
}

#[test]
fn stop_on_first_failure_off_reports_every_failing_example() {
    let _guard = locked();
    let harness = Recorder::new("keep_going");
    let generator = integer::<i64>(Size::EMPTY);
    for_all(
        &harness,
        Config {
            examples: 4,
            max_shrink: 2,
            stop_on_first_failure: false,
            ..config(6)
        },
        &generator,
        |_| false,
    );
    assert_eq!(harness.fatals().len(), 4);
}

#[test]
fn zero_examples_run_nothing() {
    let _guard = locked();
    let harness = Recorder::new("empty");
    let generator = integer::<i64>(Size::EMPTY);
    for_all(
        &harness,
        Config {
            examples: 0,
            ..config(8)
        },
        &generator,
        |_| false,
    );
    assert!(harness.subtests().is_empty());
    assert!(harness.fatals().is_empty());
}

#[test]
fn a_short_false_empty_string_rule_minimises_to_the_first_symbol() {
    let _guard = locked();
    let harness = Recorder::new("empty_string_rule");
    let generator = alphanumeric(Size::new(1, 3));
    for_all(&harness, config(1), &generator, |s: String| s.is_empty());
    let fatals = harness.fatals();
    assert_eq!(fatals.len(), 1);
    assert!(
        fatals[0].contains("counterexample (min): \"a\""),
        "{}",
        fatals[0]
    );
}

#[test]
fn the_false_empty_string_rule_minimises_to_first_symbol_runs() {
    let _guard = locked();
    let harness = Recorder::new("empty_string_rule_default");
    let generator = alphanumeric(Size::EMPTY);
    for_all(&harness, config(1), &generator, |s: String| s.is_empty());
    let fatals = harness.fatals();
    assert_eq!(fatals.len(), 1);
    let minimum = extract_counterexample(&fatals[0]);
    let minimum = minimum.trim_matches('"');
    assert!(!minimum.is_empty());
    assert!(
        minimum.chars().all(|letter| letter == 'a'),
        "unexpected minimum {minimum:?}"
    );
}

#[test]
fn sum_zero_falsity_minimises_to_a_singleton() {
    let _guard = locked();
    let harness = Recorder::new("sum_zero");
    let generator = integer::<i64>(Size::EMPTY).collect_with(Size::new(0, 16));
    for_all(&harness, config(12345), &generator, |xs: Vec<i64>| {
        xs.iter().sum::<i64>() == 0
    });
    let fatals = harness.fatals();
    assert_eq!(fatals.len(), 1);
    let minimum = extract_counterexample(&fatals[0]);
    let inner = minimum
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or_else(|| panic!("not a sequence: {minimum}"));
    assert!(!inner.contains(','), "more than one element: {minimum}");
    let element: i64 = inner.trim().parse().unwrap();
    assert_ne!(element, 0);
    assert!((-100..=100).contains(&element));
}

#[test]
fn masked_identifier_round_trips() {
    let _guard = locked();
    let harness = Recorder::new("masked_round_trip");
    let generator = (0..=9u32).array::<9>().map(|root| mask(&with_verifiers(root)));
    for_all(&harness, config(77), &generator, |id: String| {
        unmask(&mask(&unmask(&id))) == unmask(&id)
    });
    assert!(harness.fatals().is_empty());
    assert_eq!(harness.subtests().len(), 100);
}

#[test]
fn digit_strings_stay_within_their_alphabet_while_shrinking() {
    let _guard = locked();
    let harness = Recorder::new("digits_only");
    let generator = digits(Size::new(1, 8));
    for_all(&harness, config(4), &generator, |s: String| {
        // Deliberately false so shrink candidates flow through subtests.
        s.len() > 2
    });
    assert_eq!(harness.fatals().len(), 1);
    let fatals = harness.fatals();
    let minimum = extract_counterexample(&fatals[0]);
    let minimum = minimum.trim_matches('"');
    assert!(minimum.chars().all(|letter| letter.is_ascii_digit()));
}

#[test]
fn custom_alphabets_are_respected() {
    let _guard = locked();
    let harness = Recorder::new("custom_alphabet");
    let generator = string("xyz", Size::new(1, 6));
    for_all(&harness, config(10), &generator, |s: String| {
        s.chars().all(|letter| "xyz".contains(letter))
    });
    assert!(harness.fatals().is_empty());
}

#[test]
fn equal_passes_silently_on_structural_equality() {
    let harness = Recorder::new("equal_pass");
    rapido::equal(&harness, vec![1, 2, 3], vec![1, 2, 3]);
    assert!(harness.fatals().is_empty());
}

#[test]
fn equal_aborts_with_a_diff_on_mismatch() {
    let harness = Recorder::new("equal_fail");
    rapido::equal(&harness, vec![1, 2, 3], vec![1, 9, 3]);
    let fatals = harness.fatals();
    assert_eq!(fatals.len(), 1);
    assert!(fatals[0].contains("mismatch"), "{}", fatals[0]);
}

/// Pulls the rendering of the minimal counterexample out of a fatal report.
fn extract_counterexample(fatal: &str) -> &str {
    let line = fatal
        .lines()
        .find_map(|line| line.strip_prefix("counterexample (min): "))
        .unwrap_or_else(|| panic!("no counterexample in {fatal}"));
    line.trim()
}

/// Appends the two verifier digits of the canonical 11-digit identifier.
fn with_verifiers(root: [u32; 9]) -> String {
    let verifier = |digits: &[u32]| {
        let weights = (2..=digits.len() as u32 + 1).rev();
        let sum: u32 = digits.iter().zip(weights).map(|(digit, weight)| digit * weight).sum();
        match 11 - sum % 11 {
            10 | 11 => 0,
            digit => digit,
        }
    };
    let mut digits = root.to_vec();
    let first = verifier(&digits);
    digits.push(first);
    let second = verifier(&digits);
    digits.push(second);
    digits.into_iter().map(|digit| char::from_digit(digit, 10).unwrap()).collect()
}

fn mask(id: &str) -> String {
    let digits = unmask(id);
    if digits.len() != 11 {
        return digits;
    }
    format!(
        "{}.{}.{}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..11]
    )
}

fn unmask(id: &str) -> String {
    id.chars().filter(char::is_ascii_digit).collect()
}
