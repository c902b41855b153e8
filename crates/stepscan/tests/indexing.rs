//! Integration tests for building and rebuilding the step index from files.

#![expect(clippy::expect_used, reason = "tests require explicit panic messages")]

use rstest::rstest;
use stepscan::indexing::{IndexOptions, StepIndex};
use stepscan::test_support::{WorkspaceBuilder, index_source, settings_with_steps, write_file};

const CAT_STEPS: &str = "\
/**
 * Adds cats to the basket.
 */
Given('I have {int} cats', function addCats(count) {
  basket.add(count);
});

When(/^I feed the (\\w+)$/, async function feed(animal) {});

// Then('an old step', fn);
Then(\"the {word} purrs\", () => {});
";

#[test]
fn indexes_every_configured_file() {
    let ws = WorkspaceBuilder::new()
        .with_settings(r#"{ "cucumberautocomplete": { "steps": ["steps/**/*.js", "lib/*.py"] } }"#)
        .with_file("steps/cats.js", CAT_STEPS)
        .with_file("lib/dogs.py", "@given(\"I have a dog called {name}\")\ndef named(context, name):\n    pass\n")
        .with_file("node_modules/pkg/steps/ignored.js", "Given('ignored', fn);")
        .build();

    let index = ws.index();
    let texts: Vec<&str> = index
        .entries()
        .iter()
        .map(|entry| entry.display_text.as_str())
        .collect();
    assert_eq!(
        texts,
        vec![
            "I have {int} cats",
            "I feed the (w+)",
            "the {word} purrs",
            "I have a dog called {name}",
        ]
    );

    let cats = index.entries().first().expect("cats entry");
    assert_eq!(cats.documentation, "Adds cats to the basket.");
    assert_eq!(cats.location.path, ws.path("steps/cats.js"));
    assert_eq!(
        (cats.location.position.line, cats.location.position.character),
        (3, 7)
    );
    assert_eq!(
        cats.source_text,
        "Given('I have {int} cats', function addCats(count)"
    );

    let feed = index.find_by_text("I feed the cats").expect("feed entry");
    assert_eq!(feed.documentation, "feed");
}

#[test]
fn invariant_expansion_creates_one_entry_per_alternative() {
    let options = IndexOptions {
        steps_invariants: true,
        ..IndexOptions::default()
    };
    let index = index_source("Given('I have (one|two|three) cats', fn);", &options);
    let texts: Vec<&str> = index
        .entries()
        .iter()
        .map(|entry| entry.display_text.as_str())
        .collect();
    assert_eq!(texts, vec!["I have one cats", "I have two cats", "I have three cats"]);

    let plain = index_source("Given('I have (one|two|three) cats', fn);", &IndexOptions::default());
    assert_eq!(plain.len(), 1);
    assert!(plain.find_by_text("I have two cats").is_some());
}

#[test]
fn identities_are_stable_and_counts_survive_rebuild() {
    let ws = WorkspaceBuilder::new()
        .with_file("steps/a.js", "Given('I have {int} cats', fn);\nGiven('I lose a cat', fn);")
        .build();
    let path = ws.path("steps/a.js");
    let options = IndexOptions::default();

    let mut first = StepIndex::build(&[&path], &options);
    let again = StepIndex::build(&[&path], &options);
    let ids = |index: &StepIndex| -> Vec<String> {
        index.entries().iter().map(|e| e.identity.clone()).collect()
    };
    assert_eq!(ids(&first), ids(&again));

    let cats = first.find_by_text("I have 1 cats").expect("cats").identity.clone();
    first.increment_usage(&cats);
    first.increment_usage(&cats);

    write_file(
        ws.dir.path(),
        "steps/a.js",
        "Given('I adopt a cat', fn);\nGiven('I have {int} cats', fn);",
    )
    .expect("rewrite steps");
    let rebuilt = first.rebuild(&[&path], &options);
    assert_eq!(rebuilt.len(), 2);
    assert_eq!(rebuilt.get(&cats).map(|e| e.usage_count), Some(2));
    assert!(rebuilt.find_by_text("I lose a cat").is_none());
    let adopt = rebuilt.find_by_text("I adopt a cat").expect("adopt");
    assert_eq!(adopt.usage_count, 0);
}

#[rstest]
#[case::custom_parameter("Given('I pick {color}', fn);", "I pick red", true)]
#[case::custom_parameter_mismatch("Given('I pick {color}', fn);", "I pick 12", false)]
#[case::builtin_float("Given('it costs {float}', fn);", "it costs -1.5", true)]
fn custom_parameters_apply_before_builtins(
    #[case] source: &str,
    #[case] text: &str,
    #[case] expected: bool,
) {
    let options = IndexOptions {
        custom_parameters: vec![stepscan_patterns::CustomParameter {
            parameter: "{color}".to_owned(),
            value: "(red|green)".to_owned(),
        }],
        ..IndexOptions::default()
    };
    let index = index_source(source, &options);
    assert_eq!(index.find_by_text(text).is_some(), expected);
}

#[test]
fn custom_parameters_can_alias_builtin_types() {
    let options = IndexOptions {
        custom_parameters: vec![stepscan_patterns::CustomParameter {
            parameter: "{amount}".to_owned(),
            value: "{float}".to_owned(),
        }],
        ..IndexOptions::default()
    };
    let index = index_source("Given('I pay {amount} euro', fn);", &options);
    assert_eq!(index.len(), 1);
    assert!(stepscan::handlers::validate(&index, "Given I pay 2.5 euro", 0, "").is_none());
    assert!(stepscan::handlers::validate(&index, "Given I pay lots euro", 0, "").is_some());
}

#[test]
fn seeds_usage_counts_from_synced_features() {
    let ws = WorkspaceBuilder::new()
        .with_file("steps/a.js", "Given('I have {int} cats', fn);\nThen('they purr', fn);")
        .with_file("features/a.feature", "Feature: a\n  Scenario: s\n    Given I have 1 cats\n    Then they purr\n")
        .with_file("features/b.feature", "Feature: b\n  Scenario: s\n    Given I have 2 cats\n")
        .build();
    let workspace = stepscan::discovery::Workspace::new(ws.dir.path(), settings_with_steps(&["steps/*.js"]));
    let index = workspace.build_index().expect("index");
    let counts: Vec<u32> = index.entries().iter().map(|e| e.usage_count).collect();
    assert_eq!(counts, vec![2, 1]);
}
