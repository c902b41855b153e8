//! End-to-end checks of the public template compilation pipeline.

#![expect(clippy::expect_used, reason = "tests require explicit panic messages")]

use rstest::rstest;
use stepscan_patterns::{
    CustomParameter, StepKeyword, compile_partial_pattern, compile_step_pattern,
    completion_insert_text, display_text, expand_variants,
};

#[test]
fn invariant_variants_compile_and_match_independently() {
    let variants = expand_variants("I have (one|two) {int} cats");
    assert_eq!(variants, vec!["I have one {int} cats", "I have two {int} cats"]);

    let compiled: Vec<_> = variants
        .iter()
        .map(|variant| compile_step_pattern(variant, &[]).expect("variant should compile"))
        .collect();
    let matching: Vec<bool> = compiled
        .iter()
        .map(|pattern| pattern.regex.is_match("I have two 3 cats"))
        .collect();
    assert_eq!(matching, vec![false, true]);
}

#[rstest]
#[case("I see ")]
#[case("I see 4 ")]
#[case("I see 4 items")]
fn regex_templates_accept_typed_prefixes(#[case] typed: &str) {
    let template = r"^I see (\d+) items$";
    let full = compile_step_pattern(template, &[]).expect("template should compile");
    let partial = compile_partial_pattern(template, &[], &full.regex);
    assert!(partial.is_match(typed), "{typed:?} should be accepted");
}

#[test]
fn custom_parameters_flow_through_every_stage() {
    let custom = [CustomParameter {
        parameter: "{animal}".to_owned(),
        value: "(cat|dog)".to_owned(),
    }];
    let template = "I stroke the {animal}";
    let full = compile_step_pattern(template, &custom).expect("template should compile");
    assert!(full.regex.is_match("I stroke the dog"));
    assert!(!full.regex.is_match("I stroke the fox"));

    let partial = compile_partial_pattern(template, &custom, &full.regex);
    assert!(partial.is_match("I stroke "));
    assert!(!partial.is_match("I pat "));
}

#[rstest]
#[case::plain("I have 2 ", false, "{int} cats")]
#[case::snippet("I have 2 ", true, "${1:} cats")]
#[case::nothing_typed("", false, "I have {int} cats")]
fn insert_text_continues_from_typed_text(
    #[case] typed: &str,
    #[case] smart: bool,
    #[case] expected: &str,
) {
    let display = display_text("I have {int} cats");
    assert_eq!(completion_insert_text(&display, typed, smart), expected);
}

#[rstest]
#[case("Given", None, Some(StepKeyword::Given))]
#[case("Und", Some(StepKeyword::When), Some(StepKeyword::When))]
#[case("Soit", None, Some(StepKeyword::Given))]
#[case("And", None, None)]
fn keywords_resolve_across_dialects(
    #[case] spelling: &str,
    #[case] previous: Option<StepKeyword>,
    #[case] expected: Option<StepKeyword>,
) {
    let keyword = StepKeyword::classify(spelling).expect("known keyword");
    assert_eq!(keyword.resolve(previous), expected);
}
