#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sqlscript_rs::{parser, ExecutionPlan};

#[derive(Arbitrary, Debug)]
struct CaseSpec {
    name: String,
    keys: Vec<i64>,
}

#[derive(Arbitrary, Debug)]
struct ScriptSpec {
    befores: Vec<String>,
    cases: Vec<CaseSpec>,
}

/// Escape a string so it round-trips through the script's quoted-string syntax
fn escape(s: &str) -> String {
    let mut out = String::new();
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

fuzz_target!(|spec: ScriptSpec| {
    // Render the spec as script text
    let mut text = String::new();
    for description in &spec.befores {
        text.push_str(&format!("before \"{}\"\n", escape(description)));
    }
    for case in &spec.cases {
        text.push_str(&format!("test_case \"{}\"\n", escape(&case.name)));
        for key in &case.keys {
            text.push_str(&format!("stand {}\n", key));
        }
    }

    // A script assembled from well-formed declarations must always parse
    let script = parser::parse(&text).expect("generated script must parse");

    // Compute the expected linear order: befores in declaration order, then
    // stands sorted by key with declaration order breaking ties
    let mut expected: Vec<String> = spec
        .befores
        .iter()
        .map(|d| format!("before: {}", d))
        .collect();
    let mut stands: Vec<(i64, usize, String)> = Vec::new();
    let mut seq = 0usize;
    for case in &spec.cases {
        for key in &case.keys {
            stands.push((*key, seq, format!("testcase {} - stand {}", case.name, key)));
            seq += 1;
        }
    }
    stands.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
    expected.extend(stands.into_iter().map(|(_, _, description)| description));

    let plan = ExecutionPlan::build(script);
    let actual: Vec<String> = plan.steps().iter().map(|s| s.description()).collect();
    assert_eq!(actual, expected, "plan order mismatch");
});
