//! Failure isolation and abort behavior

use sqlscript_rs::{Connection, Error, Result, Rows, Runner};

struct CountingConnection {
    queries: Vec<String>,
    fail_on: Option<String>,
}

impl CountingConnection {
    fn new() -> Self {
        CountingConnection {
            queries: Vec::new(),
            fail_on: None,
        }
    }

    fn failing_on(query: impl Into<String>) -> Self {
        CountingConnection {
            queries: Vec::new(),
            fail_on: Some(query.into()),
        }
    }
}

impl Connection for CountingConnection {
    fn execute(&mut self, query: &str) -> Result<Rows> {
        if self.fail_on.as_deref() == Some(query) {
            return Err(Error::connection(format!("query rejected: {}", query)));
        }
        self.queries.push(query.to_string());
        Ok(vec![])
    }

    fn last_insert_id(&mut self) -> Result<i64> {
        Ok(0)
    }
}

#[test]
fn test_expectation_failure_lets_later_stands_run() {
    let script = r#"test_case "name"
  stand 0
    expect_eq 2 4
  stand 1
    execute "after the failure"
"#;
    let mut runner = Runner::new(CountingConnection::new());
    let result = runner.run(script).unwrap();

    assert_eq!(result.step_count(), 2);
    assert_eq!(result.error_count(), 1);

    let conn = runner.into_connection();
    assert_eq!(conn.queries, vec!["after the failure"]);
}

#[test]
fn test_failure_in_before_lets_stands_run() {
    let script = r#"before "setup"
  expect_eq 1 2
test_case "name"
  stand 0
    execute "still runs"
"#;
    let mut runner = Runner::new(CountingConnection::new());
    let result = runner.run(script).unwrap();

    assert_eq!(result.step_count(), 2);
    assert_eq!(result.error_count(), 1);
    assert_eq!(
        result.failures()[0].summary(),
        "In before: setup: expected 2, got 1"
    );

    let conn = runner.into_connection();
    assert_eq!(conn.queries, vec!["still runs"]);
}

#[test]
fn test_connection_failure_aborts_run() {
    let script = r#"test_case "name"
  stand 0
    execute "bad query"
  stand 1
    execute "never reached"
"#;
    let mut runner = Runner::new(CountingConnection::failing_on("bad query"));
    let err = runner.run(script).unwrap_err();

    assert!(matches!(err, Error::Connection { .. }));

    let conn = runner.into_connection();
    assert!(conn.queries.is_empty());
}

#[test]
fn test_multiple_failures_all_recorded_in_order() {
    let script = r#"test_case "a"
  stand 0
    expect_eq 1 2
test_case "b"
  stand 1
    expect_eq 3 4
"#;
    let mut runner = Runner::new(CountingConnection::new());
    let result = runner.run(script).unwrap();

    assert_eq!(result.error_count(), 2);
    assert_eq!(
        result.failures()[0].summary(),
        "In testcase a - stand 0: expected 2, got 1"
    );
    assert_eq!(
        result.failures()[1].summary(),
        "In testcase b - stand 1: expected 4, got 3"
    );
}

#[test]
fn test_rerun_produces_identical_result() {
    let script = r#"before "seed"
  execute "create table t (id integer)"
test_case "name"
  stand 0
    expect_eq 2 4
  stand 1
    execute "select 1"
"#;
    let mut first_runner = Runner::new(CountingConnection::new());
    let first = first_runner.run(script).unwrap();

    let mut second_runner = Runner::new(CountingConnection::new());
    let second = second_runner.run(script).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.step_count(), second.step_count());
    assert_eq!(first.summary(), second.summary());
}
