//! Integration tests

use sqlscript_rs::{sqlscript, Connection, Result, Rows, Runner};

#[derive(Default)]
struct RecordingConnection {
    queries: Vec<String>,
}

impl Connection for RecordingConnection {
    fn execute(&mut self, query: &str) -> Result<Rows> {
        self.queries.push(query.to_string());
        Ok(vec![])
    }

    fn last_insert_id(&mut self) -> Result<i64> {
        Ok(1)
    }
}

#[test]
fn test_stand_forwards_query_to_connection() {
    let script = r#"test_case "name"
  stand 0
    execute "select bla from bla"
"#;
    let mut runner = Runner::new(RecordingConnection::default());
    runner.run(script).unwrap();

    let conn = runner.into_connection();
    assert_eq!(conn.queries, vec!["select bla from bla"]);
}

#[test]
fn test_directory_run_passes() {
    use std::fs;
    use tempfile::TempDir;

    let temp_dir = TempDir::new().unwrap();
    let testdata_dir = temp_dir.path().join("testdata");
    fs::create_dir(&testdata_dir).unwrap();

    let script_content = r#"before "seed"
  execute "create table users (id integer)"

test_case "insert and read back"
  stand 0
    execute "insert into users values (1)"
    expect_last_insert_id 1
"#;

    fs::write(testdata_dir.join("users.txt"), script_content).unwrap();

    let result = sqlscript::run(testdata_dir.to_string_lossy())
        .connect(|| Ok(RecordingConnection::default()))
        .execute();
    assert!(result.is_ok(), "directory run failed: {:?}", result);
}

#[test]
fn test_directory_run_reports_failures() {
    use std::fs;
    use tempfile::TempDir;

    let temp_dir = TempDir::new().unwrap();
    let testdata_dir = temp_dir.path().join("testdata");
    fs::create_dir(&testdata_dir).unwrap();

    let script_content = r#"test_case "broken"
  stand 0
    expect_eq 2 4
"#;

    fs::write(testdata_dir.join("broken.txt"), script_content).unwrap();

    let err = sqlscript::run(testdata_dir.to_string_lossy())
        .connect(|| Ok(RecordingConnection::default()))
        .execute()
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("broken.txt"));
    assert!(message.contains("In testcase broken - stand 0: expected 4, got 2"));
    assert!(message.contains("1 testcases - 1 failures"));
}

#[test]
fn test_directory_run_requires_scripts() {
    use tempfile::TempDir;

    let temp_dir = TempDir::new().unwrap();

    let err = sqlscript::run(temp_dir.path().to_string_lossy())
        .connect(|| Ok(RecordingConnection::default()))
        .execute()
        .unwrap_err();
    assert!(err.to_string().contains("No test scripts found"));
}

#[test]
fn test_scripts_run_in_sorted_file_order() {
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    struct TaggedConnection {
        order: Arc<AtomicUsize>,
    }

    impl Connection for TaggedConnection {
        fn execute(&mut self, query: &str) -> Result<Rows> {
            // b.txt runs second, so its query must observe a.txt's bump
            let seen = self.order.fetch_add(1, Ordering::SeqCst);
            if query == "first" {
                assert_eq!(seen, 0);
            } else {
                assert_eq!(seen, 1);
            }
            Ok(vec![])
        }

        fn last_insert_id(&mut self) -> Result<i64> {
            Ok(0)
        }
    }

    let temp_dir = TempDir::new().unwrap();
    let testdata_dir = temp_dir.path().join("testdata");
    fs::create_dir(&testdata_dir).unwrap();

    fs::write(
        testdata_dir.join("b.txt"),
        "test_case \"b\"\n  stand 0\n    execute \"second\"\n",
    )
    .unwrap();
    fs::write(
        testdata_dir.join("a.txt"),
        "test_case \"a\"\n  stand 0\n    execute \"first\"\n",
    )
    .unwrap();

    let order = Arc::new(AtomicUsize::new(0));
    let result = sqlscript::run(testdata_dir.to_string_lossy())
        .connect({
            let order = Arc::clone(&order);
            move || {
                Ok(TaggedConnection {
                    order: Arc::clone(&order),
                })
            }
        })
        .execute();
    assert!(result.is_ok(), "sorted-order run failed: {:?}", result);
    assert_eq!(order.load(std::sync::atomic::Ordering::SeqCst), 2);
}
