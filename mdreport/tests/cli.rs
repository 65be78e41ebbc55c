#![allow(clippy::expect_used, reason = "Fine in tests")]

use std::{fs, process::Command};

use tempfile::TempDir;

#[test]
fn missing_documents_are_named_and_the_build_succeeds() {
  let dir = TempDir::new().expect("temp dir");
  fs::write(dir.path().join("PRESENT.md"), "# Present\n").expect("write doc");

  let config = dir.path().join("mdreport.toml");
  fs::write(
    &config,
    format!(
      r#"
title    = "Missing Files"
output   = '{output}'
base_dir = '{base}'

[[groups]]
heading = "Docs"
entries = ["PRESENT.md", "foo.md"]
"#,
      output = dir.path().join("report.html").display(),
      base = dir.path().display(),
    ),
  )
  .expect("write config");

  let output = Command::new(env!("CARGO_BIN_EXE_mdreport"))
    .arg("-c")
    .arg(&config)
    .current_dir(dir.path())
    .output()
    .expect("run mdreport");

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(
    output.status.success(),
    "exit status {}: {stdout}",
    output.status
  );
  assert!(stdout.contains("File not found, skipping"));
  assert!(stdout.contains("foo.md"));
  assert!(stdout.contains("1 configured file(s) were missing"));

  let html =
    fs::read_to_string(dir.path().join("report.html")).expect("report written");
  assert!(html.contains("<section id=\"present\""));
  assert!(!html.contains("id=\"foo\""));
}
