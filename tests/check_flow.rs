//! Library-level tests for the check flow against the process environment.

use std::env;
use std::fs;

use envcheck::{
    CheckOutcome,
    EnvCheckError,
    EnvSnapshot,
    LinePrompter,
    ProjectPaths,
    check,
};
use serial_test::serial;
use tempfile::TempDir;

fn clear_env(keys: &[&str]) {
    for k in keys {
        unsafe { env::remove_var(k) };
    }
}

fn project(manifest: &str) -> (TempDir, ProjectPaths) {
    let tmp = TempDir::new().unwrap();
    let paths = ProjectPaths::in_dir(tmp.path());
    fs::write(&paths.manifest, manifest).unwrap();
    (tmp, paths)
}

#[test]
#[serial]
fn shell_value_beats_env_file() {
    clear_env(&["ENVCHECK_FLOW_A"]);
    unsafe {
        env::set_var("ENVCHECK_FLOW_A", "shell");
    }
    let (_tmp, paths) = project(r#"{"envCheck": ["ENVCHECK_FLOW_A"]}"#);
    fs::write(&paths.env_file, "ENVCHECK_FLOW_A=file\n").unwrap();

    let snapshot = EnvSnapshot::capture(&paths.env_file).unwrap();
    assert_eq!(snapshot.get("ENVCHECK_FLOW_A"), Some("shell"));
    clear_env(&["ENVCHECK_FLOW_A"]);
}

#[test]
#[serial]
fn snapshot_is_taken_once() {
    clear_env(&["ENVCHECK_FLOW_B"]);
    let (_tmp, paths) = project(r#"{"envCheck": ["ENVCHECK_FLOW_B"]}"#);
    let snapshot = EnvSnapshot::capture(&paths.env_file).unwrap();

    unsafe {
        env::set_var("ENVCHECK_FLOW_B", "late");
    }
    let mut prompter = LinePrompter::new("answer\n".as_bytes(), Vec::new());
    let outcome = check(&paths, &snapshot, &mut prompter).unwrap();
    assert_eq!(
        outcome,
        CheckOutcome::Updated(vec!["ENVCHECK_FLOW_B".to_string()])
    );
    clear_env(&["ENVCHECK_FLOW_B"]);
}

#[test]
fn rerunning_check_appends_second_block() {
    let (_tmp, paths) = project(r#"{"envCheck": ["ONLY_IN_SNAPSHOT"]}"#);

    for answer in ["one", "two"] {
        let input = format!("{answer}\n");
        let mut prompter = LinePrompter::new(input.as_bytes(), Vec::new());
        check(&paths, &EnvSnapshot::default(), &mut prompter).unwrap();
    }

    let content = fs::read_to_string(&paths.env_file).unwrap();
    assert_eq!(content.matches("#Auto GEN by envCheck").count(), 2);
    assert!(content.contains("ONLY_IN_SNAPSHOT=one"));
    assert!(content.contains("ONLY_IN_SNAPSHOT=two"));
}

#[test]
fn non_list_env_check_is_not_configured() {
    let (_tmp, paths) = project(r#"{"envCheck": "A,B"}"#);
    let mut prompter = LinePrompter::new("never\n".as_bytes(), Vec::new());

    let err = check(&paths, &EnvSnapshot::default(), &mut prompter).unwrap_err();
    assert!(matches!(err, EnvCheckError::NoEnvCheckConfigured { .. }));
    assert!(!paths.env_file.exists());
}

#[test]
fn interrupted_prompt_writes_nothing() {
    let (_tmp, paths) = project(r#"{"envCheck": ["A", "B"]}"#);
    let mut prompter = LinePrompter::new("only-a\n".as_bytes(), Vec::new());

    let err = check(&paths, &EnvSnapshot::default(), &mut prompter).unwrap_err();
    assert!(matches!(err, EnvCheckError::PromptInterrupted { .. }));
    assert_eq!(err.exit_code(), 130);
    assert!(!paths.env_file.exists());
}

#[test]
fn answers_with_special_characters_satisfy_the_next_check() {
    let (_tmp, paths) = project(r#"{"envCheck": ["FLOW_PATH", "FLOW_QUOTE", "FLOW_PRICE"]}"#);

    let input = "C:\\Program Files\na \"b\" c\ncosts $5\n";
    let mut prompter = LinePrompter::new(input.as_bytes(), Vec::new());
    check(&paths, &EnvSnapshot::default(), &mut prompter).unwrap();

    let mut snapshot = EnvSnapshot::default();
    snapshot.overlay(envcheck::env_file::read_entries(&paths.env_file).unwrap());
    assert_eq!(snapshot.get("FLOW_PATH"), Some(r"C:\Program Files"));
    assert_eq!(snapshot.get("FLOW_QUOTE"), Some(r#"a "b" c"#));
    assert_eq!(snapshot.get("FLOW_PRICE"), Some("costs $5"));

    let mut never = LinePrompter::new("".as_bytes(), Vec::new());
    let outcome = check(&paths, &snapshot, &mut never).unwrap();
    assert_eq!(outcome, CheckOutcome::AllSet);
}

#[test]
fn stray_lines_in_env_file_do_not_block_check() {
    let (_tmp, paths) = project(r#"{"envCheck": ["FLOW_LENIENT"]}"#);
    fs::write(&paths.env_file, "FLOW_LENIENT=1\nJUST SOME TEXT\n").unwrap();

    let snapshot = EnvSnapshot::capture(&paths.env_file).unwrap();
    assert_eq!(snapshot.get("FLOW_LENIENT"), Some("1"));

    let mut never = LinePrompter::new("".as_bytes(), Vec::new());
    let outcome = check(&paths, &snapshot, &mut never).unwrap();
    assert_eq!(outcome, CheckOutcome::AllSet);
}
