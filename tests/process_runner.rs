#![cfg(unix)]

use std::ffi::OsString;

use l3acomp::{Error, ProcessRunner, Tool, ToolInvocation, ToolRunner};

fn invocation(program: &str, args: &[&str]) -> ToolInvocation {
    ToolInvocation {
        tool: Tool::MaskHandler,
        program: program.to_string(),
        args: args.iter().map(|a| OsString::from(*a)).collect(),
    }
}

#[test]
fn zero_exit_is_success() {
    let mut runner = ProcessRunner::new();
    runner.run(&invocation("true", &["MaskHandler"])).unwrap();
}

#[test]
fn non_zero_exit_is_reported_with_code() {
    let mut runner = ProcessRunner::new();
    let err = runner
        .run(&invocation("sh", &["-c", "exit 3"]))
        .unwrap_err();
    assert!(matches!(err, Error::ToolFailed { code: Some(3), .. }));
    assert!(err.to_string().contains("MaskHandler"));
}

#[test]
fn missing_launcher_is_a_spawn_error() {
    let mut runner = ProcessRunner::new();
    let err = runner
        .run(&invocation("l3acomp-no-such-launcher", &[]))
        .unwrap_err();
    assert!(matches!(err, Error::ToolSpawn { .. }));
}
