// tests/resolve_dispatch.rs

mod common;
use crate::common::args;
use crate::common::builders::ResolverEnvBuilder;

use xvfb_maybe::fs::mock::MockFileSystem;
use xvfb_maybe::resolve::{ExecutableSpec, find_actual_executable};

const CMD_EXE: &str = r"C:\Windows\System32\cmd.exe";
const POWERSHELL_EXE: &str = r"C:\Windows\System32\WindowsPowerShell\v1.0\PowerShell.exe";

#[test]
fn posix_passes_scripts_through_untouched() {
    let fs = MockFileSystem::new();
    fs.add_file("myscript.cmd");
    let env = ResolverEnvBuilder::posix().build();

    let spec = find_actual_executable(&fs, &env, "myscript", &args(&["--flag"]));
    assert_eq!(spec, ExecutableSpec::new("myscript", args(&["--flag"])));

    let spec = find_actual_executable(&fs, &env, "tool.ps1", &[]);
    assert_eq!(spec, ExecutableSpec::new("tool.ps1", vec![]));
}

#[test]
fn unsuffixed_cmd_script_goes_through_cmd_exe() {
    let fs = MockFileSystem::new();
    fs.add_file("myscript.cmd");
    let env = ResolverEnvBuilder::windows().build();

    let spec = find_actual_executable(&fs, &env, "myscript", &args(&["a", "b c"]));

    assert_eq!(spec.program, CMD_EXE);
    assert_eq!(spec.arguments, args(&["/C", "myscript.cmd", "a", "b c"]));
}

#[test]
fn probing_prefers_exe_then_bat_then_cmd_then_ps1() {
    let env = ResolverEnvBuilder::windows().build();

    let fs = MockFileSystem::new();
    fs.add_file("tool.ps1");
    fs.add_file("tool.cmd");
    fs.add_file("tool.bat");
    fs.add_file("tool.exe");
    let spec = find_actual_executable(&fs, &env, "tool", &[]);
    assert_eq!(spec, ExecutableSpec::new("tool.exe", vec![]));

    let fs = MockFileSystem::new();
    fs.add_file("tool.ps1");
    fs.add_file("tool.cmd");
    fs.add_file("tool.bat");
    let spec = find_actual_executable(&fs, &env, "tool", &[]);
    assert_eq!(spec.arguments, args(&["/C", "tool.bat"]));

    let fs = MockFileSystem::new();
    fs.add_file("tool.ps1");
    fs.add_file("tool.cmd");
    let spec = find_actual_executable(&fs, &env, "tool", &[]);
    assert_eq!(spec.arguments, args(&["/C", "tool.cmd"]));

    let fs = MockFileSystem::new();
    fs.add_file("tool.ps1");
    let spec = find_actual_executable(&fs, &env, "tool", &[]);
    assert_eq!(spec.program, POWERSHELL_EXE);
}

#[test]
fn powershell_scripts_run_non_interactively() {
    let fs = MockFileSystem::new();
    let env = ResolverEnvBuilder::windows().build();

    let spec = find_actual_executable(&fs, &env, r"C:\ci\Setup.PS1", &args(&["-Verbose"]));

    assert_eq!(spec.program, POWERSHELL_EXE);
    assert_eq!(
        spec.arguments,
        args(&[
            "-ExecutionPolicy",
            "Unrestricted",
            "-NoLogo",
            "-NonInteractive",
            "-File",
            r"C:\ci\Setup.PS1",
            "-Verbose",
        ])
    );
}

#[test]
fn batch_suffix_is_case_insensitive() {
    let fs = MockFileSystem::new();
    let env = ResolverEnvBuilder::windows().build();

    let spec = find_actual_executable(&fs, &env, r"C:\tools\BUILD.BAT", &[]);
    assert_eq!(spec.program, CMD_EXE);
    assert_eq!(spec.arguments, args(&["/C", r"C:\tools\BUILD.BAT"]));
}

#[test]
fn js_scripts_use_the_configured_runtime() {
    let fs = MockFileSystem::new();
    let env = ResolverEnvBuilder::windows()
        .with_script_runtime(r"C:\Program Files\nodejs\node.exe")
        .build();

    let spec = find_actual_executable(&fs, &env, "cli.js", &args(&["--help"]));
    assert_eq!(spec.program, r"C:\Program Files\nodejs\node.exe");
    assert_eq!(spec.arguments, args(&["cli.js", "--help"]));
}

#[test]
fn missing_system_root_falls_back_to_default_windows_dir() {
    let fs = MockFileSystem::new();
    let env = ResolverEnvBuilder::windows().with_system_root(None).build();

    let spec = find_actual_executable(&fs, &env, "run.cmd", &[]);
    assert_eq!(spec.program, CMD_EXE);
}

#[test]
fn system_root_trailing_separator_is_not_doubled() {
    let fs = MockFileSystem::new();
    let env = ResolverEnvBuilder::windows()
        .with_system_root(Some(r"D:\WINNT\"))
        .build();

    let spec = find_actual_executable(&fs, &env, "run.cmd", &[]);
    assert_eq!(spec.program, r"D:\WINNT\System32\cmd.exe");
}

#[test]
fn suffixed_executables_are_fixed_points() {
    let fs = MockFileSystem::new();
    fs.add_file(r"C:\Program Files\app\app.exe");
    fs.add_file(r"C:\Program Files\app\app.exe.cmd");
    let env = ResolverEnvBuilder::windows().build();

    let input = args(&["--version"]);
    let spec = find_actual_executable(&fs, &env, r"C:\Program Files\app\app.exe", &input);
    assert_eq!(spec, ExecutableSpec::new(r"C:\Program Files\app\app.exe", input));
}

#[test]
fn unknown_file_without_candidates_is_returned_unchanged() {
    let fs = MockFileSystem::new();
    let env = ResolverEnvBuilder::windows().build();

    let spec = find_actual_executable(&fs, &env, "git", &args(&["status"]));
    assert_eq!(spec, ExecutableSpec::new("git", args(&["status"])));
}
