use std::process::{Command, ExitStatus};

pub struct CmdResult {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Run the csift binary with the given args and per-case env overrides.
pub fn run_cli(args: &[&str], envs: &[(&str, &str)]) -> CmdResult {
    let mut command = Command::new(env!("CARGO_BIN_EXE_csift"));
    command.args(args).env("RUST_BACKTRACE", "1");
    for (key, value) in envs {
        command.env(key, value);
    }
    let output = command.output().expect("execute csift command");

    CmdResult {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
