use std::env;
use std::path::PathBuf;
use std::process::Command;

// https://github.com/rust-lang/cargo/blob/7fa132c7272fb9faca365c1d350e8e3c4c0d45e9/tests/cargotest/support/mod.rs#L316-L333
pub fn oric_tape_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .map(|mut path| {
            path.pop();
            if path.ends_with("deps") {
                path.pop();
            }
            path
        })
        .expect("Cannot get oric-tape_dir path.")
}

pub fn oric_tape_exe() -> PathBuf {
    oric_tape_dir().join(format!("oric-tape{}", env::consts::EXE_SUFFIX))
}

pub fn run(args: &[&str]) -> Command {
    let mut cmd = Command::new(oric_tape_exe());
    cmd.args(args);
    cmd
}
