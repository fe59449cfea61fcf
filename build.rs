use std::process::Command;

fn main() {
    let base = env!("CARGO_PKG_VERSION");

    // Short git sha when building from a checkout, or GIT_SHA in CI
    let sha = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| std::env::var("GIT_SHA").ok().filter(|s| !s.is_empty()));

    let version = match sha {
        Some(s) => format!("{base}+{s}"),
        None => base.to_string(),
    };

    println!("cargo:rustc-env=APP_VERSION={version}");

    println!("cargo:rerun-if-env-changed=GIT_SHA");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads");
}
