//! Build identification for gigbook-web
//!
//! Exposes `GIT_HASH`, `BUILD_TIMESTAMP` and `BUILD_PROFILE` to `env!` so the
//! health endpoint and the startup log can name the exact build.

use std::process::Command;

use chrono::{SecondsFormat, Utc};

const UNKNOWN: &str = "unknown";

fn main() {
    // Rebuild when HEAD moves, not on every source change
    println!("cargo:rerun-if-changed=../.git/HEAD");
    println!("cargo:rerun-if-changed=build.rs");

    emit("GIT_HASH", &git_short_hash().unwrap_or_else(|| UNKNOWN.to_string()));
    emit(
        "BUILD_TIMESTAMP",
        &Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    );
    emit(
        "BUILD_PROFILE",
        &std::env::var("PROFILE").unwrap_or_else(|_| UNKNOWN.to_string()),
    );
}

/// `None` outside a git checkout or without git installed
fn git_short_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?;
    Some(hash.trim().to_string()).filter(|h| !h.is_empty())
}

fn emit(key: &str, value: &str) {
    println!("cargo:rustc-env={}={}", key, value);
}
