use std::path::Path;
use std::process::Command;

/// `git describe` of the workspace, e.g. `v0.1.0-3-gab12cd3-dirty`.
fn describe(repo_root: &Path) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(repo_root)
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let described = String::from_utf8(out.stdout).ok()?.trim().to_string();
    (!described.is_empty()).then_some(described)
}

fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let repo_root = Path::new(&manifest_dir).join("..");

    let head = repo_root.join(".git").join("HEAD");
    if head.exists() {
        println!("cargo:rerun-if-changed={}", head.display());
    }

    let pkg_version = std::env::var("CARGO_PKG_VERSION").unwrap_or_default();
    let version = match describe(&repo_root) {
        Some(git) => format!("{pkg_version} ({git})"),
        None => pkg_version,
    };
    println!("cargo:rustc-env=ESTMT_VERSION={version}");
}
