use std::path::{Path, PathBuf};
use std::process::Command;

fn git(workspace: &Path, args: &[&str]) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(workspace)
        .args(args)
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let text = String::from_utf8(out.stdout).ok()?;
    Some(text.trim().to_owned())
}

fn main() {
    let manifest = PathBuf::from(std::env::var_os("CARGO_MANIFEST_DIR").unwrap_or_default());
    let workspace = manifest.parent().unwrap_or(&manifest);

    let build_sha = match git(workspace, &["rev-parse", "--short", "HEAD"]) {
        Some(sha) if !sha.is_empty() => {
            let dirty = git(workspace, &["status", "--porcelain", "--untracked-files=no"])
                .is_some_and(|s| !s.is_empty());
            if dirty { format!("{sha}-dirty") } else { sha }
        }
        _ => String::from("unknown"),
    };

    println!("cargo:rustc-env=SPENDTREND_BUILD_SHA={build_sha}");
    for watched in [".git/HEAD", ".git/index"] {
        println!("cargo:rerun-if-changed={}", workspace.join(watched).display());
    }
}
