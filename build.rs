//! Embeds the commit hash and build date shown by `pippin --version`.

use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

fn git_short_commit() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?.trim().to_string();
    (hash.len() == 7).then_some(hash)
}

fn main() {
    // CI sets PIPPIN_BUILD_COMMIT; local builds ask git
    let commit = env::var("PIPPIN_BUILD_COMMIT")
        .ok()
        .filter(|c| c.len() == 7)
        .or_else(git_short_commit)
        .unwrap_or_else(|| "unknown".to_string());

    let date = env::var("PIPPIN_BUILD_DATE")
        .ok()
        .filter(|d| d.len() == 10)
        .unwrap_or_else(|| chrono::Utc::now().format("%Y-%m-%d").to_string());

    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR for build scripts");
    let dest_path = Path::new(&out_dir).join("build_info.rs");

    fs::write(
        &dest_path,
        format!(
            "pub const BUILD_COMMIT: &str = \"{commit}\";\npub const BUILD_DATE: &str = \"{date}\";\n"
        ),
    )
    .expect("failed to write build_info.rs");

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=PIPPIN_BUILD_COMMIT");
    println!("cargo:rerun-if-env-changed=PIPPIN_BUILD_DATE");
}
