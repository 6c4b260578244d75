use std::process::Command;

fn main() {
    println!("cargo:rerun-if-env-changed=RUNWAY_BUILD_SHA");

    // Packagers building from a tarball can pin the SHA themselves
    if let Ok(sha) = std::env::var("RUNWAY_BUILD_SHA") {
        println!("cargo:rustc-env=RUNWAY_BUILD_SHA={}", sha);
        return;
    }

    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let repo_root = format!("{}/..", manifest_dir);
    println!("cargo:rerun-if-changed={}/.git/HEAD", repo_root);

    let sha = Command::new("git")
        .args(["-C", &repo_root, "rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=RUNWAY_BUILD_SHA={}", sha);
}
