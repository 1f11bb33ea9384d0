use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// target/<profile>, where the backend binary lands
fn profile_dir() -> Option<PathBuf> {
    let out_dir = PathBuf::from(env::var("OUT_DIR").ok()?);
    let profile = env::var("PROFILE").ok()?;
    out_dir
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .map(Path::to_path_buf)
}

// The server reads config.toml next to its executable; a workspace-level
// config.toml is copied there on every build.
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let Some(workspace_root) = manifest_dir.parent().and_then(Path::parent) else {
        println!("cargo:warning=workspace root not found, config.toml not copied");
        return;
    };
    let source = workspace_root.join("config.toml");
    if !source.exists() {
        println!("cargo:warning=no config.toml at {:?}, the embedded defaults apply", source);
        return;
    }

    let Some(target) = profile_dir() else {
        println!("cargo:warning=target profile directory not found");
        return;
    };
    if let Err(e) = fs::copy(&source, target.join("config.toml")) {
        println!("cargo:warning=failed to copy config.toml: {}", e);
    }
}
