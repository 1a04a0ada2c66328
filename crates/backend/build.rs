use std::env;
use std::fs;
use std::path::Path;

// Drop the workspace config.toml next to the compiled binary so the server
// picks it up without any deploy step.
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    // OUT_DIR sits a few levels under target/<profile>; walk back up to the
    // directory the binary lands in.
    let out_dir = env::var("OUT_DIR").unwrap();
    let profile = env::var("PROFILE").unwrap();
    let target_dir = Path::new(&out_dir)
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .expect("OUT_DIR is not under the profile directory");

    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("crate directory is not inside a workspace");

    let source = workspace_root.join("config.toml");
    let dest = target_dir.join("config.toml");

    if source.exists() {
        if let Err(e) = fs::copy(&source, &dest) {
            panic!("could not copy config.toml to {}: {}", dest.display(), e);
        }
    } else {
        println!(
            "cargo:warning=no config.toml at {}, the embedded defaults apply",
            source.display()
        );
    }
}
