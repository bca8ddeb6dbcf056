use std::fs;
use std::path::PathBuf;

fn main() {
    let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let version_path = manifest_dir.join("../../VERSION");
    println!("cargo:rerun-if-changed={}", version_path.display());

    let raw = fs::read_to_string(&version_path).expect("read VERSION file");
    let version = raw.trim();

    // VERSION must be plain `major.minor.patch`; it is shown verbatim in
    // `--version` and the startup log.
    let parts: Vec<&str> = version.split('.').collect();
    assert!(
        parts.len() == 3 && parts.iter().all(|part| part.parse::<u32>().is_ok()),
        "VERSION must be major.minor.patch, got {version:?}"
    );

    println!("cargo:rustc-env=COSMETICA_VERSION={version}");
}
