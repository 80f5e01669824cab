//! Linker setup for the firmware image. Host builds of the library skip it.

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    if env::var_os("CARGO_FEATURE_FIRMWARE").is_none() {
        return;
    }

    if env::var("PROFILE").unwrap_or_default() == "release" {
        println!("cargo:rustc-env=DEFMT_LOG=off");
    }

    // Put memory.x where the cortex-m-rt link script can find it.
    let out = PathBuf::from(env::var_os("OUT_DIR").unwrap_or_default());
    match File::create(out.join("memory.x")) {
        Ok(mut f) => {
            if let Err(e) = f.write_all(include_bytes!("memory.x")) {
                println!("cargo:warning=could not write memory.x: {e}");
            }
        }
        Err(e) => println!("cargo:warning=could not create memory.x: {e}"),
    }
    println!("cargo:rustc-link-search={}", out.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
