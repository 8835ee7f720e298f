//! Build script for df2301q-firmware
//!
//! - Passes the cortex-m-rt and defmt linker scripts to the binary
//! - `memory.x` itself is generated by embassy-stm32 (`memory-x` feature)

fn main() {
    setup_linker();
}

/// Set up linker arguments for the firmware binary
fn setup_linker() {
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=build.rs");
}
