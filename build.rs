use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Host builds run the simulated board; nothing to configure.
    let target = env::var("TARGET").unwrap_or_default();
    if !target.contains("avr") {
        return;
    }

    // Configure for ATmega2560
    println!("cargo:rustc-link-arg=-mmcu=atmega2560");

    // Pass CPU frequency for timing calculations
    println!("cargo:rustc-env=MCU_FREQ_HZ=16000000");

    println!("cargo:warning=Building for ATmega2560 at 16MHz");
}
