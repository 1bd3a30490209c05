fn main() {
    // Propagate the esp-idf build environment (linker args, sysroot) when
    // cross-compiling for the ESP32. Host builds need nothing from it.
    let target = std::env::var("TARGET").unwrap_or_default();
    if target.contains("espidf") {
        embuild::espidf::sysenv::output();
    }
}
