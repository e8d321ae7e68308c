fn main() {
    // ESP-IDF link arguments are only needed for the device build; host
    // builds (tests, simulation) have nothing to generate.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
