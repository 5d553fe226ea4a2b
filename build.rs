fn main() {
    // The IDF sysenv export is only meaningful for the espidf binary build;
    // host test builds must not require an ESP-IDF installation.
    if std::env::var_os("CARGO_FEATURE_ESPIDF").is_some() {
        embuild::espidf::sysenv::output();
    }
}
