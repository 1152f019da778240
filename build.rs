fn main() {
    println!("cargo:rerun-if-env-changed=ROOMNODE_WIFI_SSID");
    println!("cargo:rerun-if-env-changed=ROOMNODE_WIFI_PASS");
    println!("cargo:rerun-if-env-changed=ROOMNODE_ENDPOINT");

    // Host builds (tests, simulation) have no ESP-IDF environment to export.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
