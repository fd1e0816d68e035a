fn main() {
    // Station credentials are baked in at build time.
    println!("cargo:rerun-if-env-changed=WIFI_SSID");
    println!("cargo:rerun-if-env-changed=WIFI_PASSWORD");
    println!("cargo:rerun-if-changed=assets/index.html");

    #[cfg(feature = "espidf")]
    {
        if std::env::var("WIFI_SSID").is_err() {
            println!("cargo:warning=WIFI_SSID not set; firmware will fail to join a network");
        }
        embuild::espidf::sysenv::output();
    }
}
