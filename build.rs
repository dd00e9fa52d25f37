fn main() {
    println!("cargo:rerun-if-env-changed=HEATLINK_CONFIG");

    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
