use std::env;

fn main() {
    // Name encoding of the generated settings tables (optional)
    // "byte" selects one byte per dictionary word, anything else varint
    if let Ok(encoding) = env::var("SETTINGS_NAME_ENCODING") {
        println!("cargo:rustc-env=SETTINGS_NAME_ENCODING={}", encoding);
        println!(
            "cargo:warning=Using SETTINGS_NAME_ENCODING from environment: {}",
            encoding
        );
    } else {
        println!("cargo:rustc-env=SETTINGS_NAME_ENCODING=varint");
    }

    // Rerun if environment variables change
    println!("cargo:rerun-if-env-changed=SETTINGS_NAME_ENCODING");
}
