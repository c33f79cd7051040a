// build.rs

use std::env;

fn main() -> anyhow::Result<()> {
    let wifi_ssid = env::var("WIFI_SSID").unwrap_or_else(|_| "internet".into());
    let wifi_pass = env::var("WIFI_PASS").unwrap_or_else(|_| "password".into());
    let tb_server = env::var("TB_SERVER").unwrap_or_else(|_| "thingsboard.local".into());
    let tb_token = env::var("TB_TOKEN").unwrap_or_else(|_| "token".into());

    println!("cargo:rustc-env=WIFI_SSID={wifi_ssid}");
    println!("cargo:rustc-env=WIFI_PASS={wifi_pass}");
    println!("cargo:rustc-env=TB_SERVER={tb_server}");
    println!("cargo:rustc-env=TB_TOKEN={tb_token}");

    Ok(())
}

// EOF
