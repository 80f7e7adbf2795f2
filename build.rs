use std::env;
use std::fs;

/// Keys read by `AppConfig::from_env` through `option_env!`
const CONFIG_KEYS: [&str; 4] = [
    "BACKEND_URL_DEVELOPMENT",
    "BACKEND_URL_PRODUCTION",
    "ENVIRONMENT",
    "ENABLE_LOGGING",
];

fn dotenv_value(contents: &str, key: &str) -> Option<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .find(|(k, _)| k.trim() == key)
        .map(|(_, v)| v.trim().trim_matches('"').to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=.env");
    let dotenv = fs::read_to_string(".env").unwrap_or_default();

    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
        if env::var(key).is_ok() {
            continue;
        }
        if let Some(value) = dotenv_value(&dotenv, key) {
            println!("cargo:rustc-env={}={}", key, value);
        }
    }
}
