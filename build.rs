// build.rs

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Picks the message language: a `lang_*` feature, else `SPYCON_LANG`, else English.
fn selected_language() -> String {
    let mut features: Vec<String> = env::vars()
        .filter_map(|(key, _)| key.strip_prefix("CARGO_FEATURE_LANG_").map(str::to_lowercase))
        .collect();
    features.sort();

    match features.first() {
        Some(first) => {
            if features.len() > 1 {
                println!(
                    "cargo:warning=Several lang_* features enabled ({:?}), using '{}'.",
                    features, first
                );
            }
            first.clone()
        }
        None => env::var("SPYCON_LANG").unwrap_or_else(|_| "en".to_string()),
    }
}

fn read_messages(path: &str) -> Option<HashMap<String, String>> {
    let content = fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(messages) => Some(messages),
        Err(e) => panic!("{} is not a flat table of strings: {}", path, e),
    }
}

fn main() {
    let lang = selected_language();
    println!("cargo:rustc-env=SPYCON_LANG_EFFECTIVE={}", lang);
    println!("cargo:rerun-if-env-changed=SPYCON_LANG");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=locales/");

    let mut messages = read_messages("locales/en.toml").expect("locales/en.toml is missing");
    if lang != "en" {
        match read_messages(&format!("locales/{}.toml", lang)) {
            Some(overlay) => messages.extend(overlay),
            None => println!("cargo:warning=No locales/{}.toml, messages stay in English.", lang),
        }
    }

    let mut keys: Vec<&String> = messages.keys().collect();
    keys.sort();

    let mut code = String::from("#[macro_export]\nmacro_rules! t {\n");
    for key in keys {
        let value = messages[key].replace('\\', "\\\\").replace('"', "\\\"");
        code.push_str(&format!("    (\"{}\") => {{ \"{}\" }};\n", key, value));
    }
    // Unknown keys fail the build.
    code.push_str(
        "    ($key:expr) => {{ compile_error!(concat!(\"Missing translation key: \", $key)) }};\n",
    );
    code.push('}');

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    fs::write(Path::new(&out_dir).join("translations.rs"), code)
        .expect("failed to write translations.rs");
}
