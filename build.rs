use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

fn emit(key: &str, value: &str) {
    println!("cargo:rustc-env={key}={value}");
}

fn enabled_features() -> String {
    let features = [
        ("default", cfg!(feature = "default")),
        ("cli", cfg!(feature = "cli")),
        ("pinning-api", cfg!(feature = "pinning-api")),
        ("mime-type", cfg!(feature = "mime-type")),
        ("strict", cfg!(feature = "strict")),
    ];

    let enabled: Vec<&str> = features
        .iter()
        .filter(|(_, on)| *on)
        .map(|(name, _)| *name)
        .collect();

    if enabled.is_empty() {
        "none".to_string()
    } else {
        enabled.join(",")
    }
}

/// `git describe` output when building from a checkout, the crate version otherwise.
fn repository_version() -> String {
    std::process::Command::new("git")
        .args(["describe", "--always", "--dirty", "--long", "--tags"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|version| version.trim().to_string())
        .filter(|version| !version.is_empty())
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string())
}

fn main() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    emit("BUILD_FEATURES", &enabled_features());
    emit("BUILD_PROFILE", &profile);
    emit("BUILD_TIMESTAMP", &timestamp);
    emit("REPO_VERSION", &repository_version());
}
