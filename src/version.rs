//! Build metadata captured by `build.rs`, used for the transport's user agent and the CLI's
//! startup log line.

use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildInfo {
    /// Comma separated cargo features, `none` when built without any.
    pub features: &'static str,
    pub profile: &'static str,
    /// `git describe` of the checkout, or the crate version for builds outside of one.
    pub repo_version: &'static str,
    /// RFC 3339 time of the build.
    pub timestamp: &'static str,
}

pub const BUILD_INFO: BuildInfo = BuildInfo {
    features: env!("BUILD_FEATURES"),
    profile: env!("BUILD_PROFILE"),
    repo_version: env!("REPO_VERSION"),
    timestamp: env!("BUILD_TIMESTAMP"),
};

impl BuildInfo {
    pub fn enabled_features(&self) -> impl Iterator<Item = &'static str> {
        let features = self.features;
        features.split(',').filter(|feature| *feature != "none")
    }
}

impl Display for BuildInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pinlink {} (profile={} built={} features={})",
            self.repo_version, self.profile, self.timestamp, self.features
        )
    }
}

pub fn full_version() -> String {
    BUILD_INFO.to_string()
}

pub fn minimal_version() -> String {
    BUILD_INFO.repo_version.to_string()
}

/// Sent by [`ReqwestTransport`](crate::api::ReqwestTransport) with every request.
pub fn user_agent() -> String {
    format!("pinlink/{}", BUILD_INFO.repo_version)
}
