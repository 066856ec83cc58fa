//! Object storage connection settings

use std::env;
use std::fmt;

use super::environment::Environment;

/// Environment variable holding the S3-compatible endpoint URL
pub const ENDPOINT_VAR: &str = "CLOUDFLARE_R2_ENDPOINT";
/// Environment variable holding the access key id
pub const ACCESS_KEY_ID_VAR: &str = "CLOUDFLARE_R2_ACCESS_KEY_ID";
/// Environment variable holding the secret access key
pub const SECRET_ACCESS_KEY_VAR: &str = "CLOUDFLARE_R2_SECRET_ACCESS_KEY";
/// Environment variable holding the bucket name
pub const BUCKET_NAME_VAR: &str = "CLOUDFLARE_R2_BUCKET_NAME";
/// Optional environment variable forcing path-style bucket addressing
pub const FORCE_PATH_STYLE_VAR: &str = "CLOUDFLARE_R2_FORCE_PATH_STYLE";

/// Settings required to sign requests against the bucket
///
/// Every connection value is optional so the service can boot without them.
/// Missing values surface as signing failures on first use.
#[derive(Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// S3-compatible endpoint URL
    pub endpoint: Option<String>,
    /// Access key id
    pub access_key_id: Option<String>,
    /// Secret access key
    pub secret_access_key: Option<String>,
    /// Bucket holding uploaded images
    pub bucket_name: Option<String>,
    /// Signing region (`auto` for R2)
    pub region: String,
    /// Address the bucket in the URL path instead of the host name
    pub force_path_style: bool,
}

impl StorageConfig {
    /// Region R2 expects in signatures
    pub const DEFAULT_REGION: &'static str = "auto";

    /// Creates a fully populated configuration
    #[must_use]
    pub fn new(
        endpoint: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        bucket_name: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            access_key_id: Some(access_key_id.into()),
            secret_access_key: Some(secret_access_key.into()),
            bucket_name: Some(bucket_name.into()),
            region: Self::DEFAULT_REGION.to_string(),
            force_path_style: false,
        }
    }

    /// Sets path-style addressing
    #[must_use]
    pub fn with_force_path_style(mut self, force_path_style: bool) -> Self {
        self.force_path_style = force_path_style;
        self
    }

    /// Reads the `CLOUDFLARE_R2_*` variables, applying the environment's defaults
    #[must_use]
    pub fn from_env(environment: &Environment) -> Self {
        let force_path_style = non_empty_var(FORCE_PATH_STYLE_VAR).map_or_else(
            || environment.default_force_path_style(),
            |val| matches!(val.to_lowercase().as_str(), "1" | "true" | "yes"),
        );

        Self {
            endpoint: non_empty_var(ENDPOINT_VAR)
                .or_else(|| environment.default_storage_endpoint().map(str::to_string)),
            access_key_id: non_empty_var(ACCESS_KEY_ID_VAR),
            secret_access_key: non_empty_var(SECRET_ACCESS_KEY_VAR),
            bucket_name: non_empty_var(BUCKET_NAME_VAR),
            region: Self::DEFAULT_REGION.to_string(),
            force_path_style,
        }
    }

    /// Names of the variables that are still unset
    #[must_use]
    pub fn missing_variables(&self) -> Vec<&'static str> {
        [
            (ENDPOINT_VAR, self.endpoint.is_none()),
            (ACCESS_KEY_ID_VAR, self.access_key_id.is_none()),
            (SECRET_ACCESS_KEY_VAR, self.secret_access_key.is_none()),
            (BUCKET_NAME_VAR, self.bucket_name.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, missing)| missing.then_some(name))
        .collect()
    }
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("endpoint", &self.endpoint)
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "<redacted>"),
            )
            .field("bucket_name", &self.bucket_name)
            .field("region", &self.region)
            .field("force_path_style", &self.force_path_style)
            .finish()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}
