use crate::error::InventoryError;

pub const ACCESS_KEY_ID_VAR: &str = "AWS_ACCESS_KEY_ID";
pub const SECRET_ACCESS_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";

pub const DEFAULT_REGION: &str = "us-east-2";
pub const DEFAULT_TAG_KEY: &str = "Role";
pub const DEFAULT_TAG_VALUE: &str = "webserver";
pub const DEFAULT_SSH_PRIVATE_KEY_FILE: &str = "~/.ssh/ansible-worker.pem";
pub const DEFAULT_SSH_USER: &str = "ubuntu";

/// Tag key/value pair an instance must carry to be listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    pub key: String,
    pub value: String,
}

impl TagFilter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Filter name as EC2 expects it, e.g. `tag:Role`.
    pub fn filter_name(&self) -> String {
        format!("tag:{}", self.key)
    }
}

impl Default for TagFilter {
    fn default() -> Self {
        Self::new(DEFAULT_TAG_KEY, DEFAULT_TAG_VALUE)
    }
}

/// Resolved, non-empty AWS credentials.
///
/// SECURITY: `Debug` must never print either key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &"[REDACTED]")
            .field("secret_access_key", &"[REDACTED]")
            .finish()
    }
}

/// Everything one inventory run needs, populated once at startup.
#[derive(Clone)]
pub struct InventoryConfig {
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub region: String,
    pub tag_filter: TagFilter,
    pub ssh_private_key_file: String,
    pub ssh_user: String,
    /// NOTE: Primarily used for testing with mock servers.
    pub endpoint_url: Option<String>,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            access_key_id: None,
            secret_access_key: None,
            region: DEFAULT_REGION.to_string(),
            tag_filter: TagFilter::default(),
            ssh_private_key_file: DEFAULT_SSH_PRIVATE_KEY_FILE.to_string(),
            ssh_user: DEFAULT_SSH_USER.to_string(),
            endpoint_url: None,
        }
    }
}

impl InventoryConfig {
    pub fn with_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self.secret_access_key = Some(secret_access_key.into());
        self
    }

    // NOTE: Empty values count as missing
    pub fn credentials(&self) -> Result<Credentials, InventoryError> {
        let access_key_id = require(self.access_key_id.as_deref(), ACCESS_KEY_ID_VAR)?;
        let secret_access_key =
            require(self.secret_access_key.as_deref(), SECRET_ACCESS_KEY_VAR)?;

        Ok(Credentials {
            access_key_id,
            secret_access_key,
        })
    }
}

fn require(value: Option<&str>, var: &str) -> Result<String, InventoryError> {
    value
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            InventoryError::Config(format!(
                "AWS credentials are not set: {} is missing or empty",
                var
            ))
        })
}

impl std::fmt::Debug for InventoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InventoryConfig")
            .field("access_key_id", &self.access_key_id.as_ref().map(|_| "[REDACTED]"))
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("region", &self.region)
            .field("tag_filter", &self.tag_filter)
            .field("ssh_private_key_file", &self.ssh_private_key_file)
            .field("ssh_user", &self.ssh_user)
            .field("endpoint_url", &self.endpoint_url)
            .finish()
    }
}
