pub mod ec2;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{Credentials, TagFilter};
use crate::instance::Instance;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("ec2 error: {0}")]
    Ec2(#[from] ec2::Ec2Error),
}

/// One filtered instance listing.
#[derive(Debug, Clone)]
pub struct DescribeRequest {
    pub credentials: Credentials,
    pub region: String,
    pub tag_filter: TagFilter,
}

/// Where instances come from.
///
/// Implementations make exactly one provider call per `describe_instances`
/// and return instances in provider order.
#[async_trait]
pub trait InstanceSource: Send + Sync {
    fn name(&self) -> &str;
    async fn describe_instances(
        &self,
        request: &DescribeRequest,
    ) -> Result<Vec<Instance>, ProviderError>;
}
