mod client;
mod error;

pub use client::Ec2Client;
pub use error::Ec2Error;

use async_trait::async_trait;

use super::{DescribeRequest, InstanceSource, ProviderError};
use crate::instance::Instance;

#[derive(Debug, Clone, Default)]
pub struct Ec2Provider {
    endpoint_url: Option<String>,
}

impl Ec2Provider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint_url(endpoint_url: Option<String>) -> Self {
        Self { endpoint_url }
    }
}

#[async_trait]
impl InstanceSource for Ec2Provider {
    fn name(&self) -> &str {
        "ec2"
    }

    async fn describe_instances(
        &self,
        request: &DescribeRequest,
    ) -> Result<Vec<Instance>, ProviderError> {
        let client = Ec2Client::with_endpoint_url(
            &request.credentials,
            &request.region,
            self.endpoint_url.as_deref(),
        )
        .await;

        tracing::debug!(
            region = %request.region,
            filter = %request.tag_filter.filter_name(),
            value = %request.tag_filter.value,
            "describing instances"
        );

        let instances = client
            .describe_tagged_instances(&request.tag_filter)
            .await?;

        tracing::info!(count = instances.len(), "instances discovered");

        Ok(instances)
    }
}
