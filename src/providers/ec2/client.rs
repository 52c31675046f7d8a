use aws_config::BehaviorVersion;
use aws_config::retry::RetryConfig;
use aws_sdk_ec2::Client;
use aws_sdk_ec2::config::Region;
use aws_sdk_ec2::types::Filter;

use super::Ec2Error;
use crate::config::{Credentials, TagFilter};
use crate::instance::Instance;

const CREDENTIALS_PROVIDER_NAME: &str = "ec2-inventory";

#[derive(Clone)]
pub struct Ec2Client {
    client: Client,
    region: String,
}

impl Ec2Client {
    pub async fn new(credentials: &Credentials, region: &str) -> Self {
        Self::with_endpoint_url(credentials, region, None).await
    }

    /// NOTE: Primarily used for testing with mock servers.
    pub async fn with_endpoint_url(
        credentials: &Credentials,
        region: &str,
        endpoint_url: Option<&str>,
    ) -> Self {
        let static_credentials = aws_sdk_ec2::config::Credentials::new(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.clone(),
            None,
            None,
            CREDENTIALS_PROVIDER_NAME,
        );

        // NOTE: A single attempt; provider failures surface immediately
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .credentials_provider(static_credentials)
            .retry_config(RetryConfig::disabled());

        if let Some(url) = endpoint_url {
            loader = loader.endpoint_url(url);
        }

        let sdk_config = loader.load().await;

        Self {
            client: Client::new(&sdk_config),
            region: region.to_string(),
        }
    }

    /// Single `DescribeInstances` call. Only the first page is read.
    pub async fn describe_tagged_instances(
        &self,
        tag_filter: &TagFilter,
    ) -> Result<Vec<Instance>, Ec2Error> {
        let resp = self
            .client
            .describe_instances()
            .filters(
                Filter::builder()
                    .name(tag_filter.filter_name())
                    .values(&tag_filter.value)
                    .build(),
            )
            .send()
            .await
            .map_err(Ec2Error::from_sdk)?;

        if resp.next_token().is_some() {
            tracing::debug!("additional result pages not requested");
        }

        let mut instances = Vec::new();

        for reservation in resp.reservations() {
            for instance in reservation.instances() {
                let Some(instance_id) = instance.instance_id() else {
                    tracing::warn!(
                        reservation_id = reservation.reservation_id().unwrap_or_default(),
                        "skipping instance without an instance id"
                    );
                    continue;
                };

                instances.push(Instance {
                    instance_id: instance_id.to_string(),
                    public_dns_name: instance.public_dns_name().map(|s| s.to_string()),
                    public_ip_address: instance.public_ip_address().map(|s| s.to_string()),
                });
            }
        }

        Ok(instances)
    }
}

impl std::fmt::Debug for Ec2Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ec2Client")
            .field("region", &self.region)
            .field("credentials", &"[REDACTED]")
            .finish()
    }
}
