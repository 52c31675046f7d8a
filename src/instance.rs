/// The slice of an EC2 instance the inventory cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub instance_id: String,
    pub public_dns_name: Option<String>,
    pub public_ip_address: Option<String>,
}

impl Instance {
    pub fn new(instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            public_dns_name: None,
            public_ip_address: None,
        }
    }

    pub fn with_public_dns_name(mut self, dns: impl Into<String>) -> Self {
        self.public_dns_name = Some(dns.into());
        self
    }

    pub fn with_public_ip_address(mut self, ip: impl Into<String>) -> Self {
        self.public_ip_address = Some(ip.into());
        self
    }

    /// Inventory hostname: public DNS name, else the instance id.
    pub fn host_id(&self) -> &str {
        non_empty(self.public_dns_name.as_deref()).unwrap_or(&self.instance_id)
    }

    /// Connection address: public IP, else the instance id.
    pub fn address(&self) -> &str {
        non_empty(self.public_ip_address.as_deref()).unwrap_or(&self.instance_id)
    }
}

// NOTE: EC2 reports `<dnsName/>` for instances without a public name
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
