use clap::Parser;

use ec2_inventory::config::{
    DEFAULT_REGION, DEFAULT_SSH_PRIVATE_KEY_FILE, DEFAULT_SSH_USER, DEFAULT_TAG_KEY,
    DEFAULT_TAG_VALUE,
};
use ec2_inventory::{InventoryConfig, TagFilter};

/// Ansible dynamic inventory for EC2 instances selected by tag.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Print the full inventory (the default)
    #[arg(long, conflicts_with = "host")]
    pub list: bool,

    /// Print the variables of a single host
    #[arg(long, value_name = "HOSTNAME")]
    pub host: Option<String>,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

#[derive(clap::Args, Debug)]
pub struct SettingsArgs {
    #[arg(long, env = "AWS_ACCESS_KEY_ID", hide_env_values = true)]
    pub access_key_id: Option<String>,

    #[arg(long, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub secret_access_key: Option<String>,

    #[arg(long, env = "EC2_INVENTORY_REGION", default_value = DEFAULT_REGION)]
    pub region: String,

    #[arg(long, env = "EC2_INVENTORY_TAG_KEY", default_value = DEFAULT_TAG_KEY)]
    pub tag_key: String,

    #[arg(long, env = "EC2_INVENTORY_TAG_VALUE", default_value = DEFAULT_TAG_VALUE)]
    pub tag_value: String,

    #[arg(
        long,
        env = "EC2_INVENTORY_SSH_KEY_FILE",
        default_value = DEFAULT_SSH_PRIVATE_KEY_FILE
    )]
    pub ssh_key_file: String,

    #[arg(long, env = "EC2_INVENTORY_SSH_USER", default_value = DEFAULT_SSH_USER)]
    pub ssh_user: String,

    #[arg(long, env = "EC2_INVENTORY_ENDPOINT_URL", hide = true)]
    pub endpoint_url: Option<String>,
}

impl From<SettingsArgs> for InventoryConfig {
    fn from(args: SettingsArgs) -> Self {
        InventoryConfig {
            access_key_id: args.access_key_id,
            secret_access_key: args.secret_access_key,
            region: args.region,
            tag_filter: TagFilter::new(args.tag_key, args.tag_value),
            ssh_private_key_file: args.ssh_key_file,
            ssh_user: args.ssh_user,
            endpoint_url: args.endpoint_url,
        }
    }
}
