//! ec2-inventory - Ansible dynamic inventory for tagged EC2 instances
//!
//! Lists instances carrying a tag and reshapes them into the `all` / `_meta`
//! document Ansible expects from an inventory script.

pub mod config;
pub mod error;
pub mod instance;
pub mod inventory;
pub mod output;
pub mod providers;

pub use config::{Credentials, InventoryConfig, TagFilter};
pub use error::InventoryError;
pub use instance::Instance;
pub use inventory::{HostVars, Inventory, build_inventory};
pub use providers::ec2::{Ec2Client, Ec2Error, Ec2Provider};
pub use providers::{DescribeRequest, InstanceSource, ProviderError};
