pub mod config;
pub mod tag;

pub use config::{TransferConfig, TransferPorts};
pub use tag::TransferTag;
