use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The named ports of one transfer-layer store instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferPorts {
    /// Metadata store the transfer layer coordinates through.
    pub redis: u16,
    /// Port the store pushes completion notifications to.
    pub notification: u16,
    /// Port this process listens on for those notifications.
    pub notification_listening: u16,
    /// Data-plane port for direct object writes.
    pub object_writer: u16,
    /// Control-plane RPC port.
    pub grpc: u16,
}

impl Default for TransferPorts {
    fn default() -> Self {
        Self {
            redis: 6380,
            notification: 7777,
            notification_listening: 8888,
            object_writer: 6666,
            grpc: 50055,
        }
    }
}

/// Connection descriptor for the external object-transfer layer.
///
/// The layer itself lives outside this repository; everything here is opaque
/// configuration handed to it at startup. The optimizer only ever reads
/// `enable` indirectly, through which aggregation strategy gets constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Whether delegated aggregation is active at all.
    pub enable: bool,
    /// Network address of the store host.
    pub store_address: String,
    pub ports: TransferPorts,
    /// Local socket path of the shared-memory object store.
    pub plasma_socket: PathBuf,
    /// When set, the layer skips broadcasting updated weights on its own.
    pub skip_update: bool,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            enable: false,
            store_address: "127.0.0.1".to_owned(),
            ports: TransferPorts::default(),
            plasma_socket: PathBuf::from("/tmp/multicast_plasma"),
            skip_update: false,
        }
    }
}
