use std::fmt::{Debug, Display};
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::feedback::RoutingError;

pub trait RoutingSystem {
    /// Address of the node on the routing network, MUST be globally unique
    type NodeAddress: Ord + PartialOrd + Display + RootData + RootKey;
    /// Identifier of a local interface, only unique within a single node
    type InterfaceId: Display + RootData + RootKey;
    fn config() -> ProtocolParams {
        Default::default()
    }
}

pub trait RootData: Clone + Debug + Serialize + DeserializeOwned + Sized {}
pub trait RootKey: Eq + PartialEq + Hash {}
impl<T: Eq + PartialEq + Hash> RootKey for T {}
impl<T: Clone + Debug + Serialize + DeserializeOwned + Sized> RootData for T {}

/// Protocol parameters, fixed for the lifetime of a router
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolParams {
    /// Length of one tick, in the same unit as `NodeContext::current_time`. Must be positive.
    pub update_interval: u64,
    /// Advertise routes back out of the interface they were learned from as unreachable
    pub poison_reverse: bool,
    /// Expire routes that were not refreshed within one update interval, and garbage collect them
    pub expiry: bool,
}

impl ProtocolParams {
    pub fn validate(&self) -> Result<(), RoutingError> {
        if self.update_interval == 0 {
            return Err(RoutingError::InvalidUpdateInterval);
        }
        Ok(())
    }
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self {
            update_interval: 5,
            poison_reverse: true,
            expiry: true,
        }
    }
}
