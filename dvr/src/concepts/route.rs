use crate::framework::RoutingSystem;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Raw interface value of a route to the local node
pub const LOCAL: i32 = -1;
/// Raw interface value returned when there is no usable route
pub const UNKNOWN: i32 = -2;

/// Where traffic for a destination is forwarded
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NextHop<I> {
    /// the destination is this node, no interface is needed
    Local,
    /// no route, or the route is unreachable
    Unknown,
    /// forward out of this local interface
    Via(I),
}

impl<I> NextHop<I> {
    pub fn interface(&self) -> Option<&I> {
        match self {
            NextHop::Via(itf) => Some(itf),
            _ => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, NextHop::Unknown)
    }
}

impl NextHop<i32> {
    /// Encodes the next hop for hosts that use integer interface ids.
    /// Interface ids must be non-negative, negative values are reserved for LOCAL and UNKNOWN.
    pub fn to_raw(self) -> i32 {
        match self {
            NextHop::Local => LOCAL,
            NextHop::Unknown => UNKNOWN,
            NextHop::Via(itf) => {
                debug_assert!(itf >= 0, "interface id {itf} collides with the reserved sentinels");
                itf
            }
        }
    }

    /// Negative values other than LOCAL are treated as UNKNOWN
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            LOCAL => NextHop::Local,
            x if x < 0 => NextHop::Unknown,
            x => NextHop::Via(x),
        }
    }
}

impl<I: Display> Display for NextHop<I> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NextHop::Local => write!(f, "{}", LOCAL),
            NextHop::Unknown => write!(f, "{}", UNKNOWN),
            NextHop::Via(itf) => write!(f, "{}", itf),
        }
    }
}

/// A single row of the routing table
#[derive(Educe, Serialize, Deserialize)]
#[educe(Clone(bound()), Debug(bound()), PartialEq(bound()))]
#[serde(bound = "")]
pub struct Route<T: RoutingSystem + ?Sized> {
    pub destination: T::NodeAddress,
    /// the interface that leads to the next hop, `Local` for the self route
    pub next_hop: NextHop<T::InterfaceId>,
    /// the cost to reach the destination, INF if unreachable
    pub metric: u16,
    /// the last time the metric was confirmed or changed
    pub last_update: u64,
    /// when this route may be deleted, only set while the metric is INF
    pub gc_deadline: Option<u64>,
}

impl<T: RoutingSystem + ?Sized> Route<T> {
    pub fn new(
        destination: T::NodeAddress,
        next_hop: NextHop<T::InterfaceId>,
        metric: u16,
        last_update: u64,
    ) -> Self {
        Self {
            destination,
            next_hop,
            metric,
            last_update,
            gc_deadline: None,
        }
    }
}

impl<T: RoutingSystem + ?Sized> Display for Route<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "d {} i {} m {}", self.destination, self.next_hop, self.metric)
    }
}
