use crate::concepts::route::NextHop;
use crate::framework::RoutingSystem;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// A single advertised route, copied out of the sender's table
#[derive(Educe, Serialize, Deserialize)]
#[educe(Clone(bound()), Debug(bound()), PartialEq(bound()))]
#[serde(bound = "")]
pub struct RouteUpdate<T: RoutingSystem + ?Sized> {
    pub destination: T::NodeAddress,
    /// the metric the sender advertises, INF for unreachable or poisoned routes
    pub metric: u16,
    /// the sender's own next hop for this destination, it has no meaning on the receiving side
    pub itf: NextHop<T::InterfaceId>,
    pub last_update: u64,
}

/// A full-table update, sent periodically to all neighbours on one interface
#[derive(Educe, Serialize, Deserialize)]
#[educe(Clone(bound()), Debug(bound()), PartialEq(bound()))]
#[serde(bound = "")]
pub struct Advertisement<T: RoutingSystem + ?Sized> {
    /// the router that generated this advertisement
    pub origin: T::NodeAddress,
    pub routes: Vec<RouteUpdate<T>>,
}

#[derive(Educe, Serialize, Deserialize)]
#[educe(Clone(bound()), Debug(bound()))]
#[serde(bound = "")]
pub struct OutboundPacket<T: RoutingSystem + ?Sized> {
    /// broadcast to every neighbour on this interface
    pub itf: T::InterfaceId,
    pub packet: Advertisement<T>,
}
