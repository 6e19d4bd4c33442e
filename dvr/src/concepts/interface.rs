use crate::framework::RoutingSystem;

/// The node hosting a router. Owns the interfaces, their link weights and the clock.
///
/// The router only reads from the context. If the state behind it is shared between threads,
/// the host is responsible for synchronizing it.
pub trait NodeContext<T: RoutingSystem + ?Sized> {
    /// Address of this node on the routing network
    fn local_address(&self) -> T::NodeAddress;
    /// Monotonic time, in the same unit as `ProtocolParams::update_interval`
    fn current_time(&self) -> u64;
    /// All local interfaces, including the ones that are currently down
    fn interfaces(&self) -> Vec<T::InterfaceId>;
    fn interface_is_up(&self, itf: &T::InterfaceId) -> bool;
    /// Cost of crossing the link behind this interface. Lower is better.
    /// Calculate the link cost offline, this method should not perform I/O
    fn link_weight(&self, itf: &T::InterfaceId) -> u16;
}
