use crate::concepts::interface::NodeContext;
use crate::concepts::packet::{Advertisement, OutboundPacket, RouteUpdate};
use crate::concepts::route::{NextHop, Route};
use crate::feedback::{RoutingError, RoutingWarning};
use crate::framework::{ProtocolParams, RoutingSystem};
use crate::util::{clamp_inf, sum_inf};
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_with::serde_as;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// Metric of an unreachable destination. This is a protocol sentinel, not a distance.
pub const INF: u16 = 60;
/// Unreachable routes are kept for this many update intervals before they are deleted
pub const GC_INTERVALS: u64 = 4;

#[serde_as]
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Router<T: RoutingSystem + ?Sized> {
    pub address: T::NodeAddress,
    pub params: ProtocolParams,
    /// Destination, Route
    #[serde_as(as = "Vec<(_, _)>")]
    routes: HashMap<T::NodeAddress, Route<T>>,
    pub outbound_packets: Vec<OutboundPacket<T>>,
    /// Anomalies seen while handling advertisements, the host should drain this like `outbound_packets`
    #[serde(skip_serializing, skip_deserializing)]
    pub warnings: Vec<RoutingWarning<T>>,
}

impl<T: RoutingSystem> Router<T> {
    pub fn new(address: T::NodeAddress, params: ProtocolParams) -> Result<Self, RoutingError> {
        params.validate()?;
        let mut router = Self {
            address,
            params,
            routes: HashMap::new(),
            outbound_packets: Vec::new(),
            warnings: Vec::new(),
        };
        router.initialise();
        Ok(router)
    }

    /// creates a router using the system's default parameters
    pub fn with_defaults(address: T::NodeAddress) -> Result<Self, RoutingError> {
        Self::new(address, T::config())
    }

    pub fn from_context<C: NodeContext<T>>(
        ctx: &C,
        params: ProtocolParams,
    ) -> Result<Self, RoutingError> {
        Self::new(ctx.local_address(), params)
    }

    /// Inserts the self route. Calling this again resets the self route, other routes are left untouched.
    pub fn initialise(&mut self) {
        let route = Route::new(self.address.clone(), NextHop::Local, 0, INF as u64);
        self.routes.insert(self.address.clone(), route);
    }

    /// performs the periodic tick, ages the table and then broadcasts routes to neighbours
    pub fn full_update<C: NodeContext<T>>(&mut self, ctx: &C) {
        self.tidy_table(ctx);
        self.broadcast_routes(ctx);
    }

    // region Lookup

    /// The interface to forward traffic for `dest` on, UNKNOWN if there is no finite route
    pub fn get_next_hop(&self, dest: &T::NodeAddress) -> NextHop<T::InterfaceId> {
        match self.routes.get(dest) {
            Some(route) if route.metric < INF => route.next_hop.clone(),
            _ => NextHop::Unknown,
        }
    }

    /// The stored metric to `dest`, INF if there is no route
    pub fn get_metric(&self, dest: &T::NodeAddress) -> u16 {
        self.routes.get(dest).map_or(INF, |route| route.metric)
    }

    pub fn get_route(&self, dest: &T::NodeAddress) -> Option<&Route<T>> {
        self.routes.get(dest)
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route<T>> {
        self.routes.values()
    }

    /// Owned copy of every route, it stays valid while the table changes
    pub fn entries(&self) -> Vec<Route<T>> {
        self.routes.values().cloned().collect()
    }

    pub fn dump(&self) -> String {
        self.to_string()
    }
    // endregion

    // region Aging

    /// Expires stale routes and garbage collects unreachable ones
    pub fn tidy_table<C: NodeContext<T>>(&mut self, ctx: &C) {
        let time = ctx.current_time();
        let interval = self.params.update_interval;

        if !self.routes.contains_key(&self.address) {
            self.initialise();
        }
        if let Some(route) = self.routes.get_mut(&self.address) {
            route.last_update = time;
        }

        let mut to_delete = Vec::new();
        for (addr, route) in self.routes.iter_mut() {
            if *addr == self.address {
                continue; // the self route never expires
            }

            if let NextHop::Via(itf) = &route.next_hop {
                if !ctx.interface_is_up(itf) {
                    if route.metric != INF {
                        debug!("Interface {itf} is down, retracting route to {}", json!(addr));
                    }
                    route.metric = INF;
                }
            }

            if self.params.expiry && time >= route.last_update.saturating_add(interval) {
                if route.metric != INF {
                    debug!("Route to {} expired, last updated at {}", json!(addr), route.last_update);
                }
                route.metric = INF;
            }

            if route.metric == INF && self.params.expiry {
                match route.gc_deadline {
                    None => {
                        let deadline = time.saturating_add(GC_INTERVALS * interval);
                        trace!("Scheduled route to {} for deletion at {deadline}", json!(addr));
                        route.gc_deadline = Some(deadline);
                    }
                    Some(deadline) if deadline <= time => to_delete.push(addr.clone()),
                    Some(_) => {}
                }
            }
        }

        for addr in to_delete {
            debug!("Deleted route to {}", json!(addr));
            self.routes.remove(&addr);
        }
    }
    // endregion

    // region Advertisement

    /// Snapshot of the table to send out of `itf`, None if the interface is down
    pub fn generate_advertisement<C: NodeContext<T>>(
        &self,
        ctx: &C,
        itf: &T::InterfaceId,
    ) -> Option<Advertisement<T>> {
        if !ctx.interface_is_up(itf) {
            return None;
        }
        let mut routes: Vec<RouteUpdate<T>> = self
            .routes
            .values()
            .map(|route| {
                // poison reverse, never advertise a route back to where it was learned from
                let poisoned = self.params.poison_reverse && route.next_hop.interface() == Some(itf);
                RouteUpdate {
                    destination: route.destination.clone(),
                    metric: if poisoned { INF } else { route.metric },
                    itf: route.next_hop.clone(),
                    last_update: route.last_update,
                }
            })
            .collect();
        routes.sort_by(|a, b| a.destination.cmp(&b.destination));
        Some(Advertisement {
            origin: self.address.clone(),
            routes,
        })
    }

    /// writes an advertisement to the outbound packet queue for every interface that is up
    pub fn broadcast_routes<C: NodeContext<T>>(&mut self, ctx: &C) {
        for itf in ctx.interfaces() {
            if let Some(packet) = self.generate_advertisement(ctx, &itf) {
                self.outbound_packets.push(OutboundPacket { itf, packet });
            }
        }
    }
    // endregion

    // region Relaxation

    /// handle an advertisement received on `itf`
    pub fn handle_advertisement<C: NodeContext<T>>(
        &mut self,
        ctx: &C,
        advertisement: &Advertisement<T>,
        itf: &T::InterfaceId,
    ) {
        if advertisement.origin == self.address {
            warn!("Dropped our own advertisement received on interface {itf}");
            self.warnings.push(RoutingWarning::OwnAdvertisement { itf: itf.clone() });
            return;
        }

        let weight = ctx.link_weight(itf);
        let time = ctx.current_time();
        for update in &advertisement.routes {
            self.handle_route_update(update, itf, weight, time);
        }
    }

    fn handle_route_update(&mut self, update: &RouteUpdate<T>, itf: &T::InterfaceId, weight: u16, time: u64) {
        let dest = &update.destination;
        if *dest == self.address {
            return; // we can safely ignore a route to ourself
        }

        if update.metric > INF {
            warn!("Advertised metric {} for {} on interface {itf} exceeds INF", update.metric, json!(dest));
            self.warnings.push(RoutingWarning::MetricOutOfRange {
                destination: dest.clone(),
                metric: update.metric,
            });
        }
        let metric = sum_inf(clamp_inf(update.metric), weight);

        match self.routes.get_mut(dest) {
            None => {
                // unreachable destinations we never heard of are not worth a table entry
                if metric < INF {
                    debug!("Learned route to {} via {itf} with metric {metric}", json!(dest));
                    let route = Route::new(dest.clone(), NextHop::Via(itf.clone()), metric, time);
                    self.routes.insert(dest.clone(), route);
                }
            }
            Some(route) if route.next_hop.interface() == Some(itf) => {
                // the current next hop is authoritative, even if the route got worse
                route.metric = metric;
                route.last_update = time;
                if metric != INF {
                    route.gc_deadline = None;
                }
            }
            Some(route) if metric < route.metric => {
                debug!(
                    "Switched route to {} from {} to {itf}, metric {} -> {metric}",
                    json!(dest),
                    route.next_hop,
                    route.metric
                );
                route.next_hop = NextHop::Via(itf.clone());
                route.metric = metric;
                route.last_update = time;
                route.gc_deadline = None;
            }
            Some(_) => {}
        }
    }
    // endregion
}

impl<T: RoutingSystem> Display for Router<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Router {}", self.address)?;
        let mut routes: Vec<&Route<T>> = self.routes.values().collect();
        routes.sort_by(|a, b| a.destination.cmp(&b.destination));
        for route in routes {
            writeln!(f, "{route}")?;
        }
        Ok(())
    }
}
