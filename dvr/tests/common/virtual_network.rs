use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use dvr::concepts::interface::NodeContext;
use dvr::concepts::packet::Advertisement;
use dvr::concepts::route::NextHop;
use dvr::framework::{ProtocolParams, RoutingSystem};
use dvr::router::Router;

#[derive(Serialize, Deserialize, Clone)]
pub struct VirtualLink {
    pub a: String,
    pub b: String,
    pub weight: u16,
    pub up: bool,
}

/// The view a single node has of the shared links
pub struct VirtualContext<'a> {
    pub address: &'a str,
    pub links: &'a BTreeMap<i32, VirtualLink>,
    pub time: u64,
}

impl NodeContext<VirtualSystem> for VirtualContext<'_> {
    fn local_address(&self) -> String {
        self.address.to_string()
    }

    fn current_time(&self) -> u64 {
        self.time
    }

    fn interfaces(&self) -> Vec<i32> {
        self.links
            .iter()
            .filter(|(_, link)| link.a == self.address || link.b == self.address)
            .map(|(id, _)| *id)
            .collect()
    }

    fn interface_is_up(&self, itf: &i32) -> bool {
        self.links.get(itf).is_some_and(|link| link.up)
    }

    fn link_weight(&self, itf: &i32) -> u16 {
        self.links.get(itf).map_or(u16::MAX, |link| link.weight)
    }
}

#[derive(Serialize, Deserialize)]
pub struct VirtualSystem{
    pub routers: Vec<Router<VirtualSystem>>,
    pub links: BTreeMap<i32, VirtualLink>,
    /// destination node, (packet, link it arrives on)
    pub packets: BTreeMap<String, Vec<(Advertisement<VirtualSystem>, i32)>>,
    pub time: u64,
}

impl VirtualSystem{
    pub fn create(nodes: &[&str], links: &[(i32, &str, &str, u16)], params: ProtocolParams) -> VirtualSystem{
        let routers = nodes.iter().map(|id|{
            Router::new(id.to_string(), params.clone()).expect("Invalid protocol parameters")
        }).collect();
        let links = links.iter().map(|(lid, a, b, weight)| {
            (*lid, VirtualLink{
                a: a.to_string(),
                b: b.to_string(),
                weight: *weight,
                up: true,
            })
        }).collect();
        VirtualSystem{
            routers,
            links,
            packets: Default::default(),
            time: 0,
        }
    }

    fn interval(&self) -> u64 {
        self.routers.first().map_or(1, |r| r.params.update_interval)
    }

    pub fn update_edge(&mut self, edge_id: i32, weight: u16){
        self.links.entry(edge_id).and_modify(|edge| {
            edge.weight = weight
        });
    }

    pub fn set_edge_up(&mut self, edge_id: i32, up: bool){
        self.links.entry(edge_id).and_modify(|edge| {
            edge.up = up
        });
    }

    pub fn context_for<'a>(&'a self, node: &'a str) -> VirtualContext<'a>{
        VirtualContext{
            address: node,
            links: &self.links,
            time: self.time,
        }
    }

    pub fn get_node(&self, node: &str) -> &Router<Self>{
        self.routers.iter().find(|r| r.address == node).unwrap_or_else(|| panic!("No node {node} found"))
    }

    pub fn get_next_hop(&self, cur: &str, dest: &str) -> NextHop<i32>{
        self.get_node(cur).get_next_hop(&dest.to_string())
    }

    pub fn get_metric_to(&self, cur: &str, dest: &str) -> u16{
        self.get_node(cur).get_metric(&dest.to_string())
    }

    pub fn has_route(&self, cur: &str, dest: &str) -> bool{
        self.get_node(cur).get_route(&dest.to_string()).is_some()
    }

    pub fn get_route_gc(&self, cur: &str, dest: &str) -> Option<u64>{
        self.get_node(cur).get_route(&dest.to_string()).and_then(|route| route.gc_deadline)
    }

    pub fn flush_packets(&mut self){
        for router in &mut self.routers{
            for packet in router.outbound_packets.drain(..){
                if let Some(link) = self.links.get(&packet.itf) {
                    let dest = if link.a == router.address { &link.b } else { &link.a };
                    self.packets.entry(dest.clone()).or_default().push((packet.packet, packet.itf));
                }
            }
        }
    }

    /// delivers the packets sent last tick, then runs a full update on every router
    pub fn tick(&mut self){
        let packets = std::mem::take(&mut self.packets);
        for router in &mut self.routers{
            let address = router.address.clone();
            let ctx = VirtualContext{
                address: &address,
                links: &self.links,
                time: self.time,
            };
            if let Some(packets) = packets.get(&router.address){
                for (packet, link) in packets{
                    // packets in flight are lost when the link goes down
                    if ctx.interface_is_up(link) {
                        router.handle_advertisement(&ctx, packet, link);
                    }
                }
            }
            router.full_update(&ctx);
        }
        self.flush_packets();
        self.time += self.interval();
    }

    pub fn tick_n(&mut self, times: i32){
        for _ in 0..times{
            self.tick();
        }
    }

    pub fn freeze(&mut self) -> String{
        serde_json::to_string(&self).unwrap()
    }

    pub fn restore(state: String) -> VirtualSystem{
        serde_json::from_str(&state).unwrap()
    }
}

impl RoutingSystem for VirtualSystem{
    type NodeAddress = String;
    type InterfaceId = i32;
}
