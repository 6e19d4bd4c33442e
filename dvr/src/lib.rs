//! An I/O free distance-vector routing table engine.
//!
//! A [`router::Router`] learns the cost to every destination purely from periodic advertisements
//! exchanged with directly connected neighbours. The host drives it through a
//! [`concepts::interface::NodeContext`]: it calls [`router::Router::full_update`] once per tick,
//! delivers the queued [`concepts::packet::OutboundPacket`]s, and hands every received
//! advertisement to [`router::Router::handle_advertisement`].

pub mod concepts;
pub mod feedback;
pub mod framework;
pub mod router;
pub mod util;
