use educe::Educe;
use thiserror::Error;
use crate::framework::RoutingSystem;

/// Errors returned when a router cannot be constructed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    /// The tick length is used for expiry and garbage collection, a zero interval would expire every route immediately
    #[error("The update interval must be a positive integer.")]
    InvalidUpdateInterval,
}

/// Although this is an error enum, these should be treated as warnings.
#[derive(Error)]
#[derive(Educe)]
#[educe(Debug(bound()), Clone(bound()))]
pub enum RoutingWarning<T: RoutingSystem + ?Sized> {
    /// A neighbour advertised a metric above INF. No valid metric may exceed INF.
    /// If this warning is triggered, the metric is clamped to INF before relaxation.
    #[error("Advertised metric {metric} for {destination} exceeds INF, clamping.")]
    MetricOutOfRange {
        destination: T::NodeAddress,
        metric: u16,
    },
    /// An advertisement that originated from this router came back over an interface.
    /// This usually means the broadcast medium loops back; the advertisement is dropped.
    #[error("Dropped our own advertisement received on interface {itf}.")]
    OwnAdvertisement {
        itf: T::InterfaceId,
    },
}
