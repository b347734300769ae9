use heapless::Vec;
use crate::resources::ResourceId;

/// One failed bus operation during `init` or `deinit`.
#[derive(Debug, PartialEq)]
pub struct BusFailure<E> {
    pub resource: ResourceId,
    pub error: E,
}

pub type BusFailures<E> = Vec<BusFailure<E>, { ResourceId::COUNT }>;

#[derive(Debug, PartialEq)]
pub enum BoardError<E, P> {
    /// At least one enabled bus could not be created; the rest were rolled back.
    HardwareInit(BusFailures<E>),
    /// Teardown completed but some buses reported an error on release.
    HardwareDeinit(BusFailures<E>),
    Gpio(P),
    InvalidResource(ResourceId),
}
