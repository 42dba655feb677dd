/// A single parsed measurement line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeRecord {
    /// Number of TTL hops between the prober and the responder
    pub ttl_delta: u32,
    /// Timestamp option overflow counter reported by the responder
    pub overflow: u32,
}
