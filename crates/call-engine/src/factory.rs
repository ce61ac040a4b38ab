//! Call factories
//!
//! A factory hands out synthetic addresses from an incrementing pool so no
//! two live calls share an address pair.

use std::net::{Ipv4Addr, SocketAddrV4};

use rand::RngCore;

use crate::call::{Call, CallOptions};
use crate::error::{EngineError, Result};

/// Builder of successive calls
pub trait CallFactory: Send {
    /// Build the next call
    fn create_call(&mut self, options: &CallOptions, rng: &mut dyn RngCore) -> Result<Call>;
}

/// Traffic shape of a run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TrafficMode {
    /// Paired calls between two synthetic addresses
    #[default]
    Mirror,
    /// Calls from one synthetic address to fixed peers
    DrLink(Vec<SocketAddrV4>),
}

impl TrafficMode {
    /// Factory for this traffic, allocating addresses from `start`
    pub fn factory(&self, start: Ipv4Addr) -> Result<Box<dyn CallFactory>> {
        match self {
            Self::Mirror => Ok(Box::new(MirrorCallFactory::new(start))),
            Self::DrLink(peers) => Ok(Box::new(DrLinkCallFactory::new(peers.clone(), start)?)),
        }
    }
}

/// Builds mirror calls between consecutive pool addresses
#[derive(Debug, Clone)]
pub struct MirrorCallFactory {
    pool: u32,
}

impl MirrorCallFactory {
    pub fn new(start: Ipv4Addr) -> Self {
        Self { pool: start.into() }
    }

    /// Next address the pool hands out
    pub fn next_address(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.pool)
    }
}

impl CallFactory for MirrorCallFactory {
    fn create_call(&mut self, options: &CallOptions, rng: &mut dyn RngCore) -> Result<Call> {
        let a = Ipv4Addr::from(self.pool);
        let b = Ipv4Addr::from(self.pool.wrapping_add(1));
        self.pool = self.pool.wrapping_add(2);
        Call::mirror(a, b, options, rng)
    }
}

/// Builds DRLink calls from successive pool addresses
#[derive(Debug, Clone)]
pub struct DrLinkCallFactory {
    peers: Vec<SocketAddrV4>,
    pool: u32,
}

impl DrLinkCallFactory {
    pub fn new(peers: Vec<SocketAddrV4>, start: Ipv4Addr) -> Result<Self> {
        if peers.is_empty() {
            return Err(EngineError::InvalidConfig("DRLink traffic needs at least one peer".into()));
        }
        Ok(Self {
            peers,
            pool: start.into(),
        })
    }

    pub fn peers(&self) -> &[SocketAddrV4] {
        &self.peers
    }

    /// Next address the pool hands out
    pub fn next_address(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.pool)
    }
}

impl CallFactory for DrLinkCallFactory {
    fn create_call(&mut self, options: &CallOptions, rng: &mut dyn RngCore) -> Result<Call> {
        let source = Ipv4Addr::from(self.pool);
        self.pool = self.pool.wrapping_add(1);
        Call::drlink(source, &self.peers, options, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::NullCallLogger;
    use crate::sink::MemorySink;
    use ddgen_audio_core::GeneratorKind;
    use ddgen_codec_core::CodecType;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn options() -> CallOptions {
        CallOptions {
            duration_ms: 100,
            codec: CodecType::G711Pcmu,
            generator: GeneratorKind::SingleTone,
            sink: Arc::new(MemorySink::new()),
            logger: Arc::new(NullCallLogger),
        }
    }

    #[test]
    fn test_mirror_factory_advances_pool_by_two() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut factory = MirrorCallFactory::new(Ipv4Addr::new(172, 24, 101, 254));

        let first = factory.create_call(&options(), &mut rng).unwrap();
        let second = factory.create_call(&options(), &mut rng).unwrap();

        assert_eq!(*first.legs()[0].source().ip(), Ipv4Addr::new(172, 24, 101, 254));
        assert_eq!(*first.legs()[0].destination().ip(), Ipv4Addr::new(172, 24, 101, 255));
        assert_eq!(*second.legs()[0].source().ip(), Ipv4Addr::new(172, 24, 102, 0));
        assert_eq!(*second.legs()[0].destination().ip(), Ipv4Addr::new(172, 24, 102, 1));
        assert_eq!(factory.next_address(), Ipv4Addr::new(172, 24, 102, 2));
    }

    #[test]
    fn test_drlink_factory_advances_pool_by_one() {
        let mut rng = SmallRng::seed_from_u64(6);
        let peers = vec![
            SocketAddrV4::new(Ipv4Addr::new(192, 168, 1, 10), 5000),
            SocketAddrV4::new(Ipv4Addr::new(192, 168, 1, 11), 6000),
        ];
        let mut factory = DrLinkCallFactory::new(peers.clone(), Ipv4Addr::new(10, 0, 0, 1)).unwrap();

        let call = factory.create_call(&options(), &mut rng).unwrap();
        assert_eq!(call.legs().len(), 2);
        assert_eq!(call.legs()[0].source(), SocketAddrV4::new(Ipv4Addr::new(10, 0, 0, 1), 32514));
        assert_eq!(call.legs()[1].source(), SocketAddrV4::new(Ipv4Addr::new(10, 0, 0, 1), 32516));
        assert_eq!(call.legs()[1].destination(), peers[1]);
        assert_eq!(factory.next_address(), Ipv4Addr::new(10, 0, 0, 2));
    }

    #[test]
    fn test_traffic_mode_factory() {
        assert!(TrafficMode::Mirror.factory(Ipv4Addr::LOCALHOST).is_ok());
        assert!(TrafficMode::DrLink(vec![]).factory(Ipv4Addr::LOCALHOST).is_err());
    }
}
