use std::sync::Mutex;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use rand::Rng;
use us_shared::config::IdentityConfig;

use crate::domain::entities::account::AccountId;
use crate::errors::{DomainError, ValidationError};

/// Custom epoch in milliseconds since the Unix epoch (2010-11-04T01:42:54.657Z)
pub const EPOCH_MS: u64 = 1_288_834_974_657;

const NODE_BITS: u32 = 10;
const SEQUENCE_BITS: u32 = 12;

pub const MAX_NODE_ID: u16 = (1 << NODE_BITS) - 1;
pub const MAX_SEQUENCE: u64 = (1 << SEQUENCE_BITS) - 1;

/// The three components packed into an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdParts {
    /// Milliseconds since [`EPOCH_MS`]
    pub timestamp_ms: u64,
    pub node_id: u16,
    pub sequence: u64,
}

#[derive(Debug)]
struct GeneratorState {
    last_ms: u64,
    sequence: u64,
}

/// Generator of unique, time-ordered 64-bit identifiers
///
/// Layout, high to low: 41 bits of milliseconds since [`EPOCH_MS`], 10 bits
/// of node id, 12 bits of per-millisecond sequence. The top bit is always
/// clear.
///
/// Time is read as the wall clock at construction plus a monotonic offset,
/// so a wall-clock step backwards cannot produce a smaller identifier.
#[derive(Debug)]
pub struct IdentityIdGenerator {
    node_id: u16,
    start_ms: u64,
    start: Instant,
    state: Mutex<GeneratorState>,
}

impl IdentityIdGenerator {
    /// Creates a generator for the given node id (0-1023)
    pub fn new(node_id: u16) -> Result<Self, DomainError> {
        if node_id > MAX_NODE_ID {
            return Err(ValidationError::NodeIdOutOfRange {
                node_id,
                max: MAX_NODE_ID,
            }
            .into());
        }

        let since_unix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| DomainError::Internal {
                message: format!("System clock is before the Unix epoch: {}", e),
            })?;
        let start_ms = (since_unix.as_millis() as u64).saturating_sub(EPOCH_MS);

        Ok(Self {
            node_id,
            start_ms,
            start: Instant::now(),
            state: Mutex::new(GeneratorState {
                last_ms: 0,
                sequence: 0,
            }),
        })
    }

    /// Creates a generator from configuration, picking a random node id in
    /// 1..=1023 when none is configured
    pub fn from_config(config: &IdentityConfig) -> Result<Self, DomainError> {
        let node_id = config
            .node_id
            .unwrap_or_else(|| rand::thread_rng().gen_range(1..=MAX_NODE_ID));
        Self::new(node_id)
    }

    pub fn node_id(&self) -> u16 {
        self.node_id
    }

    /// Produces the next identifier
    ///
    /// Strictly increasing for one generator. When the sequence for the
    /// current millisecond is used up, waits for the next millisecond.
    pub fn generate(&self) -> AccountId {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut now = self.now_ms().max(state.last_ms);

        if now == state.last_ms {
            state.sequence = (state.sequence + 1) & MAX_SEQUENCE;
            if state.sequence == 0 {
                while now <= state.last_ms {
                    std::hint::spin_loop();
                    now = self.now_ms();
                }
            }
        } else {
            state.sequence = 0;
        }

        state.last_ms = now;

        AccountId::new(
            (now << (NODE_BITS + SEQUENCE_BITS))
                | (u64::from(self.node_id) << SEQUENCE_BITS)
                | state.sequence,
        )
    }

    /// Splits an identifier back into its components
    pub fn decompose(id: AccountId) -> IdParts {
        let raw = id.value();
        IdParts {
            timestamp_ms: raw >> (NODE_BITS + SEQUENCE_BITS),
            node_id: ((raw >> SEQUENCE_BITS) & u64::from(MAX_NODE_ID)) as u16,
            sequence: raw & MAX_SEQUENCE,
        }
    }

    fn now_ms(&self) -> u64 {
        self.start_ms + self.start.elapsed().as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_rejects_node_id_above_range() {
        let result = IdentityIdGenerator::new(1024);
        assert!(matches!(
            result,
            Err(DomainError::Validation(ValidationError::NodeIdOutOfRange { .. }))
        ));
        assert!(IdentityIdGenerator::new(1023).is_ok());
        assert!(IdentityIdGenerator::new(0).is_ok());
    }

    #[test]
    fn test_random_node_id_when_unset() {
        let generator = IdentityIdGenerator::from_config(&IdentityConfig::default()).unwrap();
        assert!((1..=MAX_NODE_ID).contains(&generator.node_id()));

        let configured = IdentityConfig { node_id: Some(42) };
        let generator = IdentityIdGenerator::from_config(&configured).unwrap();
        assert_eq!(generator.node_id(), 42);
    }

    #[test]
    fn test_id_layout() {
        let generator = IdentityIdGenerator::new(513).unwrap();
        let id = generator.generate();
        let parts = IdentityIdGenerator::decompose(id);

        assert_eq!(parts.node_id, 513);
        assert_eq!(parts.sequence, 0);
        assert!(id.value() < (1 << 63));

        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64
            - EPOCH_MS;
        assert!(now_ms.abs_diff(parts.timestamp_ms) < 1_000);
    }

    #[test]
    fn test_strictly_increasing_across_sequence_rollover() {
        let generator = IdentityIdGenerator::new(1).unwrap();
        let mut previous = generator.generate();

        // More than one millisecond worth of sequence numbers
        for _ in 0..10_000 {
            let next = generator.generate();
            assert!(next > previous);
            previous = next;
        }
    }

    #[test]
    fn test_unique_under_concurrent_generation() {
        let generator = Arc::new(IdentityIdGenerator::new(7).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let generator = Arc::clone(&generator);
                std::thread::spawn(move || {
                    (0..5_000).map(|_| generator.generate()).collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {id}");
            }
        }
        assert_eq!(seen.len(), 40_000);
    }

    #[test]
    fn test_distinct_nodes_never_collide() {
        let a = IdentityIdGenerator::new(1).unwrap();
        let b = IdentityIdGenerator::new(2).unwrap();
        assert_ne!(a.generate(), b.generate());
    }
}
