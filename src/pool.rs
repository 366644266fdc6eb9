//! Collaborator seams for the external processing pool.
//!
//! The controller does not own the pool that performs the work, the queue
//! that feeds it, or the switch that starts and stops delivery. It consumes
//! two narrow capabilities, injected at construction time:
//!
//! - [`QueueMonitor`]: how deep is the backlog of undelivered units right now?
//! - [`DeliveryControl`]: start or stop delivering units to the pool.
//!
//! Real deployments implement these against their broker's management
//! interface (an AMQP management API, a JMX bridge, a Kafka admin client, …).
//! Both calls are synchronous and expected to be cheap; retry and backoff, if
//! wanted, belong inside the implementation, not in the controller.
//!
//! Enabling and disabling delivery are two genuinely distinct signals; an
//! implementation must not assume one underlying action toggles both.

use crate::error::Error;
use std::sync::Arc;

/// Read-only view of the external queue's backlog.
pub trait QueueMonitor: Send + Sync {
    /// Count of undelivered work units at this instant.
    fn queue_depth(&self) -> Result<u64, Error>;
}

/// Switch controlling whether the pool receives work units.
pub trait DeliveryControl: Send + Sync {
    /// Start (`true`) or stop (`false`) delivery of units to the pool.
    fn set_delivery(&self, enabled: bool) -> Result<(), Error>;
}

impl<T: QueueMonitor + ?Sized> QueueMonitor for Arc<T> {
    fn queue_depth(&self) -> Result<u64, Error> {
        (**self).queue_depth()
    }
}

impl<T: DeliveryControl + ?Sized> DeliveryControl for Arc<T> {
    fn set_delivery(&self, enabled: bool) -> Result<(), Error> {
        (**self).set_delivery(enabled)
    }
}

#[cfg(feature = "builtins")]
pub use builtins::*;

#[cfg(feature = "builtins")]
mod builtins {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

    /// In-memory [`QueueMonitor`] holding an adjustable depth counter.
    ///
    /// A stand-in for a real broker in demos and tests: seed it with a
    /// backlog, drain it with [`take_one`](StaticQueue::take_one) from worker
    /// loops.
    #[derive(Debug, Default)]
    pub struct StaticQueue {
        depth: AtomicU64,
    }

    impl StaticQueue {
        pub fn new(depth: u64) -> Self {
            Self {
                depth: AtomicU64::new(depth),
            }
        }

        pub fn set(&self, depth: u64) {
            self.depth.store(depth, Ordering::Relaxed);
        }

        /// Claim one unit from the backlog. Returns `false` once empty.
        pub fn take_one(&self) -> bool {
            let mut current = self.depth.load(Ordering::Relaxed);
            while current > 0 {
                match self.depth.compare_exchange_weak(
                    current,
                    current - 1,
                    Ordering::Relaxed,
                    Ordering::Relaxed,
                ) {
                    Ok(_) => return true,
                    Err(actual) => current = actual,
                }
            }
            false
        }
    }

    impl QueueMonitor for StaticQueue {
        fn queue_depth(&self) -> Result<u64, Error> {
            Ok(self.depth.load(Ordering::Relaxed))
        }
    }

    /// In-memory [`DeliveryControl`] exposing the current switch position.
    ///
    /// Worker loops can poll [`is_enabled`](SwitchDelivery::is_enabled) and
    /// drain out when the controller halts delivery.
    #[derive(Debug, Default)]
    pub struct SwitchDelivery {
        enabled: AtomicBool,
    }

    impl SwitchDelivery {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn is_enabled(&self) -> bool {
            self.enabled.load(Ordering::Relaxed)
        }
    }

    impl DeliveryControl for SwitchDelivery {
        fn set_delivery(&self, enabled: bool) -> Result<(), Error> {
            self.enabled.store(enabled, Ordering::Relaxed);
            Ok(())
        }
    }
}

#[cfg(all(test, feature = "builtins"))]
mod tests {
    use super::*;

    #[test]
    fn static_queue_drains_to_zero() {
        let queue = StaticQueue::new(2);
        assert!(queue.take_one());
        assert!(queue.take_one());
        assert!(!queue.take_one());
        assert_eq!(queue.queue_depth().unwrap(), 0);
    }

    #[test]
    fn switch_delivery_tracks_last_signal() {
        let switch = SwitchDelivery::new();
        assert!(!switch.is_enabled());
        switch.set_delivery(true).unwrap();
        assert!(switch.is_enabled());
        switch.set_delivery(false).unwrap();
        assert!(!switch.is_enabled());
    }
}
