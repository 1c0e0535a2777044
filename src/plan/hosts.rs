//! Round-robin host selection shared by all workers.

use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Ordered target hosts plus a shared round-robin cursor.
///
/// Every call to [`next_host`](Self::next_host) advances the cursor exactly
/// once, so `k` calls over `k` hosts visit each host once regardless of which
/// thread makes them. The cursor is not part of the rotation's identity:
/// equality and serialization only look at the host list.
pub struct HostRotation {
    hosts: Vec<String>,
    cursor: AtomicUsize,
}

impl HostRotation {
    /// Returns `None` for an empty host list.
    pub fn new(hosts: Vec<String>) -> Option<Self> {
        if hosts.is_empty() {
            return None;
        }
        Some(Self {
            hosts,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Next host in rotation.
    pub fn next_host(&self) -> &str {
        // fetch_add wraps on overflow; each caller still sees a distinct value.
        let n = self.cursor.fetch_add(1, Ordering::Relaxed);
        &self.hosts[n % self.hosts.len()]
    }

    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    /// Number of `next_host` calls made so far (modulo wrap-around).
    pub fn cursor(&self) -> usize {
        self.cursor.load(Ordering::SeqCst)
    }
}

impl Clone for HostRotation {
    fn clone(&self) -> Self {
        Self {
            hosts: self.hosts.clone(),
            cursor: AtomicUsize::new(self.cursor()),
        }
    }
}

impl PartialEq for HostRotation {
    fn eq(&self, other: &Self) -> bool {
        self.hosts == other.hosts
    }
}

impl Eq for HostRotation {}

impl fmt::Debug for HostRotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostRotation")
            .field("hosts", &self.hosts)
            .field("cursor", &self.cursor())
            .finish()
    }
}

impl Serialize for HostRotation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.hosts.serialize(serializer)
    }
}
