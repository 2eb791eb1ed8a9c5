//! Logical backend targets served by the gateway client.

use std::fmt;

/// One of the three independently addressed backend services.
///
/// A request is routed to exactly one target, selected by the caller.
/// The authentication policy is applied uniformly regardless of target,
/// so adding a new variant here does not touch that policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendTarget {
    /// Authentication service (login, register, logout)
    Auth,
    /// Analytics/read service (statistics, posts, exports)
    Analytics,
    /// Collection-trigger service (start collection, task status)
    Collector,
}

impl BackendTarget {
    /// Stable lowercase name, used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Analytics => "analytics",
            Self::Collector => "collector",
        }
    }
}

impl fmt::Display for BackendTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
