//! Cache-first carrier resolution with ordered classification rules.

use tracing::{debug, info, warn};

use ipreq_core::Carrier;

use crate::cache::CarrierCache;
use crate::rdap::OrgLookup;

/// Ordered classification rules, first match wins.
///
/// An ordered list, not a map: the substrings overlap (an organization name
/// carrying both "BHARTI" and "IDEA" must classify as Airtel), so rule
/// order is load-bearing.
const RULES: &[(&[&str], Carrier)] = &[
    (&["JIO", "RELIANCE"], Carrier::Jio),
    (&["AIRTEL", "BHARTI"], Carrier::Airtel),
    (&["VODAFONE", "VI", "IDEA"], Carrier::Vi),
    (&["BSNL"], Carrier::Bsnl),
];

/// Classify a registry organization name into a carrier.
///
/// Case-insensitive substring match against [`RULES`]; a recognized but
/// unmapped registry is `Other`, which is a valid cacheable result.
pub fn classify(org: &str) -> Carrier {
    let upper = org.to_uppercase();
    for (needles, carrier) in RULES {
        if needles.iter().any(|needle| upper.contains(needle)) {
            return *carrier;
        }
    }
    Carrier::Other
}

/// Cache-first resolver: consult the cache, otherwise ask the registry and
/// write the classification through before returning.
pub struct Resolver<C, L> {
    cache: C,
    lookup: L,
}

impl<C: CarrierCache, L: OrgLookup> Resolver<C, L> {
    pub fn new(cache: C, lookup: L) -> Self {
        Self { cache, lookup }
    }

    /// Resolve an IP to its carrier.
    ///
    /// Never fails: a lookup error degrades to `Carrier::Unknown` and
    /// leaves the cache untouched, so a later run retries the same IP
    /// instead of inheriting a poisoned entry.
    pub fn resolve(&mut self, ip: &str) -> Carrier {
        if let Some(hit) = self.cache.get(ip) {
            debug!(%ip, carrier = %hit, "cache hit");
            return hit;
        }

        let org = match self.lookup.org_name(ip) {
            Ok(org) => org,
            Err(err) => {
                warn!(%ip, error = %err, "registry lookup failed");
                return Carrier::Unknown;
            }
        };

        let carrier = classify(&org);
        info!(%ip, %org, carrier = %carrier, "resolved");
        if let Err(err) = self.cache.insert(ip, carrier) {
            warn!(%ip, error = %err, "failed to persist carrier cache");
        }
        carrier
    }
}
