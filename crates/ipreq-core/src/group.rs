//! Bucketing of resolved records by carrier.

use crate::record::{Carrier, ResolvedRecord};

/// Records bucketed by carrier, plus the records whose lookup failed.
///
/// Group order is first-seen carrier order; record order within a group is
/// input order. Carriers with zero records are absent, not empty.
/// `Unknown` records never enter a carrier group: they are neither lost nor
/// misclassified, and the caller reports them separately.
#[derive(Debug, Default)]
pub struct GroupedRecords {
    pub groups: Vec<(Carrier, Vec<ResolvedRecord>)>,
    pub unresolved: Vec<ResolvedRecord>,
}

impl GroupedRecords {
    pub fn get(&self, carrier: Carrier) -> Option<&[ResolvedRecord]> {
        self.groups
            .iter()
            .find(|(c, _)| *c == carrier)
            .map(|(_, records)| records.as_slice())
    }

    pub fn carriers(&self) -> impl Iterator<Item = Carrier> + '_ {
        self.groups.iter().map(|(c, _)| *c)
    }
}

/// Pure grouping pass over the resolved records.
pub fn group_by_carrier(records: Vec<ResolvedRecord>) -> GroupedRecords {
    let mut grouped = GroupedRecords::default();
    for record in records {
        if record.carrier == Carrier::Unknown {
            grouped.unresolved.push(record);
            continue;
        }
        match grouped.groups.iter_mut().find(|(c, _)| *c == record.carrier) {
            Some((_, bucket)) => bucket.push(record),
            None => grouped.groups.push((record.carrier, vec![record])),
        }
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RawRecord;

    fn record(ip: &str, ts: &str, carrier: Carrier) -> ResolvedRecord {
        ResolvedRecord::from_raw(
            RawRecord {
                timestamp_text: ts.to_string(),
                ip_text: ip.to_string(),
            },
            carrier,
        )
    }

    #[test]
    fn groups_preserve_first_seen_order() {
        let records = vec![
            record("1.1.1.1", "2025-07-11 10:00:00 Z", Carrier::Jio),
            record("2.2.2.2", "2025-07-11 11:00:00 Z", Carrier::Airtel),
            record("1.1.1.1", "2025-07-11 12:00:00 Z", Carrier::Jio),
        ];
        let grouped = group_by_carrier(records);

        let carriers: Vec<Carrier> = grouped.carriers().collect();
        assert_eq!(carriers, vec![Carrier::Jio, Carrier::Airtel]);

        let jio = grouped.get(Carrier::Jio).unwrap();
        assert_eq!(jio.len(), 2);
        assert_eq!(jio[0].timestamp_text, "2025-07-11 10:00:00 Z");
        assert_eq!(jio[1].timestamp_text, "2025-07-11 12:00:00 Z");
    }

    #[test]
    fn absent_carriers_are_omitted() {
        let grouped = group_by_carrier(vec![record(
            "1.1.1.1",
            "2025-07-11 10:00:00 Z",
            Carrier::Bsnl,
        )]);
        assert!(grouped.get(Carrier::Jio).is_none());
        assert!(grouped.get(Carrier::Bsnl).is_some());
    }

    #[test]
    fn unknown_records_are_segregated() {
        let records = vec![
            record("1.1.1.1", "2025-07-11 10:00:00 Z", Carrier::Jio),
            record("9.9.9.9", "2025-07-11 11:00:00 Z", Carrier::Unknown),
        ];
        let grouped = group_by_carrier(records);
        assert_eq!(grouped.groups.len(), 1);
        assert_eq!(grouped.unresolved.len(), 1);
        assert_eq!(grouped.unresolved[0].ip, "9.9.9.9");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let grouped = group_by_carrier(Vec::new());
        assert!(grouped.groups.is_empty());
        assert!(grouped.unresolved.is_empty());
    }
}
