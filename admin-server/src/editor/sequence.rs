//! The transit sequence: an ordered, locally-mutable list of trip transits.
//!
//! A sequence is loaded once from the trip service, mutated entirely in
//! memory (add, remove, reorder, field edits), and written back atomically
//! as one replace-all payload. Every entry's `transit_order` always equals
//! its index in the sequence; mutations re-derive it, callers never set it.

use serde::Serialize;

use crate::domain::{ArrivalTime, TransitType};

/// Denormalized display snapshot of a transit point.
///
/// Captured when the entry is created and not refreshed afterwards, so it
/// may be stale relative to the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointSnapshot {
    pub name: String,
    pub address: String,
}

/// Stable identity of an entry within an editing session.
///
/// Persisted entries are keyed by their server id; entries added during the
/// session get a key from a per-sequence counter. Reorder, remove, and field
/// updates address entries by this key, so two entries pointing at
/// identically-named transit points never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryKey {
    /// Server-assigned id of a persisted entry.
    Persisted(String),
    /// Session-local counter value for a not-yet-saved entry.
    Local(u64),
}

impl EntryKey {
    /// Encode the key for use in URLs and DOM attributes.
    ///
    /// The `p:`/`l:` prefix keeps persisted ids and local counters from
    /// colliding however the server happens to format its ids.
    pub fn encode(&self) -> String {
        match self {
            EntryKey::Persisted(id) => format!("p:{id}"),
            EntryKey::Local(n) => format!("l:{n}"),
        }
    }

    /// Decode a key produced by [`encode`].
    ///
    /// [`encode`]: EntryKey::encode
    pub fn decode(s: &str) -> Option<Self> {
        if let Some(id) = s.strip_prefix("p:") {
            if id.is_empty() {
                return None;
            }
            return Some(EntryKey::Persisted(id.to_string()));
        }
        if let Some(n) = s.strip_prefix("l:") {
            return n.parse().ok().map(EntryKey::Local);
        }
        None
    }
}

/// One transit stop in the sequence being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitEntry {
    /// Stable identity within the session.
    pub key: EntryKey,
    /// Directory id of the transit point this entry references.
    pub transit_point_id: String,
    /// Display snapshot of that point.
    pub point: PointSnapshot,
    /// Wall-clock arrival time at this stop.
    pub arrival_time: ArrivalTime,
    /// Pickup/drop role of this stop.
    pub transit_type: TransitType,
    /// Zero-based position; always equals the entry's index.
    pub transit_order: usize,
}

impl TransitEntry {
    /// Server id, if this entry has been persisted.
    pub fn persisted_id(&self) -> Option<&str> {
        match &self.key {
            EntryKey::Persisted(id) => Some(id),
            EntryKey::Local(_) => None,
        }
    }
}

/// A transit loaded from the trip service, before it joins a sequence.
#[derive(Debug, Clone)]
pub struct LoadedTransit {
    /// Server id. Persisted transits always carry one; `None` falls back
    /// to a session-local key.
    pub id: Option<String>,
    pub transit_point_id: String,
    pub point: PointSnapshot,
    pub arrival_time: ArrivalTime,
    pub transit_type: TransitType,
}

/// Input for appending a new entry to a sequence.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub transit_point_id: String,
    pub point: PointSnapshot,
    pub arrival_time: ArrivalTime,
    pub transit_type: TransitType,
}

/// One item of the replace-all payload sent on save.
///
/// Only the point reference travels; the display snapshot stays local.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTransit {
    pub transit_point_id: String,
    pub arrival_time: String,
    pub transit_order: usize,
    #[serde(rename = "type")]
    pub transit_type: String,
}

/// The ordered sequence of transits for one trip, under local edit.
#[derive(Debug, Clone)]
pub struct TransitSequence {
    trip_id: String,
    entries: Vec<TransitEntry>,
    /// Next value for `EntryKey::Local`; never reused within a session.
    next_local: u64,
    /// Whether any mutation happened since load or the last successful save.
    dirty: bool,
}

impl TransitSequence {
    /// Build a sequence from transits loaded off the trip service,
    /// preserving server order.
    pub fn from_loaded(trip_id: impl Into<String>, loaded: Vec<LoadedTransit>) -> Self {
        let mut next_local = 0u64;
        let entries = loaded
            .into_iter()
            .enumerate()
            .map(|(i, t)| {
                let key = match t.id {
                    Some(id) => EntryKey::Persisted(id),
                    None => {
                        let key = EntryKey::Local(next_local);
                        next_local += 1;
                        key
                    }
                };
                TransitEntry {
                    key,
                    transit_point_id: t.transit_point_id,
                    point: t.point,
                    arrival_time: t.arrival_time,
                    transit_type: t.transit_type,
                    transit_order: i,
                }
            })
            .collect();

        Self {
            trip_id: trip_id.into(),
            entries,
            next_local,
            dirty: false,
        }
    }

    /// The trip this sequence belongs to.
    pub fn trip_id(&self) -> &str {
        &self.trip_id
    }

    /// The entries in order.
    pub fn entries(&self) -> &[TransitEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if any mutation happened since load or the last successful save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Append a new entry at the end of the sequence.
    ///
    /// Returns the key assigned to the entry.
    pub fn add(&mut self, input: NewEntry) -> EntryKey {
        let key = EntryKey::Local(self.next_local);
        self.next_local += 1;

        self.entries.push(TransitEntry {
            key: key.clone(),
            transit_point_id: input.transit_point_id,
            point: input.point,
            arrival_time: input.arrival_time,
            transit_type: input.transit_type,
            transit_order: 0,
        });
        self.reindex();
        self.dirty = true;

        key
    }

    /// Remove the entry with the given key.
    ///
    /// Returns false (and changes nothing) if no entry matches.
    pub fn remove(&mut self, key: &EntryKey) -> bool {
        let Some(pos) = self.position_of(key) else {
            return false;
        };
        self.entries.remove(pos);
        self.reindex();
        self.dirty = true;
        true
    }

    /// Move the entry at `source` so it ends up at `destination`.
    ///
    /// A missing or out-of-range destination means the drag was cancelled:
    /// the sequence is left untouched. Dropping an entry on its own position
    /// is valid but changes nothing. Returns true if the order changed.
    pub fn reorder(&mut self, source: usize, destination: Option<usize>) -> bool {
        let Some(destination) = destination else {
            return false;
        };
        if source >= self.entries.len() || destination >= self.entries.len() {
            return false;
        }
        if source == destination {
            return false;
        }

        let entry = self.entries.remove(source);
        self.entries.insert(destination, entry);
        self.reindex();
        self.dirty = true;
        true
    }

    /// Replace the arrival time of the entry with the given key.
    ///
    /// Returns false if no entry matches. Order is untouched.
    pub fn set_arrival_time(&mut self, key: &EntryKey, time: ArrivalTime) -> bool {
        let Some(pos) = self.position_of(key) else {
            return false;
        };
        self.entries[pos].arrival_time = time;
        self.dirty = true;
        true
    }

    /// Replace the transit type of the entry with the given key.
    ///
    /// Returns false if no entry matches. Order is untouched.
    pub fn set_transit_type(&mut self, key: &EntryKey, transit_type: TransitType) -> bool {
        let Some(pos) = self.position_of(key) else {
            return false;
        };
        self.entries[pos].transit_type = transit_type;
        self.dirty = true;
        true
    }

    /// Serialize the current sequence as the replace-all payload.
    pub fn save_payload(&self) -> Vec<SavedTransit> {
        self.entries
            .iter()
            .map(|e| SavedTransit {
                transit_point_id: e.transit_point_id.clone(),
                arrival_time: e.arrival_time.to_string(),
                transit_order: e.transit_order,
                transit_type: e.transit_type.as_str().to_string(),
            })
            .collect()
    }

    /// Mark the sequence clean after a successful save.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    fn position_of(&self, key: &EntryKey) -> Option<usize> {
        self.entries.iter().position(|e| &e.key == key)
    }

    /// Re-derive every entry's order from its index.
    fn reindex(&mut self) {
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.transit_order = i;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(s: &str) -> ArrivalTime {
        ArrivalTime::parse(s).unwrap()
    }

    fn loaded(id: &str, point_id: &str, name: &str, at: &str) -> LoadedTransit {
        LoadedTransit {
            id: Some(id.to_string()),
            transit_point_id: point_id.to_string(),
            point: PointSnapshot {
                name: name.to_string(),
                address: format!("{name} address"),
            },
            arrival_time: time(at),
            transit_type: TransitType::Pickup,
        }
    }

    fn new_entry(point_id: &str, name: &str, at: &str) -> NewEntry {
        NewEntry {
            transit_point_id: point_id.to_string(),
            point: PointSnapshot {
                name: name.to_string(),
                address: format!("{name} address"),
            },
            arrival_time: time(at),
            transit_type: TransitType::Both,
        }
    }

    fn make_sequence() -> TransitSequence {
        TransitSequence::from_loaded(
            "trip-1",
            vec![
                loaded("t1", "pt-a", "Central station", "06:00"),
                loaded("t2", "pt-b", "North office", "06:30"),
                loaded("t3", "pt-c", "Airport", "07:15"),
            ],
        )
    }

    fn orders(seq: &TransitSequence) -> Vec<usize> {
        seq.entries().iter().map(|e| e.transit_order).collect()
    }

    fn keys(seq: &TransitSequence) -> Vec<EntryKey> {
        seq.entries().iter().map(|e| e.key.clone()).collect()
    }

    #[test]
    fn from_loaded_preserves_server_order() {
        let seq = make_sequence();

        assert_eq!(seq.trip_id(), "trip-1");
        assert_eq!(seq.len(), 3);
        assert_eq!(orders(&seq), vec![0, 1, 2]);
        assert_eq!(seq.entries()[0].point.name, "Central station");
        assert_eq!(seq.entries()[2].point.name, "Airport");
        assert!(!seq.is_dirty());
    }

    #[test]
    fn from_loaded_empty_is_empty_not_error() {
        let seq = TransitSequence::from_loaded("trip-9", vec![]);

        assert!(seq.is_empty());
        assert_eq!(seq.len(), 0);
        assert!(seq.save_payload().is_empty());
    }

    #[test]
    fn add_appends_at_end_with_local_key() {
        let mut seq = make_sequence();

        let key = seq.add(new_entry("pt-d", "South depot", "08:00"));

        assert_eq!(seq.len(), 4);
        assert_eq!(key, EntryKey::Local(0));
        let last = seq.entries().last().unwrap();
        assert_eq!(last.key, key);
        assert_eq!(last.transit_order, 3);
        assert!(last.persisted_id().is_none());
        assert!(seq.is_dirty());
    }

    #[test]
    fn add_assigns_distinct_local_keys() {
        let mut seq = make_sequence();

        let k1 = seq.add(new_entry("pt-d", "South depot", "08:00"));
        let k2 = seq.add(new_entry("pt-e", "Harbour", "09:00"));

        assert_ne!(k1, k2);
    }

    #[test]
    fn add_then_remove_restores_sequence() {
        let mut seq = make_sequence();
        let before = seq.entries().to_vec();

        let key = seq.add(new_entry("pt-d", "South depot", "08:00"));
        assert!(seq.remove(&key));

        assert_eq!(seq.entries(), before.as_slice());
        assert_eq!(orders(&seq), vec![0, 1, 2]);
    }

    #[test]
    fn remove_missing_key_is_noop() {
        let mut seq = make_sequence();
        let before = seq.entries().to_vec();

        assert!(!seq.remove(&EntryKey::Persisted("nope".into())));
        assert!(!seq.remove(&EntryKey::Local(42)));

        assert_eq!(seq.entries(), before.as_slice());
        assert!(!seq.is_dirty());
    }

    #[test]
    fn remove_reindexes_remainder() {
        let mut seq = make_sequence();

        assert!(seq.remove(&EntryKey::Persisted("t2".into())));

        assert_eq!(seq.len(), 2);
        assert_eq!(orders(&seq), vec![0, 1]);
        assert_eq!(seq.entries()[1].point.name, "Airport");
    }

    #[test]
    fn reorder_moves_and_reindexes() {
        let mut seq = make_sequence();

        assert!(seq.reorder(0, Some(2)));

        assert_eq!(
            keys(&seq),
            vec![
                EntryKey::Persisted("t2".into()),
                EntryKey::Persisted("t3".into()),
                EntryKey::Persisted("t1".into()),
            ]
        );
        assert_eq!(orders(&seq), vec![0, 1, 2]);
        assert!(seq.is_dirty());
    }

    #[test]
    fn reorder_backwards() {
        let mut seq = make_sequence();

        assert!(seq.reorder(2, Some(0)));

        assert_eq!(
            keys(&seq),
            vec![
                EntryKey::Persisted("t3".into()),
                EntryKey::Persisted("t1".into()),
                EntryKey::Persisted("t2".into()),
            ]
        );
        assert_eq!(orders(&seq), vec![0, 1, 2]);
    }

    #[test]
    fn reorder_without_destination_is_cancelled_drag() {
        let mut seq = make_sequence();
        let before = seq.entries().to_vec();

        assert!(!seq.reorder(0, None));

        assert_eq!(seq.entries(), before.as_slice());
        assert!(!seq.is_dirty());
    }

    #[test]
    fn reorder_out_of_range_is_noop() {
        let mut seq = make_sequence();
        let before = seq.entries().to_vec();

        assert!(!seq.reorder(0, Some(3)));
        assert!(!seq.reorder(7, Some(0)));

        assert_eq!(seq.entries(), before.as_slice());
        assert!(!seq.is_dirty());
    }

    #[test]
    fn reorder_onto_itself_leaves_sequence_unchanged() {
        let mut seq = make_sequence();
        let before = seq.entries().to_vec();

        assert!(!seq.reorder(1, Some(1)));

        assert_eq!(seq.entries(), before.as_slice());
        assert!(!seq.is_dirty());
    }

    #[test]
    fn set_arrival_time_touches_only_target() {
        let mut seq = make_sequence();
        let before = seq.entries().to_vec();

        assert!(seq.set_arrival_time(&EntryKey::Persisted("t2".into()), time("12:00")));

        for (i, entry) in seq.entries().iter().enumerate() {
            if entry.key == EntryKey::Persisted("t2".into()) {
                assert_eq!(entry.arrival_time, time("12:00"));
                assert_eq!(entry.transit_type, before[i].transit_type);
                assert_eq!(entry.transit_order, before[i].transit_order);
            } else {
                assert_eq!(entry, &before[i]);
            }
        }
        assert_eq!(keys(&seq), before.iter().map(|e| e.key.clone()).collect::<Vec<_>>());
    }

    #[test]
    fn set_transit_type_touches_only_target() {
        let mut seq = make_sequence();
        let before = seq.entries().to_vec();

        assert!(seq.set_transit_type(&EntryKey::Persisted("t3".into()), TransitType::Drop));

        for (i, entry) in seq.entries().iter().enumerate() {
            if entry.key == EntryKey::Persisted("t3".into()) {
                assert_eq!(entry.transit_type, TransitType::Drop);
                assert_eq!(entry.arrival_time, before[i].arrival_time);
            } else {
                assert_eq!(entry, &before[i]);
            }
        }
    }

    #[test]
    fn update_missing_key_is_noop() {
        let mut seq = make_sequence();
        let before = seq.entries().to_vec();

        assert!(!seq.set_arrival_time(&EntryKey::Local(99), time("12:00")));
        assert!(!seq.set_transit_type(&EntryKey::Local(99), TransitType::Drop));

        assert_eq!(seq.entries(), before.as_slice());
        assert!(!seq.is_dirty());
    }

    #[test]
    fn duplicate_points_are_permitted() {
        let mut seq = make_sequence();

        let k1 = seq.add(new_entry("pt-a", "Central station", "10:00"));
        let k2 = seq.add(new_entry("pt-a", "Central station", "11:00"));

        assert_eq!(seq.len(), 5);
        assert_ne!(k1, k2);

        // Removing by key takes out exactly the addressed duplicate
        assert!(seq.remove(&k1));
        assert_eq!(seq.len(), 4);
        assert!(seq.entries().iter().any(|e| e.key == k2));
    }

    #[test]
    fn save_payload_reflects_reorder() {
        let mut seq = TransitSequence::from_loaded(
            "trip-1",
            vec![
                loaded("a", "pt-a", "First", "06:00"),
                loaded("b", "pt-b", "Second", "07:00"),
            ],
        );

        assert!(seq.reorder(1, Some(0)));
        let payload = seq.save_payload();

        assert_eq!(payload.len(), 2);
        assert_eq!(payload[0].transit_point_id, "pt-b");
        assert_eq!(payload[0].transit_order, 0);
        assert_eq!(payload[1].transit_point_id, "pt-a");
        assert_eq!(payload[1].transit_order, 1);
    }

    #[test]
    fn save_payload_serializes_wire_names() {
        let mut seq = TransitSequence::from_loaded("trip-1", vec![]);
        seq.add(NewEntry {
            transit_point_id: "pt-a".into(),
            point: PointSnapshot {
                name: "Central station".into(),
                address: "1 Main road".into(),
            },
            arrival_time: time("06:30"),
            transit_type: TransitType::Drop,
        });

        let json = serde_json::to_value(seq.save_payload()).unwrap();

        assert_eq!(
            json,
            serde_json::json!([{
                "transitPointId": "pt-a",
                "arrivalTime": "06:30",
                "transitOrder": 0,
                "type": "DROP",
            }])
        );
    }

    #[test]
    fn save_payload_omits_snapshot() {
        let seq = make_sequence();
        let json = serde_json::to_string(&seq.save_payload()).unwrap();

        assert!(!json.contains("name"));
        assert!(!json.contains("address"));
        assert!(!json.contains("Central station"));
    }

    #[test]
    fn mark_saved_clears_dirty() {
        let mut seq = make_sequence();
        seq.add(new_entry("pt-d", "South depot", "08:00"));
        assert!(seq.is_dirty());

        seq.mark_saved();
        assert!(!seq.is_dirty());

        // The sequence itself is untouched by saving
        assert_eq!(seq.len(), 4);
    }

    #[test]
    fn entry_key_encode_decode_roundtrip() {
        let cases = vec![
            EntryKey::Persisted("abc-123".into()),
            EntryKey::Persisted("p:tricky".into()),
            EntryKey::Local(0),
            EntryKey::Local(u64::MAX),
        ];
        for key in cases {
            assert_eq!(EntryKey::decode(&key.encode()), Some(key));
        }
    }

    #[test]
    fn entry_key_decode_rejects_garbage() {
        assert_eq!(EntryKey::decode(""), None);
        assert_eq!(EntryKey::decode("p:"), None);
        assert_eq!(EntryKey::decode("l:"), None);
        assert_eq!(EntryKey::decode("l:notanumber"), None);
        assert_eq!(EntryKey::decode("x:whatever"), None);
        assert_eq!(EntryKey::decode("abc-123"), None);
    }
}
