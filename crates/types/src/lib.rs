use std::collections::{BTreeSet, HashMap, HashSet};

pub type Record = Vec<String>;

pub type RelationName = String;
pub type Arity = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct Timestamp {
    pub tick: u64,
    pub step: u64,
}

impl Timestamp {
    pub const INITIAL: Timestamp = Timestamp { tick: 0, step: 0 };

    pub fn increment_tick(self) -> Timestamp {
        Timestamp { tick: self.tick + 1, step: 0 }
    }

    pub fn increment_step(self) -> Timestamp {
        Timestamp { tick: self.tick, step: self.step + 1 }
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp::INITIAL
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TimestampedRecord {
    pub record: Record,
    pub timestamp: Timestamp,
}

impl TimestampedRecord {
    pub fn new(record: Record, timestamp: Timestamp) -> Self {
        TimestampedRecord { record, timestamp }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct RecordId {
    pub relation_name: RelationName,
    pub record: Record,
    pub timestamp: Timestamp,
}

impl RecordId {
    pub fn new(relation_name: impl Into<RelationName>, record: Record, timestamp: Timestamp) -> Self {
        RecordId { relation_name: relation_name.into(), record, timestamp }
    }
}

pub type Witness = BTreeSet<RecordId>;
pub type Lineage = HashSet<Witness>;

pub type Schema = HashMap<RelationName, Arity>;

pub type Database = HashMap<RelationName, HashSet<TimestampedRecord>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_increment_tick_resets_step() {
        let t = Timestamp { tick: 3, step: 2 }.increment_tick();
        assert_eq!(t, Timestamp { tick: 4, step: 0 });
    }

    #[test]
    fn timestamp_increment_step_keeps_tick() {
        let t = Timestamp { tick: 3, step: 2 }.increment_step();
        assert_eq!(t, Timestamp { tick: 3, step: 3 });
    }

    #[test]
    fn identical_tuples_collapse_in_plain_set_semantics() {
        let mut set: HashSet<Record> = HashSet::new();
        set.insert(vec!["a".to_string()]);
        set.insert(vec!["a".to_string()]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn same_tuple_different_timestamp_are_distinct() {
        let mut set: HashSet<TimestampedRecord> = HashSet::new();
        set.insert(TimestampedRecord::new(vec!["a".into()], Timestamp::INITIAL));
        set.insert(TimestampedRecord::new(vec!["a".into()], Timestamp::INITIAL.increment_tick()));
        assert_eq!(set.len(), 2);
    }
}
