use std::collections::{BTreeSet, HashSet};

use wat_types::{Database, Record, RecordId, RelationName, Witness};

use crate::predicate::Predicate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineageError {
    UnknownRelation(RelationName),
}

pub type LineageQueryOutput = HashSet<(Record, Witness)>;

#[derive(Clone, PartialEq, Debug)]
pub enum LineageQuery {
    Relation(RelationName),
    RecordLit(Record),
    Select(Box<LineageQuery>, Predicate),
    Project(Box<LineageQuery>, Vec<usize>),
    Cross(Box<LineageQuery>, Box<LineageQuery>),
    Cup(Box<LineageQuery>, Box<LineageQuery>),
    Diff(Box<LineageQuery>, Box<LineageQuery>),
}

impl LineageQuery {
    pub fn relation(name: impl Into<RelationName>) -> LineageQuery {
        LineageQuery::Relation(name.into())
    }

    pub fn record(record: Record) -> LineageQuery {
        LineageQuery::RecordLit(record)
    }

    pub fn select(self, predicate: Predicate) -> LineageQuery {
        LineageQuery::Select(Box::new(self), predicate)
    }

    pub fn project(self, indexes: Vec<usize>) -> LineageQuery {
        LineageQuery::Project(Box::new(self), indexes)
    }

    pub fn cross(self, other: LineageQuery) -> LineageQuery {
        LineageQuery::Cross(Box::new(self), Box::new(other))
    }

    pub fn cup(self, other: LineageQuery) -> LineageQuery {
        LineageQuery::Cup(Box::new(self), Box::new(other))
    }

    pub fn diff(self, other: LineageQuery) -> LineageQuery {
        LineageQuery::Diff(Box::new(self), Box::new(other))
    }

    pub fn eval(&self, db: &Database) -> Result<LineageQueryOutput, LineageError> {
        match self {
            LineageQuery::Relation(name) => {
                let relation = db
                    .get(name)
                    .ok_or_else(|| LineageError::UnknownRelation(name.clone()))?;
                Ok(relation
                    .iter()
                    .map(|tr| {
                        let rid = RecordId::new(name.clone(), tr.record.clone(), tr.timestamp);
                        (tr.record.clone(), BTreeSet::from([rid]))
                    })
                    .collect())
            }
            LineageQuery::RecordLit(record) => {
                Ok(HashSet::from([(record.clone(), BTreeSet::new())]))
            }
            LineageQuery::Select(child, predicate) => {
                let input = child.eval(db)?;
                Ok(input.into_iter().filter(|(r, _)| predicate.test(r)).collect())
            }
            LineageQuery::Project(child, indexes) => {
                let input = child.eval(db)?;
                Ok(input
                    .into_iter()
                    .map(|(r, lineage)| (indexes.iter().map(|&i| r[i].clone()).collect(), lineage))
                    .collect())
            }
            LineageQuery::Cross(lhs, rhs) => {
                let (left, right) = (lhs.eval(db)?, rhs.eval(db)?);
                Ok(left
                    .iter()
                    .flat_map(|(lr, ll)| {
                        right.iter().map(move |(rr, rl)| {
                            let record = lr.iter().chain(rr.iter()).cloned().collect();
                            let witness = ll.union(rl).cloned().collect();
                            (record, witness)
                        })
                    })
                    .collect())
            }
            LineageQuery::Cup(lhs, rhs) => {
                let (mut left, right) = (lhs.eval(db)?, rhs.eval(db)?);
                // Distinct witnesses for the same record are distinct
                // conjunctions of evidence and must both be kept.
                left.extend(right);
                Ok(left)
            }
            LineageQuery::Diff(lhs, rhs) => {
                let (left, right) = (lhs.eval(db)?, rhs.eval(db)?);
                let right_records: HashSet<Record> = right.into_iter().map(|(r, _)| r).collect();
                Ok(left.into_iter().filter(|(r, _)| !right_records.contains(r)).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wat_types::{Timestamp, TimestampedRecord};

    fn db_with(relations: &[(&str, &[&[&str]])]) -> Database {
        let mut db = Database::new();
        for (name, tuples) in relations {
            let set = tuples
                .iter()
                .map(|t| {
                    TimestampedRecord::new(
                        t.iter().map(|s| s.to_string()).collect(),
                        Timestamp::INITIAL,
                    )
                })
                .collect();
            db.insert((*name).to_string(), set);
        }
        db
    }

    fn rec(items: &[&str]) -> Record {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn relation_tags_each_record_with_its_record_id() {
        let db = db_with(&[("r", &[&["a"]])]);
        let out = LineageQuery::relation("r").eval(&db).unwrap();
        assert_eq!(out.len(), 1);
        let (record, witness) = out.into_iter().next().unwrap();
        assert_eq!(record, rec(&["a"]));
        assert_eq!(witness.len(), 1);
        let rid = witness.into_iter().next().unwrap();
        assert_eq!(rid.relation_name, "r");
        assert_eq!(rid.record, rec(&["a"]));
    }

    #[test]
    fn record_literal_has_empty_witness() {
        let db = Database::new();
        let out = LineageQuery::record(rec(&["a"])).eval(&db).unwrap();
        assert_eq!(out, HashSet::from([(rec(&["a"]), BTreeSet::new())]));
    }

    #[test]
    fn cross_unions_witnesses() {
        let db = db_with(&[("l", &[&["a"]]), ("r", &[&["1"]])]);
        let out = LineageQuery::relation("l")
            .cross(LineageQuery::relation("r"))
            .eval(&db)
            .unwrap();
        assert_eq!(out.len(), 1);
        let (record, witness) = out.into_iter().next().unwrap();
        assert_eq!(record, rec(&["a", "1"]));
        assert_eq!(witness.len(), 2);
    }

    #[test]
    fn cup_keeps_both_witnesses_for_the_same_record() {
        let db = db_with(&[("l", &[&["a"]]), ("r", &[&["a"]])]);
        let out = LineageQuery::relation("l")
            .cup(LineageQuery::relation("r"))
            .eval(&db)
            .unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|(r, _)| r == &rec(&["a"])));
    }

    #[test]
    fn diff_drops_right_hand_evidence_entirely() {
        let db = db_with(&[("r", &[&["a"], &["b"]]), ("s", &[&["b"]])]);
        let out = LineageQuery::relation("r")
            .diff(LineageQuery::relation("s"))
            .eval(&db)
            .unwrap();
        assert_eq!(out.len(), 1);
        let (record, _) = out.into_iter().next().unwrap();
        assert_eq!(record, rec(&["a"]));
    }

    #[test]
    fn unknown_relation_is_an_error() {
        let db = Database::new();
        let err = LineageQuery::relation("missing").eval(&db).unwrap_err();
        assert_eq!(err, LineageError::UnknownRelation("missing".to_string()));
    }
}
