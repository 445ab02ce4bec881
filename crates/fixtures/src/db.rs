//! The plain relational database: named relations of plain (un-timestamped)
//! tuples, queried through `wat-algebra`'s `Query` grammar. The reference
//! fixture for the relational-algebra scenario (`R - S`) and for contrasting
//! the black-box engine against the white-box machine's calculated lineage
//! over the same operators.

use std::collections::HashSet;

use wat_algebra::{Query, QueryError};
use wat_machine::StateMachine;
use wat_types::{Arity, Database, Record, RelationName, Timestamp, TimestampedRecord};

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Create(RelationName, Arity),
    Insert(RelationName, Record),
    Delete(RelationName, Record),
    Query(Query),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Create(bool),
    Insert(bool),
    Delete(bool),
    /// `None` is the sentinel "unknown result" reply: the query named a
    /// relation absent from the database (`QueryError::UnknownRelation`).
    Query(Option<HashSet<Record>>),
}

/// Arity is recorded at `create` time but, matching the source, never
/// enforced on `insert` — only the white-box machine's transition boundary
/// checks arity (spec.md §4.4 step 1).
#[derive(Default)]
pub struct Db {
    schema: std::collections::HashMap<RelationName, Arity>,
    db: Database,
}

impl Db {
    pub fn new() -> Db {
        Db::default()
    }

    pub fn create(&self, r: impl Into<RelationName>, arity: Arity) -> Input {
        Input::Create(r.into(), arity)
    }

    pub fn insert(&self, r: impl Into<RelationName>, t: Record) -> Input {
        Input::Insert(r.into(), t)
    }

    pub fn delete(&self, r: impl Into<RelationName>, t: Record) -> Input {
        Input::Delete(r.into(), t)
    }

    pub fn query(&self, q: Query) -> Input {
        Input::Query(q)
    }
}

impl StateMachine for Db {
    type Input = Input;
    type Output = Output;

    fn reset(&mut self) {
        self.schema.clear();
        self.db.clear();
    }

    fn transition(&mut self, input: &Input) -> Output {
        match input {
            Input::Create(r, arity) => {
                if self.schema.contains_key(r) {
                    Output::Create(false)
                } else {
                    self.schema.insert(r.clone(), *arity);
                    self.db.insert(r.clone(), HashSet::new());
                    Output::Create(true)
                }
            }
            Input::Insert(r, t) => match self.db.get_mut(r) {
                None => Output::Insert(false),
                Some(relation) => {
                    relation.insert(TimestampedRecord::new(t.clone(), Timestamp::INITIAL));
                    Output::Insert(true)
                }
            },
            Input::Delete(r, t) => match self.db.get_mut(r) {
                None => Output::Delete(false),
                Some(relation) => {
                    let removed = relation.remove(&TimestampedRecord::new(t.clone(), Timestamp::INITIAL));
                    Output::Delete(removed)
                }
            },
            Input::Query(q) => match q.eval(&self.db) {
                Ok(result) => Output::Query(Some(result)),
                Err(QueryError::UnknownRelation(_)) => Output::Query(None),
            },
        }
    }
}
