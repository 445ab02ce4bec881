use std::collections::HashSet;

use wat_types::{Database, Record, RelationName};

use crate::predicate::Predicate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    UnknownRelation(RelationName),
}

#[derive(Clone, PartialEq, Debug)]
pub enum Query {
    Relation(RelationName),
    Select(Box<Query>, Predicate),
    Project(Box<Query>, Vec<usize>),
    Cross(Box<Query>, Box<Query>),
    Cup(Box<Query>, Box<Query>),
    Diff(Box<Query>, Box<Query>),
}

impl Query {
    pub fn relation(name: impl Into<RelationName>) -> Query {
        Query::Relation(name.into())
    }

    pub fn select(self, predicate: Predicate) -> Query {
        Query::Select(Box::new(self), predicate)
    }

    pub fn project(self, indexes: Vec<usize>) -> Query {
        Query::Project(Box::new(self), indexes)
    }

    pub fn cross(self, other: Query) -> Query {
        Query::Cross(Box::new(self), Box::new(other))
    }

    pub fn cup(self, other: Query) -> Query {
        Query::Cup(Box::new(self), Box::new(other))
    }

    pub fn diff(self, other: Query) -> Query {
        Query::Diff(Box::new(self), Box::new(other))
    }

    pub fn eval(&self, db: &Database) -> Result<HashSet<Record>, QueryError> {
        match self {
            Query::Relation(name) => db
                .get(name)
                .map(|relation| relation.iter().map(|tr| tr.record.clone()).collect())
                .ok_or_else(|| QueryError::UnknownRelation(name.clone())),
            Query::Select(child, predicate) => {
                let input = child.eval(db)?;
                Ok(input.into_iter().filter(|t| predicate.test(t)).collect())
            }
            Query::Project(child, indexes) => {
                let input = child.eval(db)?;
                Ok(input
                    .into_iter()
                    .map(|t| indexes.iter().map(|&i| t[i].clone()).collect())
                    .collect())
            }
            Query::Cross(lhs, rhs) => {
                let (left, right) = (lhs.eval(db)?, rhs.eval(db)?);
                Ok(left
                    .iter()
                    .flat_map(|l| {
                        right.iter().map(move |r| {
                            l.iter().chain(r.iter()).cloned().collect::<Record>()
                        })
                    })
                    .collect())
            }
            Query::Cup(lhs, rhs) => {
                let (mut left, right) = (lhs.eval(db)?, rhs.eval(db)?);
                left.extend(right);
                Ok(left)
            }
            Query::Diff(lhs, rhs) => {
                let (left, right) = (lhs.eval(db)?, rhs.eval(db)?);
                Ok(left.difference(&right).cloned().collect())
            }
        }
    }
}
