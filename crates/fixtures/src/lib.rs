//! Conformance fixtures only (spec.md §1): four small `StateMachine`
//! implementations used to exercise the black-box and white-box provenance
//! engines, not production state machines in their own right.

pub mod bexpr;
pub mod db;
pub mod kvs;
pub mod lists;

pub use bexpr::Bexpr;
pub use db::Db;
pub use kvs::Kvs;
pub use lists::Lists;
