//! Test suite: shared fixtures, database-backed CRUD/pagination tests,
//! and pure unit tests.

pub mod common;

mod database;
