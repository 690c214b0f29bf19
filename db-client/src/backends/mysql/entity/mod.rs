//! `SeaORM` entities for the MySQL backend.

pub mod account;
pub mod flow;
