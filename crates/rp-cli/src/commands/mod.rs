//! CLI command implementations

pub(crate) mod check_dbs;
pub(crate) mod common;
pub(crate) mod index;
pub(crate) mod manifest;
pub(crate) mod objects;
pub(crate) mod prepare;
pub(crate) mod queries;
pub(crate) mod synopsis;
