//! Agora membership core: profiles, organisations, and the affiliation
//! workflow that connects them, over PostgreSQL with row-level security.

pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;

mod uuids;
