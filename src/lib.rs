//! Terminal player lookup for the OpenDota statistics API: hero catalog,
//! player profile and recent matches.

pub mod config;
pub mod heroes;
pub mod http_client;
pub mod lookup_tables;
pub mod opendota_fetch;
pub mod provider;
pub mod state;
