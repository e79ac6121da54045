// Composition root for the roster lock service.
//
// Responsibilities
// - Read config from the environment.
// - Instantiate the in memory collaborators, optionally seeded from a JSON file.
// - Wire them into the use case handlers shared through AppState.
// - Expose GraphQL and HTTP, spawn the lock and backfill workers.

pub mod config;
pub mod graphql;
pub mod http;
pub mod seed;
pub mod state;
pub mod workers;
