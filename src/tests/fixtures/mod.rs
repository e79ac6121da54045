pub mod lineups;
pub mod matchups;
pub mod pipeline;
pub mod snapshots;
