pub mod shared {
    pub mod core {
        pub mod primitives;
    }
    pub mod infrastructure {
        pub mod clock;
        pub mod league_data;
        pub mod snapshot_store;
    }
}

pub mod modules {
    pub mod roster_lock {
        pub mod core {
            pub mod errors;
            pub mod game_status;
            pub mod lineup;
            pub mod lock_policy;
            pub mod matchup;
            pub mod scoring;
            pub mod snapshot;
        }
        pub mod use_cases {
            pub mod generate_snapshots {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                }
            }
            pub mod lock_snapshots {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                }
            }
            pub mod audit_integrity {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                }
            }
            pub mod backfill_snapshots {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                }
            }
            pub mod reconcile_scores {
                pub mod frozen_cache;
                pub mod handler;
                pub mod projection;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod track_attribution {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                }
            }
            pub mod list_snapshots {
                pub mod handler;
                pub mod projection;
                pub mod inbound {
                    pub mod graphql;
                }
            }
        }
    }
}

pub mod shell;

#[cfg(test)]
pub mod tests {
    pub mod fixtures;
}
