pub mod cache;
pub mod details;
pub mod discover;
pub mod featured;
pub mod history;
pub mod identify;
pub mod search;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum HistoryCommands {
    /// Show recent searches, newest first
    List,

    /// Forget every recorded search
    Clear,
}

#[derive(Subcommand)]
pub enum CacheCommands {
    /// Show entry counts and freshness
    Stats,

    /// Drop the cached record for one plant
    ///
    /// Examples:
    ///   leaflens cache invalidate "Monstera deliciosa"
    Invalidate {
        /// Scientific name (parenthetical annotations are ignored)
        name: String,
    },

    /// Remove every cached record
    Clear,
}
