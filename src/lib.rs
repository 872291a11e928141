//! Paginated collection walks and ticket analytics for the Freshservice API.
//!
//! The [`walker`] drains or caps paged collections served by any [`PageSource`];
//! the [`DirectoryCache`] keeps the agent and group directories for five minutes;
//! [`Analytics`] folds ticket sets into statistics, workload, and team comparison
//! reports.
//!
//! ```no_run
//! use freshstats::{Analytics, ClientConfig, DirectoryCache, FreshserviceClient, StatsRequest};
//!
//! # async fn run() -> freshstats::Result<()> {
//! let client = FreshserviceClient::new(&ClientConfig::from_env()?)?;
//! let analytics = Analytics::new(client, DirectoryCache::default());
//! let report = analytics
//!     .ticket_stats(&StatsRequest {
//!         group_id: Some(42),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{} tickets", report.stats.total_tickets);
//! # Ok(())
//! # }
//! ```

pub mod analytics;
pub mod client;
pub mod config;
pub mod constants;
pub mod cursor;
pub mod directory;
pub mod error;
pub mod response;
#[cfg(feature = "server")]
pub mod server;
pub mod walker;

pub use analytics::{
    Analytics, ComparisonRequest, Label, SearchRequest, StatsRequest, TeamComparison,
    TicketStatsReport, WorkloadReport, WorkloadRequest,
};
pub use client::{ApiKeyAuth, Collection, CollectionQuery, FreshserviceClient, PageSource, RecordPage};
pub use config::ClientConfig;
pub use cursor::PageCursor;
pub use directory::{DirectoryCache, DirectorySnapshot, LookupDirectory};
pub use error::{Error, ErrorDetails, Result};
pub use walker::{CollectionResult, WalkLimit, WalkRequest};
