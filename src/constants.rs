//! Global constants: API defaults, cache and walk limits, ticket status codes, and user agent helpers
// Constants for version and binary identification

/// Binary name used in user agents and server responses
pub const BINARY_NAME: &str = "freshstats";

/// Package version from Cargo.toml (set at compile time)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the user agent string for HTTP requests
pub fn user_agent() -> String {
    format!("{}/{}", BINARY_NAME, VERSION)
}

/// Returns the API base URL for a Freshservice domain (e.g. "acme.freshservice.com")
pub fn api_base_url(domain: &str) -> String {
    format!("https://{}/api/v2", domain.trim_end_matches('/'))
}

// ============================================================================
// Environment Variables
// ============================================================================

/// Freshservice domain, without scheme
pub const ENV_DOMAIN: &str = "FRESHSERVICE_DOMAIN";

/// Freshservice API key
pub const ENV_API_KEY: &str = "FRESHSERVICE_APIKEY";

// ============================================================================
// Pagination Constants
// ============================================================================

/// Page size the platform uses when the caller does not ask for one
pub const DEFAULT_PAGE_SIZE: usize = 30;

/// The ticket filter endpoint ignores `per_page` and always pages at this size
pub const FILTER_PAGE_SIZE: usize = 30;

/// Largest `per_page` the list endpoints accept
pub const MAX_PAGE_SIZE: usize = 100;

/// Default cap for bounded ticket searches
pub const DEFAULT_MAX_RESULTS: usize = 500;

/// Hard ceiling for bounded ticket searches; larger requests are clamped
pub const MAX_RESULTS_CEILING: usize = 1000;

// ============================================================================
// Cache Constants
// ============================================================================

/// Agent/group directory time-to-live (5 minutes)
pub const DIRECTORY_TTL_SECS: u64 = 300;

// ============================================================================
// Analytics Constants
// ============================================================================

/// Relative period used by the workload report when no bounds are given
pub const DEFAULT_WORKLOAD_PERIOD: &str = "30d";

/// Trailing window used by the team comparison when no start is given
pub const DEFAULT_COMPARISON_DAYS: i64 = 30;

/// Minimum and maximum number of groups in a team comparison
pub const MIN_COMPARISON_GROUPS: usize = 2;
pub const MAX_COMPARISON_GROUPS: usize = 10;

/// Size of the per-group agent leaderboard
pub const TOP_AGENTS: usize = 5;

/// Ticket status codes used by the workload and comparison folds
pub const STATUS_OPEN: i64 = 2;
pub const STATUS_RESOLVED: i64 = 4;
pub const STATUS_CLOSED: i64 = 5;

// ============================================================================
// Timeout Constants (in seconds)
// ============================================================================

/// Default HTTP request timeout
pub const HTTP_TIMEOUT_SECS: u64 = 60;

// ============================================================================
// Server Constants
// ============================================================================

/// Default HTTP server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default HTTP server bind address
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_url() {
        assert_eq!(
            api_base_url("acme.freshservice.com"),
            "https://acme.freshservice.com/api/v2"
        );
        assert_eq!(
            api_base_url("acme.freshservice.com/"),
            "https://acme.freshservice.com/api/v2"
        );
    }

    #[test]
    fn test_user_agent() {
        assert!(user_agent().starts_with("freshstats/"));
    }
}
