pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! This module contains all configuration constants for the dashboard client,
    //! organized by functional area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Buffer size of the activity event channel
    pub const EVENT_QUEUE_SIZE: usize = 100;

    /// Buffer size of the fetch outcome channel
    pub const OUTCOME_QUEUE_SIZE: usize = 16;

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    /// Base URL used when nothing else is configured
    pub const DEFAULT_API_URL: &str = "http://localhost:8000";

    /// Environment variable that overrides the configured base URL
    pub const API_URL_ENV_VAR: &str = "CRISISTRUTH_API_URL";

    /// Path of the statistics endpoint, relative to the base URL
    pub const DASHBOARD_STATS_ENDPOINT: &str = "dashboard-stats";

    /// Dashboard refresh configuration
    pub mod refresh {
        /// Interval between dashboard refreshes (seconds)
        pub const REFRESH_INTERVAL_SECS: u64 = 30;
    }

    /// HTTP client timeouts
    pub mod http {
        use std::time::Duration;

        /// Connection timeout (seconds)
        pub const CONNECT_TIMEOUT_SECS: u64 = 10;

        /// Overall request timeout (seconds)
        pub const REQUEST_TIMEOUT_SECS: u64 = 10;

        pub const fn connect_timeout() -> Duration {
            Duration::from_secs(CONNECT_TIMEOUT_SECS)
        }

        pub const fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }
    }

    // =============================================================================
    // PROJECTION FALLBACKS
    // =============================================================================

    /// Display fallbacks for absent snapshot fields
    pub mod fallback {
        pub const TITLE: &str = "Untitled Intelligence";
        pub const DESCRIPTION: &str = "No description available";
        pub const SOURCE: &str = "Unknown Source";
        pub const CATEGORY: &str = "General";
        pub const THREAT_LABEL: &str = "UNKNOWN";

        /// Credibility the backend assigns to every verified item
        pub const CREDIBILITY_SCORE: u8 = 98;
    }

    /// Marker appended to truncated descriptions
    pub const ELLIPSIS: &str = "...";
}
