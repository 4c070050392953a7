//! Dashboard variants
//!
//! The dashboard ships in three presentations that differ only in how much of
//! each description they show and in their visual theme. Everything else
//! (fetching, refresh cadence, projection) is shared.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DashboardVariant {
    /// Light "intelligence surveillance" layout.
    #[default]
    Classic,
    /// Editorial briefing layout.
    Briefing,
    /// Dark operator console.
    Console,
}

impl DashboardVariant {
    pub const ALL: [DashboardVariant; 3] = [
        DashboardVariant::Classic,
        DashboardVariant::Briefing,
        DashboardVariant::Console,
    ];

    /// Number of description characters kept before the ellipsis marker.
    pub const fn truncation_len(self) -> usize {
        match self {
            DashboardVariant::Classic => 100,
            DashboardVariant::Briefing => 110,
            DashboardVariant::Console => 120,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            DashboardVariant::Classic => "classic",
            DashboardVariant::Briefing => "briefing",
            DashboardVariant::Console => "console",
        }
    }

    /// Heading shown above the fake-news feed.
    pub const fn fake_feed_title(self) -> &'static str {
        match self {
            DashboardVariant::Classic => "THREAT INTEL",
            DashboardVariant::Briefing => "DEBUNKED CLAIMS",
            DashboardVariant::Console => "DECEPTION STREAM",
        }
    }

    /// Heading shown above the verified-news feed.
    pub const fn real_feed_title(self) -> &'static str {
        match self {
            DashboardVariant::Classic => "VERIFIED ASSETS",
            DashboardVariant::Briefing => "CONFIRMED REPORTS",
            DashboardVariant::Console => "VERIFIED STREAM",
        }
    }
}

impl Display for DashboardVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DashboardVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Unknown dashboard variant '{}'. Expected one of: classic, briefing, console",
                    s
                )
            })
    }
}
