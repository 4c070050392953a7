//! Render projection
//!
//! Turns a possibly-partial [`DashboardSnapshot`] into a fully-defaulted display
//! model. Every consumer of remote data goes through here; nothing downstream
//! ever looks at an `Option` from the wire.

use crate::consts::cli_consts::{ELLIPSIS, fallback};
use crate::snapshot::{CategoryEntry, DashboardSnapshot, NewsItem, ThreatLevel};
use crate::variant::DashboardVariant;

/// Number of colours in the category palette.
pub const PALETTE_SIZE: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    /// No snapshot has been received yet.
    Loading,
    Ready(Box<ProjectedDashboard>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedDashboard {
    pub threat: ThreatIndicator,
    pub kpis: Vec<KpiCard>,
    pub categories: Vec<CategorySlice>,
    pub toxicity: Vec<ToxicityRow>,
    pub trending_fake: Vec<ProjectedItem>,
    pub trending_real: Vec<ProjectedItem>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ThreatTone {
    /// High threat.
    Red,
    /// Medium threat.
    Yellow,
    /// Anything else, including an unknown level.
    Green,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreatIndicator {
    pub label: String,
    pub tone: ThreatTone,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KpiKind {
    Scanned,
    Deceptions,
    Verified,
    Monitors,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiCard {
    pub kind: KpiKind,
    pub label: &'static str,
    pub value: u64,
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    pub name: String,
    pub value: f64,
    /// Share of the distribution total, 0..=100.
    pub share_percent: f64,
    /// Index into the category palette.
    pub palette_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToxicityRow {
    pub source: String,
    pub count: u64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FeedKind {
    Fake,
    Real,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedItem {
    pub rank: Option<u32>,
    pub title: String,
    pub summary: String,
    pub source: String,
    pub category: String,
    pub region: Option<String>,
    pub score_percent: u8,
    pub score_label: String,
    pub action_label: &'static str,
    pub url: Option<String>,
    pub evidence: Vec<String>,
}

impl ProjectedItem {
    /// Evidence references joined for a single line, if the backend sent any.
    pub fn evidence_line(&self) -> Option<String> {
        let evidence: Vec<&str> = self
            .evidence
            .iter()
            .map(|entry| entry.trim())
            .filter(|entry| !entry.is_empty())
            .collect();
        (!evidence.is_empty()).then(|| format!("Evidence: {}", evidence.join("; ")))
    }
}

impl ProjectedDashboard {
    pub fn kpi(&self, kind: KpiKind) -> u64 {
        self.kpis
            .iter()
            .find(|card| card.kind == kind)
            .map(|card| card.value)
            .unwrap_or(0)
    }

    pub fn feed(&self, kind: FeedKind) -> &[ProjectedItem] {
        match kind {
            FeedKind::Fake => &self.trending_fake,
            FeedKind::Real => &self.trending_real,
        }
    }
}

/// Projects a snapshot for display. An absent snapshot projects to `Loading`.
pub fn project(snapshot: Option<&DashboardSnapshot>, variant: DashboardVariant) -> DashboardView {
    match snapshot {
        Some(snapshot) => DashboardView::Ready(Box::new(project_snapshot(snapshot, variant))),
        None => DashboardView::Loading,
    }
}

pub fn project_snapshot(snapshot: &DashboardSnapshot, variant: DashboardVariant) -> ProjectedDashboard {
    let stats = snapshot.stats.clone().unwrap_or_default();
    let truncate_at = variant.truncation_len();

    let kpis = vec![
        kpi(KpiKind::Scanned, "Scanned Nodes", stats.total_scraped),
        kpi(KpiKind::Deceptions, "Deceptions Identified", stats.fake_detected),
        kpi(KpiKind::Verified, "Verified Intelligence", stats.real_verified),
        kpi(KpiKind::Monitors, "Active Monitors", stats.active_monitors),
    ];

    let trending_fake = snapshot
        .trending_fake
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|item| project_item(item, FeedKind::Fake, truncate_at))
        .collect();
    let trending_real = snapshot
        .trending_real
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|item| project_item(item, FeedKind::Real, truncate_at))
        .collect();

    let toxicity = snapshot
        .toxicity_data
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|entry| ToxicityRow {
            source: entry
                .source
                .clone()
                .unwrap_or_else(|| fallback::SOURCE.to_string()),
            count: entry.count.unwrap_or(0),
        })
        .collect();

    ProjectedDashboard {
        threat: classify_threat(stats.threat_level.as_ref()),
        kpis,
        categories: project_categories(snapshot),
        toxicity,
        trending_fake,
        trending_real,
    }
}

fn kpi(kind: KpiKind, label: &'static str, value: Option<u64>) -> KpiCard {
    let value = value.unwrap_or(0);
    KpiCard {
        kind,
        label,
        value,
        formatted: format_count(value),
    }
}

fn project_categories(snapshot: &DashboardSnapshot) -> Vec<CategorySlice> {
    let entries = snapshot.category_distribution.as_deref().unwrap_or_default();
    let counted = |entry: &CategoryEntry| entry.value.filter(|v| v.is_finite() && *v > 0.0);

    // Values are scaled by the largest one first so the sum stays finite.
    let largest = entries.iter().filter_map(counted).fold(0.0_f64, f64::max);
    let scaled_total: f64 = if largest > 0.0 {
        entries.iter().filter_map(counted).map(|v| v / largest).sum()
    } else {
        0.0
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let value = entry.value.unwrap_or(0.0);
            let share_percent = match counted(entry) {
                Some(v) if scaled_total > 0.0 => {
                    (v / largest * 100.0 / scaled_total).clamp(0.0, 100.0)
                }
                _ => 0.0,
            };
            CategorySlice {
                name: entry
                    .name
                    .clone()
                    .unwrap_or_else(|| fallback::CATEGORY.to_string()),
                value,
                share_percent,
                palette_index: index % PALETTE_SIZE,
            }
        })
        .collect()
}

fn project_item(item: &NewsItem, kind: FeedKind, truncate_at: usize) -> ProjectedItem {
    let (score, suffix, action_label) = match kind {
        FeedKind::Fake => (item.fake_score.unwrap_or(0.0), "RISK", "Audit Evidence"),
        FeedKind::Real => (
            item.credibility_score
                .unwrap_or(f64::from(fallback::CREDIBILITY_SCORE)),
            "TRUST",
            "Full Report",
        ),
    };
    let score_percent = score.round().clamp(0.0, 100.0) as u8;

    // Fake claims carry their origin in `platforms` rather than `source`.
    let source = item
        .source
        .clone()
        .or_else(|| {
            item.platforms
                .as_ref()
                .and_then(|platforms| platforms.first().cloned())
        })
        .unwrap_or_else(|| fallback::SOURCE.to_string());

    ProjectedItem {
        rank: item.rank,
        title: item
            .title
            .clone()
            .unwrap_or_else(|| fallback::TITLE.to_string()),
        summary: summarize(item.description.as_deref(), truncate_at),
        source,
        category: item
            .category
            .clone()
            .unwrap_or_else(|| fallback::CATEGORY.to_string()),
        region: item.region.clone(),
        score_percent,
        score_label: format!("{}% {}", score_percent, suffix),
        action_label,
        url: item.url.clone().filter(|url| !url.trim().is_empty()),
        evidence: item.evidence.clone().unwrap_or_default(),
    }
}

/// Summary text for a description. The prefix is always followed by the
/// ellipsis marker, even when nothing was cut.
pub fn summarize(description: Option<&str>, truncate_at: usize) -> String {
    match description {
        Some(text) => truncate_description(text, truncate_at),
        None => fallback::DESCRIPTION.to_string(),
    }
}

/// Keeps the first `max_chars` characters and appends the ellipsis marker.
pub fn truncate_description(text: &str, max_chars: usize) -> String {
    let mut summary: String = text.chars().take(max_chars).collect();
    summary.push_str(ELLIPSIS);
    summary
}

pub fn classify_threat(level: Option<&ThreatLevel>) -> ThreatIndicator {
    let tone = match level {
        Some(ThreatLevel::High) => ThreatTone::Red,
        Some(ThreatLevel::Medium) => ThreatTone::Yellow,
        _ => ThreatTone::Green,
    };
    let label = level
        .map(|level| level.as_str().to_uppercase())
        .unwrap_or_else(|| fallback::THREAT_LABEL.to_string());
    ThreatIndicator { label, tone }
}

/// Formats a count with thousands separators: `1234567` -> `1,234,567`.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Stats;
    use serde_json::json;

    fn ready(view: DashboardView) -> ProjectedDashboard {
        match view {
            DashboardView::Ready(dashboard) => *dashboard,
            DashboardView::Loading => panic!("expected a ready dashboard"),
        }
    }

    #[test]
    fn absent_snapshot_projects_to_loading() {
        assert_eq!(project(None, DashboardVariant::Classic), DashboardView::Loading);
    }

    #[test]
    fn all_absent_fields_use_fallbacks() {
        let snapshot = DashboardSnapshot {
            trending_fake: Some(vec![NewsItem::default()]),
            trending_real: Some(vec![NewsItem::default()]),
            ..DashboardSnapshot::default()
        };

        for variant in DashboardVariant::ALL {
            let dashboard = ready(project(Some(&snapshot), variant));
            assert!(dashboard.kpis.iter().all(|card| card.value == 0));
            assert!(dashboard.kpis.iter().all(|card| card.formatted == "0"));
            assert_eq!(dashboard.threat.label, "UNKNOWN");
            assert_eq!(dashboard.threat.tone, ThreatTone::Green);
            assert!(dashboard.categories.is_empty());
            assert!(dashboard.toxicity.is_empty());

            let fake = &dashboard.trending_fake[0];
            assert_eq!(fake.title, "Untitled Intelligence");
            assert_eq!(fake.summary, "No description available");
            assert_eq!(fake.source, "Unknown Source");
            assert_eq!(fake.score_label, "0% RISK");
            assert_eq!(fake.url, None);

            let real = &dashboard.trending_real[0];
            assert_eq!(real.score_label, "98% TRUST");
            assert_eq!(real.action_label, "Full Report");
        }
    }

    #[test]
    fn empty_snapshot_has_empty_feeds() {
        let dashboard = ready(project(
            Some(&DashboardSnapshot::default()),
            DashboardVariant::Console,
        ));
        assert!(dashboard.trending_fake.is_empty());
        assert!(dashboard.trending_real.is_empty());
        assert_eq!(dashboard.kpis.len(), 4);
    }

    #[test]
    fn long_description_is_cut_to_variant_length() {
        let description = "x".repeat(200);
        for variant in DashboardVariant::ALL {
            let summary = summarize(Some(&description), variant.truncation_len());
            assert_eq!(summary.chars().count(), variant.truncation_len() + ELLIPSIS.len());
            assert!(summary.ends_with("..."));
        }
    }

    #[test]
    fn short_description_still_gets_marker() {
        assert_eq!(truncate_description("Short claim", 100), "Short claim...");
    }

    #[test]
    fn truncation_never_splits_characters() {
        let description = "é".repeat(150);
        let summary = truncate_description(&description, 100);
        assert_eq!(summary.chars().count(), 103);
    }

    #[test]
    fn threat_levels_map_to_tones() {
        assert_eq!(classify_threat(Some(&ThreatLevel::High)).tone, ThreatTone::Red);
        assert_eq!(
            classify_threat(Some(&ThreatLevel::Medium)).tone,
            ThreatTone::Yellow
        );
        assert_eq!(classify_threat(Some(&ThreatLevel::Low)).tone, ThreatTone::Green);
        assert_eq!(
            classify_threat(Some(&ThreatLevel::Other("Moderate".into()))).tone,
            ThreatTone::Green
        );
        assert_eq!(classify_threat(None).tone, ThreatTone::Green);
        assert_eq!(classify_threat(Some(&ThreatLevel::High)).label, "HIGH");
    }

    #[test]
    fn category_shares_and_palette() {
        let snapshot = DashboardSnapshot {
            category_distribution: Some(
                (0..8)
                    .map(|i| CategoryEntry {
                        name: if i == 3 { None } else { Some(format!("C{}", i)) },
                        value: Some(if i == 0 { 0.0 } else { 10.0 }),
                    })
                    .collect(),
            ),
            ..DashboardSnapshot::default()
        };
        let dashboard = project_snapshot(&snapshot, DashboardVariant::Classic);
        assert_eq!(dashboard.categories[3].name, "General");
        assert_eq!(dashboard.categories[6].palette_index, 0);
        assert_eq!(dashboard.categories[7].palette_index, 1);
        assert_eq!(dashboard.categories[0].share_percent, 0.0);
        let total: f64 = dashboard.categories.iter().map(|c| c.share_percent).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn category_shares_stay_finite_for_huge_values() {
        let snapshot = DashboardSnapshot {
            category_distribution: Some(vec![
                CategoryEntry {
                    name: Some("A".into()),
                    value: Some(1e308),
                },
                CategoryEntry {
                    name: Some("B".into()),
                    value: Some(1e308),
                },
                CategoryEntry {
                    name: Some("C".into()),
                    value: Some(-5.0),
                },
            ]),
            ..DashboardSnapshot::default()
        };
        let dashboard = project_snapshot(&snapshot, DashboardVariant::Classic);
        let shares: Vec<f64> = dashboard.categories.iter().map(|c| c.share_percent).collect();
        assert!(shares.iter().all(|share| share.is_finite()));
        assert!((shares[0] - 50.0).abs() < 1e-9);
        assert!((shares[1] - 50.0).abs() < 1e-9);
        assert_eq!(shares[2], 0.0);
    }

    #[test]
    fn fake_item_source_falls_back_to_platform() {
        let item = NewsItem {
            platforms: Some(vec!["BBC Verify".into()]),
            fake_score: Some(90.6),
            ..NewsItem::default()
        };
        let projected = project_item(&item, FeedKind::Fake, 100);
        assert_eq!(projected.source, "BBC Verify");
        assert_eq!(projected.score_percent, 91);
    }

    #[test]
    fn blank_url_is_not_openable() {
        let item = NewsItem {
            url: Some("   ".into()),
            ..NewsItem::default()
        };
        assert_eq!(project_item(&item, FeedKind::Real, 100).url, None);
    }

    #[test]
    fn formats_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn end_to_end_payload_projection() {
        let body = json!({
            "stats": {"totalScraped": 100, "fakeDetected": 10, "realVerified": 85, "threatLevel": "High"},
            "categoryDistribution": [{"name": "Finance", "value": 40}, {"name": "Health", "value": 60}],
            "trendingFake": [{"id": 1, "title": "X", "fakeScore": 91}],
            "trendingReal": [{"id": 2, "title": "Y"}]
        });
        let snapshot = DashboardSnapshot::from_value(&body).unwrap();
        let dashboard = ready(project(Some(&snapshot), DashboardVariant::Classic));

        assert_eq!(dashboard.kpi(KpiKind::Scanned), 100);
        assert_eq!(dashboard.kpi(KpiKind::Deceptions), 10);
        assert_eq!(dashboard.kpi(KpiKind::Verified), 85);
        assert_eq!(dashboard.threat.label, "HIGH");
        assert_eq!(dashboard.threat.tone, ThreatTone::Red);
        assert_eq!(dashboard.categories[1].share_percent, 60.0);

        assert_eq!(dashboard.trending_fake.len(), 1);
        assert_eq!(dashboard.trending_fake[0].score_label, "91% RISK");
        assert_eq!(dashboard.trending_real.len(), 1);
        assert_eq!(dashboard.trending_real[0].title, "Y");
        assert_eq!(dashboard.trending_real[0].summary, "No description available");
    }

    #[test]
    fn stats_object_with_some_fields() {
        let snapshot = DashboardSnapshot {
            stats: Some(Stats {
                fake_detected: Some(12_000),
                ..Stats::default()
            }),
            ..DashboardSnapshot::default()
        };
        let dashboard = project_snapshot(&snapshot, DashboardVariant::Briefing);
        assert_eq!(dashboard.kpis[1].formatted, "12,000");
        assert_eq!(dashboard.kpi(KpiKind::Scanned), 0);
    }
}
