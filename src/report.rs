//! Plain-text rendering of a projected dashboard, used by headless mode and
//! the `snapshot` command.

use crate::projection::{DashboardView, FeedKind, KpiKind, ProjectedDashboard, ProjectedItem};
use crate::variant::DashboardVariant;
use std::fmt::Write;

const LOADING_LINE: &str = "Waiting for the first dashboard snapshot...";

/// Full multi-section report.
pub fn render_report(view: &DashboardView, variant: DashboardVariant) -> String {
    let dashboard = match view {
        DashboardView::Loading => return format!("{}\n", LOADING_LINE),
        DashboardView::Ready(dashboard) => dashboard,
    };

    let mut out = String::new();
    let _ = writeln!(out, "THREAT LEVEL: {}", dashboard.threat.label);
    let _ = writeln!(out);

    for card in &dashboard.kpis {
        let _ = writeln!(out, "{:<24}{:>12}", card.label, card.formatted);
    }

    if !dashboard.categories.is_empty() {
        let _ = writeln!(out, "\nCATEGORY DISTRIBUTION");
        for slice in &dashboard.categories {
            let _ = writeln!(out, "  {:<22}{:>6.1}%", slice.name, slice.share_percent);
        }
    }

    if !dashboard.toxicity.is_empty() {
        let _ = writeln!(out, "\nPLATFORM TOXICITY");
        for row in &dashboard.toxicity {
            let _ = writeln!(out, "  {:<22}{:>8}", row.source, row.count);
        }
    }

    write_feed(&mut out, variant.fake_feed_title(), dashboard.feed(FeedKind::Fake));
    write_feed(&mut out, variant.real_feed_title(), dashboard.feed(FeedKind::Real));
    out
}

fn write_feed(out: &mut String, title: &str, items: &[ProjectedItem]) {
    let _ = writeln!(out, "\n{}", title);
    if items.is_empty() {
        let _ = writeln!(out, "  (no items)");
        return;
    }
    for (index, item) in items.iter().enumerate() {
        let rank = item.rank.map(|rank| rank as usize).unwrap_or(index + 1);
        let _ = writeln!(out, "  #{} {} [{}]", rank, item.title, item.score_label);
        let _ = writeln!(out, "     {} | {}", item.source, item.category);
        let _ = writeln!(out, "     {}", item.summary);
        if let Some(evidence) = item.evidence_line() {
            let _ = writeln!(out, "     {}", evidence);
        }
        if let Some(url) = &item.url {
            let _ = writeln!(out, "     {}: {}", item.action_label, url);
        }
    }
}

/// One-line summary printed after each refresh in headless mode.
pub fn status_line(dashboard: &ProjectedDashboard) -> String {
    format!(
        "threat={} scanned={} deceptions={} verified={} monitors={} fake_items={} real_items={}",
        dashboard.threat.label,
        dashboard.kpi(KpiKind::Scanned),
        dashboard.kpi(KpiKind::Deceptions),
        dashboard.kpi(KpiKind::Verified),
        dashboard.kpi(KpiKind::Monitors),
        dashboard.trending_fake.len(),
        dashboard.trending_real.len(),
    )
}
