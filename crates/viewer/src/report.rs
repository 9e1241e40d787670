//! Plain-text panels printed next to the rendered map.

use inventory_model::InventorySummary;
use mapview::{MapStatistics, NodeDetails, legend};

pub const EMPTY_MESSAGE: &str = "Register some locations, units and items to see the interactive map";

fn panel(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn info_panel(details: Option<&NodeDetails>) -> String {
    let Some(details) = details else {
        return "Click a node to see its details\n".to_string();
    };

    let mut lines = vec![
        details.name.clone(),
        format!("  type: {}", details.kind.label()),
    ];
    if let Some(description) = &details.description {
        lines.push(format!("  description: {description}"));
    }
    if let Some(status) = &details.status {
        lines.push(format!("  status: {}", status.label()));
    }
    if details.children > 0 {
        lines.push(format!("  children: {}", details.children));
    }
    panel(lines)
}

pub fn legend_panel() -> String {
    let mut lines = vec!["Legend".to_string()];
    lines.extend(
        legend()
            .iter()
            .map(|entry| format!("  {} {}", entry.color, entry.label)),
    );
    panel(lines)
}

pub fn statistics_panel(stats: &MapStatistics) -> String {
    let mut lines = vec![
        "Statistics".to_string(),
        format!("  locations: {}", stats.locations),
        format!("  units: {}", stats.units),
        format!("  items: {}", stats.items),
    ];
    if stats.hidden_items > 0 {
        lines.push(format!("  not drawn: {}", stats.hidden_items));
    }
    panel(lines)
}

pub fn summary_panel(summary: &InventorySummary) -> String {
    let mut lines = vec!["Summary".to_string()];
    lines.extend(
        summary
            .items_by_status
            .iter()
            .map(|(status, count)| format!("  {status}: {count}")),
    );
    lines.push(format!(
        "  locations in maintenance: {}",
        summary.locations_in_maintenance
    ));
    for location in &summary.locations {
        let hub = if summary.hub.as_deref() == Some(location.id.as_str()) {
            " [hub]"
        } else {
            ""
        };
        lines.push(format!(
            "  {}{} ({} units, {} items, {})",
            location.name,
            hub,
            location.units,
            location.items,
            location.status.label()
        ));
    }
    for unit in &summary.units {
        let location = unit.location.as_deref().unwrap_or("?");
        lines.push(format!(
            "    {} @ {}: {} items",
            unit.name, location, unit.items
        ));
    }
    if !summary.recent_items.is_empty() {
        lines.push("Recent items".to_string());
        for item in &summary.recent_items {
            lines.push(format!(
                "  {} @ {} ({})",
                item.name,
                item.location.as_deref().unwrap_or("?"),
                item.status.label()
            ));
        }
    }
    panel(lines)
}
