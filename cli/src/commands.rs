use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use evalboard_core::chart::bar_chart_option;
use evalboard_core::context::DashboardConfigExt;
use evalboard_core::{
    ChartRow, ColorMap, DashboardConfig, FilterOptions, Gateway, PendingUpload, Phase, Selection,
};

use crate::context::CliContext;

pub fn show_config<G>(ctx: &CliContext<G>) {
    println!("api_base_url: {}", ctx.config.api_base_url);
}

/// Persist a new base URL. The running session keeps its current server.
pub fn save_base_url(url: &str) -> Result<(), String> {
    let config = DashboardConfig::with_base_url(url.trim())
        .validate()
        .map_err(|e| e.to_string())?;
    let path = config.save().map_err(|e| e.to_string())?;
    println!(
        "api_base_url saved to {}; restart to connect to {}",
        path.display(),
        config.api_base_url
    );
    Ok(())
}

pub fn show_status<G: Gateway>(ctx: &CliContext<G>) {
    let session = ctx.driver.session();
    println!("phase: {}", phase_label(session.phase()));
    println!("uploaded: {}", session.is_uploaded());
    match session.pending_file() {
        Some(file) => println!("file: {} ({} bytes)", file.file_name, file.len()),
        None => println!("file: none"),
    }
    if session.phase() == Phase::Ready {
        print!("{}", format_selection(session.selection()));
    }
}

pub fn show_colors<G: Gateway>(ctx: &CliContext<G>) {
    print!("{}", format_colors(ctx.driver.session().colors()));
}

pub fn select_file<G: Gateway>(path: &str, ctx: &mut CliContext<G>) -> Result<(), String> {
    let file = PendingUpload::from_path(Path::new(path)).map_err(|e| e.to_string())?;
    println!("selected {} ({} bytes)", file.file_name, file.len());
    ctx.driver.select_file(file);
    Ok(())
}

pub async fn upload<G: Gateway>(path: Option<&str>, ctx: &mut CliContext<G>) -> Result<(), String> {
    if let Some(path) = path {
        select_file(path, ctx)?;
    }
    if ctx.driver.session().pending_file().is_none() {
        return Err("no file selected".to_string());
    }

    ctx.driver.upload().await;

    let session = ctx.driver.session();
    if !session.is_uploaded() {
        return Err("upload failed".to_string());
    }
    if session.phase() != Phase::Ready {
        return Err("uploaded, but filter options could not be loaded".to_string());
    }
    println!("uploaded; {} rows loaded", session.rows().len());
    Ok(())
}

pub fn show_filters<G: Gateway>(ctx: &CliContext<G>) {
    match ctx.driver.session().options() {
        Some(options) => print!("{}", format_options(options)),
        None => println!("No filter options loaded (upload a file first)"),
    }
}

pub async fn set_method<G: Gateway>(value: &str, ctx: &mut CliContext<G>) -> Result<(), String> {
    require_ready(ctx)?;
    ctx.driver.set_method(value).await;
    show_rows(ctx);
    Ok(())
}

pub async fn set_age<G: Gateway>(value: &str, ctx: &mut CliContext<G>) -> Result<(), String> {
    require_ready(ctx)?;
    ctx.driver.set_age(value).await;
    show_rows(ctx);
    Ok(())
}

pub async fn set_period<G: Gateway>(value: &str, ctx: &mut CliContext<G>) -> Result<(), String> {
    require_ready(ctx)?;
    ctx.driver.set_period(value).await;
    show_rows(ctx);
    Ok(())
}

pub async fn toggle_county<G: Gateway>(county: &str, ctx: &mut CliContext<G>) -> Result<(), String> {
    require_ready(ctx)?;
    ctx.driver.toggle_county(county).await;
    show_rows(ctx);
    Ok(())
}

pub fn show_rows<G: Gateway>(ctx: &CliContext<G>) {
    let session = ctx.driver.session();
    print!("{}", format_rows(session.rows(), session.categories()));
}

pub fn write_chart<G: Gateway>(out: &str, ctx: &CliContext<G>) -> Result<(), String> {
    let session = ctx.driver.session();
    let option = bar_chart_option(session.rows(), session.categories(), session.colors());
    let json = serde_json::to_string_pretty(&option).map_err(|e| e.to_string())?;
    std::fs::write(out, json).map_err(|e| format!("failed to write {out}: {e}"))?;
    println!("chart option written to {out}");
    Ok(())
}

pub fn exit() -> Result<(), String> {
    write!(std::io::stdout(), "quitting...").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())
}

fn require_ready<G: Gateway>(ctx: &CliContext<G>) -> Result<(), String> {
    if ctx.driver.session().phase() == Phase::Ready {
        Ok(())
    } else {
        Err("filters are not loaded yet (upload a file first)".to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Formatting
// ─────────────────────────────────────────────────────────────────────────────

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "idle",
        Phase::AwaitingUpload => "awaiting upload",
        Phase::AwaitingFilters => "awaiting filters",
        Phase::Ready => "ready",
    }
}

fn format_optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn format_selection(selection: &Selection) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "method: {}", selection.method);
    let _ = writeln!(out, "age: {}", format_optional(selection.age));
    let _ = writeln!(out, "period: {}", format_optional(selection.period));
    let _ = writeln!(out, "counties: {}", selection.counties.join(", "));
    out
}

pub fn format_options(options: &FilterOptions) -> String {
    let join = |values: Vec<String>| values.join(", ");
    let mut out = String::new();
    let _ = writeln!(out, "methods: {}", options.evaluation_methods.join(", "));
    let _ = writeln!(
        out,
        "ages: {}",
        join(options.ages.iter().map(|a| a.to_string()).collect())
    );
    let _ = writeln!(
        out,
        "periods: {}",
        join(options.training_periods.iter().map(|p| p.to_string()).collect())
    );
    let _ = writeln!(out, "counties: {}", options.counties.join(", "));
    out
}

pub fn format_colors(colors: &ColorMap) -> String {
    if colors.is_empty() {
        return "No color config loaded\n".to_string();
    }
    let mut entries: Vec<_> = colors.iter().collect();
    entries.sort();
    let mut out = String::new();
    for (category, color) in entries {
        let _ = writeln!(out, "{category:<30} {color}");
    }
    out
}

/// Render rows as a fixed-width table, one column per category
pub fn format_rows(rows: &[ChartRow], categories: &[String]) -> String {
    if rows.is_empty() {
        return "No data\n".to_string();
    }

    let mut out = String::new();
    let _ = write!(out, "{:<16}", "County");
    for category in categories {
        let _ = write!(out, " {category:>14}");
    }
    out.push('\n');
    let _ = writeln!(out, "{}", "-".repeat(16 + 15 * categories.len()));

    for row in rows {
        let _ = write!(out, "{:<16}", row.county);
        for category in categories {
            match row.get(category) {
                Some(value) => {
                    let _ = write!(out, " {value:>14.2}");
                }
                None => {
                    let _ = write!(out, " {:>14}", "-");
                }
            }
        }
        out.push('\n');
    }

    let _ = writeln!(out, "\nTotal: {} counties", rows.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use evalboard_core::gateway::fake::FakeGateway;
    use evalboard_core::{ChartData, EvaluationRecord};

    #[test]
    fn rows_table_marks_missing_categories() {
        let data = ChartData::from_records(&[
            EvaluationRecord::new("A", "m1", 10.0),
            EvaluationRecord::new("A", "m2", 20.0),
            EvaluationRecord::new("B", "m1", 5.0),
        ]);
        let table = format_rows(&data.rows, &data.categories);
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[0].starts_with("County"));
        assert!(lines[2].contains("10.00") && lines[2].contains("20.00"));
        assert!(lines[3].starts_with('B') && lines[3].trim_end().ends_with('-'));
        assert!(table.contains("Total: 2 counties"));
    }

    #[test]
    fn empty_rows_say_no_data() {
        assert_eq!(format_rows(&[], &[]), "No data\n");
    }

    #[test]
    fn selection_shows_unset_fields() {
        let selection = Selection {
            method: "x".to_string(),
            age: None,
            period: Some(2020),
            counties: vec!["C1".to_string()],
        };
        let text = format_selection(&selection);
        assert!(text.contains("age: -"));
        assert!(text.contains("period: 2020"));
    }

    #[test]
    fn blank_base_url_is_not_saved() {
        let err = save_base_url("   ").unwrap_err();
        assert!(err.contains("no API base URL configured"));
    }

    #[tokio::test]
    async fn selection_commands_require_uploaded_session() {
        let mut ctx = CliContext::with_gateway(
            DashboardConfig::with_base_url("http://localhost:8000"),
            FakeGateway::healthy(),
        );
        assert!(set_method("x", &mut ctx).await.is_err());
        assert!(upload(None, &mut ctx).await.is_err());
    }
}
