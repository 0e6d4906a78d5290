use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::grabber::GrabSummary;

pub fn render_summary_table(summary: &GrabSummary) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Program", "Output", "Entries", "Path"]);

    let status_cell = if summary.export.is_success() {
        Cell::new(summary.export.status).fg(Color::Green)
    } else {
        Cell::new(summary.export.status).fg(Color::Yellow)
    };
    table.add_row(Row::from(vec![
        Cell::new(summary.program.to_string()),
        Cell::new("scope export"),
        status_cell,
        Cell::new(summary.workspace.join(crate::workspace::SCOPE_CSV_FILE).display()),
    ]));
    table.add_row(Row::from(vec![
        Cell::new(""),
        Cell::new("exact URLs"),
        Cell::new(summary.exact_urls),
        Cell::new(summary.urls_file.display()),
    ]));
    table.add_row(Row::from(vec![
        Cell::new(""),
        Cell::new("wildcards"),
        Cell::new(summary.wildcard_patterns),
        Cell::new(summary.wildcards_file.display()),
    ]));
    if summary.skipped > 0 {
        table.add_row(Row::from(vec![
            Cell::new(""),
            Cell::new("skipped (other types)"),
            Cell::new(summary.skipped),
            Cell::new("-"),
        ]));
    }
    if let Some(path) = &summary.proxy_config {
        table.add_row(Row::from(vec![
            Cell::new(""),
            Cell::new("proxy config"),
            Cell::new("-"),
            Cell::new(path.display()),
        ]));
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::str::FromStr;

    use chrono::Utc;

    use crate::fetcher::ExportReport;
    use crate::grabber::GrabSummary;
    use crate::output::{render_json, render_summary_table};
    use crate::program::ProgramHandle;

    fn summary(skipped: usize, proxy: bool) -> GrabSummary {
        let workspace = PathBuf::from("out/acme");
        GrabSummary {
            program: ProgramHandle::from_str("acme").expect("valid handle"),
            export: ExportReport {
                url: "https://hackerone.com/teams/acme/assets/download_csv.csv".to_string(),
                status: 200,
                bytes: 120,
                content_type: Some("text/csv".to_string()),
            },
            exact_urls: 3,
            wildcard_patterns: 2,
            skipped,
            urls_file: workspace.join("URLs.txt"),
            wildcards_file: workspace.join("Wildcards.txt"),
            proxy_config: proxy.then(|| workspace.join("burp_config.json")),
            workspace,
            grabbed_at: Utc::now(),
        }
    }

    #[test]
    fn table_lists_outputs() {
        let rendered = render_summary_table(&summary(0, false));
        assert!(rendered.contains("acme"));
        assert!(rendered.contains("URLs.txt"));
        assert!(rendered.contains("Wildcards.txt"));
        assert!(!rendered.contains("skipped"));
        assert!(!rendered.contains("burp_config.json"));
    }

    #[test]
    fn table_shows_skipped_and_proxy_rows() {
        let rendered = render_summary_table(&summary(4, true));
        assert!(rendered.contains("skipped"));
        assert!(rendered.contains("burp_config.json"));
    }

    #[test]
    fn json_uses_plain_program_string() {
        let rendered = render_json(&summary(0, false)).expect("render json");
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");
        assert_eq!(value["program"], "acme");
        assert_eq!(value["exact_urls"], 3);
        assert_eq!(value["export"]["status"], 200);
        assert!(value["proxy_config"].is_null());
    }
}
