use colored::*;

use crate::tagger::TagReport;

pub fn print_report(report: &TagReport, format: &str) {
    match render_report(report, format) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("{} {}", "Failed to serialize report:".red(), e),
    }
}

/// The table ends with the bare version id so scripts can take the last line;
/// the JSON document carries it as `version.id`.
pub fn render_report(report: &TagReport, format: &str) -> Result<String, serde_json::Error> {
    if format == "json" {
        return serde_json::to_string_pretty(report);
    }

    let mut lines = Vec::new();
    let action = if report.created { "Created" } else { "Reused" };
    lines.push(format!(
        "{} version {} {}",
        action.green().bold(),
        report.version.name.bright_blue().bold(),
        format!("(id {})", report.version.id).dimmed()
    ));

    if report.tagged.is_empty() && report.skipped.is_empty() {
        lines.push("No issues in changelog.".dimmed().to_string());
    }

    for key in &report.tagged {
        lines.push(format!("  {} {}", "✓".green(), key));
    }
    for skipped in &report.skipped {
        lines.push(format!(
            "  {} {} {}",
            "✗".red(),
            skipped.key,
            skipped.reason.bright_black()
        ));
    }

    if !report.skipped.is_empty() {
        lines.push(
            format!(
                "Tagged {} of {} issues",
                report.tagged.len(),
                report.tagged.len() + report.skipped.len()
            )
            .yellow()
            .to_string(),
        );
    }

    lines.push(report.version_id().to_string());
    Ok(lines.join("\n"))
}

/// Masks all but the last few characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Version;
    use crate::tagger::SkippedIssue;

    fn report() -> TagReport {
        TagReport {
            version: Version {
                id: "10012".to_string(),
                name: "2.0.0".to_string(),
                description: None,
                archived: false,
                released: false,
                start_date: Some("2026-10-17".to_string()),
                project_id: Some(10000),
            },
            created: true,
            tagged: vec!["PROJ-2".to_string()],
            skipped: vec![SkippedIssue {
                key: "PROJ-1".to_string(),
                reason: "Jira request failed [404]: gone".to_string(),
            }],
        }
    }

    #[test]
    fn test_table_ends_with_version_id() {
        let text = render_report(&report(), "table").unwrap();
        assert_eq!(text.lines().last(), Some("10012"));
        assert!(text.contains("PROJ-1"));
    }

    #[test]
    fn test_json_is_a_single_document_with_version_id() {
        let text = render_report(&report(), "json").unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["version"]["id"], "10012");
        assert_eq!(value["skipped"][0]["key"], "PROJ-1");
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("T0PS3CR3T"), "*****CR3T");
        assert_eq!(mask_secret("abc"), "***");
        assert_eq!(mask_secret(""), "");
    }
}
