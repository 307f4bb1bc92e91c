use nlsql_schema::CoverageGap;

/// Parses the analyzer output as a JSON array of gaps.
///
/// Agents often wrap JSON in a Markdown code fence; a surrounding fence is stripped first.
pub fn parse_gaps(output: &str) -> Result<Vec<CoverageGap>, serde_json::Error> {
    serde_json::from_str(strip_code_fence(output))
}

/// Keeps high-priority missing gaps, in analyzer order.
pub fn select_actionable(gaps: Vec<CoverageGap>) -> Vec<CoverageGap> {
    gaps.into_iter().filter(CoverageGap::is_actionable).collect()
}

fn strip_code_fence(output: &str) -> &str {
    let trimmed = output.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. `json`) on the opening fence line.
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAPS: &str = r#"[
        {"feature":"favorites","description":"star a query","priority":"high",
         "coverage_status":"missing","suggested_test_file":"e2e/favorites.spec.ts"},
        {"feature":"csv","description":"download table","priority":"medium",
         "coverage_status":"missing","suggested_test_file":"e2e/csv.spec.ts"},
        {"feature":"upload","description":"upload json","priority":"high",
         "coverage_status":"partial","suggested_test_file":"e2e/upload.spec.ts"},
        {"feature":"delete","description":"delete favorite","priority":"high",
         "coverage_status":"missing","suggested_test_file":"e2e/delete.spec.ts"}
    ]"#;

    #[test]
    fn parses_plain_json() {
        assert_eq!(parse_gaps(GAPS).unwrap().len(), 4);
    }

    #[test]
    fn parses_fenced_json() {
        let fenced = format!("```json\n{GAPS}\n```\n");
        assert_eq!(parse_gaps(&fenced).unwrap().len(), 4);

        let bare_fence = format!("```\n{GAPS}\n```");
        assert_eq!(parse_gaps(&bare_fence).unwrap().len(), 4);
    }

    #[test]
    fn rejects_non_list_output() {
        assert!(parse_gaps("no gaps found").is_err());
        assert!(parse_gaps(r#"{"feature":"x"}"#).is_err());
    }

    #[test]
    fn selects_high_missing_in_order() {
        let selected = select_actionable(parse_gaps(GAPS).unwrap());
        let features: Vec<_> = selected.iter().map(|g| g.feature.as_str()).collect();
        assert_eq!(features, vec!["favorites", "delete"]);
    }

    #[test]
    fn empty_list_selects_nothing() {
        assert!(select_actionable(parse_gaps("[]").unwrap()).is_empty());
    }
}
