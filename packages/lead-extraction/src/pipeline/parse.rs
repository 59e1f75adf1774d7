//! Parsing model replies into verdicts.
//!
//! Pure functions: the same text always yields the same verdict. Every
//! format shares the lead validation rules in [`finish_lead`].

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use url::Url;

use crate::error::{ExtractionError, ExtractionResult};
use crate::types::{
    config::OutputFormat,
    verdict::{ExtractionVerdict, Lead},
};

static RE_FENCED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```[A-Za-z0-9_-]*[ \t]*\r?\n?(.*?)```").unwrap());

static RE_TABLE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\|?[\s:\-|]+\|?$").unwrap());

/// A leading "Irrelevant" that ends the reply or is followed by punctuation
/// or a new line, e.g. `Irrelevant - job posting.`
static RE_IRRELEVANT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)^[\s"'*_]*irrelevant[\s"'*_]*(?:$|\n|[.,;:!()\-\x{2013}\x{2014}])"#)
        .unwrap()
});

/// Header cells that mark a row as column titles, not data.
const HEADER_CELLS: [&str; 3] = ["company", "company name", "company_name"];

/// Parse a reply in the given format.
///
/// `fallback_url` (the hit's own link) is used when the reply carries no
/// usable source URL.
pub fn parse_verdict(
    text: &str,
    format: OutputFormat,
    fallback_url: &str,
) -> ExtractionResult<ExtractionVerdict> {
    let body = strip_code_fences(text);
    if body.is_empty() {
        return Err(ExtractionError::Parse("empty reply".into()));
    }

    match format {
        OutputFormat::Json => parse_json(body, fallback_url),
        OutputFormat::PipeDelimited | OutputFormat::MarkdownTable => {
            parse_delimited(body, fallback_url)
        }
    }
}

/// Remove a surrounding markdown code fence, if any.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    if let Some(inner) = RE_FENCED.captures(trimmed).and_then(|c| c.get(1)) {
        return inner.as_str().trim();
    }
    // Unterminated fence
    if let Some(rest) = trimmed.strip_prefix("```") {
        let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
        return rest.trim();
    }
    trimmed
}

#[derive(Debug, Deserialize)]
struct JsonReply {
    result: Option<String>,
    company_name: Option<String>,
    investment_summary: Option<String>,
    #[serde(alias = "investment_plans")]
    investment_plan: Option<String>,
    source_url: Option<String>,
}

impl JsonReply {
    /// `investment_summary` wins when both keys carry text.
    fn summary(&self) -> Option<&str> {
        [&self.investment_summary, &self.investment_plan]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .find(|text| !text.trim().is_empty())
    }
}

fn parse_json(body: &str, fallback_url: &str) -> ExtractionResult<ExtractionVerdict> {
    if is_irrelevant_word(body) {
        return Ok(ExtractionVerdict::Irrelevant);
    }

    let reply: JsonReply = serde_json::from_str(body)
        .or_else(|first_err| {
            // Tolerate prose around the object
            match (body.find('{'), body.rfind('}')) {
                (Some(start), Some(end)) if start < end => {
                    serde_json::from_str(&body[start..=end])
                }
                _ => Err(first_err),
            }
        })
        .map_err(|e| ExtractionError::Parse(format!("invalid JSON: {e}")))?;

    if reply
        .result
        .as_deref()
        .is_some_and(|r| r.trim().eq_ignore_ascii_case("irrelevant"))
    {
        return Ok(ExtractionVerdict::Irrelevant);
    }

    finish_lead(
        reply.company_name.as_deref(),
        reply.summary(),
        reply.source_url.as_deref(),
        fallback_url,
    )
}

/// Pipe-delimited lines and markdown tables share a row grammar.
fn parse_delimited(body: &str, fallback_url: &str) -> ExtractionResult<ExtractionVerdict> {
    if is_irrelevant_word(body) || is_json_irrelevant(body) {
        return Ok(ExtractionVerdict::Irrelevant);
    }

    let row = body
        .lines()
        .map(str::trim)
        .filter(|line| line.contains('|'))
        .filter(|line| !RE_TABLE_SEPARATOR.is_match(line))
        .map(split_row)
        .find(|cells| !is_header_row(cells))
        .ok_or_else(|| ExtractionError::Parse("no delimited data row".into()))?;

    // Marker placed inside the row instead of replacing it
    if row.first().is_some_and(|company| is_irrelevant_word(company)) {
        return Ok(ExtractionVerdict::Irrelevant);
    }

    match row.as_slice() {
        [company, summary] => finish_lead(
            Some(company.as_str()),
            Some(summary.as_str()),
            None,
            fallback_url,
        ),
        [company, middle @ .., url] if !middle.is_empty() => {
            let summary = middle.join(" | ");
            finish_lead(
                Some(company.as_str()),
                Some(summary.as_str()),
                Some(url.as_str()),
                fallback_url,
            )
        }
        _ => Err(ExtractionError::Parse(format!(
            "expected at least 2 fields, got {}",
            row.len()
        ))),
    }
}

fn split_row(line: &str) -> Vec<String> {
    let line = line.trim().trim_start_matches('|').trim_end_matches('|');
    line.split('|').map(|cell| cell.trim().to_string()).collect()
}

fn is_header_row(cells: &[String]) -> bool {
    cells
        .first()
        .is_some_and(|c| HEADER_CELLS.iter().any(|h| c.eq_ignore_ascii_case(h)))
}

fn is_irrelevant_word(body: &str) -> bool {
    RE_IRRELEVANT.is_match(body)
}

fn is_json_irrelevant(body: &str) -> bool {
    serde_json::from_str::<JsonReply>(body)
        .ok()
        .and_then(|r| r.result)
        .is_some_and(|r| r.trim().eq_ignore_ascii_case("irrelevant"))
}

/// Validate fields and assemble the lead.
fn finish_lead(
    company: Option<&str>,
    summary: Option<&str>,
    source_url: Option<&str>,
    fallback_url: &str,
) -> ExtractionResult<ExtractionVerdict> {
    let company = company.map(str::trim).unwrap_or_default();
    if company.is_empty() {
        return Err(ExtractionError::Parse("missing company_name".into()));
    }

    let summary = summary.map(str::trim).unwrap_or_default();
    if summary.is_empty() {
        return Err(ExtractionError::Parse("missing investment_summary".into()));
    }

    let source_url = source_url
        .map(str::trim)
        .filter(|u| is_web_url(u))
        .unwrap_or(fallback_url);

    Ok(ExtractionVerdict::Lead(Lead::new(company, summary, source_url)))
}

fn is_web_url(candidate: &str) -> bool {
    Url::parse(candidate)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = "https://news.example/hit";

    fn lead(verdict: ExtractionVerdict) -> Lead {
        verdict.into_lead().expect("expected a lead")
    }

    #[test]
    fn test_plain_json_lead() {
        let text = r#"{"company_name": "Tata Motors", "investment_summary": "$1B EV plant in Maharashtra", "source_url": "https://news.example/tata"}"#;
        let lead = lead(parse_verdict(text, OutputFormat::Json, FALLBACK).unwrap());
        assert_eq!(lead.company_name, "Tata Motors");
        assert_eq!(lead.investment_summary, "$1B EV plant in Maharashtra");
        assert_eq!(lead.source_url, "https://news.example/tata");
    }

    #[test]
    fn test_fenced_json_with_investment_plan_alias() {
        let text = "```json\n{\"company_name\": \"Acme\", \"investment_plan\": \"New plant\", \"source_url\": \"https://acme.example\"}\n```";
        let lead = lead(parse_verdict(text, OutputFormat::Json, FALLBACK).unwrap());
        assert_eq!(lead.company_name, "Acme");
        assert_eq!(lead.investment_summary, "New plant");
    }

    #[test]
    fn test_unterminated_fence() {
        let text = "```json\n{\"company_name\": \"Acme\", \"investment_summary\": \"New plant\"}";
        let lead = lead(parse_verdict(text, OutputFormat::Json, FALLBACK).unwrap());
        assert_eq!(lead.source_url, FALLBACK);
    }

    #[test]
    fn test_json_with_surrounding_prose() {
        let text = "Here is the result:\n{\"company_name\": \"Acme\", \"investment_summary\": \"New plant\"}\nHope this helps.";
        assert!(parse_verdict(text, OutputFormat::Json, FALLBACK).is_ok());
    }

    #[test]
    fn test_irrelevant_marker_any_case() {
        for text in [
            r#"{"result": "Irrelevant"}"#,
            r#"{"result": "irrelevant"}"#,
            "```json\n{\"result\": \"IRRELEVANT\"}\n```",
            "Irrelevant.",
        ] {
            assert_eq!(
                parse_verdict(text, OutputFormat::Json, FALLBACK).unwrap(),
                ExtractionVerdict::Irrelevant,
                "text: {text}"
            );
        }
    }

    #[test]
    fn test_bad_source_url_falls_back_to_hit_link() {
        let text = r#"{"company_name": "Acme", "investment_summary": "New plant", "source_url": "not mentioned"}"#;
        let lead = lead(parse_verdict(text, OutputFormat::Json, FALLBACK).unwrap());
        assert_eq!(lead.source_url, FALLBACK);
    }

    #[test]
    fn test_missing_company_is_parse_error() {
        let text = r#"{"company_name": "", "investment_summary": "New plant"}"#;
        let err = parse_verdict(text, OutputFormat::Json, FALLBACK).unwrap_err();
        assert!(matches!(err, ExtractionError::Parse(msg) if msg.contains("company_name")));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = parse_verdict("{company: Acme", OutputFormat::Json, FALLBACK).unwrap_err();
        assert!(matches!(err, ExtractionError::Parse(_)));

        let err = parse_verdict("   ", OutputFormat::Json, FALLBACK).unwrap_err();
        assert!(matches!(err, ExtractionError::Parse(_)));
    }

    #[test]
    fn test_pipe_delimited_line() {
        let text = "Tata Motors | $1B EV plant in Maharashtra | https://news.example/tata";
        let lead = lead(parse_verdict(text, OutputFormat::PipeDelimited, FALLBACK).unwrap());
        assert_eq!(lead.company_name, "Tata Motors");
        assert_eq!(lead.investment_summary, "$1B EV plant in Maharashtra");
        assert_eq!(lead.source_url, "https://news.example/tata");
    }

    #[test]
    fn test_pipe_delimited_two_fields_and_header() {
        let text = "Company name | Investment summary | Source URL\nAcme | New plant";
        let lead = lead(parse_verdict(text, OutputFormat::PipeDelimited, FALLBACK).unwrap());
        assert_eq!(lead.company_name, "Acme");
        assert_eq!(lead.source_url, FALLBACK);
    }

    #[test]
    fn test_pipe_delimited_irrelevant() {
        assert_eq!(
            parse_verdict("Irrelevant", OutputFormat::PipeDelimited, FALLBACK).unwrap(),
            ExtractionVerdict::Irrelevant
        );
    }

    #[test]
    fn test_irrelevant_with_trailing_reason() {
        for format in [OutputFormat::Json, OutputFormat::PipeDelimited] {
            for text in [
                "Irrelevant - this is a job posting.",
                "**Irrelevant**: recruiting news",
                "irrelevant\nThe article is about hiring.",
            ] {
                assert_eq!(
                    parse_verdict(text, format, FALLBACK).unwrap(),
                    ExtractionVerdict::Irrelevant,
                    "text: {text}"
                );
            }
        }
    }

    #[test]
    fn test_company_starting_with_irrelevant_word_is_still_a_lead() {
        let text = "Irrelevant Industries | New plant in Pune | https://news.example/ii";
        let lead = lead(parse_verdict(text, OutputFormat::PipeDelimited, FALLBACK).unwrap());
        assert_eq!(lead.company_name, "Irrelevant Industries");
    }

    #[test]
    fn test_marker_inside_pipe_row_is_irrelevant() {
        assert_eq!(
            parse_verdict("Irrelevant | job posting", OutputFormat::PipeDelimited, FALLBACK)
                .unwrap(),
            ExtractionVerdict::Irrelevant
        );
    }

    #[test]
    fn test_marker_inside_table_row_is_irrelevant() {
        let text = "| Company | Investment Plans | Source |\n|---|---|---|\n| Irrelevant | Irrelevant | Irrelevant |";
        assert_eq!(
            parse_verdict(text, OutputFormat::MarkdownTable, FALLBACK).unwrap(),
            ExtractionVerdict::Irrelevant
        );
    }

    #[test]
    fn test_json_with_both_summary_keys() {
        let text = r#"{"company_name": "Acme", "investment_summary": "New plant", "investment_plan": "Plant in Pune", "source_url": "https://acme.example"}"#;
        let lead1 = lead(parse_verdict(text, OutputFormat::Json, FALLBACK).unwrap());
        assert_eq!(lead1.investment_summary, "New plant");

        let text = r#"{"company_name": "Acme", "investment_summary": "", "investment_plan": "Plant in Pune"}"#;
        let lead = lead(parse_verdict(text, OutputFormat::Json, FALLBACK).unwrap());
        assert_eq!(lead.investment_summary, "Plant in Pune");
    }

    #[test]
    fn test_pipe_delimited_single_field_fails() {
        let err = parse_verdict("just some prose", OutputFormat::PipeDelimited, FALLBACK).unwrap_err();
        assert!(matches!(err, ExtractionError::Parse(_)));
    }

    #[test]
    fn test_markdown_table() {
        let text = "```markdown\n| Company | Investment Plans | Source |\n|---|:---:|---|\n| Acme Corp | Building new plant | http://x.example |\n```";
        let lead = lead(parse_verdict(text, OutputFormat::MarkdownTable, FALLBACK).unwrap());
        assert_eq!(lead.company_name, "Acme Corp");
        assert_eq!(lead.investment_summary, "Building new plant");
        assert_eq!(lead.source_url, "http://x.example");
    }

    #[test]
    fn test_parse_is_idempotent() {
        let text = "```json\n{\"company_name\": \"Acme\", \"investment_summary\": \"New plant\"}\n```";
        let first = parse_verdict(text, OutputFormat::Json, FALLBACK).unwrap();
        let second = parse_verdict(text, OutputFormat::Json, FALLBACK).unwrap();
        assert_eq!(first, second);
    }
}
