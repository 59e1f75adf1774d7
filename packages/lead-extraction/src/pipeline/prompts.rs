//! Prompt templates for relevance extraction.
//!
//! One preamble shared by every format, followed by format-specific
//! instructions that describe the reply shape.

use crate::types::{config::OutputFormat, hit::RawHit};

/// Literal marker the model returns for off-topic hits in JSON mode.
pub const IRRELEVANT_JSON: &str = r#"{"result": "Irrelevant"}"#;

/// Bare marker used by the line-oriented formats.
pub const IRRELEVANT_WORD: &str = "Irrelevant";

const PREAMBLE: &str = r#"You are an analyst at an investment promotion agency. Your job is to spot companies that are planning new investments, capacity expansions, new plants or facilities.

Decide whether the search result below reports such a plan for the given sector."#;

const JSON_INSTRUCTIONS: &str = r#"Reply with a single JSON object and nothing else:
{
  "company_name": "name of the company making the investment",
  "investment_summary": "one or two sentences on what they plan: amount, location, timeline when stated",
  "source_url": "the URL of the search result"
}"#;

const PIPE_INSTRUCTIONS: &str = r#"Reply with exactly one line in this form and nothing else:
Company name | Investment summary | Source URL

Do not use the | character inside any field."#;

const TABLE_INSTRUCTIONS: &str = r#"Reply with a markdown table with exactly one data row and nothing else:
| Company | Investment Plans | Source |
|---|---|---|
| company name | investment summary | source URL |"#;

/// Build the extraction prompt for one hit.
pub fn format_extraction_prompt(hit: &RawHit, sector: &str, format: OutputFormat) -> String {
    let (instructions, irrelevant) = match format {
        OutputFormat::Json => (JSON_INSTRUCTIONS, IRRELEVANT_JSON),
        OutputFormat::PipeDelimited => (PIPE_INSTRUCTIONS, IRRELEVANT_WORD),
        OutputFormat::MarkdownTable => (TABLE_INSTRUCTIONS, IRRELEVANT_WORD),
    };

    format!(
        r#"{PREAMBLE}

Sector: {sector}

Search Result:
Title: {title}
Summary: {snippet}
URL: {link}

{instructions}

If the result is a job posting, a recruiting or hiring announcement, or is otherwise unrelated to capital investment or expansion, reply with exactly:
{irrelevant}

Only use facts stated in the search result."#,
        title = hit.title,
        snippet = hit.snippet,
        link = hit.link,
    )
}
