//! Prompt templates for entity resolution.
//!
//! Two flavours: the plain resolution prompt sent to every model tier, and
//! the web-augmented prompt that folds search snippets in for the
//! web-processing tier.

/// Maximum number of search snippets folded into the augmented prompt.
pub const MAX_SNIPPETS: usize = 10;

/// Per-snippet body cap, in characters.
pub const SNIPPET_MAX_CHARS: usize = 500;

/// System prompt for the model tiers: asks for the JSON envelope the
/// normalizer understands.
pub fn resolution_system_prompt() -> String {
    r#"You are a company and hiring-platform research assistant.
Given a query, identify the real company or platform it refers to and respond
with JSON only, using this exact shape:

{"companies": [{
  "name": "...",
  "websiteUrl": "https://...",
  "domain": "...",
  "description": "...",
  "industries": ["..."],
  "headquarters": "...",
  "employeeCount": "...",
  "founders": ["..."],
  "leadership": ["..."],
  "linkedinUrl": "https://...",
  "crunchbaseUrl": "https://...",
  "totalFunding": "...",
  "lastFundingRound": "...",
  "valuation": "...",
  "isPublic": false,
  "ticker": null,
  "sources": ["..."],
  "confidence": 0.0
}]}

Rules:
- Only include companies you can identify with certainty. An empty array is a
  valid answer.
- Never mix one company's data into another company's record.
- websiteUrl and domain must refer to the same host.
- confidence is your own calibration in [0, 1]; cite sources when you have them.
- Respond with JSON only, no prose, no markdown fences."#
        .to_string()
}

/// User prompt for a resolution query.
pub fn resolution_user_prompt(query: &str) -> String {
    format!("Identify the company or hiring platform referred to by: \"{query}\"")
}

/// A web search snippet fed into the augmented prompt.
#[derive(Debug, Clone)]
pub struct Snippet {
    pub title: String,
    pub url: String,
    pub body: String,
}

/// System prompt for the web-processing tier: the base resolution prompt
/// plus up to [`MAX_SNIPPETS`] search snippets, each body capped at
/// [`SNIPPET_MAX_CHARS`] characters.
pub fn web_augmented_system_prompt(query: &str, snippets: &[Snippet]) -> String {
    let mut sections = vec![resolution_system_prompt()];

    sections.push(format!(
        "\nWeb search results for \"{query}\" (use these as evidence and cite \
         the URLs you rely on in sources):"
    ));

    for (i, snippet) in snippets.iter().take(MAX_SNIPPETS).enumerate() {
        let body: String = snippet.body.chars().take(SNIPPET_MAX_CHARS).collect();
        sections.push(format!(
            "[{}] {} ({})\n{}",
            i + 1,
            snippet.title,
            snippet.url,
            body
        ));
    }

    sections.join("\n\n")
}
