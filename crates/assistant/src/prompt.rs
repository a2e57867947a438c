//! System prompt for the order assistant.

use std::env;
use std::path::Path;

use tracing::info;

/// Default path for the assistant prompt file.
pub const DEFAULT_PROMPT_FILE: &str = "ASSISTANT_PROMPT.md";

/// Default system instruction (fallback if no file or env override).
///
/// Describes the catalog, the required fields, the normalization rules and
/// the strict output contract: plain text, or a JSON envelope with a
/// `message`, the `entities` updated this turn, and `meta` listing what is
/// still missing.
pub const DEFAULT_SYSTEM_PROMPT: &str = r#"Role: You are the Order Assistant for NeoGreen, a Sri Lankan agrifood export company.
Goal: Understand free-text buyer messages, extract and normalize order details, and ask for missing information. Buyers can change some parameters in chat and adjust others manually on the form. Never submit an order yourself.

Products available:
1. Premium Chili (Hot Dragon F1 / Scotch Bonnet) - 5kg/10kg/25kg export cartons, Fresh or Dried, quantity in kg
2. Organic Worm Compost - 5kg/25kg bags, quantity in bags
3. Premium Cocopeat (cube) - 5kg/25kg blocks, Washed or Unwashed, quantity in cubes

Behavior rules:
- Reply with either plain text, or ONLY the JSON envelope described below
- Return only the fields that changed this turn (partial updates are fine)
- If a required field is missing or ambiguous, ask one or two crisp follow-up questions
- Acknowledge detected changes in plain language via "message"
- Never invent data; if unsure, ask
- Respect manual edits: do not overwrite a field the buyer asked to keep

Normalization:
- Quantity: keep value and unit together ("200 kg", "50 bags"); if only a number is given, ask for the unit
- Packaging: normalize "25kg bag" / "25 kg bags" / "25kg cartons" to a size plus type
- Incoterms: normalize to EXW, FCA, FOB, CFR, CIF, DAP or DDP (uppercase)
- Destination: prefer the country; keep any city in notes
- Dates: convert to YYYY-MM-DD when a specific date is given; if vague, ask

Required before submission: product, quantity, destination_country, buyer_name, email.

Output envelope (strict - no text outside the JSON when you use it):
{
  "message": "string (what was understood/updated, or a clarifying question)",
  "entities": {
    "product": "string", "variety": "string", "quantity": "string",
    "packaging": "string", "packaging_option": "string",
    "destination_country": "string", "incoterms": "string",
    "target_date": "YYYY-MM-DD", "buyer_name": "string", "company": "string",
    "email": "string", "phone": "string", "notes": "string"
  },
  "meta": { "missing": ["fields", "still", "needed"], "confidence": 0.0 }
}
Omit any entities key you are not updating this turn."#;

/// Load the assistant system prompt.
///
/// Priority:
/// 1. `ASSISTANT_SYSTEM_PROMPT` env var (if set)
/// 2. Contents of the prompt file (`ASSISTANT_PROMPT_FILE` or the default
///    `ASSISTANT_PROMPT.md`)
/// 3. Embedded default prompt
pub fn load_system_prompt() -> String {
    if let Ok(prompt) = env::var("ASSISTANT_SYSTEM_PROMPT") {
        info!("Using assistant prompt from ASSISTANT_SYSTEM_PROMPT env var");
        return prompt;
    }

    let prompt_file =
        env::var("ASSISTANT_PROMPT_FILE").unwrap_or_else(|_| DEFAULT_PROMPT_FILE.to_string());

    if let Some(prompt) = load_prompt_file(&prompt_file) {
        info!("Loaded assistant prompt from {}", prompt_file);
        return prompt;
    }

    info!("Using embedded default assistant prompt");
    DEFAULT_SYSTEM_PROMPT.to_string()
}

/// Load a prompt from a file path, returning `None` if missing or empty.
fn load_prompt_file(path: impl AsRef<Path>) -> Option<String> {
    match std::fs::read_to_string(path.as_ref()) {
        Ok(content) => {
            let trimmed = content.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompt_covers_contract() {
        assert!(DEFAULT_SYSTEM_PROMPT.contains("entities"));
        assert!(DEFAULT_SYSTEM_PROMPT.contains("destination_country"));
        assert!(DEFAULT_SYSTEM_PROMPT.contains("YYYY-MM-DD"));
        assert!(DEFAULT_SYSTEM_PROMPT.contains("Cocopeat"));
    }
}
