//! Prompt construction.
//!
//! Builds the single instruction-following prompt sent to the generation
//! backend: a fixed persona preamble, the retrieved context block verbatim,
//! the literal user question, and a closing instruction. The template is a
//! pure function of its two inputs; no ambient state is interpolated.

use handlebars::Handlebars;
use opschat_core::{AppError, AppResult};
use std::collections::HashMap;

/// Fixed instruction template for contextual answering.
///
/// The closing instruction both enumerates the required focus areas and
/// tells the model explicitly how to behave when the context block is
/// empty or insufficient.
const ANSWER_TEMPLATE: &str = "\
You are an AI assistant specializing in CRO (Contract Research Organization) operations.
Based on the following operational documents and user question, provide a helpful and accurate response.

CONTEXT FROM CRO OPERATIONS DOCUMENTS:
{{context}}

USER QUESTION: {{query}}

Please provide a comprehensive answer based on the context provided. If the context doesn't contain enough information to fully answer the question, say so and provide what information you can based on the available documents.

Focus on:
- Specific operational procedures and guidelines
- Compliance requirements and best practices
- Practical implementation steps
- Any relevant regulatory considerations

RESPONSE:
";

/// Build the generation prompt for one turn.
///
/// `context` may be empty (no search results); the template text itself
/// instructs the model to acknowledge insufficient context in that case.
/// Transport escaping is not this function's concern: the prompt travels
/// as a JSON body, which the generation client serializes safely.
pub fn build_prompt(user_query: &str, context: &str) -> AppResult<String> {
    let mut variables = HashMap::new();
    variables.insert("query".to_string(), user_query.to_string());
    variables.insert("context".to_string(), context.to_string());

    render_template(ANSWER_TEMPLATE, &variables)
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Disable HTML escaping for plain text
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    let rendered = handlebars
        .render("prompt", &variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))?;

    Ok(rendered)
}
