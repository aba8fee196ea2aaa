// LLM prompt constants for field mapping.
// Reuses the JSON-only system prompt from llm_client::prompts.

/// Field-mapping prompt template. Replace `{platform}`, `{attributes}` and
/// `{fields}` before sending.
pub const FIELD_MAPPING_PROMPT_TEMPLATE: &str = r#"You map job-application form fields on the "{platform}" platform to attributes of an applicant profile.

PROFILE ATTRIBUTES (name: whether the applicant has a value):
{attributes}

FORM FIELDS:
{fields}

Return a JSON object mapping each field's identifier (its id, or its name when it has no id)
to exactly one attribute name from the list above, e.g.
{"first_name_input": "firstName", "job_application[email]": "email"}

Rules:
- Use attribute names exactly as written above.
- Only include fields you can map confidently. Omit the rest.
- Do NOT invent identifiers that are not in the field list."#;
