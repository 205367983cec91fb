/// Bumped whenever `JSON_SCHEMA_INSTRUCTIONS` changes shape.
pub const SCHEMA_VERSION: u32 = 1;

pub const SYSTEM_PROMPT: &str = "You are a helpful culinary assistant. Given the user's available ingredients, \
suggest several dishes that could be prepared. For each dish, include: suitability \
(perfect/good/possible), missing_ingredients with quantities and reasons if helpful, \
full ingredients list with quantities, numbered steps with durations, total time, \
difficulty, servings, optional cuisine, and a YouTube URL for a high-quality tutorial. \
Prefer using provided ingredients. If insufficient, propose minimal additional items. \
Ensure food safety and realistic timings. Keep dishes culturally respectful and concise.";

/// Appended to every user prompt.
pub const JSON_SCHEMA_INSTRUCTIONS: &str = r#"Return strictly valid JSON that conforms to this schema: {
  "dishes": [
    {
      "title": string,
      "suitability": one of ["perfect", "good", "possible"],
      "missing_ingredients": [ { "name": string, "quantity": string?, "reason": string? } ],
      "ingredients": [ { "name": string, "quantity": string? } ],
      "steps": [ { "description": string, "duration_minutes": integer } ],
      "total_time_minutes": integer,
      "difficulty": string,
      "servings": integer,
      "cuisine": string?,
      "youtube_url": string?
    }
  ],
  "notes": string?
}
Rules:
- Do not include any extra keys or commentary.
- Ensure valid JSON (double quotes, no trailing commas).
- All durations are integers in minutes.
"#;

/// Trims each comma-separated entry and drops the empty ones.
pub fn normalize_ingredients(ingredients_csv: &str) -> String {
    ingredients_csv
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Builds the user turn: the request itself followed by the schema block.
pub fn build_user_prompt(ingredients_csv: &str, servings: u32, diet: Option<&str>) -> String {
    let mut sentences = vec![
        format!("Ingredients on hand: {}.", ingredients_csv),
        format!("Desired servings: {}.", servings),
    ];

    if let Some(diet) = diet.map(str::trim).filter(|d| !d.is_empty()) {
        sentences.push(format!("Dietary preference: {}.", diet));
    }

    sentences.push("Return JSON only following the provided schema.".to_string());

    format!("{}\n\n{}", sentences.join(" "), JSON_SCHEMA_INSTRUCTIONS)
}
