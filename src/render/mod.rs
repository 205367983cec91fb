use serde_json::Value;
use std::fmt::Write;

use crate::models::{Dish, ModelResponse, Suggestions, VideoResolution};
use crate::video::fallback_search_url;

const RULE_WIDTH: usize = 60;

fn rule(title: &str) -> String {
    let label = format!("── {} ", title);
    let pad = RULE_WIDTH.saturating_sub(label.chars().count());
    format!("{}{}", label, "─".repeat(pad))
}

fn info_row(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "  {:<18}{}", label, value);
}

fn render_dish(out: &mut String, dish: &Dish, video: Option<&VideoResolution>) {
    let _ = writeln!(out, "{}", rule(&dish.title));

    info_row(out, "Suitability", &dish.suitability.to_string());
    info_row(out, "Difficulty", &dish.difficulty);
    info_row(out, "Servings", &dish.servings.to_string());
    info_row(out, "Total Time (min)", &dish.total_time_minutes.to_string());
    if let Some(cuisine) = dish.cuisine.as_deref().filter(|c| !c.is_empty()) {
        info_row(out, "Cuisine", cuisine);
    }
    if let Some(video) = video {
        info_row(out, "YouTube", video.url.as_deref().unwrap_or("Unavailable"));
    }

    if !dish.missing_ingredients.is_empty() {
        let _ = writeln!(out, "Suggested additional ingredients:");
        for item in &dish.missing_ingredients {
            let mut line = format!("- {}", item.name);
            if let Some(quantity) = item.quantity.as_deref().filter(|q| !q.is_empty()) {
                let _ = write!(line, " ({})", quantity);
            }
            if let Some(reason) = item.reason.as_deref().filter(|r| !r.is_empty()) {
                let _ = write!(line, " - {}", reason);
            }
            let _ = writeln!(out, "{}", line);
        }
    }

    if !dish.ingredients.is_empty() {
        let _ = writeln!(out, "Ingredients:");
        for item in &dish.ingredients {
            match item.quantity.as_deref().filter(|q| !q.is_empty()) {
                Some(quantity) => {
                    let _ = writeln!(out, "- {} - {}", item.name, quantity);
                }
                None => {
                    let _ = writeln!(out, "- {}", item.name);
                }
            }
        }
    }

    if !dish.steps.is_empty() {
        let _ = writeln!(out, "Steps:");
        for (i, step) in dish.steps.iter().enumerate() {
            let _ = writeln!(
                out,
                "{}. {} ({} min)",
                i + 1,
                step.description,
                step.duration_minutes
            );
        }
    }

    if let Some(video) = video
        && !video.embeddable
    {
        let query = if dish.title.trim().is_empty() {
            "cooking tutorial"
        } else {
            dish.title.as_str()
        };
        let _ = writeln!(out, "Video unavailable. Try: {}", fallback_search_url(query));
    }
}

/// Human-readable listing of every dish followed by the model's notes.
pub fn render_text(suggestions: &Suggestions) -> String {
    let mut out = String::new();

    for (index, dish) in suggestions.response.dishes.iter().enumerate() {
        let video = suggestions.videos.get(index).and_then(Option::as_ref);
        render_dish(&mut out, dish, video);
        out.push('\n');
    }

    if let Some(notes) = suggestions
        .response
        .notes
        .as_deref()
        .filter(|n| !n.is_empty())
    {
        let _ = writeln!(out, "{}", rule("Notes"));
        let _ = writeln!(out, "{}", notes);
    }

    out
}

/// The normalized response with each dish's video resolution under `video`.
pub fn render_json(suggestions: &Suggestions) -> serde_json::Result<String> {
    let mut value = serde_json::to_value(&suggestions.response)?;

    if let Some(dishes) = value.get_mut("dishes").and_then(Value::as_array_mut) {
        for (dish, video) in dishes.iter_mut().zip(&suggestions.videos) {
            if let (Some(dish), Some(video)) = (dish.as_object_mut(), video) {
                dish.insert("video".to_string(), serde_json::to_value(video)?);
            }
        }
    }

    serde_json::to_string_pretty(&value)
}

/// Diagnostic output for a run that produced no dishes.
pub fn render_failure(response: &ModelResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "No structured dishes found. Try adjusting ingredients or model."
    );

    match serde_json::to_string_pretty(response) {
        Ok(json) => {
            let _ = writeln!(out, "{}", json);
        }
        Err(e) => {
            let _ = writeln!(out, "(could not serialize response: {})", e);
        }
    }

    let _ = writeln!(out, "{}", rule("Raw model output"));
    let _ = writeln!(out, "{}", response.raw);
    out
}
