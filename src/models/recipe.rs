use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Suitability {
    Perfect,
    Good,
    Possible,
}

impl fmt::Display for Suitability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Suitability::Perfect => "perfect",
            Suitability::Good => "good",
            Suitability::Possible => "possible",
        };
        f.write_str(label)
    }
}

/// An ingredient the user does not have but the dish would benefit from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngredientSuggestion {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngredientItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    pub description: String,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dish {
    pub title: String,
    pub suitability: Suitability,
    #[serde(default)]
    pub missing_ingredients: Vec<IngredientSuggestion>,
    #[serde(default)]
    pub ingredients: Vec<IngredientItem>,
    #[serde(default)]
    pub steps: Vec<Step>,
    pub total_time_minutes: u32,
    pub difficulty: String,
    pub servings: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
}

impl Dish {
    /// The video link, ignoring blank strings some models emit.
    pub fn video_url(&self) -> Option<&str> {
        self.youtube_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Normalized model output. `dishes` is always present, possibly empty.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ModelResponse {
    pub dishes: Vec<Dish>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Top-level keys other than `dishes` and `notes`, kept as returned.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// Text of the model reply this response was parsed from.
    #[serde(skip)]
    pub raw: String,
}

impl ModelResponse {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_dishes(&self) -> bool {
        !self.dishes.is_empty()
    }
}

/// Outcome of checking one video link.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VideoResolution {
    pub url: Option<String>,
    pub embeddable: bool,
}

impl VideoResolution {
    pub fn unresolved() -> Self {
        Self {
            url: None,
            embeddable: false,
        }
    }
}

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeQuery {
    pub ingredients: String,
    pub servings: u32,
    pub diet: Option<String>,
}

/// A parsed model response with one video resolution per dish, index-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestions {
    pub response: ModelResponse,
    pub videos: Vec<Option<VideoResolution>>,
}
