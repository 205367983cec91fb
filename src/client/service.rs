use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::client::ChatModel;
use crate::error::Result;
use crate::models::{ModelOptions, ModelResponse, RecipeQuery, Suggestions};
use crate::utils::{SCHEMA_VERSION, SYSTEM_PROMPT, build_user_prompt, normalize_ingredients, parse};
use crate::video::VideoResolver;

/// Appended to the user prompt for the corrective attempt.
pub const CORRECTIVE_SUFFIX: &str = "Return only valid JSON per schema. No commentary.";

/// How many model calls one request may make. No variant allows more than two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryPolicy {
    Never,
    OnceOnMalformed,
}

impl RetryPolicy {
    pub fn from_flag(retry_on_malformed: bool) -> Self {
        if retry_on_malformed {
            RetryPolicy::OnceOnMalformed
        } else {
            RetryPolicy::Never
        }
    }

    pub fn max_attempts(self) -> usize {
        match self {
            RetryPolicy::Never => 1,
            RetryPolicy::OnceOnMalformed => 2,
        }
    }

    fn prompt_for_attempt(self, user_prompt: &str, attempt: usize) -> String {
        if attempt == 1 {
            user_prompt.to_string()
        } else {
            format!("{}\n{}", user_prompt, CORRECTIVE_SUFFIX)
        }
    }
}

/// Asks the model for recipes, re-asking once with a corrective suffix when
/// the reply has no usable dishes. Transport errors propagate.
pub async fn call_recipes(
    client: &dyn ChatModel,
    system_prompt: &str,
    user_prompt: &str,
    policy: RetryPolicy,
    options: Option<&ModelOptions>,
) -> Result<ModelResponse> {
    let mut response = ModelResponse::empty();

    for attempt in 1..=policy.max_attempts() {
        let prompt = policy.prompt_for_attempt(user_prompt, attempt);
        let text = client.generate(system_prompt, &prompt, options).await?;
        response = parse(&text);

        if response.has_dishes() {
            debug!("Attempt {} produced {} dishes", attempt, response.dishes.len());
            return Ok(response);
        }

        if attempt < policy.max_attempts() {
            warn!("Attempt {} returned no usable dishes, retrying with corrective prompt", attempt);
        }
    }

    Ok(response)
}

pub struct RecipeService {
    model: Box<dyn ChatModel>,
    video_resolver: VideoResolver,
    retry_policy: RetryPolicy,
    options: Option<ModelOptions>,
}

impl RecipeService {
    pub fn new(
        model: Box<dyn ChatModel>,
        video_resolver: VideoResolver,
        retry_policy: RetryPolicy,
        options: Option<ModelOptions>,
    ) -> Self {
        Self {
            model,
            video_resolver,
            retry_policy,
            options,
        }
    }

    /// One full invocation: prompt, model call(s), then a video check per dish
    /// in display order.
    pub async fn suggest(&self, query: &RecipeQuery) -> Result<Suggestions> {
        let request_id = format!("req-{}", Uuid::new_v4());
        let ingredients = normalize_ingredients(&query.ingredients);
        let user_prompt = build_user_prompt(&ingredients, query.servings, query.diet.as_deref());

        info!(
            "🚀 Requesting recipes - Model: {}, Schema: v{}, RequestID: {}",
            self.model.model_name(),
            SCHEMA_VERSION,
            request_id
        );
        debug!("User prompt: {}", user_prompt);

        let response = call_recipes(
            self.model.as_ref(),
            SYSTEM_PROMPT,
            &user_prompt,
            self.retry_policy,
            self.options.as_ref(),
        )
        .await?;

        let mut videos = Vec::with_capacity(response.dishes.len());
        for dish in &response.dishes {
            let resolution = match dish.video_url() {
                Some(url) => Some(self.video_resolver.resolve(url).await),
                None => None,
            };
            videos.push(resolution);
        }

        if response.has_dishes() {
            info!(
                "✅ Received {} dishes - RequestID: {}",
                response.dishes.len(),
                request_id
            );
        } else {
            info!("❌ No usable dishes - RequestID: {}", request_id);
        }

        Ok(Suggestions { response, videos })
    }
}
