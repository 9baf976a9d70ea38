use axum::{extract::State, routing::post, Json, Router};
use rand::{seq::IndexedRandom, Rng};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::questions::{get_all_questions, get_questions_for_category},
        Question,
    },
    server::{
        app::AppState,
        deserializers::{deserialize_id_list, deserialize_optional_i64},
        error::ApiError,
        extract::ApiJson,
    },
    telemetry::QUIZ_QUESTION_CNTR,
};

use super::ApiResponse;

/// Category id meaning "questions from every category"
const ALL_CATEGORIES: i64 = 0;

#[derive(Debug, Clone, Copy)]
pub struct QuizRules {
    /// Quiz requests for a category above this id are refused, whatever is
    /// seeded in the store
    pub max_category_id: i64,
}

#[derive(Deserialize)]
struct QuizCategory {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    id: Option<i64>,
}

#[derive(Deserialize)]
struct QuizRequest {
    #[serde(default, deserialize_with = "deserialize_id_list")]
    previous_questions: Vec<i64>,
    quiz_category: Option<QuizCategory>,
}

#[derive(Serialize)]
struct QuizResponse {
    success: bool,
    previous_questions: Vec<i64>,
    /// Absent once the round has run out of questions
    #[serde(skip_serializing_if = "Option::is_none")]
    question: Option<Question>,
}

/// Uniform pick among the `candidates` not listed in `previous`. `None` means
/// the round is over.
fn next_question<R: Rng + ?Sized>(
    candidates: Vec<Question>,
    previous: &[i64],
    rng: &mut R,
) -> Option<Question> {
    if previous.len() + 1 > candidates.len() {
        return None;
    }
    let unseen: Vec<Question> = candidates
        .into_iter()
        .filter(|q| !previous.contains(&q.id))
        .collect();
    unseen.choose(rng).cloned()
}

async fn next_quiz_question(
    State(pool): State<SqlitePool>,
    State(rules): State<QuizRules>,
    ApiJson(request): ApiJson<QuizRequest>,
) -> ApiResponse<Json<QuizResponse>> {
    let category = request
        .quiz_category
        .ok_or(ApiError::NotFound)?
        .id
        .unwrap_or(ALL_CATEGORIES);

    let candidates = if category == ALL_CATEGORIES {
        get_all_questions(&pool).await?
    } else {
        if category > rules.max_category_id {
            return Err(ApiError::NotFound);
        }
        get_questions_for_category(&pool, category).await?
    };

    let question = next_question(candidates, &request.previous_questions, &mut rand::rng());
    match &question {
        Some(q) => {
            QUIZ_QUESTION_CNTR
                .with_label_values(&[category.to_string().as_str()])
                .inc();
            tracing::debug!("Quiz in category {category} got question {}", q.id);
        }
        None => tracing::debug!("Quiz in category {category} is finished"),
    }

    Ok(Json(QuizResponse {
        success: true,
        previous_questions: request.previous_questions,
        question,
    }))
}

pub fn quizzes_router() -> Router<AppState> {
    Router::new().route("/quizzes", post(next_quiz_question))
}
