use std::collections::BTreeMap;

use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::get_all_categories,
            questions::{self, count_questions, get_all_questions, search_questions},
        },
        NewQuestion, Question,
    },
    server::{
        app::AppState,
        deserializers::deserialize_optional_i64,
        error::ApiError,
        extract::{ApiJson, ApiPath, ApiQuery},
        pagination::paginate,
    },
    telemetry::DELETED_QUESTION_CNTR,
};

use super::{category_map, category_types, ApiResponse, PageQuery};

#[derive(Deserialize)]
struct NewQuestionBody {
    question: Option<String>,
    answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    category: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    difficulty: Option<i64>,
}

impl NewQuestionBody {
    /// Texts must be non-empty, category and difficulty non-zero.
    fn validate(self) -> Result<NewQuestion, ApiError> {
        fn text(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }
        fn number(value: Option<i64>) -> Option<i64> {
            value.filter(|v| *v != 0)
        }

        match (
            text(self.question),
            text(self.answer),
            number(self.category),
            number(self.difficulty),
        ) {
            (Some(question), Some(answer), Some(category), Some(difficulty)) => Ok(NewQuestion {
                question,
                answer,
                category,
                difficulty,
            }),
            _ => Err(ApiError::UnprocessableEntity),
        }
    }
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm", default)]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Vec<String>,
}

#[derive(Serialize)]
struct Deleted {
    success: bool,
    deleted_question: i64,
    total_questions: i64,
}

#[derive(Serialize)]
struct Created {
    success: bool,
    new_question: NewQuestion,
}

async fn questions_page(
    State(pool): State<SqlitePool>,
    ApiQuery(PageQuery { page }): ApiQuery<PageQuery>,
) -> ApiResponse<Json<QuestionsPage>> {
    let questions = get_all_questions(&pool).await?;
    let current = paginate(&questions, page);
    if current.is_empty() {
        return Err(ApiError::NotFound);
    }
    let categories = get_all_categories(&pool).await?;
    Ok(Json(QuestionsPage {
        success: true,
        questions: current,
        total_questions: questions.len(),
        categories: category_map(categories),
    }))
}

async fn search(
    State(pool): State<SqlitePool>,
    ApiQuery(PageQuery { page }): ApiQuery<PageQuery>,
    ApiJson(body): ApiJson<SearchBody>,
) -> ApiResponse<Json<SearchResults>> {
    let term = body.search_term.unwrap_or_default();
    if term.is_empty() {
        return Err(ApiError::NotFound);
    }

    let found = search_questions(&pool, &term).await?;
    tracing::debug!("Search for {term:?} matched {} questions", found.len());
    let categories = get_all_categories(&pool).await?;
    Ok(Json(SearchResults {
        success: true,
        questions: paginate(&found, page),
        total_questions: found.len(),
        current_category: category_types(categories, &found),
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    ApiJson(body): ApiJson<NewQuestionBody>,
) -> ApiResponse<Json<Created>> {
    let new_question = body.validate()?;
    let id = questions::create_question(&pool, &new_question).await?;
    tracing::info!("Created question {id}");
    Ok(Json(Created {
        success: true,
        new_question,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResponse<Json<Deleted>> {
    if !questions::delete_question(&pool, id).await? {
        return Err(ApiError::NotFound);
    }
    DELETED_QUESTION_CNTR.inc();
    tracing::info!("Deleted question {id}");

    Ok(Json(Deleted {
        success: true,
        deleted_question: id,
        total_questions: count_questions(&pool).await?,
    }))
}

pub fn questions_router() -> Router<AppState> {
    Router::new()
        .route("/questions", get(questions_page).post(search))
        .route("/questions/add", post(create_question))
        .route("/questions/{id}", delete(delete_question))
}
