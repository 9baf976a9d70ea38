use std::collections::BTreeMap;

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::categories::{count_categories, get_all_categories},
        queries::questions::get_questions_for_category,
        Question,
    },
    server::{app::AppState, error::ApiError, extract::{ApiPath, ApiQuery}, pagination::paginate},
};

use super::{category_map, category_types, ApiResponse, PageQuery};

#[derive(Serialize)]
struct CategoriesBody {
    success: bool,
    categories: BTreeMap<i64, String>,
    total_categories: usize,
}

#[derive(Serialize)]
struct CategoryQuestionsBody {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Vec<String>,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<CategoriesBody>> {
    let categories = get_all_categories(&pool).await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoriesBody {
        success: true,
        total_categories: categories.len(),
        categories: category_map(categories),
    }))
}

async fn questions_by_category(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(PageQuery { page }): ApiQuery<PageQuery>,
) -> ApiResponse<Json<CategoryQuestionsBody>> {
    // category ids are contiguous from 1
    let total = count_categories(&pool).await?;
    if !(1..=total).contains(&id) {
        return Err(ApiError::NotFound);
    }

    let questions = get_questions_for_category(&pool, id).await?;
    let categories = get_all_categories(&pool).await?;
    Ok(Json(CategoryQuestionsBody {
        success: true,
        questions: paginate(&questions, page),
        total_questions: questions.len(),
        current_category: category_types(categories, &questions),
    }))
}

pub fn category_router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(questions_by_category))
}
