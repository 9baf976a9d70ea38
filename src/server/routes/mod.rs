mod categories;
mod questions;
mod quizzes;

use std::collections::{BTreeMap, HashMap};

use itertools::Itertools;
use serde::Deserialize;

use crate::db::{Category, Question};

use super::deserializers::{deserialize_page, first_page};
use super::error::ApiError;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::{quizzes_router, QuizRules};

pub type ApiResponse<T> = Result<T, ApiError>;

#[derive(Deserialize)]
struct PageQuery {
    #[serde(default = "first_page", deserialize_with = "deserialize_page")]
    page: i64,
}

fn category_map(categories: Vec<Category>) -> BTreeMap<i64, String> {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}

/// Distinct category labels of `questions`, in the order they first appear
fn category_types(categories: Vec<Category>, questions: &[Question]) -> Vec<String> {
    let labels: HashMap<i64, String> = categories.into_iter().map(|c| (c.id, c.kind)).collect();
    questions
        .iter()
        .filter_map(|q| labels.get(&q.category))
        .unique()
        .cloned()
        .collect()
}
