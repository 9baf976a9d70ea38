pub const QUESTIONS_PER_PAGE: usize = 10;

/// Items of the 1-based `page`, `QUESTIONS_PER_PAGE` at a time. Pages below 1
/// and past the end are empty.
pub fn paginate<T: Clone>(items: &[T], page: i64) -> Vec<T> {
    let Ok(page) = usize::try_from(page) else {
        return Vec::new();
    };
    if page == 0 {
        return Vec::new();
    }
    let start = (page - 1).saturating_mul(QUESTIONS_PER_PAGE);
    let end = start.saturating_add(QUESTIONS_PER_PAGE).min(items.len());
    items.get(start..end).map(<[T]>::to_vec).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_cover_everything_once() {
        let items: Vec<i64> = (1..=25).collect();
        let pages: Vec<Vec<i64>> = (1..=3).map(|p| paginate(&items, p)).collect();

        assert_eq!(pages[0].len(), 10);
        assert_eq!(pages[2], vec![21, 22, 23, 24, 25]);
        assert_eq!(pages.concat(), items);
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let items: Vec<i64> = (1..=25).collect();
        assert!(paginate(&items, 4).is_empty());
        assert!(paginate(&items, 1000).is_empty());
        assert!(paginate(&items, 0).is_empty());
        assert!(paginate(&items, -1).is_empty());
        assert!(paginate(&items, i64::MAX).is_empty());
        assert!(paginate::<i64>(&[], 1).is_empty());
    }
}
