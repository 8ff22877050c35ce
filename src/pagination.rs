pub const QUESTIONS_PER_PAGE: usize = 10;
pub const FIRST_PAGE: i64 = 1;

/// Window `[(page - 1) * 10, page * 10)` of `items`. Pages below one and pages
/// past the end are empty rather than errors; callers decide what an empty page means.
pub fn paginate<T>(items: Vec<T>, page: i64) -> Vec<T> {
    if page < FIRST_PAGE {
        return Vec::new();
    }
    let start = usize::try_from(page - 1)
        .unwrap_or(usize::MAX)
        .saturating_mul(QUESTIONS_PER_PAGE);
    items
        .into_iter()
        .skip(start)
        .take(QUESTIONS_PER_PAGE)
        .collect()
}
