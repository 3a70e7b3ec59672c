use crate::models::{CategoryFilter, Course};

/// Courses from `snapshot` matching both the name query and the category
/// filter, in snapshot order.
pub fn visible_courses<'a>(
    snapshot: &'a [Course],
    query: &str,
    filter: &CategoryFilter,
) -> Vec<&'a Course> {
    let needle = query.to_lowercase();
    snapshot
        .iter()
        .filter(|c| needle.is_empty() || c.name.to_lowercase().contains(&needle))
        .filter(|c| filter.accepts(&c.category))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn course(id: i64, name: &str, category: &str) -> Course {
        Course {
            id,
            owner: None,
            name: name.to_string(),
            url: format!("https://example.com/{id}"),
            category: category.to_string(),
            completed: id % 2 == 0,
            created_at: Utc.timestamp_opt(1_700_000_000 - id, 0).unwrap(),
        }
    }

    fn snapshot() -> Vec<Course> {
        vec![
            course(1, "Python Avançado", "Software Development"),
            course(2, "Pandas para Ciência de Dados", "Data Science"),
            course(3, "Python for Data Analysis", "Data Science"),
            course(4, "Inglês Instrumental", "Languages"),
        ]
    }

    fn ids(courses: &[&Course]) -> Vec<i64> {
        courses.iter().map(|c| c.id).collect()
    }

    #[test]
    fn no_query_and_all_categories_returns_snapshot() {
        let snapshot = snapshot();
        let visible = visible_courses(&snapshot, "", &CategoryFilter::All);
        assert_eq!(ids(&visible), vec![1, 2, 3, 4]);
    }

    #[test]
    fn query_is_case_insensitive_substring() {
        let snapshot = snapshot();
        let visible = visible_courses(&snapshot, "PYTHON", &CategoryFilter::All);
        assert_eq!(ids(&visible), vec![1, 3]);

        let visible = visible_courses(&snapshot, "py", &CategoryFilter::All);
        assert_eq!(ids(&visible), vec![1, 3]);

        let visible = visible_courses(&snapshot, "ciência", &CategoryFilter::All);
        assert_eq!(ids(&visible), vec![2]);
    }

    #[test]
    fn category_filter_is_exact() {
        let snapshot = snapshot();
        let filter = CategoryFilter::Only("Data Science".into());
        assert_eq!(ids(&visible_courses(&snapshot, "", &filter)), vec![2, 3]);

        let filter = CategoryFilter::Only("data science".into());
        assert!(visible_courses(&snapshot, "", &filter).is_empty());
    }

    #[test]
    fn query_and_filter_intersect() {
        let snapshot = snapshot();
        let filter = CategoryFilter::Only("Data Science".into());
        assert_eq!(ids(&visible_courses(&snapshot, "python", &filter)), vec![3]);
    }

    #[test]
    fn filters_commute() {
        let snapshot = snapshot();
        let filter = CategoryFilter::Only("Data Science".into());

        let by_category: Vec<Course> = visible_courses(&snapshot, "", &filter)
            .into_iter()
            .cloned()
            .collect();
        let then_query = visible_courses(&by_category, "python", &CategoryFilter::All);

        let by_query: Vec<Course> = visible_courses(&snapshot, "python", &CategoryFilter::All)
            .into_iter()
            .cloned()
            .collect();
        let then_category = visible_courses(&by_query, "", &filter);

        assert_eq!(ids(&then_query), ids(&then_category));
    }

    #[test]
    fn empty_snapshot_stays_empty() {
        assert!(visible_courses(&[], "rust", &CategoryFilter::All).is_empty());
    }
}
