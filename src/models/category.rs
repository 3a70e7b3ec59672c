use crate::error::ValidationError;

/// One entry of the grouped category picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryOption {
    /// Section label shown for grouping only; never stored on a course.
    Header(&'static str),
    Category(&'static str),
}

impl CategoryOption {
    pub fn is_selectable(self) -> bool {
        matches!(self, CategoryOption::Category(_))
    }

    pub fn label(self) -> String {
        match self {
            CategoryOption::Header(name) => format!("── {name} ──"),
            CategoryOption::Category(name) => name.to_string(),
        }
    }

    fn matches(self, value: &str) -> bool {
        match self {
            CategoryOption::Header(name) => value == name || value == self.label(),
            CategoryOption::Category(name) => value == name,
        }
    }
}

use CategoryOption::{Category, Header};

pub const CATALOG: &[CategoryOption] = &[
    Header("Technology"),
    Category("AI & Machine Learning"),
    Category("Software Development"),
    Category("Data Science"),
    Category("Information Security"),
    Category("Cloud Computing"),
    Category("UX/UI Design"),
    Header("Business"),
    Category("Administration & Management"),
    Category("Digital Marketing"),
    Category("Finance & Accounting"),
    Category("Logistics"),
    Header("Health"),
    Category("Nursing"),
    Category("Psychology"),
    Category("Physical Education"),
    Category("Nutrition"),
    Header("Education"),
    Category("Pedagogy"),
    Category("Languages"),
    Header("Engineering & Design"),
    Category("Engineering & Architecture"),
    Category("Graphic Design"),
    Category("Video Editing"),
    Header("Training"),
    Category("Exam Preparation"),
    Category("Technical Course"),
    Category("Complementary Hours"),
    Category("Other"),
];

pub fn selectable_categories() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().filter_map(|option| match option {
        Category(name) => Some(*name),
        Header(_) => None,
    })
}

/// Index of the first selectable entry, used as the form's starting point.
pub fn first_selectable_index() -> usize {
    CATALOG.iter().position(|o| o.is_selectable()).unwrap_or(0)
}

/// Returns the category to store, or why `value` cannot be stored.
pub fn check_category(value: &str, allow_custom: bool) -> Result<String, ValidationError> {
    let value = value.trim();

    if let Some(header) = CATALOG
        .iter()
        .find(|o| !o.is_selectable() && o.matches(value))
    {
        return Err(ValidationError::PlaceholderCategory(header.label()));
    }

    if CATALOG.iter().any(|o| o.matches(value)) || (allow_custom && !value.is_empty()) {
        Ok(value.to_string())
    } else {
        Err(ValidationError::UnknownCategory(value.to_string()))
    }
}

/// Category restriction applied to the course list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(name) => name,
        }
    }

    pub fn accepts(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(name) => name == category,
        }
    }

    /// All -> first category -> ... -> last category -> All.
    pub fn cycle(&self) -> Self {
        let mut categories = selectable_categories();
        match self {
            CategoryFilter::All => categories
                .next()
                .map(|c| CategoryFilter::Only(c.to_string()))
                .unwrap_or(CategoryFilter::All),
            CategoryFilter::Only(current) => {
                let mut categories = categories.skip_while(|c| *c != current.as_str());
                categories.next();
                categories
                    .next()
                    .map(|c| CategoryFilter::Only(c.to_string()))
                    .unwrap_or(CategoryFilter::All)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_keeps_all_study_areas() {
        assert_eq!(selectable_categories().count(), 23);
        assert!(!CATALOG[0].is_selectable());
        assert!(CATALOG[first_selectable_index()].is_selectable());
    }

    #[test]
    fn headers_are_rejected_in_both_spellings() {
        assert_eq!(
            check_category("Technology", false),
            Err(ValidationError::PlaceholderCategory("── Technology ──".into()))
        );
        assert!(matches!(
            check_category("── Health ──", true),
            Err(ValidationError::PlaceholderCategory(_))
        ));
    }

    #[test]
    fn free_text_only_when_custom_categories_allowed() {
        assert_eq!(check_category("Data Science", false), Ok("Data Science".into()));
        assert_eq!(
            check_category("Cooking", false),
            Err(ValidationError::UnknownCategory("Cooking".into()))
        );
        assert_eq!(check_category(" Cooking ", true), Ok("Cooking".into()));
        assert!(check_category("   ", true).is_err());
    }

    #[test]
    fn filter_cycle_visits_every_category_then_wraps() {
        let mut filter = CategoryFilter::All;
        let mut seen = Vec::new();
        loop {
            filter = filter.cycle();
            match &filter {
                CategoryFilter::All => break,
                CategoryFilter::Only(name) => seen.push(name.clone()),
            }
        }
        let expected: Vec<String> = selectable_categories().map(String::from).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn filter_accepts_exact_match_only() {
        let filter = CategoryFilter::Only("Languages".into());
        assert!(filter.accepts("Languages"));
        assert!(!filter.accepts("languages"));
        assert!(CategoryFilter::All.accepts("anything"));
    }
}
