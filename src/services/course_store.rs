use crate::db::Repository;
use crate::error::{AppError, Result, ValidationError};
use crate::models::{check_category, normalize_url, Course, NewCourse, Session};

/// Course operations scoped to a session. The database stays the system of
/// record: nothing here caches rows between calls.
#[derive(Clone)]
pub struct CourseStore {
    repository: Repository,
    ownership: bool,
    allow_custom_categories: bool,
}

impl CourseStore {
    pub fn new(repository: Repository, ownership: bool, allow_custom_categories: bool) -> Self {
        Self {
            repository,
            ownership,
            allow_custom_categories,
        }
    }

    pub fn ownership(&self) -> bool {
        self.ownership
    }

    fn owner_scope(&self, session: &Session) -> Result<Option<i64>> {
        if !self.ownership {
            return Ok(None);
        }
        session
            .principal()
            .map(|p| Some(p.id))
            .ok_or(AppError::NotSignedIn)
    }

    pub async fn list(&self, session: &Session) -> Result<Vec<Course>> {
        let owner = self.owner_scope(session)?;
        self.repository
            .list_courses(owner)
            .await
            .map_err(|e| match e {
                AppError::StoreUnavailable(_) => e,
                other => AppError::StoreUnavailable(other.to_string()),
            })
    }

    pub async fn insert(&self, session: &Session, course: NewCourse) -> Result<Course> {
        let owner = self.owner_scope(session)?;

        let name = course.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if course.url.trim().is_empty() {
            return Err(ValidationError::EmptyUrl.into());
        }
        let category = check_category(&course.category, self.allow_custom_categories)?;

        let url = normalize_url(&course.url);
        if url::Url::parse(&url).is_err() {
            return Err(ValidationError::InvalidUrl(url).into());
        }

        let created = self
            .repository
            .insert_course(owner, name.to_string(), url, category)
            .await?;
        tracing::debug!(id = created.id, owner = ?owner, "course added");
        Ok(created)
    }

    pub async fn set_completed(&self, session: &Session, id: i64, completed: bool) -> Result<()> {
        let owner = self.owner_scope(session)?;
        let changed = self
            .repository
            .set_course_completed(id, owner, completed)
            .await?;
        if changed == 0 {
            return Err(AppError::NotFound(id));
        }
        Ok(())
    }

    /// Removing a course that is already gone is not an error.
    pub async fn delete(&self, session: &Session, id: i64) -> Result<()> {
        let owner = self.owner_scope(session)?;
        let deleted = self.repository.delete_course(id, owner).await?;
        if deleted == 0 {
            tracing::debug!(id, "delete matched no course");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Principal;

    async fn global_store() -> CourseStore {
        let repo = Repository::new(":memory:").await.unwrap();
        CourseStore::new(repo, false, false)
    }

    fn new_course(name: &str, url: &str, category: &str) -> NewCourse {
        NewCourse {
            name: name.into(),
            url: url.into(),
            category: category.into(),
        }
    }

    fn signed_in(id: i64) -> Session {
        Session::Authenticated(Principal {
            id,
            email: format!("user{id}@example.com"),
        })
    }

    #[tokio::test]
    async fn insert_then_list_has_one_pending_course() {
        let store = global_store().await;
        let session = Session::Anonymous;

        let created = store
            .insert(&session, new_course("Rust Basics", "rust-lang.org/learn", "Software Development"))
            .await
            .unwrap();

        let courses = store.list(&session).await.unwrap();
        assert_eq!(courses, vec![created.clone()]);
        assert!(!created.completed);
        assert_eq!(created.url, "https://rust-lang.org/learn");
        assert_eq!(created.owner, None);
    }

    #[tokio::test]
    async fn url_with_scheme_is_stored_unchanged() {
        let store = global_store().await;
        let created = store
            .insert(
                &Session::Anonymous,
                new_course("Stats", "http://stats.example.org/course", "Data Science"),
            )
            .await
            .unwrap();
        assert_eq!(created.url, "http://stats.example.org/course");
    }

    #[tokio::test]
    async fn scheme_detection_ignores_case_and_host_prefix() {
        let store = global_store().await;
        let session = Session::Anonymous;

        let bin = store
            .insert(&session, new_course("HTTP tests", "httpbin.org/get", "Other"))
            .await
            .unwrap();
        assert_eq!(bin.url, "https://httpbin.org/get");

        let upper = store
            .insert(&session, new_course("Upper", "HTTPS://Example.com/x", "Other"))
            .await
            .unwrap();
        assert_eq!(upper.url, "HTTPS://Example.com/x");
    }

    #[tokio::test]
    async fn empty_fields_are_rejected_without_writing() {
        let store = global_store().await;
        let session = Session::Anonymous;

        let no_name = store
            .insert(&session, new_course("  ", "example.com", "Other"))
            .await;
        assert!(matches!(
            no_name,
            Err(AppError::Validation(ValidationError::EmptyName))
        ));

        let no_url = store.insert(&session, new_course("Name", "", "Other")).await;
        assert!(matches!(
            no_url,
            Err(AppError::Validation(ValidationError::EmptyUrl))
        ));

        assert!(store.list(&session).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn placeholder_category_is_rejected() {
        let store = global_store().await;
        let session = Session::Anonymous;

        let result = store
            .insert(&session, new_course("Intro", "example.com", "── Technology ──"))
            .await;
        assert!(matches!(
            result,
            Err(AppError::Validation(ValidationError::PlaceholderCategory(_)))
        ));
        assert!(store.list(&session).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unparseable_link_is_rejected() {
        let store = global_store().await;
        let result = store
            .insert(&Session::Anonymous, new_course("Bad", "exa mple.com", "Other"))
            .await;
        assert!(matches!(
            result,
            Err(AppError::Validation(ValidationError::InvalidUrl(_)))
        ));
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = global_store().await;
        let session = Session::Anonymous;
        for name in ["A", "B", "C"] {
            store
                .insert(&session, new_course(name, "example.com", "Other"))
                .await
                .unwrap();
        }

        let names: Vec<String> = store
            .list(&session)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["C", "B", "A"]);
    }

    #[tokio::test]
    async fn completion_round_trip_restores_pending() {
        let store = global_store().await;
        let session = Session::Anonymous;
        let created = store
            .insert(&session, new_course("Yoga", "example.com", "Physical Education"))
            .await
            .unwrap();

        store.set_completed(&session, created.id, true).await.unwrap();
        store.set_completed(&session, created.id, true).await.unwrap();
        assert!(store.list(&session).await.unwrap()[0].completed);

        store.set_completed(&session, created.id, false).await.unwrap();
        assert_eq!(store.list(&session).await.unwrap()[0], created);
    }

    #[tokio::test]
    async fn set_completed_on_missing_course_is_not_found() {
        let store = global_store().await;
        let result = store.set_completed(&Session::Anonymous, 42, true).await;
        assert!(matches!(result, Err(AppError::NotFound(42))));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = global_store().await;
        let session = Session::Anonymous;
        let created = store
            .insert(&session, new_course("Go", "go.dev", "Software Development"))
            .await
            .unwrap();

        store.delete(&session, created.id).await.unwrap();
        store.delete(&session, created.id).await.unwrap();
        assert!(store
            .list(&session)
            .await
            .unwrap()
            .iter()
            .all(|c| c.id != created.id));
    }

    #[tokio::test]
    async fn owners_never_see_each_others_courses() {
        let repo = Repository::new(":memory:").await.unwrap();
        let ana = repo
            .insert_user("ana@example.com".into(), "h".into())
            .await
            .unwrap()
            .unwrap();
        let bia = repo
            .insert_user("bia@example.com".into(), "h".into())
            .await
            .unwrap()
            .unwrap();
        let store = CourseStore::new(repo, true, false);
        let (ana, bia) = (signed_in(ana), signed_in(bia));

        let course = store
            .insert(&ana, new_course("Spanish", "example.com/es", "Languages"))
            .await
            .unwrap();

        assert!(store.list(&bia).await.unwrap().is_empty());
        assert!(matches!(
            store.set_completed(&bia, course.id, true).await,
            Err(AppError::NotFound(_))
        ));
        store.delete(&bia, course.id).await.unwrap();

        let seen_by_ana = store.list(&ana).await.unwrap();
        assert_eq!(seen_by_ana, vec![course]);
    }

    #[tokio::test]
    async fn anonymous_session_cannot_touch_owned_store() {
        let repo = Repository::new(":memory:").await.unwrap();
        let store = CourseStore::new(repo, true, false);
        let session = Session::Anonymous;

        assert!(matches!(store.list(&session).await, Err(AppError::NotSignedIn)));
        assert!(matches!(
            store
                .insert(&session, new_course("X", "x.com", "Other"))
                .await,
            Err(AppError::NotSignedIn)
        ));
        assert!(matches!(
            store.set_completed(&session, 1, true).await,
            Err(AppError::NotSignedIn)
        ));
        assert!(matches!(
            store.delete(&session, 1).await,
            Err(AppError::NotSignedIn)
        ));
    }

    #[tokio::test]
    async fn custom_categories_when_enabled() {
        let repo = Repository::new(":memory:").await.unwrap();
        let store = CourseStore::new(repo, false, true);
        let created = store
            .insert(&Session::Anonymous, new_course("Bread", "bake.example", "Cooking"))
            .await
            .unwrap();
        assert_eq!(created.category, "Cooking");
    }
}
