use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, Utc};
use rusqlite::{params, OptionalExtension, Row};
use tokio_rusqlite::Connection;

use crate::error::{AppError, Result};
use crate::models::Course;

use super::schema::SCHEMA;

/// Course as read from `cursos`, before its fields are checked.
#[derive(Debug)]
struct CourseRow {
    id: i64,
    owner: Option<i64>,
    name: String,
    url: String,
    category: String,
    completed: i64,
    created_at: String,
}

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
}

#[derive(Clone)]
pub struct Repository {
    conn: Connection,
}

impl Repository {
    pub async fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path).await?;

        conn.call(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await?;

        Ok(Self { conn })
    }

    // Course operations

    /// Courses newest first. `owner = None` reads every row.
    pub async fn list_courses(&self, owner: Option<i64>) -> Result<Vec<Course>> {
        let rows = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    r#"SELECT id, user_id, nome, url, categoria, concluido, created_at
                       FROM cursos
                       WHERE (?1 IS NULL OR user_id = ?1)
                       ORDER BY created_at DESC, id DESC"#,
                )?;
                let rows = stmt
                    .query_map(params![owner], course_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(rows)
            })
            .await?;

        rows.into_iter().map(CourseRow::into_course).collect()
    }

    pub async fn insert_course(
        &self,
        owner: Option<i64>,
        name: String,
        url: String,
        category: String,
    ) -> Result<Course> {
        let (id, created_at, name, url, category) = self
            .conn
            .call(move |conn| {
                let latest: Option<String> =
                    conn.query_row("SELECT MAX(created_at) FROM cursos", [], |row| row.get(0))?;
                let created_at = next_stamp(
                    Utc::now(),
                    latest.as_deref().and_then(parse_datetime),
                );
                let stamp = created_at.to_rfc3339_opts(SecondsFormat::Micros, true);

                conn.execute(
                    r#"INSERT INTO cursos (nome, url, categoria, concluido, user_id, created_at)
                       VALUES (?1, ?2, ?3, 0, ?4, ?5)"#,
                    params![name, url, category, owner, stamp],
                )?;
                Ok((conn.last_insert_rowid(), created_at, name, url, category))
            })
            .await?;

        Ok(Course {
            id,
            owner,
            name,
            url,
            category,
            completed: false,
            created_at,
        })
    }

    /// Returns the number of rows changed (0 when the course is not visible to `owner`).
    pub async fn set_course_completed(
        &self,
        id: i64,
        owner: Option<i64>,
        completed: bool,
    ) -> Result<usize> {
        let changed = self
            .conn
            .call(move |conn| {
                let changed = conn.execute(
                    "UPDATE cursos SET concluido = ?1 WHERE id = ?2 AND (?3 IS NULL OR user_id = ?3)",
                    params![completed, id, owner],
                )?;
                Ok(changed)
            })
            .await?;
        Ok(changed)
    }

    pub async fn delete_course(&self, id: i64, owner: Option<i64>) -> Result<usize> {
        let deleted = self
            .conn
            .call(move |conn| {
                let deleted = conn.execute(
                    "DELETE FROM cursos WHERE id = ?1 AND (?2 IS NULL OR user_id = ?2)",
                    params![id, owner],
                )?;
                Ok(deleted)
            })
            .await?;
        Ok(deleted)
    }

    // User operations

    /// Returns `None` when the email is already registered.
    pub async fn insert_user(&self, email: String, password_hash: String) -> Result<Option<i64>> {
        let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        let id = self
            .conn
            .call(move |conn| {
                let inserted = conn.execute(
                    r#"INSERT INTO users (email, password_hash, created_at)
                       VALUES (?1, ?2, ?3)
                       ON CONFLICT(email) DO NOTHING"#,
                    params![email, password_hash, stamp],
                )?;
                Ok((inserted > 0).then(|| conn.last_insert_rowid()))
            })
            .await?;
        Ok(id)
    }

    pub async fn find_user_by_email(&self, email: String) -> Result<Option<UserRow>> {
        let user = self
            .conn
            .call(move |conn| {
                let user = conn
                    .query_row(
                        "SELECT id, email, password_hash FROM users WHERE email = ?1",
                        params![email],
                        |row| {
                            Ok(UserRow {
                                id: row.get(0)?,
                                email: row.get(1)?,
                                password_hash: row.get(2)?,
                            })
                        },
                    )
                    .optional()?;
                Ok(user)
            })
            .await?;
        Ok(user)
    }

    #[cfg(test)]
    pub(crate) async fn execute_raw(&self, sql: &'static str) -> Result<()> {
        self.conn
            .call(move |conn| {
                conn.execute_batch(sql)?;
                Ok(())
            })
            .await?;
        Ok(())
    }
}

/// Insert stamp at microsecond precision, always after `latest` so a clock
/// that steps backwards cannot reorder the list.
fn next_stamp(now: DateTime<Utc>, latest: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = now.trunc_subsecs(6);
    match latest {
        Some(latest) if latest >= now => latest.trunc_subsecs(6) + Duration::microseconds(1),
        _ => now,
    }
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    // Try RFC3339 first (e.g., "2026-01-11T12:34:56.123456Z")
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // Try SQLite datetime format (e.g., "2026-01-11 12:34:56")
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    None
}

fn course_row(row: &Row) -> rusqlite::Result<CourseRow> {
    Ok(CourseRow {
        id: row.get(0)?,
        owner: row.get(1)?,
        name: row.get(2)?,
        url: row.get(3)?,
        category: row.get(4)?,
        completed: row.get(5)?,
        created_at: row.get(6)?,
    })
}

impl CourseRow {
    fn into_course(self) -> Result<Course> {
        let malformed = |what: &str| {
            AppError::StoreUnavailable(format!("course {} has malformed {what}", self.id))
        };

        let created_at = parse_datetime(&self.created_at).ok_or_else(|| malformed("created_at"))?;
        if self.name.trim().is_empty() {
            return Err(malformed("name"));
        }
        if !self.url.starts_with("http") {
            return Err(malformed("url"));
        }

        Ok(Course {
            id: self.id,
            owner: self.owner,
            name: self.name,
            url: self.url,
            category: self.category,
            completed: self.completed != 0,
            created_at,
        })
    }
}
