pub const SCHEMA: &str = r#"
PRAGMA foreign_keys = ON;

-- users table (only populated when multi_user is enabled)
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at TEXT NOT NULL
);

-- cursos table; AUTOINCREMENT keeps ids from being reused after a delete
CREATE TABLE IF NOT EXISTS cursos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nome TEXT NOT NULL,
    url TEXT NOT NULL,
    categoria TEXT NOT NULL,
    concluido INTEGER NOT NULL DEFAULT 0,
    user_id INTEGER REFERENCES users(id) ON DELETE CASCADE,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_cursos_user_created ON cursos(user_id, created_at DESC);
"#;
