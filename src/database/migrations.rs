//! Postgres schema, applied idempotently at startup.

pub const CREATE_SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id          UUID PRIMARY KEY,
        name        VARCHAR(50)  NOT NULL,
        email       VARCHAR(254) NOT NULL,
        password    TEXT         NOT NULL,
        created_at  TIMESTAMPTZ  NOT NULL DEFAULT now(),
        CONSTRAINT users_email_key UNIQUE (email)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS jobs (
        id          UUID PRIMARY KEY,
        company     VARCHAR(50)  NOT NULL,
        position    VARCHAR(100) NOT NULL,
        status      TEXT         NOT NULL DEFAULT 'pending'
                    CHECK (status IN ('interview', 'declined', 'pending')),
        created_by  UUID         NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        created_at  TIMESTAMPTZ  NOT NULL DEFAULT now(),
        updated_at  TIMESTAMPTZ  NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS jobs_owner_created_idx ON jobs (created_by, created_at)
    "#,
];
