use async_trait::async_trait;
use sqlx::error::DatabaseError;
use sqlx::PgPool;
use thiserror::Error;

use crate::structs::player::NewPlayer;

/// Unique constraint Postgres generates for `players.email`.
pub const PLAYERS_EMAIL_CONSTRAINT: &str = "players_email_key";

const INSERT_PLAYER: &str = r#"INSERT INTO players (
    first_name, last_name, dob, address_1, address_2, city, state, zip, email, phone, picture_path
) VALUES ($1, $2, $3::date, $4, $5, $6, $7, $8, $9, $10, $11)
RETURNING player_id::bigint"#;

#[derive(Debug, Error)]
pub enum InsertPlayerError {
    #[error("a player with this email already exists")]
    DuplicateEmail,

    #[error("player insert timed out")]
    Timeout,

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for InsertPlayerError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if is_duplicate_email(&**db_err) {
                return InsertPlayerError::DuplicateEmail;
            }
        }
        InsertPlayerError::Database(e)
    }
}

fn is_duplicate_email(db_err: &dyn DatabaseError) -> bool {
    db_err.is_unique_violation() && db_err.constraint() == Some(PLAYERS_EMAIL_CONSTRAINT)
}

/// Persistence for new players. Implementations must report an email
/// collision as [`InsertPlayerError::DuplicateEmail`].
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Inserts `player` and returns the id assigned by the store.
    async fn insert(&self, player: &NewPlayer) -> Result<i64, InsertPlayerError>;
}

#[derive(Clone)]
pub struct PgPlayerRepository {
    pool: PgPool,
}

impl PgPlayerRepository {
    pub fn new(pool: PgPool) -> Self {
        PgPlayerRepository { pool }
    }
}

#[async_trait]
impl PlayerRepository for PgPlayerRepository {
    async fn insert(&self, player: &NewPlayer) -> Result<i64, InsertPlayerError> {
        let player_id = sqlx::query_scalar::<_, i64>(INSERT_PLAYER)
            .bind(&player.first_name)
            .bind(&player.last_name)
            .bind(&player.dob)
            .bind(&player.address_1)
            .bind(&player.address_2)
            .bind(&player.city)
            .bind(&player.state)
            .bind(&player.zip)
            .bind(&player.email)
            .bind(&player.phone)
            .bind(&player.picture_path)
            .fetch_one(&self.pool)
            .await?;

        Ok(player_id)
    }
}
