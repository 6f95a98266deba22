use std::sync::Arc;

use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::{extract::State, Json};
use tracing::{error, info, warn};

use crate::structs::player::{NewPlayer, PlayerCreated, RegistrationInput};
use crate::utils::app_error::AppError;
use crate::utils::dob::normalize_dob;
use crate::utils::form::RegistrationForm;
use crate::utils::player_repository::InsertPlayerError;
use crate::AppState;

const PICTURE_KEYS: &[&str] = &["player_picture", "picture"];

pub async fn register_player_route(
    State(app_state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PlayerCreated>, AppError> {
    let multipart = multipart.map_err(|e| {
        warn!("Rejected registration body : {e}");
        AppError::InvalidFormData
    })?;

    let form = RegistrationForm::from_multipart(multipart).await.map_err(|e| {
        warn!("Error reading registration form : {e}");
        AppError::InvalidFormData
    })?;

    let input = RegistrationInput::from_form(&form);

    let missing = input.missing_required_fields();
    if !missing.is_empty() {
        warn!("Registration missing required fields : {}", missing.join(", "));
        return Err(AppError::MissingRequiredFields(missing));
    }

    let dob = normalize_dob(&input.dob).map_err(|e| {
        warn!("{e}");
        AppError::InvalidDateOfBirth
    })?;

    let picture_path = app_state
        .pictures
        .save(form.file(PICTURE_KEYS))
        .await
        .map_err(|e| {
            error!("Error saving picture : {e}");
            AppError::PictureSaveFailed
        })?;

    let player = NewPlayer::new(input, dob, picture_path);

    let inserted = tokio::time::timeout(app_state.write_timeout, app_state.players.insert(&player))
        .await
        .unwrap_or(Err(InsertPlayerError::Timeout));

    match inserted {
        Ok(player_id) => {
            info!("Player {player_id} registered");
            Ok(Json(PlayerCreated { player_id }))
        }
        // The row may still land after a timeout, so its picture is kept.
        Err(InsertPlayerError::Timeout) => {
            error!("Player insert timed out, keeping picture {:?}", player.picture_path);
            Err(AppError::InternalServerError)
        }
        Err(e) => {
            if let Some(picture_path) = &player.picture_path {
                app_state.pictures.discard(picture_path).await;
            }

            match e {
                InsertPlayerError::DuplicateEmail => {
                    warn!("Email address `{}` already used", player.email);
                    Err(AppError::DuplicateEmail)
                }
                e => {
                    error!("Error inserting player : {e:?}");
                    Err(AppError::InternalServerError)
                }
            }
        }
    }
}
