use axum::body::Bytes;
use serde::Serialize;

use crate::utils::form::RegistrationForm;

const FIRST_NAME_KEYS: &[&str] = &["player_first_name", "firstName"];
const LAST_NAME_KEYS: &[&str] = &["player_last_name", "lastName"];
const DOB_KEYS: &[&str] = &["player_dob", "dob"];
const ADDRESS_1_KEYS: &[&str] = &["player_address_1", "address_1", "address1"];
const ADDRESS_2_KEYS: &[&str] = &["player_address_2", "address_2", "address2"];
const CITY_KEYS: &[&str] = &["player_city", "city"];
const STATE_KEYS: &[&str] = &["player_state", "state"];
const ZIP_KEYS: &[&str] = &["player_zip", "zip"];
const EMAIL_KEYS: &[&str] = &["player_email", "email"];
const PHONE_KEYS: &[&str] = &["player_phone", "phone"];

/// File part of a registration, kept in memory for the duration of the request.
#[derive(Debug, Clone)]
pub struct UploadedPicture {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Raw, trimmed text fields of one registration. Absent fields are empty strings.
#[derive(Debug, Default)]
pub struct RegistrationInput {
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    pub address_1: String,
    pub address_2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub email: String,
    pub phone: String,
}

impl RegistrationInput {
    pub fn from_form(form: &RegistrationForm) -> Self {
        let text = |keys: &[&str]| form.text(keys).unwrap_or_default();

        RegistrationInput {
            first_name: text(FIRST_NAME_KEYS),
            last_name: text(LAST_NAME_KEYS),
            dob: text(DOB_KEYS),
            address_1: text(ADDRESS_1_KEYS),
            address_2: text(ADDRESS_2_KEYS),
            city: text(CITY_KEYS),
            state: text(STATE_KEYS),
            zip: text(ZIP_KEYS),
            email: text(EMAIL_KEYS).to_lowercase(),
            phone: text(PHONE_KEYS),
        }
    }

    /// Labels of the required fields that are still empty, in form order.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("dob", &self.dob),
            ("email", &self.email),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(label, _)| label)
        .collect()
    }
}

/// Validated player, ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    pub first_name: String,
    pub last_name: String,
    /// `YYYY-MM-DD`
    pub dob: String,
    pub address_1: Option<String>,
    pub address_2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub picture_path: Option<String>,
}

impl NewPlayer {
    pub fn new(input: RegistrationInput, dob: String, picture_path: Option<String>) -> Self {
        NewPlayer {
            first_name: input.first_name,
            last_name: input.last_name,
            dob,
            address_1: non_blank(input.address_1),
            address_2: non_blank(input.address_2),
            city: non_blank(input.city),
            state: non_blank(input.state),
            zip: non_blank(input.zip),
            email: input.email,
            phone: non_blank(input.phone),
            picture_path: picture_path.and_then(non_blank),
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[derive(Debug, Serialize)]
pub struct PlayerCreated {
    #[serde(rename = "playerId")]
    pub player_id: i64,
}
