use std::collections::HashMap;

use axum::extract::multipart::{Multipart, MultipartError};
use tracing::debug;

use crate::structs::player::UploadedPicture;

/// Only the first occurrence of each name is kept.
#[derive(Debug, Default)]
pub struct RegistrationForm {
    values: HashMap<String, String>,
    files: HashMap<String, UploadedPicture>,
}

impl RegistrationForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, MultipartError> {
        let mut form = RegistrationForm::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            match field.file_name().map(str::to_owned) {
                Some(file_name) => {
                    let bytes = field.bytes().await?;
                    if file_name.is_empty() {
                        debug!("Skipping file part `{name}` without a filename");
                        continue;
                    }
                    form.insert_file(&name, UploadedPicture { file_name, bytes });
                }
                None => {
                    let value = field.text().await?;
                    form.insert_text(&name, value);
                }
            }
        }

        Ok(form)
    }

    pub fn insert_text(&mut self, key: &str, value: String) {
        self.values.entry(key.to_owned()).or_insert(value);
    }

    pub fn insert_file(&mut self, key: &str, picture: UploadedPicture) {
        self.files.entry(key.to_owned()).or_insert(picture);
    }

    /// First non-blank value among `keys`, trimmed. Earlier keys win.
    pub fn text(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .filter_map(|key| self.values.get(*key))
            .map(|value| value.trim())
            .find(|value| !value.is_empty())
            .map(str::to_owned)
    }

    pub fn file(&self, keys: &[&str]) -> Option<&UploadedPicture> {
        keys.iter().find_map(|key| self.files.get(*key))
    }
}
