use crate::domain::model::{CalculationInput, InvitationInput};
use crate::utils::error::{Result, SplitError};
use crate::utils::validation::validate_file_extensions;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const INPUT_EXTENSIONS: [&str; 2] = ["toml", "json"];

/// Reads a TOML or JSON input file, picked by extension.
pub fn load_input<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let display = path.display().to_string();
    validate_file_extensions("input", std::slice::from_ref(&display), &INPUT_EXTENSIONS)?;

    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        Ok(serde_json::from_str(&content)?)
    } else {
        toml::from_str(&content).map_err(|e| SplitError::ValidationError {
            field: "input".to_string(),
            message: format!("Format berkas {} tidak valid: {}", display, e),
        })
    }
}

pub fn load_calculation(path: &Path) -> Result<CalculationInput> {
    load_input(path)
}

/// Invitation files may point at an image on disk instead of embedding it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InvitationFile {
    #[serde(flatten)]
    invitation: InvitationInput,
    #[serde(default)]
    image_path: Option<PathBuf>,
}

pub fn load_invitation(path: &Path) -> Result<InvitationInput> {
    let file: InvitationFile = load_input(path)?;
    let mut invitation = file.invitation;

    if let Some(image_path) = file.image_path {
        let resolved = match path.parent() {
            Some(dir) if image_path.is_relative() => dir.join(&image_path),
            _ => image_path,
        };
        invitation.image_preview = Some(image_data_uri(&resolved)?);
    }

    Ok(invitation)
}

fn image_mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Embeds an image file as a base64 `data:` URI.
pub fn image_data_uri(path: &Path) -> Result<String> {
    let mime = image_mime_type(path).ok_or_else(|| SplitError::ValidationError {
        field: "imagePath".to_string(),
        message: format!("Format gambar tidak didukung: {}", path.display()),
    })?;
    let bytes = std::fs::read(path)?;
    tracing::debug!("Embedding {} ({} bytes)", path.display(), bytes.len());
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}
