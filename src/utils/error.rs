use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error in '{field}': {message}")]
    ValidationError { field: String, message: String },

    #[error("Cannot split cost across zero players")]
    InvalidPlayerCount,

    #[error("An export is already in progress for this summary")]
    ExportInProgress,

    #[error("Rasterization failed: {message}")]
    RasterizationError { message: String },

    #[error("{format} encoding failed: {message}")]
    EncodingError { format: String, message: String },

    #[error("Pagination error: {message}")]
    PaginationError { message: String },

    #[error("Share failed: {message}")]
    ShareError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Calculation,
    Export,
    Share,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SplitError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SplitError::ConfigValidationError { .. }
            | SplitError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            SplitError::ValidationError { .. } | SplitError::SerializationError(_) => {
                ErrorCategory::Input
            }
            SplitError::InvalidPlayerCount => ErrorCategory::Calculation,
            SplitError::ExportInProgress
            | SplitError::RasterizationError { .. }
            | SplitError::EncodingError { .. }
            | SplitError::PaginationError { .. } => ErrorCategory::Export,
            SplitError::ShareError { .. } => ErrorCategory::Share,
            SplitError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SplitError::ShareError { .. } => ErrorSeverity::Low,
            SplitError::ExportInProgress
            | SplitError::RasterizationError { .. }
            | SplitError::EncodingError { .. } => ErrorSeverity::Medium,
            SplitError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    /// One-line notice suitable for showing to the person who triggered the
    /// operation.
    pub fn user_friendly_message(&self) -> String {
        match self {
            SplitError::ValidationError { message, .. } => message.clone(),
            SplitError::InvalidPlayerCount => "Minimal harus ada 1 pemain".to_string(),
            SplitError::ExportInProgress => {
                "Ekspor sebelumnya masih berjalan, tunggu sebentar.".to_string()
            }
            SplitError::EncodingError { format, .. } if format == "PDF" => {
                "Gagal membuat PDF. Silakan coba lagi.".to_string()
            }
            SplitError::RasterizationError { .. }
            | SplitError::EncodingError { .. }
            | SplitError::PaginationError { .. } => {
                "Gagal membuat gambar. Silakan coba lagi.".to_string()
            }
            SplitError::ShareError { .. } => "Gagal menyalin ke clipboard".to_string(),
            SplitError::ConfigValidationError { .. }
            | SplitError::InvalidConfigValueError { .. } => {
                format!("Konfigurasi tidak valid: {}", self)
            }
            SplitError::SerializationError(_) => format!("Data masukan tidak valid: {}", self),
            SplitError::IoError(e) => format!("Gagal membaca atau menulis berkas: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => "Check the config file values and try again",
            ErrorCategory::Input => "Fix the highlighted field in the input file and try again",
            ErrorCategory::Calculation => "Add at least one player with a non-empty name",
            ErrorCategory::Export => "Retry the export; other formats are unaffected",
            ErrorCategory::Share => "Copy the summary text manually from the TXT export",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, SplitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_encoding_failure_has_pdf_notice() {
        let err = SplitError::EncodingError {
            format: "PDF".to_string(),
            message: "boom".to_string(),
        };
        assert_eq!(err.user_friendly_message(), "Gagal membuat PDF. Silakan coba lagi.");
        assert_eq!(err.category(), ErrorCategory::Export);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_invalid_player_count_is_calculation_error() {
        let err = SplitError::InvalidPlayerCount;
        assert_eq!(err.category(), ErrorCategory::Calculation);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.user_friendly_message(), "Minimal harus ada 1 pemain");
    }
}
