use crate::core::export::ExportSettings;
use crate::core::layout::DocumentStyle;
use crate::core::paginate::{PageLayout, PageSize, PaginationPolicy, PX_TO_MM};
use crate::core::summary::SummaryContext;
use crate::utils::error::{Result, SplitError};
use crate::utils::validation::{self, Validate};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub club: ClubConfig,
    pub export: ExportConfig,
    pub locale: LocaleConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClubConfig {
    pub name: String,
}

impl Default for ClubConfig {
    fn default() -> Self {
        Self {
            name: "PB Kena Mental".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSizeName {
    #[default]
    A4,
    Letter,
}

impl PageSizeName {
    pub fn size(&self) -> PageSize {
        match self {
            PageSizeName::A4 => PageSize::A4,
            PageSizeName::Letter => PageSize::LETTER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_path: String,
    pub document_width_px: u32,
    pub png_scale: f32,
    pub pdf_scale: f32,
    pub page_size: PageSizeName,
    pub margin_mm: f64,
    pub px_to_mm: f64,
    pub pagination: PaginationPolicy,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: "./output".to_string(),
            document_width_px: DocumentStyle::default().width,
            png_scale: 2.0,
            pdf_scale: 1.5,
            page_size: PageSizeName::A4,
            margin_mm: 10.0,
            px_to_mm: PX_TO_MM,
            pagination: PaginationPolicy::Split,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    pub timezone_label: String,
    pub utc_offset_hours: i32,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            timezone_label: "WIB".to_string(),
            utc_offset_hours: 7,
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SplitError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration text, expanding `${VAR}` references first.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SplitError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| SplitError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn output_path(&self) -> &str {
        &self.export.output_path
    }

    pub fn summary_context(&self) -> SummaryContext {
        SummaryContext {
            club_name: self.club.name.clone(),
            timezone_label: self.locale.timezone_label.clone(),
        }
    }

    pub fn export_settings(&self) -> ExportSettings {
        ExportSettings {
            png_scale: self.export.png_scale,
            pdf_scale: self.export.pdf_scale,
            page_layout: PageLayout {
                page: self.export.page_size.size(),
                margin_mm: self.export.margin_mm,
                px_to_mm: self.export.px_to_mm,
                policy: self.export.pagination,
            },
            document_style: DocumentStyle {
                width: self.export.document_width_px,
                ..DocumentStyle::default()
            },
        }
    }

    pub fn utc_offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.locale.utc_offset_hours * 3600).ok_or_else(|| {
            SplitError::InvalidConfigValueError {
                field: "locale.utc_offset_hours".to_string(),
                value: self.locale.utc_offset_hours.to_string(),
                reason: "Offset must be between -23 and 23 hours".to_string(),
            }
        })
    }

    /// Current wall-clock time in the configured offset.
    pub fn now(&self) -> Result<DateTime<FixedOffset>> {
        Ok(Utc::now().with_timezone(&self.utc_offset()?))
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("club.name", &self.club.name)?;
        validation::validate_path("export.output_path", &self.export.output_path)?;
        validation::validate_range(
            "export.document_width_px",
            self.export.document_width_px,
            240,
            4096,
        )?;
        validation::validate_range("export.png_scale", self.export.png_scale, 0.25, 8.0)?;
        validation::validate_range("export.pdf_scale", self.export.pdf_scale, 0.25, 8.0)?;
        validation::validate_range("export.px_to_mm", self.export.px_to_mm, 0.01, 10.0)?;

        let page = self.export.page_size.size();
        let max_margin = page.width_mm.min(page.height_mm) / 2.0 - 1.0;
        validation::validate_range("export.margin_mm", self.export.margin_mm, 0.0, max_margin)?;

        validation::validate_range(
            "locale.utc_offset_hours",
            self.locale.utc_offset_hours,
            -23,
            23,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[club]
name = "PB Smash Bersama"

[export]
output_path = "./exports"
png_scale = 3.0
pdf_scale = 1.0
page_size = "letter"
margin_mm = 12.5
pagination = "shrink"

[locale]
timezone_label = "WITA"
utc_offset_hours = 8
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());

        assert_eq!(config.club.name, "PB Smash Bersama");
        assert_eq!(config.output_path(), "./exports");

        let settings = config.export_settings();
        assert_eq!(settings.png_scale, 3.0);
        assert_eq!(settings.pdf_scale, 1.0);
        assert_eq!(settings.page_layout.page, PageSize::LETTER);
        assert_eq!(settings.page_layout.margin_mm, 12.5);
        assert_eq!(settings.page_layout.policy, PaginationPolicy::Shrink);
        assert_eq!(settings.page_layout.px_to_mm, PX_TO_MM);

        let context = config.summary_context();
        assert_eq!(context.timezone_label, "WITA");
        assert_eq!(config.utc_offset().unwrap().local_minus_utc(), 8 * 3600);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.validate().is_ok());

        let settings = config.export_settings();
        assert_eq!(settings.png_scale, 2.0);
        assert_eq!(settings.pdf_scale, 1.5);
        assert_eq!(settings.page_layout.page, PageSize::A4);
        assert_eq!(config.summary_context(), SummaryContext::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BADMINTON_SPLIT_TEST_CLUB", "PB Env Club");

        let toml_content = r#"
[club]
name = "${BADMINTON_SPLIT_TEST_CLUB}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.club.name, "PB Env Club");

        std::env::remove_var("BADMINTON_SPLIT_TEST_CLUB");
    }

    #[test]
    fn test_config_validation() {
        let config = AppConfig::from_toml_str("[export]\npng_scale = 0.0\n").unwrap();
        assert!(config.validate().is_err());

        let config = AppConfig::from_toml_str("[export]\nmargin_mm = 150.0\n").unwrap();
        assert!(config.validate().is_err());

        let config = AppConfig::from_toml_str("[club]\nname = \"  \"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml_str("[export\n").unwrap_err();
        assert!(matches!(err, SplitError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[club]\nname = \"PB File\"\n")
            .unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.club.name, "PB File");
    }
}
