use crate::domain::model::{CalculationInput, InvitationInput};
use crate::utils::error::{Result, SplitError};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SplitError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SplitError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SplitError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SplitError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SplitError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extensions(
    field_name: &str,
    files: &[String],
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    for file in files {
        if let Some(extension) = std::path::Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            if !allowed_set.contains(extension.to_ascii_lowercase().as_str()) {
                return Err(SplitError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
        } else {
            return Err(SplitError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: file.clone(),
                reason: "File has no extension or invalid filename".to_string(),
            });
        }
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SplitError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if !(value >= min && value <= max) {
        return Err(SplitError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

fn input_error(field: &str, message: &str) -> SplitError {
    SplitError::ValidationError {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn require(condition: bool, field: &str, message: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(input_error(field, message))
    }
}

impl Validate for CalculationInput {
    fn validate(&self) -> Result<()> {
        require(!self.court_name.trim().is_empty(), "courtName", "Nama lapangan harus diisi")?;
        require(
            self.hourly_rate.is_finite() && self.hourly_rate >= 0.0,
            "hourlyRate",
            "Biaya sewa per jam tidak boleh negatif",
        )?;
        require(
            self.duration.is_finite() && self.duration > 0.0,
            "duration",
            "Lama sewa harus lebih dari 0",
        )?;
        require(
            self.shuttlecock_price.is_finite() && self.shuttlecock_price >= 0.0,
            "shuttlecockPrice",
            "Biaya shuttlecock tidak boleh negatif",
        )?;
        require(
            self.players.iter().any(|p| !p.name.trim().is_empty()),
            "players",
            "Minimal harus ada 1 pemain",
        )?;

        for (i, account) in self.bank_accounts.iter().enumerate() {
            let complete = [&account.bank_name, &account.account_number, &account.account_name]
                .iter()
                .all(|v| !v.trim().is_empty());
            if !complete {
                return Err(SplitError::ValidationError {
                    field: format!("bankAccounts[{}]", i),
                    message: format!("Data rekening {} belum lengkap", i + 1),
                });
            }
        }

        Ok(())
    }
}

impl Validate for InvitationInput {
    fn validate(&self) -> Result<()> {
        require(!self.court_name.trim().is_empty(), "courtName", "Nama lapangan harus diisi")?;

        if let Some(location) = self.location() {
            validate_url("courtLocation", location.trim())
                .map_err(|_| input_error("courtLocation", "Link Google Maps tidak valid"))?;
        }

        require(
            self.start_time < self.end_time,
            "endTime",
            "Jam selesai harus lebih besar dari jam mulai",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{BankAccount, Player};
    use chrono::{NaiveDate, NaiveTime};

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn calculation() -> CalculationInput {
        CalculationInput {
            court_name: "GOR Sentral".to_string(),
            hourly_rate: 50_000.0,
            duration: 2.0,
            shuttlecock_price: 5_000.0,
            shuttlecock_used: 6,
            players: vec![Player {
                id: "1".to_string(),
                name: "Andi".to_string(),
            }],
            play_date: NaiveDate::from_ymd_opt(2024, 10, 12).unwrap(),
            play_time: time(19, 0),
            additional_info: None,
            bank_accounts: vec![],
        }
    }

    fn invitation(start: NaiveTime, end: NaiveTime) -> InvitationInput {
        InvitationInput {
            court_name: "GOR Sentral".to_string(),
            court_location: None,
            play_date: NaiveDate::from_ymd_opt(2024, 10, 12).unwrap(),
            start_time: start,
            end_time: end,
            image_preview: None,
            additional_notes: None,
        }
    }

    fn failing_field(result: Result<()>) -> String {
        match result {
            Err(SplitError::ValidationError { field, .. }) => field,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("courtLocation", "https://maps.app.goo.gl/abc").is_ok());
        assert!(validate_url("courtLocation", "http://example.com").is_ok());
        assert!(validate_url("courtLocation", "").is_err());
        assert!(validate_url("courtLocation", "invalid-url").is_err());
        assert!(validate_url("courtLocation", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_file_extensions() {
        let files = vec!["session.toml".to_string(), "invite.JSON".to_string()];
        assert!(validate_file_extensions("input", &files, &["toml", "json"]).is_ok());

        let invalid_files = vec!["session.txt".to_string()];
        assert!(validate_file_extensions("input", &invalid_files, &["toml", "json"]).is_err());
    }

    #[test]
    fn test_validate_range_rejects_nan() {
        assert!(validate_range("export.png_scale", 2.0_f32, 0.25, 8.0).is_ok());
        assert!(validate_range("export.png_scale", f32::NAN, 0.25, 8.0).is_err());
    }

    #[test]
    fn test_valid_calculation_passes() {
        assert!(calculation().validate().is_ok());
    }

    #[test]
    fn test_calculation_field_errors() {
        let mut input = calculation();
        input.court_name = "  ".to_string();
        assert_eq!(failing_field(input.validate()), "courtName");

        let mut input = calculation();
        input.duration = 0.0;
        assert_eq!(failing_field(input.validate()), "duration");

        let mut input = calculation();
        input.hourly_rate = -1.0;
        assert_eq!(failing_field(input.validate()), "hourlyRate");

        let mut input = calculation();
        input.players[0].name = " ".to_string();
        assert_eq!(failing_field(input.validate()), "players");

        let mut input = calculation();
        input.bank_accounts.push(BankAccount {
            id: "1".to_string(),
            bank_name: "BCA".to_string(),
            account_number: "".to_string(),
            account_name: "Andi".to_string(),
        });
        assert_eq!(failing_field(input.validate()), "bankAccounts[0]");
    }

    #[test]
    fn test_zero_shuttlecocks_are_allowed() {
        let mut input = calculation();
        input.shuttlecock_used = 0;
        input.shuttlecock_price = 0.0;
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_invitation_time_ordering() {
        assert!(invitation(time(19, 0), time(21, 0)).validate().is_ok());

        let err = invitation(time(21, 0), time(19, 0)).validate().unwrap_err();
        assert_eq!(
            err.user_friendly_message(),
            "Jam selesai harus lebih besar dari jam mulai"
        );
        assert_eq!(failing_field(invitation(time(19, 0), time(19, 0)).validate()), "endTime");
    }

    #[test]
    fn test_invitation_location_must_be_web_link() {
        let mut input = invitation(time(19, 0), time(21, 0));
        input.court_location = Some("maps.google.com".to_string());
        assert_eq!(failing_field(input.validate()), "courtLocation");

        input.court_location = Some("https://maps.google.com/?q=gor".to_string());
        assert!(input.validate().is_ok());

        input.court_location = Some("   ".to_string());
        assert!(input.validate().is_ok());
    }
}
