use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    pub id: String,
    pub bank_name: String,
    pub account_number: String,
    pub account_name: String,
}

/// Everything needed to split one session's cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    pub court_name: String,
    pub hourly_rate: f64,
    /// Hours, usually in half-hour steps.
    pub duration: f64,
    pub shuttlecock_price: f64,
    pub shuttlecock_used: u32,
    pub players: Vec<Player>,
    pub play_date: NaiveDate,
    #[serde(with = "time_of_day")]
    pub play_time: NaiveTime,
    #[serde(default)]
    pub additional_info: Option<String>,
    #[serde(default)]
    pub bank_accounts: Vec<BankAccount>,
}

impl CalculationInput {
    /// Drops players whose name is blank and trims the rest. The cost model
    /// expects its input to have gone through this first.
    pub fn with_named_players(mut self) -> Self {
        self.players = self
            .players
            .into_iter()
            .filter(|p| !p.name.trim().is_empty())
            .map(|p| Player {
                name: p.name.trim().to_string(),
                ..p
            })
            .collect();
        self
    }

    pub fn notes(&self) -> Option<&str> {
        non_blank(self.additional_info.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalculationResult {
    pub court_cost: f64,
    pub shuttlecock_cost: f64,
    pub total_cost: f64,
    pub player_count: usize,
    pub cost_per_person: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationInput {
    pub court_name: String,
    /// Link to the court on Google Maps.
    #[serde(default)]
    pub court_location: Option<String>,
    pub play_date: NaiveDate,
    #[serde(with = "time_of_day")]
    pub start_time: NaiveTime,
    #[serde(with = "time_of_day")]
    pub end_time: NaiveTime,
    /// Embedded image as a `data:` URI.
    #[serde(default)]
    pub image_preview: Option<String>,
    #[serde(default)]
    pub additional_notes: Option<String>,
}

impl InvitationInput {
    pub fn location(&self) -> Option<&str> {
        non_blank(self.court_location.as_deref())
    }

    pub fn notes(&self) -> Option<&str> {
        non_blank(self.additional_notes.as_deref())
    }

    pub fn image(&self) -> Option<&str> {
        non_blank(self.image_preview.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummaryKind {
    /// Cost summary ("ringkasan").
    CostSummary,
    /// Play invitation ("undangan").
    Invitation,
}

impl SummaryKind {
    pub fn slug(&self) -> &'static str {
        match self {
            SummaryKind::CostSummary => "ringkasan",
            SummaryKind::Invitation => "undangan",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ExportFormat {
    Txt,
    Png,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Txt, ExportFormat::Png, ExportFormat::Pdf];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Png => "png",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_uppercase())
    }
}

/// `{kind}-badminton-{YYYY-MM-DD}.{ext}`
pub fn artifact_file_name(kind: SummaryKind, format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "{}-badminton-{}.{}",
        kind.slug(),
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// A laid-out visual summary: an SVG document of known pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualDocument {
    pub svg: String,
    pub width: u32,
    pub height: u32,
}

/// Opaque RGBA8 pixels, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Raster {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Self {
        debug_assert_eq!(rgba.len(), width as usize * height as usize * 4);
        Self {
            width,
            height,
            rgba,
        }
    }

    /// Copies rows `[y, y + height)` into a new raster.
    pub fn crop_rows(&self, y: u32, height: u32) -> Option<Raster> {
        let end = y.checked_add(height)?;
        if end > self.height {
            return None;
        }
        let stride = self.width as usize * 4;
        let start = y as usize * stride;
        let stop = end as usize * stride;
        Some(Raster::new(self.width, height, self.rgba[start..stop].to_vec()))
    }

    /// RGB8 pixels with alpha dropped.
    pub fn to_rgb(&self) -> Vec<u8> {
        self.rgba
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect()
    }
}

/// A finished export, owned by whoever produced it.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub file_name: String,
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// `HH:MM` times as typed into a time field; seconds are accepted on input.
pub mod time_of_day {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(raw.trim(), FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(raw.trim(), "%H:%M:%S"))
    }
}
