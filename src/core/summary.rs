use crate::core::cost;
use crate::core::layout::{render_document, Block, DocumentStyle};
use crate::core::locale::{
    format_hours, format_long_date, format_rupiah, format_short_date, format_time, format_timestamp,
};
use crate::domain::model::{
    CalculationInput, CalculationResult, InvitationInput, SummaryKind, VisualDocument,
};
use crate::utils::error::Result;
use chrono::{DateTime, FixedOffset};

/// Club-wide details printed on every summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryContext {
    pub club_name: String,
    /// Appended to invitation times, e.g. `WIB`.
    pub timezone_label: String,
}

impl Default for SummaryContext {
    fn default() -> Self {
        Self {
            club_name: "PB Kena Mental".to_string(),
            timezone_label: "WIB".to_string(),
        }
    }
}

/// Something that can be rendered as share text and as a visual document.
///
/// Rendering is deterministic for a given `generated_at`.
pub trait Summary: Send + Sync {
    fn kind(&self) -> SummaryKind;

    /// Title handed to the share facility.
    fn share_title(&self) -> String;

    /// Notice shown after the text was copied to the clipboard.
    fn copied_notice(&self) -> &'static str;

    fn render_text(&self, generated_at: &DateTime<FixedOffset>) -> String;

    fn blocks(&self, generated_at: &DateTime<FixedOffset>) -> Vec<Block>;

    fn render_document(
        &self,
        generated_at: &DateTime<FixedOffset>,
        style: &DocumentStyle,
    ) -> VisualDocument {
        render_document(&self.blocks(generated_at), style)
    }
}

#[derive(Debug, Clone)]
pub struct CalculationSummary {
    input: CalculationInput,
    result: CalculationResult,
    context: SummaryContext,
}

impl CalculationSummary {
    pub fn new(
        input: CalculationInput,
        result: CalculationResult,
        context: SummaryContext,
    ) -> Self {
        Self {
            input,
            result,
            context,
        }
    }

    /// Runs the cost model on `input` (players already filtered).
    pub fn calculate(input: CalculationInput, context: SummaryContext) -> Result<Self> {
        let result = cost::calculate(&input)?;
        Ok(Self::new(input, result, context))
    }

    pub fn input(&self) -> &CalculationInput {
        &self.input
    }

    pub fn result(&self) -> &CalculationResult {
        &self.result
    }

    fn play_time_line(&self) -> String {
        format!(
            "{} pukul {}",
            format_long_date(self.input.play_date),
            format_time(self.input.play_time)
        )
    }

    fn shuttlecock_breakdown(&self) -> String {
        format!(
            "{} pcs × {}",
            self.input.shuttlecock_used,
            format_rupiah(self.input.shuttlecock_price)
        )
    }
}

impl Summary for CalculationSummary {
    fn kind(&self) -> SummaryKind {
        SummaryKind::CostSummary
    }

    fn share_title(&self) -> String {
        "Ringkasan Biaya Badminton".to_string()
    }

    fn copied_notice(&self) -> &'static str {
        "Ringkasan berhasil disalin ke clipboard!"
    }

    fn render_text(&self, generated_at: &DateTime<FixedOffset>) -> String {
        let input = &self.input;
        let result = &self.result;

        let mut sections = vec![
            format!("🏸 RINGKASAN BIAYA BADMINTON 🏸\n{}", self.context.club_name),
            [
                format!("📍 Lapangan: {}", input.court_name),
                format!("📅 Waktu Bermain: {}", self.play_time_line()),
                format!("⏰ Durasi: {} jam", format_hours(input.duration)),
                format!("💰 Biaya Lapangan: {}", format_rupiah(result.court_cost)),
                format!(
                    "🏸 Biaya Shuttlecock: {} ({})",
                    format_rupiah(result.shuttlecock_cost),
                    self.shuttlecock_breakdown()
                ),
            ]
            .join("\n"),
            [
                format!("💵 TOTAL BIAYA: {}", format_rupiah(result.total_cost)),
                format!("👥 Jumlah Pemain: {} orang", result.player_count),
                format!("💸 Biaya per Orang: {}", format_rupiah(result.cost_per_person)),
            ]
            .join("\n"),
        ];

        let names: Vec<&str> = input.players.iter().map(|p| p.name.as_str()).collect();
        sections.push(format!("👥 Daftar Pemain:\n{}", names.join(", ")));

        if !input.bank_accounts.is_empty() {
            let accounts: Vec<String> = input
                .bank_accounts
                .iter()
                .map(|acc| {
                    format!(
                        "{}: {} a.n. {}",
                        acc.bank_name, acc.account_number, acc.account_name
                    )
                })
                .collect();
            sections.push(format!("🏦 Info Transfer:\n{}", accounts.join("\n")));
        }

        if let Some(notes) = input.notes() {
            sections.push(format!("📝 Catatan:\n{}", notes.trim()));
        }

        sections.push(format!("📅 Dibuat: {}", format_timestamp(generated_at)));
        sections.join("\n\n")
    }

    fn blocks(&self, generated_at: &DateTime<FixedOffset>) -> Vec<Block> {
        let input = &self.input;
        let result = &self.result;
        let per_person = format_rupiah(result.cost_per_person);

        let mut blocks = vec![
            Block::Title("🏸 Ringkasan Biaya Badminton".to_string()),
            Block::Subtitle(self.context.club_name.clone()),
            Block::Subtitle(format_timestamp(generated_at)),
            Block::Section("Informasi Lapangan".to_string()),
            Block::Field {
                label: "Nama Lapangan".to_string(),
                value: input.court_name.clone(),
            },
            Block::Field {
                label: "Biaya per Jam".to_string(),
                value: format_rupiah(input.hourly_rate),
            },
            Block::Field {
                label: "Durasi Sewa".to_string(),
                value: format!("{} jam", format_hours(input.duration)),
            },
            Block::Field {
                label: "Waktu Bermain".to_string(),
                value: format!(
                    "{} {}",
                    format_short_date(input.play_date),
                    format_time(input.play_time)
                ),
            },
            Block::Section("Rincian Biaya".to_string()),
            Block::Amount {
                label: "Biaya Sewa Lapangan".to_string(),
                detail: Some(format!(
                    "{} jam × {}",
                    format_hours(input.duration),
                    format_rupiah(input.hourly_rate)
                )),
                value: format_rupiah(result.court_cost),
            },
            Block::Amount {
                label: "Biaya Shuttlecock".to_string(),
                detail: Some(self.shuttlecock_breakdown()),
                value: format_rupiah(result.shuttlecock_cost),
            },
            Block::Highlight {
                label: "Total Biaya".to_string(),
                value: format_rupiah(result.total_cost),
            },
            Block::Section("Pembagian Biaya".to_string()),
            Block::Highlight {
                label: "Jumlah Pemain".to_string(),
                value: format!("{} orang", result.player_count),
            },
            Block::Highlight {
                label: "Biaya per Orang".to_string(),
                value: per_person.clone(),
            },
        ];

        blocks.extend(input.players.iter().enumerate().map(|(i, player)| Block::Amount {
            label: format!("{}. {}", i + 1, player.name),
            detail: None,
            value: per_person.clone(),
        }));

        if !input.bank_accounts.is_empty() {
            blocks.push(Block::Section("Informasi Transfer".to_string()));
            blocks.extend(input.bank_accounts.iter().enumerate().map(|(i, acc)| Block::Field {
                label: format!("Rekening {} · {}", i + 1, acc.bank_name),
                value: format!("{} a.n. {}", acc.account_number, acc.account_name),
            }));
        }

        if let Some(notes) = input.notes() {
            blocks.push(Block::Section("Informasi Tambahan".to_string()));
            blocks.push(Block::Text(notes.trim().to_string()));
        }

        blocks
    }
}

#[derive(Debug, Clone)]
pub struct InvitationSummary {
    input: InvitationInput,
    context: SummaryContext,
}

impl InvitationSummary {
    pub fn new(input: InvitationInput, context: SummaryContext) -> Self {
        Self { input, context }
    }

    pub fn input(&self) -> &InvitationInput {
        &self.input
    }

    fn time_range(&self) -> String {
        format!(
            "{} - {} {}",
            format_time(self.input.start_time),
            format_time(self.input.end_time),
            self.context.timezone_label
        )
    }
}

impl Summary for InvitationSummary {
    fn kind(&self) -> SummaryKind {
        SummaryKind::Invitation
    }

    fn share_title(&self) -> String {
        format!("Undangan Bermain Badminton - {}", self.context.club_name)
    }

    fn copied_notice(&self) -> &'static str {
        "Undangan berhasil disalin ke clipboard!"
    }

    fn render_text(&self, generated_at: &DateTime<FixedOffset>) -> String {
        let input = &self.input;

        let mut place = format!("📍 Tempat: {}", input.court_name);
        if let Some(location) = input.location() {
            place.push_str(&format!("\n🗺️ Lokasi: {}", location.trim()));
        }

        let mut sections = vec![
            format!("🏸 UNDANGAN BERMAIN BADMINTON 🏸\n{}", self.context.club_name),
            place,
            format!(
                "📅 Hari/Tanggal: {}\n⏰ Waktu: {}",
                format_long_date(input.play_date),
                self.time_range()
            ),
        ];

        if let Some(notes) = input.notes() {
            sections.push(format!("📝 Catatan:\n{}", notes.trim()));
        }

        sections.push("🙏 Ayo main bareng!".to_string());
        sections.push(format!("📅 Undangan dibuat: {}", format_timestamp(generated_at)));
        sections.join("\n\n")
    }

    fn blocks(&self, generated_at: &DateTime<FixedOffset>) -> Vec<Block> {
        let input = &self.input;

        let mut blocks = vec![
            Block::Title("🏸 Undangan Bermain Badminton".to_string()),
            Block::Subtitle(self.context.club_name.clone()),
            Block::Subtitle(format_timestamp(generated_at)),
        ];

        if let Some(image) = input.image() {
            blocks.push(Block::Image {
                href: image.to_string(),
            });
        }

        blocks.push(Block::Section("Informasi Lapangan".to_string()));
        blocks.push(Block::Field {
            label: "Nama Lapangan".to_string(),
            value: input.court_name.clone(),
        });
        if let Some(location) = input.location() {
            blocks.push(Block::Field {
                label: "Lokasi · Lihat di Google Maps".to_string(),
                value: location.trim().to_string(),
            });
        }

        blocks.push(Block::Section("Waktu Bermain".to_string()));
        blocks.push(Block::Field {
            label: "Hari & Tanggal".to_string(),
            value: format_long_date(input.play_date),
        });
        blocks.push(Block::Field {
            label: "Waktu".to_string(),
            value: self.time_range(),
        });

        if let Some(notes) = input.notes() {
            blocks.push(Block::Section("Catatan Tambahan".to_string()));
            blocks.push(Block::Text(notes.trim().to_string()));
        }

        blocks.push(Block::Callout("🙏 Ayo main bareng!".to_string()));
        blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{BankAccount, Player};
    use chrono::{NaiveDate, NaiveTime, TimeZone};

    fn generated_at() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(7 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 10, 12, 21, 15, 0)
            .unwrap()
    }

    fn calculation_input() -> CalculationInput {
        CalculationInput {
            court_name: "GOR Badminton Sentral".to_string(),
            hourly_rate: 50_000.0,
            duration: 2.0,
            shuttlecock_price: 5_000.0,
            shuttlecock_used: 6,
            players: ["Andi", "Budi", "Citra"]
                .iter()
                .enumerate()
                .map(|(i, name)| Player {
                    id: i.to_string(),
                    name: name.to_string(),
                })
                .collect(),
            play_date: NaiveDate::from_ymd_opt(2024, 10, 12).unwrap(),
            play_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            additional_info: None,
            bank_accounts: vec![],
        }
    }

    fn invitation_input() -> InvitationInput {
        InvitationInput {
            court_name: "GOR Badminton Sentral".to_string(),
            court_location: None,
            play_date: NaiveDate::from_ymd_opt(2024, 10, 12).unwrap(),
            start_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(21, 0, 0).unwrap(),
            image_preview: None,
            additional_notes: None,
        }
    }

    #[test]
    fn test_calculation_text_full_layout() {
        let mut input = calculation_input();
        input.bank_accounts = vec![BankAccount {
            id: "1".to_string(),
            bank_name: "BCA".to_string(),
            account_number: "1234567890".to_string(),
            account_name: "Andi".to_string(),
        }];
        input.additional_info = Some("Bawa raket sendiri".to_string());

        let summary = CalculationSummary::calculate(input, SummaryContext::default()).unwrap();
        let text = summary.render_text(&generated_at());

        let expected = "🏸 RINGKASAN BIAYA BADMINTON 🏸
PB Kena Mental

📍 Lapangan: GOR Badminton Sentral
📅 Waktu Bermain: Sabtu, 12 Oktober 2024 pukul 19:00
⏰ Durasi: 2 jam
💰 Biaya Lapangan: Rp 100.000
🏸 Biaya Shuttlecock: Rp 30.000 (6 pcs × Rp 5.000)

💵 TOTAL BIAYA: Rp 130.000
👥 Jumlah Pemain: 3 orang
💸 Biaya per Orang: Rp 43.333

👥 Daftar Pemain:
Andi, Budi, Citra

🏦 Info Transfer:
BCA: 1234567890 a.n. Andi

📝 Catatan:
Bawa raket sendiri

📅 Dibuat: Sabtu, 12 Oktober 2024 pukul 21.15";

        assert_eq!(text, expected);
    }

    #[test]
    fn test_calculation_text_omits_empty_optional_sections() {
        let mut input = calculation_input();
        input.additional_info = Some("   \n ".to_string());

        let summary = CalculationSummary::calculate(input, SummaryContext::default()).unwrap();
        let text = summary.render_text(&generated_at());

        assert!(!text.contains("Info Transfer"));
        assert!(!text.contains("Catatan"));
        assert!(!text.contains("\n\n\n"));
        assert!(text.contains("Andi, Budi, Citra\n\n📅 Dibuat:"));
    }

    #[test]
    fn test_calculation_text_is_stable() {
        let summary =
            CalculationSummary::calculate(calculation_input(), SummaryContext::default()).unwrap();
        assert_eq!(
            summary.render_text(&generated_at()),
            summary.render_text(&generated_at())
        );
    }

    #[test]
    fn test_calculation_blocks_skip_transfer_section_without_accounts() {
        let summary =
            CalculationSummary::calculate(calculation_input(), SummaryContext::default()).unwrap();
        let blocks = summary.blocks(&generated_at());

        assert!(!blocks.contains(&Block::Section("Informasi Transfer".to_string())));
        let player_rows = blocks
            .iter()
            .filter(|b| matches!(b, Block::Amount { detail: None, .. }))
            .count();
        assert_eq!(player_rows, 3);
    }

    #[test]
    fn test_invitation_text_with_location_and_notes() {
        let mut input = invitation_input();
        input.court_location = Some("https://maps.google.com/?q=gor".to_string());
        input.additional_notes = Some("Kumpul jam 18.45".to_string());

        let summary = InvitationSummary::new(input, SummaryContext::default());
        let text = summary.render_text(&generated_at());

        let expected = "🏸 UNDANGAN BERMAIN BADMINTON 🏸
PB Kena Mental

📍 Tempat: GOR Badminton Sentral
🗺️ Lokasi: https://maps.google.com/?q=gor

📅 Hari/Tanggal: Sabtu, 12 Oktober 2024
⏰ Waktu: 19:00 - 21:00 WIB

📝 Catatan:
Kumpul jam 18.45

🙏 Ayo main bareng!

📅 Undangan dibuat: Sabtu, 12 Oktober 2024 pukul 21.15";

        assert_eq!(text, expected);
    }

    #[test]
    fn test_invitation_text_without_optional_fields() {
        let summary = InvitationSummary::new(invitation_input(), SummaryContext::default());
        let text = summary.render_text(&generated_at());

        assert!(!text.contains("Lokasi"));
        assert!(!text.contains("Catatan"));
        assert!(text.contains("📍 Tempat: GOR Badminton Sentral\n\n📅 Hari/Tanggal"));
        assert_eq!(
            summary.share_title(),
            "Undangan Bermain Badminton - PB Kena Mental"
        );
    }

    #[test]
    fn test_invitation_blocks_include_image_when_present() {
        let mut input = invitation_input();
        input.image_preview = Some("data:image/png;base64,AAAA".to_string());

        let summary = InvitationSummary::new(input, SummaryContext::default());
        let blocks = summary.blocks(&generated_at());

        assert!(matches!(blocks[3], Block::Image { .. }));
        assert_eq!(
            blocks.last(),
            Some(&Block::Callout("🙏 Ayo main bareng!".to_string()))
        );
    }
}
