//! Indonesian (id-ID) presentation helpers for currency and dates.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, Weekday};

const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Senin",
        Weekday::Tue => "Selasa",
        Weekday::Wed => "Rabu",
        Weekday::Thu => "Kamis",
        Weekday::Fri => "Jumat",
        Weekday::Sat => "Sabtu",
        Weekday::Sun => "Minggu",
    }
}

/// Whole Rupiah with `.` grouping, e.g. `Rp 43.333`.
pub fn format_rupiah(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("{}Rp {}", sign, grouped)
}

/// `Sabtu, 12 Oktober 2024`
pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{}, {} {} {}",
        weekday_name(date.weekday()),
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// `Sab, 12 Okt`
pub fn format_short_date(date: NaiveDate) -> String {
    let weekday: String = weekday_name(date.weekday()).chars().take(3).collect();
    let month: String = MONTHS[date.month0() as usize].chars().take(3).collect();
    format!("{}, {} {}", weekday, date.day(), month)
}

/// 24-hour `HH:MM`.
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// `Sabtu, 12 Oktober 2024 pukul 19.05`
pub fn format_timestamp(at: &DateTime<FixedOffset>) -> String {
    format!(
        "{} pukul {}",
        format_long_date(at.date_naive()),
        at.format("%H.%M")
    )
}

/// Durations print without a trailing `.0`: `2`, `1.5`.
pub fn format_hours(hours: f64) -> String {
    format!("{}", hours)
}
