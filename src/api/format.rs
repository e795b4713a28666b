//! Display-ready shapes for the wire format. Stored values stay raw; these
//! transforms are applied only on output.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::database::models::{Payment, Student};

/// Student record plus the derived fields the UI expects: a selection label,
/// a duplicate `value` field for selection widgets, a currency-formatted
/// balance, and a computed status.
#[derive(Debug, Serialize)]
pub struct StudentView {
    pub id: i64,
    pub admission_no: Option<String>,
    pub label: String,
    pub value: String,
    pub name: String,
    pub class: Option<String>,
    pub guardian: Option<String>,
    pub balance: String,
    pub status: &'static str,
}

impl From<&Student> for StudentView {
    fn from(s: &Student) -> Self {
        Self {
            id: s.id,
            admission_no: s.admission_no.clone(),
            label: format!("{} ({})", s.name, s.class.as_deref().unwrap_or_default()),
            value: s.name.clone(),
            name: s.name.clone(),
            class: s.class.clone(),
            guardian: s.guardian.clone(),
            balance: format_currency(s.balance),
            // A negative (overpaid) balance counts as Cleared. Debatable, but
            // it is the established business rule.
            status: if s.balance > 0.0 { "Overdue" } else { "Cleared" },
        }
    }
}

/// Payment record with currency-formatted amount, capitalized method and a
/// human-readable timestamp.
#[derive(Debug, Serialize)]
pub struct PaymentView {
    pub id: i64,
    pub student_id: i64,
    pub amount: String,
    pub method: String,
    pub note: Option<String>,
    pub payer_name: Option<String>,
    pub created_at: String,
}

impl From<&Payment> for PaymentView {
    fn from(p: &Payment) -> Self {
        Self {
            id: p.id,
            student_id: p.student_id,
            amount: format_currency(p.amount),
            method: capitalize_first(p.method.as_deref().unwrap_or_default()),
            note: p.note.clone(),
            payer_name: p.payer_name.clone(),
            created_at: format_timestamp(&p.created_at),
        }
    }
}

/// Currency string with the cedi symbol and two decimal places.
pub fn format_currency(amount: f64) -> String {
    format!("\u{20b5}{amount:.2}")
}

/// Upper-case only the first character; the rest is left unchanged
/// (not full title-case).
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Render a stored timestamp as "dd Mon yyyy, h:mm AM/PM". Values that fail
/// to parse are returned unchanged rather than erroring.
pub fn format_timestamp(raw: &str) -> String {
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        Ok(dt) => dt.format("%d %b %Y, %-I:%M %p").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(balance: f64) -> Student {
        Student {
            id: 1,
            admission_no: Some("ADM001".to_string()),
            name: "John Doe".to_string(),
            class: Some("Form 1".to_string()),
            guardian: Some("Mr. Doe".to_string()),
            balance,
        }
    }

    #[test]
    fn currency_has_symbol_and_two_decimals() {
        assert_eq!(format_currency(120.0), "₵120.00");
        assert_eq!(format_currency(30.5), "₵30.50");
        assert_eq!(format_currency(-10.0), "₵-10.00");
    }

    #[test]
    fn positive_balance_is_overdue() {
        let view = StudentView::from(&student(120.0));
        assert_eq!(view.status, "Overdue");
        assert_eq!(view.balance, "₵120.00");
        assert_eq!(view.label, "John Doe (Form 1)");
        assert_eq!(view.value, "John Doe");
    }

    #[test]
    fn zero_and_negative_balances_are_cleared() {
        assert_eq!(StudentView::from(&student(0.0)).status, "Cleared");
        assert_eq!(StudentView::from(&student(-5.0)).status, "Cleared");
    }

    #[test]
    fn method_capitalizes_first_character_only() {
        assert_eq!(capitalize_first("cash"), "Cash");
        assert_eq!(capitalize_first("mobile money"), "Mobile money");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn timestamp_renders_human_readable() {
        assert_eq!(format_timestamp("2024-01-15 14:30:00"), "15 Jan 2024, 2:30 PM");
        assert_eq!(format_timestamp("2024-01-15 00:05:00"), "15 Jan 2024, 12:05 AM");
    }

    #[test]
    fn unparseable_timestamp_passes_through() {
        assert_eq!(format_timestamp("not a date"), "not a date");
    }
}
