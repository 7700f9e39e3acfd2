use time::{
    format_description::well_known::Rfc3339, macros::format_description, OffsetDateTime, UtcOffset,
};

use crate::core::history::PredictionRecord;

/// `2025-03-01T10:04:05.123Z` → `2025-03-01 · 10:04`.
fn format_timestamp(record: &PredictionRecord) -> String {
    let iso = record.timestamp.as_str();
    let (date, time_segment) = iso.split_once('T').unwrap_or((iso, ""));

    let primary_time = time_segment
        .split(['.', 'Z', '+'])
        .next()
        .unwrap_or(time_segment);

    let time_display: String = primary_time.chars().take(5).collect();

    if time_display.is_empty() {
        date.to_string()
    } else {
        format!("{date} · {time_display}")
    }
}

/// Stored timestamp, normalised to UTC.
fn parse_timestamp(record: &PredictionRecord) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(record.timestamp.as_str(), &Rfc3339)
        .ok()
        .map(|ts| ts.to_offset(UtcOffset::UTC))
}

/// Label under a history entry, e.g. `May 1, 2024 · 10:00 UTC`.
pub(crate) fn history_stamp(record: &PredictionRecord) -> String {
    parse_timestamp(record)
        .and_then(|ts| {
            ts.format(&format_description!(
                "[month repr:short] [day padding:none], [year] · [hour]:[minute] UTC"
            ))
            .ok()
        })
        .unwrap_or_else(|| format_timestamp(record))
}

/// Date line printed on exported reports.
pub(crate) fn report_timestamp() -> String {
    OffsetDateTime::now_utc()
        .format(&format_description!(
            "[year]-[month]-[day] [hour]:[minute] UTC"
        ))
        .unwrap_or_else(|_| "—".to_string())
}

pub(crate) fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamped(timestamp: &str) -> PredictionRecord {
        PredictionRecord {
            id: 1,
            timestamp: timestamp.into(),
            crop: "Tomato".into(),
            disease: "healthy".into(),
            confidence: 1.0,
            image: None,
            raw: serde_json::Value::Null,
        }
    }

    #[test]
    fn timestamp_is_compacted() {
        assert_eq!(
            format_timestamp(&stamped("2025-03-01T10:04:05.123Z")),
            "2025-03-01 · 10:04"
        );
        assert_eq!(format_timestamp(&stamped("garbage")), "garbage");
    }

    #[test]
    fn rfc3339_parses() {
        assert!(parse_timestamp(&stamped("2025-03-01T10:04:05Z")).is_some());
        assert!(parse_timestamp(&stamped("yesterday")).is_none());
    }

    #[test]
    fn history_stamp_reads_in_utc() {
        assert_eq!(
            history_stamp(&stamped("2024-05-01T10:00:00Z")),
            "May 1, 2024 · 10:00 UTC"
        );
        // 23:30 at +02:00 is 21:30 UTC the same day.
        assert_eq!(
            history_stamp(&stamped("2024-05-01T23:30:00+02:00")),
            "May 1, 2024 · 21:30 UTC"
        );
        // Crossing midnight moves the date too.
        assert_eq!(
            history_stamp(&stamped("2024-05-02T01:15:00+03:00")),
            "May 1, 2024 · 22:15 UTC"
        );
        assert_eq!(history_stamp(&stamped("garbage")), "garbage");
    }

    #[test]
    fn html_is_escaped() {
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }
}
