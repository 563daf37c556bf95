use chrono::{DateTime, Local};

pub fn current_human_timestamp() -> String {
    format_fetched_at(&Local::now())
}

pub fn format_fetched_at(time: &DateTime<Local>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_to_seconds() {
        let time = Local.with_ymd_and_hms(2024, 6, 28, 9, 5, 7).unwrap();
        assert_eq!(format_fetched_at(&time), "2024-06-28 09:05:07");
        assert_eq!(current_human_timestamp().len(), 19);
    }
}
