use apod_core::dates::month_day_label;
use apod_core::{Error, Gallery, Result};
use askama::Template;

#[derive(Template)]
#[template(path = "on_this_day.html")]
struct OnThisDayPage<'a> {
    day_label: String,
    gallery: &'a Gallery,
}

/// Renders the full HTML document for a collected gallery.
pub fn render_page(gallery: &Gallery) -> Result<String> {
    let page = OnThisDayPage {
        day_label: month_day_label(gallery.day),
        gallery,
    };
    page.render().map_err(|e| Error::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use apod_core::{Apod, MediaType};
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn apod(date: &str, media_type: MediaType) -> Apod {
        Apod {
            copyright: Some("Ann Observer".to_string()),
            date: date.to_string(),
            explanation: "Stars over the desert.".to_string(),
            hdurl: None,
            media_type,
            service_version: "v1".to_string(),
            title: format!("Night of {}", date),
            url: "https://apod.nasa.gov/apod/image/x.jpg".to_string(),
        }
    }

    fn gallery(failed: usize, entries: Vec<Apod>) -> Gallery {
        let attempted = (0..failed + entries.len())
            .map(|i| ymd(2025 - i as i32, 10, 17))
            .collect();
        Gallery {
            day: ymd(2026, 10, 17),
            attempted,
            failed,
            entries,
        }
    }

    #[test]
    fn test_header_names_the_day() {
        let html = render_page(&gallery(0, vec![apod("2025-10-17", MediaType::Image)])).unwrap();
        assert!(html.contains("On This Day in History"));
        assert!(html.contains("astronomy pictures from October 17th through the years"));
    }

    #[test]
    fn test_failure_banner_reports_counts() {
        let entries = vec![
            apod("2025-10-17", MediaType::Image),
            apod("2023-10-17", MediaType::Image),
            apod("2021-10-17", MediaType::Video),
        ];
        let html = render_page(&gallery(2, entries)).unwrap();
        assert!(html.contains("Some entries failed to load"));
        assert!(html.contains("2 of 5 APOD entries could not be retrieved."));
        assert_eq!(html.matches("<article class=\"card\"").count(), 3);
        assert_eq!(html.matches("<iframe").count(), 1);
    }

    #[test]
    fn test_no_banner_without_failures() {
        let html = render_page(&gallery(0, vec![apod("2025-10-17", MediaType::Image)])).unwrap();
        assert!(!html.contains("Some entries failed to load"));
        assert!(!html.contains("No Pictures Found"));
        assert!(html.contains("Night of 2025-10-17"));
        assert!(html.contains("Ann Observer"));
    }

    #[test]
    fn test_empty_state_replaces_grid() {
        let html = render_page(&gallery(4, vec![])).unwrap();
        assert!(html.contains("No Pictures Found"));
        assert!(html.contains("4 of 4 APOD entries could not be retrieved."));
        assert!(!html.contains("class=\"grid\""));
        assert!(!html.contains("<article"));
    }

    #[test]
    fn test_remote_text_is_escaped() {
        let mut entry = apod("2025-10-17", MediaType::Image);
        entry.title = "<script>alert(1)</script>".to_string();
        let html = render_page(&gallery(0, vec![entry])).unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
