use chrono::{DateTime, Utc};
use vidrail_models::{CatalogItem, DisplayVideo};

use crate::error::ProjectError;

/// Project raw catalog items into display records, preserving input order.
///
/// Pure: the fetch that produced `items` already happened elsewhere, and a
/// fetch failure never reaches this function. An empty input is an error of
/// its own so the gallery can distinguish "nothing to show" from "fetch
/// broke".
pub fn project(
    items: &[CatalogItem],
    now: DateTime<Utc>,
) -> Result<Vec<DisplayVideo>, ProjectError> {
    if items.is_empty() {
        return Err(ProjectError::EmptyResult);
    }

    Ok(items
        .iter()
        .map(|item| DisplayVideo {
            id: item.id.clone(),
            title: item.title.clone(),
            channel_name: item.channel_name.clone(),
            thumbnail_url: item.thumbnail_url.clone(),
            published_at: item.published_at,
            view_count: item.view_count,
            avatar_url: avatar_url(&item.channel_name),
            formatted_views: format_count(item.view_count),
            relative_age: relative_age(item.published_at, now),
        })
        .collect())
}

/// Compact count rendering, shared by view and like counts:
/// millions to one decimal, thousands to none, small values verbatim.
pub fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{}K", (n as f64 / 1_000.0).round() as u64)
    } else {
        n.to_string()
    }
}

/// Render the elapsed time since `then` as the single largest non-zero unit.
/// Months are 30 days, years 365. Anything under a minute is "Just now".
pub fn relative_age(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds().max(0);
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;
    let months = days / 30;
    let years = days / 365;

    if years > 0 {
        unit_ago(years, "year")
    } else if months > 0 {
        unit_ago(months, "month")
    } else if days > 0 {
        unit_ago(days, "day")
    } else if hours > 0 {
        unit_ago(hours, "hour")
    } else if minutes > 0 {
        unit_ago(minutes, "minute")
    } else {
        "Just now".to_string()
    }
}

fn unit_ago(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

/// Deterministic avatar for a channel that the catalog supplies no image for.
pub fn avatar_url(channel_name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=random&size=36",
        urlencoding::encode(channel_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn create_item(id: &str, views: u64) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            title: format!("Video {}", id),
            channel_name: "Test Channel".to_string(),
            thumbnail_url: format!("https://example.com/{}.jpg", id),
            published_at: Utc::now() - Duration::hours(5),
            view_count: views,
        }
    }

    #[test]
    fn test_format_count_boundaries() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1K");
        assert_eq!(format_count(1_500), "2K");
        assert_eq!(format_count(999_999), "1000K");
        assert_eq!(format_count(1_000_000), "1.0M");
        assert_eq!(format_count(2_500_000), "2.5M");
    }

    #[test]
    fn test_relative_age_units() {
        let now = Utc::now();
        let age = |secs: i64| relative_age(now - Duration::seconds(secs), now);

        assert_eq!(age(30), "Just now");
        assert_eq!(age(59), "Just now");
        assert_eq!(age(60), "1 minute ago");
        assert_eq!(age(3_599), "59 minutes ago");
        assert_eq!(age(3_661), "1 hour ago");
        assert_eq!(age(90_000), "1 day ago");
        assert_eq!(age(86_400 * 45), "1 month ago");
        assert_eq!(age(86_400 * 365 * 2), "2 years ago");
    }

    #[test]
    fn test_relative_age_future_timestamp_is_just_now() {
        let now = Utc::now();
        assert_eq!(relative_age(now + Duration::hours(1), now), "Just now");
    }

    #[test]
    fn test_project_empty_is_an_error() {
        assert_eq!(project(&[], Utc::now()), Err(ProjectError::EmptyResult));
    }

    #[test]
    fn test_project_preserves_order_and_derives_fields() {
        let items = vec![create_item("a", 123), create_item("b", 4_200_000)];
        let projected = project(&items, Utc::now()).unwrap();

        assert_eq!(projected.len(), 2);
        assert_eq!(projected[0].id, "a");
        assert_eq!(projected[1].id, "b");
        assert_eq!(projected[0].formatted_views, "123");
        assert_eq!(projected[1].formatted_views, "4.2M");
        assert_eq!(projected[0].relative_age, "5 hours ago");
        assert!(projected[0]
            .avatar_url
            .contains("name=Test%20Channel"));
    }

    #[test]
    fn test_avatar_url_encodes_channel_name() {
        let url = avatar_url("Foo & Bar");
        assert_eq!(
            url,
            "https://ui-avatars.com/api/?name=Foo%20%26%20Bar&background=random&size=36"
        );
    }
}
