// src/utils.rs
use chrono::{DateTime, Utc};
use rocket::http::RawStr;
use serde::Serialize;

/// Human readable age of a posting, e.g. `3 days ago`. Timestamps in the
/// future read as `Just now`.
pub fn format_relative_date(posted: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(posted);
    let minutes = elapsed.num_minutes().max(0);
    let hours = elapsed.num_hours().max(0);
    let days = elapsed.num_days().max(0);

    let plural = |n: i64, unit: &str| {
        if n == 1 {
            format!("1 {} ago", unit)
        } else {
            format!("{} {}s ago", n, unit)
        }
    };

    if minutes < 60 {
        if minutes == 0 {
            "Just now".to_string()
        } else {
            format!("{} minutes ago", minutes)
        }
    } else if hours < 24 {
        format!("{} hours ago", hours)
    } else if days == 1 {
        "Yesterday".to_string()
    } else if days < 7 {
        format!("{} days ago", days)
    } else if days < 30 {
        plural(days / 7, "week")
    } else if days < 365 {
        plural(days / 30, "month")
    } else {
        plural(days / 365, "year")
    }
}

/// Public link to a job detail page
pub fn share_url(site_url: &str, job_id: &str) -> String {
    format!("{}/jobs/{}", site_url.trim_end_matches('/'), job_id)
}

#[derive(Debug, Clone, Serialize)]
pub struct ShareLinks {
    pub url: String,
    pub whatsapp: String,
    pub facebook: String,
    pub linkedin: String,
    pub twitter: String,
}

fn encode(value: &str) -> String {
    RawStr::new(value).percent_encode().as_str().to_string()
}

impl ShareLinks {
    pub fn new(site_url: &str, job_id: &str, text: &str) -> Self {
        let url = share_url(site_url, job_id);
        let encoded_url = encode(&url);

        Self {
            whatsapp: format!("https://wa.me/?text={}", encode(&format!("{}\n{}", text, url))),
            facebook: format!("https://www.facebook.com/sharer/sharer.php?u={}", encoded_url),
            linkedin: format!("https://www.linkedin.com/sharing/share-offsite/?url={}", encoded_url),
            twitter: format!(
                "https://twitter.com/intent/tweet?text={}&url={}",
                encode(text),
                encoded_url
            ),
            url,
        }
    }
}
