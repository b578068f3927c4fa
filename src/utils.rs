use chrono::{DateTime, Utc};
use url::Url;

use crate::config::constant::COLLECTION_PATH;

/// Calendar date in the `YYYY-MM-DD` shape used by the `updatedAt` filter.
pub fn format_query_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// URL of the StudentLocation collection under `base`. A path on `base`
/// (e.g. a self-hosted `/parse` mount) is kept as a prefix.
pub fn collection_url(base: &Url) -> Url {
    let mut url = base.clone();
    let prefix = base.path().trim_end_matches('/');
    url.set_path(&format!("{}{}", prefix, COLLECTION_PATH));
    url.set_query(None);
    url
}

/// List URL with `limit` and `updatedAt`, always in that order.
pub fn build_list_url(base: &Url, limit: u32, as_of: DateTime<Utc>) -> Url {
    let mut url = collection_url(base);
    url.query_pairs_mut()
        .append_pair("limit", &limit.to_string())
        .append_pair("updatedAt", &format_query_date(as_of));
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn base() -> Url {
        Url::parse("https://api.parse.com").unwrap()
    }

    #[test]
    fn formats_calendar_date() {
        let date = Utc.with_ymd_and_hms(2016, 12, 31, 23, 59, 0).unwrap();
        // Late-December dates are where week-based years diverge.
        assert_eq!(format_query_date(date), "2016-12-31");
    }

    #[test]
    fn list_url_has_two_params_in_order() {
        let date = Utc.with_ymd_and_hms(2016, 4, 3, 12, 0, 0).unwrap();
        let url = build_list_url(&base(), 100, date);

        assert_eq!(
            url.as_str(),
            "https://api.parse.com/1/classes/StudentLocation?limit=100&updatedAt=2016-04-03"
        );
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0, "limit");
        assert_eq!(pairs[1].0, "updatedAt");
    }

    #[test]
    fn list_url_is_deterministic() {
        let date = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            build_list_url(&base(), 50, date),
            build_list_url(&base(), 50, date)
        );
    }

    #[test]
    fn collection_url_keeps_base_path_and_drops_query() {
        let base = Url::parse("http://127.0.0.1:8080/parse?x=1").unwrap();
        assert_eq!(
            collection_url(&base).as_str(),
            "http://127.0.0.1:8080/parse/1/classes/StudentLocation"
        );
    }

    #[test]
    fn collection_url_ignores_trailing_slash_on_base() {
        let base = Url::parse("https://host.example/parse/").unwrap();
        assert_eq!(
            collection_url(&base).as_str(),
            "https://host.example/parse/1/classes/StudentLocation"
        );
        assert_eq!(
            collection_url(&Url::parse("https://api.parse.com/").unwrap()).as_str(),
            "https://api.parse.com/1/classes/StudentLocation"
        );
    }
}
