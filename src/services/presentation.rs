//! Pure display transformations applied to aggregated rows before they are
//! serialized. Nothing in here touches the database; unmapped values resolve
//! to explicit defaults instead of failing.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::database::entities::enums::{OfferStatus, QuoteStatus};

/// One of Japan's nine electricity-grid regions, or the unknown fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionInfo {
    pub id: i32,
    pub name_en: &'static str,
    pub name_jp: &'static str,
}

const UNKNOWN_REGION: RegionInfo = RegionInfo {
    id: 0,
    name_en: "Unknown",
    name_jp: "不明",
};

/// Resolve a free-text area code to its grid region, case-insensitively.
/// "KANTO" is an alias of the Tokyo region. Anything unrecognized maps to
/// the unknown triplet.
pub fn region_from_area(area: Option<&str>) -> RegionInfo {
    let Some(area) = area else {
        return UNKNOWN_REGION;
    };
    let (id, name_en, name_jp) = match area.to_uppercase().as_str() {
        "HOKKAIDO" => (1, "Hokkaido", "北海道"),
        "TOHOKU" => (2, "Tohoku", "東北"),
        "TOKYO" | "KANTO" => (3, "Tokyo", "東京"),
        "CHUBU" => (4, "Chubu", "中部"),
        "HOKURIKU" => (5, "Hokuriku", "北陸"),
        "KANSAI" => (6, "Kansai", "関西"),
        "CHUGOKU" => (7, "Chugoku", "中国"),
        "SHIKOKU" => (8, "Shikoku", "四国"),
        "KYUSHU" => (9, "Kyushu", "九州"),
        _ => return UNKNOWN_REGION,
    };
    RegionInfo { id, name_en, name_jp }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTriplet {
    pub id: i32,
    pub label_en: &'static str,
    pub label_jp: &'static str,
}

const PENDING: StatusTriplet = StatusTriplet {
    id: 1,
    label_en: "pending",
    label_jp: "保留中",
};

/// Dashboard wording for the quotation progress. Absent values fall back to
/// the pending entry rather than erroring.
pub fn quote_status_triplet(status: Option<&QuoteStatus>) -> StatusTriplet {
    match status {
        Some(QuoteStatus::Draft) | None => PENDING,
        Some(QuoteStatus::Submitted) => StatusTriplet {
            id: 2,
            label_en: "submitted",
            label_jp: "依頼済み",
        },
        Some(QuoteStatus::Priced) => StatusTriplet {
            id: 3,
            label_en: "priced",
            label_jp: "算定済み",
        },
        Some(QuoteStatus::ExcelReady) => StatusTriplet {
            id: 4,
            label_en: "excel ready",
            label_jp: "帳票出力済み",
        },
    }
}

pub fn offer_status_triplet(status: Option<&OfferStatus>) -> StatusTriplet {
    match status {
        Some(OfferStatus::None) | None => PENDING,
        Some(OfferStatus::Offered) => StatusTriplet {
            id: 2,
            label_en: "offered",
            label_jp: "提示済み",
        },
        Some(OfferStatus::Won) => StatusTriplet {
            id: 3,
            label_en: "won",
            label_jp: "成約",
        },
        Some(OfferStatus::Lost) => StatusTriplet {
            id: 4,
            label_en: "lost",
            label_jp: "失注",
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidityWindow {
    /// e.g. "2025-08-30 (60日)"
    pub label: String,
    pub expiration: NaiveDate,
}

/// Compute the quote expiration from the request date plus the validity
/// window. Both inputs are required; one alone never fabricates a value.
pub fn validity_window(requested_at: Option<NaiveDate>, days: Option<i32>) -> Option<ValidityWindow> {
    let requested_at = requested_at?;
    let days = days?;
    let expiration = requested_at + Duration::days(i64::from(days));
    Some(ValidityWindow {
        label: format!("{} ({}日)", expiration, days),
        expiration,
    })
}

/// Display identifier derived from the bundle id alone; never persisted.
pub fn summary_number(bundle_id: i32) -> String {
    format!("PPA{:08}", bundle_id)
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn region_lookup_covers_all_nine_regions() {
        assert_eq!(region_from_area(Some("Hokkaido")).id, 1);
        assert_eq!(region_from_area(Some("TOHOKU")).id, 2);
        assert_eq!(region_from_area(Some("tokyo")).id, 3);
        assert_eq!(region_from_area(Some("CHUBU")).id, 4);
        assert_eq!(region_from_area(Some("Hokuriku")).id, 5);
        assert_eq!(region_from_area(Some("KANSAI")).id, 6);
        assert_eq!(region_from_area(Some("Chugoku")).id, 7);
        assert_eq!(region_from_area(Some("shikoku")).id, 8);
        assert_eq!(region_from_area(Some("KYUSHU")).id, 9);
    }

    #[test]
    fn kanto_is_an_alias_of_tokyo() {
        let kanto = region_from_area(Some("KANTO"));
        assert_eq!(kanto.id, 3);
        assert_eq!(kanto.name_en, "Tokyo");
        assert_eq!(kanto.name_jp, "東京");
    }

    #[test]
    fn unrecognized_area_maps_to_unknown() {
        let unknown = region_from_area(Some("MARS"));
        assert_eq!(unknown.id, 0);
        assert_eq!(unknown.name_en, "Unknown");
        assert_eq!(unknown.name_jp, "不明");
        assert_eq!(region_from_area(None), unknown);
    }

    #[test]
    fn absent_status_defaults_to_pending() {
        let q = quote_status_triplet(None);
        assert_eq!((q.id, q.label_en, q.label_jp), (1, "pending", "保留中"));

        let o = offer_status_triplet(None);
        assert_eq!((o.id, o.label_en, o.label_jp), (1, "pending", "保留中"));
    }

    #[test]
    fn initial_statuses_render_as_pending() {
        assert_eq!(quote_status_triplet(Some(&QuoteStatus::Draft)).id, 1);
        assert_eq!(offer_status_triplet(Some(&OfferStatus::None)).id, 1);
        assert_eq!(offer_status_triplet(Some(&OfferStatus::Won)).label_en, "won");
    }

    #[test]
    fn validity_window_adds_days_to_request_date() {
        let requested = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let window = validity_window(Some(requested), Some(60)).unwrap();
        assert_eq!(window.expiration, NaiveDate::from_ymd_opt(2025, 8, 30).unwrap());
        assert_eq!(window.label, "2025-08-30 (60日)");
    }

    #[test]
    fn validity_window_requires_both_inputs() {
        let requested = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        assert!(validity_window(Some(requested), None).is_none());
        assert!(validity_window(None, Some(30)).is_none());
        assert!(validity_window(None, None).is_none());
    }

    #[test]
    fn summary_number_is_zero_padded_and_stable() {
        assert_eq!(summary_number(42), "PPA00000042");
        assert_eq!(summary_number(9001), "PPA00009001");
        assert_eq!(summary_number(42), summary_number(42));
    }

    #[test]
    fn timestamps_render_to_the_minute() {
        let ts = NaiveDate::from_ymd_opt(2025, 7, 1)
            .unwrap()
            .and_hms_opt(9, 30, 59)
            .unwrap();
        assert_eq!(format_timestamp(&ts), "2025-07-01 09:30");
    }
}
