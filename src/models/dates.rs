//! Date and serde helpers shared by the value objects.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

/// Returns midnight UTC at the start of `date`.
pub(crate) fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp.
pub(crate) fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date '{raw}'")))
}

/// Optional variant of [`deserialize_date`]; `null` maps to `None`.
pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_date(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{raw}'"))),
    }
}

/// Reads a list that the service may send as `null`; `null` maps to an empty list.
pub(crate) fn deserialize_nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "deserialize_nullable_list")]
        items: Vec<u32>,
        #[serde(default, deserialize_with = "deserialize_optional_date")]
        date: Option<NaiveDate>,
    }

    #[test]
    fn test_parse_date_accepts_both_forms() {
        let expected = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
        assert_eq!(parse_date("2023-03-01"), Some(expected));
        assert_eq!(parse_date("2023-03-01T00:00:00.000Z"), Some(expected));
        assert_eq!(
            parse_date("2023-03-01T01:00:00+02:00"),
            NaiveDate::from_ymd_opt(2023, 2, 28)
        );
        assert_eq!(parse_date("March"), None);
    }

    #[test]
    fn test_start_of_day_is_midnight_utc() {
        let date = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
        assert_eq!(
            start_of_day(date),
            Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_nullable_list_and_optional_date() {
        let null: Holder = serde_json::from_value(json!({"items": null, "date": null})).unwrap();
        assert!(null.items.is_empty());
        assert!(null.date.is_none());

        let missing: Holder = serde_json::from_value(json!({})).unwrap();
        assert!(missing.items.is_empty());
        assert!(missing.date.is_none());

        let present: Holder =
            serde_json::from_value(json!({"items": [1, 2], "date": "2023-01-01"})).unwrap();
        assert_eq!(present.items, vec![1, 2]);
        assert_eq!(present.date, NaiveDate::from_ymd_opt(2023, 1, 1));
    }
}
