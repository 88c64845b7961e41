use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};

/// Dropdown value meaning "no weekday filter".
pub const ALL_WEEKS_LABEL: &str = "all-weeks";

/// Weekday filter selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeekdaySelector {
    /// Monday through Friday.
    Weekdays,
    /// Saturday and Sunday.
    Weekends,
    Day(#[serde(with = "weekday_label")] Weekday),
}

impl WeekdaySelector {
    #[must_use]
    pub fn matches(self, day: Weekday) -> bool {
        match self {
            Self::Weekdays => !is_weekend(day),
            Self::Weekends => is_weekend(day),
            Self::Day(selected) => selected == day,
        }
    }

    /// Parses a selector label, case-insensitively.
    ///
    /// `"all-weeks"` and the empty string mean "no filter" and yield `None`.
    pub fn parse_option(label: &str) -> DashboardResult<Option<Self>> {
        let normalized = label.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "" | ALL_WEEKS_LABEL => Ok(None),
            "weekdays" => Ok(Some(Self::Weekdays)),
            "weekends" => Ok(Some(Self::Weekends)),
            other => weekday_from_label(other).map(|day| Some(Self::Day(day))).ok_or_else(|| {
                DashboardError::InvalidData(format!("unknown weekday selector `{label}`"))
            }),
        }
    }

    /// Lowercase label mirrored into the weekday dropdown.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Weekdays => "weekdays",
            Self::Weekends => "weekends",
            Self::Day(day) => weekday_label::lowercase(day),
        }
    }

    /// Fragment appended to the dashboard title.
    #[must_use]
    pub fn title_fragment(self) -> String {
        match self {
            Self::Weekdays => "Weekdays Only".to_owned(),
            Self::Weekends => "Weekends Only".to_owned(),
            Self::Day(day) => format!("{} Orders", weekday_display_name(day)),
        }
    }
}

impl fmt::Display for WeekdaySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[must_use]
pub fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

#[must_use]
pub fn weekday_display_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn weekday_from_label(label: &str) -> Option<Weekday> {
    match label {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

mod weekday_label {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn lowercase(day: Weekday) -> &'static str {
        match day {
            Weekday::Mon => "monday",
            Weekday::Tue => "tuesday",
            Weekday::Wed => "wednesday",
            Weekday::Thu => "thursday",
            Weekday::Fri => "friday",
            Weekday::Sat => "saturday",
            Weekday::Sun => "sunday",
        }
    }

    pub(super) fn serialize<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(lowercase(*day))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::weekday_from_label(&raw.to_ascii_lowercase())
            .ok_or_else(|| serde::de::Error::custom(format!("unknown weekday `{raw}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive_and_all_weeks_clears() {
        assert_eq!(
            WeekdaySelector::parse_option("Monday").expect("parse"),
            Some(WeekdaySelector::Day(Weekday::Mon))
        );
        assert_eq!(
            WeekdaySelector::parse_option("WEEKENDS").expect("parse"),
            Some(WeekdaySelector::Weekends)
        );
        assert_eq!(WeekdaySelector::parse_option("all-weeks").expect("parse"), None);
        assert!(WeekdaySelector::parse_option("someday").is_err());
    }

    #[test]
    fn weekday_groups_partition_the_week() {
        let week = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ];
        for day in week {
            assert_ne!(
                WeekdaySelector::Weekdays.matches(day),
                WeekdaySelector::Weekends.matches(day)
            );
        }
        assert_eq!(week.iter().filter(|d| WeekdaySelector::Weekends.matches(**d)).count(), 2);
    }

    #[test]
    fn title_fragments_follow_selector_kind() {
        assert_eq!(WeekdaySelector::Weekdays.title_fragment(), "Weekdays Only");
        assert_eq!(
            WeekdaySelector::Day(Weekday::Fri).title_fragment(),
            "Friday Orders"
        );
        assert_eq!(WeekdaySelector::Day(Weekday::Fri).label(), "friday");
    }
}
