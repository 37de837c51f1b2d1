//! Display-ready rows and the columns they can be rendered in.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// Normalized departure status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Cancelled,
    OnTime,
    Late,
    /// No estimate reported.
    Unknown,
}

impl Status {
    /// Label shown on the board.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Cancelled => "Cancelled",
            Status::OnTime => "On time",
            Status::Late => "Late",
            Status::Unknown => "",
        }
    }

    /// Style class: the label lowercased with spaces removed.
    pub fn css_class(&self) -> &'static str {
        match self {
            Status::Cancelled => "cancelled",
            Status::OnTime => "ontime",
            Status::Late => "late",
            Status::Unknown => "",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Journey time to the filtered destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JourneyDuration {
    Minutes(u32),
    Unknown,
}

impl JourneyDuration {
    /// Duration from a signed minute difference; negative means unknown.
    pub fn from_signed(minutes: i32) -> Self {
        u32::try_from(minutes).map_or(JourneyDuration::Unknown, JourneyDuration::Minutes)
    }
}

impl fmt::Display for JourneyDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JourneyDuration::Minutes(m) => write!(f, "{m}"),
            JourneyDuration::Unknown => f.write_str("?"),
        }
    }
}

impl Serialize for JourneyDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            JourneyDuration::Minutes(m) => serializer.serialize_u32(*m),
            JourneyDuration::Unknown => serializer.serialize_str("?"),
        }
    }
}

/// One departure as shown on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub platform: String,
    pub destination: String,
    pub origin: String,
    pub dep_scheduled: String,
    /// Empty for cancelled trains; the scheduled time for on-time trains.
    pub dep_estimated: String,
    pub status: Status,
    pub first_stop: String,
    /// Estimated arrival at the filtered destination, if known.
    pub eta: String,
    pub duration: JourneyDuration,
}

impl DisplayRow {
    /// Text for a single cell.
    pub fn cell(&self, column: Column) -> Cow<'_, str> {
        match column {
            Column::Platform => Cow::Borrowed(&self.platform),
            Column::Destination => Cow::Borrowed(&self.destination),
            Column::Origin => Cow::Borrowed(&self.origin),
            Column::Status => Cow::Borrowed(self.status.label()),
            Column::DepScheduled => Cow::Borrowed(&self.dep_scheduled),
            Column::DepEstimated => Cow::Borrowed(&self.dep_estimated),
            Column::FirstStop => Cow::Borrowed(&self.first_stop),
            Column::Eta => Cow::Borrowed(&self.eta),
            Column::Duration => Cow::Owned(self.duration.to_string()),
        }
    }

    /// Style classes for a single cell: the column name, plus the status
    /// class for the status column.
    pub fn cell_class(&self, column: Column) -> Cow<'static, str> {
        let status_class = self.status.css_class();
        if column == Column::Status && !status_class.is_empty() {
            Cow::Owned(format!("status {status_class}"))
        } else {
            Cow::Borrowed(column.name())
        }
    }
}

/// A renderable board column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Platform,
    Destination,
    Origin,
    Status,
    DepScheduled,
    DepEstimated,
    FirstStop,
    Eta,
    Duration,
}

impl Column {
    pub const ALL: [Column; 9] = [
        Column::Platform,
        Column::Destination,
        Column::Origin,
        Column::Status,
        Column::DepScheduled,
        Column::DepEstimated,
        Column::FirstStop,
        Column::Eta,
        Column::Duration,
    ];

    /// Columns shown when none are configured.
    pub fn defaults() -> Vec<Column> {
        vec![
            Column::Platform,
            Column::Destination,
            Column::Origin,
            Column::Status,
            Column::DepEstimated,
        ]
    }

    /// Configuration name, also used as the cell style class.
    pub fn name(&self) -> &'static str {
        match self {
            Column::Platform => "platform",
            Column::Destination => "destination",
            Column::Origin => "origin",
            Column::Status => "status",
            Column::DepScheduled => "dep_scheduled",
            Column::DepEstimated => "dep_estimated",
            Column::FirstStop => "first_stop",
            Column::Eta => "eta",
            Column::Duration => "duration",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: Status) -> DisplayRow {
        DisplayRow {
            platform: "4".into(),
            destination: "Bristol Temple Meads".into(),
            origin: "London Paddington".into(),
            dep_scheduled: "10:00".into(),
            dep_estimated: "10:05".into(),
            status,
            first_stop: "Reading".into(),
            eta: "11:30".into(),
            duration: JourneyDuration::Minutes(85),
        }
    }

    #[test]
    fn status_labels_and_classes() {
        assert_eq!(Status::OnTime.label(), "On time");
        assert_eq!(Status::OnTime.css_class(), "ontime");
        assert_eq!(Status::Cancelled.css_class(), "cancelled");
        assert_eq!(Status::Late.to_string(), "Late");
        assert_eq!(Status::Unknown.label(), "");
    }

    #[test]
    fn duration_from_signed() {
        assert_eq!(JourneyDuration::from_signed(15), JourneyDuration::Minutes(15));
        assert_eq!(JourneyDuration::from_signed(0), JourneyDuration::Minutes(0));
        assert_eq!(JourneyDuration::from_signed(-5), JourneyDuration::Unknown);
        assert_eq!(JourneyDuration::Unknown.to_string(), "?");
    }

    #[test]
    fn cells_follow_columns() {
        let r = row(Status::Late);
        assert_eq!(r.cell(Column::Platform), "4");
        assert_eq!(r.cell(Column::Status), "Late");
        assert_eq!(r.cell(Column::Duration), "85");
        assert_eq!(r.cell(Column::FirstStop), "Reading");
    }

    #[test]
    fn status_cell_gets_extra_class() {
        let r = row(Status::OnTime);
        assert_eq!(r.cell_class(Column::Status), "status ontime");
        assert_eq!(r.cell_class(Column::Eta), "eta");
        assert_eq!(row(Status::Unknown).cell_class(Column::Status), "status");
    }

    #[test]
    fn column_names_match_serde() {
        for column in Column::ALL {
            let json = serde_json::to_string(&column).unwrap();
            assert_eq!(json, format!("\"{}\"", column.name()));
        }
    }

    #[test]
    fn row_serializes_with_board_keys() {
        let mut r = row(Status::OnTime);
        r.duration = JourneyDuration::Unknown;
        let value = serde_json::to_value(&r).unwrap();
        assert_eq!(value["status"], "On time");
        assert_eq!(value["duration"], "?");
        assert_eq!(value["dep_estimated"], "10:05");

        r.duration = JourneyDuration::Minutes(15);
        assert_eq!(serde_json::to_value(&r).unwrap()["duration"], 15);
    }
}
