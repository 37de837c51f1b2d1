//! Filtering and formatting of departure records into board rows.

use crate::domain::{ClockTime, Crs, DepartureRecord, Estimate};

use super::row::{DisplayRow, JourneyDuration, Status};

/// Filters applied when building the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardFilter {
    /// Only show trains calling at one of these stations.
    pub filter_destination: Vec<Crs>,
    /// Only show trains whose first stop is one of these stations.
    pub filter_first_stop: Vec<Crs>,
    /// Hide cancelled trains.
    pub filter_cancelled: bool,
    /// Maximum number of rows to produce.
    pub display_rows: usize,
}

impl Default for BoardFilter {
    fn default() -> Self {
        Self {
            filter_destination: Vec::new(),
            filter_first_stop: Vec::new(),
            filter_cancelled: false,
            display_rows: 10,
        }
    }
}

impl BoardFilter {
    fn keeps(&self, record: &DepartureRecord) -> bool {
        if !self.filter_destination.is_empty() && !record.calls_at_any(&self.filter_destination) {
            return false;
        }

        if !self.filter_first_stop.is_empty()
            && !record
                .first_stop()
                .is_some_and(|cp| cp.is_one_of(&self.filter_first_stop))
        {
            return false;
        }

        !(self.filter_cancelled && record.estimate.is_cancelled())
    }
}

/// Build board rows from raw departures.
///
/// Input order is preserved. Iteration stops as soon as `display_rows`
/// rows exist, so records past the cutoff are never formatted. Malformed
/// times degrade to blank fields or [`JourneyDuration::Unknown`].
pub fn process_departures(records: &[DepartureRecord], filter: &BoardFilter) -> Vec<DisplayRow> {
    records
        .iter()
        .filter(|record| filter.keeps(record))
        .take(filter.display_rows)
        .map(|record| format_row(record, &filter.filter_destination))
        .collect()
}

fn format_row(record: &DepartureRecord, destinations: &[Crs]) -> DisplayRow {
    let (status, dep_estimated) = match &record.estimate {
        Estimate::Cancelled => (Status::Cancelled, String::new()),
        Estimate::OnTime => (Status::OnTime, record.scheduled.clone()),
        Estimate::NoReport => (Status::Unknown, String::new()),
        other => (Status::Late, other.token().into_owned()),
    };

    let (eta, duration) = if destinations.is_empty() {
        (String::new(), JourneyDuration::Unknown)
    } else {
        arrival_at(record, destinations)
    };

    DisplayRow {
        platform: record.platform.clone().unwrap_or_default(),
        destination: record.destination.clone(),
        origin: record.origin.clone(),
        dep_scheduled: record.scheduled.clone(),
        dep_estimated,
        status,
        first_stop: record
            .first_stop()
            .map(|cp| cp.name.clone())
            .unwrap_or_default(),
        eta,
        duration,
    }
}

/// ETA at the first matching destination and the journey time to it.
fn arrival_at(record: &DepartureRecord, destinations: &[Crs]) -> (String, JourneyDuration) {
    let Some(call) = record.first_call_at(destinations) else {
        return (String::new(), JourneyDuration::Unknown);
    };

    let eta = match &call.estimate {
        Estimate::OnTime => call.scheduled.clone(),
        Estimate::Expected(t) => t.to_string(),
        _ => String::new(),
    };
    if eta.is_empty() {
        return (eta, JourneyDuration::Unknown);
    }

    // Expected departure if the feed gave one, otherwise the timetable.
    let departs = record
        .estimate
        .expected()
        .or_else(|| ClockTime::parse_hhmm(&record.scheduled).ok());
    let arrives = ClockTime::parse_hhmm(&eta).ok();

    let duration = match (departs, arrives) {
        (Some(dep), Some(arr)) => JourneyDuration::from_signed(dep.minutes_until(arr)),
        _ => JourneyDuration::Unknown,
    };

    (eta, duration)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::CallingPoint;
    use proptest::prelude::*;

    const CODES: [&str; 4] = ["RDG", "SWI", "BRI", "OXF"];

    fn token() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            Just("On time".to_string()),
            Just("Cancelled".to_string()),
            Just("Delayed".to_string()),
            (0u16..24, 0u16..60).prop_map(|(h, m)| format!("{h:02}:{m:02}")),
            "[a-z:0-9 ]{0,6}",
        ]
    }

    fn code_set() -> impl Strategy<Value = Vec<Crs>> {
        proptest::sample::subsequence(CODES.to_vec(), 0..=2)
            .prop_map(|codes| codes.iter().map(|c| Crs::parse(c).unwrap()).collect())
    }

    fn calling_point() -> impl Strategy<Value = CallingPoint> {
        (proptest::sample::select(CODES.to_vec()), token(), token()).prop_map(|(code, st, et)| {
            CallingPoint {
                crs: Crs::parse(code).ok(),
                name: code.to_string(),
                scheduled: st,
                estimate: Estimate::parse(Some(&et)),
            }
        })
    }

    fn record() -> impl Strategy<Value = DepartureRecord> {
        (
            token(),
            token(),
            proptest::option::of("[0-9]{1,2}"),
            proptest::collection::vec(calling_point(), 0..4),
        )
            .prop_map(|(std, etd, platform, calling_points)| DepartureRecord {
                destination: "Dest".into(),
                origin: "Orig".into(),
                scheduled: std,
                estimate: Estimate::parse(Some(&etd)),
                platform,
                calling_points,
            })
    }

    fn departures() -> impl Strategy<Value = Vec<DepartureRecord>> {
        proptest::collection::vec(record(), 0..12)
    }

    fn filter() -> impl Strategy<Value = BoardFilter> {
        (code_set(), code_set(), any::<bool>(), 0usize..6).prop_map(
            |(filter_destination, filter_first_stop, filter_cancelled, display_rows)| BoardFilter {
                filter_destination,
                filter_first_stop,
                filter_cancelled,
                display_rows,
            },
        )
    }

    proptest! {
        #[test]
        fn never_exceeds_limit(records in departures(), filter in filter()) {
            let rows = process_departures(&records, &filter);
            prop_assert!(rows.len() <= filter.display_rows);
        }

        #[test]
        fn cancelled_hidden_when_filtered(records in departures(), mut filter in filter()) {
            filter.filter_cancelled = true;
            let rows = process_departures(&records, &filter);
            prop_assert!(rows.iter().all(|r| r.status != Status::Cancelled));
        }

        #[test]
        fn status_matches_estimate(records in departures()) {
            let filter = BoardFilter { display_rows: records.len(), ..Default::default() };
            let rows = process_departures(&records, &filter);
            prop_assert_eq!(rows.len(), records.len());

            for (record, row) in records.iter().zip(&rows) {
                match &record.estimate {
                    Estimate::Cancelled => {
                        prop_assert_eq!(row.status, Status::Cancelled);
                        prop_assert_eq!(row.dep_estimated.as_str(), "");
                    }
                    Estimate::OnTime => {
                        prop_assert_eq!(row.status, Status::OnTime);
                        prop_assert_eq!(&row.dep_estimated, &record.scheduled);
                    }
                    Estimate::NoReport => prop_assert_eq!(row.status, Status::Unknown),
                    other => {
                        prop_assert_eq!(row.status, Status::Late);
                        prop_assert_eq!(row.dep_estimated.as_str(), other.token());
                    }
                }
            }
        }

        #[test]
        fn first_stop_filter_drops_empty_routes(records in departures(), filter in filter()) {
            prop_assume!(!filter.filter_first_stop.is_empty());
            let rows = process_departures(&records, &filter);
            prop_assert!(rows.iter().all(|r| !r.first_stop.is_empty()));
        }

        #[test]
        fn idempotent(records in departures(), filter in filter()) {
            let once = process_departures(&records, &filter);
            prop_assert_eq!(once, process_departures(&records, &filter));
        }

        #[test]
        fn no_eta_without_destination_filter(records in departures(), mut filter in filter()) {
            filter.filter_destination.clear();
            for row in process_departures(&records, &filter) {
                prop_assert_eq!(row.eta.as_str(), "");
                prop_assert_eq!(row.duration, JourneyDuration::Unknown);
            }
        }
    }
}
