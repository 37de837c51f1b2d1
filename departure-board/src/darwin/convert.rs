//! Conversion from Darwin DTOs to departure records.
//!
//! Conversion never fails: the feed is untrusted and a board with one odd
//! service should still show the rest. Missing names become empty strings
//! and unknown tokens are carried through for the board to display.

use crate::domain::{CallingPoint, Crs, DepartureRecord, Estimate};

use super::types::{self, ServiceItemWithCallingPoints, ServiceLocation, StationBoardWithDetails};

/// Convert a departure board response to departure records.
///
/// Returns `None` when the response has no `trainServices` field at all,
/// which Darwin sends when nothing is running.
pub fn convert_station_board(board: &StationBoardWithDetails) -> Option<Vec<DepartureRecord>> {
    board
        .train_services
        .as_ref()
        .map(|services| services.iter().map(convert_service_item).collect())
}

/// Convert a single service item.
pub fn convert_service_item(item: &ServiceItemWithCallingPoints) -> DepartureRecord {
    DepartureRecord {
        destination: join_locations(item.destination.as_deref()),
        origin: join_locations(item.origin.as_deref()),
        scheduled: item.std.clone().unwrap_or_default(),
        estimate: Estimate::parse(item.etd.as_deref()),
        platform: item.platform.clone(),
        calling_points: item
            .subsequent_calling_points
            .iter()
            .flatten()
            .flat_map(|portion| &portion.calling_point)
            .map(convert_calling_point)
            .collect(),
    }
}

fn convert_calling_point(cp: &types::CallingPoint) -> CallingPoint {
    CallingPoint {
        crs: Crs::parse(&cp.crs).ok(),
        name: cp.location_name.clone(),
        scheduled: cp.st.clone().unwrap_or_default(),
        estimate: Estimate::parse(cp.et.as_deref()),
    }
}

/// Location names joined with " & " for divided or joining services.
fn join_locations(locations: Option<&[ServiceLocation]>) -> String {
    locations
        .unwrap_or_default()
        .iter()
        .map(|l| l.location_name.as_str())
        .collect::<Vec<_>>()
        .join(" & ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ClockTime;

    fn parse_board(json: &str) -> StationBoardWithDetails {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn converts_typical_service() {
        let board = parse_board(
            r#"{
                "locationName": "London Paddington",
                "crs": "PAD",
                "trainServices": [{
                    "std": "10:00",
                    "etd": "10:05",
                    "platform": "4",
                    "origin": [{"locationName": "London Paddington", "crs": "PAD"}],
                    "destination": [{"locationName": "Bristol Temple Meads", "crs": "BRI"}],
                    "subsequentCallingPoints": [{
                        "callingPoint": [
                            {"locationName": "Reading", "crs": "RDG", "st": "10:25", "et": "On time"}
                        ]
                    }]
                }]
            }"#,
        );

        let records = convert_station_board(&board).unwrap();
        assert_eq!(records.len(), 1);

        let r = &records[0];
        assert_eq!(r.destination, "Bristol Temple Meads");
        assert_eq!(r.origin, "London Paddington");
        assert_eq!(r.scheduled, "10:00");
        assert_eq!(r.estimate, Estimate::Expected(ClockTime::from_hm(10, 5).unwrap()));
        assert_eq!(r.platform.as_deref(), Some("4"));
        assert_eq!(r.calling_points[0].crs, Crs::parse("RDG").ok());
        assert_eq!(r.calling_points[0].estimate, Estimate::OnTime);
    }

    #[test]
    fn missing_services_is_none() {
        let board = parse_board(r#"{"locationName": "Quiet Halt", "crs": "QUH"}"#);
        assert!(convert_station_board(&board).is_none());

        let board = parse_board(r#"{"crs": "QUH", "trainServices": []}"#);
        assert_eq!(convert_station_board(&board), Some(vec![]));
    }

    #[test]
    fn divided_train_joins_destinations_and_portions() {
        let item: ServiceItemWithCallingPoints = serde_json::from_str(
            r#"{
                "std": "08:00",
                "etd": "On time",
                "destination": [
                    {"locationName": "Paignton", "crs": "PGN"},
                    {"locationName": "Plymouth", "crs": "PLY"}
                ],
                "subsequentCallingPoints": [
                    {"callingPoint": [
                        {"locationName": "Exeter St Davids", "crs": "EXD", "st": "10:00"},
                        {"locationName": "Paignton", "crs": "PGN", "st": "10:40"}
                    ]},
                    {"callingPoint": [
                        {"locationName": "Plymouth", "crs": "PLY", "st": "11:00"}
                    ]}
                ]
            }"#,
        )
        .unwrap();

        let r = convert_service_item(&item);

        assert_eq!(r.destination, "Paignton & Plymouth");
        let names: Vec<_> = r.calling_points.iter().map(|cp| cp.name.as_str()).collect();
        assert_eq!(names, ["Exeter St Davids", "Paignton", "Plymouth"]);
        assert_eq!(r.first_stop().unwrap().name, "Exeter St Davids");
    }

    #[test]
    fn sparse_service_degrades() {
        let item: ServiceItemWithCallingPoints =
            serde_json::from_str(r#"{"etd": "Delayed"}"#).unwrap();

        let r = convert_service_item(&item);

        assert_eq!(r.destination, "");
        assert_eq!(r.origin, "");
        assert_eq!(r.scheduled, "");
        assert_eq!(r.estimate, Estimate::Delayed);
        assert!(r.platform.is_none());
        assert!(r.calling_points.is_empty());
    }

    #[test]
    fn bad_crs_kept_as_none() {
        let item: ServiceItemWithCallingPoints = serde_json::from_str(
            r#"{"subsequentCallingPoints": [{"callingPoint": [{"locationName": "Somewhere", "crs": "x1"}]}]}"#,
        )
        .unwrap();

        let r = convert_service_item(&item);

        assert_eq!(r.calling_points[0].crs, None);
        assert_eq!(r.calling_points[0].name, "Somewhere");
        assert_eq!(r.calling_points[0].estimate, Estimate::NoReport);
    }
}
