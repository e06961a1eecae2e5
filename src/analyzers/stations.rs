use crate::analyzers::types::{StationPair, StationStats};
use crate::analyzers::utility::mode;
use crate::filter::TripView;

/// Most used start station, end station and start/end combination.
pub fn station_stats(view: &TripView<'_>) -> Option<StationStats> {
    let start = mode(view.iter().map(|t| t.start_station.as_str()))?;
    let end = mode(view.iter().map(|t| t.end_station.as_str()))?;
    let (trip_start, trip_end) =
        mode(view.iter().map(|t| (t.start_station.as_str(), t.end_station.as_str())))?;

    Some(StationStats {
        most_common_start_station: start.to_string(),
        most_common_end_station: end.to_string(),
        most_common_trip: StationPair {
            start: trip_start.to_string(),
            end: trip_end.to_string(),
        },
    })
}
