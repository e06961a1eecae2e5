use crate::analyzers::types::DurationStats;
use crate::analyzers::utility::mean;
use crate::filter::TripView;

/// Total and mean trip duration.
pub fn duration_stats(view: &TripView<'_>) -> Option<DurationStats> {
    if view.is_empty() {
        return None;
    }
    let durations: Vec<f64> = view.iter().map(|t| t.trip_duration).collect();

    Some(DurationStats {
        total: durations.iter().sum(),
        mean: mean(&durations),
    })
}
