use crate::analyzers::types::TimeStats;
use crate::analyzers::utility::mode;
use crate::filter::TripView;
use crate::model::weekday_name;

/// Most common month, weekday and start hour.
pub fn time_stats(view: &TripView<'_>) -> Option<TimeStats> {
    Some(TimeStats {
        most_common_month: mode(view.iter().map(|t| t.month))?,
        most_common_day: weekday_name(mode(view.iter().map(|t| t.weekday))?).to_string(),
        most_common_hour: mode(view.iter().map(|t| t.start_hour()))?,
    })
}
