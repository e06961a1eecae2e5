use std::collections::BTreeMap;

use crate::analyzers::types::{Availability, BirthYearStats, UserStats};
use crate::analyzers::utility::{counts, mode};
use crate::filter::TripView;

/// Label for trips whose user type cell is blank.
pub const UNKNOWN_USER_TYPE: &str = "Unknown";

/// User-type counts plus gender and birth-year summaries when the data
/// source publishes those columns.
pub fn user_stats(view: &TripView<'_>) -> Option<UserStats> {
    if view.is_empty() {
        return None;
    }
    let schema = view.table().schema();

    let user_types = counts(
        view.iter()
            .map(|t| t.user_type.as_deref().unwrap_or(UNKNOWN_USER_TYPE).to_string()),
    );

    let genders = if schema.gender {
        let genders: BTreeMap<String, usize> =
            counts(view.iter().filter_map(|t| t.gender.clone()));
        if genders.is_empty() {
            Availability::NoData
        } else {
            Availability::Available(genders)
        }
    } else {
        Availability::Unavailable
    };

    let birth_years = if schema.birth_year {
        birth_year_stats(view.iter().filter_map(|t| t.birth_year).collect())
    } else {
        Availability::Unavailable
    };

    Some(UserStats {
        user_types,
        genders,
        birth_years,
    })
}

fn birth_year_stats(years: Vec<i32>) -> Availability<BirthYearStats> {
    let (Some(&earliest), Some(&most_recent), Some(most_common)) = (
        years.iter().min(),
        years.iter().max(),
        mode(years.iter().copied()),
    ) else {
        return Availability::NoData;
    };

    Availability::Available(BirthYearStats {
        earliest,
        most_recent,
        most_common,
    })
}
