use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Most frequent value. Among equally frequent values the one seen first
/// wins, so all-unique input yields its first element. `None` for empty input.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut slots: HashMap<T, usize> = HashMap::new();
    let mut tally: Vec<(T, usize)> = Vec::new();

    for value in values {
        match slots.get(&value) {
            Some(&slot) => tally[slot].1 += 1,
            None => {
                slots.insert(value.clone(), tally.len());
                tally.push((value, 1));
            }
        }
    }

    let mut best: Option<(T, usize)> = None;
    for (value, count) in tally {
        if best.as_ref().is_none_or(|(_, top)| count > *top) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Occurrences of each distinct value, keyed in sorted order.
pub fn counts<T, I>(values: I) -> BTreeMap<T, usize>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut out = BTreeMap::new();
    for value in values {
        *out.entry(value).or_insert(0) += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[10.0, 20.0, 30.0]), 20.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_mode_picks_most_frequent() {
        assert_eq!(mode(["b", "a", "b", "c", "a", "b"]), Some("b"));
    }

    #[test]
    fn test_mode_tie_goes_to_first_seen() {
        assert_eq!(mode([3, 7, 7, 3]), Some(3));
        assert_eq!(mode([7, 3, 3, 7]), Some(7));
    }

    #[test]
    fn test_mode_all_unique_is_first_value() {
        assert_eq!(mode(["x", "y", "z"]), Some("x"));
    }

    #[test]
    fn test_mode_empty() {
        assert_eq!(mode(Vec::<u32>::new()), None);
    }

    #[test]
    fn test_mode_on_pairs() {
        let pairs = [("A", "B"), ("A", "C"), ("A", "C")];
        assert_eq!(mode(pairs), Some(("A", "C")));
    }

    #[test]
    fn test_counts() {
        let c = counts(["Subscriber", "Subscriber", "Customer"]);
        assert_eq!(c.get("Subscriber"), Some(&2));
        assert_eq!(c.get("Customer"), Some(&1));
        assert_eq!(c.len(), 2);
    }
}
