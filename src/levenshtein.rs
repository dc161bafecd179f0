//! Edit distance and closest-match search over strings.

use smallvec::SmallVec;

/// Largest distance [`closest`] still reports as a match.
pub const MAX_DISTANCE: usize = 10;

type Row = SmallVec<[usize; 32]>;

/// Levenshtein distance between two strings, counted in characters.
///
/// Insertions, deletions and substitutions each cost one.
///
/// # Examples
///
/// ```rust
/// use structural_sets::levenshtein::distance;
///
/// assert_eq!(distance("kitten", "sitting"), 3);
/// assert_eq!(distance("", "abc"), 3);
/// ```
#[must_use]
pub fn distance(left: &str, right: &str) -> usize {
    let right_chars: SmallVec<[char; 32]> = right.chars().collect();
    let mut previous: Row = (0..=right_chars.len()).collect();
    let mut current: Row = SmallVec::from_elem(0, right_chars.len() + 1);

    for (row, left_char) in left.chars().enumerate() {
        current[0] = row + 1;
        for (column, right_char) in right_chars.iter().enumerate() {
            let substitution = previous[column] + usize::from(left_char != *right_char);
            let deletion = previous[column + 1] + 1;
            let insertion = current[column] + 1;
            current[column + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[right_chars.len()]
}

/// The candidate nearest to `query`, if any is within [`MAX_DISTANCE`].
///
/// An exact match returns `query` itself. Ties keep the first candidate.
pub fn closest<'a, I>(query: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&str, usize)> = None;
    for candidate in candidates {
        if candidate == query {
            return Some(query.to_owned());
        }
        let candidate_distance = distance(query, candidate);
        if candidate_distance <= MAX_DISTANCE
            && best.is_none_or(|(_, best_distance)| candidate_distance < best_distance)
        {
            best = Some((candidate, candidate_distance));
        }
    }
    best.map(|(candidate, _)| candidate.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "", 0)]
    #[case("abc", "abc", 0)]
    #[case("abc", "", 3)]
    #[case("carrrot", "carrot", 1)]
    #[case("flaw", "lawn", 2)]
    #[case("héllo", "hello", 1)]
    fn test_distance(#[case] left: &str, #[case] right: &str, #[case] expected: usize) {
        assert_eq!(distance(left, right), expected);
        assert_eq!(distance(right, left), expected);
    }

    #[rstest]
    fn test_closest_prefers_exact_match() {
        assert_eq!(closest("pea", ["bean", "pea"]), Some("pea".to_owned()));
    }

    #[rstest]
    fn test_closest_keeps_first_tie() {
        assert_eq!(closest("bat", ["cat", "hat"]), Some("cat".to_owned()));
    }

    #[rstest]
    fn test_closest_respects_threshold() {
        assert_eq!(closest("zzzzzzzzzzzzzz", ["apple", "carrot"]), None);
        assert_eq!(closest("anything", std::iter::empty()), None);
    }
}
