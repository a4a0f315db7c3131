//! Leaderboard ordering and two-column layout
use crate::roster::RosterEntry;

/// Highlight tier for the top three rows of the leading column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Podium {
    Gold,
    Silver,
    Bronze,
}

impl Podium {
    /// Tier for the row at `index` (0-based) of a column.
    ///
    /// Only the leading column carries a podium.
    #[must_use]
    pub const fn for_row(index: usize, leading_column: bool) -> Option<Self> {
        if !leading_column {
            return None;
        }
        match index {
            0 => Some(Self::Gold),
            1 => Some(Self::Silver),
            2 => Some(Self::Bronze),
            _ => None,
        }
    }
}

/// Sort entries by caught count, highest first.
///
/// The sort is stable: players with equal counts keep their roster order.
#[must_use]
pub fn rank_by_caught(entries: &[RosterEntry]) -> Vec<RosterEntry> {
    let mut ranked = entries.to_vec();
    ranked.sort_by(|a, b| b.caught.cmp(&a.caught));
    ranked
}

/// Split a ranked list into the left and right table columns.
///
/// The left column takes the larger half when the count is odd.
#[must_use]
pub fn split_columns<T>(ranked: &[T]) -> (&[T], &[T]) {
    ranked.split_at(ranked.len().div_ceil(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, caught: u32) -> RosterEntry {
        RosterEntry {
            username: name.to_string(),
            uuid: format!("uuid-{name}"),
            caught,
            shiny: 0,
        }
    }

    fn names(entries: &[RosterEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.username.as_str()).collect()
    }

    #[test]
    fn ties_keep_roster_order() {
        let ranked = rank_by_caught(&[entry("first", 5), entry("second", 5), entry("third", 3)]);
        assert_eq!(names(&ranked), ["first", "second", "third"]);

        let ranked = rank_by_caught(&[entry("low", 3), entry("a", 5), entry("b", 5)]);
        assert_eq!(names(&ranked), ["a", "b", "low"]);
    }

    #[test]
    fn ranking_does_not_touch_input() {
        let entries = vec![entry("a", 1), entry("b", 9)];
        let ranked = rank_by_caught(&entries);
        assert_eq!(names(&entries), ["a", "b"]);
        assert_eq!(names(&ranked), ["b", "a"]);
    }

    #[test]
    fn split_gives_left_column_the_extra_row() {
        let rows = [1, 2, 3, 4, 5];
        assert_eq!(split_columns(&rows), (&rows[..3], &rows[3..]));

        let rows = [1, 2, 3, 4];
        assert_eq!(split_columns(&rows), (&rows[..2], &rows[2..]));

        let rows = [1];
        assert_eq!(split_columns(&rows), (&rows[..1], &rows[1..]));

        let empty: [u8; 0] = [];
        let (left, right) = split_columns(&empty);
        assert!(left.is_empty() && right.is_empty());
    }

    #[test]
    fn podium_only_in_leading_column() {
        assert_eq!(Podium::for_row(0, true), Some(Podium::Gold));
        assert_eq!(Podium::for_row(1, true), Some(Podium::Silver));
        assert_eq!(Podium::for_row(2, true), Some(Podium::Bronze));
        assert_eq!(Podium::for_row(3, true), None);
        assert_eq!(Podium::for_row(0, false), None);
    }
}
