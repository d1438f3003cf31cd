//! Activity marks and yes/no answers.

use crate::models::indication::ActivityFlag;

use super::is_placeholder;
use super::patterns::{AFFIRMATIVE, CREATIVE_MARKED, MUSIC_MARKED, SPORT_MARKED};

/// Find the activities marked with an `X` on the same line as their keyword.
///
/// The whole text is searched. Flags come back in the fixed order Sport,
/// Music, Creative, each at most once.
pub fn detect_activity_flags(text: &str) -> Vec<ActivityFlag> {
    [
        (ActivityFlag::Sport, &*SPORT_MARKED),
        (ActivityFlag::Music, &*MUSIC_MARKED),
        (ActivityFlag::Creative, &*CREATIVE_MARKED),
    ]
    .into_iter()
    .filter(|(_, marked)| marked.is_match(text))
    .map(|(flag, _)| flag)
    .collect()
}

/// Read a yes/no answer.
///
/// `None` when nothing was stated; an answer starting with `ja`, `j`, `yes`
/// or `y` is `true`, anything else `false`.
pub fn parse_tri_state(value: Option<&str>) -> Option<bool> {
    let value = value.map(str::trim).filter(|v| !is_placeholder(v))?;
    Some(AFFIRMATIVE.is_match(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_only_marked_activities() {
        let text = "Sport                    X\nMuziek\nCreatief";
        assert_eq!(detect_activity_flags(text), vec![ActivityFlag::Sport]);
    }

    #[test]
    fn test_fixed_order_regardless_of_position() {
        let text = "Creatief   x\nMuziek  X\nSport X";
        assert_eq!(
            detect_activity_flags(text),
            vec![ActivityFlag::Sport, ActivityFlag::Music, ActivityFlag::Creative]
        );
    }

    #[test]
    fn test_mark_must_be_on_keyword_line() {
        assert!(detect_activity_flags("Sport\nX").is_empty());
    }

    #[test]
    fn test_any_x_after_keyword_marks() {
        assert_eq!(
            detect_activity_flags("Sport: Xx\nMuziekX"),
            vec![ActivityFlag::Sport, ActivityFlag::Music]
        );
        assert_eq!(
            detect_activity_flags("CREATIEF ........ x"),
            vec![ActivityFlag::Creative]
        );
    }

    #[test]
    fn test_flag_appears_once() {
        assert_eq!(
            detect_activity_flags("Sport X\nSport (zaalvoetbal) X"),
            vec![ActivityFlag::Sport]
        );
    }

    #[test]
    fn test_tri_state() {
        assert_eq!(parse_tri_state(None), None);
        assert_eq!(parse_tri_state(Some("")), None);
        assert_eq!(parse_tri_state(Some("-")), None);
        assert_eq!(parse_tri_state(Some("Ja, mits begeleid")), Some(true));
        assert_eq!(parse_tri_state(Some("j")), Some(true));
        assert_eq!(parse_tri_state(Some("YES")), Some(true));
        assert_eq!(parse_tri_state(Some("Nee")), Some(false));
        assert_eq!(parse_tri_state(Some("alleen individueel")), Some(false));
    }
}
