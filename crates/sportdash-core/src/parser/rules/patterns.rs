//! Common regex patterns for Dutch indication and report extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Build a line-anchored label pattern.
///
/// A label matches at the start of a line and is followed by a short tail
/// without digits or dashes and a colon (`Advies inzake activiteiten:`), by a
/// tab (`Naam\tJan`), or by the end of the line. Group 1 holds the inline value.
fn labeled(label: &str) -> Regex {
    Regex::new(&format!(
        r"(?i)^(?:{label})\b(?:[^:\d\t\-–]{{0,60}}:|\t+|\s*$)\s*(.*)$"
    ))
    .unwrap()
}

lazy_static! {
    // Date formats, anchored so trailing text is ignored
    pub static ref DATE_DMY: Regex = Regex::new(
        r"^(\d{1,2})[-/](\d{1,2})[-/](\d{4})"
    ).unwrap();

    pub static ref DATE_DUTCH_LONG: Regex = Regex::new(
        r"(?i)^(\d{1,2})\s+([a-z]+)\.?\s+(\d{4})"
    ).unwrap();

    pub static ref DATE_ISO: Regex = Regex::new(
        r"^(\d{4})-(\d{2})-(\d{2})"
    ).unwrap();

    // Any date-shaped token inside a range such as "14-11-2025 - 01-12-2025"
    pub static ref DATE_TOKEN: Regex = Regex::new(
        r"(?i)\b\d{4}-\d{1,2}-\d{1,2}\b|\b\d{1,2}[-/]\d{1,2}[-/]\d{4}\b|\b\d{1,2}\s+[a-z]+\.?\s+\d{4}\b"
    ).unwrap();

    pub static ref RANGE_SEPARATOR: Regex = Regex::new(
        r"(?i)\s+(?:-|–|—|t/m|tot\s+en\s+met|tot)\s+"
    ).unwrap();

    // Values that only hold layout punctuation
    pub static ref PLACEHOLDER: Regex = Regex::new(
        r"^[\s*:\-–]*$"
    ).unwrap();

    // Indication header fields
    pub static ref SUBJECT_NAME: Regex = labeled(
        r"naam(?:\s+(?:jongere|jeugdige|cli[eë]nt))?|jongere|jeugdige|cli[eë]nt"
    );

    pub static ref GROUP_NAME: Regex = labeled(
        r"leefgroep|groep|afdeling"
    );

    pub static ref ACTIVITY_ADVICE: Regex = labeled(
        r"advies"
    );

    pub static ref VALIDITY_RANGE: Regex = labeled(
        r"indicatie\s+(?:afgegeven\s+)?(?:geldig\s+)?van\s*[-–]\s*tot|(?:geldig(?:heid)?\s+)?van\s*[-–]\s*tot|geldigheidsduur|looptijd|periode"
    );

    pub static ref VALID_FROM: Regex = labeled(
        r"(?:geldig\s+)?van(?:af)?|startdatum|ingangsdatum"
    );

    pub static ref VALID_UNTIL: Regex = labeled(
        r"(?:geldig\s+)?(?:tot\s+en\s+met|tot|t/m)|einddatum"
    );

    pub static ref ISSUED_BY: Regex = labeled(
        r"(?:indicatie\s+)?afgegeven\s+door|indicatiesteller|opgesteld\s+door"
    );

    pub static ref FEEDBACK_RECIPIENT: Regex = labeled(
        r"terugkoppeling|feedback\s+(?:naar|aan)"
    );

    pub static ref COMBINABLE: Regex = Regex::new(
        r"(?i)^kan\s+(?:gecombineerd\s+worden|combineren)[^:?]*(?:\?\s*:?|:)\s*(.*)$"
    ).unwrap();

    pub static ref AFFIRMATIVE: Regex = Regex::new(
        r"(?i)^(?:ja|j|yes|y)"
    ).unwrap();

    // Indication sections
    pub static ref JUSTIFICATION: Regex = labeled(
        r"onderbouwing|motivatie|reden\s+(?:van\s+)?indicatie"
    );

    pub static ref APPROACH_TIPS: Regex = labeled(
        r"tips|benaderingswijze|bejegening|aanpak"
    );

    pub static ref LEARNING_GOALS: Regex = labeled(
        r"leerdoel(?:en)?|doelen"
    );

    pub static ref NOT_APPLICABLE: Regex = Regex::new(
        r"(?i)n\.v\.t|\bnvt\b"
    ).unwrap();

    // Activity marks: keyword, then an X anywhere later on the same line
    pub static ref SPORT_MARKED: Regex = Regex::new(r"(?i)sport.*x").unwrap();
    pub static ref MUSIC_MARKED: Regex = Regex::new(r"(?i)muziek.*x").unwrap();
    pub static ref CREATIVE_MARKED: Regex = Regex::new(r"(?i)creatief.*x").unwrap();

    // Activity table row: the keyword followed only by separators or a mark
    pub static ref ACTIVITY_ROW: Regex = Regex::new(
        r"(?i)^(?:sport|muziek|creatief)\b[\s:]*(?:x.*)?$"
    ).unwrap();

    // Session report fields
    pub static ref PRESENT_YOUTH: Regex = labeled(
        r"aanwezig(?:e\s+jongeren|en)?|jongeren\s+aanwezig|aantal\s+(?:jongeren|deelnemers|aanwezigen)|deelnemers"
    );

    pub static ref PRESENT_YOUTH_INLINE: Regex = Regex::new(
        r"(?i)\b([0-9]+)\s+(?:jongeren|deelnemers)\s+aanwezig"
    ).unwrap();

    pub static ref FIRST_NUMBER: Regex = Regex::new(r"[0-9]+").unwrap();

    pub static ref MOOD: Regex = labeled(
        r"sfeer|groepssfeer|stemming"
    );

    pub static ref SESSION_SUMMARY: Regex = labeled(
        r"samenvatting|verloop|verslag"
    );

    pub static ref INCIDENTS: Regex = labeled(
        r"incident(?:en)?|bijzonderheden|voorvallen"
    );

    pub static ref INCIDENT_KEYWORD: Regex = Regex::new(
        r"(?i)\b(?:incident(?:en)?|agressie[f]?|ruzie|gevecht|vechtpartij|weggelopen|fixatie|time-?out|escalatie|geslagen)\b"
    ).unwrap();

    pub static ref NEGATION: Regex = Regex::new(r"(?i)\bgeen\b").unwrap();

    pub static ref NOTHING_TO_REPORT: Regex = Regex::new(
        r"(?i)^(?:geen\b.*|nee\.?|niets\.?|n\.?\s?v\.?\s?t\.?)$"
    ).unwrap();

    pub static ref BULLET: Regex = Regex::new(
        r"^(?:[-*•]|\d{1,2}[.)])\s*"
    ).unwrap();
}
