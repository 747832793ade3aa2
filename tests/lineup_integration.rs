//! Lineup extraction over realistic poster text.

use std::io::Write;

use festival_sync_core::lineup::{
    CandidateExtractor, CandidateSelection, NoiseRules, extract_candidates,
    extractor_from_keyword_file,
};
use tempfile::NamedTempFile;

const POSTER: &str = "PRESENTED BY\n\
EARGASM\n\
FRIDAY NOV 14\n\
Bicep • Floating Points • Jamie xx\n\
Peggy Gou, Four Tet,  Caribou\n\
MAIN STAGE\n\
STAGE\n\
Bicep\n\
DJ\n\
Ben UFO  *  Joy Orbison\n";

#[test]
fn test_poster_with_default_rules() {
    let names = extract_candidates(POSTER);

    assert_eq!(
        names,
        [
            "Bicep",
            "Floating Points",
            "Jamie xx",
            "Peggy Gou",
            "Four Tet",
            "Caribou",
            "MAIN STAGE",
            "Ben UFO",
            "Joy Orbison",
        ]
    );
}

#[test]
fn test_keyword_file_replaces_default_keywords() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "# stages").unwrap();
    writeln!(file, "Main Stage").unwrap();
    writeln!(file, "Boiler Room").unwrap();

    let extractor = extractor_from_keyword_file(file.path()).unwrap();
    let names = extractor.extract(POSTER);

    assert!(!names.iter().any(|name| name == "MAIN STAGE"));
    assert!(names.iter().any(|name| name == "PRESENTED BY"));
    assert!(names.iter().any(|name| name == "EARGASM"));
    // The digit rule still applies with custom keywords.
    assert!(!names.iter().any(|name| name.contains("NOV")));
}

#[test]
fn test_longer_digit_run_keeps_short_numbers() {
    let rules = NoiseRules::new(["STAGE"], 4).unwrap();
    let extractor = CandidateExtractor::new(rules);

    let names = extractor.extract("Blink 182\nSAT 21 JUN 2025\nSTAGE");
    assert_eq!(names, ["Blink 182"]);
}

#[test]
fn test_garbled_input_yields_nothing() {
    assert!(extract_candidates("").is_empty());
    assert!(extract_candidates("\n\n  \n").is_empty());
    assert!(extract_candidates("-- • ** ,,\n12 34").is_empty());
}

#[test]
fn test_review_flow_feeds_selected_names() {
    let mut review = CandidateSelection::from_candidates(extract_candidates(POSTER));
    review.set_selected("MAIN STAGE", false);
    review.toggle(2);

    let selected = review.selected_names();
    assert_eq!(selected.len(), 7);
    assert!(!selected.iter().any(|name| name == "Jamie xx"));
    assert_eq!(selected[0], "Bicep");
}
