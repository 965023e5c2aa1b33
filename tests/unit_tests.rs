// Unit tests for the ranking core

use neighborhood_matcher::core::{
    filters::{apply_client_filter, apply_sort, SortMode},
    preferences::{parse_selection, UnknownKeyPolicy},
    ranker::Ranker,
    scoring::calculate_score,
};
use neighborhood_matcher::models::{AttributeKey, NeighborhoodRecord, PreferenceSelection, ScoredNeighborhood};

fn create_record(id: &str, name: &str, ratings: [f64; 5]) -> NeighborhoodRecord {
    NeighborhoodRecord {
        id: id.to_string(),
        name: name.to_string(),
        safety: ratings[0],
        cafes: ratings[1],
        parks: ratings[2],
        schools: ratings[3],
        public_transport: ratings[4],
    }
}

fn sample_records() -> Vec<NeighborhoodRecord> {
    vec![
        create_record("1", "Oakwood", [8.0, 6.0, 9.0, 7.0, 5.0]),
        create_record("2", "Riverside", [7.0, 8.0, 6.0, 6.0, 8.0]),
        create_record("3", "Oaktown", [6.0, 9.0, 4.0, 5.0, 9.0]),
        create_record("4", "Ashford", [9.0, 3.0, 7.0, 9.0, 4.0]),
        create_record("5", "Zellwood", [5.0, 7.0, 8.0, 4.0, 7.0]),
        create_record("6", "Millbrook", [6.0, 9.0, 4.0, 5.0, 9.0]),
    ]
}

fn selection(keys: &[AttributeKey]) -> PreferenceSelection {
    keys.iter().copied().collect()
}

#[test]
fn test_score_spot_check() {
    let record = create_record("x", "Spot", [5.0, 2.0, 0.0, 0.0, 0.0]);
    let prefs = selection(&[AttributeKey::Safety, AttributeKey::Cafes]);

    assert_eq!(calculate_score(&record, &prefs), 7.0);
}

#[test]
fn test_every_score_is_sum_of_selected_attributes() {
    let records = sample_records();
    let ranker = Ranker::new();

    let key_sets: Vec<Vec<AttributeKey>> = vec![
        vec![AttributeKey::Safety],
        vec![AttributeKey::Cafes, AttributeKey::PublicTransport],
        vec![AttributeKey::Parks, AttributeKey::Schools, AttributeKey::Safety],
        AttributeKey::ALL.to_vec(),
    ];

    for keys in key_sets {
        let prefs = selection(&keys);
        for scored in ranker.rank(&prefs, &records) {
            let expected: f64 = keys.iter().map(|k| scored.record.attribute(*k)).sum();
            assert_eq!(scored.score, expected, "wrong score for {}", scored.record.name);
        }
    }
}

#[test]
fn test_ranked_descending_and_stable() {
    let records = sample_records();
    let prefs = selection(&[AttributeKey::Cafes, AttributeKey::PublicTransport]);

    let ranked = Ranker::new().rank(&prefs, &records);

    for pair in ranked.windows(2) {
        assert!(pair[0].score >= pair[1].score, "Results not sorted by score");
    }

    // Oaktown and Millbrook tie at 18; Oaktown comes first in storage
    let names: Vec<&str> = ranked.iter().map(|s| s.record.name.as_str()).collect();
    assert_eq!(&names[..2], &["Oaktown", "Millbrook"]);
}

#[test]
fn test_empty_preferences_keep_storage_order() {
    let records = sample_records();
    let ranked = Ranker::new().rank(&PreferenceSelection::new(), &records);

    assert!(ranked.iter().all(|s| s.score == 0.0));
    let ids: Vec<&str> = ranked.iter().map(|s| s.record.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);
}

#[test]
fn test_rank_is_deterministic() {
    let records = sample_records();
    let prefs = selection(&[AttributeKey::Parks, AttributeKey::Schools]);
    let ranker = Ranker::new();

    assert_eq!(ranker.rank(&prefs, &records), ranker.rank(&prefs, &records));
}

#[test]
fn test_duplicate_and_reordered_keys_score_the_same() {
    let records = sample_records();
    let ranker = Ranker::new();

    let a = parse_selection(&["safety", "parks", "safety"], UnknownKeyPolicy::Reject).unwrap();
    let b = parse_selection(&["parks", "safety"], UnknownKeyPolicy::Reject).unwrap();

    assert_eq!(ranker.rank(&a, &records), ranker.rank(&b, &records));
}

#[test]
fn test_client_filter_keeps_ranked_order() {
    let records = vec![
        create_record("1", "Oakwood", [1.0, 0.0, 0.0, 0.0, 0.0]),
        create_record("2", "Riverside", [3.0, 0.0, 0.0, 0.0, 0.0]),
        create_record("3", "Oaktown", [2.0, 0.0, 0.0, 0.0, 0.0]),
    ];
    let ranked = Ranker::new().rank(&selection(&[AttributeKey::Safety]), &records);

    let filtered = apply_client_filter(&ranked, "oak");
    let names: Vec<&str> = filtered.iter().map(ScoredNeighborhood::name).collect();

    assert_eq!(names, vec!["Oaktown", "Oakwood"]);
}

#[test]
fn test_name_sort_ignores_scores() {
    let records = vec![
        create_record("1", "Zellwood", [9.0, 0.0, 0.0, 0.0, 0.0]),
        create_record("2", "Ashford", [1.0, 0.0, 0.0, 0.0, 0.0]),
    ];
    let ranked = Ranker::new().rank(&selection(&[AttributeKey::Safety]), &records);

    let sorted = apply_sort(&ranked, SortMode::Name);
    let names: Vec<&str> = sorted.iter().map(ScoredNeighborhood::name).collect();

    assert_eq!(names, vec!["Ashford", "Zellwood"]);
}
