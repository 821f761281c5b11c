//! Parametric entrepreneur scoring: proximity components, weighting,
//! ordering and the top-10 slice.

use kds_core::{
    dataset::Dataset,
    entrepreneur::{proximity_score, rank_entrepreneurs, year_score, TOP_N},
    types::{EntrepreneurRecord, ScoringParameters},
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn candidate(id: i64, women: f64, disabled: f64, year: i32) -> EntrepreneurRecord {
    EntrepreneurRecord {
        id,
        name: Some(format!("Venture {id}")),
        women_ratio: Some(women),
        disabled_ratio: Some(disabled),
        established_year: Some(year),
    }
}

fn params(women: f64, disabled: f64, min_year: i32) -> ScoringParameters {
    ScoringParameters {
        ref_women_ratio: women,
        ref_disabled_ratio: disabled,
        ref_min_year: min_year,
    }
}

/// A candidate exactly on the women target earns the full 0.4.
#[test]
fn exact_women_match_earns_full_weight() {
    let result = rank_entrepreneurs(&[candidate(1, 30.0, 0.0, 2020)], &params(30.0, 5.0, 2015));
    let top = &result.detail[0];
    assert_eq!(top.breakdown.women, 0.4, "women component: {}", top.breakdown.women);
}

/// Fraction and percentage encodings of the same ratio score identically.
#[test]
fn ratio_scale_does_not_change_score() {
    let p = params(30.0, 5.0, 2015);
    let as_pct = rank_entrepreneurs(&[candidate(1, 30.0, 5.0, 2016)], &p);
    let as_frac = rank_entrepreneurs(&[candidate(1, 0.3, 0.05, 2016)], &p);
    assert!(close(as_pct.values[0], as_frac.values[0]));
    assert!(close(as_pct.values[0], 1.0), "perfect candidate should score 1.0");
}

/// Ten years short of the minimum decays the year factor to zero.
#[test]
fn year_decay_reaches_zero_after_ten_years() {
    let result = rank_entrepreneurs(&[candidate(1, 30.0, 5.0, 2005)], &params(30.0, 5.0, 2015));
    assert_eq!(result.detail[0].breakdown.year, 0.0);
    assert!(close(result.values[0], 0.7));
}

#[test]
fn year_decay_is_linear() {
    assert_eq!(year_score(2015, 2015), 1.0);
    assert_eq!(year_score(2020, 2015), 1.0);
    assert!(close(year_score(2010, 2015), 0.5));
    assert!(close(year_score(2014, 2015), 0.9));
    assert_eq!(year_score(1990, 2015), 0.0);
}

/// Overshooting the target is penalized like undershooting it.
#[test]
fn proximity_penalizes_overshoot() {
    assert!(close(proximity_score(0.45, 0.3), 0.5));
    assert!(close(proximity_score(0.15, 0.3), 0.5));
    assert_eq!(proximity_score(0.6, 0.3), 0.0);
    assert_eq!(proximity_score(0.9, 0.3), 0.0, "score is floored at zero");
}

/// A zero reference means "no target": lower ratios score higher,
/// and nothing divides by zero.
#[test]
fn zero_reference_rewards_low_ratio() {
    let result = rank_entrepreneurs(
        &[candidate(1, 20.0, 0.0, 2020), candidate(2, 0.0, 0.0, 2020)],
        &params(0.0, 0.0, 2015),
    );
    assert_eq!(result.detail[0].id, 2);
    assert!(close(result.detail[0].breakdown.women, 0.4));
    assert!(close(result.detail[1].breakdown.women, 0.8 * 0.4));
    assert!(result.values.iter().all(|v| v.is_finite()));
}

#[test]
fn breakdown_sums_to_score() {
    let records: Vec<_> = (1..=5)
        .map(|i| candidate(i, 10.0 * i as f64, i as f64, 2008 + i as i32))
        .collect();
    let result = rank_entrepreneurs(&records, &ScoringParameters::default());
    for e in &result.detail {
        let sum = e.breakdown.women + e.breakdown.disabled + e.breakdown.year;
        assert!(close(sum, e.score), "{}: breakdown {sum} != score {}", e.name, e.score);
        assert!((0.0..=1.0).contains(&e.score));
    }
}

#[test]
fn keeps_top_ten_in_descending_order() {
    let records: Vec<_> = (1..=25)
        .map(|i| candidate(i, i as f64 * 3.0, 5.0, 2015))
        .collect();
    let result = rank_entrepreneurs(&records, &params(30.0, 5.0, 2015));

    assert_eq!(result.detail.len(), TOP_N);
    assert_eq!(result.labels.len(), TOP_N);
    assert_eq!(result.values.len(), TOP_N);
    assert!(result.all_ranked.is_none());
    for w in result.values.windows(2) {
        assert!(w[0] >= w[1], "values not descending: {:?}", result.values);
    }
    // 30% is the exact target.
    assert_eq!(result.detail[0].id, 10);
    assert_eq!(result.detail[0].rank, 1);
    for (label, e) in result.labels.iter().zip(&result.detail) {
        assert_eq!(label, &e.name);
    }
}

#[test]
fn ties_keep_input_order() {
    let records = vec![
        candidate(7, 30.0, 5.0, 2020),
        candidate(3, 30.0, 5.0, 2020),
        candidate(5, 30.0, 5.0, 2020),
    ];
    let result = rank_entrepreneurs(&records, &ScoringParameters::default());
    let ids: Vec<i64> = result.detail.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![7, 3, 5]);
}

#[test]
fn parameters_are_echoed() {
    let p = params(40.0, 0.1, 2010);
    let result = rank_entrepreneurs(&[], &p);
    let echo = result.parameters.expect("parameter echo");
    assert_eq!(echo.supplied, p);
    assert!(close(echo.women_ratio, 0.4));
    assert!(close(echo.disabled_ratio, 0.1), "0.1 is already a fraction");
    assert_eq!(echo.min_year, 2010);
    assert!(result.detail.is_empty());
    assert!(result.labels.is_empty());
}

/// A record with every field absent still receives a score.
#[test]
fn empty_record_is_scored_not_excluded() {
    let result = rank_entrepreneurs(&[EntrepreneurRecord::default()], &ScoringParameters::default());
    assert_eq!(result.detail.len(), 1);
    assert_eq!(result.detail[0].name, "Unknown");
    assert_eq!(result.detail[0].established_year, 0);
    assert_eq!(result.values[0], 0.0);
}

/// Null and unreadable entries are dropped before scoring; malformed
/// fields inside a readable entry default to zero.
#[test]
fn unreadable_entries_are_dropped() {
    let raw = r#"{
        "entrepreneurs": [
            null,
            { "id": 1, "name": "Elif's Ceramics Workshop", "women_ratio": 30, "disabled_ratio": "5", "established_year": 2018 },
            "garbage",
            { "id": 2, "women_ratio": "n/a", "established_year": null },
            {}
        ]
    }"#;
    let dataset = Dataset::from_json(raw).expect("dataset parses");
    assert_eq!(dataset.entrepreneurs.len(), 3);
    assert_eq!(dataset.entrepreneurs[0].disabled_ratio, Some(5.0));
    assert_eq!(dataset.entrepreneurs[1].women_ratio, None);

    let result = rank_entrepreneurs(&dataset.entrepreneurs, &ScoringParameters::default());
    assert_eq!(result.detail.len(), 3);
    assert_eq!(result.detail[0].id, 1);
    assert!(close(result.values[0], 1.0));
}
