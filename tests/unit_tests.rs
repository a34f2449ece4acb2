// Unit tests for the connection scoring engine

use connection_quiz::core::{
    hash::{hash_fraction, string_hash},
    scoring::{
        compute_connections, compute_rarity, compute_result, rarity_band, score_breakdown, Factor,
        MAX_CONNECTIONS, MIN_CONNECTIONS,
    },
};
use connection_quiz::models::QuizAnswers;

fn answers(city: &str, school: &str, company: &str, industry: &str) -> QuizAnswers {
    QuizAnswers {
        city: Some(city.to_string()),
        school: Some(school.to_string()),
        company: Some(company.to_string()),
        industry: Some(industry.to_string()),
        ..Default::default()
    }
}

fn city_only(city: &str) -> QuizAnswers {
    QuizAnswers {
        city: Some(city.to_string()),
        ..Default::default()
    }
}

/// `N.N%` with a single decimal digit
fn is_rarity_format(rarity: &str) -> bool {
    let Some(number) = rarity.strip_suffix('%') else {
        return false;
    };
    let Some((whole, fraction)) = number.split_once('.') else {
        return false;
    };
    !whole.is_empty()
        && whole.chars().all(|c| c.is_ascii_digit())
        && fraction.len() == 1
        && fraction.chars().all(|c| c.is_ascii_digit())
}

#[test]
fn test_deterministic() {
    let input = answers("Nashville", "Belmont", "Republic Records", "music");
    let first = compute_result(&input);

    for _ in 0..100 {
        assert_eq!(compute_result(&input), first);
    }
}

#[test]
fn test_bounds_hold_across_inputs() {
    let cities = ["", "Nashville", "Boise", "NYC", "Greater London", "Toronto, ON", "😀"];
    let schools = ["", "Berklee", "Generic State", "NYU Steinhardt"];
    let companies = ["", "Spotify", "Acme Corp", "Warner Chappell"];
    let industries = ["", "music", "creative", "marketing", "tech", "other"];
    let ages = ["", "18-24", "25-34", "45+"];
    let levels = ["", "0-2", "3-5", "10+"];

    for city in cities {
        for school in schools {
            for company in companies {
                for industry in industries {
                    for age in ages {
                        for level in levels {
                            let input = QuizAnswers {
                                age_range: Some(age.to_string()),
                                city: Some(city.to_string()),
                                school: Some(school.to_string()),
                                company: Some(company.to_string()),
                                industry: Some(industry.to_string()),
                                experience_level: Some(level.to_string()),
                            };
                            let result = compute_result(&input);

                            assert!(result.connections >= MIN_CONNECTIONS);
                            assert!(result.connections <= MAX_CONNECTIONS);
                            assert!(is_rarity_format(&result.rarity), "bad rarity {}", result.rarity);

                            let value: f64 = result.rarity.trim_end_matches('%').parse().unwrap();
                            assert!((0.1..=25.0).contains(&value));
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_base_rarity_strictly_increasing() {
    let bases: Vec<f64> = (2..=6).map(|c| rarity_band(c).base).collect();

    for pair in bases.windows(2) {
        assert!(pair[0] < pair[1], "base rarity not increasing: {:?}", bases);
    }
}

#[test]
fn test_empty_input_exact() {
    let empty = QuizAnswers::default();

    // All six fields empty join to five dashes
    let hash = string_hash("-----");
    let variation = hash_fraction(hash);
    let expected_score = 4.0 + (variation - 0.5) * 1.4;

    assert_eq!(variation, 0.25);
    assert_eq!(score_breakdown(&empty).raw_score, expected_score);

    let result = compute_result(&empty);
    assert_eq!(result.connections, 4);
    assert_eq!(result.rarity, "6.0%");
}

#[test]
fn test_music_profile_beats_generic_profile() {
    let music = answers("Nashville", "Belmont", "Republic Records", "music");
    let generic = answers("Boise", "Generic State", "Acme Corp", "other");

    // 4.0 - 1.0 - 1.8 - 0.9 - 1.2 + (0.51 - 0.5) * 1.4 = -0.886
    let music_breakdown = score_breakdown(&music);
    assert!((music_breakdown.raw_score - (-0.886)).abs() < 1e-9);

    // 4.0 + (0.69 - 0.5) * 1.4 = 4.266
    let generic_breakdown = score_breakdown(&generic);
    assert!((generic_breakdown.raw_score - 4.266).abs() < 1e-9);

    let music_result = compute_result(&music);
    let generic_result = compute_result(&generic);

    assert_eq!(music_result.connections, 2);
    assert_eq!(music_result.rarity, "0.9%");
    assert_eq!(generic_result.connections, 4);
    assert_eq!(generic_result.rarity, "6.0%");
    assert!(music_result.connections < generic_result.connections);
}

#[test]
fn test_city_case_insensitive() {
    let upper = compute_result(&city_only("NASHVILLE"));
    let lower = compute_result(&city_only("nashville"));

    assert_eq!(upper, lower);
    assert_eq!(upper.connections, 3);
    assert_eq!(upper.rarity, "1.8%");

    assert!(score_breakdown(&city_only("NASHVILLE")).has(Factor::MusicHub));
}

#[test]
fn test_city_substring_match() {
    let breakdown = score_breakdown(&city_only("Greater Nashville Area"));

    assert!(breakdown.has(Factor::MusicHub));
    // Variation 0.88: 4.0 - 1.0 + 0.38 * 1.4 = 3.532, which would be 4.532 without the hub
    assert!((breakdown.raw_score - 3.532).abs() < 1e-9);
    assert_eq!(compute_connections(&city_only("Greater Nashville Area")), 4);
}

#[test]
fn test_non_hub_city() {
    let breakdown = score_breakdown(&city_only("Boise"));

    assert!(!breakdown.has(Factor::MusicHub));
    assert_eq!(compute_connections(&city_only("Boise")), 3);
}

#[test]
fn test_composition_matches_compute_result() {
    let inputs = [
        QuizAnswers::default(),
        answers("Austin", "UT Austin", "Dell", "tech"),
        answers("Nashville", "Belmont", "Republic Records", "music"),
        QuizAnswers {
            age_range: Some("45+".to_string()),
            city: Some("Fargo".to_string()),
            school: Some("NDSU".to_string()),
            company: Some("Bank".to_string()),
            industry: Some("finance".to_string()),
            experience_level: Some("0-2".to_string()),
        },
    ];

    for input in &inputs {
        let connections = compute_connections(input);
        let rarity = compute_rarity(connections);
        let result = compute_result(input);

        assert_eq!(result.connections, connections);
        assert_eq!(result.rarity, rarity);
    }
}

#[test]
fn test_full_profile_traces() {
    let austin = QuizAnswers {
        age_range: Some("25-34".to_string()),
        city: Some("Austin".to_string()),
        school: Some("UT Austin".to_string()),
        company: Some("Dell".to_string()),
        industry: Some("tech".to_string()),
        experience_level: Some("3-5".to_string()),
    };
    assert_eq!(compute_connections(&austin), 3);

    let fargo = QuizAnswers {
        age_range: Some("45+".to_string()),
        city: Some("Fargo".to_string()),
        school: Some("NDSU".to_string()),
        company: Some("Bank".to_string()),
        industry: Some("finance".to_string()),
        experience_level: Some("0-2".to_string()),
    };
    let breakdown = score_breakdown(&fargo);
    assert!(breakdown.has(Factor::OlderAge));
    assert!(breakdown.has(Factor::EntryExperience));
    assert_eq!(compute_result(&fargo).connections, 5);
    assert_eq!(compute_result(&fargo).rarity, "9.3%");
}

#[test]
fn test_absent_equals_empty_string() {
    let absent = QuizAnswers::default();
    let empty = QuizAnswers {
        age_range: Some(String::new()),
        city: Some(String::new()),
        school: Some(String::new()),
        company: Some(String::new()),
        industry: Some(String::new()),
        experience_level: Some(String::new()),
    };

    assert_eq!(compute_result(&absent), compute_result(&empty));
}
