use dota_lookup::config::ResultBasis;
use dota_lookup::heroes::{HeroCatalog, HeroRecord};
use dota_lookup::state::{
    AppState, Delta, HeroCell, MatchResult, MatchSummary, PlayerProfile, ProviderCommand,
    apply_delta,
};

fn sample_match(match_id: u64, hero_id: u32, player_slot: Option<u32>) -> MatchSummary {
    MatchSummary {
        match_id,
        hero_id,
        player_slot,
        kills: 1,
        deaths: 2,
        assists: 3,
        duration_secs: 125,
        game_mode: Some(1),
        rank_tier: Some(42),
    }
}

fn sample_profile(rank_tier: Option<u32>) -> PlayerProfile {
    PlayerProfile {
        account: None,
        rank_tier,
    }
}

fn started(state: &mut AppState, input: &str) -> u64 {
    state.input = input.to_string();
    match state.begin_lookup() {
        Some(ProviderCommand::Lookup { seq, .. }) => seq,
        None => panic!("lookup should start for {input:?}"),
    }
}

#[test]
fn blank_input_does_not_start_a_lookup() {
    let mut state = AppState::new();
    assert!(state.begin_lookup().is_none());
    state.input = "   ".to_string();
    assert!(state.begin_lookup().is_none());
    assert!(!state.is_loading());
    assert_eq!(state.lookup_seq(), 0);
}

#[test]
fn begin_lookup_sets_loading_clears_error_and_passes_input_through() {
    let mut state = AppState::new();
    let seq = started(&mut state, "1");
    apply_delta(
        &mut state,
        Delta::LookupFailed {
            seq,
            message: "boom".to_string(),
        },
    );
    assert_eq!(state.error(), Some("boom"));

    state.input = "7656 1198".to_string();
    let cmd = state.begin_lookup().expect("lookup should start");
    assert_eq!(
        cmd,
        ProviderCommand::Lookup {
            seq: 2,
            account_id: "7656 1198".to_string(),
        }
    );
    assert!(state.is_loading());
    assert!(state.error().is_none());
}

#[test]
fn stale_lookup_results_are_discarded() {
    let mut state = AppState::new();
    let first = started(&mut state, "111");
    let second = started(&mut state, "222");
    assert!(second > first);

    apply_delta(
        &mut state,
        Delta::ProfileLoaded {
            seq: second,
            profile: sample_profile(Some(55)),
        },
    );
    apply_delta(
        &mut state,
        Delta::LookupSucceeded {
            seq: second,
            matches: vec![sample_match(2, 1, Some(0))],
        },
    );

    // The first lookup finishes late and must not touch displayed state.
    apply_delta(
        &mut state,
        Delta::ProfileLoaded {
            seq: first,
            profile: sample_profile(Some(11)),
        },
    );
    apply_delta(
        &mut state,
        Delta::LookupFailed {
            seq: first,
            message: "late failure".to_string(),
        },
    );

    assert_eq!(state.profile().and_then(|p| p.rank_tier), Some(55));
    assert_eq!(state.matches().len(), 1);
    assert!(state.error().is_none());
    assert!(!state.is_loading());
    assert!(state.logs.iter().any(|line| line.contains("stale")));
}

#[test]
fn loading_stays_on_until_latest_lookup_finishes() {
    let mut state = AppState::new();
    let first = started(&mut state, "111");
    let _second = started(&mut state, "222");

    apply_delta(
        &mut state,
        Delta::LookupSucceeded {
            seq: first,
            matches: Vec::new(),
        },
    );
    assert!(state.is_loading());
}

#[test]
fn failure_clears_profile_and_matches() {
    let mut state = AppState::new();
    let seq = started(&mut state, "1");
    apply_delta(
        &mut state,
        Delta::ProfileLoaded {
            seq,
            profile: sample_profile(Some(55)),
        },
    );
    apply_delta(
        &mut state,
        Delta::LookupSucceeded {
            seq,
            matches: vec![sample_match(1, 1, Some(0))],
        },
    );

    let seq = started(&mut state, "2");
    apply_delta(
        &mut state,
        Delta::LookupFailed {
            seq,
            message: "Player not found".to_string(),
        },
    );
    assert!(state.profile().is_none());
    assert!(state.matches().is_empty());
    assert_eq!(state.error(), Some("Player not found"));
    assert!(!state.is_loading());
}

#[test]
fn new_profile_drops_previous_matches() {
    let mut state = AppState::new();
    let seq = started(&mut state, "1");
    apply_delta(
        &mut state,
        Delta::LookupSucceeded {
            seq,
            matches: vec![sample_match(1, 1, Some(0)), sample_match(2, 1, Some(0))],
        },
    );
    state.select_next();
    assert_eq!(state.selected, 1);

    let seq = started(&mut state, "2");
    apply_delta(
        &mut state,
        Delta::ProfileLoaded {
            seq,
            profile: sample_profile(None),
        },
    );
    assert!(state.matches().is_empty());
    assert_eq!(state.selected, 0);
    assert!(state.is_loading());
}

#[test]
fn hero_cells_are_unknown_until_catalog_arrives() {
    let mut state = AppState::new();
    let seq = started(&mut state, "1");
    apply_delta(
        &mut state,
        Delta::LookupSucceeded {
            seq,
            matches: vec![sample_match(1, 14, Some(0))],
        },
    );
    assert_eq!(state.match_rows()[0].hero, HeroCell::Unknown);
    assert_eq!(state.match_rows()[0].hero.label(), "Unknown");

    let catalog = HeroCatalog::from_records(vec![HeroRecord {
        id: 14,
        name: "npc_dota_hero_pudge".to_string(),
        localized_name: "Pudge".to_string(),
    }]);
    apply_delta(&mut state, Delta::SetHeroes(catalog));

    let rows = state.match_rows();
    assert_eq!(rows[0].hero.label(), "Pudge");
    match &rows[0].hero {
        HeroCell::Known(info) => assert!(info.icon_url.ends_with("/pudge.png")),
        HeroCell::Unknown => panic!("hero should be known"),
    }
}

#[test]
fn result_uses_player_slot_by_default() {
    let radiant = sample_match(1, 1, Some(4));
    let dire = sample_match(2, 1, Some(132));
    let missing = sample_match(3, 1, None);
    assert_eq!(radiant.result(ResultBasis::PlayerSlot), MatchResult::Win);
    assert_eq!(dire.result(ResultBasis::PlayerSlot), MatchResult::Lose);
    assert_eq!(missing.result(ResultBasis::PlayerSlot), MatchResult::Lose);
    assert_eq!(MatchResult::Win.label(), "Win");
    assert_eq!(MatchResult::Lose.label(), "Lose");
}

#[test]
fn legacy_rank_tier_basis_reports_win_for_dire_slot() {
    let dire = sample_match(2, 1, Some(132));
    assert_eq!(dire.result(ResultBasis::RankTier), MatchResult::Win);

    let mut unranked = sample_match(3, 1, Some(0));
    unranked.rank_tier = None;
    assert_eq!(unranked.result(ResultBasis::RankTier), MatchResult::Lose);
}

#[test]
fn selection_is_clamped_to_match_rows() {
    let mut state = AppState::new();
    state.select_next();
    assert_eq!(state.selected, 0);

    let seq = started(&mut state, "1");
    apply_delta(
        &mut state,
        Delta::LookupSucceeded {
            seq,
            matches: vec![sample_match(1, 1, Some(0)), sample_match(2, 1, Some(0))],
        },
    );
    state.select_next();
    state.select_next();
    assert_eq!(state.selected, 1);
    assert_eq!(state.selected_row().map(|r| r.match_id), Some(2));
    state.select_prev();
    state.select_prev();
    assert_eq!(state.selected, 0);
}

#[test]
fn log_ring_is_bounded() {
    let mut state = AppState::new();
    for i in 0..250 {
        apply_delta(&mut state, Delta::Log(format!("[INFO] line {i}")));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.front().map(String::as_str), Some("[INFO] line 50"));
}
