//! Forward search integration tests on Kuhn poker.

use history_mcts::agents::Agent;
use history_mcts::belief::BeliefDistribution;
use history_mcts::core::{Action, History, PlayerId};
use history_mcts::forward::{ForwardSearch, ForwardSearchConfig};
use history_mcts::games::kuhn::{KuhnObservation, KuhnPoker, KuhnPokerBuilder};
use history_mcts::rules::RulesEngine;

fn game() -> KuhnPoker {
    KuhnPokerBuilder::new().max_bet(1).build()
}

fn opening(game: &KuhnPoker, cards: [u8; 2]) -> History<KuhnObservation> {
    let state = game.deal_with(cards, PlayerId::ZERO);
    History::new(game.observe(&state, PlayerId::ZERO))
}

// =============================================================================
// Decision Tests
// =============================================================================

#[test]
fn test_opens_with_a_bet_holding_the_top_card() {
    let game = game();
    let history = opening(&game, [2, 0]);
    let mut search = ForwardSearch::new(game, ForwardSearchConfig::default());

    let outcome = search.evaluate(&history, PlayerId::ZERO);

    // Bet: opponent folds (+1) or calls (+2). Check: +1 either way.
    assert_eq!(outcome.action, Some(Action::bet(1)));
    assert!((outcome.value - 1.5).abs() < 1e-12);
}

#[test]
fn test_checks_holding_the_bottom_card() {
    let game = game();
    let history = opening(&game, [0, 2]);
    let mut search = ForwardSearch::new(game, ForwardSearchConfig::default());

    let outcome = search.evaluate(&history, PlayerId::ZERO);

    assert_eq!(outcome.action, Some(Action::CHECK));
    assert!(outcome.value.abs() < 1e-12);
}

#[test]
fn test_choose_action_filters_but_evaluate_does_not() {
    let game = game();
    let mut state = game.deal_with([2, 1], PlayerId::ZERO);
    let mut history = History::new(game.observe(&state, PlayerId::ONE));
    game.apply(&mut state, Action::bet(1), PlayerId::ZERO).unwrap();
    history.push(game.observe(&state, PlayerId::ONE));
    let uniform = BeliefDistribution::uniform(&[0, 1, 2]);
    let mut search = ForwardSearch::new(game, ForwardSearchConfig::default());

    search.evaluate(&history, PlayerId::ONE);
    assert_eq!(search.belief().distribution(), &uniform);

    let action = search.choose_action(&history, PlayerId::ONE);
    assert!(action.is_some());
    assert!(search.belief().distribution().probability(2) > 0.5);

    Agent::<KuhnPoker>::reset(&mut search);
    assert_eq!(search.belief().distribution(), &uniform);
    assert_eq!(search.nodes_visited(), 0);
}

// =============================================================================
// Budget Tests
// =============================================================================

#[test]
fn test_deeper_search_visits_more_nodes() {
    let game = KuhnPokerBuilder::new().max_bet(4).build();
    let history = opening(&game, [1, 0]);

    let mut shallow = ForwardSearch::new(
        game.clone(),
        ForwardSearchConfig::default().with_max_depth(1),
    );
    let mut deep = ForwardSearch::new(game, ForwardSearchConfig::default().with_max_depth(3));

    shallow.evaluate(&history, PlayerId::ZERO);
    deep.evaluate(&history, PlayerId::ZERO);

    assert!(deep.nodes_visited() > shallow.nodes_visited());
}

#[test]
fn test_tight_budget_still_returns_a_legal_action() {
    let game = KuhnPokerBuilder::new().max_bet(8).build();
    let history = opening(&game, [1, 2]);
    let legal = history.legal_actions();
    let mut search = ForwardSearch::new(game, ForwardSearchConfig::default().with_node_budget(5));

    let action = search.choose_action(&history, PlayerId::ZERO).unwrap();

    assert!(legal.contains(&action));
}
