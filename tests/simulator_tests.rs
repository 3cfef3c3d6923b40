//! End-to-end play between planners and baselines.

use history_mcts::agents::{Agent, RandomAgent, ScriptedAgent};
use history_mcts::core::{PlayerId, PlayerMap};
use history_mcts::forward::{ForwardSearch, ForwardSearchConfig};
use history_mcts::games::kuhn::{KuhnPoker, KuhnPokerBuilder};
use history_mcts::mcts::{Eligibility, HistoryMcts, MctsConfig};
use history_mcts::simulator::{SimulationReport, Simulator, SimulatorConfig};

fn game() -> KuhnPoker {
    KuhnPokerBuilder::new().max_bet(3).build()
}

fn run(agents: PlayerMap<Box<dyn Agent<KuhnPoker>>>, episodes: u32) -> SimulationReport {
    let config = SimulatorConfig::default().with_episodes(episodes).with_seed(21);
    Simulator::new(game(), agents, config).run().unwrap()
}

fn assert_consistent(report: &SimulationReport, episodes: u32) {
    assert_eq!(report.episodes, episodes);
    assert_eq!(
        report.wins[PlayerId::ZERO] + report.wins[PlayerId::ONE] + report.draws,
        episodes
    );
    assert!(report.average_pot >= 2.0);
    assert!(report.average_profit.sum().abs() < 1e-9);
    for player in PlayerId::all() {
        let dealt: u32 = report.by_card[player].values().map(|s| s.episodes).sum();
        assert_eq!(dealt, episodes);
        for stats in report.by_card[player].values() {
            assert!((0.0..=1.0).contains(&stats.win_rate()));
        }
    }
}

#[test]
fn test_forward_search_against_random() {
    let agents: PlayerMap<Box<dyn Agent<KuhnPoker>>> = PlayerMap::from_pair(
        Box::new(ForwardSearch::new(game(), ForwardSearchConfig::default())),
        Box::new(RandomAgent::new(5)),
    );

    let report = run(agents, 60);

    assert_consistent(&report, 60);
}

#[test]
fn test_mcts_against_always_check() {
    let config = MctsConfig::default()
        .with_simulations(80)
        .with_eligibility(Eligibility::SimilarityWidening {
            theta1: 1.5,
            theta2: 0.5,
        });
    let agents: PlayerMap<Box<dyn Agent<KuhnPoker>>> = PlayerMap::from_pair(
        Box::new(ScriptedAgent::always_check()),
        Box::new(HistoryMcts::new(game(), config)),
    );

    let report = run(agents, 40);

    assert_consistent(&report, 40);
}

#[test]
fn test_planners_head_to_head() {
    let agents: PlayerMap<Box<dyn Agent<KuhnPoker>>> = PlayerMap::from_pair(
        Box::new(HistoryMcts::new(
            game(),
            MctsConfig::default()
                .with_simulations(50)
                .with_eligibility(Eligibility::FixedWidth { width: 2 }),
        )),
        Box::new(ForwardSearch::new(
            game(),
            ForwardSearchConfig::default().with_max_depth(2),
        )),
    );

    let report = run(agents, 25);

    assert_consistent(&report, 25);
}

#[test]
fn test_same_seed_same_report() {
    let build = || -> PlayerMap<Box<dyn Agent<KuhnPoker>>> {
        PlayerMap::from_pair(
            Box::new(HistoryMcts::new(game(), MctsConfig::default().with_simulations(40))),
            Box::new(RandomAgent::new(11)),
        )
    };

    assert_eq!(run(build(), 30), run(build(), 30));
}
