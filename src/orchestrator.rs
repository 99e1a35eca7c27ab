//! Match referee: runs games between two players under a per-turn time limit.
//!
//! This module contains the game loop that hosts [`Player`] implementations.
//! It manages:
//! - Turn scheduling and the per-turn deadline
//! - Collecting the last move a player published before its deadline
//! - Adjudicating losses (timeout, illegal move, panic) and normal game ends
//! - Tournaments of paired games run in parallel
//!
//! # Turn Flow
//!
//! ```text
//! [Spawn worker] -> player.get_action(state, control, channel)
//!   -> [Host drains channel until deadline or worker exit]
//!   -> [Stop flag raised, worker joined]
//!   -> [Last published move validated] -> [Apply move] -> [Next turn] ...
//! ```
//!
//! Cancellation is cooperative: a player must return shortly after its
//! [`SearchControl`] reports that it should stop. The host joins the worker
//! before moving on, so a player that ignores the control stalls the match.

use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::agent::ai::SearchControl;
use crate::agent::player::Player;
use crate::game_repr::{Action, GameState, Isolation, PlayerId};

/// Player trait object as hosted by the referee
pub type BoxedPlayer = Box<dyn Player<Isolation>>;

/// Reason a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The active player panicked during its turn
    Exception,
    /// The active player published no move before its deadline
    Timeout,
    /// The active player's last published move was not legal
    InvalidMove,
    /// The game ended normally with a stuck player
    GameOver,
}

/// Outcome of one game
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub winner: PlayerId,
    pub status: Status,
    /// Position the game started from
    pub initial: Isolation,
    /// Actions applied to `initial`, in order
    pub history: Vec<Action>,
    pub final_state: Isolation,
    /// Moves published by each player over the whole game
    pub publications: [usize; 2],
}

/// What the host collected from one turn
struct TurnOutcome {
    action: Option<Action>,
    published: usize,
    panicked: bool,
}

/// Play one game to the end.
///
/// `players[i]` plays the seat `PlayerId::BOTH[i]`. Each turn runs on a scoped
/// worker thread with its own deadline `time_limit` after the turn starts.
///
/// # Loss Conditions
///
/// - Worker panicked: [`Status::Exception`]
/// - Nothing published before the deadline: [`Status::Timeout`]
/// - Last published move illegal: [`Status::InvalidMove`]
///
/// Otherwise play continues until a player is stuck ([`Status::GameOver`]).
pub fn play_game(players: &mut [BoxedPlayer; 2], initial: Isolation, time_limit: Duration) -> GameRecord {
    info!(
        "new game: {} vs {}, {}ms per turn\n{}",
        players[0].name(),
        players[1].name(),
        time_limit.as_millis(),
        initial
    );

    let mut state = initial;
    let mut history = Vec::new();
    let mut publications = [0; 2];

    while !state.terminal_test() {
        let active = state.player();
        let player = &mut players[active.index()];
        let turn = run_turn(&mut **player, &state, time_limit);
        publications[active.index()] += turn.published;

        let failure = if turn.panicked {
            warn!("{} ({}) panicked during its turn", player.name(), active);
            Some(Status::Exception)
        } else {
            match turn.action {
                None => {
                    info!("{} ({}) published no move within {}ms", player.name(), active, time_limit.as_millis());
                    Some(Status::Timeout)
                }
                Some(action) => match state.try_result(action) {
                    Ok(next) => {
                        debug!("{} plays {} after {} publications", active, action, turn.published);
                        state = next;
                        history.push(action);
                        None
                    }
                    Err(err) => {
                        info!("{} ({}) chose an invalid move: {}", player.name(), active, err);
                        Some(Status::InvalidMove)
                    }
                },
            }
        };

        if let Some(status) = failure {
            return finish(active.opponent(), status, initial, history, state, publications);
        }
    }

    // The player to move in a terminal state is the one left without moves
    let winner = state.player().opponent();
    finish(winner, Status::GameOver, initial, history, state, publications)
}

fn finish(
    winner: PlayerId,
    status: Status,
    initial: Isolation,
    history: Vec<Action>,
    final_state: Isolation,
    publications: [usize; 2],
) -> GameRecord {
    info!(
        "game ended ({:?}) after {} moves, winner: {}\n{}",
        status,
        history.len(),
        winner,
        final_state
    );

    GameRecord {
        winner,
        status,
        initial,
        history,
        final_state,
        publications,
    }
}

/// Ask `player` for a move, keeping whatever it published last before the deadline
fn run_turn(player: &mut dyn Player<Isolation>, state: &Isolation, time_limit: Duration) -> TurnOutcome {
    let control = SearchControl::with_time_limit(time_limit);
    let deadline = Instant::now() + time_limit;
    let (tx, rx) = mpsc::channel();

    thread::scope(|scope| {
        let worker_control = control.clone();
        let handle = scope.spawn(move || {
            let mut tx = tx;
            player.get_action(state, &worker_control, &mut tx);
        });

        let mut action = None;
        let mut published = 0;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok(latest) => {
                    action = Some(latest);
                    published += 1;
                }
                // Deadline passed, or the worker returned and dropped its sender
                Err(mpsc::RecvTimeoutError::Timeout) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }
        }

        control.stop();
        let panicked = handle.join().is_err();

        TurnOutcome {
            action,
            published,
            panicked,
        }
    })
}

/// Tournament configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    /// Per-turn time limit
    pub time_limit: Duration,
    /// Number of game pairs; each pair plays one opening from both sides
    pub rounds: usize,
    /// Seed for the openings; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_millis(150),
            rounds: 5,
            seed: None,
        }
    }
}

/// Win tally of a tournament, indexed by contestant (0 = first factory)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TournamentSummary {
    pub games: usize,
    pub wins: [usize; 2],
}

impl TournamentSummary {
    /// Fraction of games won by contestant `idx`
    pub fn win_rate(&self, idx: usize) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.wins[idx] as f64 / self.games as f64
    }

    fn merge(self, other: Self) -> Self {
        Self {
            games: self.games + other.games,
            wins: [self.wins[0] + other.wins[0], self.wins[1] + other.wins[1]],
        }
    }
}

/// Random opening: both players placed on distinct random cells
pub fn random_opening(rng: &mut StdRng) -> Isolation {
    let mut state = Isolation::new();
    for _ in PlayerId::BOTH {
        if let Some(&action) = state.actions().choose(rng) {
            state = state.result(action);
        }
    }
    state
}

/// Play `config.rounds` pairs of games between two contestants.
///
/// Each factory builds a fresh player for the requested seat. Every pair starts
/// from the same random opening, once with each contestant moving first, so
/// neither side profits from a lucky opening. Pairs run in parallel.
pub fn play_tournament<F1, F2>(first: F1, second: F2, config: &MatchConfig) -> TournamentSummary
where
    F1: Fn(PlayerId) -> BoxedPlayer + Sync,
    F2: Fn(PlayerId) -> BoxedPlayer + Sync,
{
    let base_seed = config.seed.unwrap_or_else(rand::random);
    info!("tournament: {} rounds, seed {}", config.rounds, base_seed);

    (0..config.rounds)
        .into_par_iter()
        .map(|round| {
            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(round as u64));
            let opening = random_opening(&mut rng);

            let mut players = [first(PlayerId::First), second(PlayerId::Second)];
            let record = play_game(&mut players, opening, config.time_limit);
            let mut summary = tally(record.winner, false);

            let mut players = [second(PlayerId::First), first(PlayerId::Second)];
            let record = play_game(&mut players, opening, config.time_limit);
            summary = summary.merge(tally(record.winner, true));

            debug!("round {} done: {:?}", round, summary.wins);
            summary
        })
        .reduce(TournamentSummary::default, TournamentSummary::merge)
}

/// Credit one game's win to the contestant that held the winning seat
fn tally(winner: PlayerId, swapped: bool) -> TournamentSummary {
    let contestant = match (winner, swapped) {
        (PlayerId::First, false) | (PlayerId::Second, true) => 0,
        _ => 1,
    };
    let mut wins = [0; 2];
    wins[contestant] = 1;
    TournamentSummary { games: 1, wins }
}
