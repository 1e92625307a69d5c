//! Board state, move validation, and terminal detection.

use std::collections::BTreeMap;

use tactix_protocol::{Board, ClientId, Mark, Participant, CELL_COUNT};

/// The eight winning triples: three rows, three columns, two diagonals.
const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The given mark completed a winning triple.
    Win(Mark),
    /// All nine cells filled with no winning triple.
    Draw,
}

/// A move the engine accepted, with everything the caller needs to
/// build its broadcasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    /// The cell that was filled.
    pub index: usize,
    /// The mark that was placed.
    pub mark: Mark,
    /// `Some` if this move ended the game.
    pub verdict: Option<Verdict>,
}

/// The result of [`Engine::attempt_move`].
///
/// Rejection is a normal outcome, not an error: a well-behaved client
/// never submits an illegal move (it mirrors server state), so a
/// rejected one is simply ignored upstream with no notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Accepted(AppliedMove),
    Rejected,
}

/// The state machine for one game instance.
///
/// Invariants the engine protects:
/// - a filled cell is never overwritten
/// - `turn` alternates strictly between the two marks on accepted moves
/// - once a verdict is reached, no move is accepted until [`reset`](Self::reset)
///
/// A fresh engine is **inactive**: it accepts no moves until the
/// registry activates it when the second participant joins.
#[derive(Debug, Clone)]
pub struct Engine {
    cells: Board,
    turn: Mark,
    active: bool,
    verdict: Option<Verdict>,
    participants: BTreeMap<ClientId, Participant>,
}

impl Engine {
    /// Creates an inactive engine with an empty board. `X` moves first
    /// once the game is activated.
    pub fn new() -> Self {
        Self {
            cells: [None; CELL_COUNT],
            turn: Mark::X,
            active: false,
            verdict: None,
            participants: BTreeMap::new(),
        }
    }

    /// Attempts to place the mover's mark at `index`.
    ///
    /// Preconditions, checked in order: the engine is active, the cell
    /// is empty (an out-of-range index counts as unplayable), and the
    /// mark seated for `client` holds the turn. Any failure yields
    /// [`MoveOutcome::Rejected`] with no state change.
    ///
    /// On acceptance, terminal conditions are evaluated in order: a
    /// completed winning triple, then a full board (draw), else the
    /// turn flips and the game stays active.
    pub fn attempt_move(&mut self, index: usize, client: ClientId) -> MoveOutcome {
        if !self.active {
            return MoveOutcome::Rejected;
        }
        if index >= CELL_COUNT || self.cells[index].is_some() {
            return MoveOutcome::Rejected;
        }
        let mark = match self.participants.get(&client) {
            Some(seat) if seat.mark == self.turn => seat.mark,
            _ => return MoveOutcome::Rejected,
        };

        self.cells[index] = Some(mark);

        let verdict = if self.has_winning_line(mark) {
            Some(Verdict::Win(mark))
        } else if self.cells.iter().all(Option::is_some) {
            Some(Verdict::Draw)
        } else {
            None
        };

        match verdict {
            Some(v) => {
                self.verdict = Some(v);
                self.active = false;
            }
            None => self.turn = mark.other(),
        }

        MoveOutcome::Accepted(AppliedMove {
            index,
            mark,
            verdict,
        })
    }

    /// Clears the board for a rematch: empty cells, `X` to move, game
    /// active, no verdict. Participants keep their seats and marks.
    pub fn reset(&mut self) {
        self.cells = [None; CELL_COUNT];
        self.turn = Mark::X;
        self.active = true;
        self.verdict = None;
    }

    fn has_winning_line(&self, mark: Mark) -> bool {
        WIN_LINES
            .iter()
            .any(|line| line.iter().all(|&i| self.cells[i] == Some(mark)))
    }

    // -- Participants -----------------------------------------------------

    /// Seats a player with the given name and mark.
    pub fn seat(&mut self, client: ClientId, name: impl Into<String>, mark: Mark, creator: bool) {
        self.participants.insert(
            client,
            Participant {
                name: name.into(),
                mark,
                creator,
            },
        );
    }

    /// Removes a player's seat, returning it if they were seated.
    pub fn remove_participant(&mut self, client: ClientId) -> Option<Participant> {
        self.participants.remove(&client)
    }

    /// Looks up the seat for a connection.
    pub fn participant(&self, client: ClientId) -> Option<&Participant> {
        self.participants.get(&client)
    }

    /// All seated participants, keyed by connection.
    pub fn participants(&self) -> &BTreeMap<ClientId, Participant> {
        &self.participants
    }

    /// The display name of the participant holding `mark`, if seated.
    /// Used to resolve the winner name for a `gameOver` broadcast.
    pub fn name_of(&self, mark: Mark) -> Option<&str> {
        self.participants
            .values()
            .find(|seat| seat.mark == mark)
            .map(|seat| seat.name.as_str())
    }

    // -- Activity ---------------------------------------------------------

    /// Starts accepting moves. Called when the second participant joins.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Stops accepting moves without touching the board. Called when a
    /// participant departs mid-game.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    // -- Read accessors ---------------------------------------------------

    /// Whether moves are currently accepted.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Which mark moves next.
    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// The current board.
    pub fn board(&self) -> Board {
        self.cells
    }

    /// The terminal outcome, if the game has ended.
    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Tests
// =========================================================================
