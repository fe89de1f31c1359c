#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Player slot that owns this mark: X is 0, O is 1.
    pub fn player_index(self) -> usize {
        match self {
            Mark::X => 0,
            Mark::O => 1,
        }
    }

    pub fn for_player(index: usize) -> Self {
        if index % 2 == 0 {
            Mark::X
        } else {
            Mark::O
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mark::X => "X",
            Mark::O => "O",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardState {
    Won(usize),
    Tie,
    InProgress,
}

const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// Cells are addressed `[row][col]`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Mark>; 3]; 3],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: [[Option<Mark>; 3]; 3]) -> Self {
        Self { cells: rows }
    }

    /// `None` for an empty cell or one off the board.
    pub fn get(&self, row: usize, col: usize) -> Option<Mark> {
        self.cells.get(row)?.get(col).copied().flatten()
    }

    /// Player index owning a completed line, if any.
    pub fn check_winner(&self) -> Option<usize> {
        LINES.iter().find_map(|line| {
            let [a, b, c] = line.map(|(r, c)| self.cells[r][c]);
            match (a, b, c) {
                (Some(x), Some(y), Some(z)) if x == y && y == z => Some(x.player_index()),
                _ => None,
            }
        })
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    pub fn state(&self) -> BoardState {
        match self.check_winner() {
            Some(player) => BoardState::Won(player),
            None if self.is_full() => BoardState::Tie,
            None => BoardState::InProgress,
        }
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("it's not your turn")]
    NotYourTurn,
    #[error("that square is taken")]
    Occupied,
    #[error("this game is already over")]
    Finished,
    #[error("you can't join this game")]
    CannotJoin,
    #[error("that square is off the board")]
    OutOfRange,
}

/// X (the creator) moves first; O is whoever joins.
#[derive(Debug)]
pub struct TicTacToe<P> {
    board: Board,
    players: [Option<P>; 2],
    turn: usize,
}

impl<P: Copy + Eq> TicTacToe<P> {
    pub fn new(creator: P) -> Self {
        Self {
            board: Board::new(),
            players: [Some(creator), None],
            turn: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player(&self, index: usize) -> Option<P> {
        self.players.get(index).copied().flatten()
    }

    pub fn current_player(&self) -> usize {
        self.turn
    }

    pub fn join(&mut self, player: P) -> Result<(), MoveError> {
        if self.players[1].is_some() || self.players[0] == Some(player) {
            return Err(MoveError::CannotJoin);
        }
        self.players[1] = Some(player);
        Ok(())
    }

    pub fn play(&mut self, player: P, row: usize, col: usize) -> Result<BoardState, MoveError> {
        if row >= 3 || col >= 3 {
            return Err(MoveError::OutOfRange);
        }
        if self.board.state() != BoardState::InProgress {
            return Err(MoveError::Finished);
        }
        if self.players[self.turn] != Some(player) {
            return Err(MoveError::NotYourTurn);
        }
        if self.board.cells[row][col].is_some() {
            return Err(MoveError::Occupied);
        }
        self.board.cells[row][col] = Some(Mark::for_player(self.turn));
        self.turn = 1 - self.turn;
        Ok(self.board.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: Option<Mark> = Some(Mark::X);
    const O: Option<Mark> = Some(Mark::O);
    const E: Option<Mark> = None;

    #[test]
    fn test_rows_columns_diagonals() {
        assert_eq!(Board::from_rows([[O, O, O], [X, X, E], [X, E, E]]).check_winner(), Some(1));
        assert_eq!(Board::from_rows([[X, O, E], [X, O, E], [X, E, E]]).check_winner(), Some(0));
        assert_eq!(Board::from_rows([[E, O, X], [E, X, O], [X, E, E]]).check_winner(), Some(0));
        assert_eq!(Board::from_rows([[O, X, X], [E, O, E], [X, E, O]]).check_winner(), Some(1));
    }

    #[test]
    fn test_full_board_without_line_is_tie() {
        let board = Board::from_rows([[X, O, X], [X, O, O], [O, X, X]]);
        assert_eq!(board.check_winner(), None);
        assert_eq!(board.state(), BoardState::Tie);
    }

    #[test]
    fn test_partial_board_in_progress() {
        let board = Board::from_rows([[X, O, E], [E, X, E], [E, E, O]]);
        assert_eq!(board.state(), BoardState::InProgress);
        assert_eq!(Board::new().state(), BoardState::InProgress);
    }

    #[test]
    fn test_turns_and_win() {
        let mut game = TicTacToe::new(10u64);
        assert_eq!(game.play(20, 0, 0), Err(MoveError::NotYourTurn));
        assert_eq!(game.play(10, 0, 0), Ok(BoardState::InProgress));
        // O's seat is still empty
        assert_eq!(game.play(10, 1, 0), Err(MoveError::NotYourTurn));

        game.join(20).unwrap();
        assert_eq!(game.play(20, 0, 0), Err(MoveError::Occupied));
        assert_eq!(game.play(20, 1, 0), Ok(BoardState::InProgress));
        assert_eq!(game.play(10, 0, 1), Ok(BoardState::InProgress));
        assert_eq!(game.play(20, 1, 1), Ok(BoardState::InProgress));
        assert_eq!(game.play(10, 0, 2), Ok(BoardState::Won(0)));
        assert_eq!(game.play(20, 2, 2), Err(MoveError::Finished));
    }

    #[test]
    fn test_join_rules() {
        let mut game = TicTacToe::new(1u64);
        assert_eq!(game.join(1), Err(MoveError::CannotJoin));
        game.join(2).unwrap();
        assert_eq!(game.join(3), Err(MoveError::CannotJoin));
        assert_eq!(game.player(1), Some(2));
    }

    #[test]
    fn test_off_board_cells() {
        let mut game = TicTacToe::new(1u64);
        assert_eq!(game.play(1, 3, 0), Err(MoveError::OutOfRange));
        assert_eq!(game.play(1, 0, 7), Err(MoveError::OutOfRange));
        assert_eq!(game.board().get(3, 3), None);
        // the rejected moves don't consume the turn
        assert_eq!(game.play(1, 0, 0), Ok(BoardState::InProgress));
        assert_eq!(game.board().get(0, 0), Some(Mark::X));
    }
}
