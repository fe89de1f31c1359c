use std::collections::HashMap;
use std::hash::Hash;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    pub fn beats(self, other: Choice) -> bool {
        matches!(
            (self, other),
            (Choice::Rock, Choice::Scissors)
                | (Choice::Scissors, Choice::Paper)
                | (Choice::Paper, Choice::Rock)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Choice::Rock => "rock",
            Choice::Paper => "paper",
            Choice::Scissors => "scissors",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Choice::Rock => ":bricks:",
            Choice::Paper => ":roll_of_paper:",
            Choice::Scissors => ":scissors:",
        }
    }
}

impl std::fmt::Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Choice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rock" => Ok(Choice::Rock),
            "paper" => Ok(Choice::Paper),
            "scissors" => Ok(Choice::Scissors),
            other => Err(format!("unknown choice `{other}`")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Duel {
    Tie,
    First,
    Second,
}

pub fn determine_winner(first: Choice, second: Choice) -> Duel {
    if first == second {
        Duel::Tie
    } else if first.beats(second) {
        Duel::First
    } else {
        Duel::Second
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome<P> {
    Tie,
    Winner(P),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase<P> {
    WaitingForOpponent,
    WaitingForChoices,
    Resolved(Outcome<P>),
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RpsError {
    #[error("you can't join this game")]
    CannotJoin,
    #[error("you are not part of this game")]
    NotAPlayer,
    #[error("this game is already over")]
    Finished,
}

/// Two-player round; the creator is seated first.
#[derive(Debug)]
pub struct RpsGame<P> {
    players: Vec<P>,
    choices: HashMap<P, Choice>,
}

impl<P: Copy + Eq + Hash> RpsGame<P> {
    pub fn new(creator: P) -> Self {
        Self {
            players: vec![creator],
            choices: HashMap::new(),
        }
    }

    pub fn players(&self) -> &[P] {
        &self.players
    }

    pub fn join(&mut self, player: P) -> Result<(), RpsError> {
        if self.players.len() >= 2 || self.players.contains(&player) {
            return Err(RpsError::CannotJoin);
        }
        self.players.push(player);
        Ok(())
    }

    /// A player may pick before the opponent arrives; picking again
    /// overwrites until the round resolves.
    pub fn choose(&mut self, player: P, choice: Choice) -> Result<Phase<P>, RpsError> {
        if !self.players.contains(&player) {
            return Err(RpsError::NotAPlayer);
        }
        if matches!(self.phase(), Phase::Resolved(_)) {
            return Err(RpsError::Finished);
        }
        self.choices.insert(player, choice);
        Ok(self.phase())
    }

    pub fn choice_of(&self, player: P) -> Option<Choice> {
        self.choices.get(&player).copied()
    }

    pub fn is_ready(&self) -> bool {
        self.players.len() == 2 && self.players.iter().all(|p| self.choices.contains_key(p))
    }

    pub fn phase(&self) -> Phase<P> {
        if self.players.len() < 2 {
            return Phase::WaitingForOpponent;
        }
        if !self.is_ready() {
            return Phase::WaitingForChoices;
        }
        let (p1, p2) = (self.players[0], self.players[1]);
        let outcome = match determine_winner(self.choices[&p1], self.choices[&p2]) {
            Duel::Tie => Outcome::Tie,
            Duel::First => Outcome::Winner(p1),
            Duel::Second => Outcome::Winner(p2),
        };
        Phase::Resolved(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determine_winner_all_pairs() {
        let mut ties = 0;
        let mut firsts = 0;
        let mut seconds = 0;
        for a in Choice::ALL {
            for b in Choice::ALL {
                match determine_winner(a, b) {
                    Duel::Tie => {
                        assert_eq!(a, b);
                        ties += 1;
                    }
                    Duel::First => {
                        assert!(a.beats(b));
                        firsts += 1;
                    }
                    Duel::Second => {
                        assert!(b.beats(a));
                        seconds += 1;
                    }
                }
            }
        }
        assert_eq!((ties, firsts, seconds), (3, 3, 3));
        assert_eq!(determine_winner(Choice::Rock, Choice::Scissors), Duel::First);
        assert_eq!(determine_winner(Choice::Rock, Choice::Paper), Duel::Second);
        assert_eq!(determine_winner(Choice::Scissors, Choice::Paper), Duel::First);
    }

    #[test]
    fn test_phases() {
        let mut game = RpsGame::new(1u64);
        assert_eq!(game.phase(), Phase::WaitingForOpponent);

        assert_eq!(game.choose(1, Choice::Paper), Ok(Phase::WaitingForOpponent));
        game.join(2).unwrap();
        assert_eq!(game.phase(), Phase::WaitingForChoices);

        assert_eq!(
            game.choose(2, Choice::Scissors),
            Ok(Phase::Resolved(Outcome::Winner(2)))
        );
        assert_eq!(game.choose(1, Choice::Rock), Err(RpsError::Finished));
    }

    #[test]
    fn test_tie() {
        let mut game = RpsGame::new("a");
        game.join("b").unwrap();
        game.choose("a", Choice::Rock).unwrap();
        assert_eq!(
            game.choose("b", Choice::Rock),
            Ok(Phase::Resolved(Outcome::Tie))
        );
    }

    #[test]
    fn test_join_rules() {
        let mut game = RpsGame::new(1u64);
        assert_eq!(game.join(1), Err(RpsError::CannotJoin));
        game.join(2).unwrap();
        assert_eq!(game.join(3), Err(RpsError::CannotJoin));
        assert_eq!(game.players(), &[1, 2]);
    }

    #[test]
    fn test_outsider_cannot_choose() {
        let mut game = RpsGame::new(1u64);
        assert_eq!(game.choose(9, Choice::Rock), Err(RpsError::NotAPlayer));
    }

    #[test]
    fn test_choice_parse() {
        assert_eq!("Rock".parse::<Choice>(), Ok(Choice::Rock));
        assert!("lizard".parse::<Choice>().is_err());
    }
}
