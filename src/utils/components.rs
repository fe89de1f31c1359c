use serenity::builder::{CreateActionRow, CreateButton};
use serenity::model::application::ButtonStyle;

use crate::games::rps::Choice;
use crate::games::tictactoe::{Board, Mark};

pub const MUSIC_PAUSE: &str = "music_pause";
pub const MUSIC_RESUME: &str = "music_resume";
pub const MUSIC_SKIP: &str = "music_skip";
pub const MUSIC_STOP: &str = "music_stop";

pub fn music_buttons(is_paused: bool) -> CreateActionRow {
    let pause_resume = if is_paused {
        CreateButton::new(MUSIC_RESUME)
            .label("Resume")
            .emoji('▶')
            .style(ButtonStyle::Success)
    } else {
        CreateButton::new(MUSIC_PAUSE)
            .label("Pause")
            .emoji('⏸')
            .style(ButtonStyle::Secondary)
    };

    let skip = CreateButton::new(MUSIC_SKIP)
        .label("Skip")
        .emoji('⏭')
        .style(ButtonStyle::Secondary);

    let stop = CreateButton::new(MUSIC_STOP)
        .label("Stop")
        .emoji('⏹')
        .style(ButtonStyle::Danger);

    CreateActionRow::Buttons(vec![pause_resume, skip, stop])
}

pub fn music_components(is_paused: bool) -> Vec<CreateActionRow> {
    vec![music_buttons(is_paused)]
}

pub fn music_components_disabled() -> Vec<CreateActionRow> {
    vec![CreateActionRow::Buttons(vec![
        CreateButton::new(MUSIC_PAUSE)
            .label("Pause")
            .emoji('⏸')
            .style(ButtonStyle::Secondary)
            .disabled(true),
        CreateButton::new(MUSIC_SKIP)
            .label("Skip")
            .emoji('⏭')
            .style(ButtonStyle::Secondary)
            .disabled(true),
        CreateButton::new(MUSIC_STOP)
            .label("Stop")
            .emoji('⏹')
            .style(ButtonStyle::Danger)
            .disabled(true),
    ])]
}

/// Game buttons are namespaced with the invocation id so two games in one
/// channel never see each other's presses.
pub fn game_id(invocation: u64, action: &str) -> String {
    format!("{invocation}:{action}")
}

pub fn rps_components(invocation: u64, join_open: bool, finished: bool) -> Vec<CreateActionRow> {
    let mut buttons: Vec<CreateButton> = Choice::ALL
        .iter()
        .map(|choice| {
            let (label, emoji) = match choice {
                Choice::Rock => ("Rock", '🧱'),
                Choice::Paper => ("Paper", '🧻'),
                Choice::Scissors => ("Scissors", '✂'),
            };
            CreateButton::new(game_id(invocation, choice.as_str()))
                .label(label)
                .emoji(emoji)
                .style(ButtonStyle::Secondary)
                .disabled(finished)
        })
        .collect();

    buttons.push(
        CreateButton::new(game_id(invocation, "join"))
            .label("JOIN")
            .style(ButtonStyle::Success)
            .disabled(finished || !join_open),
    );

    vec![CreateActionRow::Buttons(buttons)]
}

pub fn xo_components(
    invocation: u64,
    board: &Board,
    join_open: bool,
    finished: bool,
) -> Vec<CreateActionRow> {
    let mut rows: Vec<CreateActionRow> = (0..3)
        .map(|row| {
            let cells = (0..3)
                .map(|col| {
                    let id = game_id(invocation, &format!("cell:{row}:{col}"));
                    match board.get(row, col) {
                        Some(mark) => CreateButton::new(id)
                            .label(mark.as_str())
                            .style(match mark {
                                Mark::X => ButtonStyle::Danger,
                                Mark::O => ButtonStyle::Success,
                            })
                            .disabled(true),
                        None => CreateButton::new(id)
                            .label("\u{200b}")
                            .style(ButtonStyle::Secondary)
                            .disabled(finished),
                    }
                })
                .collect();
            CreateActionRow::Buttons(cells)
        })
        .collect();

    rows.push(CreateActionRow::Buttons(vec![CreateButton::new(game_id(
        invocation, "join",
    ))
    .label("JOIN")
    .style(ButtonStyle::Primary)
    .disabled(finished || !join_open)]));

    rows
}

/// Parses `cell:{row}:{col}` out of an action id.
pub fn parse_cell(action: &str) -> Option<(usize, usize)> {
    let rest = action.strip_prefix("cell:")?;
    let (row, col) = rest.split_once(':')?;
    let (row, col) = (row.parse().ok()?, col.parse().ok()?);
    (row < 3 && col < 3).then_some((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_id_and_parse_cell() {
        assert_eq!(game_id(99, "join"), "99:join");
        assert_eq!(parse_cell("cell:2:1"), Some((2, 1)));
        assert_eq!(parse_cell("cell:3:0"), None);
        assert_eq!(parse_cell("join"), None);
        assert_eq!(parse_cell("cell:x:1"), None);
    }

    #[test]
    fn test_xo_components_layout() {
        let rows = xo_components(1, &Board::new(), true, false);
        assert_eq!(rows.len(), 4);
    }
}
