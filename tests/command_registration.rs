use std::collections::HashSet;

use batrouna_bot::commands;

const EXPECTED: [&str; 23] = [
    "help", "join", "leave", "play", "p", "pause", "resume", "skip", "s", "stop", "loop", "queue",
    "q", "clear", "search", "lyrics", "rps", "xo", "dice", "rr", "rr_stats", "rr_graph",
    "setalarm",
];

#[test]
fn test_all_commands_returns_correct_count() {
    let cmds = commands::all();
    assert_eq!(
        cmds.len(),
        EXPECTED.len(),
        "Expected {} commands, got {}",
        EXPECTED.len(),
        cmds.len()
    );
}

#[test]
fn test_all_commands_contain_expected_names() {
    let cmds = commands::all();
    let names: HashSet<&str> = cmds.iter().map(|cmd| cmd.name.as_str()).collect();

    for name in &EXPECTED {
        assert!(
            names.contains(name),
            "Expected command '{}' not found in commands::all(). Present names: {:?}",
            name,
            names
        );
    }
}

#[test]
fn test_no_duplicate_command_names() {
    let cmds = commands::all();
    let mut seen = HashSet::new();

    for cmd in &cmds {
        assert!(
            seen.insert(cmd.name.as_str()),
            "Duplicate command name found: '{}'",
            cmd.name
        );
    }
}

#[test]
fn test_all_commands_are_prefix_commands() {
    let cmds = commands::all();

    for cmd in &cmds {
        assert!(
            cmd.prefix_action.is_some(),
            "Command '{}' does not have prefix_action set",
            cmd.name
        );
        assert!(cmd.slash_action.is_none(), "Command '{}' is a slash command", cmd.name);
    }
}
