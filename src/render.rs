//! Plain-text rendering of stored team splits

use std::fmt::Write;

use crate::model::{Player, TeamMetadata, TeamSplit};

/// What to show next to each player name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub show_skill: bool,
    pub show_position: bool,
    pub show_guest: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_skill: true,
            show_position: true,
            show_guest: true,
        }
    }
}

/// One player line
pub fn render_player(player: &Player, options: RenderOptions) -> String {
    let mut line = player.name().to_string();
    if options.show_skill {
        let _ = write!(line, "  💪{}", player.skill());
    }
    if options.show_position {
        let _ = write!(line, "  {}", player.position().emoji());
    }
    if options.show_guest && player.is_guest() {
        line.push_str("  👤");
    }
    line
}

/// Full team listing with metrics
///
/// Teams are labeled by jersey color when the metadata has one, otherwise
/// by number.
pub fn render_team_split(
    split: &TeamSplit,
    metadata: Option<&TeamMetadata>,
    options: RenderOptions,
) -> String {
    let (label_1, label_2) = match metadata {
        Some(meta) => (meta.team_1_label(), meta.team_2_label()),
        None => ("1", "2"),
    };

    let mut out = String::new();
    let _ = writeln!(out, "Date: {}", split.date);
    out.push('\n');
    render_team(&mut out, label_1, &split.team_1, options);
    out.push('\n');
    render_team(&mut out, label_2, &split.team_2, options);
    out.push('\n');

    let metrics = &split.metrics;
    let _ = writeln!(out, "Goalie number difference: {}", metrics.goalie_count_diff);
    let _ = writeln!(out, "Defense number difference: {}", metrics.defense_count_diff);
    let _ = writeln!(out, "Skill difference: {}", metrics.skill_diff);
    let _ = write!(out, "Defense skill difference: {}", metrics.defense_skill_diff);
    out
}

fn render_team(out: &mut String, label: &str, team: &[Player], options: RenderOptions) {
    let _ = writeln!(out, "Team {}: ({})", label, team.len());
    for player in team {
        out.push_str(&render_player(player, options));
        out.push('\n');
    }
}

/// Message about how many goalies registered for practice
pub fn goalie_notice(goalie_count: usize) -> &'static str {
    match goalie_count {
        0 => "Oh-oh! No goalie registered for today's practice yet. Please reach out to other goalies.",
        1 => "Attention! Only 1 goalie registered for today's practice! Please reach out to other goalies.",
        2 => "Good news! There are exactly 2 goalies registered for today's practice.",
        _ => "Ok, it looks like more than 2 goalies registered for today's practice. I guess we will make it work somehow.",
    }
}
