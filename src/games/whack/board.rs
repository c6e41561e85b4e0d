use std::{mem, time::Duration};

use rand::Rng;
use twilight_model::channel::message::{
    component::{ActionRow, Button, ButtonStyle, Component},
    embed::Embed,
    ReactionType,
};

use crate::util::{constants::RED, datetime::humanize_duration, EmbedBuilder};

use super::LastWinner;

pub(super) const MOLE_EMOJI: &[&str] = &["🐹", "🐭", "🦫", "🐿️"];
pub(super) const GRASS_EMOJI: &[&str] = &["⛳"];

const HEADER: &str = "WHACK THAT MOLE";
const HEADER_WON: &str = "WHACK A MOLE - WHACKED";

/// Everything the renderer needs; recomputed from [`Game`](super::Game)
/// state each tick, never stored.
pub(super) struct BoardParams {
    pub total_cells: usize,
    pub rows: usize,
    pub target: usize,
    pub elapsed: Duration,
    pub last_winner: Option<LastWinner>,
}

pub(super) struct BoardPayload {
    pub embed: Embed,
    pub components: Vec<Component>,
}

/// Render the running board: header, status line, and the button grid
/// with the target cell dressed up as a mole.
pub(super) fn render(params: &BoardParams, rng: &mut impl Rng) -> BoardPayload {
    let elapsed = humanize_duration(params.elapsed);

    let status = match params.last_winner {
        Some(LastWinner { user, duration }) => format!(
            "current game running for: {elapsed}, \
            <@{user}> was the last winner in {last}",
            last = humanize_duration(duration)
        ),
        None => format!("current game running for: {elapsed}"),
    };

    let embed = EmbedBuilder::new()
        .title(HEADER)
        .description(status)
        .build();

    BoardPayload {
        embed,
        components: grid(params, false, rng),
    }
}

/// Render the terminal board: same grid but disabled, the mole frozen
/// on the winning cell, and the winner announced in the status line.
pub(super) fn render_won(
    params: &BoardParams,
    winner: LastWinner,
    rng: &mut impl Rng,
) -> BoardPayload {
    let status = format!(
        "<@{user}> WON in {duration}",
        user = winner.user,
        duration = humanize_duration(winner.duration)
    );

    let embed = EmbedBuilder::new()
        .title(HEADER_WON)
        .description(status)
        .color(RED)
        .build();

    BoardPayload {
        embed,
        components: grid(params, true, rng),
    }
}

fn grid(params: &BoardParams, disabled: bool, rng: &mut impl Rng) -> Vec<Component> {
    // Settings validation guarantees divisibility
    let cells_per_row = params.total_cells / params.rows;

    let mut rows = Vec::with_capacity(params.rows);
    let mut in_progress_row = Vec::with_capacity(cells_per_row);

    for cell in 0..params.total_cells {
        let emoji = if cell == params.target {
            rand_item(rng, MOLE_EMOJI)
        } else {
            rand_item(rng, GRASS_EMOJI)
        };

        let button = Button {
            custom_id: Some(format!("option_{cell}")),
            disabled,
            emoji: Some(ReactionType::Unicode {
                name: emoji.to_owned(),
            }),
            label: None,
            style: ButtonStyle::Secondary,
            url: None,
        };

        in_progress_row.push(Component::Button(button));

        if in_progress_row.len() == cells_per_row {
            rows.push(Component::ActionRow(ActionRow {
                components: mem::replace(&mut in_progress_row, Vec::with_capacity(cells_per_row)),
            }));
        }
    }

    rows
}

fn rand_item<'i>(rng: &mut impl Rng, items: &'i [&'i str]) -> &'i str {
    items[rng.gen_range(0..items.len())]
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;

    use super::*;

    fn rng() -> StepRng {
        StepRng::new(0, 0x1357_9BDF_0246_8ACE)
    }

    fn params(total_cells: usize, rows: usize, target: usize) -> BoardParams {
        BoardParams {
            total_cells,
            rows,
            target,
            elapsed: Duration::from_secs(3),
            last_winner: None,
        }
    }

    fn buttons(components: &[Component]) -> Vec<&Button> {
        components
            .iter()
            .map(|component| match component {
                Component::ActionRow(row) => row,
                other => panic!("expected action row, got {other:?}"),
            })
            .flat_map(|row| &row.components)
            .map(|component| match component {
                Component::Button(button) => button,
                other => panic!("expected button, got {other:?}"),
            })
            .collect()
    }

    fn is_mole(button: &Button) -> bool {
        match &button.emoji {
            Some(ReactionType::Unicode { name }) => MOLE_EMOJI.contains(&name.as_str()),
            _ => false,
        }
    }

    #[test]
    fn grid_partitions_rows_evenly() {
        let board = render(&params(48, 8, 23), &mut rng());

        assert_eq!(board.components.len(), 8);

        for row in &board.components {
            let Component::ActionRow(row) = row else {
                panic!("expected action row");
            };

            assert_eq!(row.components.len(), 6);
        }
    }

    #[test]
    fn exactly_one_cell_is_the_target() {
        let board = render(&params(48, 8, 23), &mut rng());
        let buttons = buttons(&board.components);

        let moles: Vec<_> = buttons.iter().filter(|button| is_mole(button)).collect();

        assert_eq!(moles.len(), 1);
        assert_eq!(moles[0].custom_id.as_deref(), Some("option_23"));
    }

    #[test]
    fn status_line_shows_last_winner() {
        let mut params = params(20, 4, 7);
        params.last_winner = Some(LastWinner {
            user: twilight_model::id::Id::new(1234),
            duration: Duration::from_millis(5_500),
        });

        let board = render(&params, &mut rng());
        let description = board.embed.description.expect("missing status line");

        assert!(description.contains("<@1234> was the last winner in 5.500 seconds"));
    }

    #[test]
    fn won_board_is_disabled_and_announces_the_winner() {
        let winner = LastWinner {
            user: twilight_model::id::Id::new(99),
            duration: Duration::from_secs(2),
        };

        let board = render_won(&params(20, 4, 7), winner, &mut rng());

        let buttons = buttons(&board.components);
        assert!(buttons.iter().all(|button| button.disabled));
        assert_eq!(buttons.iter().filter(|button| is_mole(button)).count(), 1);

        assert_eq!(board.embed.title.as_deref(), Some(HEADER_WON));
        let description = board.embed.description.expect("missing status line");
        assert_eq!(description, "<@99> WON in 2 seconds");
    }
}
