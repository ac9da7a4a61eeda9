use crate::backtracking_search::{Assignment, Choice};
use crate::grid_config::GridConfig;

/// Character printed for blocked cells.
pub const BLOCK_CHAR: char = '█';

/// Lay the assigned words out on the grid. Cells no assigned word passes through are `None`.
pub fn letter_grid(config: &GridConfig, assignment: &Assignment) -> Vec<Vec<Option<char>>> {
    let mut letters = vec![vec![None; config.width]; config.height];

    for Choice { slot_id, word_id } in assignment.choices() {
        let word = config.word(word_id);

        for ((row, col), &glyph) in config.variable(slot_id).cells().zip(&word.glyphs) {
            letters[row][col] = Some(config.word_list.glyphs[glyph]);
        }
    }

    letters
}

/// Turn the given grid config and assignment into a rendered string, one line per row.
pub fn render_grid(config: &GridConfig, assignment: &Assignment) -> String {
    let letters = letter_grid(config, assignment);

    config.structure.iter().zip(&letters).map(|(structure_row, letter_row)| {
        structure_row.iter().zip(letter_row).map(|(&open, letter)| {
            if open {
                letter.unwrap_or(' ')
            } else {
                BLOCK_CHAR
            }
        }).collect::<String>()
    }).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use crate::backtracking_search::Assignment;
    use crate::grid_config::generate_grid_config_from_template_string;
    use crate::render::{letter_grid, render_grid};
    use crate::word_list::WordList;

    #[test]
    fn test_render_partial_assignment() {
        let config = generate_grid_config_from_template_string(
            WordList::new(["cat", "cow"]),
            "___\n_##\n_##\n",
        ).unwrap();

        let mut assignment = Assignment::new();
        assignment.assign(0, 0);
        assert_eq!(render_grid(&config, &assignment), "CAT\n ██\n ██");

        assignment.assign(1, 1);
        assert_eq!(render_grid(&config, &assignment), "CAT\nO██\nW██");
        assert_eq!(letter_grid(&config, &assignment)[2], vec![Some('W'), None, None]);
    }

    #[test]
    fn test_render_empty_grid() {
        let config =
            generate_grid_config_from_template_string(WordList::default(), "#_\n__").unwrap();

        assert_eq!(render_grid(&config, &Assignment::new()), "█ \n  ");
    }
}
