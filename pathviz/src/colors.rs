//! Board palette.

use pathviz_core::{AttrMask, CellState, Color, Style};

pub const LIGHT_GRAY: Color = Color::from_rgb(170, 170, 170);
pub const DARK_GRAY: Color = Color::from_rgb(100, 100, 100);
/// Walls. Pure black is [`Color::DEFAULT`], which means "terminal default".
pub const WALL: Color = Color::from_rgb(16, 16, 16);
pub const RED: Color = Color::from_rgb(255, 0, 0);
pub const GREEN: Color = Color::from_rgb(0, 255, 0);
pub const ORANGE: Color = Color::from_rgb(242, 153, 48);
pub const BLUE: Color = Color::from_rgb(84, 103, 176);

// -- Text --

pub const FG: Color = Color::DEFAULT;
pub const FG_DIM: Color = Color::from_rgb(130, 130, 140);
pub const FG_OK: Color = GREEN;
pub const FG_ERR: Color = Color::from_rgb(255, 85, 85);

/// Fill colour of a board cell.
pub const fn cell_color(state: CellState) -> Color {
    match state {
        CellState::Empty => LIGHT_GRAY,
        CellState::Visited => DARK_GRAY,
        CellState::Wall => WALL,
        CellState::Start => RED,
        CellState::Goal => GREEN,
        CellState::Path => ORANGE,
        CellState::Frontier => BLUE,
    }
}

/// Style of a board cell drawn as solid background.
pub const fn cell_style(state: CellState) -> Style {
    Style {
        fg: FG,
        bg: cell_color(state),
        attrs: AttrMask::NONE,
    }
}
