//! Container layout computation
//!
//! Clocks are laid out edge to edge in a single row or column. The container
//! is sized to fit them exactly and pinned to one corner of the screen.

use worldclock_types::LayoutConfig;

/// Axis-aligned rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x
            && x < self.x + self.width as i32
            && y >= self.y
            && y < self.y + self.height as i32
    }
}

/// Result of a relayout: where every clock goes and where the container goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    /// Container geometry in screen coordinates
    pub container: Rect,
    /// One cell per clock, in display order, relative to the container
    pub cells: Vec<Rect>,
    pub always_on_top: bool,
}

/// Cell of the clock at `index` (relative to the container)
pub fn cell_at(index: usize, cell_size: (u32, u32), config: &LayoutConfig) -> Rect {
    let (cell_width, cell_height) = cell_size;
    let (dx, dy) = if config.vertical {
        (0, cell_height as i32)
    } else {
        (cell_width as i32, 0)
    };
    Rect::new(dx * index as i32, dy * index as i32, cell_width, cell_height)
}

/// Compute the layout for `count` clocks.
///
/// A container larger than the screen ends up with a negative origin when
/// pinned to the right or bottom edge.
pub fn plan(
    count: usize,
    cell_size: (u32, u32),
    config: &LayoutConfig,
    screen_size: (u32, u32),
) -> LayoutPlan {
    let (cell_width, cell_height) = cell_size;
    let n = count as u32;
    let (width, height) = if config.vertical {
        (cell_width, cell_height * n)
    } else {
        (cell_width * n, cell_height)
    };

    let (screen_width, screen_height) = screen_size;
    let x = if config.align_right {
        screen_width as i32 - width as i32
    } else {
        0
    };
    let y = if config.align_bottom {
        screen_height as i32 - height as i32
    } else {
        0
    };

    LayoutPlan {
        container: Rect::new(x, y, width, height),
        cells: (0..count)
            .map(|index| cell_at(index, cell_size, config))
            .collect(),
        always_on_top: config.always_on_top,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CELL: (u32, u32) = (118, 49);
    const SCREEN: (u32, u32) = (1920, 1080);

    #[test]
    fn horizontal_row_has_no_gaps() {
        let plan = plan(3, CELL, &LayoutConfig::default(), SCREEN);
        let xs: Vec<i32> = plan.cells.iter().map(|c| c.x).collect();
        assert_eq!(xs, vec![0, 118, 236]);
        assert!(plan.cells.iter().all(|c| c.y == 0));
        assert_eq!(plan.container, Rect::new(0, 0, 354, 49));
    }

    #[test]
    fn vertical_column_stacks_cells() {
        let config = LayoutConfig {
            vertical: true,
            ..Default::default()
        };
        let plan = plan(3, CELL, &config, SCREEN);
        let ys: Vec<i32> = plan.cells.iter().map(|c| c.y).collect();
        assert_eq!(ys, vec![0, 49, 98]);
        assert_eq!(plan.container.width, 118);
        assert_eq!(plan.container.height, 147);
    }

    #[test]
    fn align_right_pins_to_screen_edge() {
        let config = LayoutConfig {
            align_right: true,
            ..Default::default()
        };
        let plan = plan(3, CELL, &config, SCREEN);
        assert_eq!(plan.container.x, 1566);
        assert_eq!(plan.container.y, 0);
    }

    #[test]
    fn lower_right_vertical() {
        let config = LayoutConfig {
            align_right: true,
            align_bottom: true,
            vertical: true,
            always_on_top: true,
        };
        let plan = plan(2, CELL, &config, SCREEN);
        assert_eq!(plan.container, Rect::new(1920 - 118, 1080 - 98, 118, 98));
        assert!(plan.always_on_top);
    }

    #[test]
    fn oversized_container_goes_negative() {
        let config = LayoutConfig {
            align_right: true,
            ..Default::default()
        };
        let plan = plan(20, CELL, &config, SCREEN);
        assert_eq!(plan.container.x, 1920 - 118 * 20);
    }

    #[test]
    fn rect_contains_is_half_open() {
        let rect = Rect::new(118, 0, 118, 49);
        assert!(rect.contains(118, 0));
        assert!(rect.contains(235, 48));
        assert!(!rect.contains(236, 10));
        assert!(!rect.contains(117, 10));
        assert!(!rect.contains(120, 49));
    }
}
