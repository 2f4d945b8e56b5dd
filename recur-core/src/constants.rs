/// Hard cap on calendar steps taken by a single enumeration.
pub const MAX_ITERATIONS: usize = 1000;

/// Default number of dates shown in the occurrence list.
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// Number of dates enumerated when highlighting a month grid.
pub const DEFAULT_CALENDAR_LIMIT: usize = 100;

/// Number of upcoming dates shown under the pattern summary.
pub const DEFAULT_PREVIEW_COUNT: usize = 5;

/// Cells in a month grid: six Sunday-first weeks.
pub const GRID_CELLS: usize = 42;
