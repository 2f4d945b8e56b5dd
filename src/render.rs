//! TUI rendering traits for recur-core types.
//!
//! Extension traits that add colored terminal rendering using owo_colors.

use chrono::{Datelike, NaiveDate};
use owo_colors::{OwoColorize, Style};
use recur_core::calendar::{DayCell, DayMark, MonthGrid};
use recur_core::date_util::format_preview_date;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Grid columns are two characters wide with a single space between them.
const WEEKDAY_HEADER: &str = "Su Mo Tu We Th Fr Sa";

impl Render for DayCell {
    fn render(&self) -> String {
        let label = format!("{:>2}", self.date.day());

        let mut style = match self.mark {
            DayMark::Start => Style::new().black().on_green().bold(),
            DayMark::Recurring => Style::new().cyan().bold(),
            DayMark::Plain => Style::new(),
        };
        if !self.in_month {
            style = style.dimmed();
        }
        if self.is_today {
            style = style.underline();
        }

        label.style(style).to_string()
    }
}

impl Render for MonthGrid {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        let title = self.view.title();
        lines.push(format!("{:^width$}", title, width = WEEKDAY_HEADER.len()).bold().to_string());
        lines.push(WEEKDAY_HEADER.dimmed().to_string());

        for week in self.weeks() {
            let cells: Vec<String> = week.iter().map(Render::render).collect();
            lines.push(cells.join(" "));
        }

        lines.join("\n")
    }
}

/// Legend explaining the grid highlights.
pub fn render_legend() -> String {
    format!(
        "{} start  {} recurring  {} today",
        "  ".on_green(),
        "●".cyan(),
        "__".underline()
    )
}

/// One line of an occurrence list, e.g. " 3. Mon, Sep 15, 2025"
pub fn render_occurrence(position: usize, date: NaiveDate) -> String {
    let number = format!("{position:>3}.");
    format!("{} {}", number.dimmed(), format_preview_date(date))
}
