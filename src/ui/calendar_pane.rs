use crate::app::AppState;
use crate::domain::format_hm;
use crate::report::month_summary;
use crate::store::today;
use crate::ui::styles::{
    border_style, checked_in_style, default_style, idle_style, muted_style, title_style,
    today_style,
};
use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

const CELL_WIDTH: usize = 9;
const WEEKDAYS: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

const MONTH_NAMES: [&str; 12] = [
    "JANUARY", "FEBRUARY", "MARCH", "APRIL", "MAY", "JUNE", "JULY", "AUGUST", "SEPTEMBER",
    "OCTOBER", "NOVEMBER", "DECEMBER",
];

/// Number of days in a month
fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(0)
}

/// Build the month grid as weeks of optional day numbers, padded with
/// None before the first day's weekday (weeks start on Sunday)
fn month_grid(year: i32, month: u32) -> Vec<Vec<Option<u32>>> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let lead = first.weekday().num_days_from_sunday() as usize;

    let mut cells: Vec<Option<u32>> = vec![None; lead];
    cells.extend((1..=days_in_month(year, month)).map(Some));
    while cells.len() % 7 != 0 {
        cells.push(None);
    }

    cells.chunks(7).map(|week| week.to_vec()).collect()
}

fn pad_cell(content: &str) -> String {
    format!("{:<width$}", content, width = CELL_WIDTH)
}

/// Render the daily check-in calendar page
pub fn render_calendar_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let year = app.calendar_month.year();
    let month = app.calendar_month.month();
    let today = today();

    let mut items: Vec<ListItem> = Vec::new();

    // Weekday header
    let header: String = WEEKDAYS.iter().map(|day| pad_cell(day)).collect();
    items.push(ListItem::new(Line::from(Span::styled(header, muted_style()))));

    for week in month_grid(year, month) {
        let mut day_spans = Vec::new();
        let mut time_spans = Vec::new();

        for cell in week {
            match cell.and_then(|day| NaiveDate::from_ymd_opt(year, month, day)) {
                Some(date) => {
                    let seconds = app.checkins.work_time(date);

                    let day_style = if date == today {
                        today_style()
                    } else if seconds > 0 {
                        checked_in_style()
                    } else {
                        default_style()
                    };
                    day_spans.push(Span::styled(pad_cell(&date.day().to_string()), day_style));

                    // Check-in stamp under the day number
                    let stamp = if seconds > 0 { format_hm(seconds) } else { String::new() };
                    time_spans.push(Span::styled(pad_cell(&stamp), checked_in_style()));
                }
                None => {
                    day_spans.push(Span::raw(pad_cell("")));
                    time_spans.push(Span::raw(pad_cell("")));
                }
            }
        }

        items.push(ListItem::new(Line::from(day_spans)));
        items.push(ListItem::new(Line::from(time_spans)));
    }

    // Monthly statistics
    let summary = month_summary(&app.checkins, year, month);
    items.push(ListItem::new(Line::raw("")));
    items.push(ListItem::new(Line::from(vec![
        Span::styled("MONTHLY TOTAL  ".to_string(), idle_style()),
        Span::styled(format_hm(summary.total_seconds), title_style()),
        Span::styled(
            format!("   WORK DAYS  {}", summary.work_days),
            idle_style(),
        ),
    ])));

    let month_name = MONTH_NAMES[(month - 1) as usize];
    let title = format!(" Check-In · {} {} ", month_name, year);

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(list, area);
}
