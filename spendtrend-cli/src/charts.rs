//! Full-screen terminal charts for the trend report: a bar chart of totals,
//! then a heatmap strip of transaction counts. Each view blocks until the
//! user dismisses it.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
};
use spendtrend_core::TrendRow;
use std::io::{self, Stdout};

const HINT: &str = "q / Esc / Enter to continue";

/// Viridis, dark to bright.
const PALETTE: [(u8, u8, u8); 6] = [
    (68, 1, 84),
    (65, 68, 135),
    (42, 120, 142),
    (34, 168, 132),
    (122, 209, 81),
    (253, 231, 37),
];

#[derive(Debug, Clone, PartialEq)]
pub struct BarDatum {
    pub label: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatCell {
    pub label: String,
    pub count: usize,
    /// Index into the palette
    pub level: usize,
}

/// Totals per description, largest first.
pub fn bar_series(trends: &[TrendRow]) -> Vec<BarDatum> {
    let mut bars: Vec<BarDatum> = trends
        .iter()
        .map(|t| BarDatum {
            label: t.description.clone(),
            total: t.amount_sum,
        })
        .collect();
    bars.sort_by(|a, b| b.total.total_cmp(&a.total));
    bars
}

/// Counts per description in label order, each scaled onto the palette.
pub fn heat_cells(trends: &[TrendRow]) -> Vec<HeatCell> {
    let min = trends.iter().map(|t| t.transaction_count).min().unwrap_or(0);
    let max = trends.iter().map(|t| t.transaction_count).max().unwrap_or(0);
    let top = PALETTE.len() - 1;

    let mut cells: Vec<HeatCell> = trends
        .iter()
        .map(|t| {
            let level = if max == min {
                top
            } else {
                ((t.transaction_count - min) * top + (max - min) / 2) / (max - min)
            };
            HeatCell {
                label: t.description.clone(),
                count: t.transaction_count,
                level,
            }
        })
        .collect();
    cells.sort_by(|a, b| a.label.cmp(&b.label));
    cells
}

/// Show the bar chart, then the heatmap.
pub fn show_charts(trends: &[TrendRow]) -> Result<()> {
    if trends.is_empty() {
        log::warn!("no recurring transactions to chart");
        return Ok(());
    }

    let bars = bar_series(trends);
    run_view(|f| draw_bar_chart(f, &bars))?;

    let cells = heat_cells(trends);
    run_view(|f| draw_heatmap(f, &cells))?;
    Ok(())
}

fn run_view(draw: impl Fn(&mut Frame)) -> Result<()> {
    bracket(enable_raw_mode, disable_raw_mode, || {
        bracket(
            || execute!(io::stdout(), EnterAlternateScreen),
            || execute!(io::stdout(), LeaveAlternateScreen),
            || {
                let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
                let res = view_loop(&mut terminal, &draw);
                terminal.show_cursor()?;
                res
            },
        )
    })
}

/// Run `body` between `enter` and `leave`. Once `enter` succeeds, `leave`
/// runs on every path; an error from `body` wins over one from `leave`.
fn bracket<T>(
    enter: impl FnOnce() -> io::Result<()>,
    leave: impl FnOnce() -> io::Result<()>,
    body: impl FnOnce() -> Result<T>,
) -> Result<T> {
    enter()?;
    let res = body();
    let left = leave();
    let out = res?;
    left?;
    Ok(out)
}

fn view_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    draw: &impl Fn(&mut Frame),
) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => break,
                _ => {}
            }
        }
    }
    Ok(())
}

fn split_with_hint(f: &mut Frame) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());
    (chunks[0], chunks[1])
}

fn hint() -> Paragraph<'static> {
    Paragraph::new(HINT).style(Style::default().fg(Color::Gray))
}

fn draw_bar_chart(f: &mut Frame, bars: &[BarDatum]) {
    let (body, footer) = split_with_hint(f);

    let data: Vec<Bar> = bars
        .iter()
        .map(|b| {
            Bar::default()
                .value((b.total.abs() * 100.0).round() as u64)
                .label(Line::from(b.label.clone()))
                .text_value(format!("{:.2}", b.total))
                .style(Style::default().fg(Color::Cyan))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Total Amount by Description ($)"),
        )
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&data));

    f.render_widget(chart, body);
    f.render_widget(hint(), footer);
}

fn draw_heatmap(f: &mut Frame, cells: &[HeatCell]) {
    let (body, footer) = split_with_hint(f);

    let mut lines: Vec<Line> = cells
        .iter()
        .map(|c| {
            let (r, g, b) = PALETTE[c.level];
            Line::from(vec![
                Span::styled("      ", Style::default().bg(Color::Rgb(r, g, b))),
                Span::raw(format!(" {:>4}  ", c.count)),
                Span::raw(c.label.clone()),
            ])
        })
        .collect();

    lines.push(Line::raw(""));
    let mut legend = vec![Span::styled(
        "Transaction Count  ",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    legend.extend(
        PALETTE
            .iter()
            .map(|&(r, g, b)| Span::styled("  ", Style::default().bg(Color::Rgb(r, g, b)))),
    );
    if let (Some(lo), Some(hi)) = (
        cells.iter().map(|c| c.count).min(),
        cells.iter().map(|c| c.count).max(),
    ) {
        legend.push(Span::raw(format!("  {lo} .. {hi}")));
    }
    lines.push(Line::from(legend));

    let heatmap = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Heatmap of Transaction Counts by Description"),
    );

    f.render_widget(heatmap, body);
    f.render_widget(hint(), footer);
}
