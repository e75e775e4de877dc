pub mod plot;
pub mod screen;

use aimtrain::report::{format_px, Report, MODEL_LINES};
use aimtrain::setup::SetupField;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine, Points},
        Block, Gauge, Paragraph, Widget, Wrap,
    },
};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 2;
const DETAILS_HEIGHT: u16 = 6;

/// Regions of the training screen. `canvas_inner` is the click surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingLayout {
    pub title: Rect,
    pub canvas: Rect,
    pub canvas_inner: Rect,
    pub details: Rect,
    pub panel: Rect,
    pub legend: Rect,
}

pub fn training_layout(area: Rect) -> TrainingLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Min(3),    // canvas + panel
            Constraint::Length(1), // legend
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .split(rows[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(DETAILS_HEIGHT)])
        .split(columns[0]);

    TrainingLayout {
        title: rows[0],
        canvas: left[0],
        canvas_inner: Block::bordered().inner(left[0]),
        details: left[1],
        panel: columns[1],
        legend: rows[2],
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state {
            crate::AppState::Setup => render_setup(self, area, buf),
            crate::AppState::Training => render_training(self, area, buf),
        }
    }
}

pub fn render_setup(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let mut constraints = vec![Constraint::Length(2)];
    constraints.extend(SetupField::ALL.iter().map(|_| Constraint::Length(3)));
    constraints.extend([
        Constraint::Length(2), // error
        Constraint::Min(0),
        Constraint::Length(1), // legend
    ]);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints(constraints)
        .split(area);

    Paragraph::new(Span::styled("Aim Optimizer: Setup", bold_style))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    let form = &app.setup;
    for (i, field) in SetupField::ALL.iter().enumerate() {
        let selected = form.selected_field() == *field;
        let border_style = if selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };

        Gauge::default()
            .block(
                Block::bordered()
                    .title(field.label())
                    .border_style(border_style),
            )
            .gauge_style(Style::default().fg(Color::Red).bg(Color::Black))
            .ratio(form.ratio(*field))
            .label(Span::styled(form.value(*field).to_string(), bold_style))
            .render(chunks[i + 1], buf);
    }

    let error_chunk = SetupField::ALL.len() + 1;
    if let Some(error) = &form.error {
        Paragraph::new(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[error_chunk], buf);
    }

    Paragraph::new(Span::styled(
        "(↑/↓) field / (←/→) adjust / (enter) submit / (esc)ape",
        italic_style,
    ))
    .render(chunks[error_chunk + 2], buf);
}

pub fn render_training(app: &App, area: Rect, buf: &mut Buffer) {
    let layout = training_layout(area);
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    Paragraph::new(Span::styled("Aim Optimizer", bold_style))
        .alignment(Alignment::Center)
        .render(layout.title, buf);

    let Some(session) = app.session.as_ref() else {
        return;
    };

    let report = match session.report() {
        Ok(report) => report,
        Err(e) => {
            log::error!("cannot compute interception: {e}");
            None
        }
    };

    render_canvas(app, report.as_ref(), layout.canvas, buf);
    render_details(app, report.as_ref(), layout.details, buf);
    render_panel(report.as_ref(), layout.panel, buf);

    let legend = match &app.notice {
        Some(notice) => Span::styled(notice.as_str(), Style::default().fg(Color::Yellow)),
        None => Span::styled(
            "(click) crosshair / (n)ew target / (s)ettings / (esc)ape",
            italic_style,
        ),
    };
    Paragraph::new(legend).render(layout.legend, buf);
}

fn render_canvas(app: &App, report: Option<&Report>, area: Rect, buf: &mut Buffer) {
    let Some(session) = app.session.as_ref() else {
        return;
    };
    let screen_width = f64::from(session.config().screen_width);
    let screen_height = f64::from(session.config().screen_height);
    let radius = plot::marker_radius(screen_width);

    let history: Vec<(f64, f64)> = app
        .surface
        .markers()
        .iter()
        .map(|p| plot::to_canvas_xy(*p, screen_height))
        .collect();
    let latest = app
        .surface
        .latest()
        .map(|s| plot::to_canvas_xy(s.position, screen_height));

    Canvas::default()
        .block(Block::bordered().title("Click to Start Training"))
        .marker(Marker::Braille)
        .x_bounds([0.0, screen_width])
        .y_bounds([0.0, screen_height])
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &history,
                color: Color::DarkGray,
            });

            if let Some(report) = report {
                let (ix, iy) = plot::to_canvas_xy(report.target_initial, screen_height);
                let (fx, fy) = plot::to_canvas_xy(report.target_final, screen_height);
                let (cx, cy) = plot::to_canvas_xy(report.cursor, screen_height);

                ctx.draw(&CanvasLine {
                    x1: ix,
                    y1: iy,
                    x2: fx,
                    y2: fy,
                    color: Color::Blue,
                });
                ctx.draw(&CanvasLine {
                    x1: cx,
                    y1: cy,
                    x2: fx,
                    y2: fy,
                    color: Color::DarkGray,
                });
                ctx.draw(&Circle {
                    x: ix,
                    y: iy,
                    radius,
                    color: Color::Blue,
                });
                ctx.draw(&Circle {
                    x: fx,
                    y: fy,
                    radius,
                    color: Color::Green,
                });
            }

            if let Some((x, y)) = latest {
                ctx.draw(&Circle {
                    x,
                    y,
                    radius: radius / 2.0,
                    color: Color::Red,
                });
            }
        })
        .render(area, buf);
}

fn render_details(app: &App, report: Option<&Report>, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![Line::from(Span::styled(
        "● Red dot = Your crosshair position",
        Style::default().fg(Color::Red),
    ))];

    if let Some(sample) = app.surface.latest() {
        lines.push(Line::from(vec![
            Span::styled("Crosshair Position (cx, cy): ", bold_style),
            Span::raw(format_px(sample.position)),
        ]));
    }

    if let Some(report) = report {
        lines.push(Line::from(vec![
            Span::styled("Target Initial Position: ", bold_style.fg(Color::Blue)),
            Span::raw(format_px(report.target_initial)),
        ]));
        lines.push(Line::from(vec![
            Span::styled(
                "Target Position After Reaction Time: ",
                bold_style.fg(Color::Green),
            ),
            Span::raw(format_px(report.target_final)),
        ]));
    }

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}

fn render_panel(report: Option<&Report>, area: Rect, buf: &mut Buffer) {
    let block = Block::bordered().title("Optimal Movement Calculation");

    let Some(report) = report else {
        Paragraph::new(Span::styled(
            "Click on the canvas to set your crosshair position and generate a target!",
            Style::default().fg(Color::Cyan),
        ))
        .block(block)
        .wrap(Wrap { trim: true })
        .render(area, buf);
        return;
    };

    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);
    let highlight = Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = report
        .lines()
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{label}: "), bold_style),
                Span::styled(value, highlight),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        report.summary(),
        Style::default().fg(Color::Yellow),
    )));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Mathematical Model", bold_style)));
    lines.extend(
        MODEL_LINES
            .iter()
            .map(|l| Line::from(Span::styled(*l, dim_style))),
    );

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Position Details", bold_style)));
    lines.extend(report.position_details().into_iter().map(|(label, value)| {
        Line::from(vec![
            Span::styled(format!("{label}: "), dim_style),
            Span::raw(value),
        ])
    }));

    Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}
