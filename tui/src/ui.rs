//! Rendering.
//!
//! Layout once logged in:
//!   ┌─── header ──────────────────────────────────────────────────────────┐
//!   │  Qubitry AI : Quantum-Inspired Oncology Assistant   Welcome, user!  │
//!   ├─── tabs ────────────────────────────────────────────────────────────┤
//!   │  F1 Manual Entry  F2 CSV Upload  F3 Patients  F4 Analytics          │
//!   ├─── body (per tab) ──────────────────────────────────────────────────┤
//!   │                                                                     │
//!   ├─── notice ──────────────────────────────────────────────────────────┤
//!   │  footer (key bindings)                                              │
//!   └─────────────────────────────────────────────────────────────────────┘

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        BarChart, Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, TableState, Tabs,
        Wrap,
    },
    Frame,
};

use qubitry_contracts::{alert::AlertKind, chart::MarkerChart, patient::Patient};
use qubitry_interactions::normalize;
use qubitry_oncology::{
    analysis::ALERTS_HEADING,
    analytics::{disease_distribution, medication_counts},
    catalog::CANCER_DRUGS,
};

use crate::app::{App, AuthField, AuthMode, EntryField, Notice, Tab};

const APP_TITLE: &str = "Qubitry AI : Quantum-Inspired Oncology Assistant";

fn key_style() -> Style {
    Style::default().fg(Color::Cyan)
}

fn label_style() -> Style {
    Style::default().fg(Color::Gray)
}

fn bordered(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

pub fn ui(f: &mut Frame, app: &App) {
    if app.session.is_some() {
        render_main(f, app);
    } else {
        render_auth(f, app);
    }
}

// ── Login screen ──────────────────────────────────────────────────────────────

fn render_auth(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(8),    // form
            Constraint::Length(3), // notice
            Constraint::Length(3), // footer
        ])
        .split(f.area());

    let title = Paragraph::new(Line::from(Span::styled(
        "Oncology Assistant Login/Signup",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )))
    .block(bordered(""));
    f.render_widget(title, chunks[0]);

    let auth = &app.auth;
    let mode_span = |mode: AuthMode, label: &'static str| {
        let style = if auth.mode == mode {
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        Span::styled(format!(" {label} "), style)
    };

    let mut lines = vec![
        Line::from(vec![mode_span(AuthMode::Login, "Login"), Span::raw("  "), mode_span(AuthMode::SignUp, "Sign Up")]),
        Line::from(""),
        field_line("Username", &auth.username, auth.focus == AuthField::Username),
        field_line("Password", &mask(&auth.password), auth.focus == AuthField::Password),
    ];
    if auth.mode == AuthMode::SignUp {
        lines.push(field_line(
            "Confirm Password",
            &mask(&auth.confirm),
            auth.focus == AuthField::Confirm,
        ));
    }

    let heading = match auth.mode {
        AuthMode::Login => "Login",
        AuthMode::SignUp => "Sign Up",
    };
    f.render_widget(Paragraph::new(lines).block(bordered(heading)), chunks[1]);

    render_notice(f, chunks[2], app.notice.as_ref());
    render_footer(
        f,
        chunks[3],
        &[("F2", "Login / Sign Up"), ("Tab", "Next field"), ("Enter", "Submit"), ("Ctrl-Q", "Quit")],
    );
}

fn mask(secret: &str) -> String {
    "*".repeat(secret.chars().count())
}

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let marker = if focused { "> " } else { "  " };
    let value_style = if focused {
        Style::default().fg(Color::White).add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::White)
    };
    Line::from(vec![
        Span::styled(marker.to_string(), key_style()),
        Span::styled(format!("{label:<18}"), label_style()),
        Span::styled(value.to_string(), value_style),
    ])
}

// ── Main screen ───────────────────────────────────────────────────────────────

fn render_main(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(3), // tabs
            Constraint::Min(10),   // body
            Constraint::Length(3), // notice
            Constraint::Length(3), // footer
        ])
        .split(f.area());

    let username = app.session.as_ref().map(|s| s.username.as_str()).unwrap_or("");
    let since = app
        .session
        .as_ref()
        .map(|s| s.started_at.format("%H:%M UTC").to_string())
        .unwrap_or_default();
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("{APP_TITLE}    "),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("Welcome, {username}!"), Style::default().fg(Color::White)),
        Span::styled(format!("  (since {since})"), label_style()),
    ]))
    .block(bordered(""));
    f.render_widget(header, chunks[0]);

    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, t)| Line::from(format!("F{} {}", i + 1, t.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(bordered(""));
    f.render_widget(tabs, chunks[1]);

    match app.tab {
        Tab::ManualEntry => render_entry(f, chunks[2], app),
        Tab::CsvUpload => render_upload(f, chunks[2], app),
        Tab::Patients => render_patients(f, chunks[2], app),
        Tab::Analytics => render_analytics(f, chunks[2], app),
    }

    render_notice(f, chunks[3], app.notice.as_ref());

    let keys: &[(&str, &str)] = match app.tab {
        Tab::ManualEntry => &[
            ("F1-F4", "Tabs"),
            ("Tab/↑↓", "Field"),
            ("←→", "Adjust"),
            ("Space", "Toggle drug"),
            ("Enter", "Add Patient"),
            ("Ctrl-L", "Logout"),
            ("Ctrl-Q", "Quit"),
        ],
        Tab::CsvUpload => &[("F1-F4", "Tabs"), ("Enter", "Import"), ("Ctrl-L", "Logout"), ("Ctrl-Q", "Quit")],
        Tab::Patients => &[
            ("F1-F4", "Tabs"),
            ("↑↓", "Select patient"),
            ("r", "Re-run analysis"),
            ("Ctrl-L", "Logout"),
            ("Ctrl-Q", "Quit"),
        ],
        Tab::Analytics => &[("F1-F4", "Tabs"), ("Ctrl-L", "Logout"), ("Ctrl-Q", "Quit")],
    };
    render_footer(f, chunks[4], keys);
}

// ── Manual entry ──────────────────────────────────────────────────────────────

fn render_entry(f: &mut Frame, area: Rect, app: &App) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let e = &app.entry;
    let focused = |field: EntryField| e.focus == field;
    let lines = vec![
        field_line("Name", &e.name, focused(EntryField::Name)),
        field_line("Age", &e.age.to_string(), focused(EntryField::Age)),
        field_line(
            "Disease / Cancer",
            &format!("◀ {} ▶", e.condition()),
            focused(EntryField::Condition),
        ),
        field_line(
            "Medications",
            &format!("{} selected", e.selected.iter().filter(|s| **s).count()),
            focused(EntryField::Medications),
        ),
        Line::from(""),
        field_line("Smoking (%)", &slider(e.smoking), focused(EntryField::Smoking)),
        field_line("Alcohol (%)", &slider(e.alcohol), focused(EntryField::Alcohol)),
        field_line("Obesity (%)", &slider(e.obesity), focused(EntryField::Obesity)),
    ];
    f.render_widget(Paragraph::new(lines).block(bordered("Add Patient")), cols[0]);

    let items: Vec<ListItem> = CANCER_DRUGS
        .iter()
        .enumerate()
        .map(|(i, drug)| {
            let check = if e.selected[i] { "[x]" } else { "[ ]" };
            let at_cursor = focused(EntryField::Medications) && e.med_cursor == i;
            let style = if at_cursor {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else if e.selected[i] {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(Span::styled(format!("{check} {drug}"), style)))
        })
        .collect();
    f.render_widget(List::new(items).block(bordered("Medications")), cols[1]);
}

fn slider(pct: u8) -> String {
    let filled = usize::from(pct) / 5;
    format!("{}{} {pct:>3}", "■".repeat(filled), "·".repeat(20 - filled))
}

// ── CSV upload ────────────────────────────────────────────────────────────────

fn render_upload(f: &mut Frame, area: Rect, app: &App) {
    let lines = vec![
        Line::from(Span::styled(
            "Import patients from a CSV file with columns: name, age, condition, meds",
            label_style(),
        )),
        Line::from(Span::styled(
            "meds is a comma-separated list, quoted when it holds more than one drug.",
            label_style(),
        )),
        Line::from(""),
        field_line("Path", &app.upload_path, true),
    ];
    f.render_widget(
        Paragraph::new(lines).block(bordered("Upload CSV")).wrap(Wrap { trim: false }),
        area,
    );
}

// ── Patients ──────────────────────────────────────────────────────────────────

fn render_patients(f: &mut Frame, area: Rect, app: &App) {
    let patients = app.patients();
    if patients.is_empty() {
        f.render_widget(
            Paragraph::new("No patients yet").block(bordered("Patient List")),
            area,
        );
        return;
    }

    let rows_height = u16::try_from(patients.len()).unwrap_or(u16::MAX).saturating_add(3).min(10);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(rows_height), Constraint::Min(8)])
        .split(area);

    let rows: Vec<Row> = patients
        .iter()
        .map(|p| {
            Row::new(vec![
                Cell::from(p.name.clone()),
                Cell::from(p.age.to_string()),
                Cell::from(p.condition.clone()),
                Cell::from(medications_cell(p)),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Length(20),
            Constraint::Length(5),
            Constraint::Length(18),
            Constraint::Min(20),
        ],
    )
    .header(
        Row::new(vec!["Name", "Age", "Condition", "Medications"])
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
    )
    .row_highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan))
    .block(bordered("Patient List"));
    let mut table_state = TableState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(table, chunks[0], &mut table_state);

    let Some(analysis) = app.analysis.as_ref() else {
        f.render_widget(
            Paragraph::new("Select a patient to analyse").block(bordered("Analysis")),
            chunks[1],
        );
        return;
    };

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(25), Constraint::Percentage(25)])
        .split(chunks[1]);

    let mut lines: Vec<Line> = analysis
        .score_lines()
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(Color::White))))
        .collect();
    lines.push(Line::from(""));
    if analysis.has_alerts() {
        lines.push(Line::from(Span::styled(
            ALERTS_HEADING,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        for alert in &analysis.alerts {
            let color = match alert.kind {
                AlertKind::Harmful => Color::Red,
                AlertKind::Beneficial => Color::Green,
            };
            lines.push(Line::from(Span::styled(format!("  {alert}"), Style::default().fg(color))));
        }
    } else {
        for line in analysis.alert_lines() {
            lines.push(Line::from(Span::styled(line, Style::default().fg(Color::Green))));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Explanation:", label_style().add_modifier(Modifier::BOLD))));
    lines.push(Line::from(analysis.explanation.reasoning.clone()));
    lines.push(Line::from(vec![
        Span::styled("Reference: ", label_style()),
        Span::raw(analysis.explanation.reference.clone()),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Clinical notes:", label_style().add_modifier(Modifier::BOLD))));
    for line in analysis.clinical_notes.lines() {
        lines.push(Line::from(line.to_string()));
    }

    f.render_widget(
        Paragraph::new(lines)
            .block(bordered("Quantum-Inspired AI Analysis"))
            .wrap(Wrap { trim: true }),
        cols[0],
    );
    render_marker_chart(f, cols[1], &analysis.genetic_graph);
    render_marker_chart(f, cols[2], &analysis.body_simulation);
}

/// Map a chart color name onto the terminal palette.
fn chart_color(name: &str) -> Color {
    match name {
        "red" => Color::Red,
        "orange" => Color::Rgb(255, 165, 0),
        "green" => Color::Green,
        "lightblue" => Color::LightBlue,
        "pink" => Color::LightMagenta,
        "black" => Color::Black,
        _ => Color::White,
    }
}

/// Draw a marker chart on a braille canvas. Three-dimensional charts use an
/// oblique projection with depth folded into both axes.
fn render_marker_chart(f: &mut Frame, area: Rect, chart: &MarkerChart) {
    let project = |x: f64, y: f64, z: Option<f64>| match z {
        Some(z) => (x + 0.5 * z, y + 0.35 * z),
        None => (x, y),
    };
    let points: Vec<(f64, f64, Color, String, u16)> = chart
        .markers
        .iter()
        .map(|m| {
            let (px, py) = project(m.x, m.y, m.z);
            (px, py, chart_color(&m.color), m.label.clone(), m.size)
        })
        .collect();

    let pad = 0.5;
    let bounds = |coords: &mut dyn Iterator<Item = f64>| {
        coords.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
    };
    let (x_lo, x_hi) = bounds(&mut points.iter().map(|p| p.0));
    let (y_lo, y_hi) = bounds(&mut points.iter().map(|p| p.1));
    let (x_lo, x_hi) = if x_lo.is_finite() { (x_lo - pad, x_hi + pad) } else { (0.0, 1.0) };
    let (y_lo, y_hi) = if y_lo.is_finite() { (y_lo - pad, y_hi + pad) } else { (0.0, 1.0) };

    let mut canvas = Canvas::default()
        .block(bordered(&chart.title))
        .marker(symbols::Marker::Braille)
        .x_bounds([x_lo, x_hi])
        .y_bounds([y_lo, y_hi])
        .paint(|ctx| {
            for (x, y, color, label, size) in &points {
                ctx.draw(&Points { coords: &[(*x, *y)], color: *color });
                let style = if *size > 20 {
                    Style::default().fg(*color).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(*color)
                };
                ctx.print(*x, *y, Line::styled(format!("● {label}"), style));
            }
        });
    if let Some(bg) = &chart.background {
        canvas = canvas.background_color(chart_color(bg));
    }
    f.render_widget(canvas, area);
}

// ── Analytics ─────────────────────────────────────────────────────────────────

fn render_analytics(f: &mut Frame, area: Rect, app: &App) {
    let patients = app.patients();
    let (Some(pie), Some(bars)) = (disease_distribution(&patients), medication_counts(&patients)) else {
        f.render_widget(
            Paragraph::new("No patients yet").block(bordered("Analytics Charts")),
            area,
        );
        return;
    };

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let total = pie.total().max(1);
    let palette = [Color::Cyan, Color::Magenta, Color::Yellow, Color::Green, Color::Blue, Color::Red];
    let lines: Vec<Line> = pie
        .slices
        .iter()
        .enumerate()
        .map(|(i, slice)| {
            let share = slice.value as f64 / total as f64;
            let width = (share * 20.0).round() as usize;
            Line::from(vec![
                Span::styled(format!("{:<18}", slice.label), label_style()),
                Span::styled("█".repeat(width.max(1)), Style::default().fg(palette[i % palette.len()])),
                Span::raw(format!(" {} ({:.1}%)", slice.value, share * 100.0)),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines).block(bordered(&pie.title)), cols[0]);

    // Bars are labelled with the drug name only; the catalog description
    // does not fit under a bar.
    let labels: Vec<(String, u64)> = bars
        .bars
        .iter()
        .map(|b| (normalize(&b.label).to_string(), b.value))
        .collect();
    let data: Vec<(&str, u64)> = labels.iter().map(|(l, v)| (l.as_str(), *v)).collect();
    let title = format!("{} ({} / {})", bars.title, bars.x_label, bars.y_label);
    let chart = BarChart::default()
        .block(bordered(&title))
        .direction(Direction::Horizontal)
        .data(data.as_slice())
        .bar_width(1)
        .bar_gap(0)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    f.render_widget(chart, cols[1]);
}

// ── Notice and footer ─────────────────────────────────────────────────────────

fn render_notice(f: &mut Frame, area: Rect, notice: Option<&Notice>) {
    let line = match notice {
        None => Line::from(""),
        Some(Notice::Info(msg)) => Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Cyan))),
        Some(Notice::Success(msg)) => {
            Line::from(Span::styled(format!("✔ {msg}"), Style::default().fg(Color::Green)))
        }
        Some(Notice::Warning(msg)) => {
            Line::from(Span::styled(format!("⚠ {msg}"), Style::default().fg(Color::Yellow)))
        }
        Some(Notice::Error(msg)) => {
            Line::from(Span::styled(format!("✖ {msg}"), Style::default().fg(Color::Red)))
        }
    };
    f.render_widget(Paragraph::new(line).block(bordered("")), area);
}

fn render_footer(f: &mut Frame, area: Rect, keys: &[(&str, &str)]) {
    let mut spans: Vec<Span> = Vec::new();
    for (key, action) in keys {
        spans.push(Span::styled(format!(" [{key}] "), key_style()));
        spans.push(Span::raw(action.to_string()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)).block(bordered("")), area);
}

/// Medications exactly as stored, catalog descriptions included.
fn medications_cell(patient: &Patient) -> String {
    patient.medications.join(", ")
}
