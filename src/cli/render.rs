//! Frame drawing for the play command.

use super::play::{App, describe_source};
use outpost::game::{
    BuildingKind, Coord, GRID_SIZE, NextDayPrompt, Phase, ResourceKind, calculate_fuel_cost,
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub(crate) fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                               // Header
            Constraint::Min(10),                                 // Main content
            Constraint::Length(app.layout.actions_text.height), // Status line
            Constraint::Length(3),                               // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app);

    let grid_cells = u16::from(GRID_SIZE);
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(app.layout.resource_display.width),
            Constraint::Length(app.layout.grid_width(grid_cells).saturating_add(2)),
            Constraint::Min(20),
        ])
        .split(chunks[1]);

    render_resources(f, main_chunks[0], app);
    render_map(f, main_chunks[1], app);
    render_side_panel(f, main_chunks[2], app);

    render_actions_text(f, chunks[2], app);
    render_footer(f, chunks[3], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let view = app.engine.presenter();
    let status = match app.engine.state().phase {
        _ if !app.engine.is_config_ready() => "LOADING",
        Phase::GameOver => "GAME OVER",
        Phase::EndingDay => "NIGHT",
        Phase::Active => "DAY",
    };

    let title = format!(
        " Outpost | Day {} | Deployments {}/{} | {} | {} | seed {} ",
        view.day,
        view.deployments_used,
        view.deployments_max,
        status,
        describe_source(app.grid_source.as_ref()),
        app.seed()
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn resource_color(kind: ResourceKind) -> Color {
    match kind {
        ResourceKind::Food => Color::Green,
        ResourceKind::Scrap => Color::Gray,
        ResourceKind::Circuits => Color::Magenta,
        ResourceKind::Fuel => Color::Yellow,
        ResourceKind::Steel => Color::LightBlue,
    }
}

fn render_resources(f: &mut Frame, area: Rect, app: &App) {
    let resources = &app.engine.presenter().resources;
    let spacing = usize::from(app.layout.resource_display.line_spacing);
    let mut lines = Vec::new();

    for (i, (kind, amount)) in resources.iter().enumerate() {
        if i > 0 {
            lines.extend(std::iter::repeat_n(Line::from(""), spacing));
        }
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<10}", kind.label()),
                Style::default().fg(resource_color(kind)),
            ),
            Span::styled(
                format!("{amount:>6}"),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    let widget =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Resources "));
    f.render_widget(widget, area);
}

fn render_map(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title(" Map ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let view = app.engine.presenter();
    if !view.map_visible {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from("The map is hidden."),
            Line::from("Deploy a robot [1-9] to explore."),
        ])
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
        f.render_widget(hint, inner);
        return;
    }

    let grid = &app.layout.grid;
    for cell in Coord::all() {
        let (dx, dy) = app.layout.tile_offset(u16::from(cell.x), u16::from(cell.y));
        let (x, y) = (inner.x.saturating_add(dx), inner.y.saturating_add(dy));
        let tile = Rect::new(x, y, grid.tile_width, grid.tile_height).intersection(inner);
        if tile.is_empty() {
            continue;
        }
        render_tile(f, tile, app, cell);
    }
}

fn render_tile(f: &mut Frame, area: Rect, app: &App, cell: Coord) {
    let view = app.engine.presenter();

    let fill = match view.flash(cell) {
        Some(true) => Style::default().bg(Color::Green).fg(Color::Black),
        Some(false) => Style::default().bg(Color::Red).fg(Color::Black),
        None if cell.is_home() => Style::default().fg(Color::LightBlue),
        None => Style::default(),
    };
    let border = if cell == app.cursor {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let label = if cell.is_home() {
        "HOME".to_string()
    } else if app.layout.grid.show_fuel_costs {
        format!("fuel {}", calculate_fuel_cost(cell.x, cell.y))
    } else {
        String::new()
    };

    let tile = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(fill)
        .block(Block::default().borders(Borders::ALL).border_style(border));
    f.render_widget(tile, area);
}

fn render_side_panel(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(6)])
        .split(area);

    render_slots(f, chunks[0], app);
    render_buildings(f, chunks[1], app);
}

fn render_slots(f: &mut Frame, area: Rect, app: &App) {
    let slots = &app.layout.robot_slots;
    let width = usize::from(slots.slot_width);
    let gap = " ".repeat(usize::from(slots.slot_spacing));

    let mut spans = Vec::new();
    for (i, deployed) in app.engine.presenter().slots.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(gap.clone()));
        }
        let (text, style) = if *deployed {
            ("OUT", Style::default().bg(Color::Green).fg(Color::Black))
        } else {
            ("HOME", Style::default().bg(Color::DarkGray).fg(Color::White))
        };
        spans.push(Span::styled(format!("{:^width$}", format!("{} {text}", i + 1)), style));
    }

    let widget = Paragraph::new(vec![Line::from(""), Line::from(spans)])
        .block(Block::default().borders(Borders::ALL).title(" Robots "));
    f.render_widget(widget, area);
}

fn render_buildings(f: &mut Frame, area: Rect, app: &App) {
    let buildings = &app.engine.presenter().buildings;
    let rules = app.engine.rules();
    let refiners = buildings.count(BuildingKind::Refiner);

    let mut lines = vec![Line::from(format!("Refiners: {refiners}"))];

    if app.build_menu_open {
        lines.push(Line::from(""));
        lines.push(Line::styled(
            "Build menu",
            Style::default().add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::from(format!(
            "[r] Refiner: {}",
            rules.refiner_cost.describe()
        )));
        if refiners > 0 {
            lines.push(Line::from(format!(
                "[s] Refine {} scrap -> {} steel",
                rules.refine_scrap_cost, rules.refine_steel_yield
            )));
        }
    }

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Buildings "))
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_actions_text(f: &mut Frame, area: Rect, app: &App) {
    let view = app.engine.presenter();
    let (title, style) = match view.prompt {
        NextDayPrompt::PendingConfirmation => (
            " Confirm: press [n] again to end the day ",
            Style::default().fg(Color::Yellow),
        ),
        NextDayPrompt::Idle => (" Actions ", Style::default()),
    };

    let widget = Paragraph::new(view.message.as_str())
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: true });
    f.render_widget(widget, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let controls = if app.engine.state().is_game_over() {
        " [q] Quit  [g] New game ".to_string()
    } else {
        let next_day = match app.engine.presenter().prompt {
            NextDayPrompt::Idle => "Next day",
            NextDayPrompt::PendingConfirmation => "CONFIRM?",
        };
        format!(
            " [q] Quit  [←↑↓→] Move  [Enter] Collect  [1-9] Robot  [n] {next_day}  [b] Build "
        )
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}
