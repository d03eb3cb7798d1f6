//! TUI rendering for Stealthfolio using ratatui.

mod input;
mod theme;

pub use input::{Action, InputPump, action_for, apply_action, handle_events};
pub use theme::{Palette, palette, spinner_frame, styles};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use stealthfolio_engine::{App, RevealSlot, Section, landing};

/// Below this width the panel stacks under the hero text and card grids
/// collapse to one column.
pub const SIDE_BY_SIDE_MIN_WIDTH: u16 = 96;

/// Rows used by [`draw_footer`].
pub const FOOTER_HEIGHT: u16 = 2;

const LINK_SEPARATOR: &str = "  ·  ";

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let palette = palette(app.ui_options());
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Nav
            Constraint::Length(1),
            Constraint::Min(1), // Section body
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(frame.area());

    draw_nav(frame, app.section(), chunks[0], &palette);

    match app.section() {
        Section::Hero => {
            let (text_area, panel_area) = hero_layout(chunks[2]);
            draw_hero_text(frame, app, text_area, &palette);
            draw_panel(frame, app, panel_area, &palette);
        }
        Section::Product => {
            let body = draw_section_header(
                frame,
                landing::PRODUCT_TITLE,
                landing::PRODUCT_INTRO,
                chunks[2],
                &palette,
            );
            draw_card_grid(frame, &landing::FEATURES, 2, body, &palette);
        }
        Section::HowItWorks => draw_how_it_works(frame, chunks[2], &palette),
        Section::Builders => {
            let body = draw_section_header(
                frame,
                landing::BUILDERS_TITLE,
                landing::BUILDERS_INTRO,
                chunks[2],
                &palette,
            );
            draw_card_grid(frame, &landing::BUILDER_CARDS, 3, body, &palette);
        }
    }

    draw_footer(frame, app, chunks[3]);
}

/// Split the hero into the text column and the panel.
#[must_use]
pub fn hero_layout(area: Rect) -> (Rect, Rect) {
    let (direction, constraints) = if area.width >= SIDE_BY_SIDE_MIN_WIDTH {
        (
            Direction::Horizontal,
            [Constraint::Percentage(50), Constraint::Percentage(50)],
        )
    } else {
        (
            Direction::Vertical,
            [Constraint::Percentage(45), Constraint::Percentage(55)],
        )
    };
    let chunks = Layout::default()
        .direction(direction)
        .constraints(constraints)
        .split(area);
    (chunks[0], chunks[1])
}

/// Columns a card grid uses at `width`, capped at `wide`.
#[must_use]
pub fn grid_columns(width: u16, wide: usize) -> usize {
    if width >= SIDE_BY_SIDE_MIN_WIDTH {
        wide.max(1)
    } else {
        1
    }
}

fn draw_nav(frame: &mut Frame, active: Section, area: Rect, palette: &Palette) {
    let brand = Line::from(vec![
        Span::styled("◆ ", Style::default().fg(palette.accent)),
        Span::styled(landing::BRAND, styles::brand(palette)),
    ]);

    let mut spans = Vec::new();
    for (idx, section) in Section::LINKED.iter().enumerate() {
        let Some(label) = section.nav_label() else {
            continue;
        };
        if idx > 0 {
            spans.push(Span::styled(LINK_SEPARATOR, styles::key_hint(palette)));
        }
        let style = if *section == active {
            styles::nav_active(palette)
        } else {
            Style::default().fg(palette.text_secondary)
        };
        spans.push(Span::styled(
            format!("{} ", idx + 1),
            styles::key_highlight(palette),
        ));
        spans.push(Span::styled(label, style));
    }

    let buttons = nav_buttons(palette);
    let buttons_width: usize = buttons.iter().map(Span::width).sum();
    let links_width: usize = spans.iter().map(Span::width).sum();
    if brand.width() + links_width + buttons_width + 2 <= usize::from(area.width) {
        spans.extend(buttons);
    }
    let links = Line::from(spans);

    let [left, right] = split_trailing(area, links.width());
    frame.render_widget(Paragraph::new(brand), left);
    frame.render_widget(Paragraph::new(links).alignment(Alignment::Right), right);
}

fn nav_buttons(palette: &Palette) -> Vec<Span<'static>> {
    let [docs, launch] = landing::NAV_BUTTONS;
    vec![
        Span::raw("   "),
        Span::styled(format!("[ {docs} ]"), styles::button(palette)),
        Span::raw("  "),
        Span::styled(format!("[ {launch} ]"), styles::button_primary(palette)),
    ]
}

/// Split a one-line row so the trailing `width` columns are reserved.
fn split_trailing(area: Rect, width: usize) -> [Rect; 2] {
    let width = u16::try_from(width).unwrap_or(u16::MAX).min(area.width);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(width)])
        .areas(area)
}

/// Rows `lines` occupy when wrapped to `width`. Word wrapping can push a
/// line over its character estimate, so callers add slack.
fn wrapped_height(lines: &[Line<'_>], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = lines
        .iter()
        .map(|line| line.width().max(1).div_ceil(width))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

fn draw_hero_text(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let headline = app.slot_frame(RevealSlot::Headline);
    let [primary_cta, secondary_cta] = landing::CTAS;

    let mut lines = vec![
        Line::from(Span::styled(landing::EYEBROW, styles::eyebrow(palette))),
        Line::from(""),
        Line::from(Span::styled(
            headline.text,
            styles::headline(palette, headline.complete),
        )),
        Line::from(""),
        Line::from(Span::styled(
            landing::SUBTITLE,
            Style::default().fg(palette.text_secondary),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("[ {primary_cta} ]"),
                styles::button_primary(palette),
            ),
            Span::raw("  "),
            Span::styled(format!("[ {secondary_cta} ]"), styles::button(palette)),
        ]),
        Line::from(""),
    ];

    let label_width = landing::META
        .iter()
        .map(|(label, _)| label.width())
        .max()
        .unwrap_or(0);
    for (label, value) in landing::META {
        let pad = label_width.saturating_sub(label.width()) + 2;
        lines.push(Line::from(vec![
            Span::styled(label, styles::meta_label(palette)),
            Span::raw(" ".repeat(pad)),
            Span::styled(value, styles::meta_value(palette)),
        ]));
    }

    let hero = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().padding(Padding::new(2, 2, 1, 0)));
    frame.render_widget(hero, area);
}

fn draw_panel(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let title = Line::from(vec![
        Span::raw(" "),
        Span::styled("●", Style::default().fg(palette.red)),
        Span::raw(" "),
        Span::styled("●", Style::default().fg(palette.yellow)),
        Span::raw(" "),
        Span::styled("●", Style::default().fg(palette.green)),
        Span::raw("  "),
        Span::styled(
            landing::PANEL_TITLE,
            Style::default().fg(palette.text_primary),
        ),
        Span::raw(" "),
    ]);
    let panel = panel_block(title, palette);
    let inner = panel.inner(area);
    frame.render_widget(panel, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Label
            Constraint::Length(4), // Cipher block
            Constraint::Min(0),    // Cards
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(
            landing::PAYLOAD_LABEL,
            styles::meta_label(palette),
        )),
        chunks[0],
    );

    let cipher = Paragraph::new(Span::styled(
        app.slot_text(RevealSlot::Payload),
        styles::cipher(palette),
    ))
    .wrap(Wrap { trim: false })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.bg_border)),
    );
    frame.render_widget(cipher, chunks[1]);

    let mut lines = Vec::new();
    for card in landing::CARDS {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(card.label, styles::meta_label(palette)),
            Span::raw("  "),
            Span::styled(card.value, styles::meta_value(palette)),
        ]));
        lines.push(Line::from(Span::styled(
            card.desc,
            Style::default().fg(palette.text_muted),
        )));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[2]);
}

fn panel_block<'a>(title: Line<'a>, palette: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .style(Style::default().bg(palette.bg_panel))
        .title(title)
        .padding(Padding::horizontal(1))
}

/// Draws a section title and intro, returning the area left below them.
fn draw_section_header(
    frame: &mut Frame,
    title: &'static str,
    intro: &'static str,
    area: Rect,
    palette: &Palette,
) -> Rect {
    let lines = vec![
        Line::from(Span::styled(title, styles::section_title(palette))),
        Line::from(""),
        Line::from(Span::styled(
            intro,
            Style::default().fg(palette.text_secondary),
        )),
    ];
    let height = wrapped_height(&lines, area.width.saturating_sub(4)) + 2;
    let [header, body] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(height), Constraint::Min(0)])
        .areas(area);

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().padding(Padding::new(2, 2, 1, 0)));
    frame.render_widget(paragraph, header);
    body
}

fn draw_card_grid(
    frame: &mut Frame,
    cards: &[landing::Feature],
    wide_columns: usize,
    area: Rect,
    palette: &Palette,
) {
    let columns = grid_columns(area.width, wide_columns);
    let area = area.inner(Margin::new(1, 0));
    let column_width = area.width / u16::try_from(columns).unwrap_or(1);

    let mut rows = Vec::new();
    for row in cards.chunks(columns) {
        let height = row
            .iter()
            .map(|card| card_height(card, column_width))
            .max()
            .unwrap_or(0);
        rows.push((row, height));
    }

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(rows.iter().map(|(_, height)| Constraint::Length(*height)))
        .split(area);
    for ((row, _), row_area) in rows.iter().zip(row_areas.iter()) {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints((0..columns).map(|_| Constraint::Fill(1)))
            .split(*row_area);
        for (card, cell) in row.iter().zip(cells.iter()) {
            draw_card(frame, card, *cell, palette);
        }
    }
}

fn card_body(card: &landing::Feature, palette: &Palette) -> Paragraph<'static> {
    Paragraph::new(Span::styled(
        card.body,
        Style::default().fg(palette.text_muted),
    ))
    .wrap(Wrap { trim: true })
}

fn card_height(card: &landing::Feature, column_width: u16) -> u16 {
    // Borders and padding take four columns; one spare row absorbs word wrap.
    let body = [Line::from(card.body)];
    wrapped_height(&body, column_width.saturating_sub(4)) + 3
}

fn draw_card(frame: &mut Frame, card: &landing::Feature, area: Rect, palette: &Palette) {
    let title = Line::from(vec![
        Span::raw(" "),
        Span::styled(card.title, styles::card_title(palette)),
        Span::raw(" "),
    ]);
    let block = panel_block(title, palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(card_body(card, palette), inner);
}

fn draw_how_it_works(frame: &mut Frame, area: Rect, palette: &Palette) {
    let (steps_area, telemetry_area) = hero_layout(area);

    let mut lines = vec![
        Line::from(Span::styled(
            landing::HOW_TITLE,
            styles::section_title(palette),
        )),
        Line::from(""),
        Line::from(Span::styled(
            landing::HOW_INTRO,
            Style::default().fg(palette.text_secondary),
        )),
    ];
    for (idx, step) in landing::STEPS.iter().enumerate() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:02}  ", idx + 1),
                styles::key_highlight(palette),
            ),
            Span::styled(step.title, styles::meta_value(palette)),
        ]));
        lines.push(Line::from(Span::styled(
            step.body,
            Style::default().fg(palette.text_muted),
        )));
    }
    let steps = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().padding(Padding::new(2, 2, 1, 0)));
    frame.render_widget(steps, steps_area);

    draw_telemetry(frame, telemetry_area, palette);
}

fn draw_telemetry(frame: &mut Frame, area: Rect, palette: &Palette) {
    let title = Line::from(vec![
        Span::raw(" "),
        Span::styled(landing::TELEMETRY_LABEL, styles::meta_label(palette)),
        Span::raw(" "),
    ]);
    let panel = panel_block(title, palette);
    let inner = panel.inner(area);
    frame.render_widget(panel, area);

    let label_width = landing::TELEMETRY
        .iter()
        .map(|(label, _)| label.width())
        .max()
        .unwrap_or(0);
    let mut lines = vec![Line::from("")];
    for (label, value) in landing::TELEMETRY {
        let pad = label_width.saturating_sub(label.width()) + 3;
        lines.push(Line::from(vec![
            Span::styled(label, styles::meta_label(palette)),
            Span::raw(" ".repeat(pad)),
            Span::styled(value, styles::redacted(palette)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        landing::TELEMETRY_FOOTNOTE,
        Style::default().fg(palette.text_muted),
    )));
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

/// Two footer rows: copyright and links, then status and key hints.
pub fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let palette = palette(app.ui_options());
    let [links_row, status_row] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .areas(area);

    let copyright = Span::styled(
        landing::copyright(app.copyright_year()),
        styles::key_hint(&palette),
    );
    let mut links = Vec::with_capacity(landing::FOOTER_LINKS.len() * 2);
    for (idx, link) in landing::FOOTER_LINKS.iter().enumerate() {
        if idx > 0 {
            links.push(Span::styled(LINK_SEPARATOR, styles::key_hint(&palette)));
        }
        links.push(Span::styled(
            *link,
            Style::default().fg(palette.text_secondary),
        ));
    }
    let links = Line::from(links);
    let [left, right] = split_trailing(links_row, links.width());
    frame.render_widget(Paragraph::new(Line::from(copyright)), left);
    frame.render_widget(Paragraph::new(links).alignment(Alignment::Right), right);

    let mut spans = Vec::new();
    if let Some(status) = app.status_message() {
        spans.push(Span::styled(status, Style::default().fg(palette.accent)));
        spans.push(Span::raw("  "));
    }
    if !app.is_settled() {
        let spinner = spinner_frame(app.tick_count(), app.ui_options());
        spans.push(Span::styled(
            format!("{spinner} decrypting"),
            styles::cipher(&palette),
        ));
    }
    let hints = Line::from(vec![
        Span::styled("tab", styles::key_highlight(&palette)),
        Span::styled(" section  ", styles::key_hint(&palette)),
        Span::styled("r", styles::key_highlight(&palette)),
        Span::styled(" replay  ", styles::key_hint(&palette)),
        Span::styled("n", styles::key_highlight(&palette)),
        Span::styled(" next headline  ", styles::key_hint(&palette)),
        Span::styled("q", styles::key_highlight(&palette)),
        Span::styled(" quit", styles::key_hint(&palette)),
    ]);

    let [left, right] = split_trailing(status_row, hints.width());
    frame.render_widget(Paragraph::new(Line::from(spans)), left);
    frame.render_widget(Paragraph::new(hints).alignment(Alignment::Right), right);
}
