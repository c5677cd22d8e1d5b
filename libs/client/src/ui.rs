use client::{
    app::{App, Focus},
    session::{GENERATING_MESSAGE, SUCCESS_MESSAGE},
    Backend, Notice, Phase,
};
use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Paragraph, Wrap},
    Frame,
};

const TOPIC_PLACEHOLDER: &str = "USA Stock Market";
const MESSAGE_PLACEHOLDER: &str = "Dear readers, welcome to the newsletter!";
const PREVIEW_LINES: usize = 200;

pub fn draw<B: Backend>(frame: &mut Frame, app: &App<B>) {
    let [sidebar, main] =
        Layout::horizontal([Constraint::Length(46), Constraint::Min(20)])
            .areas(frame.area());

    draw_sidebar(frame, app, sidebar);
    draw_main(frame, app, main);
}

fn draw_sidebar<B: Backend>(frame: &mut Frame, app: &App<B>, area: Rect) {
    let [header, intro, topic, message, button, notice] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(4),
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(3),
        Constraint::Length(4),
    ])
    .areas(area);

    let status = if app.session.backend_healthy {
        Span::styled(
            "Backend service is connected",
            Style::new().fg(Color::Green),
        )
    } else {
        Span::styled(
            "Backend service is unavailable",
            Style::new().fg(Color::Red),
        )
    };
    frame.render_widget(
        Paragraph::new(vec![
            Line::from("Newsletter Generator".bold()),
            Line::from(status),
        ])
        .block(Block::bordered()),
        header,
    );

    frame.render_widget(
        Paragraph::new(
            "To generate a newsletter, enter a topic and a personal message. \
             Your team of AI agents will generate a newsletter for you!",
        )
        .wrap(Wrap { trim: true }),
        intro,
    );

    draw_input(
        frame,
        "Topic",
        &app.session.topic,
        TOPIC_PLACEHOLDER,
        app.focus == Focus::Topic,
        topic,
    );
    draw_input(
        frame,
        "Your personal message (to include at the top of the newsletter)",
        &app.session.personal_message,
        MESSAGE_PLACEHOLDER,
        app.focus == Focus::Message,
        message,
    );

    let mut button_style = Style::new();
    if !app.session.generate_enabled() {
        button_style = button_style.fg(Color::DarkGray);
    } else if app.focus == Focus::Button {
        button_style = button_style.add_modifier(Modifier::REVERSED);
    }
    frame.render_widget(
        Paragraph::new("Generate Newsletter")
            .centered()
            .style(button_style)
            .block(Block::bordered().border_style(focus_style(
                app.focus == Focus::Button,
            ))),
        button,
    );

    if let Some(text) = &app.session.notice {
        let (text, color) = match text {
            Notice::Info(text) => (text, Color::Green),
            Notice::Warning(text) => (text, Color::Yellow),
            Notice::Error(text) => (text, Color::Red),
        };
        frame.render_widget(
            Paragraph::new(text.as_str())
                .style(Style::new().fg(color))
                .wrap(Wrap { trim: false }),
            notice,
        );
    }
}

fn draw_input(
    frame: &mut Frame,
    title: &str,
    value: &str,
    placeholder: &str,
    focused: bool,
    area: Rect,
) {
    let text = if value.is_empty() {
        Text::styled(placeholder, Style::new().fg(Color::DarkGray))
    } else {
        Text::from(value)
    };

    frame.render_widget(
        Paragraph::new(text).wrap(Wrap { trim: false }).block(
            Block::bordered()
                .title(title)
                .border_style(focus_style(focused)),
        ),
        area,
    );

    if focused {
        let last_line = value.split('\n').last().unwrap_or_default();
        let row = value.matches('\n').count() as u16;
        let column = last_line.chars().count() as u16;
        let inner_width = area.width.saturating_sub(2).max(1);
        let inner_height = area.height.saturating_sub(2).max(1);
        frame.set_cursor_position(Position::new(
            area.x + 1 + column.min(inner_width - 1),
            area.y + 1 + row.min(inner_height - 1),
        ));
    }
}

fn draw_main<B: Backend>(frame: &mut Frame, app: &App<B>, area: Rect) {
    let [body, footer] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)])
            .areas(area);

    let block = Block::bordered().title("Newsletter Generation");
    let content = match app.session.phase() {
        Phase::Generating => {
            Paragraph::new(GENERATING_MESSAGE.fg(Color::Cyan)).block(block)
        }
        Phase::Succeeded => {
            let html = app.session.result().unwrap_or_default();
            let mut lines = vec![
                Line::from(SUCCESS_MESSAGE.fg(Color::Green).bold()),
                Line::from(format!(
                    "Press Ctrl+S to download newsletter.html into {}",
                    app.output_dir.display()
                )),
                Line::from(""),
            ];
            lines.extend(
                html.lines()
                    .take(PREVIEW_LINES)
                    .map(|line| Line::from(line.to_string()).dark_gray()),
            );
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(block)
        }
        Phase::Idle => Paragraph::new(
            "Fill in the topic and your personal message, then press \
             Generate Newsletter.",
        )
        .wrap(Wrap { trim: true })
        .block(block),
    };
    frame.render_widget(content, body);

    frame.render_widget(
        Paragraph::new(
            "Tab: next field  Ctrl+G: generate  Ctrl+S: download  \
             Ctrl+R: recheck backend  Esc: quit",
        )
        .dark_gray(),
        footer,
    );
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::new().fg(Color::Yellow)
    } else {
        Style::new()
    }
}
