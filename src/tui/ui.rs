use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app::{App, AuthField, AuthTab, FormField, InputMode};
use crate::services::MIN_PASSWORD_LEN;

pub fn draw(frame: &mut Frame, app: &App) {
    if app.mode == InputMode::Auth {
        render_auth(frame, app);
        return;
    }

    // Main horizontal split: course list on the left, details on the right
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(3, 5), Constraint::Ratio(2, 5)])
        .split(frame.area());

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Search + filter
            Constraint::Min(0),    // Course list
            Constraint::Length(1), // Status line
        ])
        .split(main_chunks[0]);

    render_header(frame, app, left_chunks[0]);
    render_search(frame, app, left_chunks[1]);
    render_course_list(frame, app, left_chunks[2]);
    render_status(frame, app, left_chunks[3]);
    render_details(frame, app, main_chunks[1]);

    if app.mode == InputMode::AddCourse {
        render_course_form(frame, app);
    }

    if app.show_help {
        render_help(frame);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let total = app.courses.len();
    let done = app.courses.iter().filter(|c| c.completed).count();

    let title = match app.session.principal() {
        Some(principal) => format!(" 🎓 StudyFacil · {} ", principal.email),
        None => " 🎓 StudyFacil ".to_string(),
    };
    let stats = format!(" {total} Courses | {done} Done | {} Pending", total - done);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let paragraph = Paragraph::new(stats).style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, inner);
}

fn render_search(frame: &mut Frame, app: &App, area: Rect) {
    let searching = app.mode == InputMode::Search;
    let query = if searching {
        format!("{}_", app.query)
    } else if app.query.is_empty() {
        "course name...".to_string()
    } else {
        app.query.clone()
    };
    let query_style = if searching || !app.query.is_empty() {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let line = Line::from(vec![
        Span::styled("🔍 ", Style::default().fg(Color::Yellow)),
        Span::styled(query, query_style),
        Span::styled("   Area: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.category_filter.label().to_string(),
            Style::default().fg(Color::Blue),
        ),
    ]);

    let border = if searching { Color::Yellow } else { Color::DarkGray };
    let block = Block::default()
        .title(" Search ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_course_list(frame: &mut Frame, app: &App, area: Rect) {
    let courses = app.visible_courses();

    if courses.is_empty() {
        let message = if app.courses.is_empty() {
            "No courses yet. Press 'a' to add one."
        } else {
            "No course matches the current search."
        };
        let paragraph = Paragraph::new(message)
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = courses
        .iter()
        .map(|course| {
            let completion = course.completion();
            let style = if completion.is_done() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            };

            let line = Line::from(vec![
                Span::raw(format!("{} ", completion.glyph())),
                Span::styled(course.name.as_str(), style),
                Span::styled(
                    format!("  [{}]", course.category),
                    Style::default().fg(Color::Blue),
                ),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.selected_index));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let (text, color) = match &app.notice {
        Some(notice) => (format!("⚠ {notice}"), Color::Yellow),
        None => (
            "a:add  m:done  o:open  d:delete  /:search  f:area  ?:help  q:quit".to_string(),
            Color::DarkGray,
        ),
    };

    let paragraph = Paragraph::new(text).style(Style::default().fg(color));
    frame.render_widget(paragraph, area);
}

fn render_details(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Course ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let Some(course) = app.selected_course() else {
        let paragraph = Paragraph::new("No course selected").block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let completion = course.completion();
    let label = Style::default().fg(Color::DarkGray);
    let lines = vec![
        Line::from(Span::styled(
            format!("{} {}", completion.glyph(), course.name),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Area:   ", label),
            Span::raw(course.category.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Link:   ", label),
            Span::styled(course.url.as_str(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::styled("Added:  ", label),
            Span::raw(course.created_at.format("%Y-%m-%d %H:%M").to_string()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("[o] ", Style::default().fg(Color::Yellow)),
            Span::raw("🚀 Open link   "),
            Span::styled("[m] ", Style::default().fg(Color::Yellow)),
            Span::raw(completion.action_label()),
            Span::styled("   [d] ", Style::default().fg(Color::Yellow)),
            Span::raw("🗑"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_course_form(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 40, frame.area());
    let form = &app.form;

    let field_style = |field: FormField| {
        if form.field == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        }
    };
    let cursor = |field: FormField| if form.field == field { "_" } else { "" };

    let category = form.category();
    let category_style = if category.is_selectable() {
        field_style(FormField::Category)
    } else {
        field_style(FormField::Category).add_modifier(Modifier::ITALIC)
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Name:     ", field_style(FormField::Name)),
            Span::raw(format!("{}{}", form.name, cursor(FormField::Name))),
        ]),
        Line::from(vec![
            Span::styled("Link:     ", field_style(FormField::Url)),
            Span::raw(format!("{}{}", form.url, cursor(FormField::Url))),
        ]),
        Line::from(vec![
            Span::styled("Area:     ", field_style(FormField::Category)),
            Span::styled(format!("◀ {} ▶", category.label()), category_style),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Tab:next field  ←/→:area  Enter:save  Esc:cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    if let Some(error) = &form.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        )));
    }

    let block = Block::default()
        .title(" ➕ Add course ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_auth(frame: &mut Frame, app: &App) {
    let area = centered_rect(50, 50, frame.area());
    let auth = &app.auth;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let selected = match auth.tab {
        AuthTab::SignIn => 0,
        AuthTab::SignUp => 1,
    };
    let tabs = Tabs::new(vec!["Sign in", "Create account"])
        .block(
            Block::default()
                .title(" 🎓 StudyFacil ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .select(selected)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let field_style = |field: AuthField| {
        if auth.field == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        }
    };
    let cursor = |field: AuthField| if auth.field == field { "_" } else { "" };
    let masked = "*".repeat(auth.password.chars().count());

    let password_label = match auth.tab {
        AuthTab::SignIn => "Password: ".to_string(),
        AuthTab::SignUp => format!("Password (min. {MIN_PASSWORD_LEN}): "),
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("E-mail:   ", field_style(AuthField::Email)),
            Span::raw(format!("{}{}", auth.email, cursor(AuthField::Email))),
        ]),
        Line::from(vec![
            Span::styled(password_label, field_style(AuthField::Password)),
            Span::raw(format!("{masked}{}", cursor(AuthField::Password))),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Tab:next field  ←/→:switch tab  Enter:submit  Esc:quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    if let Some(error) = &auth.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        )));
    }
    if let Some(info) = &auth.info {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            info.as_str(),
            Style::default().fg(Color::Green),
        )));
    }

    frame.render_widget(Clear, area);
    frame.render_widget(tabs, chunks[0]);
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL)),
        chunks[1],
    );
}

fn render_help(frame: &mut Frame) {
    let area = centered_rect(50, 60, frame.area());

    let help_text = vec![
        "",
        " Navigation:",
        "   j / ↓    Move down",
        "   k / ↑    Move up",
        "   < / >    First / last course",
        "",
        " Actions:",
        "   a        Add course",
        "   m        Mark done / not done",
        "   o        Open link in browser",
        "   d        Delete course",
        "   r        Reload list",
        "",
        " Search:",
        "   /        Search by name",
        "   f        Cycle area filter",
        "   c        Clear search and filter",
        "",
        " General:",
        "   L        Sign out",
        "   ?        Toggle this help",
        "   q        Quit",
        "",
        " Press any key to close",
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_text.join("\n"))
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
