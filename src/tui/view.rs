use crate::tui::state::{AppState, EditTarget, InputMode, Screen};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    match state.screen {
        Screen::Launch => draw_launch(f, v_chunks[0]),
        Screen::Home => draw_home(f, state, v_chunks[0]),
        Screen::ListDetail(_) => draw_detail(f, state, v_chunks[0]),
        Screen::Settings => draw_settings(f, state, v_chunks[0]),
    }

    draw_footer(f, state, v_chunks[1]);
}

fn highlight() -> Style {
    Style::default()
        .add_modifier(Modifier::BOLD)
        .bg(Color::Blue)
}

fn draw_launch(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Smartshopper",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Shopping lists, categories and totals with tax."),
        Line::from(""),
        Line::from(Span::styled(
            "[ Enter App ]",
            Style::default().fg(Color::White).bg(Color::Blue),
        )),
    ];
    let launch = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(launch, area);
}

fn draw_home(f: &mut Frame, state: &mut AppState, area: Rect) {
    let list_items: Vec<ListItem> = state
        .session
        .shopping_lists
        .iter()
        .map(|name| ListItem::new(Line::from(name.as_str())))
        .collect();
    let title = format!(" Shopping Lists ({}) ", state.session.shopping_lists.len());
    let lists = List::new(list_items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(highlight());
    f.render_stateful_widget(lists, area, &mut state.list_state);
}

fn draw_detail(f: &mut Frame, state: &mut AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(4)])
        .split(area);

    let item_rows: Vec<ListItem> = state
        .session
        .items
        .iter()
        .map(|item| {
            let name = if item.name.is_empty() {
                "(unnamed)"
            } else {
                item.name.as_str()
            };
            let price_style = if crate::model::parse_amount(&item.price).is_some() {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<30}", name)),
                Span::styled(format!("{:>10}", item.price), price_style),
                Span::styled(
                    format!("  #{}", item.category),
                    Style::default().fg(Color::Cyan),
                ),
            ]))
        })
        .collect();

    let title = format!(" Shopping List: {} ", state.current_list_name());
    let items = List::new(item_rows)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(highlight());
    f.render_stateful_widget(items, chunks[0], &mut state.item_state);

    let summary = Paragraph::new(vec![
        Line::from(format!("Tax Rate: {}%", state.session.tax_rate)),
        Line::from(Span::styled(
            state.session.total_label(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ])
    .block(Block::default().borders(Borders::ALL).title(" Total "));
    f.render_widget(summary, chunks[1]);
}

fn draw_settings(f: &mut Frame, state: &mut AppState, area: Rect) {
    let cat_items: Vec<ListItem> = state
        .session
        .categories
        .iter()
        .map(|c| ListItem::new(Line::from(c.as_str())))
        .collect();
    let categories = List::new(cat_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Settings: Manage Categories "),
        )
        .highlight_style(highlight());
    f.render_stateful_widget(categories, area, &mut state.cat_state);
}

fn draw_footer(f: &mut Frame, state: &AppState, footer_area: Rect) {
    match &state.mode {
        InputMode::Editing(target) => {
            let (title, color) = match target {
                EditTarget::ListName(_) => (" Rename List ", Color::Yellow),
                EditTarget::CategoryName(_) => (" Rename Category ", Color::Yellow),
                EditTarget::ItemName(_) => (" Item Name ", Color::Magenta),
                EditTarget::ItemPrice(_) => (" Price ", Color::Green),
                EditTarget::TaxRate => (" Tax Rate ", Color::Blue),
            };
            let prefix = "> ";
            let input = Paragraph::new(format!("{}{}", prefix, state.input_buffer))
                .style(Style::default().fg(color))
                .block(Block::default().borders(Borders::ALL).title(title));
            f.render_widget(input, footer_area);
            let cursor_x = cursor_column(
                footer_area,
                prefix.chars().count() + state.cursor_position,
            );
            let cursor_y = footer_area.y + 1;
            f.set_cursor_position((cursor_x, cursor_y));
        }
        InputMode::Normal => {
            let f_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(footer_area);
            let status = Paragraph::new(state.message.clone())
                .style(Style::default().fg(Color::Cyan))
                .block(
                    Block::default()
                        .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
                        .title(" Status "),
                );
            let help_text = match state.screen {
                Screen::Launch => "Enter:Start | q:Quit",
                Screen::Home => "Enter:Open | a:Add | e:Rename | d:Del | s:Settings | q:Quit",
                Screen::ListDetail(_) => {
                    "a:Add | n:Name | p:Price | c:Category | t:Tax | d:Del | Esc:Back"
                }
                Screen::Settings => "a:Add | e:Rename | d:Del | Esc:Back",
            };
            let help = Paragraph::new(help_text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Right)
                .block(
                    Block::default()
                        .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
                        .title(" Actions "),
                );
            f.render_widget(status, f_chunks[0]);
            f.render_widget(help, f_chunks[1]);
        }
    }
}

/// Column for the input cursor, kept inside the footer's borders.
fn cursor_column(area: Rect, offset: usize) -> u16 {
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);
    let first = area.x.saturating_add(1);
    let last = area.right().saturating_sub(2).max(first);
    first.saturating_add(offset).min(last)
}
