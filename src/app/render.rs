//! TUI描画関連の関数。

use ratatui::{
    Frame,
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::layout;

use super::App;

/// 画面全体のレイアウトを描画する。
pub fn draw(f: &mut Frame, app: &App) {
    let main_layout = layout::create_main_layout(f.area());
    let body_layout = layout::create_body_layout(main_layout.body, app.cfg.layout.menu_width);

    draw_side_menu(f, app, body_layout.side_menu);
    draw_divider(f, &app.cfg.layout.divider_symbol, body_layout.divider);
    draw_content(f, app, body_layout.content);
    f.render_widget(build_status_bar(app), main_layout.status_bar);
}

/// ページ見出しの一覧を描画し、現在ページを強調する。
fn draw_side_menu(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = (0..app.selector.total_pages())
        .filter_map(|i| app.selector.page_at(i).ok())
        .enumerate()
        .map(|(i, page)| ListItem::new(format!("{} {}", i + 1, page.title)))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("MENU"))
        .highlight_style(
            Style::default()
                .bg(Color::Rgb(255, 140, 0))
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    state.select(app.selector.current().ok());
    f.render_stateful_widget(list, area, &mut state);
}

/// 区切り線を縦に並べて描画する。
fn draw_divider(f: &mut Frame, symbol: &str, area: Rect) {
    let lines: Vec<Line> = (0..area.height).map(|_| Line::raw(symbol)).collect();
    let divider = Paragraph::new(lines).style(Style::default().fg(Color::DarkGray));
    f.render_widget(divider, area);
}

/// 現在ページの本文を描画する。
fn draw_content(f: &mut Frame, app: &App, area: Rect) {
    let (title, body) = match app.selector.current_page() {
        Ok(page) => (page.title, page.body),
        Err(_) => ("-".to_string(), "No pages configured".to_string()),
    };
    let content = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: true });
    f.render_widget(content, area);
}

/// ステータスバーを構築する。
fn build_status_bar(app: &App) -> Paragraph<'static> {
    let position = match app.selector.current() {
        Ok(i) => format!("Page {}/{}", i + 1, app.selector.total_pages()),
        Err(_) => "Page -/0".to_string(),
    };

    // エラーの有無でステータス文字列を切り替える。
    let status_text = match &app.ui.error {
        Some(err) => format!("[{position}] ERROR: {err}"),
        None => format!("[{position}] {}", app.ui.status),
    };

    let mut status_bar = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("STATUS"))
        .wrap(Wrap { trim: true });

    // エラー時は赤色で強調表示する。
    if app.ui.error.is_some() {
        status_bar = status_bar.style(Style::default().fg(Color::Red));
    }

    status_bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, shortcuts::Shortcuts};
    use ratatui::{Terminal, backend::TestBackend};

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_menu_divider_and_current_page() {
        let mut app = App::new(Config::default(), Shortcuts::default()).unwrap();
        app.selector.select(1).unwrap();
        app.drain_page_events();

        let screen = render(&app);
        assert!(screen.contains("MENU"));
        assert!(screen.contains("1 Connect"));
        assert!(screen.contains("4 Settings"));
        assert!(screen.contains("No LAN peers discovered yet."));
        assert!(screen.contains("[Page 2/4]"));

        // 区切り線はメニュー幅のすぐ右の列に並ぶ。
        let divider_col = app.cfg.layout.menu_width as usize;
        let first_row: Vec<char> = screen.lines().next().unwrap().chars().collect();
        assert_eq!(first_row[divider_col], '│');
    }

    #[test]
    fn test_renders_error_in_status_bar() {
        let mut app = App::new(Config::default(), Shortcuts::default()).unwrap();
        app.ui.error = Some("page index 8 out of range (total pages: 4)".into());

        let screen = render(&app);
        assert!(screen.contains("ERROR: page index 8"));
    }
}
