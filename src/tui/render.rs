//! View — pure rendering from the app model to widgets.
//!
//! Left half: the procedure input. Right half: the three stage outputs, each
//! with its own token-metrics line. One status bar at the bottom.

use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;

use super::app::{App, Focus, Status};
use super::editor::TextArea;

const HELP: &str = "Tab switch pane · F2 Read Snowflake · F3 Save Requirements · F4 Convert to PySpark · F5 Calculate Accuracy · Esc quit";

pub fn draw(frame: &mut Frame, app: &App) {
    let [main, status_bar] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(main);

    let [requirements, req_metrics, pyspark, py_metrics, accuracy, acc_metrics] =
        Layout::vertical([
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .areas(right);

    let state = app.session();

    draw_editor(
        frame,
        left,
        " Snowflake Stored Procedure ",
        &app.procedure,
        app.focus == Focus::Procedure,
    );
    draw_editor(
        frame,
        requirements,
        " Requirements in English ",
        &app.requirements,
        app.focus == Focus::Requirements,
    );
    draw_metrics(frame, req_metrics, "requirements", &state.requirements_metrics);

    draw_output(frame, pyspark, " PySpark Code ", &state.pyspark_code);
    draw_metrics(frame, py_metrics, "pyspark", &state.pyspark_metrics);

    draw_output(frame, accuracy, " Accuracy ", &state.accuracy_report);
    draw_metrics(frame, acc_metrics, "accuracy", &state.accuracy_metrics);

    draw_status(frame, status_bar, &app.status);
}

fn draw_editor(frame: &mut Frame, area: Rect, title: &str, editor: &TextArea, focused: bool) {
    let border_style = if focused {
        Style::new().fg(Color::Cyan)
    } else {
        Style::new().fg(Color::DarkGray)
    };
    let block = Block::bordered().title(title).border_style(border_style);
    let inner = block.inner(area);

    let (row, col) = editor.cursor_line_col();
    let row = row.min(u16::MAX as usize) as u16;
    let col = col.min(u16::MAX as usize) as u16;

    // Scroll so the cursor stays visible; no soft wrap in editor panes.
    let v_scroll = row.saturating_sub(inner.height.saturating_sub(1));
    let h_scroll = col.saturating_sub(inner.width.saturating_sub(1));

    let paragraph = Paragraph::new(editor.content().to_string())
        .block(block)
        .scroll((v_scroll, h_scroll));
    frame.render_widget(paragraph, area);

    if focused && inner.width > 0 && inner.height > 0 {
        frame.set_cursor_position(Position::new(
            inner.x + (col - h_scroll).min(inner.width - 1),
            inner.y + (row - v_scroll).min(inner.height - 1),
        ));
    }
}

fn draw_output(frame: &mut Frame, area: Rect, title: &str, text: &str) {
    let block = Block::bordered()
        .title(title)
        .border_style(Style::new().fg(Color::DarkGray));
    let body = if text.is_empty() {
        "(not generated yet)"
    } else {
        text
    };
    let paragraph = Paragraph::new(body.to_string())
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn draw_metrics(frame: &mut Frame, area: Rect, label: &str, value: &str) {
    let text = if value.is_empty() {
        format!(" {label} tokens: —")
    } else {
        format!(" {label} tokens: {value}")
    };
    frame.render_widget(
        Paragraph::new(text).style(Style::new().fg(Color::DarkGray)),
        area,
    );
}

fn draw_status(frame: &mut Frame, area: Rect, status: &Status) {
    let (text, style) = match status {
        Status::Ready => (HELP.to_string(), Style::new().fg(Color::DarkGray)),
        Status::Busy(label) => (
            format!("{label} (blocking until the model responds)"),
            Style::new().fg(Color::Yellow),
        ),
        Status::Info(msg) => (format!("{msg}  ·  {HELP}"), Style::new().fg(Color::Green)),
        Status::Error(msg) => (msg.clone(), Style::new().fg(Color::Red)),
    };
    frame.render_widget(Paragraph::new(text).style(style), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use crate::config::Config;
    use crate::llm::client::LlmError;
    use crate::llm::{Completion, Inference};

    struct NoInference;

    #[async_trait]
    impl Inference for NoInference {
        async fn run(&self, _model: &str, _prompt: &str) -> Result<Completion, LlmError> {
            Err(LlmError::InvalidResponse("not wired in tests".into()))
        }
    }

    #[test]
    fn draw_smoke_test() {
        let mut app = App::new(Arc::new(NoInference), Config::for_tests());
        app.procedure.insert_str("CREATE PROCEDURE p()\nBEGIN\nEND;");
        app.status = Status::Error("Inference failed: something".into());

        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, &app)).unwrap();

        let rendered = format!("{:?}", terminal.backend().buffer());
        assert!(rendered.contains("Snowflake Stored Procedure"));
        assert!(rendered.contains("PySpark Code"));
        assert!(rendered.contains("not generated yet"));
    }

    #[test]
    fn draw_survives_tiny_terminal() {
        let app = App::new(Arc::new(NoInference), Config::for_tests());
        let backend = TestBackend::new(10, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, &app)).unwrap();
    }
}
