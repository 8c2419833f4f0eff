//! Terminal rendering of a scene.

pub mod game_common;
pub mod world_view;

use crate::core::GameState;
use crate::input::Projection;
use crate::leaderboard::LeaderboardView;
use crate::scene::Scene;
use game_common::{
    create_game_layout, render_alert, render_info_panel_frame, render_leaderboard,
    render_status_bar,
};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use world_view::WorldView;

const INFO_PANEL_WIDTH: u16 = 22;

/// Draw the scene and any modal on top. Returns the projection used for
/// the play area so clicks can be mapped back to world points.
pub fn draw(frame: &mut Frame, scene: &Scene, modal: Option<&LeaderboardView>) -> Projection {
    let area = frame.size();
    let layout = create_game_layout(frame, area, " Pippin ", Color::Cyan, INFO_PANEL_WIDTH);

    let projection = Projection::fit(layout.content, scene.world().viewport);
    frame.render_widget(WorldView::new(scene, projection), projection.area);

    render_status_bar_content(frame, layout.status_bar, scene);
    render_info_panel(frame, layout.info_panel, scene);

    match modal {
        Some(LeaderboardView::Scores(scores)) => render_leaderboard(frame, area, scores),
        Some(LeaderboardView::Unavailable { title, message }) => {
            render_alert(frame, area, title, message)
        }
        None => {}
    }

    projection
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, scene: &Scene) {
    match scene.state() {
        GameState::Tutorial => render_status_bar(
            frame,
            area,
            "Tap low on the screen to start!",
            Color::Yellow,
            &[("[Space/Click]", "Start"), ("[M]", "Music"), ("[Q]", "Quit")],
        ),
        GameState::Play => render_status_bar(
            frame,
            area,
            &format!("Score: {}", scene.score()),
            Color::Green,
            &[("[Space/Click]", "Flap"), ("[M]", "Music"), ("[Q]", "Quit")],
        ),
        GameState::GameOver => render_status_bar(
            frame,
            area,
            &format!("Crashed with {} points", scene.score()),
            Color::Red,
            &[("[R]", "Retry"), ("[L]", "Leaders"), ("[Q]", "Quit")],
        ),
    }
}

fn render_info_panel(frame: &mut Frame, area: Rect, scene: &Scene) {
    let inner = render_info_panel_frame(frame, area);

    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let label = Style::default().fg(Color::DarkGray);
    let lines = vec![
        Line::from(Span::styled(
            format!(" {} ", scene.state().name()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Score: ", label),
            Span::styled(
                format!("{}", scene.score()),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Best: ", label),
            Span::styled(
                format!("{}", scene.best().max(scene.score())),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Device: ", label),
            Span::styled(
                format!("{:?}", scene.session().device()),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Sound: ", label),
            Span::styled(
                if scene.music_button().is_muted() { "off" } else { "on" },
                Style::default().fg(Color::White),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
