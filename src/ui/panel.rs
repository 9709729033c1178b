/// Control panel next to the viewport: targets, telemetry, session, log
use iced::widget::{button, column, container, horizontal_rule, row, text, Column};
use iced::{Color, Element, Length};

use crate::render::FilterMode;
use crate::state::session::SessionState;
use crate::state::store::ViewerState;
use crate::state::target::TargetId;
use crate::Message;

pub const PANEL_WIDTH: f32 = 340.0;

const CYAN: Color = Color::from_rgb(0.0, 1.0, 1.0);
const DIM: Color = Color::from_rgb(0.55, 0.6, 0.65);

pub fn view(state: &ViewerState) -> Element<'_, Message> {
    let targets = TargetId::ALL.iter().fold(Column::new().spacing(6), |col, &id| {
        let style: fn(&iced::Theme, button::Status) -> button::Style = if id == state.current_target().id {
            button::primary
        } else {
            button::secondary
        };
        col.push(
            button(text(id.target().name).size(14))
                .width(Length::Fill)
                .style(style)
                .on_press(Message::SelectTarget(id)),
        )
    });

    let target = state.current_target();
    let telemetry = column![
        telemetry_row("RA", target.right_ascension),
        telemetry_row("DEC", target.declination),
        telemetry_row("DIST", target.distance),
    ]
    .spacing(4);

    let session = state.session_state();
    let session_color = if session.is_busy() {
        Color::from_rgb(1.0, 0.8, 0.2)
    } else if session == SessionState::Active {
        CYAN
    } else {
        DIM
    };

    let filter_label = match state.filter_mode() {
        FilterMode::Quantum => "Quantum Filter: ON",
        FilterMode::Raw => "Quantum Filter: OFF",
    };

    let controls = column![
        text(format!("Link: {}", session)).size(16).color(session_color),
        button(text(session.action_label()))
            .width(Length::Fill)
            .padding(10)
            .on_press(Message::ToggleConnection),
        button(text(filter_label))
            .width(Length::Fill)
            .padding(10)
            .style(button::secondary)
            .on_press(Message::ToggleFilter),
    ]
    .spacing(8);

    let log = state.log();
    let entries = log.entries().fold(Column::new().spacing(2), |col, entry| {
        col.push(
            row![
                text(&entry.timestamp).size(12).color(DIM),
                text(&entry.message).size(12),
            ]
            .spacing(8),
        )
    });

    let content = column![
        text("QUANTUM SCOPE").size(28),
        text("Targets").size(14).color(DIM),
        targets,
        horizontal_rule(1),
        telemetry,
        horizontal_rule(1),
        controls,
        horizontal_rule(1),
        text(format!("Mission Log ({}/{})", log.len(), state.config().log_capacity))
            .size(14)
            .color(DIM),
        if log.is_empty() {
            Element::from(text("No entries").size(12).color(DIM))
        } else {
            entries.into()
        },
    ]
    .spacing(12)
    .padding(16);

    container(content)
        .width(Length::Fixed(PANEL_WIDTH))
        .height(Length::Fill)
        .into()
}

fn telemetry_row<'a>(label: &'a str, value: &'a str) -> Element<'a, Message> {
    row![
        text(label).size(13).color(DIM).width(Length::Fixed(48.0)),
        text(value).size(13),
    ]
    .into()
}
