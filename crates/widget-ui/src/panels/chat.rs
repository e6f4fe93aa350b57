//! Chat window: header, transcript and composer.

use chrono::{DateTime, Local};
use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use widget_types::{config::ResolvedConfig, message::Message};

use crate::state::UiState;
use crate::theme::*;

const BUBBLE_MAX_WIDTH: f32 = 0.8;
const FOOTER_HEIGHT: f32 = 64.0;

/// What the user asked for this frame
#[derive(Debug, Clone, PartialEq)]
pub enum ChatAction {
    None,
    Send(String),
    Close,
}

/// Render the chat window into `ui`.
pub fn chat_window(ui: &mut egui::Ui, state: &mut UiState, config: &ResolvedConfig) -> ChatAction {
    let theme = WidgetTheme::new(&config.primary_color, config.is_mobile);
    let mut action = ChatAction::None;

    ui.vertical(|ui| {
        if header(ui, &theme, config) {
            action = ChatAction::Close;
        }

        let available_height = ui.available_height() - FOOTER_HEIGHT;
        ScrollArea::vertical()
            .max_height(available_height)
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.add_space(8.0);
                for (i, message) in state.messages.iter().enumerate() {
                    render_message(ui, &theme, config, message, state.shows_timestamp(i));
                    ui.add_space(6.0);
                }
            });

        if let Some(notice) = &state.error_notice {
            egui::Frame::default()
                .fill(ERROR_BG)
                .inner_margin(Vec2::new(theme.padding().x, 4.0))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(notice).color(ERROR).small());
                });
        }

        if let Some(text) = footer(ui, &theme, state, config) {
            action = ChatAction::Send(text);
        }
    });

    action
}

/// Returns true when the close button was clicked.
fn header(ui: &mut egui::Ui, theme: &WidgetTheme, config: &ResolvedConfig) -> bool {
    let mut close = false;

    egui::Frame::default()
        .fill(theme.primary)
        .inner_margin(theme.padding())
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.heading(RichText::new(&config.title).color(BACKGROUND).strong());
                if config.is_closeable {
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let button = egui::Button::new(RichText::new("✕").color(BACKGROUND))
                            .frame(false);
                        if ui.add(button).on_hover_text("Close").clicked() {
                            close = true;
                        }
                    });
                }
            });
            ui.label(RichText::new(&config.subtitle).color(OFFSET));
        });

    close
}

fn render_message(
    ui: &mut egui::Ui,
    theme: &WidgetTheme,
    config: &ResolvedConfig,
    message: &Message,
    show_timestamp: bool,
) {
    let is_customer = message.is_customer();
    let (align, fill, text_color) = if is_customer {
        (Align::Max, theme.primary, BACKGROUND)
    } else {
        (Align::Min, BOT_BUBBLE, TEXT_PRIMARY)
    };
    let max_width = ui.available_width() * BUBBLE_MAX_WIDTH;

    ui.with_layout(Layout::top_down(align), |ui| {
        egui::Frame::default()
            .outer_margin(Vec2::new(theme.padding().x, 0.0))
            .show(ui, |ui| {
                ui.with_layout(Layout::top_down(align), |ui| {
                    if !is_customer {
                        ui.label(
                            RichText::new(sender_label(config))
                                .color(TEXT_SECONDARY)
                                .small(),
                        );
                    }

                    egui::Frame::default()
                        .fill(fill)
                        .corner_radius(BUBBLE_ROUNDING)
                        .inner_margin(Vec2::new(12.0, 8.0))
                        .show(ui, |ui| {
                            ui.set_max_width(max_width);
                            ui.add(
                                egui::Label::new(
                                    RichText::new(&message.body)
                                        .color(text_color)
                                        .size(theme.body_size()),
                                )
                                .wrap(),
                            );
                        });

                    if show_timestamp {
                        if let Some(time) = message.timestamp().and_then(format_timestamp) {
                            let text = if is_customer {
                                format!("Sent {}", time)
                            } else {
                                time
                            };
                            ui.label(RichText::new(text).color(TEXT_SECONDARY).small());
                        }
                    }
                });
            });
    });
}

/// Returns the text to send when the user submitted the composer.
fn footer(
    ui: &mut egui::Ui,
    theme: &WidgetTheme,
    state: &mut UiState,
    config: &ResolvedConfig,
) -> Option<String> {
    let mut submitted = None;

    ui.separator();
    egui::Frame::default()
        .inner_margin(Vec2::new(theme.padding().x, 8.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                let input = egui::TextEdit::singleline(&mut state.input_text)
                    .hint_text(config.new_message_placeholder.as_str())
                    .desired_width(ui.available_width() - 70.0)
                    .font(egui::FontId::proportional(theme.body_size()));

                let response = ui.add_enabled(!state.is_sending, input);
                if state.focus_input {
                    response.request_focus();
                    state.focus_input = false;
                }

                let send_enabled = state.can_send();
                let send_btn = ui.add_enabled(
                    send_enabled,
                    egui::Button::new(RichText::new("Send").color(if send_enabled {
                        BACKGROUND
                    } else {
                        TEXT_SECONDARY
                    }))
                    .fill(if send_enabled { theme.primary } else { OFFSET })
                    .corner_radius(BUBBLE_ROUNDING)
                    .min_size(Vec2::new(60.0, 0.0)),
                );

                let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if enter || send_btn.clicked() {
                    submitted = state.take_submission();
                    if submitted.is_some() {
                        response.request_focus();
                    }
                }
            });
        });

    submitted
}

pub fn sender_label(config: &ResolvedConfig) -> &str {
    match config.company_name.as_deref() {
        Some(name) if !name.trim().is_empty() => name,
        _ => "Bot",
    }
}

/// Local `HH:MM` for an RFC 3339 timestamp.
pub fn format_timestamp(timestamp: &str) -> Option<String> {
    let parsed = DateTime::parse_from_rfc3339(timestamp).ok()?;
    Some(parsed.with_timezone(&Local).format("%H:%M").to_string())
}
