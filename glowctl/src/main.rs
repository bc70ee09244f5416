use std::sync::Arc;

use glowctl_core::{
    Color, DeviceState, HttpLightController, LightController, PanelState, Power, UiColor,
};
use iced::keyboard::{self, Event as KeyboardEvent, Key};
use iced::widget::{button, column, container, row, slider, text};
use iced::{Background, Element, Length, Subscription, Task, Theme};

/// Device origin used when no address is given on the command line.
const DEFAULT_BASE_URL: &str = "http://esp8266.local";

pub fn main() -> iced::Result {
    env_logger::init();

    iced::application(GlowApp::boot, GlowApp::update, GlowApp::view)
        .title("Glowctl - Light Panel")
        .subscription(GlowApp::subscription)
        .theme(GlowApp::theme)
        .run()
}

// =============================================================================
// Color Picker Host
// =============================================================================

/// Capability surface the control layer expects from a color picker.
///
/// The panel only ever reads the picked value and writes the value it
/// wants displayed; how the picker renders is its own business.
trait ColorPickerHost {
    /// The currently picked color, in UI-native HSV ranges.
    fn value(&self) -> UiColor;

    /// Display the given color, e.g. after a confirm or revert.
    fn set_value(&mut self, hsv: UiColor);
}

/// Slider-backed HSV picker.
#[derive(Debug, Default)]
struct SliderPicker {
    hue: f32,
    saturation: f32,
    value: f32,
}

impl ColorPickerHost for SliderPicker {
    fn value(&self) -> UiColor {
        UiColor::new(self.hue, self.saturation, self.value)
    }

    fn set_value(&mut self, hsv: UiColor) {
        self.hue = hsv.hue;
        self.saturation = hsv.saturation;
        self.value = hsv.value;
    }
}

// =============================================================================
// Application
// =============================================================================

struct GlowApp {
    controller: Arc<HttpLightController>,
    connected: bool,
    status: String,
    panel: PanelState,
    picker: SliderPicker,
}

#[derive(Debug, Clone)]
enum Message {
    // Session
    Connected(Result<DeviceState, String>),

    // Power buttons
    PowerClicked(Power),
    PowerSettled(Result<Power, String>),

    // Color picker
    HueChanged(f32),
    SaturationChanged(f32),
    ValueChanged(f32),
    ColorPicked,
    ColorSettled(Result<Color, String>),

    // Keyboard event
    KeyboardEvent(KeyboardEvent),
}

impl GlowApp {
    fn boot() -> (Self, Task<Message>) {
        let base_url = std::env::args()
            .nth(1)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let controller = Arc::new(HttpLightController::new(base_url));

        let app = Self {
            controller: controller.clone(),
            connected: false,
            status: "Connecting, please wait...".to_string(),
            panel: PanelState::default(),
            picker: SliderPicker::default(),
        };

        let fetch = Task::perform(
            async move { controller.fetch_state().await.map_err(|e| e.to_string()) },
            Message::Connected,
        );

        (app, fetch)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Connected(Ok(state)) => {
                self.panel = PanelState::from_device(state);
                self.picker.set_value(state.color.to_ui());
                self.connected = true;
                self.status = "Ready".to_string();
            }

            Message::Connected(Err(err)) => {
                log::error!("initial fetch failed: {err}");
                self.status = "Failed".to_string();
            }

            Message::PowerClicked(value) => {
                if !self.connected || self.panel.power_pending() || self.panel.power() == value {
                    return Task::none();
                }

                self.panel.stage_power(value);
                self.status = "Setting power, please wait...".to_string();

                let controller = self.controller.clone();
                return Task::perform(
                    async move { controller.set_power(value).await.map_err(|e| e.to_string()) },
                    Message::PowerSettled,
                );
            }

            Message::PowerSettled(Ok(accepted)) => {
                self.panel.confirm_power(accepted);
                self.status = format!("Set power: {accepted}");
            }

            Message::PowerSettled(Err(err)) => {
                log::error!("power update failed: {err}");
                self.panel.reject_power();
                self.status = "Failed setting power".to_string();
            }

            Message::HueChanged(hue) => {
                self.picker.hue = hue;
            }

            Message::SaturationChanged(saturation) => {
                self.picker.saturation = saturation;
            }

            Message::ValueChanged(value) => {
                self.picker.value = value;
            }

            Message::ColorPicked => {
                if !self.connected || self.panel.color_pending() {
                    return Task::none();
                }

                let color = self.picker.value().to_device();
                self.panel.stage_color(color);
                self.status = "Setting color, please wait...".to_string();

                let controller = self.controller.clone();
                return Task::perform(
                    async move { controller.set_color(color).await.map_err(|e| e.to_string()) },
                    Message::ColorSettled,
                );
            }

            Message::ColorSettled(Ok(accepted)) => {
                self.panel.confirm_color(accepted);
                self.picker.set_value(accepted.to_ui());
                self.status = format!("Set color: {accepted}");
            }

            Message::ColorSettled(Err(err)) => {
                log::error!("color update failed: {err}");
                self.panel.reject_color();
                self.picker.set_value(self.panel.color().to_ui());
                self.status = "Failed setting color".to_string();
            }

            Message::KeyboardEvent(event) => {
                if let KeyboardEvent::KeyPressed { key, .. } = event {
                    if let Key::Character(c) = key.as_ref() {
                        if c == "p" && self.connected && !self.panel.power_pending() {
                            return self.update(Message::PowerClicked(self.panel.power().toggled()));
                        }
                    }
                }
            }
        }

        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let title = text("Glowctl").size(24);
        let status = text(&self.status).size(14);

        // Until the initial fetch succeeds, only the status line is shown.
        if !self.connected {
            let content = column![title, status].spacing(15).padding(20);
            return container(content).into();
        }

        let power = self.panel.power();
        let power_row = row![
            power_button("On", Power::On, power, self.panel.power_pending()),
            power_button("Off", Power::Off, power, self.panel.power_pending()),
        ]
        .spacing(10);

        let ui = self.picker.value();
        let color_section = column![
            text(format!("Hue: {:.0}\u{b0}", ui.hue)).size(14),
            slider(0.0..=360.0, ui.hue, Message::HueChanged)
                .step(1.0)
                .on_release(Message::ColorPicked),
            text(format!("Saturation: {:.0}%", ui.saturation)).size(14),
            slider(0.0..=100.0, ui.saturation, Message::SaturationChanged)
                .step(1.0)
                .on_release(Message::ColorPicked),
            text(format!("Value: {:.0}%", ui.value)).size(14),
            slider(0.0..=100.0, ui.value, Message::ValueChanged)
                .step(1.0)
                .on_release(Message::ColorPicked),
            swatch(ui),
        ]
        .spacing(5);

        // Keyboard shortcuts hint
        let shortcuts_hint = text("Shortcuts: p (toggle power)").size(12);

        let content = column![
            title,
            status,
            text("Power:").size(16),
            power_row,
            text("Color:").size(16),
            color_section,
            shortcuts_hint,
        ]
        .spacing(15)
        .padding(20);

        container(content).into()
    }

    fn subscription(&self) -> Subscription<Message> {
        keyboard::listen().map(Message::KeyboardEvent)
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn power_button(label: &str, value: Power, current: Power, pending: bool) -> Element<'_, Message> {
    let style = if value == current {
        button::primary
    } else {
        button::secondary
    };
    let btn = button(text(label)).style(style);

    if pending || value == current {
        // Pending update or already-selected state - don't allow clicking
        btn.into()
    } else {
        btn.on_press(Message::PowerClicked(value)).into()
    }
}

/// Preview of the currently picked color.
fn swatch(ui: UiColor) -> Element<'static, Message> {
    let rgb = hsv_to_rgb(ui);
    container(text(""))
        .width(Length::Fixed(120.0))
        .height(Length::Fixed(32.0))
        .style(move |_theme: &Theme| container::Style {
            background: Some(Background::Color(rgb)),
            ..container::Style::default()
        })
        .into()
}

/// HSV (degrees, percent, percent) to RGB, for the preview swatch only.
fn hsv_to_rgb(ui: UiColor) -> iced::Color {
    let h = ui.hue.rem_euclid(360.0) / 60.0;
    let s = (ui.saturation / 100.0).clamp(0.0, 1.0);
    let v = (ui.value / 100.0).clamp(0.0, 1.0);

    let c = v * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let m = v - c;
    iced::Color::from_rgb(r + m, g + m, b + m)
}
