use iced::widget::{canvas, column, container, image, row, stack, text};
use iced::{window, Alignment, ContentFit, Element, Length, Size, Subscription, Task, Theme};
use std::sync::Arc;
use std::time::Instant;

mod config;
mod error;
mod fetch;
mod logging;
mod render;
mod state;
mod ui;

use config::ViewerConfig;
use error::ViewerError;
use fetch::{ImageFetcher, LoadTicket};
use render::overlay::Reticle;
use state::store::ViewerState;
use state::target::TargetId;

/// What is currently on the drawing surface
struct Screen {
    frame: image::Handle,
    reticle: Reticle,
    /// Filter phase the frame was rendered with
    phase: f64,
}

/// Main application state
struct QuantumScope {
    state: ViewerState,
    /// Shared HTTP client for every target load
    fetcher: ImageFetcher,
    /// Last rendered frame; None until the first image has loaded
    screen: Option<Screen>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User picked a target in the panel
    SelectTarget(TargetId),
    /// Background fetch finished
    ImageFetched(LoadTicket, Result<Arc<::image::RgbaImage>, ViewerError>),
    /// Connect / disconnect the simulated quantum cloud
    ToggleConnection,
    /// Flip the interference filter
    ToggleFilter,
    /// Display refresh
    Frame(Instant),
    /// Window is about to close
    CloseRequested(window::Id),
}

impl QuantumScope {
    /// Create a new instance of the application
    fn new(fetcher: ImageFetcher) -> (Self, Task<Message>) {
        let config = ViewerConfig::default();
        match config.to_json() {
            Ok(json) => log::info!("⚙️  Viewer config: {}", json),
            Err(e) => log::warn!("⚠️  Could not serialize viewer config: {}", e),
        }

        let mut app = QuantumScope {
            state: ViewerState::new(config),
            fetcher,
            screen: None,
        };

        log::info!("🔭 Quantum Scope initialized");

        let task = app.select(TargetId::Andromeda);
        (app, task)
    }

    fn select(&mut self, id: TargetId) -> Task<Message> {
        let ticket = self.state.select_target(id);
        let fetch = self.fetcher.clone().fetch(ticket.uri().to_string());
        Task::perform(fetch, move |result| {
            Message::ImageFetched(ticket, result)
        })
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SelectTarget(id) => self.select(id),
            Message::ImageFetched(ticket, result) => {
                self.state.finish_load(ticket, result);
                Task::none()
            }
            Message::ToggleConnection => {
                self.state.toggle_connection();
                Task::none()
            }
            Message::ToggleFilter => {
                self.state.toggle_filter();
                Task::none()
            }
            Message::Frame(_) => {
                self.state.poll_session();

                if let Some(frame) = self.state.render_frame() {
                    self.screen = Some(Screen {
                        frame: image::Handle::from_rgba(
                            frame.surface.width,
                            frame.surface.height,
                            frame.pixels,
                        ),
                        reticle: frame.reticle,
                        phase: frame.phase,
                    });
                }
                Task::none()
            }
            Message::CloseRequested(id) => {
                self.state.teardown();
                self.screen = None;
                window::close(id)
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let surface = self.state.config().surface;
        let width = Length::Fixed(surface.width as f32);
        let height = Length::Fixed(surface.height as f32);

        let viewport: Element<Message> = match &self.screen {
            Some(screen) => stack![
                image(screen.frame.clone())
                    .width(width)
                    .height(height)
                    .content_fit(ContentFit::Fill),
                canvas(ui::reticle::ReticleOverlay { reticle: screen.reticle })
                    .width(width)
                    .height(height),
            ]
            .into(),
            None => container(text(if self.state.is_loading() {
                "Acquiring signal..."
            } else {
                "No signal"
            }))
            .width(width)
            .height(height)
            .center_x(width)
            .center_y(height)
            .into(),
        };

        // The shown image can lag behind the selection while a load is in flight
        let showing = self
            .state
            .loaded_image()
            .map_or("-", |loaded| loaded.target.target().name);
        let phase = self.screen.as_ref().map_or(0.0, |screen| screen.phase);
        let status = text(format!(
            "{}  |  phase {:.2}  |  {} frames",
            showing,
            phase,
            self.state.frames().frames_rendered(),
        ))
        .size(12);

        let left = column![viewport, status].spacing(8).align_x(Alignment::Start);

        row![left, ui::panel::view(&self.state)]
            .spacing(16)
            .padding(16)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        let frames = if self.state.render_loop_running() {
            window::frames().map(Message::Frame)
        } else {
            Subscription::none()
        };

        Subscription::batch([frames, window::close_requests().map(Message::CloseRequested)])
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    let _logger = match logging::setup_logging("info", "logs") {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("⚠️  Logger initialization failed: {}", e);
            None
        }
    };

    let fetcher = match ImageFetcher::new() {
        Ok(fetcher) => fetcher,
        Err(e) => {
            log::error!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let surface = ViewerConfig::default().surface;
    let window_size = Size::new(
        surface.width as f32 + ui::panel::PANEL_WIDTH + 64.0,
        surface.height as f32 + 80.0,
    );

    iced::application("Quantum Scope", QuantumScope::update, QuantumScope::view)
        .subscription(QuantumScope::subscription)
        .theme(QuantumScope::theme)
        .window_size(window_size)
        .exit_on_close_request(false)
        .centered()
        .run_with(move || QuantumScope::new(fetcher))
}
