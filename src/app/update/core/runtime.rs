use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::Effect;
use crate::file_io::{open_text_file, save_text_file};
use iced::Event;
use iced::Task;
use iced::event;
use iced::keyboard;
use iced::window;
use std::time::Instant;
use tracing::{info, warn};

impl App {
    pub(super) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::OpenScriptFile(path) => {
                info!(path = %path.display(), "Dispatching script import task");
                let requested_path = path.clone();
                Task::perform(
                    async move { open_text_file(&requested_path).map_err(|err| format!("{err:#}")) },
                    move |result| Message::ScriptFileOpened {
                        path: path.clone(),
                        result,
                    },
                )
            }
            Effect::SaveScriptFile { content, path } => Task::perform(
                async move {
                    save_text_file(&content, &path)
                        .map(|saved| saved.saved_path)
                        .map_err(|err| format!("{err:#}"))
                },
                Message::ScriptFileSaved,
            ),
            Effect::OpenExternalDisplay => {
                self.open_external_display(Instant::now());
                Task::none()
            }
            Effect::CloseExternalDisplay => {
                self.close_external_display();
                Task::none()
            }
            Effect::SetFullscreen(fullscreen) => {
                let Some(id) = self.window_id else {
                    warn!("No window id yet; cannot change fullscreen mode");
                    return Task::none();
                };
                let mode = if fullscreen {
                    window::Mode::Fullscreen
                } else {
                    window::Mode::Windowed
                };
                window::change_mode(id, mode)
            }
            Effect::FocusWindow => match self.window_id {
                Some(id) => window::gain_focus(id),
                None => Task::none(),
            },
            Effect::QuitSafely => {
                if self.editor.dirty {
                    self.flush_editor();
                }
                self.close_external_display();
                info!(role = ?self.role, "Exiting");
                iced::exit()
            }
        }
    }
}

pub(super) fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    window_id: window::Id,
) -> Option<Message> {
    if let Event::Window(window::Event::Opened { .. }) = event {
        return Some(Message::WindowOpened(window_id));
    }
    if status == event::Status::Captured {
        return None;
    }
    match event {
        Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized {
            width: size.width,
            height: size.height,
        }),
        Event::Window(window::Event::CloseRequested) => Some(Message::SafeQuit),
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            Some(Message::KeyPressed { key, modifiers })
        }
        _ => None,
    }
}
