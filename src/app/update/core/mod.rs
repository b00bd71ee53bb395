mod reducer;
mod runtime;
mod shortcuts;

use super::super::messages::Message;
use super::super::state::{
    App, AUTOSAVE_POLL_INTERVAL, DisplayRole, ELAPSED_TICK_INTERVAL, SIGNAL_POLL_INTERVAL,
};
use crate::external::display_inbox;
use iced::event;
use iced::time;
use iced::window;
use iced::{Subscription, Task};

impl App {
    pub fn subscription(app: &App) -> Subscription<Message> {
        let mut subscriptions: Vec<Subscription<Message>> = vec![
            event::listen_with(runtime::runtime_event_to_message),
            time::every(SIGNAL_POLL_INTERVAL).map(|_| Message::PollSystemSignals),
        ];

        match app.role {
            DisplayRole::Primary => {
                if app.store.get().playback.is_playing {
                    subscriptions.push(window::frames().map(Message::Frame));
                    subscriptions
                        .push(time::every(ELAPSED_TICK_INTERVAL).map(|_| Message::ElapsedTick));
                }
                if app
                    .publisher
                    .as_ref()
                    .is_some_and(|publisher| publisher.is_attached())
                {
                    subscriptions.push(
                        time::every(app.config.sync_poll_interval()).map(Message::SyncTick),
                    );
                }
                if app.editor.dirty {
                    subscriptions
                        .push(time::every(AUTOSAVE_POLL_INTERVAL).map(Message::AutosaveTick));
                }
            }
            DisplayRole::External => {
                subscriptions.push(display_inbox().map(Message::DisplayInbox));
            }
        }

        Subscription::batch(subscriptions)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let effects = self.reduce(message);
        if effects.is_empty() {
            Task::none()
        } else {
            Task::batch(effects.into_iter().map(|effect| self.run_effect(effect)))
        }
    }
}
