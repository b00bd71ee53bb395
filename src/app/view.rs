use super::canvas::PrompterCanvas;
use super::messages::Message;
use super::state::{
    App, CONTROL_BAR_HEIGHT, CUE_COLOR_PRESETS, SETTINGS_PANEL_WIDTH, SIDEBAR_WIDTH,
};
use iced::alignment::Vertical;
use iced::widget::{
    Canvas, Column, button, checkbox, column, container, horizontal_space, pick_list, row,
    scrollable, slider, text, text_editor, text_input,
};
use iced::{Color, Element, Length};
use prompter_core::model::{
    FONT_SIZE_STEP, MAX_CUE_OPACITY, MAX_CUE_POSITION, MAX_CUE_THICKNESS, MAX_FONT_SIZE,
    MAX_SPEED, MIN_CUE_OPACITY, MIN_CUE_POSITION, MIN_CUE_THICKNESS, MIN_FONT_SIZE, MIN_SPEED,
    SPEED_STEP, parse_hex_color,
};
use prompter_core::{CueDirection, CueStyle};

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        if !self.is_primary() {
            return container(self.prompter_surface())
                .width(Length::Fill)
                .height(Length::Fill)
                .into();
        }

        let body: Element<'_, Message> = if self.editor.visible {
            self.editor_panel()
        } else {
            self.prompter_surface()
        };

        let mut main = row![column![self.controls_bar(), body].width(Length::Fill)];
        if self.ui.show_settings {
            main = main.push(self.settings_panel());
        }

        let mut layout = row![];
        if !self.store.get().settings.sidebar_collapsed {
            layout = layout.push(self.sidebar());
        }
        layout
            .push(main)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn prompter_surface(&self) -> Element<'_, Message> {
        let state = self.store.get();
        Canvas::new(PrompterCanvas {
            layout: &self.surface.layout,
            settings: &state.settings,
            position: self.paint_position(),
            progress: self.progress(),
            viewport: self.surface.viewport,
            line_spacing: self.config.line_spacing,
            interactive: self.is_primary(),
        })
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    fn controls_bar(&self) -> Element<'_, Message> {
        let playback = &self.store.get().playback;
        let settings = &self.store.get().settings;

        let play_label = if playback.is_playing { "Pause" } else { "Play" };
        let sidebar_label = if settings.sidebar_collapsed {
            "Scripts"
        } else {
            "Hide Scripts"
        };
        let mirror_label = if settings.mirrored { "Unmirror" } else { "Mirror" };
        let editor_label = if self.editor.visible { "Prompter" } else { "Edit" };
        let external_open = self
            .publisher
            .as_ref()
            .is_some_and(|publisher| publisher.is_open());
        let external_button = if external_open {
            button("Close Display").on_press(Message::CloseExternalDisplay)
        } else {
            button("External Display").on_press(Message::OpenExternalDisplay)
        };

        let speed_slider = slider(MIN_SPEED..=MAX_SPEED, playback.speed, Message::SetSpeed)
            .step(SPEED_STEP)
            .width(Length::Fixed(120.0));

        let bar = row![
            button(sidebar_label).on_press(Message::ToggleSidebar),
            button(play_label).on_press(Message::TogglePlayPause),
            button("-").on_press(Message::SlowDown),
            speed_slider,
            button("+").on_press(Message::SpeedUp),
            text(format!("{:.1}x", playback.speed)),
            button("Reset").on_press(Message::ResetPlayback),
            button("Prev Cue").on_press(Message::PrevCue),
            button("Next Cue").on_press(Message::NextCue),
            button(mirror_label).on_press(Message::ToggleMirror),
            button(editor_label).on_press(Message::ToggleEditor),
            button(if self.ui.show_settings {
                "Hide Settings"
            } else {
                "Settings"
            })
            .on_press(Message::ToggleSettings),
            external_button,
            horizontal_space(),
            text(format!("{:.0}%", self.progress() * 100.0)),
            text(playback.elapsed_label()).size(20.0),
        ]
        .spacing(8)
        .padding(8)
        .align_y(Vertical::Center)
        .width(Length::Fill);

        container(bar)
            .height(Length::Fixed(CONTROL_BAR_HEIGHT))
            .into()
    }

    fn sidebar(&self) -> Element<'_, Message> {
        let state = self.store.get();
        let can_delete = state.scripts.len() > 1;

        let scripts = state.scripts.iter().fold(Column::new().spacing(4), |list, script| {
            let is_active = script.id == state.active_script_id;
            let label = if is_active {
                format!("> {}", script.name)
            } else {
                script.name.clone()
            };
            let select = button(text(label))
                .width(Length::Fill)
                .on_press(Message::SelectScript(script.id.clone()));
            let delete = if can_delete {
                button("x").on_press(Message::DeleteScript(script.id.clone()))
            } else {
                button("x")
            };
            list.push(row![select, delete].spacing(4).align_y(Vertical::Center))
        });

        let import_row = row![
            text_input("Path to .txt", &self.ui.open_path_input)
                .on_input(Message::OpenPathInputChanged)
                .on_submit(Message::OpenPathRequested),
            button("Open").on_press(Message::OpenPathRequested),
        ]
        .spacing(4);

        let mut panel = column![
            row![
                text("Scripts").size(20.0),
                horizontal_space(),
                button("+ New").on_press(Message::AddScript),
            ]
            .align_y(Vertical::Center),
            scrollable(scripts).height(Length::Fill),
            import_row,
            button("Export Active").on_press(Message::ExportActiveScript),
        ]
        .spacing(8)
        .padding(8);

        if let Some(status) = &self.ui.status {
            panel = panel.push(text(status).size(13.0));
        }

        container(panel)
            .width(Length::Fixed(SIDEBAR_WIDTH))
            .height(Length::Fill)
            .into()
    }

    fn editor_panel(&self) -> Element<'_, Message> {
        let cues = self.editor_cue_count();
        let save_label = if self.editor.dirty { "Save*" } else { "Save" };

        column![
            row![
                text_input("Script name", &self.editor.name)
                    .on_input(Message::EditorNameChanged)
                    .width(Length::FillPortion(2)),
                text(format!("{cues} cue point(s)")),
                button(save_label).on_press(Message::SaveEditor),
                button("Done").on_press(Message::ToggleEditor),
            ]
            .spacing(8)
            .align_y(Vertical::Center),
            row![
                button("Insert Cue").on_press(Message::InsertCuePoint),
                button("Prev Cue").on_press(Message::EditorCueNav(CueDirection::Prev)),
                button("Next Cue").on_press(Message::EditorCueNav(CueDirection::Next)),
                button("Smart Caps").on_press(Message::SmartCaps),
                text("Use >>> on its own line to mark a cue point.").size(13.0),
            ]
            .spacing(8)
            .align_y(Vertical::Center),
            text_editor(&self.editor.content)
                .on_action(Message::EditorAction)
                .height(Length::Fill),
        ]
        .spacing(8)
        .padding(8)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    pub(super) fn settings_panel(&self) -> Element<'_, Message> {
        let settings = &self.store.get().settings;

        let font_slider = slider(
            MIN_FONT_SIZE as f32..=MAX_FONT_SIZE as f32,
            settings.font_size as f32,
            |value| Message::FontSizeChanged(value.round() as u32),
        )
        .step(FONT_SIZE_STEP as f32);

        let style_picker = pick_list(
            &CueStyle::ALL[..],
            Some(settings.cue_style),
            Message::CueStyleSelected,
        );

        let position_slider = slider(
            f32::from(MIN_CUE_POSITION)..=f32::from(MAX_CUE_POSITION),
            f32::from(settings.cue_position),
            |value| Message::CuePositionChanged(value.round() as u8),
        );
        let opacity_slider = slider(
            f32::from(MIN_CUE_OPACITY)..=f32::from(MAX_CUE_OPACITY),
            f32::from(settings.cue_opacity),
            |value| Message::CueOpacityChanged(value.round() as u8),
        )
        .step(5.0);
        let thickness_slider = slider(
            f32::from(MIN_CUE_THICKNESS)..=f32::from(MAX_CUE_THICKNESS),
            f32::from(settings.cue_thickness),
            |value| Message::CueThicknessChanged(value.round() as u8),
        )
        .step(1.0);

        let swatches = CUE_COLOR_PRESETS.iter().fold(row![].spacing(4), |swatches, hex| {
            let [r, g, b] = parse_hex_color(hex).unwrap_or([255, 255, 255]);
            let marker = if settings.cue_color.eq_ignore_ascii_case(hex) {
                "●"
            } else {
                "○"
            };
            swatches.push(
                button(text(marker).color(Color::from_rgb8(r, g, b)))
                    .on_press(Message::CueColorSelected((*hex).to_string())),
            )
        });

        let panel = column![
            text("Display Settings").size(20.0),
            text(format!("Font size: {}", settings.font_size)),
            font_slider,
            checkbox("Mirror text", settings.mirrored).on_toggle(|_| Message::ToggleMirror),
            text("Reading line").size(18.0),
            checkbox("Show reading line", settings.cue_enabled)
                .on_toggle(Message::CueEnabledChanged),
            row![text("Style"), style_picker]
                .spacing(8)
                .align_y(Vertical::Center),
            text(format!("Position: {}%", settings.cue_position)),
            position_slider,
            text(format!("Opacity: {}%", settings.cue_opacity)),
            opacity_slider,
            text(format!("Thickness: {}px", settings.cue_thickness)),
            thickness_slider,
            text("Colour"),
            swatches,
        ]
        .spacing(8)
        .padding(12);

        container(scrollable(panel))
            .width(Length::Fixed(SETTINGS_PANEL_WIDTH))
            .height(Length::Fill)
            .into()
    }
}
