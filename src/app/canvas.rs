//! The prompter surface: scrolled script text, cue labels, the reading line
//! and the progress bar, painted on a single canvas.
//!
//! The same program draws both windows. Only the operator's copy reacts to
//! the wheel and to clicks on cue labels.

use super::messages::Message;
use super::state::{
    CUE_ARROW_HEIGHT, CUE_ARROW_INSET, CUE_ARROW_WIDTH, MARKER_TEXT, PROGRESS_BAR_HEIGHT,
    PROGRESS_TRACK, SURFACE_BACKGROUND, SURFACE_TEXT, WHEEL_LINE_PX,
};
use iced::alignment;
use iced::mouse;
use iced::widget::canvas::event::{self, Event};
use iced::widget::canvas::{Frame, Geometry, Path, Program, Stroke, Text};
use iced::{Color, Pixels, Point, Rectangle, Renderer, Size, Theme, Vector};
use prompter_core::{AppSettings, ContentLayout, LayoutBlock};

pub(super) struct PrompterCanvas<'a> {
    pub(super) layout: &'a ContentLayout,
    pub(super) settings: &'a AppSettings,
    pub(super) position: f32,
    pub(super) progress: f32,
    /// Last size the app measured against; a mismatch is reported back.
    pub(super) viewport: Size,
    pub(super) line_spacing: f32,
    pub(super) interactive: bool,
}

impl PrompterCanvas<'_> {
    /// Distance from the top of the canvas to the reading line.
    fn anchor(&self, height: f32) -> f32 {
        height * f32::from(self.settings.cue_position) / 100.0
    }

    /// Canvas y of a content offset.
    fn screen_y(&self, content_y: f32, height: f32) -> f32 {
        self.anchor(height) + content_y - self.position
    }

    fn content_y(&self, screen_y: f32, height: f32) -> f32 {
        screen_y - self.anchor(height) + self.position
    }

    fn cue_color(&self) -> Color {
        let [r, g, b] = self.settings.cue_rgb();
        let mut color = Color::from_rgb8(r, g, b);
        color.a = f32::from(self.settings.cue_opacity) / 100.0;
        color
    }

    fn draw_script(&self, frame: &mut Frame, size: Size) {
        let font_size = self.settings.font_size as f32;
        let from = self.content_y(0.0, size.height);
        let to = self.content_y(size.height, size.height);
        let center_x = size.width / 2.0;

        for block in self.layout.visible(from, to) {
            let top = self.screen_y(block.top(), size.height);
            match block {
                LayoutBlock::Line { text, .. } => frame.fill_text(Text {
                    content: text.clone(),
                    position: Point::new(center_x, top),
                    color: *SURFACE_TEXT,
                    size: Pixels(font_size),
                    line_height: iced::widget::text::LineHeight::Relative(self.line_spacing),
                    horizontal_alignment: alignment::Horizontal::Center,
                    vertical_alignment: alignment::Vertical::Top,
                    ..Text::default()
                }),
                LayoutBlock::Marker { index, height, .. } => {
                    let middle = top + height / 2.0;
                    let rule = Path::line(
                        Point::new(size.width * 0.2, middle),
                        Point::new(size.width * 0.8, middle),
                    );
                    frame.stroke(
                        &rule,
                        Stroke::default()
                            .with_color(Color {
                                a: 0.35,
                                ..*MARKER_TEXT
                            })
                            .with_width(1.0),
                    );
                    frame.fill_rectangle(
                        Point::new(center_x - font_size * 2.4, middle - font_size * 0.4),
                        Size::new(font_size * 4.8, font_size * 0.8),
                        *SURFACE_BACKGROUND,
                    );
                    frame.fill_text(Text {
                        content: format!("— CUE {index} —"),
                        position: Point::new(center_x, middle),
                        color: *MARKER_TEXT,
                        size: Pixels((font_size * 0.5).max(14.0)),
                        horizontal_alignment: alignment::Horizontal::Center,
                        vertical_alignment: alignment::Vertical::Center,
                        ..Text::default()
                    });
                }
            }
        }
    }

    fn draw_cue_indicator(&self, frame: &mut Frame, size: Size) {
        let settings = self.settings;
        if !settings.cue_enabled {
            return;
        }
        let color = self.cue_color();
        let y = self.anchor(size.height);
        let half = CUE_ARROW_HEIGHT / 2.0;
        let mut line_start = 0.0;
        let mut line_end = size.width;

        if settings.cue_style.has_left_arrow() {
            let left = CUE_ARROW_INSET;
            let arrow = Path::new(|p| {
                p.move_to(Point::new(left, y - half));
                p.line_to(Point::new(left + CUE_ARROW_WIDTH, y));
                p.line_to(Point::new(left, y + half));
                p.close();
            });
            frame.fill(&arrow, color);
            line_start = left + CUE_ARROW_WIDTH + 4.0;
        }
        if settings.cue_style.has_right_arrow() {
            let right = size.width - CUE_ARROW_INSET;
            let arrow = Path::new(|p| {
                p.move_to(Point::new(right, y - half));
                p.line_to(Point::new(right - CUE_ARROW_WIDTH, y));
                p.line_to(Point::new(right, y + half));
                p.close();
            });
            frame.fill(&arrow, color);
            line_end = right - CUE_ARROW_WIDTH - 4.0;
        }
        if settings.cue_style.has_line() && line_end > line_start {
            frame.stroke(
                &Path::line(Point::new(line_start, y), Point::new(line_end, y)),
                Stroke::default()
                    .with_color(color)
                    .with_width(f32::from(settings.cue_thickness)),
            );
        }
    }

    fn draw_progress(&self, frame: &mut Frame, size: Size) {
        let top = size.height - PROGRESS_BAR_HEIGHT;
        frame.fill_rectangle(
            Point::new(0.0, top),
            Size::new(size.width, PROGRESS_BAR_HEIGHT),
            *PROGRESS_TRACK,
        );
        let filled = size.width * self.progress.clamp(0.0, 1.0);
        if filled > 0.0 {
            frame.fill_rectangle(
                Point::new(0.0, top),
                Size::new(filled, PROGRESS_BAR_HEIGHT),
                self.cue_color(),
            );
        }
    }
}

impl Program<Message> for PrompterCanvas<'_> {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (event::Status, Option<Message>) {
        let size = bounds.size();
        if (size.width - self.viewport.width).abs() >= 0.5
            || (size.height - self.viewport.height).abs() >= 0.5
        {
            return (
                event::Status::Ignored,
                Some(Message::SurfaceResized {
                    width: size.width,
                    height: size.height,
                }),
            );
        }
        if !self.interactive {
            return (event::Status::Ignored, None);
        }
        let Some(cursor_position) = cursor.position_in(bounds) else {
            return (event::Status::Ignored, None);
        };

        match event {
            Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                let dy = match delta {
                    mouse::ScrollDelta::Lines { y, .. } => y * WHEEL_LINE_PX,
                    mouse::ScrollDelta::Pixels { y, .. } => y,
                };
                // Wheel down reports negative y; the script should move forward.
                (event::Status::Captured, Some(Message::Wheel(-dy)))
            }
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let content_y = self.content_y(cursor_position.y, size.height);
                match self.layout.marker_at(content_y) {
                    Some(index) => (event::Status::Captured, Some(Message::MarkerClicked(index))),
                    None => (event::Status::Ignored, None),
                }
            }
            _ => (event::Status::Ignored, None),
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let size = bounds.size();
        let mut frame = Frame::new(renderer, size);
        frame.fill_rectangle(Point::ORIGIN, size, *SURFACE_BACKGROUND);

        if self.settings.mirrored {
            frame.with_save(|frame| {
                frame.translate(Vector::new(size.width, 0.0));
                frame.scale_nonuniform(Vector::new(-1.0, 1.0));
                self.draw_script(frame, size);
            });
        } else {
            self.draw_script(&mut frame, size);
        }

        self.draw_cue_indicator(&mut frame, size);
        if self.interactive {
            self.draw_progress(&mut frame, size);
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if !self.interactive {
            return mouse::Interaction::default();
        }
        let over_marker = cursor.position_in(bounds).is_some_and(|position| {
            let content_y = self.content_y(position.y, bounds.height);
            self.layout.marker_at(content_y).is_some()
        });
        if over_marker {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::default()
        }
    }
}
