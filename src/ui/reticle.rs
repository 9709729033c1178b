/// Reticle overlay canvas, stacked on top of the filtered frame
use iced::widget::canvas::{self, Path, Stroke};
use iced::{Color, Point, Rectangle};

use crate::render::overlay::Reticle;
use crate::Message;

const STROKE_WIDTH: f32 = 2.0;

#[derive(Debug, Clone, Copy)]
pub struct ReticleOverlay {
    pub reticle: Reticle,
}

fn point(v: cgmath::Vector2<f32>) -> Point {
    Point::new(v.x, v.y)
}

impl ReticleOverlay {
    fn stroke(&self) -> Stroke<'static> {
        let [r, g, b, a] = self.reticle.color;
        Stroke::default()
            .with_color(Color::from_rgba(r, g, b, a))
            .with_width(STROKE_WIDTH)
    }
}

impl canvas::Program<Message> for ReticleOverlay {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        frame.stroke(
            &Path::circle(point(self.reticle.center), self.reticle.radius),
            self.stroke(),
        );

        let ticks = Path::new(|builder| {
            for tick in &self.reticle.ticks {
                builder.move_to(point(tick.from));
                builder.line_to(point(tick.to));
            }
        });
        frame.stroke(&ticks, self.stroke());

        vec![frame.into_geometry()]
    }
}
