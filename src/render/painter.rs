use egui::{pos2, vec2, Color32, Painter, Rect, Stroke, StrokeKind, Vec2};
use tracing::warn;

use crate::assets::TextureSet;
use crate::render::draw::{DrawCommand, DrawList};

const LINE_WIDTH: f32 = 1.0;

/// Executes a [`DrawList`] against an egui painter.
///
/// `origin` is the window position of the layout's (0, 0).
pub fn paint(painter: &Painter, origin: Vec2, list: &DrawList, textures: Option<&TextureSet>) {
    for command in list {
        match command {
            DrawCommand::Clear { color } => {
                painter.rect_filled(painter.clip_rect(), 0.0, *color);
            }
            DrawCommand::StrokeRect { rect, color } => {
                painter.rect_stroke(
                    rect.translate(origin),
                    0.0,
                    Stroke::new(LINE_WIDTH, *color),
                    StrokeKind::Inside,
                );
            }
            DrawCommand::FillRect { rect, color } => {
                painter.rect_filled(rect.translate(origin), 0.0, *color);
            }
            DrawCommand::Line { from, to, color } => {
                painter.line_segment([*from + origin, *to + origin], Stroke::new(LINE_WIDTH, *color));
            }
            DrawCommand::Sprite {
                control,
                pressed,
                rect,
            } => match textures.and_then(|t| t.sprite(*control, *pressed)) {
                Some(texture) => {
                    let target = Rect::from_min_size(
                        rect.min + origin,
                        vec2(texture.width as f32, texture.height as f32),
                    );
                    let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
                    painter.image(texture.handle.id(), target, uv, Color32::WHITE);
                }
                None => warn!("No texture for {:?} (pressed: {}), skipping", control, pressed),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{SpritePair, Texture, SPRITE_CONTROLS};
    use crate::controller::state::Control;
    use egui::{ColorImage, Context, LayerId, RawInput, Shape, TextureOptions};
    use std::collections::BTreeMap;

    const ORIGIN: Vec2 = Vec2::new(10.0, 20.0);

    fn painted(ctx: &Context, list: &DrawList, textures: Option<&TextureSet>) -> Vec<Shape> {
        let output = ctx.run(RawInput::default(), |ctx| {
            let painter = ctx.layer_painter(LayerId::background());
            paint(&painter, ORIGIN, list, textures);
        });
        output.shapes.into_iter().map(|clipped| clipped.shape).collect()
    }

    fn texture(ctx: &Context, name: &str, width: usize, height: usize) -> Texture {
        let image = ColorImage::new([width, height], Color32::RED);
        Texture {
            handle: ctx.load_texture(name, image, TextureOptions::LINEAR),
            width,
            height,
        }
    }

    fn texture_set(ctx: &Context) -> TextureSet {
        let sprites: BTreeMap<_, _> = SPRITE_CONTROLS
            .iter()
            .map(|control| {
                let pair = SpritePair {
                    normal: texture(ctx, &format!("{control}"), 4, 4),
                    pressed: texture(ctx, &format!("{control}_pressed"), 3, 5),
                };
                (*control, pair)
            })
            .collect();
        TextureSet::from_pairs(sprites).unwrap()
    }

    #[test]
    fn test_shapes_are_offset_by_origin() {
        let ctx = Context::default();
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(4.0, 4.0));
        let list = vec![
            DrawCommand::StrokeRect {
                rect,
                color: Color32::BLACK,
            },
            DrawCommand::FillRect {
                rect,
                color: Color32::RED,
            },
            DrawCommand::Line {
                from: pos2(0.0, 0.0),
                to: pos2(5.0, 0.0),
                color: Color32::BLUE,
            },
        ];

        let shapes = painted(&ctx, &list, None);
        assert_eq!(shapes.len(), 3);

        match &shapes[0] {
            Shape::Rect(stroked) => {
                assert_eq!(stroked.rect, rect.translate(ORIGIN));
                assert_eq!(stroked.stroke, Stroke::new(LINE_WIDTH, Color32::BLACK));
                assert_eq!(stroked.stroke_kind, StrokeKind::Inside);
                assert_eq!(stroked.fill, Color32::TRANSPARENT);
            }
            other => panic!("expected stroked rect, got {:?}", other),
        }
        match &shapes[1] {
            Shape::Rect(filled) => {
                assert_eq!(filled.rect, rect.translate(ORIGIN));
                assert_eq!(filled.fill, Color32::RED);
            }
            other => panic!("expected filled rect, got {:?}", other),
        }
        match &shapes[2] {
            Shape::LineSegment { points, stroke } => {
                assert_eq!(*points, [pos2(10.0, 20.0), pos2(15.0, 20.0)]);
                assert_eq!(stroke.color, Color32::BLUE);
            }
            other => panic!("expected line, got {:?}", other),
        }
    }

    #[test]
    fn test_sprite_without_textures_is_skipped() {
        let ctx = Context::default();
        let list = vec![DrawCommand::Sprite {
            control: Control::A,
            pressed: false,
            rect: Rect::from_min_size(pos2(0.0, 0.0), vec2(40.0, 40.0)),
        }];
        assert!(painted(&ctx, &list, None).is_empty());
    }

    #[test]
    fn test_sprite_is_drawn_at_texture_size() {
        let ctx = Context::default();
        let textures = texture_set(&ctx);
        let list = vec![DrawCommand::Sprite {
            control: Control::B,
            pressed: true,
            rect: Rect::from_min_size(pos2(100.0, 50.0), vec2(40.0, 40.0)),
        }];

        let shapes = painted(&ctx, &list, Some(&textures));
        assert_eq!(shapes.len(), 1);
        match &shapes[0] {
            Shape::Mesh(mesh) => {
                let pressed = textures.sprite(Control::B, true).unwrap();
                assert_eq!(mesh.texture_id, pressed.handle.id());
                assert_eq!(
                    mesh.calc_bounds(),
                    Rect::from_min_size(pos2(110.0, 70.0), vec2(3.0, 5.0))
                );
            }
            other => panic!("expected image mesh, got {:?}", other),
        }
    }
}
