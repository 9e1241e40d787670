use std::io;
use std::path::Path;

use svg::Document;
use svg::Node;
use svg::node::element::{Circle, Group, Line, Rectangle, Text};

use crate::render::{DrawCommand, Frame, Surface};

/// Surface that keeps the last presented frame as an SVG document.
#[derive(Debug, Default)]
pub struct SvgSurface {
    document: Option<Document>,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let document = self.document.as_ref().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "no frame has been presented")
        })?;
        svg::save(path, document)
    }
}

impl Surface for SvgSurface {
    fn present(&mut self, frame: &Frame) {
        self.document = Some(frame_to_document(frame));
    }
}

fn element_for(command: &DrawCommand) -> Option<Box<dyn Node>> {
    let element: Box<dyn Node> = match command {
        DrawCommand::Line {
            from,
            to,
            color,
            width,
            dash,
        } => {
            let mut line = Line::new()
                .set("x1", from.x)
                .set("y1", from.y)
                .set("x2", to.x)
                .set("y2", to.y)
                .set("stroke", color.to_string())
                .set("stroke-width", *width);
            if let Some([on, off]) = dash {
                line = line.set("stroke-dasharray", format!("{on} {off}"));
            }
            Box::new(line)
        }
        DrawCommand::Circle {
            center,
            radius,
            fill,
            stroke,
            stroke_width,
        } => Box::new(
            Circle::new()
                .set("cx", center.x)
                .set("cy", center.y)
                .set("r", *radius)
                .set(
                    "fill",
                    fill.map(|c| c.to_string())
                        .unwrap_or_else(|| "none".to_string()),
                )
                .set("stroke", stroke.to_string())
                .set("stroke-width", *stroke_width),
        ),
        DrawCommand::Label {
            text,
            at,
            size,
            color,
        } => Box::new(
            Text::new(text.clone())
                .set("x", at.x)
                .set("y", at.y)
                .set("fill", color.to_string())
                .set("font-family", "Arial")
                .set("font-size", *size)
                .set("text-anchor", "middle")
                .set("dominant-baseline", "middle"),
        ),
        DrawCommand::Clear { .. } | DrawCommand::Transform { .. } => return None,
    };
    Some(element)
}

/// Translate a frame into a standalone SVG document. Commands after a
/// transform are grouped under it.
pub fn frame_to_document(frame: &Frame) -> Document {
    let (width, height) = (frame.size.width, frame.size.height);
    let blank = || {
        Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", (0.0, 0.0, width, height))
    };
    let mut document = blank();
    let mut layer: Option<Group> = None;

    for command in &frame.commands {
        match command {
            DrawCommand::Clear { color } => {
                // Clearing discards anything drawn so far.
                layer = None;
                document = blank().add(
                    Rectangle::new()
                        .set("width", "100%")
                        .set("height", "100%")
                        .set("fill", color.to_string()),
                );
            }
            DrawCommand::Transform { scale, offset } => {
                if let Some(group) = layer.take() {
                    document = document.add(group);
                }
                layer = Some(Group::new().set(
                    "transform",
                    format!("translate({} {}) scale({})", offset.x, offset.y, scale),
                ));
            }
            other => {
                let Some(element) = element_for(other) else {
                    continue;
                };
                layer = match layer.take() {
                    Some(group) => Some(group.add(element)),
                    None => {
                        document = document.add(element);
                        None
                    }
                };
            }
        }
    }

    if let Some(group) = layer {
        document = document.add(group);
    }
    document
}
