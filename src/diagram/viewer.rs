use std::time::Duration;

use anyhow::Result;
use eframe::egui;
use tracing::info;

use crate::config::DiagramSettings;
use crate::lookup::{FuseLocation, SAFETY_CHECKLIST};

use super::FuseDiagram;
use super::catalog::fuse_types;
use super::layout::icon_hit_rect;
use super::renderer::{SceneElement, SceneStyle, pulse_opacity};
use super::svg::wrap_words;
use super::zone::{DIAGRAM_HEIGHT, DIAGRAM_WIDTH, DiagramPoint, DiagramRect, ZoneCategory};

const APP_TITLE: &str = "Fuse Finder diagram";
const POPUP_TEXT_COLUMNS: usize = 34;
const PULSE_FRAME: Duration = Duration::from_millis(33);

pub fn run_viewer(
    settings: &DiagramSettings,
    category: ZoneCategory,
    lookup: Option<FuseLocation>,
) -> Result<()> {
    let category = lookup
        .as_ref()
        .map(|location| location.location_category)
        .unwrap_or(category);
    info!(
        category = %category,
        scale = settings.viewer_scale,
        has_lookup = lookup.is_some(),
        "starting native diagram viewer"
    );

    let app = DiagramViewerApp::new(settings.viewer_scale, category, lookup);
    eframe::run_native(
        APP_TITLE,
        eframe::NativeOptions::default(),
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|error| anyhow::anyhow!("diagram viewer exited with error: {error}"))
}

struct DiagramViewerApp {
    scale: f32,
    diagram: FuseDiagram,
    lookup: Option<FuseLocation>,
    status: String,
}

impl DiagramViewerApp {
    fn new(scale: f32, category: ZoneCategory, lookup: Option<FuseLocation>) -> Self {
        Self {
            scale,
            diagram: FuseDiagram::new(category),
            lookup,
            status: "Idle".to_owned(),
        }
    }

    fn render_details_pane(&mut self, ui: &mut egui::Ui) {
        ui.heading("Fuse Finder");
        ui.separator();

        let mut category = self.diagram.category();
        egui::ComboBox::from_label("Zone")
            .selected_text(category.as_str())
            .show_ui(ui, |ui| {
                for option in ZoneCategory::ZONES
                    .into_iter()
                    .chain(std::iter::once(ZoneCategory::Unknown))
                {
                    ui.selectable_value(&mut category, option, option.as_str());
                }
            });
        if category != self.diagram.category() {
            self.diagram.set_category(category);
            self.status = format!("Zone set to {category}");
        }

        match &self.lookup {
            Some(location) => {
                ui.label(egui::RichText::new(&location.fuse_number).heading().strong());
                ui.label(format!("{} fuse", location.amperage));
                ui.label(format!("Circuit: {}", location.circuit));
                ui.label(format!("Box: {}", location.box_location));
                ui.label(&location.description);
            }
            None => {
                ui.label("No fuse lookup loaded.");
            }
        }

        ui.separator();
        ui.label(egui::RichText::new("Safety").strong());
        for (title, text) in SAFETY_CHECKLIST {
            ui.label(format!("{title}: {text}"));
        }

        ui.separator();
        ui.label(format!("Status: {}", self.status));
        match self.diagram.selection().selected() {
            Some(fuse) => ui.label(format!("Selected: {}", fuse.fuse_type().label)),
            None => ui.label("Selected: none"),
        };
    }

    fn render_diagram(&mut self, ui: &mut egui::Ui) {
        let size = egui::vec2(DIAGRAM_WIDTH * self.scale, DIAGRAM_HEIGHT * self.scale);
        let (response, painter) = ui.allocate_painter(size, egui::Sense::click());
        let canvas = DiagramCanvas {
            origin: response.rect.min,
            scale: self.scale,
        };

        let hovered = response
            .hover_pos()
            .map(|pos| canvas.to_diagram(pos))
            .and_then(|point| {
                fuse_types().iter().find(|fuse_type| {
                    icon_hit_rect(self.diagram.category(), fuse_type.id)
                        .is_some_and(|rect| rect.contains(point))
                })
            })
            .map(|fuse_type| fuse_type.id);

        let time = ui.input(|input| input.time);
        let scene = self.diagram.scene();
        if !scene.pulsing_zones().is_empty() {
            ui.ctx().request_repaint_after(PULSE_FRAME);
        }

        for element in &scene.elements {
            match element {
                SceneElement::Path { points, style, .. } => {
                    let points = points.iter().map(|point| canvas.to_screen(*point)).collect();
                    painter.add(egui::Shape::convex_polygon(
                        points,
                        fill_color(style),
                        egui::Stroke::new(style.stroke_width, hex_color(style.stroke, 1.0)),
                    ));
                }
                SceneElement::Zone {
                    rect, pulse, style, ..
                } => {
                    let rect = canvas.rect(rect);
                    let fill = if *pulse {
                        hex_color(style.fill, pulse_opacity(style.opacity, time))
                    } else {
                        fill_color(style)
                    };
                    painter.rect_filled(rect, 5.0 * self.scale, fill);
                    painter.rect_stroke(
                        rect,
                        5.0 * self.scale,
                        egui::Stroke::new(style.stroke_width, hex_color(style.stroke, style.opacity)),
                        egui::StrokeKind::Inside,
                    );
                }
                SceneElement::Label {
                    text,
                    position,
                    font_size,
                    color,
                } => {
                    painter.text(
                        canvas.to_screen(*position),
                        egui::Align2::CENTER_BOTTOM,
                        text,
                        egui::FontId::proportional(font_size * self.scale),
                        hex_color(color, 1.0),
                    );
                }
                SceneElement::FuseIcon {
                    fuse,
                    rect,
                    color,
                    amperage,
                    halo,
                    ..
                } => {
                    if let Some(halo) = halo {
                        painter.rect_stroke(
                            canvas.rect(halo),
                            3.0 * self.scale,
                            egui::Stroke::new(1.5 * self.scale, hex_color("#facc15", 1.0)),
                            egui::StrokeKind::Outside,
                        );
                    } else if hovered == Some(*fuse) {
                        painter.rect_stroke(
                            canvas.rect(&rect.expand(2.0)),
                            3.0 * self.scale,
                            egui::Stroke::new(self.scale, hex_color("#94a3b8", 1.0)),
                            egui::StrokeKind::Outside,
                        );
                    }
                    let icon = canvas.rect(rect);
                    painter.rect_filled(icon, 1.5 * self.scale, hex_color(color, 1.0));
                    painter.text(
                        icon.center(),
                        egui::Align2::CENTER_CENTER,
                        amperage,
                        egui::FontId::proportional(4.0 * self.scale),
                        egui::Color32::WHITE,
                    );
                }
                SceneElement::Hint { text, position } => {
                    painter.text(
                        canvas.to_screen(*position),
                        egui::Align2::CENTER_CENTER,
                        text,
                        egui::FontId::proportional(5.0 * self.scale),
                        hex_color("#64748b", 1.0),
                    );
                }
                SceneElement::Popup {
                    layout,
                    label,
                    era,
                    amperage,
                    description,
                } => {
                    let popup = canvas.rect(&layout.rect);
                    painter.rect_filled(popup, 3.0 * self.scale, egui::Color32::WHITE);
                    painter.rect_stroke(
                        popup,
                        3.0 * self.scale,
                        egui::Stroke::new(1.0, hex_color("#cbd5e1", 1.0)),
                        egui::StrokeKind::Inside,
                    );

                    let left = layout.rect.x + 4.0;
                    let mut line_y = layout.rect.y + 4.0;
                    painter.text(
                        canvas.to_screen(DiagramPoint::new(left, line_y)),
                        egui::Align2::LEFT_TOP,
                        format!("{label} · {amperage}"),
                        egui::FontId::proportional(6.0 * self.scale),
                        hex_color("#0f172a", 1.0),
                    );
                    line_y += 8.0;
                    painter.text(
                        canvas.to_screen(DiagramPoint::new(left, line_y)),
                        egui::Align2::LEFT_TOP,
                        era,
                        egui::FontId::proportional(4.5 * self.scale),
                        hex_color("#64748b", 1.0),
                    );
                    for line in wrap_words(description, POPUP_TEXT_COLUMNS) {
                        line_y += 6.5;
                        if line_y > layout.rect.bottom() - 6.0 {
                            break;
                        }
                        painter.text(
                            canvas.to_screen(DiagramPoint::new(left, line_y)),
                            egui::Align2::LEFT_TOP,
                            line,
                            egui::FontId::proportional(4.5 * self.scale),
                            hex_color("#334155", 1.0),
                        );
                    }

                    let close = canvas.rect(&layout.close);
                    painter.rect_filled(close, 2.0 * self.scale, hex_color("#f1f5f9", 1.0));
                    painter.text(
                        close.center(),
                        egui::Align2::CENTER_CENTER,
                        "×",
                        egui::FontId::proportional(7.0 * self.scale),
                        hex_color("#475569", 1.0),
                    );
                }
                SceneElement::Legend { text } => {
                    painter.text(
                        canvas.to_screen(DiagramPoint::new(DIAGRAM_WIDTH - 4.0, 4.0)),
                        egui::Align2::RIGHT_TOP,
                        text.to_uppercase(),
                        egui::FontId::proportional(6.0 * self.scale),
                        hex_color("#475569", 1.0),
                    );
                }
            }
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let target = self.diagram.click(canvas.to_diagram(pos));
                self.status = format!("Clicked {target:?}");
            }
        }
    }
}

impl eframe::App for DiagramViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("fuse_details_pane")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| self.render_details_pane(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| self.render_diagram(ui));
        });
    }
}

#[derive(Debug, Clone, Copy)]
struct DiagramCanvas {
    origin: egui::Pos2,
    scale: f32,
}

impl DiagramCanvas {
    fn to_screen(self, point: DiagramPoint) -> egui::Pos2 {
        egui::pos2(
            self.origin.x + point.x * self.scale,
            self.origin.y + point.y * self.scale,
        )
    }

    fn to_diagram(self, pos: egui::Pos2) -> DiagramPoint {
        DiagramPoint::new(
            (pos.x - self.origin.x) / self.scale,
            (pos.y - self.origin.y) / self.scale,
        )
    }

    fn rect(self, rect: &DiagramRect) -> egui::Rect {
        egui::Rect::from_min_max(
            self.to_screen(DiagramPoint::new(rect.x, rect.y)),
            self.to_screen(DiagramPoint::new(rect.right(), rect.bottom())),
        )
    }
}

fn fill_color(style: &SceneStyle) -> egui::Color32 {
    hex_color(style.fill, style.opacity)
}

fn hex_color(hex: &str, opacity: f32) -> egui::Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    let digits = hex.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|value| u8::from_str_radix(value, 16).ok())
    };
    match (digits.len(), channel(0..2), channel(2..4), channel(4..6)) {
        (6, Some(r), Some(g), Some(b)) => egui::Color32::from_rgba_unmultiplied(r, g, b, alpha),
        _ => egui::Color32::from_rgba_unmultiplied(128, 128, 128, alpha),
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui;

    use super::{DiagramCanvas, hex_color};
    use crate::diagram::zone::{DiagramPoint, DiagramRect};

    #[test]
    fn canvas_round_trips_points_at_scale() {
        let canvas = DiagramCanvas {
            origin: egui::pos2(10.0, 20.0),
            scale: 2.0,
        };
        let screen = canvas.to_screen(DiagramPoint::new(100.0, 52.5));
        assert_eq!(screen, egui::pos2(210.0, 125.0));
        assert_eq!(canvas.to_diagram(screen), DiagramPoint::new(100.0, 52.5));

        let rect = canvas.rect(&DiagramRect::new(50.0, 30.0, 100.0, 45.0));
        assert_eq!(rect.min, egui::pos2(110.0, 80.0));
        assert_eq!(rect.max, egui::pos2(310.0, 170.0));
    }

    #[test]
    fn hex_color_parses_rgb_and_applies_opacity() {
        assert_eq!(
            hex_color("#3b82f6", 1.0),
            egui::Color32::from_rgba_unmultiplied(0x3b, 0x82, 0xf6, 255)
        );
        assert_eq!(
            hex_color("not-a-color", 1.0),
            egui::Color32::from_rgba_unmultiplied(128, 128, 128, 255)
        );
    }
}
