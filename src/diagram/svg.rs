use std::fmt::{self, Write};

use super::layout::PopupSide;
use super::renderer::{
    DiagramScene, SceneElement, SceneStyle, ZONE_PULSE_LOW_OPACITY, ZONE_PULSE_SECONDS,
};
use super::zone::{DIAGRAM_HEIGHT, DIAGRAM_WIDTH, DiagramRect};

const POPUP_TEXT_COLUMNS: usize = 34;
const POPUP_LINE_HEIGHT: f32 = 6.5;
const ICON_HOVER_STYLE: &str = r#"g[data-hit="icon"][data-selected="false"]:hover rect{stroke:#94a3b8;stroke-width:1}"#;

/// Serializes a scene into a standalone SVG document in diagram space.
pub fn scene_to_svg(scene: &DiagramScene) -> String {
    let mut out = String::new();
    // Writing into a String never fails.
    let _ = write_scene(&mut out, scene);
    out
}

fn write_scene(out: &mut String, scene: &DiagramScene) -> fmt::Result {
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {DIAGRAM_WIDTH} {DIAGRAM_HEIGHT}" data-category="{}">"#,
        scene.category
    )?;
    if !scene.icons().is_empty() {
        writeln!(out, "  <style>{ICON_HOVER_STYLE}</style>")?;
    }

    for element in &scene.elements {
        match element {
            SceneElement::Path { id, d, style, .. } => {
                writeln!(out, r#"  <path id="{id}" d="{d}" {}/>"#, style_attrs(style))?;
            }
            SceneElement::Zone {
                zone,
                rect,
                active,
                pulse,
                style,
            } => {
                write!(
                    out,
                    r#"  <rect data-zone="{zone}" data-active="{active}" {} rx="5" {}"#,
                    rect_attrs(rect),
                    style_attrs(style)
                )?;
                if *pulse {
                    writeln!(
                        out,
                        r#"><animate attributeName="opacity" values="{high};{ZONE_PULSE_LOW_OPACITY};{high}" dur="{ZONE_PULSE_SECONDS}s" repeatCount="indefinite"/></rect>"#,
                        high = style.opacity
                    )?;
                } else {
                    writeln!(out, "/>")?;
                }
            }
            SceneElement::Label {
                text,
                position,
                font_size,
                color,
            } => {
                writeln!(
                    out,
                    r#"  <text x="{}" y="{}" font-size="{font_size}" text-anchor="middle" font-weight="bold" fill="{color}">{}</text>"#,
                    position.x,
                    position.y,
                    escape(text)
                )?;
            }
            SceneElement::FuseIcon {
                fuse,
                rect,
                color,
                amperage,
                selected,
                halo,
            } => {
                writeln!(
                    out,
                    r#"  <g data-hit="icon" data-fuse="{fuse}" data-selected="{selected}">"#
                )?;
                if let Some(halo) = halo {
                    writeln!(
                        out,
                        r##"    <rect {} rx="3" fill="none" stroke="#facc15" stroke-width="1.5"/>"##,
                        rect_attrs(halo)
                    )?;
                }
                writeln!(
                    out,
                    r##"    <rect {} rx="1.5" fill="{color}" stroke="#1e293b" stroke-width="0.6"/>"##,
                    rect_attrs(rect)
                )?;
                let center = rect.center();
                writeln!(
                    out,
                    r##"    <text x="{}" y="{}" font-size="4" text-anchor="middle" fill="#ffffff">{}</text>"##,
                    center.x,
                    center.y + 1.5,
                    escape(amperage)
                )?;
                writeln!(out, "  </g>")?;
            }
            SceneElement::Hint { text, position } => {
                writeln!(
                    out,
                    r##"  <text data-hint="true" x="{}" y="{}" font-size="5" text-anchor="middle" fill="#64748b">{}</text>"##,
                    position.x,
                    position.y,
                    escape(text)
                )?;
            }
            SceneElement::Popup {
                layout,
                label,
                era,
                amperage,
                description,
            } => {
                let rect = &layout.rect;
                writeln!(
                    out,
                    r#"  <g data-hit="popup" data-fuse="{}" data-side="{}">"#,
                    layout.fuse,
                    match layout.side {
                        PopupSide::Above => "above",
                        PopupSide::Below => "below",
                    }
                )?;
                writeln!(
                    out,
                    r##"    <rect {} rx="3" fill="#ffffff" stroke="#cbd5e1" stroke-width="0.8"/>"##,
                    rect_attrs(rect)
                )?;
                let text_x = rect.x + 4.0;
                let mut line_y = rect.y + 9.0;
                writeln!(
                    out,
                    r##"    <text x="{text_x}" y="{line_y}" font-size="6" font-weight="bold" fill="#0f172a">{} · {}</text>"##,
                    escape(label),
                    escape(amperage)
                )?;
                line_y += POPUP_LINE_HEIGHT + 1.0;
                writeln!(
                    out,
                    r##"    <text x="{text_x}" y="{line_y}" font-size="4.5" fill="#64748b">{}</text>"##,
                    escape(era)
                )?;
                for line in wrap_words(description, POPUP_TEXT_COLUMNS) {
                    line_y += POPUP_LINE_HEIGHT;
                    if line_y > rect.bottom() - 2.0 {
                        break;
                    }
                    writeln!(
                        out,
                        r##"    <text x="{text_x}" y="{line_y}" font-size="4.5" fill="#334155">{}</text>"##,
                        escape(&line)
                    )?;
                }
                let close = &layout.close;
                let close_center = close.center();
                writeln!(
                    out,
                    r##"    <g data-hit="popup-close"><rect {} rx="2" fill="#f1f5f9"/><text x="{}" y="{}" font-size="7" text-anchor="middle" fill="#475569">×</text></g>"##,
                    rect_attrs(close),
                    close_center.x,
                    close_center.y + 2.5
                )?;
                writeln!(out, "  </g>")?;
            }
            SceneElement::Legend { text } => {
                writeln!(
                    out,
                    r##"  <text data-legend="true" x="{}" y="10" font-size="6" text-anchor="end" font-weight="bold" fill="#475569">{}</text>"##,
                    DIAGRAM_WIDTH - 4.0,
                    escape(&text.to_uppercase())
                )?;
            }
        }
    }

    writeln!(out, "</svg>")
}

fn rect_attrs(rect: &DiagramRect) -> String {
    format!(
        r#"x="{}" y="{}" width="{}" height="{}""#,
        rect.x, rect.y, rect.width, rect.height
    )
}

fn style_attrs(style: &SceneStyle) -> String {
    format!(
        r#"fill="{}" stroke="{}" stroke-width="{}" opacity="{}""#,
        style.fill, style.stroke, style.stroke_width, style.opacity
    )
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

pub(crate) fn wrap_words(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > columns && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
