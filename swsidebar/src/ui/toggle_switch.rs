use egui::{pos2, vec2, Response, Sense, StrokeKind, Ui, WidgetInfo, WidgetType};

/// iOS-style on/off switch. Marks the response changed when clicked.
pub fn toggle_switch(ui: &mut Ui, on: &mut bool) -> Response {
    let desired_size = ui.spacing().interact_size.y * vec2(2.0, 1.0);
    let (rect, mut response) = ui.allocate_exact_size(desired_size, Sense::click());
    if response.clicked() {
        *on = !*on;
        response.mark_changed();
    }
    response.widget_info(|| WidgetInfo::selected(WidgetType::Checkbox, ui.is_enabled(), *on, ""));

    if ui.is_rect_visible(rect) {
        let visuals = ui.style().interact_selectable(&response, *on);
        let rect = rect.expand(visuals.expansion);
        let radius = 0.5 * rect.height();
        ui.painter().rect(
            rect,
            radius,
            visuals.bg_fill,
            visuals.bg_stroke,
            StrokeKind::Inside,
        );
        let knob_x = if *on {
            rect.right() - radius
        } else {
            rect.left() + radius
        };
        ui.painter().circle(
            pos2(knob_x, rect.center().y),
            0.75 * radius,
            visuals.bg_fill,
            visuals.fg_stroke,
        );
    }

    response
}
