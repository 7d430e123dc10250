//! Demo application hosting a single zone layer on a pannable map canvas.

use eframe::egui::{self, Align2, Color32, FontId, Rect, Sense, Vec2};
use std::rc::Rc;
use std::time::Duration;
use zone_overlay::geo::{render_zone_layer, MapProjection};
use zone_overlay::zone::{zone_layer, Context, LoadState, SysParam, ZoneLayer, ZoneLayerOptions};

/// Main application state.
pub struct ZoneApp {
    layer: ZoneLayer,
    /// Context published to the layer every frame
    context: Rc<Context>,
    zoom: f32,
    pan_offset: Vec2,
}

impl ZoneApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, options: ZoneLayerOptions) -> Self {
        Self {
            layer: zone_layer(options),
            context: Rc::new(Context::with_sys_param(Rc::new(SysParam::default()))),
            zoom: 1.0,
            pan_offset: Vec2::ZERO,
        }
    }

    fn status_text(&mut self) -> String {
        match self.layer.load_state() {
            LoadState::Loading => "Loading zones...".to_string(),
            LoadState::Loaded(dataset) => format!("{} zones", dataset.len()),
            LoadState::LoadFailed(e) => format!("Zones unavailable: {}", e),
        }
    }

    fn handle_interaction(&mut self, response: &egui::Response, rect: &Rect) {
        if response.dragged() {
            self.pan_offset += response.drag_delta();
        }

        if response.hovered() {
            let scroll_delta = response.ctx.input(|i| i.raw_scroll_delta);
            if scroll_delta.y != 0.0 {
                let old_zoom = self.zoom;
                let new_zoom = (old_zoom * (1.0 + scroll_delta.y * 0.001)).clamp(0.2, 40.0);

                // Keep the point under the cursor stationary
                if let Some(cursor_pos) = response.hover_pos() {
                    let cursor_rel = cursor_pos - rect.center();
                    let ratio = new_zoom / old_zoom;
                    self.pan_offset = cursor_rel * (1.0 - ratio) + self.pan_offset * ratio;
                }

                self.zoom = new_zoom;
            }
        }

        if response.double_clicked() {
            self.zoom = 1.0;
            self.pan_offset = Vec2::ZERO;
        }
    }
}

impl eframe::App for ZoneApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.layer.update(Some(self.context.clone()));

        // Keep polling until the dataset load settles
        if !self.layer.load_state().is_terminal() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        let status = self.status_text();

        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
            let rect = response.rect;

            painter.rect_filled(rect, 0.0, Color32::from_rgb(20, 20, 35));

            self.handle_interaction(&response, &rect);

            let mut projection = MapProjection::default();
            projection.update(self.zoom, self.pan_offset, rect);
            render_zone_layer(&painter, self.layer.group(), &projection, self.zoom);

            painter.text(
                rect.left_top() + Vec2::new(10.0, 10.0),
                Align2::LEFT_TOP,
                status,
                FontId::monospace(12.0),
                Color32::from_rgb(200, 200, 220),
            );
        });
    }
}
