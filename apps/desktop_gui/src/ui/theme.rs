//! Application theme. Built once in `main` and handed to every page renderer.

use eframe::egui;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub primary: egui::Color32,
    pub secondary: egui::Color32,
    pub background: egui::Color32,
    pub paper: egui::Color32,
    pub row_background: egui::Color32,
    pub text_primary: egui::Color32,
    pub text_secondary: egui::Color32,
    pub error: egui::Color32,
    pub corner_radius: u8,
}

impl Theme {
    pub fn standard() -> Self {
        Self {
            primary: egui::Color32::from_rgb(0x3f, 0x51, 0xb5),
            secondary: egui::Color32::from_rgb(0xf5, 0x00, 0x57),
            background: egui::Color32::from_rgb(0xf5, 0xf5, 0xf5),
            paper: egui::Color32::WHITE,
            row_background: egui::Color32::from_rgb(0xf5, 0xf5, 0xf5),
            text_primary: egui::Color32::from_rgb(0x21, 0x21, 0x21),
            text_secondary: egui::Color32::from_rgb(0x75, 0x75, 0x75),
            error: egui::Color32::from_rgb(0xd3, 0x2f, 0x2f),
            corner_radius: 4,
        }
    }

    pub fn visuals(&self) -> egui::Visuals {
        let mut visuals = egui::Visuals::light();
        visuals.panel_fill = self.background;
        visuals.window_fill = self.paper;
        visuals.extreme_bg_color = self.paper;
        visuals.hyperlink_color = self.primary;
        visuals.error_fg_color = self.error;
        visuals.selection.bg_fill = self.primary;
        visuals.widgets.active.bg_fill = self.primary;
        visuals.widgets.hovered.bg_fill = self.primary.gamma_multiply(0.85);
        visuals.window_corner_radius = egui::CornerRadius::same(self.corner_radius);
        visuals.menu_corner_radius = egui::CornerRadius::same(self.corner_radius);
        visuals
    }

    pub fn paper_frame(&self) -> egui::Frame {
        egui::Frame::new()
            .fill(self.paper)
            .stroke(egui::Stroke::new(1.0, self.background.gamma_multiply(0.9)))
            .corner_radius(egui::CornerRadius::same(self.corner_radius))
            .inner_margin(egui::Margin::same(32))
    }

    pub fn row_frame(&self) -> egui::Frame {
        egui::Frame::new()
            .fill(self.row_background)
            .corner_radius(egui::CornerRadius::same(self.corner_radius))
            .inner_margin(egui::Margin::symmetric(16, 8))
    }

    pub fn primary_button(&self, label: &str) -> egui::Button<'static> {
        let text = egui::RichText::new(label.to_string())
            .color(egui::Color32::WHITE)
            .strong();
        egui::Button::new(text)
            .fill(self.primary)
            .min_size(egui::vec2(0.0, 36.0))
    }
}
