use egui::{Color32, RichText, Ui};

use crate::model::item::year_label;
use crate::model::{CategoryFilter, Item, Track};
use crate::ui::theme;

/// Actions the details panel can request.
pub enum DetailsAction {
    None,
    Close,
    /// Scroll the timeline so the item's year is at the left edge.
    JumpTo(i32),
}

fn field_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).size(10.0).color(theme::TEXT_DIM).strong());
}

/// Read-only panel for the selected item: both headings, both texts, years,
/// date and category.
pub fn show_item_details(item: &Item, filter: &CategoryFilter, ui: &mut Ui) -> DetailsAction {
    let mut action = DetailsAction::None;

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Event")
                .strong()
                .size(13.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .small_button(egui_phosphor::regular::X)
                .on_hover_text("Close")
                .clicked()
            {
                action = DetailsAction::Close;
            }
            if ui
                .small_button(egui_phosphor::regular::CROSSHAIR)
                .on_hover_text("Show on timeline")
                .clicked()
            {
                action = DetailsAction::JumpTo(item.year_ce);
            }
        });
    });
    ui.add_space(4.0);

    let frame = egui::Frame {
        fill: theme::BG_DARK,
        rounding: egui::Rounding::same(4.0),
        inner_margin: egui::Margin::same(8.0),
        outer_margin: egui::Margin::ZERO,
        stroke: egui::Stroke::new(1.0, theme::BORDER_SUBTLE),
        shadow: egui::epaint::Shadow::NONE,
    };

    frame.show(ui, |ui| {
        ui.spacing_mut().item_spacing.y = 6.0;

        let color = theme::category_color(filter.color_index(&item.category));
        ui.horizontal(|ui| {
            ui.label(RichText::new(egui_phosphor::regular::CIRCLE).color(color));
            let category = if item.category.is_empty() {
                "Uncategorized"
            } else {
                item.category.as_str()
            };
            ui.label(RichText::new(category).color(theme::TEXT_SECONDARY));
        });

        field_label(ui, "Tamil");
        ui.label(RichText::new(item.heading(Track::Tamil)).strong());
        if !item.tamil_long_text.is_empty() {
            ui.label(RichText::new(&item.tamil_long_text).size(11.5));
        }

        ui.add_space(2.0);
        field_label(ui, "English");
        ui.label(RichText::new(item.heading(Track::World)).strong());
        if !item.english_long_text.is_empty() {
            ui.label(RichText::new(&item.english_long_text).size(11.5));
        }

        ui.add_space(2.0);
        ui.separator();
        egui::Grid::new("item_details_grid")
            .num_columns(2)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                field_label(ui, "Year");
                ui.label(year_label(Track::World, item.year_ce));
                ui.end_row();

                field_label(ui, "Tamil year");
                ui.label(year_label(Track::Tamil, item.year_ce));
                ui.end_row();

                if let Some(date) = item.date {
                    field_label(ui, "Date");
                    ui.label(date.format("%d %B %Y").to_string());
                    ui.end_row();
                }

                field_label(ui, "Track");
                ui.label(match item.track() {
                    Track::Tamil => "Tamil history",
                    Track::World => "World history",
                });
                ui.end_row();
            });

        if !item.featured_image.is_empty() {
            ui.label(
                RichText::new(format!("{} {}", egui_phosphor::regular::IMAGE, item.featured_image))
                    .size(10.5)
                    .color(Color32::GRAY),
            );
        }
    });

    action
}
