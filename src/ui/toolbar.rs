use crate::app::TimelineApp;
use crate::config::EffectTier;
use crate::model::category::PALETTE_LEN;
use crate::ui::theme;
use egui::{menu, RichText, Ui};

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut TimelineApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  Open Dataset...").clicked() {
                app.open_dataset();
                ui.close_menu();
            }
            if ui.button("  Open Raw Export...").clicked() {
                app.open_raw_export();
                ui.close_menu();
            }
            if ui.button("  Import CSV...").clicked() {
                app.import_csv();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Save Dataset As...").clicked() {
                app.save_dataset_as();
                ui.close_menu();
            }
            if ui.button("  Reload Sample").clicked() {
                app.load_sample();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Save Settings").clicked() {
                app.save_config();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            if ui.button("  Jump to Start      Home").clicked() {
                app.jump_to_start();
                ui.close_menu();
            }
            if ui.button("  Jump to End         End").clicked() {
                app.jump_to_end();
                ui.close_menu();
            }
            ui.separator();

            ui.label(RichText::new("Categories").small().weak());
            let mut changed = false;
            for (i, (category, visible)) in app.filter.iter_mut().enumerate() {
                let color = theme::category_color(Some(i % PALETTE_LEN));
                ui.horizontal(|ui| {
                    ui.label(RichText::new(egui_phosphor::regular::SQUARE).color(color));
                    changed |= ui.checkbox(visible, category).changed();
                });
            }
            if changed {
                app.on_filter_changed();
            }
            if ui.button("  Show All").clicked() {
                app.filter.show_all();
                app.on_filter_changed();
                ui.close_menu();
            }
            ui.separator();

            ui.label(RichText::new("Effects").small().weak());
            for tier in EffectTier::ALL {
                if ui
                    .radio(app.config.effects == tier, tier.display_name())
                    .clicked()
                {
                    app.set_effect_tier(tier);
                    ui.close_menu();
                }
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("CSV Format").clicked() {
                app.show_csv_help = true;
                ui.close_menu();
            }
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        // Right-aligned dataset name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(&app.dataset_name).size(11.0).weak());
        });
    });
}
