use crate::app::TimelineApp;
use crate::ui::theme;
use egui::{Context, RichText, Window};

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut TimelineApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([320.0, 180.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Tamil Timeline").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("Tamil and world history, side by side,");
                ui.label("on one scrolling timeline.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}

/// Render the "CSV Import Format" help dialog.
pub fn show_csv_help_dialog(app: &mut TimelineApp, ctx: &Context) {
    let mut should_close = false;

    Window::new(RichText::new("CSV Import Format").strong().size(14.0))
        .resizable(true)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_size([520.0, 420.0])
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(4.0);
                ui.label(RichText::new("Delimiters").strong());
                ui.label("The delimiter is auto-detected: comma (,), semicolon (;), or tab.");
                ui.add_space(8.0);

                ui.label(RichText::new("Columns").strong());
                ui.add_space(2.0);
                egui::Grid::new("csv_help_columns")
                    .num_columns(2)
                    .striped(true)
                    .spacing([16.0, 4.0])
                    .show(ui, |ui| {
                        for (field, aliases) in [
                            ("Heading *", "Heading, English Heading, Title, Name, Event"),
                            ("Tamil heading", "Tamil Heading, Heading Tamil"),
                            ("Year *", "Year, Year CE, Year_CE_Int  (1200, -300, 300 BCE)"),
                            ("Category", "Category, Type, Collection"),
                            ("Description", "Description, Text, Details, Notes"),
                            ("Tamil description", "Tamil Long Text, Tamil Description"),
                            ("Date", "Date  (YYYY-MM-DD, DD/MM/YYYY, ...)"),
                            ("Image", "Image, Featured Image"),
                            ("Id", "Id, Key"),
                        ] {
                            ui.label(RichText::new(field).strong());
                            ui.label(aliases);
                            ui.end_row();
                        }
                    });
                ui.add_space(8.0);

                ui.label(RichText::new("Notes").strong());
                for note in [
                    "• Header matching is case-insensitive and ignores spaces, hyphens and underscores.",
                    "• Either heading column is enough; * marks the required fields.",
                    "• Rows without a category go to the world history track.",
                    "• Rows with no heading or an unreadable year are skipped.",
                ] {
                    ui.label(RichText::new(note).small());
                }
                ui.add_space(8.0);
            });

            ui.separator();
            if ui.add_sized([80.0, 28.0], egui::Button::new("Close")).clicked() {
                should_close = true;
            }
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_csv_help = false;
    }
}
