use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::{Args, DataSource};
use crate::config::{EffectTier, TimelineConfig};
use crate::model::{CategoryFilter, Item, TimelineViewport};
use crate::render::{FrameLoop, RenderSettings, TimelineRenderer};
use crate::ui;
use crate::ui::image_pool::TexturePool;
use crate::ui::timeline_canvas::CanvasClick;

const SAMPLE_SIZE: usize = 500;

/// Main application state.
pub struct TimelineApp {
    pub config: TimelineConfig,
    config_path: Option<PathBuf>,

    pub items: Vec<Arc<Item>>,
    pub filter: CategoryFilter,
    pub renderer: TimelineRenderer,
    pub viewport: TimelineViewport,
    pub images: TexturePool,
    frame_loop: FrameLoop<egui::Context>,

    pub selected: Option<Arc<Item>>,
    pub dataset_name: String,
    pub status_message: String,

    // Dialog state
    pub show_about: bool,
    pub show_csv_help: bool,
}

impl TimelineApp {
    pub fn new(cc: &eframe::CreationContext<'_>, args: &Args) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);
        egui_extras::install_image_loaders(&cc.egui_ctx);
        ui::theme::apply_theme(&cc.egui_ctx);

        let config_path = args.config.clone().or_else(TimelineConfig::default_path);
        let mut config = TimelineConfig::load_or_default(config_path.as_deref());
        if let Some(dir) = &args.image_dir {
            config.image_dir = Some(dir.clone());
        }

        let images = match &config.image_dir {
            Some(dir) => TexturePool::from_dir(dir, config.image_pool_size).unwrap_or_else(|e| {
                log::warn!("{:#}; cards will be drawn without images", e);
                TexturePool::default()
            }),
            None => TexturePool::default(),
        };

        let mut frame_loop = FrameLoop::new(cc.egui_ctx.clone());
        frame_loop.start();

        let mut app = Self {
            renderer: TimelineRenderer::new(
                &[],
                RenderSettings::from(&config),
                config.effects.entrance_speed(),
            ),
            config,
            config_path,
            items: Vec::new(),
            filter: CategoryFilter::default(),
            viewport: TimelineViewport::default(),
            images,
            frame_loop,
            selected: None,
            dataset_name: String::new(),
            status_message: "Ready".to_string(),
            show_about: false,
            show_csv_help: false,
        };
        app.load_source(args.data_source());
        app
    }

    fn load_source(&mut self, source: DataSource) {
        let result = match &source {
            DataSource::Sample => {
                self.load_sample();
                return;
            }
            DataSource::Items(path) => crate::io::load_items(path).map(|items| (items, path)),
            DataSource::RawExport { events, categories } => {
                crate::io::load_raw_export(events, categories).map(|items| (items, events))
            }
            DataSource::Csv(path) => crate::io::csv_import::import_csv(path).map(|(items, _)| (items, path)),
        };
        match result {
            Ok((items, path)) => {
                let name = display_name(path);
                self.set_items(items, name);
            }
            Err(e) => {
                self.report_error("Error loading data", &e);
                self.load_sample();
            }
        }
    }

    /// Swap in a new dataset, resetting scroll, selection and filters.
    fn set_items(&mut self, items: Vec<Arc<Item>>, name: String) {
        self.filter = CategoryFilter::from_items(items.iter().map(|i| i.as_ref()));
        self.renderer.set_items(&items);
        self.viewport.scroll_to(0.0);
        self.viewport.smooth_scroll_x = 0.0;
        self.selected = None;
        self.status_message = format!(
            "Loaded {} events in {} years",
            items.len(),
            self.renderer.groups().len()
        );
        self.dataset_name = name;
        self.items = items;
    }

    fn report_error(&mut self, what: &str, err: &anyhow::Error) {
        log::error!("{}: {:#}", what, err);
        self.status_message = format!("{}: {:#}", what, err);
    }

    // --- File operations ---

    pub fn load_sample(&mut self) {
        self.set_items(crate::io::sample_items(SAMPLE_SIZE), "Sample timeline".to_string());
    }

    pub fn open_dataset(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Timeline Data", &["json"])
            .pick_file()
        {
            match crate::io::load_items(&path) {
                Ok(items) => self.set_items(items, display_name(&path)),
                Err(e) => self.report_error("Error loading", &e),
            }
        }
    }

    pub fn open_raw_export(&mut self) {
        let Some(events) = rfd::FileDialog::new()
            .set_title("Select events export")
            .add_filter("JSON", &["json"])
            .pick_file()
        else {
            return;
        };
        let Some(categories) = rfd::FileDialog::new()
            .set_title("Select categories export")
            .add_filter("JSON", &["json"])
            .pick_file()
        else {
            return;
        };
        match crate::io::load_raw_export(&events, &categories) {
            Ok(items) => self.set_items(items, display_name(&events)),
            Err(e) => self.report_error("Error loading export", &e),
        }
    }

    pub fn import_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv", "txt"])
            .pick_file()
        {
            match crate::io::csv_import::import_csv(&path) {
                Ok((items, skipped)) => {
                    self.set_items(items, display_name(&path));
                    if skipped > 0 {
                        self.status_message =
                            format!("{} ({} rows skipped)", self.status_message, skipped);
                    }
                }
                Err(e) => self.report_error("CSV import failed", &e),
            }
        }
    }

    pub fn save_dataset_as(&mut self) {
        if self.items.is_empty() {
            self.status_message = "Nothing to save, the timeline is empty".to_string();
            return;
        }
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Timeline Data", &["json"])
            .set_file_name(format!("{}.json", self.dataset_name))
            .save_file()
        {
            match crate::io::save_items(&self.items, &path) {
                Ok(()) => self.status_message = format!("Saved {}", path.display()),
                Err(e) => self.report_error("Error saving", &e),
            }
        }
    }

    pub fn save_config(&mut self) {
        let Some(path) = self.config_path.clone() else {
            self.status_message = "No settings location on this platform".to_string();
            return;
        };
        match self.config.save_to(&path) {
            Ok(()) => self.status_message = "Settings saved".to_string(),
            Err(e) => self.report_error("Error saving settings", &e),
        }
    }

    // --- View operations ---

    pub fn on_filter_changed(&mut self) {
        let visible = self.filter.iter().filter(|(_, v)| *v).count();
        self.status_message = format!("{} of {} categories shown", visible, self.filter.len());
    }

    pub fn set_effect_tier(&mut self, tier: EffectTier) {
        self.config.effects = tier;
        self.renderer.set_entrance_speed(tier.entrance_speed());
        self.status_message = format!("Effects: {}", tier.display_name());
    }

    pub fn jump_to_start(&mut self) {
        self.viewport.scroll_to(0.0);
    }

    pub fn jump_to_end(&mut self) {
        let total = self.renderer.total_width(self.viewport.width);
        self.viewport.scroll_to(self.viewport.max_scroll(total));
    }

    pub fn jump_to_year(&mut self, year: i32) {
        if let Some(offset) = self.renderer.scroll_offset_for_year(year, self.viewport.width) {
            self.viewport.scroll_to(offset);
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let column = self.renderer.last_stats().column_width;
        let page = self.viewport.width;
        ctx.input(|i| {
            if i.key_pressed(egui::Key::ArrowRight) {
                self.viewport.scroll_by(column);
            }
            if i.key_pressed(egui::Key::ArrowLeft) {
                self.viewport.scroll_by(-column);
            }
            if i.key_pressed(egui::Key::PageDown) {
                self.viewport.scroll_by(page);
            }
            if i.key_pressed(egui::Key::PageUp) {
                self.viewport.scroll_by(-page);
            }
        });
        if ctx.input(|i| i.key_pressed(egui::Key::Home)) {
            self.jump_to_start();
        }
        if ctx.input(|i| i.key_pressed(egui::Key::End)) {
            self.jump_to_end();
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.selected = None;
            self.renderer.select(None);
        }
    }
}

fn display_name(path: &std::path::Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Timeline")
        .to_string()
}

impl eframe::App for TimelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // No animation while minimized; restoring the window repaints.
        let minimized = ctx.input(|i| i.viewport().minimized.unwrap_or(false));
        if minimized && self.frame_loop.is_running() {
            self.frame_loop.stop();
        } else if !minimized && !self.frame_loop.is_running() {
            self.frame_loop.start();
        }

        self.handle_keys(ctx);

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_DARK)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_status())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let stats = self.renderer.last_stats();
                        let dim = |text: String| {
                            egui::RichText::new(text)
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM)
                        };
                        ui.label(dim(format!(
                            "Scroll: {:.0} / {:.0}",
                            self.viewport.scroll_x,
                            self.viewport.max_scroll(stats.total_width)
                        )));
                        ui.label(dim(" · ".to_string()));
                        ui.label(dim(format!(
                            "Columns: {} of {} · Cards: {} · Scale: {:.2}",
                            stats.visible_columns,
                            self.renderer.column_count(),
                            stats.cards_drawn,
                            stats.scale
                        )));
                        ui.label(dim(" · ".to_string()));
                        ui.label(dim(format!(
                            "Events: {} · Years: {}",
                            self.items.len(),
                            self.renderer.groups().len()
                        )));
                    });
                });
            });

        // Right panel: details for the selected item
        if let Some(item) = self.selected.clone() {
            let mut action = ui::item_details::DetailsAction::None;
            egui::SidePanel::right("details_panel")
                .default_width(ui::theme::DETAILS_PANEL_WIDTH)
                .resizable(true)
                .frame(
                    egui::Frame::default()
                        .fill(ui::theme::BG_PANEL)
                        .inner_margin(egui::Margin::same(8.0))
                        .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
                )
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        action = ui::item_details::show_item_details(&item, &self.filter, ui);
                    });
                });
            match action {
                ui::item_details::DetailsAction::Close => {
                    self.selected = None;
                    self.renderer.select(None);
                }
                ui::item_details::DetailsAction::JumpTo(year) => self.jump_to_year(year),
                ui::item_details::DetailsAction::None => {}
            }
        }

        // Bottom panel above the status bar: minimap
        egui::TopBottomPanel::bottom("minimap")
            .exact_height(self.config.minimap_height + 12.0)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::symmetric(0.0, 6.0)),
            )
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui::minimap::show_minimap(
                        &mut self.renderer,
                        &mut self.viewport,
                        &self.filter,
                        self.config.minimap_width,
                        self.config.minimap_height,
                        self.config.minimap_margin,
                        ui,
                    );
                });
            });

        // Central panel: timeline canvas
        let canvas_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(canvas_frame).show(ctx, |ui| {
            let images = self.images.bind(ctx);
            let click = ui::timeline_canvas::show_timeline_canvas(
                &mut self.renderer,
                &mut self.viewport,
                &self.filter,
                &images,
                ui,
            );
            match click {
                Some(CanvasClick::Item(item)) => {
                    self.status_message = format!("Selected '{}'", item.heading(item.track()));
                    self.selected = Some(item);
                }
                Some(CanvasClick::Empty) => self.selected = None,
                None => {}
            }
        });

        // Dialogs
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
        if self.show_csv_help {
            ui::dialogs::show_csv_help_dialog(self, ctx);
        }

        self.frame_loop.frame_finished();
    }
}
