/*!
 * Desktop viewer for the bookstore directory.
 *
 * Renders the province map with per-type markers, a sidebar filter panel,
 * an on-map legend, and a detail modal with store/image navigation.
 * The directory fetch and photo downloads run on background threads and
 * report back over mpsc channels.
 */

use ahash::AHashMap;
use bookmap::legend::{self, LegendEntry, Rgba};
use bookmap::markers::{self, TypeVisibility};
use bookmap::modal::ModalNavigator;
use bookmap::models::{Coordinate, DirectorySnapshot};
use bookmap::region::{
    default_region, BoundsCoordinator, LatLngBounds, MapViewport, RegionLayer, REGIONS,
};
use bookmap::{storage, Client};
use eframe::egui;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 750.0])
            .with_min_inner_size([800.0, 550.0])
            .with_title("แผนที่ร้านหนังสือ - bookmap"),
        ..Default::default()
    };

    eframe::run_native(
        "bookmap",
        options,
        Box::new(|_cc| Ok(Box::new(BookmapApp::new()))),
    )
}

enum FetchResult {
    Snapshot(DirectorySnapshot),
    Error(String),
}

/// Decoded photo delivered by a download thread: url, size, RGBA pixels.
type PhotoResult = (String, Result<([usize; 2], Vec<u8>), String>);

enum PhotoState {
    Loading,
    Ready(egui::TextureHandle),
    Failed,
}

/// Viewport state as the map widget sees it. The bounds coordinator drives
/// this through the `MapViewport` trait; the paint code reads it back.
#[derive(Debug)]
struct PanelViewport {
    center: Coordinate,
    zoom: u8,
    min_zoom: u8,
    max_zoom: u8,
    max_bounds: Option<LatLngBounds>,
}

impl Default for PanelViewport {
    fn default() -> Self {
        let region = default_region();
        Self {
            center: region.center,
            zoom: region.default_zoom,
            min_zoom: region.min_zoom,
            max_zoom: region.max_zoom,
            max_bounds: None,
        }
    }
}

impl MapViewport for PanelViewport {
    fn clear_max_bounds(&mut self) {
        self.max_bounds = None;
    }

    fn set_zoom_limits(&mut self, min: u8, max: u8) {
        self.min_zoom = min;
        self.max_zoom = max;
        self.zoom = self.zoom.clamp(min, max);
    }

    fn set_view(&mut self, center: Coordinate, zoom: u8) {
        self.center = center;
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    fn set_max_bounds(&mut self, bounds: LatLngBounds) {
        self.max_bounds = Some(bounds);
    }
}

struct BookmapApp {
    // Data
    snapshot: Option<DirectorySnapshot>,
    visibility: TypeVisibility,
    legend_entries: Vec<LegendEntry>,
    colors: AHashMap<String, Rgba>,

    // Map state
    viewport: PanelViewport,
    coordinator: BoundsCoordinator,

    // Detail modal
    modal: ModalNavigator,
    swipe_accum: f32,

    // UI state
    sidebar_open: bool,
    is_loading: bool,
    error_message: String,
    status_message: String,

    // Background operations
    fetch_receiver: Option<mpsc::Receiver<FetchResult>>,
    photo_sender: mpsc::Sender<PhotoResult>,
    photo_receiver: mpsc::Receiver<PhotoResult>,
    photos: AHashMap<String, PhotoState>,
}

impl BookmapApp {
    fn new() -> Self {
        let mut viewport = PanelViewport::default();
        let coordinator = BoundsCoordinator::new(default_region(), &mut viewport);
        let (photo_sender, photo_receiver) = mpsc::channel();

        let mut app = Self {
            snapshot: None,
            visibility: TypeVisibility::default(),
            legend_entries: Vec::new(),
            colors: AHashMap::new(),
            viewport,
            coordinator,
            modal: ModalNavigator::new(),
            swipe_accum: 0.0,
            sidebar_open: true,
            is_loading: false,
            error_message: String::new(),
            status_message: String::new(),
            fetch_receiver: None,
            photo_sender,
            photo_receiver,
            photos: AHashMap::new(),
        };
        app.start_fetch();
        app
    }

    /// One outstanding directory fetch; completion replaces the snapshot
    /// wholesale. Not re-triggered except by the explicit reload button.
    fn start_fetch(&mut self) {
        if self.is_loading {
            return;
        }
        self.is_loading = true;
        self.error_message.clear();
        self.status_message = "กำลังโหลดข้อมูล...".to_string();

        let (sender, receiver) = mpsc::channel();
        self.fetch_receiver = Some(receiver);

        thread::spawn(move || {
            let result = match Client::default().fetch_directory() {
                Ok(snapshot) => FetchResult::Snapshot(snapshot),
                Err(err) => FetchResult::Error(format!("เกิดข้อผิดพลาด: {err:#}")),
            };
            let _ = sender.send(result);
        });
    }

    fn check_fetch_result(&mut self) {
        let Some(receiver) = &self.fetch_receiver else {
            return;
        };
        let Ok(result) = receiver.try_recv() else {
            return;
        };
        self.is_loading = false;
        self.fetch_receiver = None;
        self.status_message.clear();

        match result {
            FetchResult::Snapshot(snapshot) => {
                let types = legend::derive_types(&snapshot);
                self.colors = legend::assign_colors(&types, &legend::DEFAULT_PALETTE);
                self.legend_entries = legend::build_legend_entries(&snapshot, &self.colors);
                self.visibility = TypeVisibility::from_snapshot(&snapshot);
                self.snapshot = Some(snapshot);
                self.error_message.clear();
            }
            FetchResult::Error(message) => {
                self.error_message = message;
            }
        }
    }

    fn check_photo_results(&mut self, ctx: &egui::Context) {
        while let Ok((url, result)) = self.photo_receiver.try_recv() {
            let state = match result {
                Ok((size, pixels)) => {
                    let image = egui::ColorImage::from_rgba_unmultiplied(size, &pixels);
                    PhotoState::Ready(ctx.load_texture(&url, image, Default::default()))
                }
                Err(err) => {
                    log::warn!("photo load failed for {url}: {err}");
                    PhotoState::Failed
                }
            };
            self.photos.insert(url, state);
        }
    }

    /// Download and decode a photo on a background thread, once per URL.
    fn request_photo(&mut self, url: &str) {
        if self.photos.contains_key(url) {
            return;
        }
        self.photos.insert(url.to_string(), PhotoState::Loading);
        let sender = self.photo_sender.clone();
        let url = url.to_string();
        thread::spawn(move || {
            let result = fetch_photo(&url);
            let _ = sender.send((url, result));
        });
    }

    fn export_snapshot(&mut self) {
        let Some(snapshot) = &self.snapshot else {
            return;
        };
        let default_dir = dirs::home_dir().unwrap_or_else(|| ".".into());
        let default_name = format!(
            "bookstores_{}.csv",
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        );
        let Some(path) = rfd::FileDialog::new()
            .set_directory(default_dir)
            .set_file_name(default_name)
            .add_filter("CSV", &["csv"])
            .add_filter("JSON", &["json"])
            .save_file()
        else {
            return;
        };
        let result = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => storage::save_json(snapshot, &path),
            _ => storage::save_csv(snapshot, &path),
        };
        match result {
            Ok(()) => self.status_message = format!("บันทึกแล้ว: {}", path.display()),
            Err(err) => self.error_message = format!("บันทึกไม่สำเร็จ: {err:#}"),
        }
    }

    fn switch_region(&mut self, region: &'static RegionLayer) {
        self.coordinator
            .switch_to(region, &mut self.viewport, Instant::now());
    }

    fn open_marker(&mut self, record_index: usize) {
        let Some(snapshot) = &self.snapshot else {
            return;
        };
        let Some(target) = snapshot.records.get(record_index) else {
            return;
        };
        let group: Vec<_> = markers::group_by_location(snapshot, target)
            .into_iter()
            .cloned()
            .collect();
        self.modal.open(group);
        self.swipe_accum = 0.0;
    }
}

impl eframe::App for BookmapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_fetch_result();
        self.check_photo_results(ctx);

        // Deferred bounds application after a layer switch.
        let now = Instant::now();
        self.coordinator.poll(&mut self.viewport, now);
        if let Some(deadline) = self.coordinator.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
        if self.is_loading {
            ctx.request_repaint();
        }

        self.show_sidebar(ctx);
        self.show_map(ctx);
        self.show_modal(ctx);
    }
}

impl BookmapApp {
    fn show_sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("sidebar")
            .resizable(false)
            .default_width(240.0)
            .show_animated(ctx, self.sidebar_open, |ui| {
                ui.add_space(8.0);
                ui.heading("ประเภทร้านหนังสือ");
                ui.add_space(8.0);

                let mut toggled: Option<String> = None;
                for entry in &self.legend_entries {
                    let mut checked = self.visibility.is_visible(&entry.label);
                    let text = format!("{} ({})", entry.label, entry.count);
                    if ui.checkbox(&mut checked, text).changed() {
                        toggled = Some(entry.label.clone());
                    }
                }
                if let Some(label) = toggled {
                    self.visibility.toggle(&label);
                }

                ui.add_space(12.0);
                ui.separator();
                ui.label("จังหวัด");
                let active = self.coordinator.active().key;
                let mut target: Option<&'static RegionLayer> = None;
                for region in &REGIONS {
                    if ui.radio(region.key == active, region.name).clicked() && region.key != active
                    {
                        target = Some(region);
                    }
                }
                if let Some(region) = target {
                    self.switch_region(region);
                }

                ui.add_space(12.0);
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("โหลดใหม่").clicked() {
                        self.start_fetch();
                    }
                    if ui.button("ส่งออกข้อมูล").clicked() {
                        self.export_snapshot();
                    }
                });

                if self.is_loading {
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(&self.status_message);
                    });
                } else if !self.status_message.is_empty() {
                    ui.add_space(8.0);
                    ui.label(&self.status_message);
                }
                if !self.error_message.is_empty() {
                    ui.add_space(8.0);
                    ui.colored_label(egui::Color32::RED, &self.error_message);
                }
            });

        egui::TopBottomPanel::top("topbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let arrow = if self.sidebar_open { "⏴" } else { "⏵" };
                if ui.button(arrow).clicked() {
                    self.sidebar_open = !self.sidebar_open;
                }
                ui.label(self.coordinator.active().name);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(format!(
                        "zoom {}  ·  {:.4}, {:.4}",
                        self.viewport.zoom, self.viewport.center.lat, self.viewport.center.lon
                    ));
                });
            });
        });
    }

    fn show_map(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let size = ui.available_size();
            let (response, painter) = ui.allocate_painter(size, egui::Sense::click());
            let rect = response.rect;

            painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(0xe8, 0xf0, 0xe8));

            // Province overlay stand-in: the deployed app layers a raster
            // image here; the desktop build tints the overlay extent.
            let region = self.coordinator.active();
            let view_bounds = self
                .viewport
                .max_bounds
                .unwrap_or(region.overlay_bounds);
            let overlay_rect = bounds_to_rect(&view_bounds, rect, &region.overlay_bounds);
            painter.rect_filled(
                overlay_rect,
                4.0,
                egui::Color32::from_rgba_unmultiplied(0xcf, 0xe3, 0xcf, 160),
            );
            painter.text(
                rect.left_top() + egui::vec2(10.0, 10.0),
                egui::Align2::LEFT_TOP,
                region.name,
                egui::FontId::proportional(16.0),
                egui::Color32::DARK_GRAY,
            );

            // Markers
            let click = response
                .clicked()
                .then(|| response.interact_pointer_pos())
                .flatten();
            let mut clicked_record: Option<usize> = None;
            if let Some(snapshot) = &self.snapshot {
                let shown = markers::filter_visible(snapshot, &self.visibility);
                for record in shown {
                    let Some(coordinate) = record.coordinate() else {
                        continue;
                    };
                    if !view_bounds.contains(coordinate) {
                        continue;
                    }
                    let pos = project(&view_bounds, rect, coordinate);
                    let color = legend::color_for(&self.colors, record.type_label());
                    painter.circle_filled(pos, 6.0, to_color32(color));
                    painter.circle_stroke(pos, 6.0, egui::Stroke::new(1.0, egui::Color32::WHITE));

                    if let Some(click_pos) = click {
                        if click_pos.distance(pos) <= 8.0 && clicked_record.is_none() {
                            let index = snapshot
                                .records
                                .iter()
                                .position(|r| std::ptr::eq(r, record));
                            clicked_record = index;
                        }
                    }
                }
            }
            if let Some(index) = clicked_record {
                self.open_marker(index);
            }

            self.paint_legend(&painter, rect);
        });
    }

    /// Bottom-right on-map legend, one row per type.
    fn paint_legend(&self, painter: &egui::Painter, map_rect: egui::Rect) {
        if self.legend_entries.is_empty() {
            return;
        }
        let row_h = 20.0;
        let width = 210.0;
        let height = 30.0 + row_h * self.legend_entries.len() as f32;
        let rect = egui::Rect::from_min_size(
            map_rect.right_bottom() - egui::vec2(width + 12.0, height + 12.0),
            egui::vec2(width, height),
        );
        painter.rect_filled(rect, 8.0, egui::Color32::from_rgba_unmultiplied(255, 255, 255, 235));
        painter.text(
            rect.center_top() + egui::vec2(0.0, 6.0),
            egui::Align2::CENTER_TOP,
            "ประเภทร้านหนังสือ",
            egui::FontId::proportional(13.0),
            egui::Color32::from_gray(50),
        );
        for (i, entry) in self.legend_entries.iter().enumerate() {
            let y = rect.top() + 28.0 + i as f32 * row_h + row_h / 2.0;
            let dot = egui::pos2(rect.left() + 14.0, y);
            painter.circle_filled(dot, 5.0, to_color32(entry.color));
            painter.text(
                egui::pos2(rect.left() + 26.0, y),
                egui::Align2::LEFT_CENTER,
                format!("{} ({})", entry.label, entry.count),
                egui::FontId::proportional(12.0),
                to_color32(entry.color),
            );
        }
    }

    fn show_modal(&mut self, ctx: &egui::Context) {
        if !self.modal.is_open() {
            return;
        }
        let title = self.modal.location_title().unwrap_or_default();
        let images = self.modal.current_images();
        if let Some(url) = images.get(self.modal.image_index()).cloned() {
            self.request_photo(&url);
        }

        let mut open = true;
        let group_len = self.modal.group().len();
        let mut go_to: Option<usize> = None;
        let mut next_store = false;
        let mut prev_store = false;
        let mut next_image = false;
        let mut prev_image = false;
        let mut swipe: Option<f32> = None;

        egui::Window::new(format!("📍 {title}"))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                let Some(store) = self.modal.current_store() else {
                    return;
                };
                let color = to_color32(legend::color_for(&self.colors, store.type_label()));

                ui.heading(&store.store_name);
                ui.horizontal(|ui| {
                    ui.colored_label(color, store.type_label());
                    if !images.is_empty() {
                        ui.label(format!("📷 {} รูป", images.len()));
                    }
                });

                if group_len > 1 {
                    ui.add_space(4.0);
                    ui.horizontal(|ui| {
                        if ui.button("‹").clicked() {
                            prev_store = true;
                        }
                        for (i, s) in self.modal.group().iter().enumerate() {
                            let label = truncate_name(&s.store_name, 15);
                            if ui
                                .selectable_label(i == self.modal.store_index(), label)
                                .clicked()
                            {
                                go_to = Some(i);
                            }
                        }
                        if ui.button("›").clicked() {
                            next_store = true;
                        }
                        ui.label(format!("{}/{}", self.modal.store_index() + 1, group_len));
                    });
                }

                ui.add_space(8.0);

                // Image area with touch-style swipe
                let image_size = egui::vec2(420.0, 280.0);
                let (resp, painter) = ui.allocate_painter(image_size, egui::Sense::click_and_drag());
                let image_rect = resp.rect;
                painter.rect_filled(image_rect, 4.0, egui::Color32::from_gray(245));
                match images
                    .get(self.modal.image_index())
                    .and_then(|url| self.photos.get(url))
                {
                    Some(PhotoState::Ready(texture)) => {
                        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                        painter.image(texture.id(), image_rect, uv, egui::Color32::WHITE);
                    }
                    Some(PhotoState::Loading) => {
                        painter.text(
                            image_rect.center(),
                            egui::Align2::CENTER_CENTER,
                            "กำลังโหลดรูป...",
                            egui::FontId::proportional(14.0),
                            egui::Color32::GRAY,
                        );
                    }
                    _ => {
                        painter.text(
                            image_rect.center(),
                            egui::Align2::CENTER_CENTER,
                            "ไม่มีรูปภาพ",
                            egui::FontId::proportional(14.0),
                            egui::Color32::GRAY,
                        );
                    }
                }
                if images.len() > 1 {
                    painter.text(
                        image_rect.center_bottom() - egui::vec2(0.0, 8.0),
                        egui::Align2::CENTER_BOTTOM,
                        format!("{} / {}", self.modal.image_index() + 1, images.len()),
                        egui::FontId::proportional(12.0),
                        egui::Color32::DARK_GRAY,
                    );
                }
                if resp.dragged() {
                    self.swipe_accum += resp.drag_delta().x;
                }
                if resp.drag_stopped() {
                    swipe = Some(self.swipe_accum);
                    self.swipe_accum = 0.0;
                }

                if images.len() > 1 {
                    ui.horizontal(|ui| {
                        if ui.button("‹ รูปก่อนหน้า").clicked() {
                            prev_image = true;
                        }
                        if ui.button("รูปถัดไป ›").clicked() {
                            next_image = true;
                        }
                    });
                }

                ui.add_space(8.0);
                ui.separator();
                ui.label("📍 ที่อยู่");
                ui.label(format!("ตำบล: {}", dash_if_empty(&store.subdistrict)));
                ui.label(format!("อำเภอ: {}", dash_if_empty(&store.district)));
                ui.label(format!("จังหวัด: {}", dash_if_empty(&store.province)));
                if let Some(c) = store.coordinate() {
                    ui.weak(format!("พิกัด: {:.6}, {:.6}", c.lat, c.lon));
                }
            });

        if prev_store {
            self.modal.prev_store();
        }
        if next_store {
            self.modal.next_store();
        }
        if let Some(i) = go_to {
            self.modal.go_to_store(i);
        }
        if prev_image {
            self.modal.prev_image();
        }
        if next_image {
            self.modal.next_image();
        }
        if let Some(delta) = swipe {
            self.modal.on_swipe(delta);
        }
        if !open {
            self.modal.close();
        }
    }
}

/// Equirectangular projection of a coordinate into the map rect.
fn project(bounds: &LatLngBounds, rect: egui::Rect, c: Coordinate) -> egui::Pos2 {
    let span_lon = bounds.north_east.lon - bounds.south_west.lon;
    let span_lat = bounds.north_east.lat - bounds.south_west.lat;
    let x = (c.lon - bounds.south_west.lon) / span_lon;
    let y = (bounds.north_east.lat - c.lat) / span_lat;
    egui::pos2(
        rect.left() + x as f32 * rect.width(),
        rect.top() + y as f32 * rect.height(),
    )
}

/// Rect covered by `inner` when `outer` is mapped onto `rect`.
fn bounds_to_rect(outer: &LatLngBounds, rect: egui::Rect, inner: &LatLngBounds) -> egui::Rect {
    let tl = project(outer, rect, Coordinate {
        lat: inner.north_east.lat,
        lon: inner.south_west.lon,
    });
    let br = project(outer, rect, Coordinate {
        lat: inner.south_west.lat,
        lon: inner.north_east.lon,
    });
    egui::Rect::from_two_pos(tl, br).intersect(rect)
}

fn to_color32(c: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

fn truncate_name(name: &str, max_chars: usize) -> String {
    if name.chars().count() > max_chars {
        let head: String = name.chars().take(max_chars).collect();
        format!("{head}...")
    } else {
        name.to_string()
    }
}

fn dash_if_empty(s: &str) -> &str {
    if s.trim().is_empty() { "-" } else { s }
}

/// Download and decode one photo; runs on a background thread.
fn fetch_photo(url: &str) -> Result<([usize; 2], Vec<u8>), String> {
    let bytes = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .and_then(|r| r.bytes())
        .map_err(|e| e.to_string())?;
    let decoded = image::load_from_memory(&bytes).map_err(|e| e.to_string())?;
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok((size, rgba.into_raw()))
}
