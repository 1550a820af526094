mod demo;
mod history;
mod map;
mod mission;
mod settings;

use eframe::egui;
use map::coordinate_transform::Plane;
use map::toggles::CHANNELS;
use map::world_view::{MAX_ZOOM, MIN_ZOOM};
use map::MapEditor;
use mission::{Platform, ORDERS, REGIONS};
use settings::MapSettings;

fn main() -> eframe::Result<()> {
    env_logger::init();
    let settings = MapSettings::load().unwrap_or_else(|err| {
        log::warn!("{err:#}; using default settings");
        MapSettings::default()
    });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1000.0, 700.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Waypoint Map",
        native_options,
        Box::new(move |_cc| Ok(Box::new(MapApp::new(settings)))),
    )
}

struct MapApp {
    platform: Platform,
    /// `Err` holds the message shown in place of the map.
    map: Result<MapEditor, String>,
}

impl MapApp {
    fn new(settings: MapSettings) -> Self {
        let crafts = demo::sample_crafts(settings.platform);
        let map = MapEditor::new(&settings, crafts).map_err(|err| {
            log::error!("{err}");
            err.to_string()
        });
        Self {
            platform: settings.platform,
            map,
        }
    }
}

impl eframe::App for MapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let platform = self.platform;
        let map = match &mut self.map {
            Ok(map) => map,
            Err(message) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.colored_label(egui::Color32::RED, message.as_str());
                });
                return;
            }
        };

        let (undo, redo) = ctx.input(|i| {
            (
                i.modifiers.command && i.key_pressed(egui::Key::Z),
                i.modifiers.command && i.key_pressed(egui::Key::Y),
            )
        });
        if undo {
            map.undo();
        }
        if redo {
            map.redo();
        }

        egui::SidePanel::right("map_controls").resizable(false).show(ctx, |ui| {
            controls(ui, map, platform);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| map.show(ui));
    }
}

fn controls(ui: &mut egui::Ui, map: &mut MapEditor, platform: Platform) {
    ui.heading(format!("{} Map", platform.name()));
    ui.separator();

    ui.label("Orientation");
    let mut plane = map.view().plane();
    for option in Plane::ALL {
        ui.radio_value(&mut plane, option, option.title());
    }
    map.set_plane(plane);
    ui.separator();

    ui.label("Waypoints");
    egui::Grid::new("channels").num_columns(2).show(ui, |ui| {
        for (n, channel) in CHANNELS.iter().enumerate() {
            let mut on = map.toggles().channel(channel.slot);
            let checkbox = egui::Checkbox::new(&mut on, channel.label(platform));
            if ui.add_enabled(channel.is_available(platform), checkbox).changed() {
                map.set_channel(channel.slot, on);
            }
            if n % 2 == 1 {
                ui.end_row();
            }
        }
    });
    ui.separator();

    let mut show_tags = map.toggles().show_tags;
    if ui.checkbox(&mut show_tags, "Tags").changed() {
        map.set_show_tags(show_tags);
    }
    let mut show_traces = map.toggles().show_traces;
    if ui.checkbox(&mut show_traces, "Trace").changed() {
        map.set_show_traces(show_traces);
    }

    if platform == Platform::Xwa {
        ui.separator();
        let mut region = map.toggles().region() as i32 + 1;
        let mut order = map.toggles().order() as i32 + 1;
        ui.horizontal(|ui| {
            ui.label("Region");
            if ui.add(egui::DragValue::new(&mut region).range(1..=REGIONS as i32)).changed() {
                map.set_region(region - 1);
            }
        });
        ui.horizontal(|ui| {
            ui.label("Order");
            if ui.add(egui::DragValue::new(&mut order).range(1..=ORDERS as i32)).changed() {
                map.set_order(order - 1);
            }
        });
    }
    ui.separator();

    let mut zoom = map.view().zoom();
    if ui.add(egui::Slider::new(&mut zoom, MIN_ZOOM..=MAX_ZOOM).text("Zoom")).changed() {
        map.set_zoom(zoom);
    }

    if let Some((horizontal, vertical)) = map.cursor_readout() {
        ui.label(horizontal);
        ui.label(vertical);
    }
    ui.separator();

    ui.horizontal(|ui| {
        if ui.add_enabled(map.history().can_undo(), egui::Button::new("Undo")).clicked() {
            map.undo();
        }
        if ui.add_enabled(map.history().can_redo(), egui::Button::new("Redo")).clicked() {
            map.redo();
        }
    });
}
