use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use image::{Rgba, RgbaImage};

use super::{ActionOutcome, Dialogs, FileImageStore, ImageStore, PaintApp};
use crate::config::Config;
use crate::draw::Color;
use crate::draw::color::{BLACK, ORANGE};
use crate::input::Mode;
use crate::raster::{ExportFormat, Raster, RasterError};
use crate::util::Point;

#[derive(Clone, Default)]
struct MockDialogs {
    open_path: Option<PathBuf>,
    save_path: Option<(PathBuf, Option<ExportFormat>)>,
    color: Option<Color>,
    reported: Arc<Mutex<Vec<(String, String)>>>,
    offered_colors: Arc<Mutex<Vec<Color>>>,
}

impl Dialogs for MockDialogs {
    fn open_image_path(&self) -> Option<PathBuf> {
        self.open_path.clone()
    }

    fn save_image_path(&self) -> Option<(PathBuf, Option<ExportFormat>)> {
        self.save_path.clone()
    }

    fn pick_color(&self, current: Color) -> Option<Color> {
        self.offered_colors.lock().unwrap().push(current);
        self.color
    }

    fn report_error(&self, title: &str, message: &str) {
        self.reported
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string()));
    }
}

#[derive(Clone, Default)]
struct MockStore {
    fail_load: bool,
    fail_save: bool,
    loads: Arc<Mutex<Vec<PathBuf>>>,
    saves: Arc<Mutex<Vec<(PathBuf, Option<ExportFormat>, i32, i32)>>>,
}

impl ImageStore for MockStore {
    fn load(&self, path: &Path) -> Result<Raster, RasterError> {
        self.loads.lock().unwrap().push(path.to_path_buf());
        if self.fail_load {
            Err(RasterError::Decode {
                path: path.to_path_buf(),
                message: "bad header".to_string(),
            })
        } else {
            Raster::from_rgba(&RgbaImage::from_pixel(4, 3, Rgba([9, 9, 9, 255])))
        }
    }

    fn save(
        &self,
        raster: &Raster,
        path: &Path,
        filter: Option<ExportFormat>,
    ) -> Result<PathBuf, RasterError> {
        self.saves.lock().unwrap().push((
            path.to_path_buf(),
            filter,
            raster.width(),
            raster.height(),
        ));
        if self.fail_save {
            Err(RasterError::UnsupportedFormat(path.to_path_buf()))
        } else {
            Ok(path.to_path_buf())
        }
    }
}

fn small_config() -> Config {
    Config::from_toml("[canvas]\nwidth = 40\nheight = 30\n").unwrap()
}

fn app_with(dialogs: MockDialogs, store: MockStore) -> PaintApp {
    PaintApp::new(&small_config(), Box::new(dialogs), Box::new(store))
}

#[test]
fn cancelled_load_changes_nothing() {
    let store = MockStore::default();
    let mut app = app_with(MockDialogs::default(), store.clone());

    assert_eq!(app.load_image(), ActionOutcome::Cancelled);
    assert!(app.surface().background().is_none());
    assert!(store.loads.lock().unwrap().is_empty());
}

#[test]
fn load_sets_background() {
    let dialogs = MockDialogs {
        open_path: Some(PathBuf::from("/pictures/bg.png")),
        ..Default::default()
    };
    let store = MockStore::default();
    let mut app = app_with(dialogs, store.clone());

    assert_eq!(app.load_image(), ActionOutcome::Completed);
    assert_eq!(app.surface().background().unwrap().width(), 4);
    assert_eq!(
        store.loads.lock().unwrap().as_slice(),
        &[PathBuf::from("/pictures/bg.png")]
    );
}

#[test]
fn failed_load_is_reported_and_keeps_old_background() {
    let dialogs = MockDialogs {
        open_path: Some(PathBuf::from("/pictures/broken.png")),
        ..Default::default()
    };
    let store = MockStore {
        fail_load: true,
        ..Default::default()
    };
    let mut app = app_with(dialogs.clone(), store);
    let previous = Raster::from_rgba(&RgbaImage::from_pixel(7, 7, Rgba([1, 2, 3, 255]))).unwrap();
    app.surface_mut().load_background(previous);

    let outcome = app.load_image();
    assert!(outcome.is_failed());
    assert_eq!(app.surface().background().unwrap().width(), 7);

    let reported = dialogs.reported.lock().unwrap();
    assert_eq!(reported.len(), 1);
    assert_eq!(reported[0].0, "Could not open image");
    assert!(reported[0].1.contains("bad header"));
}

#[test]
fn cancelled_save_writes_nothing() {
    let store = MockStore::default();
    let mut app = app_with(MockDialogs::default(), store.clone());

    assert_eq!(app.save_image(), ActionOutcome::Cancelled);
    assert!(store.saves.lock().unwrap().is_empty());
}

#[test]
fn save_passes_composite_and_filter_to_store() {
    let dialogs = MockDialogs {
        save_path: Some((PathBuf::from("/tmp/out"), Some(ExportFormat::Jpeg))),
        ..Default::default()
    };
    let store = MockStore::default();
    let mut app = app_with(dialogs, store.clone());

    assert_eq!(app.save_image(), ActionOutcome::Completed);
    assert_eq!(
        store.saves.lock().unwrap().as_slice(),
        &[(PathBuf::from("/tmp/out"), Some(ExportFormat::Jpeg), 40, 30)]
    );
}

#[test]
fn failed_save_is_reported() {
    let dialogs = MockDialogs {
        save_path: Some((PathBuf::from("/tmp/out.tiff"), None)),
        ..Default::default()
    };
    let store = MockStore {
        fail_save: true,
        ..Default::default()
    };
    let mut app = app_with(dialogs.clone(), store);

    assert!(app.save_image().is_failed());
    let reported = dialogs.reported.lock().unwrap();
    assert_eq!(reported[0].0, "Could not save image");
}

#[test]
fn zero_sized_canvas_save_fails_before_touching_store() {
    let store = MockStore::default();
    let dialogs = MockDialogs::default();
    let mut app = app_with(dialogs.clone(), store.clone());
    app.surface_mut().resize(0, 0);

    assert!(app.save_image_to(Path::new("/tmp/x.png"), None).is_failed());
    assert!(store.saves.lock().unwrap().is_empty());
    assert_eq!(dialogs.reported.lock().unwrap().len(), 1);
}

#[test]
fn color_picker_starts_from_current_color() {
    let dialogs = MockDialogs {
        color: Some(ORANGE),
        ..Default::default()
    };
    let mut app = app_with(dialogs.clone(), MockStore::default());

    assert_eq!(app.choose_color(), ActionOutcome::Completed);
    assert_eq!(app.surface().tool().color, ORANGE);
    assert_eq!(dialogs.offered_colors.lock().unwrap().as_slice(), &[BLACK]);
}

#[test]
fn cancelled_color_pick_keeps_color() {
    let mut app = app_with(MockDialogs::default(), MockStore::default());
    assert_eq!(app.choose_color(), ActionOutcome::Cancelled);
    assert_eq!(app.surface().tool().color, BLACK);
}

#[test]
fn pen_size_selector_uses_configured_sizes() {
    let mut app = app_with(MockDialogs::default(), MockStore::default());
    assert_eq!(app.pen_sizes(), &[1, 2, 3, 4, 5]);

    assert_eq!(app.select_pen_size(4), ActionOutcome::Completed);
    assert_eq!(app.surface().tool().stroke_width, 5);

    assert!(app.select_pen_size(5).is_failed());
    assert_eq!(app.surface().tool().stroke_width, 5);
}

#[test]
fn mode_and_clear_buttons_drive_surface() {
    let mut app = app_with(MockDialogs::default(), MockStore::default());
    app.select_mode(Mode::Line);

    let surface = app.surface_mut();
    surface.on_pointer_down(Point::new(0, 0));
    surface.on_pointer_up(Point::new(5, 5));
    assert_eq!(app.surface().scene().last().unwrap().kind(), Mode::Line);

    assert_eq!(app.clear(), ActionOutcome::Completed);
    assert!(app.surface().scene().is_empty());
}

#[test]
fn save_to_default_directory_uses_export_settings() {
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path().join("exports");
    let config = Config::from_toml(&format!(
        "[canvas]\nwidth = 10\nheight = 10\n[export]\nsave_directory = {:?}\nfilename_template = \"board\"\nformat = \"bmp\"\n",
        dir.to_string_lossy()
    ))
    .unwrap();
    let mut app = PaintApp::new(
        &config,
        Box::new(MockDialogs::default()),
        Box::new(FileImageStore),
    );

    assert_eq!(app.save_image_to_default(), ActionOutcome::Completed);
    let written = dir.canonicalize().unwrap().join("board.bmp");
    assert!(written.exists());
    let reloaded = crate::raster::load_from_path(&written).unwrap();
    assert_eq!((reloaded.width(), reloaded.height()), (10, 10));
}

#[test]
fn bad_filename_template_fails_without_touching_disk() {
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path().join("exports");
    let mut config = small_config();
    config.export.save_directory = dir.to_string_lossy().into_owned();
    config.export.filename_template = "sketch_%Q".to_string();

    let dialogs = MockDialogs::default();
    let store = MockStore::default();
    let mut app = PaintApp::new(&config, Box::new(dialogs.clone()), Box::new(store.clone()));

    assert!(matches!(
        app.save_image_to_default(),
        ActionOutcome::Failed(message) if message.contains("sketch_%Q")
    ));
    assert!(store.saves.lock().unwrap().is_empty());
    assert_eq!(dialogs.reported.lock().unwrap().len(), 1);
    assert!(!dir.exists());
}

#[test]
fn save_to_default_goes_through_the_store() {
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path().join("exports");
    let mut config = small_config();
    config.export.save_directory = dir.to_string_lossy().into_owned();
    config.export.filename_template = "board".to_string();
    config.export.format = ExportFormat::Jpeg;

    let store = MockStore::default();
    let mut app = PaintApp::new(
        &config,
        Box::new(MockDialogs::default()),
        Box::new(store.clone()),
    );

    assert_eq!(app.save_image_to_default(), ActionOutcome::Completed);
    let saves = store.saves.lock().unwrap();
    assert_eq!(
        saves.as_slice(),
        &[(
            dir.canonicalize().unwrap().join("board.jpg"),
            Some(ExportFormat::Jpeg),
            40,
            30
        )]
    );
}
