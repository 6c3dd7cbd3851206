//! Driver behavior against a recording surface.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use horizon_sections::error::{ReconcileError, SurfaceError};
use horizon_sections::prelude::*;
use horizon_sections::surface::SurfaceCommand;
use parking_lot::Mutex;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn label_cell() -> ReuseDescriptor {
    ReuseDescriptor::new("LabelCell", "label-cell")
}

fn supplementary(identifier: &str, size: Option<f32>) -> Supplementary {
    let label = identifier.replacen("reuse_", "label_", 1);
    let access = match identifier.split('+').next() {
        Some("reuse_footer") => "access_footer+{section}",
        _ => "access_header+{section}",
    };
    Supplementary::new(ReuseDescriptor::new("LabelSupplementary", identifier))
        .with_label(label)
        .with_optional_size(size)
        .with_accessibility_format(access)
}

fn item(key: &str, log: &Arc<Mutex<Vec<String>>>) -> Item {
    let selected = log.clone();
    let deselected = log.clone();
    let select_key = format!("select {key}");
    let deselect_key = format!("deselect {key}");
    Item::new(label_cell())
        .with_key(key)
        .with_label(key)
        .with_highlight(false)
        .with_accessibility_format("access-{section}.{item}")
        .on_select(move || selected.lock().push(select_key.clone()))
        .on_deselect(move || deselected.lock().push(deselect_key.clone()))
}

/// Four sections:
/// - A has no items and a sized header and footer.
/// - B has items A, B, C and a sized placeholder footer.
/// - C has items D, E, F and a sized placeholder header.
/// - D has an unsized header and footer.
fn fixture(log: &Arc<Mutex<Vec<String>>>) -> ModelTree {
    let spacer = |size| Supplementary::new(ReuseDescriptor::hidden()).with_size(size);
    ModelTree::new(vec![
        Section::empty()
            .with_header(supplementary("reuse_header+A", Some(10.0)))
            .with_footer(supplementary("reuse_footer+A", Some(11.0))),
        Section::empty()
            .with_items(["A", "B", "C"].map(|key| item(key, log)))
            .with_footer(spacer(21.0)),
        Section::empty()
            .with_items(["D", "E", "F"].map(|key| item(key, log)))
            .with_header(spacer(30.0)),
        Section::empty()
            .with_header(supplementary("reuse_header+D", None))
            .with_footer(supplementary("reuse_footer+D", None)),
    ])
}

fn fixture_driver() -> (ListDriver<RecordingSurface>, Arc<Mutex<Vec<String>>>) {
    init_tracing();
    let log = Arc::new(Mutex::new(Vec::new()));
    let driver = ListDriver::with_tree(RecordingSurface::new(), fixture(&log), DriverConfig::default());
    (driver, log)
}

#[test]
fn test_fixture_counts() {
    let (driver, _) = fixture_driver();
    assert_eq!(driver.section_count(), 4);
    assert_eq!(driver.item_count(0), 0);
    assert_eq!(driver.item_count(1), 3);
    assert_eq!(driver.item_count(2), 3);
    assert_eq!(driver.item_count(3), 0);
    assert_eq!(driver.item_count(4), 0);
    assert_eq!(driver.surface().shape().counts(), &[0, 3, 3, 0]);
}

#[test]
fn test_supplementary_registration_order() {
    let (driver, _) = fixture_driver();
    let supplementaries: Vec<(ElementKind, String)> = driver
        .surface()
        .registrations()
        .into_iter()
        .filter(|(kind, _)| *kind != ElementKind::Item)
        .collect();

    assert_eq!(
        supplementaries,
        vec![
            (ElementKind::Header, "reuse_header+A".to_string()),
            (ElementKind::Footer, "reuse_footer+A".to_string()),
            (ElementKind::Header, "reuse_header+D".to_string()),
            (ElementKind::Footer, "reuse_footer+D".to_string()),
            (ElementKind::Header, "hidden-supplementary-view".to_string()),
            (ElementKind::Footer, "hidden-supplementary-view".to_string()),
        ]
    );
}

#[test]
fn test_item_descriptor_registered_once() {
    let (driver, _) = fixture_driver();
    let items = driver
        .surface()
        .registrations()
        .into_iter()
        .filter(|(kind, _)| *kind == ElementKind::Item)
        .count();
    assert_eq!(items, 1);
    assert!(driver.registry().is_registered(ElementKind::Item, "label-cell"));
}

#[test]
fn test_registrations_precede_reload() {
    let (driver, _) = fixture_driver();
    let commands = driver.surface().commands();
    let reload = commands
        .iter()
        .position(|command| *command == SurfaceCommand::ReloadData)
        .unwrap();
    assert_eq!(reload, commands.len() - 1);
    assert!(
        commands[..reload]
            .iter()
            .all(|command| matches!(command, SurfaceCommand::Register { .. }))
    );
}

#[test]
fn test_every_section_has_both_slots() {
    let (driver, _) = fixture_driver();
    for section in 0..driver.section_count() + 1 {
        for kind in SupplementaryKind::ALL {
            let content = driver.content_for_supplementary(section, kind);
            assert_eq!(content.section, section);
            assert_eq!(content.kind, kind);
        }
    }

    let header = driver.content_for_supplementary(0, SupplementaryKind::Header);
    assert_eq!(header.descriptor.identifier(), "reuse_header+A");
    assert_eq!(header.label.as_deref(), Some("label_header+A"));
    assert_eq!(header.accessibility_identifier.as_deref(), Some("access_header+0"));

    let footer = driver.content_for_supplementary(3, SupplementaryKind::Footer);
    assert_eq!(footer.accessibility_identifier.as_deref(), Some("access_footer+3"));

    assert!(driver.content_for_supplementary(1, SupplementaryKind::Header).slot.is_hidden());
    assert!(driver.content_for_supplementary(1, SupplementaryKind::Footer).slot.is_hidden());
    assert!(driver.content_for_supplementary(2, SupplementaryKind::Header).slot.is_hidden());
    assert!(driver.content_for_supplementary(4, SupplementaryKind::Footer).descriptor.is_hidden());
}

#[test]
fn test_supplementary_sizes() {
    let (mut driver, _) = fixture_driver();
    let size = |driver: &ListDriver<RecordingSurface>, section, kind| {
        driver.size_for_supplementary(section, kind)
    };

    assert_eq!(size(&driver, 0, SupplementaryKind::Header), 10.0);
    assert_eq!(size(&driver, 0, SupplementaryKind::Footer), 11.0);
    assert_eq!(size(&driver, 1, SupplementaryKind::Header), 0.0);
    assert_eq!(size(&driver, 1, SupplementaryKind::Footer), 21.0);
    assert_eq!(size(&driver, 2, SupplementaryKind::Header), 30.0);
    assert_eq!(size(&driver, 3, SupplementaryKind::Header), 0.0);

    driver.surface_mut().set_default_size(ElementKind::Header, Some(50.0));
    driver.surface_mut().set_default_size(ElementKind::Footer, Some(51.0));

    assert_eq!(size(&driver, 0, SupplementaryKind::Header), 10.0);
    assert_eq!(size(&driver, 1, SupplementaryKind::Header), 50.0);
    assert_eq!(size(&driver, 2, SupplementaryKind::Footer), 51.0);
    assert_eq!(size(&driver, 3, SupplementaryKind::Header), 50.0);
    assert_eq!(size(&driver, 3, SupplementaryKind::Footer), 51.0);
    assert_eq!(size(&driver, 4, SupplementaryKind::Header), 0.0);
}

#[test]
fn test_item_content() {
    let (driver, _) = fixture_driver();
    let content = driver.content_for_item(IndexPath::new(2, 1)).unwrap();
    assert_eq!(content.label.as_deref(), Some("E"));
    assert_eq!(content.accessibility_identifier.as_deref(), Some("access-2.1"));
    assert_eq!(content.descriptor, label_cell());

    assert!(driver.content_for_item(IndexPath::new(0, 0)).is_none());
    assert!(driver.content_for_item(IndexPath::new(1, 3)).is_none());
    assert!(driver.content_for_item(IndexPath::new(9, 0)).is_none());
}

#[test]
fn test_out_of_range_queries() {
    let (driver, _) = fixture_driver();
    assert!(driver.item_model(IndexPath::new(1, 7)).is_none());
    assert!(driver.item_model(IndexPath::new(7, 0)).is_none());
    assert!(driver.supplementary_model(7, SupplementaryKind::Header).is_none());
    assert!(driver.supplementary_model(1, SupplementaryKind::Header).is_none());
    assert_eq!(driver.size_for_item(IndexPath::new(7, 0)), 0.0);
}

#[test]
fn test_should_highlight() {
    let (driver, _) = fixture_driver();
    assert!(!driver.should_highlight(IndexPath::new(1, 0)));
    assert!(!driver.should_highlight(IndexPath::new(2, 2)));
    assert!(driver.should_highlight(IndexPath::new(0, 0)));
    assert!(driver.should_highlight(IndexPath::new(5, 5)));
}

#[test]
fn test_selection_routes_to_one_item() {
    let (mut driver, log) = fixture_driver();

    driver.did_select(IndexPath::new(1, 1));
    driver.did_deselect(IndexPath::new(2, 0));
    driver.did_select(IndexPath::new(0, 0));
    driver.did_deselect(IndexPath::new(9, 9));

    assert_eq!(*log.lock(), vec!["select B".to_string(), "deselect D".to_string()]);
}

#[test]
fn test_deselect_after_select() {
    let (mut driver, _) = fixture_driver();
    driver.did_select(IndexPath::new(1, 0));
    assert_eq!(driver.surface().deselect_count(), 1);
    assert_eq!(
        driver.surface().commands().last(),
        Some(&SurfaceCommand::DeselectItem(IndexPath::new(1, 0)))
    );

    let log = Arc::new(Mutex::new(Vec::new()));
    let config = DriverConfig::default().deselect_on_selection(false);
    let mut driver = ListDriver::with_tree(RecordingSurface::new(), fixture(&log), config);
    driver.did_select(IndexPath::new(1, 0));
    assert_eq!(driver.surface().deselect_count(), 0);
    assert_eq!(*log.lock(), vec!["select A".to_string()]);
}

#[test]
fn test_selection_signals() {
    let (mut driver, _) = fixture_driver();
    let selected = Arc::new(AtomicUsize::new(0));
    let counter = selected.clone();
    driver.signals().item_selected.connect(move |path| {
        assert_eq!(*path, IndexPath::new(2, 2));
        counter.fetch_add(1, Ordering::SeqCst);
    });

    driver.did_select(IndexPath::new(2, 2));
    driver.did_select(IndexPath::new(6, 0));
    assert_eq!(selected.load(Ordering::SeqCst), 1);
}

#[test]
fn test_two_section_scenario() {
    init_tracing();
    let cell = label_cell();
    let tree = ModelTree::new(vec![
        Section::empty()
            .with_header(Supplementary::new(ReuseDescriptor::new("Title", "title")).with_size(10.0))
            .with_footer(Supplementary::new(ReuseDescriptor::new("Note", "note")).with_size(11.0)),
        Section::empty()
            .with_items(["x", "y", "z"].map(|key| Item::new(cell.clone()).with_key(key)))
            .with_footer(Supplementary::new(ReuseDescriptor::new("Note", "note")).with_size(21.0)),
    ]);
    let driver = ListDriver::with_tree(RecordingSurface::new(), tree, DriverConfig::default());

    assert_eq!(driver.section_count(), 2);
    assert_eq!(driver.item_count(0), 0);
    assert_eq!(driver.item_count(1), 3);
    assert_eq!(driver.size_for_supplementary(0, SupplementaryKind::Header), 10.0);
    assert_eq!(driver.size_for_supplementary(0, SupplementaryKind::Footer), 11.0);
    assert_eq!(driver.size_for_supplementary(1, SupplementaryKind::Header), 0.0);
    assert_eq!(driver.size_for_supplementary(1, SupplementaryKind::Footer), 21.0);
}

#[test]
fn test_relabel_reloads_supplementaries_only() {
    init_tracing();
    let cell = label_cell();
    let tree = |header: &str, footer: &str| {
        ModelTree::new(vec![
            Section::empty()
                .with_header(Supplementary::new(ReuseDescriptor::new("Title", "title")).with_label(header))
                .with_footer(Supplementary::new(ReuseDescriptor::new("Note", "note")).with_label(footer)),
            Section::empty().with_items(["x", "y", "z"].map(|key| Item::new(cell.clone()).with_key(key))),
        ])
    };

    let mut driver = ListDriver::with_tree(
        RecordingSurface::new(),
        tree("Inbox", "3 unread"),
        DriverConfig::default(),
    );
    driver.surface_mut().clear_commands();

    let summary = driver.try_set_model_tree(tree("Archive", "0 unread")).unwrap();
    assert_eq!(summary.edits, 2);
    assert_eq!(
        driver.surface().commands(),
        &[
            SurfaceCommand::BeginUpdates,
            SurfaceCommand::ReloadSupplementary {
                section: 0,
                kind: SupplementaryKind::Header,
            },
            SurfaceCommand::ReloadSupplementary {
                section: 0,
                kind: SupplementaryKind::Footer,
            },
            SurfaceCommand::EndUpdates,
        ]
    );
    assert_eq!(
        driver.content_for_supplementary(0, SupplementaryKind::Header).label.as_deref(),
        Some("Archive")
    );
}

#[test]
fn test_item_edits_reach_surface() {
    let (mut driver, log) = fixture_driver();
    driver.surface_mut().clear_commands();

    let sections = fixture(&log).sections().to_vec();
    let mut reordered = sections.clone();
    reordered[1] = Section::empty()
        .with_items(["C", "A", "G"].map(|key| item(key, &log)))
        .with_footer(Supplementary::new(ReuseDescriptor::hidden()).with_size(21.0));
    driver.set_model_tree(ModelTree::new(reordered));

    assert_eq!(driver.surface().batch_count(), 1);
    assert_eq!(driver.surface().shape().counts(), &[0, 3, 3, 0]);
    assert!(driver.surface().commands().contains(&SurfaceCommand::DeleteItems(vec![IndexPath::new(1, 1)])));
    assert!(driver.surface().commands().contains(&SurfaceCommand::InsertItems(vec![IndexPath::new(1, 2)])));
    assert_eq!(
        driver.content_for_item(IndexPath::new(1, 2)).unwrap().label.as_deref(),
        Some("G")
    );

    // New descriptors are registered before the batch opens.
    let with_new_cell = ModelTree::new(vec![
        Section::empty().with_item(Item::new(ReuseDescriptor::new("BadgeCell", "badge"))),
    ]);
    driver.surface_mut().clear_commands();
    driver.set_model_tree(with_new_cell);
    let commands = driver.surface().commands();
    assert!(matches!(commands[0], SurfaceCommand::Register { kind: ElementKind::Item, .. }));
    assert_eq!(commands[1], SurfaceCommand::BeginUpdates);
    assert_eq!(driver.surface().shape().counts(), &[1]);
}

#[test]
fn test_reload_when_diffing_disabled() {
    let (mut driver, log) = fixture_driver();
    driver.set_automatic_diffing(false);
    driver.surface_mut().clear_commands();

    let commits = Arc::new(Mutex::new(Vec::new()));
    let sink = commits.clone();
    driver.signals().tree_committed.connect(move |summary| sink.lock().push(summary.mode));

    driver.set_model_tree(ModelTree::new(fixture(&log).sections()[..2].to_vec()));
    driver.set_model_tree(fixture(&log));

    assert_eq!(driver.surface().reload_data_count(), 2);
    assert_eq!(driver.surface().batch_count(), 0);
    assert_eq!(*commits.lock(), vec![CommitMode::Reloaded, CommitMode::Reloaded]);
    assert_eq!(driver.section_count(), 4);
}

#[test]
fn test_rejected_batch_keeps_committed_tree() {
    let (mut driver, log) = fixture_driver();
    let committed = driver.tree().clone();
    driver.surface_mut().reject_next_batch("animation in flight");

    let err = driver
        .try_set_model_tree(ModelTree::new(fixture(&log).sections()[..1].to_vec()))
        .unwrap_err();

    assert!(matches!(
        err,
        ReconcileError::Surface(SurfaceError::Rejected(ref message)) if message == "animation in flight"
    ));
    assert!(driver.tree().ptr_eq(&committed));
    assert_eq!(driver.section_count(), 4);
    assert_eq!(driver.surface().commands().last(), Some(&SurfaceCommand::AbandonUpdates));
    assert!(!driver.surface().in_transaction());
    assert_eq!(driver.surface().shape().counts(), &[0, 3, 3, 0]);
}

#[test]
#[should_panic(expected = "list surface update failed")]
fn test_desynchronized_surface_panics() {
    let (mut driver, log) = fixture_driver();
    driver.surface_mut().reload_data(&ModelTree::empty());

    let mut sections = fixture(&log).sections().to_vec();
    sections.remove(1);
    driver.set_model_tree(ModelTree::new(sections));
}

#[test]
fn test_config_from_toml() {
    let config = DriverConfig::from_toml_str(
        r#"
            automatic_diffing = false
            size_policy = ["surface_default", "explicit"]
        "#,
    )
    .unwrap();
    assert!(!config.automatic_diffing);
    assert!(config.deselect_on_selection);

    let log = Arc::new(Mutex::new(Vec::new()));
    let surface = RecordingSurface::new().with_default_size(ElementKind::Header, 50.0);
    let driver = ListDriver::with_tree(surface, fixture(&log), config);

    // Surface defaults win over explicit sizes under this policy.
    assert_eq!(driver.size_for_supplementary(0, SupplementaryKind::Header), 50.0);
    assert_eq!(driver.size_for_supplementary(0, SupplementaryKind::Footer), 11.0);
}

/// A host surface that forwards to a recording surface and counts whole
/// section reloads.
#[derive(Default)]
struct ForwardingSurface {
    inner: RecordingSurface,
    section_reloads: usize,
}

impl ListSurface for ForwardingSurface {
    fn begin_updates(&mut self) -> Result<(), SurfaceError> {
        self.inner.begin_updates()
    }

    fn end_updates(&mut self, source: &dyn DataSource) -> Result<(), SurfaceError> {
        self.inner.end_updates(source)
    }

    fn abandon_updates(&mut self) {
        self.inner.abandon_updates()
    }

    fn insert_sections(&mut self, sections: &[usize]) -> Result<(), SurfaceError> {
        self.inner.insert_sections(sections)
    }

    fn delete_sections(&mut self, sections: &[usize]) -> Result<(), SurfaceError> {
        self.inner.delete_sections(sections)
    }

    fn move_section(&mut self, from: usize, to: usize) -> Result<(), SurfaceError> {
        self.inner.move_section(from, to)
    }

    fn reload_sections(&mut self, sections: &[usize]) -> Result<(), SurfaceError> {
        self.section_reloads += 1;
        self.inner.reload_sections(sections)
    }

    fn reload_supplementary(
        &mut self,
        section: usize,
        kind: SupplementaryKind,
    ) -> Result<(), SurfaceError> {
        self.inner.reload_supplementary(section, kind)
    }

    fn insert_items(&mut self, paths: &[IndexPath]) -> Result<(), SurfaceError> {
        self.inner.insert_items(paths)
    }

    fn delete_items(&mut self, paths: &[IndexPath]) -> Result<(), SurfaceError> {
        self.inner.delete_items(paths)
    }

    fn move_item(&mut self, from: IndexPath, to: IndexPath) -> Result<(), SurfaceError> {
        self.inner.move_item(from, to)
    }

    fn reload_items(&mut self, paths: &[IndexPath]) -> Result<(), SurfaceError> {
        self.inner.reload_items(paths)
    }

    fn reload_data(&mut self, source: &dyn DataSource) {
        self.inner.reload_data(source)
    }

    fn register_reuse_descriptor(&mut self, descriptor: &ReuseDescriptor, kind: ElementKind) {
        self.inner.register_reuse_descriptor(descriptor, kind)
    }

    fn deselect_item(&mut self, path: IndexPath) {
        self.inner.deselect_item(path)
    }

    fn default_size(&self, kind: ElementKind) -> Option<f32> {
        self.inner.default_size(kind)
    }
}

fn titled(key: Option<&str>, title: &str, items: &[&str]) -> Section {
    let section = Section::empty()
        .with_header(Supplementary::new(ReuseDescriptor::new("Title", "title")).with_label(title))
        .with_items(items.iter().map(|key| Item::new(label_cell()).with_key(*key)));
    match key {
        Some(key) => section.with_key(key),
        None => section,
    }
}

#[test]
fn test_header_change_with_item_inserts_in_one_batch() {
    init_tracing();
    let mut driver = ListDriver::with_tree(
        ForwardingSurface::default(),
        ModelTree::new(vec![titled(None, "Inbox", &["a"])]),
        DriverConfig::default(),
    );
    driver.surface_mut().inner.clear_commands();

    driver.set_model_tree(ModelTree::new(vec![titled(None, "Inbox (2)", &["a", "b"])]));

    assert_eq!(
        driver.surface().inner.commands(),
        &[
            SurfaceCommand::BeginUpdates,
            SurfaceCommand::ReloadSupplementary {
                section: 0,
                kind: SupplementaryKind::Header,
            },
            SurfaceCommand::InsertItems(vec![IndexPath::new(0, 1)]),
            SurfaceCommand::EndUpdates,
        ]
    );
    assert_eq!(driver.surface().section_reloads, 0);
    assert_eq!(driver.surface().inner.shape().counts(), &[2]);
}

#[test]
fn test_header_change_with_item_moves_and_deletes() {
    init_tracing();
    let mut driver = ListDriver::with_tree(
        ForwardingSurface::default(),
        ModelTree::new(vec![titled(None, "Recent", &["a", "b", "c"])]),
        DriverConfig::default(),
    );

    let summary = driver
        .try_set_model_tree(ModelTree::new(vec![titled(None, "Older", &["c", "a"])]))
        .unwrap();

    assert_eq!(summary.mode, CommitMode::Diffed);
    assert_eq!(driver.surface().inner.shape().counts(), &[2]);
    assert!(driver.surface().inner.commands().contains(&SurfaceCommand::ReloadSupplementary {
        section: 0,
        kind: SupplementaryKind::Header,
    }));
}

#[test]
fn test_header_reload_after_deleted_section() {
    init_tracing();
    let mut driver = ListDriver::with_tree(
        ForwardingSurface::default(),
        ModelTree::new(vec![
            titled(Some("x"), "X", &["x1"]),
            titled(Some("y"), "old", &["1"]),
        ]),
        DriverConfig::default(),
    );
    driver.surface_mut().inner.clear_commands();

    driver.set_model_tree(ModelTree::new(vec![titled(Some("y"), "new", &["1", "2"])]));

    assert_eq!(
        driver.surface().inner.commands(),
        &[
            SurfaceCommand::BeginUpdates,
            SurfaceCommand::DeleteSections(vec![0]),
            SurfaceCommand::ReloadSupplementary {
                section: 1,
                kind: SupplementaryKind::Header,
            },
            SurfaceCommand::InsertItems(vec![IndexPath::new(0, 1)]),
            SurfaceCommand::EndUpdates,
        ]
    );
    assert_eq!(driver.surface().inner.shape().counts(), &[2]);
    assert_eq!(
        driver.content_for_supplementary(0, SupplementaryKind::Header).label.as_deref(),
        Some("new")
    );
}

#[test]
fn test_header_reload_after_inserted_section() {
    init_tracing();
    let mut driver = ListDriver::with_tree(
        RecordingSurface::new(),
        ModelTree::new(vec![titled(Some("y"), "old", &["1"])]),
        DriverConfig::default(),
    );

    driver.set_model_tree(ModelTree::new(vec![
        titled(Some("x"), "X", &["x1", "x2"]),
        titled(Some("y"), "new", &["1"]),
    ]));

    assert_eq!(driver.surface().shape().counts(), &[2, 1]);
    assert!(driver.surface().commands().contains(&SurfaceCommand::ReloadSupplementary {
        section: 0,
        kind: SupplementaryKind::Header,
    }));
}
