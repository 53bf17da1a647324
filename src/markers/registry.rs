use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;

use log::{debug, info};

use crate::model::Matrix4;

use super::io::{conversion_lines, marker_lines, write_lines};
use super::{
    CoordinateLookup, Marker, MarkerError, MarkerId, ObserverId, Result, Rgb, SaveReport,
    ScannerTransform, TalairachClient, UndoCommand, UndoRegistry, Viewer, ViewerEvent,
    companion_path, read_markers, save_registration,
};

pub const DEFAULT_MARKER_COLOR: Rgb = [0.0, 0.0, 1.0];

/// The markers placed on the current volume, the selection, and the viewers
/// that draw them.
///
/// # Invariants
/// - Every selected id belongs to a marker in `markers`.
/// - Each change to `markers` or to the selection is followed by exactly one
///   notification describing it; calls that change nothing notify nothing.
/// - Every edit records its inverse in the undo history, except the edit an
///   undo itself replays.
pub struct MarkerRegistry {
    markers: Vec<Marker>,
    selected: BTreeSet<MarkerId>,
    default_color: Rgb,
    labels_on: bool,
    observers: BTreeMap<ObserverId, Arc<dyn Viewer>>,
    next_observer: u64,
    scanner_transform: Option<ScannerTransform>,
    registration: Option<Matrix4>,
    lookup: Box<dyn CoordinateLookup>,
    history: UndoRegistry<UndoCommand>,
}

impl std::fmt::Debug for MarkerRegistry {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("MarkerRegistry")
            .field("markers", &self.markers.len())
            .field("selected", &self.selected.len())
            .field("default_color", &self.default_color)
            .field("labels_on", &self.labels_on)
            .field("observers", &self.observers.len())
            .field("scanner_transform", &self.scanner_transform.is_some())
            .field("history", &self.history.len())
            .finish()
    }
}

impl Default for MarkerRegistry {
    fn default() -> Self {
        Self::new(Box::new(TalairachClient::default()))
    }
}

impl MarkerRegistry {
    pub fn new(lookup: Box<dyn CoordinateLookup>) -> Self {
        Self {
            markers: Vec::new(),
            selected: BTreeSet::new(),
            default_color: DEFAULT_MARKER_COLOR,
            labels_on: true,
            observers: BTreeMap::new(),
            next_observer: 0,
            scanner_transform: None,
            registration: None,
            lookup,
            history: UndoRegistry::new(),
        }
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|marker| marker.id() == id)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn add_marker(&mut self, marker: Marker) -> MarkerId {
        let position = self.markers.len();
        self.insert_marker(position, marker)
    }

    fn insert_marker(&mut self, position: usize, marker: Marker) -> MarkerId {
        let id = marker.id();
        let position = position.min(self.markers.len());
        if !self.history.push_command(UndoCommand::RemoveMarker(id)) {
            debug!("event=undo_push_suppressed module=markers op=add marker={id}");
        }
        self.markers.insert(position, marker.clone());
        debug!("event=marker_add module=markers marker={id} position={position}");
        self.notify(&ViewerEvent::AddMarker(marker));
        id
    }

    /// Unknown ids are ignored. A selected marker is unselected first.
    pub fn remove_marker(&mut self, id: MarkerId) -> Option<Marker> {
        let position = self.markers.iter().position(|marker| marker.id() == id)?;
        self.remove_selection(id);
        let marker = self.markers.remove(position);
        let inverse = UndoCommand::AddMarker {
            marker: marker.clone(),
            position,
        };
        if !self.history.push_command(inverse) {
            debug!("event=undo_push_suppressed module=markers op=remove marker={id}");
        }
        debug!("event=marker_remove module=markers marker={id}");
        self.notify(&ViewerEvent::RemoveMarker(marker.clone()));
        Some(marker)
    }

    pub fn add_selection(&mut self, id: MarkerId) {
        let Some(marker) = self.get(id).cloned() else {
            return;
        };
        if self.selected.insert(id) {
            self.notify(&ViewerEvent::SelectMarker(marker));
        }
    }

    pub fn remove_selection(&mut self, id: MarkerId) {
        if !self.selected.remove(&id) {
            return;
        }
        if let Some(marker) = self.get(id).cloned() {
            self.notify(&ViewerEvent::UnselectMarker(marker));
        }
    }

    pub fn select_new(&mut self, id: MarkerId) {
        let previous = self.selected.iter().copied().collect::<Vec<_>>();
        for old in previous {
            self.remove_selection(old);
        }
        self.add_selection(id);
    }

    pub fn is_selected(&self, id: MarkerId) -> bool {
        self.selected.contains(&id)
    }

    pub fn selected(&self) -> Vec<MarkerId> {
        self.selected.iter().copied().collect()
    }

    pub fn num_selected(&self) -> usize {
        self.selected.len()
    }

    pub fn default_color(&self) -> Rgb {
        self.default_color
    }

    pub fn set_default_color(&mut self, color: Rgb) {
        self.default_color = color;
    }

    /// A marker in the current default color.
    pub fn new_marker(&self, center: [f64; 3], radius: f64) -> Marker {
        Marker::new(center, radius, self.default_color)
    }

    pub fn labels_on(&self) -> bool {
        self.labels_on
    }

    pub fn set_labels_on(&mut self) {
        self.labels_on = true;
        self.notify(&ViewerEvent::LabelsOn);
    }

    pub fn set_labels_off(&mut self) {
        self.labels_on = false;
        self.notify(&ViewerEvent::LabelsOff);
    }

    /// Attaching the same viewer twice returns its existing id.
    pub fn attach(&mut self, observer: Arc<dyn Viewer>) -> ObserverId {
        if let Some((id, _)) = self
            .observers
            .iter()
            .find(|(_, existing)| Arc::ptr_eq(*existing, &observer))
        {
            return *id;
        }
        self.next_observer += 1;
        let id = ObserverId(self.next_observer);
        self.observers.insert(id, observer);
        id
    }

    pub fn detach(&mut self, id: ObserverId) -> bool {
        self.observers.remove(&id).is_some()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn notify(&self, event: &ViewerEvent) {
        for observer in self.observers.values() {
            observer.update_viewer(event);
        }
    }

    pub fn scanner_transform(&self) -> Option<&ScannerTransform> {
        self.scanner_transform.as_ref()
    }

    pub fn set_scanner_transform(&mut self, transform: Option<ScannerTransform>) {
        self.scanner_transform = transform;
    }

    pub fn history(&self) -> &UndoRegistry<UndoCommand> {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut UndoRegistry<UndoCommand> {
        &mut self.history
    }

    /// Replays the most recent inverse command. Returns `false` when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(command) = self.history.begin_undo() else {
            return false;
        };
        match command {
            UndoCommand::AddMarker { marker, position } => {
                debug!("event=undo module=markers op=add marker={}", marker.id());
                self.insert_marker(position, marker);
            }
            UndoCommand::RemoveMarker(id) => {
                debug!("event=undo module=markers op=remove marker={id}");
                self.remove_marker(id);
            }
        }
        self.history.end_undo();
        true
    }

    /// Writes the marker file and, with a scanner transform set, the `.conv`
    /// companion. The marker file is complete before any lookup starts.
    pub fn save_markers_as(&self, path: impl AsRef<Path>) -> Result<SaveReport> {
        let path = path.as_ref();
        write_lines(path, &marker_lines(&self.markers))?;

        let mut report = SaveReport {
            markers_path: path.to_path_buf(),
            marker_count: self.markers.len(),
            conversion_path: None,
            failed_lookups: 0,
        };
        if let Some(transform) = &self.scanner_transform {
            let (lines, failed) = conversion_lines(&self.markers, transform, self.lookup.as_ref());
            let conv_path = companion_path(path);
            write_lines(&conv_path, &lines)?;
            report.conversion_path = Some(conv_path);
            report.failed_lookups = failed;
        }
        info!(
            "event=markers_save module=markers status=ok path={} count={} failed_lookups={}",
            path.display(),
            report.marker_count,
            report.failed_lookups
        );
        Ok(report)
    }

    /// Adds every marker in the file as one bulk update. The loaded markers
    /// cannot be undone one by one: the history is flushed afterwards.
    pub fn load_markers_from(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let loaded = read_markers(path)?;
        let count = loaded.len();

        self.notify(&ViewerEvent::RenderOff);
        for marker in loaded {
            self.add_marker(marker);
        }
        self.notify(&ViewerEvent::RenderOn);
        self.history.flush();

        info!(
            "event=markers_load module=markers status=ok path={} count={count}",
            path.display()
        );
        Ok(count)
    }

    pub fn registration(&self) -> Option<&Matrix4> {
        self.registration.as_ref()
    }

    pub fn set_registration(&mut self, matrix: Option<Matrix4>) {
        self.registration = matrix;
    }

    pub fn save_registration_as(&self, path: impl AsRef<Path>) -> Result<()> {
        let matrix = self.registration.ok_or(MarkerError::NoRegistration)?;
        save_registration(path, &matrix)
    }
}
