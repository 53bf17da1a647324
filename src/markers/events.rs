use super::Marker;

/// Everything a viewer can be told about the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerEvent {
    SelectMarker(Marker),
    UnselectMarker(Marker),
    AddMarker(Marker),
    RemoveMarker(Marker),
    LabelsOn,
    LabelsOff,
    /// Bulk update starts; viewers may stop redrawing until `RenderOn`.
    RenderOff,
    RenderOn,
}

impl ViewerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ViewerEvent::SelectMarker(_) => "select marker",
            ViewerEvent::UnselectMarker(_) => "unselect marker",
            ViewerEvent::AddMarker(_) => "add marker",
            ViewerEvent::RemoveMarker(_) => "remove marker",
            ViewerEvent::LabelsOn => "labels on",
            ViewerEvent::LabelsOff => "labels off",
            ViewerEvent::RenderOff => "render off",
            ViewerEvent::RenderOn => "render on",
        }
    }

    pub fn marker(&self) -> Option<&Marker> {
        match self {
            ViewerEvent::SelectMarker(marker)
            | ViewerEvent::UnselectMarker(marker)
            | ViewerEvent::AddMarker(marker)
            | ViewerEvent::RemoveMarker(marker) => Some(marker),
            _ => None,
        }
    }
}

/// A plot or 3-D widget that re-renders when the registry changes.
pub trait Viewer: Send + Sync {
    fn update_viewer(&self, event: &ViewerEvent);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverId(pub(crate) u64);
