mod error;
mod events;
mod io;
mod lookup;
mod marker;
mod registry;
mod undo;


pub use error::{LookupError, MarkerError, ParseMarkerError, Result};
pub use events::{ObserverId, Viewer, ViewerEvent};
pub use io::{SaveReport, companion_path, load_registration, read_markers, save_registration};
pub use lookup::{
    CoordinateLookup, DEFAULT_LOOKUP_HOST, DEFAULT_LOOKUP_PORT, DEFAULT_LOOKUP_TIMEOUT,
    OfflineLookup, TalairachClient, request_line, truncate_center,
};
pub use marker::{Marker, MarkerId, Rgb, ScannerTransform};
pub use registry::{DEFAULT_MARKER_COLOR, MarkerRegistry};
pub use undo::{UndoCommand, UndoRegistry};
