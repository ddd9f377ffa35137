// Data Models
pub mod file_entry;
pub mod operation;
pub mod panel_state;
pub mod response;

pub use file_entry::{DirEntry, DirectoryListing, FileEntry};
pub use operation::{BatchItem, BatchKind, BatchReport, FsOperation, ItemKind};
pub use panel_state::{PanelIndex, PanelState};
pub use response::{
    BatchResponse, BootstrapResponse, DirContentResponse, ErrorResponse, FileContentResponse,
    OperationResponse, ReloadedPanels,
};
