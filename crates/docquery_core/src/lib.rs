pub mod controller;
pub mod domain;
pub mod ports;
pub mod state;

pub use controller::SessionController;
pub use domain::{
    DocumentId, DocumentSession, PdfUpload, Question, QueryRequest, QueryResult, ValidationError,
};
pub use ports::{DocumentService, TransportError, TransportResult};
pub use state::{
    InteractionState, InvalidTransition, QueryActivity, SessionEvent, SessionState,
    QUERY_FAILED_MESSAGE, UPLOAD_FAILED_MESSAGE,
};
