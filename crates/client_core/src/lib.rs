pub mod config;
pub mod controller;
pub mod filter;
pub mod pagination;
pub mod record;
pub mod rest;
pub mod sample;
pub mod sort;
pub mod source;
pub mod validation;

use shared::protocol::{Client, Service};

pub use config::{load_settings, ConsoleSettings};
pub use controller::{
    ListController, ListError, ListPhase, ListSnapshot, ListState, ModalState, MutationKind,
    MutationOutcome, Notice, NoticeLevel, ReloadOutcome, ViewState,
};
pub use filter::{apply_filters, ClientFilter, FilterCriteria, SearchTerm, ServiceFilter};
pub use pagination::{page_slice, total_pages, Pager};
pub use record::ListRecord;
pub use rest::{RestDataSource, RestResource};
pub use sort::{SortFields, SortKey};
pub use source::{DataSource, SourceError, UnavailableDataSource};
pub use validation::{ClientDraft, FormState, ServiceDraft, Validate, ValidationErrors};

pub type ClientListController = ListController<Client, ClientFilter>;
pub type ServiceListController = ListController<Service, ServiceFilter>;
